// ==========================================
// 采购订单库存差异报表 - 文件解析器实现
// ==========================================
// 阶段 0: 文件读取与解析
// 支持: Excel (.xlsx/.xlsm/.xlsb/.xls/.ods) / CSV (.csv)
// ==========================================

use crate::domain::{CellValue, RawRow, RawSheet};
use crate::importer::error::{ReportError, ReportResult};
use crate::importer::report_importer_trait::FileParser;
use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Reader, Sheets};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use tracing::debug;

/// Excel 支持的扩展名
pub const EXCEL_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_sheet(&self, file_path: &Path) -> ReportResult<RawSheet> {
        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        // 读取表头
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(ReportError::EmptySheet);
        }

        // 读取所有行
        let mut rows = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            let record = result?;
            let mut cells = HashMap::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    cells.insert(header.clone(), CellValue::from_text(value));
                }
            }

            // 跳过完全空白的行
            if cells.values().all(CellValue::is_empty) {
                continue;
            }

            rows.push(RawRow {
                row_number: row_idx + 1,
                cells,
            });
        }

        finish_sheet(headers, rows)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_sheet(&self, file_path: &Path) -> ReportResult<RawSheet> {
        // 按扩展名自动选择 xlsx/xls/xlsb/ods 读取器
        let mut workbook = open_workbook_auto(file_path)?;
        read_first_sheet(&mut workbook)
    }
}

impl ExcelParser {
    /// 按文件内容识别工作簿格式（扩展名缺失或无法识别时使用）
    ///
    /// # 返回
    /// - Ok(Some(RawSheet)): 内容是可识别的工作簿
    /// - Ok(None): 内容不是任何已知工作簿格式
    pub fn parse_by_content(&self, file_path: &Path) -> ReportResult<Option<RawSheet>> {
        let bytes = std::fs::read(file_path)?;
        match open_workbook_auto_from_rs(Cursor::new(bytes)) {
            Ok(mut workbook) => read_first_sheet(&mut workbook).map(Some),
            Err(e) => {
                debug!(error = %e, "按内容识别工作簿失败");
                Ok(None)
            }
        }
    }
}

/// 读取第一个 sheet: 首行为表头，其余为数据行
fn read_first_sheet<RS: Read + Seek>(workbook: &mut Sheets<RS>) -> ReportResult<RawSheet> {
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(ReportError::EmptySheet)?;

    let range = workbook.worksheet_range(&sheet_name)?;

    // 提取表头（第一行）
    let mut data_rows = range.rows();
    let header_row = data_rows.next().ok_or(ReportError::EmptySheet)?;

    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| cell.to_string().trim().to_string())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(ReportError::EmptySheet);
    }

    // 读取数据行
    let mut rows = Vec::new();
    for (row_idx, data_row) in data_rows.enumerate() {
        let mut cells = HashMap::new();

        for (col_idx, cell) in data_row.iter().enumerate() {
            if let Some(header) = headers.get(col_idx) {
                if header.is_empty() {
                    continue;
                }
                cells.insert(header.clone(), convert_cell(cell));
            }
        }

        // 跳过完全空白的行
        if cells.values().all(CellValue::is_empty) {
            continue;
        }

        rows.push(RawRow {
            row_number: row_idx + 1,
            cells,
        });
    }

    finish_sheet(headers, rows)
}

/// 表头存在但无数据行同样视为空表
fn finish_sheet(headers: Vec<String>, rows: Vec<RawRow>) -> ReportResult<RawSheet> {
    let sheet = RawSheet { headers, rows };
    if sheet.is_empty() {
        return Err(ReportError::EmptySheet);
    }
    Ok(sheet)
}

/// calamine 单元格 → CellValue
fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) => CellValue::from_text(s),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        // as_datetime 按工作簿的日期系统（1900 / 1904）换算
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(CellValue::DateTime)
            .unwrap_or(CellValue::Empty),
        Data::DateTimeIso(s) => NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d").map(|d| d.and_time(Default::default()))
            })
            .map(CellValue::DateTime)
            .unwrap_or_else(|_| CellValue::from_text(s)),
        Data::DurationIso(s) => CellValue::from_text(s),
    }
}

/// Excel 序列日 → 日期时间（1900 日期系统，纪元 1899-12-30）
///
/// 仅用于普通数值单元格；带日期格式的单元格由 calamine 换算
///
/// 超出 chrono 可表示范围或非有限值返回 None
pub fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 || serial > 2_958_465.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let days = serial.trunc() as i64;
    let seconds = ((serial - serial.trunc()) * 86_400.0).round() as i64;
    epoch.checked_add_signed(Duration::days(days) + Duration::seconds(seconds))
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ReportResult<RawSheet> {
        self.parse_sheet(file_path.as_ref())
    }
}

impl FileParser for UniversalFileParser {
    fn parse_sheet(&self, file_path: &Path) -> ReportResult<RawSheet> {
        let ext = file_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse_sheet(file_path),
            e if EXCEL_EXTENSIONS.contains(&e) => ExcelParser.parse_sheet(file_path),
            // 扩展名缺失或未知: 按内容识别工作簿
            _ => ExcelParser
                .parse_by_content(file_path)?
                .ok_or(ReportError::UnsupportedFormat(ext)),
        }
    }
}
