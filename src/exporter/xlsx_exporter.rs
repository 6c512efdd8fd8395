// ==========================================
// 采购订单库存差异报表 - Excel 导出器
// ==========================================
// 职责: JSON 行数组 → 单 sheet 的 .xlsx 文件（内存中生成）
// 列顺序: 首行键顺序，后续行新出现的键依次追加
// ==========================================

use crate::importer::error::{ReportError, ReportResult};
use rust_xlsxwriter::{ColNum, Format, FormatAlign, FormatBorder, RowNum, Workbook, Worksheet};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

/// 默认工作表名称
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// 导出文件的 MIME 类型
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub struct XlsxExporter {
    sheet_name: String,
}

impl Default for XlsxExporter {
    fn default() -> Self {
        Self::new(DEFAULT_SHEET_NAME)
    }
}

impl XlsxExporter {
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
        }
    }

    /// 导出任意可序列化行（先转为 JSON 再走同一路径）
    pub fn export_rows<T: Serialize>(&self, rows: &[T]) -> ReportResult<Vec<u8>> {
        let value = serde_json::to_value(rows)?;
        self.export_json(&value)
    }

    /// 导出 JSON 行数组
    ///
    /// # 返回
    /// - Ok(Vec<u8>): xlsx 文件字节
    /// - Err(Serialization): 非数组 / 行非对象 / 超出表格行列上限
    pub fn export_json(&self, value: &Value) -> ReportResult<Vec<u8>> {
        let rows = value.as_array().ok_or_else(|| {
            ReportError::Serialization(format!(
                "expected a JSON array of row objects, got {}",
                json_type_name(value)
            ))
        })?;

        let objects = rows
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                row.as_object().ok_or_else(|| {
                    ReportError::Serialization(format!(
                        "row {} is {}, expected an object",
                        idx + 1,
                        json_type_name(row)
                    ))
                })
            })
            .collect::<ReportResult<Vec<&Map<String, Value>>>>()?;

        let columns = collect_columns(&objects);

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&self.sheet_name)?;

        write_header(worksheet, &columns)?;
        for (idx, object) in objects.iter().enumerate() {
            let row = to_row_num(idx + 1)?;
            for (col_idx, column) in columns.iter().enumerate() {
                if let Some(cell) = object.get(column) {
                    write_cell(worksheet, row, to_col_num(col_idx)?, cell)?;
                }
            }
        }
        worksheet.autofit();

        let buffer = workbook.save_to_buffer()?;
        debug!(
            rows = objects.len(),
            columns = columns.len(),
            bytes = buffer.len(),
            "Excel 导出完成"
        );
        Ok(buffer)
    }
}

/// 列集合: 首行键在前，之后按首次出现顺序追加
pub fn collect_columns(rows: &[&Map<String, Value>]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
        }
    }
    columns
}

/// 表头（加粗 + 细边框 + 居中），不输出行号列
fn write_header(worksheet: &mut Worksheet, columns: &[String]) -> ReportResult<()> {
    let header_format = Format::new()
        .set_bold()
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center);

    for (col_idx, column) in columns.iter().enumerate() {
        worksheet.write_string_with_format(0, to_col_num(col_idx)?, column, &header_format)?;
    }
    Ok(())
}

fn write_cell(worksheet: &mut Worksheet, row: RowNum, col: ColNum, cell: &Value) -> ReportResult<()> {
    match cell {
        Value::Null => {}
        Value::Bool(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        Value::Number(n) => match n.as_f64() {
            Some(f) => {
                worksheet.write_number(row, col, f)?;
            }
            None => {
                worksheet.write_string(row, col, n.to_string())?;
            }
        },
        Value::String(s) => {
            worksheet.write_string(row, col, s)?;
        }
        // 嵌套结构写为紧凑 JSON 文本
        Value::Array(_) | Value::Object(_) => {
            worksheet.write_string(row, col, serde_json::to_string(cell)?)?;
        }
    }
    Ok(())
}

fn to_row_num(idx: usize) -> ReportResult<RowNum> {
    RowNum::try_from(idx)
        .map_err(|_| ReportError::Serialization(format!("row index {} out of range", idx)))
}

fn to_col_num(idx: usize) -> ReportResult<ColNum> {
    ColNum::try_from(idx)
        .map_err(|_| ReportError::Serialization(format!("column index {} out of range", idx)))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
