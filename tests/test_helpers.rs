// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 生成上传用的 xlsx / csv 测试文件、构造测试用 AppState
// ==========================================
#![allow(dead_code)]

use po_variance_report::app::AppState;
use po_variance_report::config::{config_keys, ConfigManager};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

/// 必需列（上传文件表头顺序）
pub const HEADERS: [&str; 7] = [
    "PO_NO",
    "Item Code",
    "Item Name",
    "MAT_Color_Code",
    "PCD Date",
    "BAL_TO_ISSUE",
    "Total Current Stock",
];

/// PCD Date 单元格
#[derive(Debug, Clone, Copy)]
pub enum PcdCell {
    /// 真实日期单元格
    Date(u16, u8, u8),
    /// 文本单元格
    Text(&'static str),
    Empty,
}

/// 一行库存数据
#[derive(Debug, Clone, Copy)]
pub struct StockRow {
    pub po_no: &'static str,
    pub item_code: &'static str,
    pub item_name: &'static str,
    pub color: &'static str,
    pub pcd: PcdCell,
    pub bal_to_issue: f64,
    pub stock: f64,
}

impl StockRow {
    pub fn new(po_no: &'static str, pcd: PcdCell, bal_to_issue: f64, stock: f64) -> Self {
        Self {
            po_no,
            item_code: "A01",
            item_name: "Widget",
            color: "RED",
            pcd,
            bal_to_issue,
            stock,
        }
    }

    pub fn item(mut self, item_code: &'static str, item_name: &'static str) -> Self {
        self.item_code = item_code;
        self.item_name = item_name;
        self
    }
}

/// 生成 xlsx 字节
pub fn build_xlsx(rows: &[StockRow]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");

    for (col, header) in HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header).unwrap();
    }

    for (idx, row) in rows.iter().enumerate() {
        let r = idx as u32 + 1;
        sheet.write_string(r, 0, row.po_no).unwrap();
        sheet.write_string(r, 1, row.item_code).unwrap();
        sheet.write_string(r, 2, row.item_name).unwrap();
        sheet.write_string(r, 3, row.color).unwrap();
        match row.pcd {
            PcdCell::Date(y, m, d) => {
                let date = ExcelDateTime::from_ymd(y, m, d).unwrap();
                sheet.write_datetime_with_format(r, 4, &date, &date_format).unwrap();
            }
            PcdCell::Text(text) => {
                sheet.write_string(r, 4, text).unwrap();
            }
            PcdCell::Empty => {}
        }
        sheet.write_number(r, 5, row.bal_to_issue).unwrap();
        sheet.write_number(r, 6, row.stock).unwrap();
    }

    workbook.save_to_buffer().unwrap()
}

/// 生成 csv 文本
pub fn build_csv(rows: &[StockRow]) -> String {
    let mut out = HEADERS.join(",");
    out.push('\n');
    for row in rows {
        let pcd = match row.pcd {
            PcdCell::Date(y, m, d) => format!("{:04}-{:02}-{:02}", y, m, d),
            PcdCell::Text(text) => text.to_string(),
            PcdCell::Empty => String::new(),
        };
        out.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            row.po_no, row.item_code, row.item_name, row.color, pcd, row.bal_to_issue, row.stock
        ));
    }
    out
}

/// 写入带指定扩展名的临时文件
pub fn write_temp_file(suffix: &str, bytes: &[u8]) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}

/// 测试用 AppState（上传目录指向独立临时目录）
///
/// # 返回
/// - TempDir: 上传目录（需要保持存活）
/// - AppState
pub fn create_test_state() -> (TempDir, AppState) {
    let upload_dir = tempfile::tempdir().unwrap();
    let config = ConfigManager::from_pairs([(
        config_keys::UPLOAD_DIR,
        upload_dir.path().to_string_lossy().to_string(),
    )]);
    let state = AppState::from_config(&config).unwrap();
    (upload_dir, state)
}

/// 样例数据（对应典型上传文件）
///
/// - 123/A01 两条负差异: -6 + -2 = -8，最早日期 2023-01-15
/// - 456/B02 正差异，被过滤
/// - CL-77 订单号被排除为空串
pub fn sample_rows() -> Vec<StockRow> {
    vec![
        StockRow::new("RM-123", PcdCell::Date(2023, 1, 20), 10.0, 4.0),
        StockRow::new("RM-123", PcdCell::Date(2023, 1, 15), 5.0, 3.0),
        StockRow::new("456", PcdCell::Date(2023, 2, 1), 2.0, 9.0).item("B02", "Bolt"),
        StockRow::new("CL-77", PcdCell::Text("not a date"), 3.0, 0.0),
    ]
}
