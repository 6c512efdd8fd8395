// ==========================================
// 采购订单库存差异报表 - 库存记录领域模型
// ==========================================
// 职责: 原始表格 → 强类型记录 → 清洗后记录 → 差异记录
// 生命周期: 每次请求内创建，响应后丢弃
// ==========================================

use crate::domain::types::{CellValue, PcdDate};
use std::collections::HashMap;

// ==========================================
// 输入列名
// ==========================================
pub mod columns {
    pub const PO_NO: &str = "PO_NO";
    pub const ITEM_CODE: &str = "Item Code";
    pub const ITEM_NAME: &str = "Item Name";
    pub const MAT_COLOR_CODE: &str = "MAT_Color_Code";
    pub const PCD_DATE: &str = "PCD Date";
    pub const BAL_TO_ISSUE: &str = "BAL_TO_ISSUE";
    pub const TOTAL_CURRENT_STOCK: &str = "Total Current Stock";

    /// 上传文件必须包含的列
    pub const REQUIRED: [&str; 7] = [
        PO_NO,
        ITEM_CODE,
        ITEM_NAME,
        MAT_COLOR_CODE,
        PCD_DATE,
        BAL_TO_ISSUE,
        TOTAL_CURRENT_STOCK,
    ];
}

// ==========================================
// RawSheet - 解析后的原始表格
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct RawSheet {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawSheet {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// 原始行（列名 → 单元格）
#[derive(Debug, Clone, Default)]
pub struct RawRow {
    pub row_number: usize, // 数据行号（从 1 开始，不含表头）
    pub cells: HashMap<String, CellValue>,
}

impl RawRow {
    pub fn get(&self, column: &str) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        self.cells.get(column).unwrap_or(&EMPTY)
    }
}

// ==========================================
// InventoryRecord - 强类型输入记录
// ==========================================
// 入口边界已完成列存在性与数值类型校验
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryRecord {
    pub row_number: usize,
    pub po_no: Option<String>,     // 采购订单号（可能为逗号分隔的带前缀子单号）
    pub item_code: String,         // 物料编码
    pub item_name: String,         // 物料名称
    pub mat_color_code: String,    // 物料颜色编码
    pub pcd_date: CellValue,       // PCD 日期（原始值，清洗阶段解析）
    pub bal_to_issue: f64,         // 待发数量
    pub total_current_stock: f64,  // 当前总库存
}

// ==========================================
// CleanedRecord - 清洗后记录
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedRecord {
    pub row_number: usize,
    pub po_no: String,
    pub item_code: String,
    pub item_name: String,
    pub mat_color_code: String,
    pub pcd_date: PcdDate,
    pub bal_to_issue: f64,
    pub total_current_stock: f64,
}

impl CleanedRecord {
    /// 差异 = 当前总库存 - 待发数量
    pub fn variance(&self) -> f64 {
        self.total_current_stock - self.bal_to_issue
    }
}

// ==========================================
// VarianceRecord - 差异记录
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct VarianceRecord<'a> {
    pub record: &'a CleanedRecord,
    pub variance: f64,
}

impl<'a> From<&'a CleanedRecord> for VarianceRecord<'a> {
    fn from(record: &'a CleanedRecord) -> Self {
        Self {
            record,
            variance: record.variance(),
        }
    }
}

impl VarianceRecord<'_> {
    /// 仅严格负差异参与汇总
    pub fn is_shortfall(&self) -> bool {
        self.variance < 0.0
    }
}
