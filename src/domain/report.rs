// ==========================================
// 采购订单库存差异报表 - 报表领域模型
// ==========================================
// 职责: 汇总结果行 / 报表 / 汇总统计
// ==========================================

use crate::domain::types::PcdDate;
use serde::Serialize;

// ==========================================
// VarianceReportRow - 汇总结果行
// ==========================================
// 每个 (PO_NO, Item Code, Item Name, MAT_Color_Code) 唯一一行
// 字段顺序即 JSON 键顺序，也是导出列顺序
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarianceReportRow {
    #[serde(rename = "PO_NO")]
    pub po_no: String,
    #[serde(rename = "Item Code")]
    pub item_code: String,
    #[serde(rename = "Item Name")]
    pub item_name: String,
    #[serde(rename = "MAT_Color_Code")]
    pub mat_color_code: String,
    #[serde(rename = "Variance")]
    pub variance: f64, // 组内负差异之和
    #[serde(rename = "PCD Date")]
    pub pcd_date: PcdDate, // 组内最早 PCD 日期
}

/// 汇总统计（用于日志与 CLI 输出）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AggregationSummary {
    pub records_in: usize,
    pub shortfall_records: usize,
    pub groups_out: usize,
    pub null_dates: usize,
}

/// 差异报表
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VarianceReport {
    pub rows: Vec<VarianceReportRow>,
    pub summary: AggregationSummary,
}
