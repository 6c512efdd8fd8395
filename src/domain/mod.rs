// ==========================================
// 采购订单库存差异报表 - 领域模型层
// ==========================================
// 职责: 定义记录、单元格、日期与报表类型
// 红线: 不含文件读写逻辑,不含 HTTP 逻辑
// ==========================================

pub mod inventory;
pub mod report;
pub mod types;

// 重导出核心类型
pub use inventory::{columns, CleanedRecord, InventoryRecord, RawRow, RawSheet, VarianceRecord};
pub use report::{AggregationSummary, VarianceReport, VarianceReportRow};
pub use types::{CellValue, PcdDate, PCD_DATE_DISPLAY_FORMAT};
