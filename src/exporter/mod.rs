// ==========================================
// 采购订单库存差异报表 - 导出层
// ==========================================
// 职责: 行数据 → 可下载的表格文件
// ==========================================

pub mod xlsx_exporter;

pub use xlsx_exporter::{XlsxExporter, DEFAULT_SHEET_NAME, XLSX_CONTENT_TYPE};
