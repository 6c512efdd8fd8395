// ==========================================
// 采购订单库存差异报表 - 核心库
// ==========================================
// 技术栈: axum + calamine/csv + rust_xlsxwriter
// 系统定位: 上传库存表 → 负差异汇总 → Excel 导出
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 记录与类型
pub mod domain;

// 导入层 - 文件解析与清洗
pub mod importer;

// 引擎层 - 差异汇总
pub mod engine;

// 导出层 - Excel 生成
pub mod exporter;

// 配置层 - 服务配置
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - HTTP 集成
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{CellValue, PcdDate};

// 领域实体
pub use domain::{AggregationSummary, CleanedRecord, InventoryRecord, VarianceReport, VarianceReportRow};

// 引擎 / 导入 / 导出
pub use engine::VarianceAggregator;
pub use exporter::XlsxExporter;
pub use importer::{PoNormalizer, ReportError, ReportImporter, ReportResult};

// API
pub use api::{ApiError, ReportApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "采购订单库存差异报表";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
