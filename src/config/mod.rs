// ==========================================
// 采购订单库存差异报表 - 配置层
// ==========================================
// 职责: 服务与报表配置管理
// 存储: 环境变量 / .env（PO_VARIANCE_ 前缀）
// ==========================================

pub mod config_manager;
pub mod report_config_trait;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigError, ConfigManager, ConfigResult};
pub use report_config_trait::ReportConfigReader;
