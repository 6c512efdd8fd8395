// ==========================================
// 采购订单库存差异报表 - 引擎层
// ==========================================
// 职责: 实现业务规则引擎（纯计算，不做文件读写）
// ==========================================

pub mod variance_aggregator;

// 重导出核心引擎
pub use variance_aggregator::VarianceAggregator;
