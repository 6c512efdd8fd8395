// ==========================================
// 采购订单库存差异报表 - 应用层
// ==========================================
// 职责: HTTP 集成，连接客户端与报表API
// ==========================================

pub mod routes;
pub mod state;
pub mod upload;

// 重导出
pub use routes::{router, UPLOAD_FIELD};
pub use state::AppState;
