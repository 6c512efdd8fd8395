// ==========================================
// 采购订单库存差异报表 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// 共享方式: Arc 只读共享，请求之间无可变状态
// ==========================================

use std::path::PathBuf;
use std::sync::Arc;

use crate::api::ReportApi;
use crate::config::{ConfigResult, ReportConfigReader};
use crate::importer::PoNormalizer;

/// 应用状态
///
/// 由路由层以 axum State 形式持有
#[derive(Clone)]
pub struct AppState {
    /// 报表API
    pub report_api: Arc<ReportApi>,

    /// 上传临时文件目录
    pub upload_dir: PathBuf,

    /// 导出下载文件名
    pub export_filename: String,

    /// 请求体大小上限（字节）
    pub max_upload_bytes: usize,
}

impl AppState {
    /// 从配置创建AppState
    ///
    /// # 返回
    /// - Ok(AppState): 应用状态实例
    /// - Err(ConfigError): 配置值非法
    pub fn from_config(config: &dyn ReportConfigReader) -> ConfigResult<Self> {
        let exclusion_prefix = config.get_exclusion_prefix()?;
        tracing::info!(exclusion_prefix = %exclusion_prefix, "初始化AppState");

        Ok(Self {
            report_api: Arc::new(ReportApi::new(PoNormalizer::new(exclusion_prefix))),
            upload_dir: config.get_upload_dir()?,
            export_filename: config.get_export_filename()?,
            max_upload_bytes: config.get_max_upload_bytes()?,
        })
    }
}
