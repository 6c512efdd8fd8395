// ==========================================
// 采购订单库存差异报表 - 配置读取 Trait
// ==========================================
// 职责: 定义服务与报表所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::config::config_manager::ConfigResult;
use std::net::SocketAddr;
use std::path::PathBuf;

// ==========================================
// ReportConfigReader Trait
// ==========================================
// 实现者: ConfigManager（从环境变量 / .env 读取）
pub trait ReportConfigReader: Send + Sync {
    // ===== 服务配置 =====

    /// 获取 HTTP 监听地址
    ///
    /// # 默认值
    /// - 127.0.0.1:5000
    fn get_bind_addr(&self) -> ConfigResult<SocketAddr>;

    /// 获取上传临时文件目录
    ///
    /// # 默认值
    /// - <系统缓存目录>/po-variance-report/uploads，取不到时使用系统临时目录
    ///
    /// # 说明
    /// - 每个请求在该目录下创建独立随机命名的临时文件，请求结束即删除
    fn get_upload_dir(&self) -> ConfigResult<PathBuf>;

    /// 获取请求体大小上限（字节）
    ///
    /// # 默认值
    /// - 26214400 (25 MiB)
    fn get_max_upload_bytes(&self) -> ConfigResult<usize>;

    // ===== 报表配置 =====

    /// 获取采购订单号排除前缀
    ///
    /// # 默认值
    /// - "CL-"
    fn get_exclusion_prefix(&self) -> ConfigResult<String>;

    /// 获取导出文件名
    ///
    /// # 默认值
    /// - "processed_output.xlsx"
    fn get_export_filename(&self) -> ConfigResult<String>;
}
