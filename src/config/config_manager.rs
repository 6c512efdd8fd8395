// ==========================================
// 采购订单库存差异报表 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、快照
// 来源: 进程环境变量（启动时先加载 .env，已存在的环境变量优先）
// ==========================================

use crate::config::report_config_trait::ReportConfigReader;
use crate::importer::po_normalizer::{is_category_prefix, DEFAULT_EXCLUSION_PREFIX};
use serde_json::json;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

// ==========================================
// 配置键
// ==========================================
pub mod config_keys {
    /// 环境变量统一前缀
    pub const PREFIX: &str = "PO_VARIANCE_";

    pub const BIND_ADDR: &str = "PO_VARIANCE_BIND_ADDR";
    pub const UPLOAD_DIR: &str = "PO_VARIANCE_UPLOAD_DIR";
    pub const MAX_UPLOAD_BYTES: &str = "PO_VARIANCE_MAX_UPLOAD_BYTES";
    pub const EXCLUSION_PREFIX: &str = "PO_VARIANCE_EXCLUSION_PREFIX";
    pub const EXPORT_FILENAME: &str = "PO_VARIANCE_EXPORT_FILENAME";
}

// ==========================================
// 默认值
// ==========================================
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;
pub const DEFAULT_EXPORT_FILENAME: &str = "processed_output.xlsx";

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },

    #[error("配置快照序列化失败: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    values: HashMap<String, String>,
}

impl ConfigManager {
    /// 从进程环境加载（含 .env）
    pub fn from_env() -> Self {
        // .env 不存在时忽略
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "已加载 .env");
        }

        Self::from_pairs(
            std::env::vars().filter(|(key, _)| key.starts_with(config_keys::PREFIX)),
        )
    }

    /// 从键值对创建（测试与嵌入场景）
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// 读取配置值（空白视为未配置）
    fn get_config_value(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// 读取配置值，带默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> String {
        self.get_config_value(key)
            .unwrap_or_else(|| default.to_string())
    }

    /// 获取生效配置的快照（JSON格式）
    ///
    /// # 用途
    /// - 启动日志中记录实际生效的配置
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        let snapshot = json!({
            "bind_addr": self.get_bind_addr()?.to_string(),
            "upload_dir": self.get_upload_dir()?.display().to_string(),
            "max_upload_bytes": self.get_max_upload_bytes()?,
            "exclusion_prefix": self.get_exclusion_prefix()?,
            "export_filename": self.get_export_filename()?,
        });
        Ok(serde_json::to_string(&snapshot)?)
    }
}

fn invalid_value(key: &str, value: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        message: message.into(),
    }
}

/// 默认上传目录
fn default_upload_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("po-variance-report")
        .join("uploads")
}

// ==========================================
// ReportConfigReader Trait 实现
// ==========================================
impl ReportConfigReader for ConfigManager {
    fn get_bind_addr(&self) -> ConfigResult<SocketAddr> {
        let value = self.get_config_or_default(config_keys::BIND_ADDR, DEFAULT_BIND_ADDR);
        value
            .parse::<SocketAddr>()
            .map_err(|e| invalid_value(config_keys::BIND_ADDR, &value, e.to_string()))
    }

    fn get_upload_dir(&self) -> ConfigResult<PathBuf> {
        Ok(self
            .get_config_value(config_keys::UPLOAD_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(default_upload_dir))
    }

    fn get_max_upload_bytes(&self) -> ConfigResult<usize> {
        let Some(value) = self.get_config_value(config_keys::MAX_UPLOAD_BYTES) else {
            return Ok(DEFAULT_MAX_UPLOAD_BYTES);
        };
        match value.parse::<usize>() {
            Ok(0) => Err(invalid_value(
                config_keys::MAX_UPLOAD_BYTES,
                &value,
                "必须大于 0",
            )),
            Ok(bytes) => Ok(bytes),
            Err(e) => Err(invalid_value(
                config_keys::MAX_UPLOAD_BYTES,
                &value,
                e.to_string(),
            )),
        }
    }

    fn get_exclusion_prefix(&self) -> ConfigResult<String> {
        // 未配置或配置为空白均取默认
        let value = self.get_config_or_default(config_keys::EXCLUSION_PREFIX, DEFAULT_EXCLUSION_PREFIX);
        if !is_category_prefix(&value) {
            return Err(invalid_value(
                config_keys::EXCLUSION_PREFIX,
                &value,
                "必须为大写字母加短横线，如 CL-",
            ));
        }
        Ok(value)
    }

    fn get_export_filename(&self) -> ConfigResult<String> {
        let value = self.get_config_or_default(config_keys::EXPORT_FILENAME, DEFAULT_EXPORT_FILENAME);
        if value.contains(['/', '\\', '"']) {
            return Err(invalid_value(
                config_keys::EXPORT_FILENAME,
                &value,
                "文件名不能包含路径分隔符或引号",
            ));
        }
        Ok(value)
    }
}
