// ==========================================
// 采购订单库存差异报表 - 上传临时文件
// ==========================================
// 每个请求独立的随机命名文件，保留客户端扩展名以便按格式解析
// 守卫析构时删除文件（成功、失败、panic 展开均覆盖）
// ==========================================

use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// 扩展名最大长度，超出视为无扩展名
const MAX_EXTENSION_LEN: usize = 8;

pub struct ScratchUpload {
    file: NamedTempFile,
}

impl ScratchUpload {
    /// 在 upload_dir 下写入上传内容
    ///
    /// # 参数
    /// - upload_dir: 目标目录（不存在时创建）
    /// - client_filename: 客户端文件名，只取其扩展名
    /// - bytes: 文件内容
    pub fn write(upload_dir: &Path, client_filename: &str, bytes: &[u8]) -> std::io::Result<Self> {
        std::fs::create_dir_all(upload_dir)?;

        let suffix = client_extension(client_filename)
            .map(|ext| format!(".{}", ext))
            .unwrap_or_default();

        let mut file = tempfile::Builder::new()
            .prefix("upload-")
            .suffix(&suffix)
            .tempfile_in(upload_dir)?;
        file.write_all(bytes)?;
        file.flush()?;

        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

/// 提取客户端文件名的扩展名（仅保留 ASCII 字母数字）
fn client_extension(filename: &str) -> Option<String> {
    // 只取最后一段，忽略客户端带来的目录部分
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let ext = Path::new(base).extension()?.to_str()?;
    if ext.is_empty()
        || ext.len() > MAX_EXTENSION_LEN
        || !ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
