use std::fs;
use std::path::Path;

use crate::exporter::error::{ExportError, ExportResult};

/// 将导出文本原样写入文件（覆盖）
pub fn export_text(path: &Path, text: &str) -> ExportResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ExportError::FileWriteError {
            path: parent.display().to_string(),
            message: e.to_string(),
        })?;
    }

    fs::write(path, text).map_err(|e| ExportError::FileWriteError {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    tracing::info!("报告文本已写入: {}", path.display());
    Ok(())
}
