// ==========================================
// 交接班设备点检系统 - 归档 CSV 导出
// ==========================================
// 每台设备一行；报告表头字段在每行重复，便于表格软件筛选
// ==========================================

use csv::WriterBuilder;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::domain::report::Report;
use crate::exporter::error::{ExportError, ExportResult};

pub const CSV_HEADER: [&str; 12] = [
    "report_id",
    "date",
    "shift",
    "team",
    "operator",
    "created_at",
    "group",
    "equipment_id",
    "tag",
    "status",
    "comment",
    "observations",
];

/// 写入 CSV，返回数据行数（不含表头）
pub fn write_archive_csv<W: Write>(reports: &[Report], writer: W) -> ExportResult<usize> {
    let mut wtr = WriterBuilder::new().from_writer(writer);
    wtr.write_record(CSV_HEADER)?;

    let mut rows = 0;
    for report in reports {
        let created_at = report.created_at.to_rfc3339();
        for (group, item) in report.equipment() {
            wtr.write_record([
                report.id.as_str(),
                report.date.as_str(),
                report.shift.as_str(),
                report.team.as_str(),
                report.operator.trim(),
                created_at.as_str(),
                group.name.as_str(),
                item.id.as_str(),
                item.tag.as_str(),
                item.status.as_str(),
                item.comment.trim(),
                report.observations.trim(),
            ])?;
            rows += 1;
        }
    }

    wtr.flush()
        .map_err(|e| ExportError::CsvWriteError(e.to_string()))?;
    Ok(rows)
}

/// 导出归档到 CSV 文件
pub fn export_archive_csv(path: &Path, reports: &[Report]) -> ExportResult<usize> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ExportError::FileWriteError {
            path: parent.display().to_string(),
            message: e.to_string(),
        })?;
    }

    let file = File::create(path).map_err(|e| ExportError::FileWriteError {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let rows = write_archive_csv(reports, file)?;
    tracing::info!("归档 CSV 已导出: path={}, rows={}", path.display(), rows);
    Ok(rows)
}
