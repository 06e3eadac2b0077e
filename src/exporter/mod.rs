// ==========================================
// 交接班设备点检系统 - 导出层
// ==========================================
// 职责: 报告文本落盘、归档 CSV 导出
// ==========================================

pub mod csv_exporter;
pub mod error;
pub mod text_exporter;

pub use csv_exporter::{export_archive_csv, write_archive_csv, CSV_HEADER};
pub use error::{ExportError, ExportResult};
pub use text_exporter::export_text;
