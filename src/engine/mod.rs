// ==========================================
// 交接班设备点检系统 - 引擎层
// ==========================================
// 职责: 报告创建、编辑命令、归档规则、汇总与文本导出
// 红线: 纯计算，不做 I/O
// ==========================================

pub mod archive;
pub mod factory;
pub mod formatter;
pub mod reducer;
pub mod summary;

pub use archive::{save_report, ReportArchive};
pub use factory::create_report;
pub use formatter::{format_report_to_text, ReportFormatter};
pub use reducer::{apply, update_equipment, ReportAction};
pub use summary::StatusSummary;
