// ==========================================
// 交接班设备点检系统 - API层
// ==========================================
// 职责: 面向操作员界面（命令行）的业务接口
// ==========================================

pub mod config_api;
pub mod error;
pub mod report_store;

pub use config_api::{ConfigApi, ConfigItem};
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use report_store::ReportStore;
