// ==========================================
// 交接班设备点检系统 - 领域模型层
// ==========================================
// 职责: 定义报告实体、固定枚举、设备模板与领域错误
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod error;
pub mod report;
pub mod template;
pub mod types;

// 重导出核心类型
pub use error::{ReportError, ReportResult};
pub use report::{Equipment, EquipmentGroup, Report};
pub use template::EquipmentTemplate;
pub use types::{EquipmentStatus, Shift, Team};
