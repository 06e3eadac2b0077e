// ==========================================
// 交接班设备点检系统 - 配置层
// ==========================================
// 职责: 系统配置管理,支持覆写与缺省回退
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod settings;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager};
pub use settings::{
    ReportSettings, ShiftBoundaries, DEFAULT_ARCHIVE_LIMIT, DEFAULT_DATE_FORMAT, MAX_ARCHIVE_LIMIT,
    MAX_SHIFT_HOUR,
};
