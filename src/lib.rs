// ==========================================
// 交接班设备点检系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite + 命令行
// 系统定位: 交接班设备点检记录（操作员填写、归档、导出）
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 业务规则
pub mod engine;

// 导出层 - 文本/CSV
pub mod exporter;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - 命令行集成
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{EquipmentStatus, Shift, Team};

// 领域实体
pub use domain::{Equipment, EquipmentGroup, EquipmentTemplate, Report, ReportError};

// 引擎
pub use engine::{
    create_report, format_report_to_text, save_report, update_equipment, ReportAction,
    ReportArchive, ReportFormatter, StatusSummary,
};

// API
pub use api::{ApiError, ConfigApi, ReportStore};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "交接班设备点检系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
