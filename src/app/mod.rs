// ==========================================
// 交接班设备点检系统 - 应用层
// ==========================================
// 职责: 命令行集成,装配应用状态并执行操作员命令
// ==========================================

pub mod cli;
pub mod state;

// 重导出
pub use cli::{execute, Cli, Command, OutputOptions};
pub use state::{get_default_db_path, AppState, DB_PATH_ENV};
