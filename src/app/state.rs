// ==========================================
// 交接班设备点检系统 - 应用状态
// ==========================================
// 职责: 启动时装配共享连接、配置、仓储与 API 实例
// ==========================================

use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::api::{ApiError, ApiResult, ConfigApi, ReportStore};
use crate::config::config_manager::ConfigManager;
use crate::db::open_sqlite_connection;
use crate::repository::kv_store::{KeyValueStore, SqliteKvStore};
use crate::repository::report_archive_repo::ReportArchiveRepository;

/// 数据库路径环境变量
pub const DB_PATH_ENV: &str = "SHIFT_HANDOVER_DB_PATH";

/// 应用状态
///
/// 包含报告存储与配置 API；同一 SQLite 连接在各仓储间共享
pub struct AppState {
    /// 报告存储（当前报告 + 归档）
    pub report_store: ReportStore,

    /// 配置管理API
    pub config_api: Arc<ConfigApi>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 说明
    /// 1. 打开数据库（建表幂等）
    /// 2. 读取配置与设备模板
    /// 3. 打开报告存储（恢复归档与草稿）
    pub fn new(db_path: String) -> ApiResult<Self> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let conn = open_sqlite_connection(&db_path)
            .map_err(|e| ApiError::DatabaseConnectionError(format!("无法打开数据库: {}", e)))?;
        Self::from_connection(Arc::new(Mutex::new(conn)))
    }

    /// 从已有连接装配（测试可传入内存库）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> ApiResult<Self> {
        // ==========================================
        // 配置层
        // ==========================================
        let config_manager = Arc::new(ConfigManager::from_connection(conn.clone())?);
        let settings = config_manager.load_settings()?;
        let template = config_manager.get_equipment_template()?;
        let config_api = Arc::new(ConfigApi::new(config_manager));

        // ==========================================
        // 仓储层
        // ==========================================
        let kv: Arc<dyn KeyValueStore> = Arc::new(SqliteKvStore::new(conn));
        let archive_repo = Arc::new(ReportArchiveRepository::new(kv));

        // ==========================================
        // API层
        // ==========================================
        let report_store = ReportStore::open(archive_repo, template, settings)?;

        tracing::info!("AppState初始化成功");

        Ok(Self {
            report_store,
            config_api,
        })
    }
}

// ==========================================
// 辅助函数
// ==========================================

/// 获取默认数据库路径
///
/// # 返回
/// - 环境变量 SHIFT_HANDOVER_DB_PATH（非空时）
/// - 用户数据目录/shift-handover/shift_handover.db
/// - 无用户数据目录时: ./shift_handover.db
pub fn get_default_db_path() -> String {
    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./shift_handover.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("shift-handover");
        match std::fs::create_dir_all(&dir) {
            Ok(()) => path = dir.join("shift_handover.db"),
            Err(e) => tracing::warn!("无法创建数据目录 {}: {}，使用当前目录", dir.display(), e),
        }
    }

    path.to_string_lossy().to_string()
}
