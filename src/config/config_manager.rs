// ==========================================
// 交接班设备点检系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// 规则: 配置缺失或取值非法时回退缺省值并告警，不阻断使用
// ==========================================

use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::settings::{
    ReportSettings, ShiftBoundaries, DEFAULT_ARCHIVE_LIMIT, DEFAULT_DATE_FORMAT, MAX_ARCHIVE_LIMIT,
    MAX_SHIFT_HOUR,
};
use crate::db::{configure_sqlite_connection, ensure_schema, open_sqlite_connection};
use crate::domain::template::EquipmentTemplate;
use crate::domain::types::Team;
use crate::i18n;
use crate::repository::error::{RepositoryError, RepositoryResult};

/// 全局作用域
const GLOBAL_SCOPE: &str = "global";

// ==========================================
// 配置键
// ==========================================
pub mod config_keys {
    pub const ARCHIVE_LIMIT: &str = "archive_limit";
    pub const DEFAULT_TEAM: &str = "default_team";
    pub const MORNING_START_HOUR: &str = "morning_start_hour";
    pub const AFTERNOON_START_HOUR: &str = "afternoon_start_hour";
    pub const NIGHT_START_HOUR: &str = "night_start_hour";
    pub const DATE_FORMAT: &str = "date_format";
    pub const EXPORT_LOCALE: &str = "export_locale";
    pub const EQUIPMENT_TEMPLATE: &str = "equipment_template";

    /// 所有已知配置键
    pub const ALL: [&str; 8] = [
        ARCHIVE_LIMIT,
        DEFAULT_TEAM,
        MORNING_START_HOUR,
        AFTERNOON_START_HOUR,
        NIGHT_START_HOUR,
        DATE_FORMAT,
        EXPORT_LOCALE,
        EQUIPMENT_TEMPLATE,
    ];
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：会对传入连接再次应用统一 PRAGMA 与建表（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            configure_sqlite_connection(&guard)?;
            ensure_schema(&guard)?;
        }

        Ok(Self { conn })
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    pub fn get_config_value(&self, key: &str) -> RepositoryResult<Option<String>> {
        let conn = self.get_conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = ?1 AND key = ?2",
                params![GLOBAL_SCOPE, key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// 写入配置值（UPSERT）
    pub fn set_config_value(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value, updated_at) VALUES (?1, ?2, ?3, datetime('now'))
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?3, updated_at = datetime('now')",
            params![GLOBAL_SCOPE, key, value],
        )?;
        tracing::info!("配置已更新: {}={}", key, value);
        Ok(())
    }

    /// 删除配置值（恢复缺省）
    pub fn reset_config_value(&self, key: &str) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let rows = conn.execute(
            "DELETE FROM config_kv WHERE scope_id = ?1 AND key = ?2",
            params![GLOBAL_SCOPE, key],
        )?;
        Ok(rows > 0)
    }

    /// 列出 global scope 下全部配置（按键排序）
    pub fn list_configs(&self) -> RepositoryResult<Vec<(String, String)>> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = ?1 ORDER BY key")?;
        let rows = stmt.query_map(params![GLOBAL_SCOPE], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut configs = Vec::new();
        for row in rows {
            configs.push(row?);
        }
        Ok(configs)
    }

    // ===== 归档 =====

    /// 归档保留份数（缺省 20，必须 >= 1）
    pub fn get_archive_limit(&self) -> RepositoryResult<usize> {
        let raw = match self.get_config_value(config_keys::ARCHIVE_LIMIT)? {
            Some(v) => v,
            None => return Ok(DEFAULT_ARCHIVE_LIMIT),
        };

        match raw.trim().parse::<usize>() {
            Ok(limit) if (1..=MAX_ARCHIVE_LIMIT).contains(&limit) => Ok(limit),
            _ => {
                tracing::warn!("archive_limit 配置非法({})，使用缺省值 {}", raw, DEFAULT_ARCHIVE_LIMIT);
                Ok(DEFAULT_ARCHIVE_LIMIT)
            }
        }
    }

    // ===== 报告缺省值 =====

    pub fn get_default_team(&self) -> RepositoryResult<Team> {
        let raw = match self.get_config_value(config_keys::DEFAULT_TEAM)? {
            Some(v) => v,
            None => return Ok(Team::C),
        };

        Ok(raw.parse::<Team>().unwrap_or_else(|e| {
            tracing::warn!("default_team 配置非法: {}，使用缺省值 C", e);
            Team::C
        }))
    }

    /// 班次起始小时；任一值非法或顺序不成立时整体回退缺省
    pub fn get_shift_boundaries(&self) -> RepositoryResult<ShiftBoundaries> {
        let defaults = ShiftBoundaries::default();

        let morning = self.get_hour(config_keys::MORNING_START_HOUR, defaults.morning_start)?;
        let afternoon = self.get_hour(config_keys::AFTERNOON_START_HOUR, defaults.afternoon_start)?;
        let night = self.get_hour(config_keys::NIGHT_START_HOUR, defaults.night_start)?;

        let boundaries = ShiftBoundaries {
            morning_start: morning,
            afternoon_start: afternoon,
            night_start: night,
        };

        if boundaries.is_valid() {
            Ok(boundaries)
        } else {
            tracing::warn!("班次起始小时配置不成立: {:?}，使用缺省值", boundaries);
            Ok(defaults)
        }
    }

    fn get_hour(&self, key: &str, default: u32) -> RepositoryResult<u32> {
        let raw = match self.get_config_value(key)? {
            Some(v) => v,
            None => return Ok(default),
        };
        match raw.trim().parse::<u32>() {
            Ok(h) if h <= MAX_SHIFT_HOUR => Ok(h),
            _ => {
                tracing::warn!("{} 配置非法({})，使用缺省值 {}", key, raw, default);
                Ok(default)
            }
        }
    }

    pub fn get_date_format(&self) -> RepositoryResult<String> {
        Ok(self
            .get_config_value(config_keys::DATE_FORMAT)?
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_string()))
    }

    /// 导出语言；不受支持的语言回退缺省语言
    pub fn get_export_locale(&self) -> RepositoryResult<String> {
        let raw = match self.get_config_value(config_keys::EXPORT_LOCALE)? {
            Some(v) => v,
            None => return Ok(i18n::DEFAULT_LOCALE.to_string()),
        };

        match i18n::normalize_locale(&raw) {
            Some(locale) => Ok(locale.to_string()),
            None => {
                tracing::warn!("export_locale 不受支持({})，使用缺省语言", raw);
                Ok(i18n::DEFAULT_LOCALE.to_string())
            }
        }
    }

    // ===== 设备模板 =====

    /// 设备点检模板；未配置或配置非法时使用内置模板
    pub fn get_equipment_template(&self) -> RepositoryResult<EquipmentTemplate> {
        let raw = match self.get_config_value(config_keys::EQUIPMENT_TEMPLATE)? {
            Some(v) => v,
            None => return Ok(EquipmentTemplate::default()),
        };

        match EquipmentTemplate::from_json(&raw) {
            Ok(template) => Ok(template),
            Err(e) => {
                tracing::warn!("equipment_template 配置非法，使用内置模板: {}", e);
                Ok(EquipmentTemplate::default())
            }
        }
    }

    /// 一次性读取全部报告参数
    pub fn load_settings(&self) -> RepositoryResult<ReportSettings> {
        Ok(ReportSettings {
            archive_limit: self.get_archive_limit()?,
            default_team: self.get_default_team()?,
            shift_boundaries: self.get_shift_boundaries()?,
            date_format: self.get_date_format()?,
            export_locale: self.get_export_locale()?,
        })
    }
}
