// ==========================================
// 交接班设备点检系统 - 配置管理 API
// ==========================================
// 职责: 配置查询、更新、恢复缺省
// 规则: 写入前校验；只接受已知配置键
// ==========================================

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::config::config_manager::{config_keys, ConfigManager};
use crate::config::settings::{
    ShiftBoundaries, DEFAULT_ARCHIVE_LIMIT, DEFAULT_DATE_FORMAT, MAX_ARCHIVE_LIMIT, MAX_SHIFT_HOUR,
};
use crate::domain::template::EquipmentTemplate;
use crate::domain::types::Team;
use crate::i18n;

/// 配置项（生效值）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigItem {
    pub key: String,
    pub value: String,
    /// 是否为缺省值（未覆写）
    pub is_default: bool,
}

// ==========================================
// ConfigApi - 配置管理 API
// ==========================================
pub struct ConfigApi {
    config_manager: Arc<ConfigManager>,
}

impl ConfigApi {
    pub fn new(config_manager: Arc<ConfigManager>) -> Self {
        Self { config_manager }
    }

    /// 列出全部已知配置键及其当前取值（未覆写时显示缺省值）
    pub fn list_configs(&self) -> ApiResult<Vec<ConfigItem>> {
        let mut items = Vec::with_capacity(config_keys::ALL.len());
        for key in config_keys::ALL {
            items.push(self.get_config(key)?);
        }
        Ok(items)
    }

    /// 查询单个配置
    pub fn get_config(&self, key: &str) -> ApiResult<ConfigItem> {
        ensure_known_key(key)?;

        let item = match self.config_manager.get_config_value(key)? {
            Some(value) => ConfigItem {
                key: key.to_string(),
                value,
                is_default: false,
            },
            None => ConfigItem {
                key: key.to_string(),
                value: default_value(key),
                is_default: true,
            },
        };
        Ok(item)
    }

    /// 更新配置
    ///
    /// # 错误
    /// - InvalidInput: 未知键或取值非法
    pub fn update_config(&self, key: &str, value: &str) -> ApiResult<()> {
        ensure_known_key(key)?;
        validate_config_value(key, value).map_err(ApiError::InvalidInput)?;

        self.config_manager.set_config_value(key, value.trim())?;
        Ok(())
    }

    /// 恢复缺省值，返回此前是否存在覆写
    pub fn reset_config(&self, key: &str) -> ApiResult<bool> {
        ensure_known_key(key)?;
        Ok(self.config_manager.reset_config_value(key)?)
    }
}

fn ensure_known_key(key: &str) -> ApiResult<()> {
    if config_keys::ALL.contains(&key) {
        Ok(())
    } else {
        Err(ApiError::InvalidInput(format!(
            "未知配置键: {}（可用: {}）",
            key,
            config_keys::ALL.join(", ")
        )))
    }
}

fn default_value(key: &str) -> String {
    let boundaries = ShiftBoundaries::default();
    match key {
        config_keys::ARCHIVE_LIMIT => DEFAULT_ARCHIVE_LIMIT.to_string(),
        config_keys::DEFAULT_TEAM => Team::C.to_string(),
        config_keys::MORNING_START_HOUR => boundaries.morning_start.to_string(),
        config_keys::AFTERNOON_START_HOUR => boundaries.afternoon_start.to_string(),
        config_keys::NIGHT_START_HOUR => boundaries.night_start.to_string(),
        config_keys::DATE_FORMAT => DEFAULT_DATE_FORMAT.to_string(),
        config_keys::EXPORT_LOCALE => i18n::DEFAULT_LOCALE.to_string(),
        config_keys::EQUIPMENT_TEMPLATE => "(built-in)".to_string(),
        _ => String::new(),
    }
}

/// 校验配置取值
///
/// 班次小时之间的先后关系在读取时整体校验，这里只校验单值范围。
pub fn validate_config_value(key: &str, value: &str) -> Result<(), String> {
    let value = value.trim();
    match key {
        config_keys::ARCHIVE_LIMIT => match value.parse::<usize>() {
            Ok(limit) if (1..=MAX_ARCHIVE_LIMIT).contains(&limit) => Ok(()),
            _ => Err(format!(
                "archive_limit 必须是 1-{} 的整数: {}",
                MAX_ARCHIVE_LIMIT, value
            )),
        },
        config_keys::DEFAULT_TEAM => value.parse::<Team>().map(|_| ()),
        config_keys::MORNING_START_HOUR
        | config_keys::AFTERNOON_START_HOUR
        | config_keys::NIGHT_START_HOUR => match value.parse::<u32>() {
            Ok(h) if h <= MAX_SHIFT_HOUR => Ok(()),
            _ => Err(format!("{} 必须是 0-{} 的整数: {}", key, MAX_SHIFT_HOUR, value)),
        },
        config_keys::DATE_FORMAT => {
            if value.is_empty() {
                Err("date_format 不能为空".to_string())
            } else {
                Ok(())
            }
        }
        config_keys::EXPORT_LOCALE => i18n::normalize_locale(value)
            .map(|_| ())
            .ok_or_else(|| {
                format!(
                    "不支持的语言: {}（可用: {}）",
                    value,
                    i18n::SUPPORTED_LOCALES.join(", ")
                )
            }),
        config_keys::EQUIPMENT_TEMPLATE => EquipmentTemplate::from_json(value)
            .map(|_| ())
            .map_err(|e| e.to_string()),
        _ => Err(format!("未知配置键: {}", key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;
    use std::sync::Mutex;

    fn setup_api() -> ConfigApi {
        let conn = Connection::open_in_memory().unwrap();
        let manager = ConfigManager::from_connection(Arc::new(Mutex::new(conn))).unwrap();
        ConfigApi::new(Arc::new(manager))
    }

    #[test]
    fn test_list_shows_defaults() {
        let api = setup_api();
        let items = api.list_configs().unwrap();
        assert_eq!(items.len(), config_keys::ALL.len());
        assert!(items.iter().all(|i| i.is_default));

        let limit = items.iter().find(|i| i.key == "archive_limit").unwrap();
        assert_eq!(limit.value, "20");
    }

    #[test]
    fn test_update_and_reset() {
        let api = setup_api();
        api.update_config("default_team", " b ").unwrap();

        let item = api.get_config("default_team").unwrap();
        assert_eq!(item.value, "b");
        assert!(!item.is_default);

        assert!(api.reset_config("default_team").unwrap());
        assert!(api.get_config("default_team").unwrap().is_default);
        assert!(!api.reset_config("default_team").unwrap());
    }

    #[test]
    fn test_rejects_unknown_key_and_bad_values() {
        let api = setup_api();
        assert_eq!(api.update_config("colour", "red").unwrap_err().code(), "INVALID_INPUT");
        assert!(api.update_config("archive_limit", "0").is_err());
        assert!(api.update_config("night_start_hour", "24").is_err());
        assert!(api.update_config("export_locale", "fr").is_err());
        assert!(api.update_config("equipment_template", "[]").is_err());
        assert!(api.get_config("archive_limit").unwrap().is_default);
    }

    #[test]
    fn test_archive_limit_capped_at_twenty() {
        let api = setup_api();
        let err = api.update_config("archive_limit", "21").unwrap_err();
        assert_eq!(err.code(), "INVALID_INPUT");
        assert!(api.get_config("archive_limit").unwrap().is_default);

        api.update_config("archive_limit", "20").unwrap();
        assert_eq!(api.get_config("archive_limit").unwrap().value, "20");
        api.update_config("morning_start_hour", "0").unwrap();
        assert!(api.update_config("morning_start_hour", "24").is_err());
    }

    #[test]
    fn test_accepts_template_json() {
        let api = setup_api();
        let json = r#"{"groups":[{"name":"Pumps","items":[{"id":"p1","tag":"P-1","status":"RUNNING"}]}]}"#;
        api.update_config("equipment_template", json).unwrap();
        assert!(!api.get_config("equipment_template").unwrap().is_default);
    }
}
