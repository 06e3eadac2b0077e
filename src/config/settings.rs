// ==========================================
// 交接班设备点检系统 - 运行参数
// ==========================================
// 由 ConfigManager 从 config_kv 读取，缺省值见 Default
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::types::{Shift, Team};

/// 归档保留份数缺省值
pub const DEFAULT_ARCHIVE_LIMIT: usize = 20;

/// 归档保留份数上限（持久化数组最多 20 份）
pub const MAX_ARCHIVE_LIMIT: usize = 20;

/// 班次起始小时的最大取值（0-23）
pub const MAX_SHIFT_HOUR: u32 = 23;

/// 报告日期缺省格式
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

// ==========================================
// ShiftBoundaries - 班次起始小时
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftBoundaries {
    pub morning_start: u32,
    pub afternoon_start: u32,
    pub night_start: u32,
}

impl Default for ShiftBoundaries {
    fn default() -> Self {
        Self {
            morning_start: 6,
            afternoon_start: 14,
            night_start: 22,
        }
    }
}

impl ShiftBoundaries {
    /// 校验: morning < afternoon < night <= 23
    pub fn is_valid(&self) -> bool {
        self.morning_start < self.afternoon_start
            && self.afternoon_start < self.night_start
            && self.night_start <= MAX_SHIFT_HOUR
    }

    /// 按本地小时判定班次；夜班跨零点
    pub fn shift_at(&self, hour: u32) -> Shift {
        if hour >= self.morning_start && hour < self.afternoon_start {
            Shift::Morning
        } else if hour >= self.afternoon_start && hour < self.night_start {
            Shift::Afternoon
        } else {
            Shift::Night
        }
    }
}

// ==========================================
// ReportSettings - 报告创建与归档参数
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSettings {
    pub archive_limit: usize,
    pub default_team: Team,
    pub shift_boundaries: ShiftBoundaries,
    pub date_format: String,
    pub export_locale: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            archive_limit: DEFAULT_ARCHIVE_LIMIT,
            default_team: Team::C,
            shift_boundaries: ShiftBoundaries::default(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            export_locale: crate::i18n::DEFAULT_LOCALE.to_string(),
        }
    }
}
