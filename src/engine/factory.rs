// ==========================================
// 交接班设备点检系统 - 报告创建
// ==========================================
// 新报告 = 新 UUID + 按当前时刻推导的日期/班次 + 缺省班组 + 模板深拷贝
// ==========================================

use chrono::{DateTime, TimeZone, Timelike, Utc};
use std::fmt::{self, Write};
use uuid::Uuid;

use crate::config::settings::{ReportSettings, DEFAULT_DATE_FORMAT};
use crate::domain::report::Report;
use crate::domain::template::EquipmentTemplate;

/// 从模板创建新报告
///
/// # 参数
/// - template: 设备点检模板（只读）
/// - settings: 缺省班组、班次起始小时、日期格式
/// - now: 当前本地时刻（决定日期与缺省班次）
///
/// # 说明
/// 报告中的设备组为模板的独立副本，之后对报告的任何修改都不会影响模板或其他报告。
pub fn create_report<Tz>(
    template: &EquipmentTemplate,
    settings: &ReportSettings,
    now: &DateTime<Tz>,
) -> Report
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let report = Report {
        id: Uuid::new_v4().to_string(),
        created_at: now.with_timezone(&Utc),
        date: format_date(now, &settings.date_format),
        shift: settings.shift_boundaries.shift_at(now.hour()),
        team: settings.default_team,
        operator: String::new(),
        groups: template.instantiate(),
        observations: String::new(),
    };

    tracing::debug!(
        "创建新报告: id={}, date={}, shift={}, team={}",
        report.id,
        report.date,
        report.shift,
        report.team
    );
    report
}

/// 按配置格式输出日期；格式串非法时回退缺省格式
fn format_date<Tz>(now: &DateTime<Tz>, date_format: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let mut out = String::new();
    if write!(out, "{}", now.format(date_format)).is_ok() {
        return out;
    }

    tracing::warn!("date_format 非法({})，使用缺省格式", date_format);
    now.format(DEFAULT_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{EquipmentStatus, Shift, Team};
    use chrono::FixedOffset;
    use std::collections::HashSet;

    fn at(hour: u32) -> DateTime<FixedOffset> {
        FixedOffset::west_opt(3 * 3600)
            .unwrap()
            .with_ymd_and_hms(2025, 6, 30, hour, 15, 0)
            .unwrap()
    }

    #[test]
    fn test_defaults_from_settings_and_clock() {
        let template = EquipmentTemplate::default();
        let settings = ReportSettings::default();

        let report = create_report(&template, &settings, &at(8));
        assert_eq!(report.date, "2025-06-30");
        assert_eq!(report.shift, Shift::Morning);
        assert_eq!(report.team, Team::C);
        assert!(report.operator.is_empty());
        assert!(report.observations.is_empty());
        assert_eq!(report.groups.as_slice(), template.groups());
        assert_eq!(report.created_at, at(8).with_timezone(&Utc));

        assert_eq!(create_report(&template, &settings, &at(15)).shift, Shift::Afternoon);
        assert_eq!(create_report(&template, &settings, &at(23)).shift, Shift::Night);
        assert_eq!(create_report(&template, &settings, &at(2)).shift, Shift::Night);
    }

    #[test]
    fn test_ids_are_unique() {
        let template = EquipmentTemplate::default();
        let settings = ReportSettings::default();

        let ids: HashSet<String> = (0..50)
            .map(|_| create_report(&template, &settings, &at(10)).id)
            .collect();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_mutating_report_never_touches_template_or_sibling() {
        let template = EquipmentTemplate::default();
        let settings = ReportSettings::default();

        let mut first = create_report(&template, &settings, &at(10));
        let second = create_report(&template, &settings, &at(10));

        first.groups[0].items[0].status = EquipmentStatus::Anomaly;
        first.groups[0].items[0].comment = "leak".to_string();

        assert_eq!(template.groups()[0].items[0].status, EquipmentStatus::Running);
        assert_eq!(second.groups[0].items[0].status, EquipmentStatus::Running);
        assert!(second.groups[0].items[0].comment.is_empty());
    }

    #[test]
    fn test_custom_and_invalid_date_format() {
        let template = EquipmentTemplate::default();
        let mut settings = ReportSettings::default();

        settings.date_format = "%d/%m/%Y".to_string();
        assert_eq!(create_report(&template, &settings, &at(9)).date, "30/06/2025");

        settings.date_format = "%Q".to_string();
        assert_eq!(create_report(&template, &settings, &at(9)).date, "2025-06-30");
    }
}
