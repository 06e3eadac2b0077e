// ==========================================
// 交接班设备点检系统 - 报告归档规则
// ==========================================
// 归档: 有界、有序（最新在前）、按 id 去重
// 保存: 交班人必填 -> 前插 -> 移除同 id 旧条目 -> 截断到上限
// ==========================================

use serde::Serialize;

use crate::config::settings::MAX_ARCHIVE_LIMIT;
use crate::domain::error::{ReportError, ReportResult};
use crate::domain::report::Report;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportArchive {
    entries: Vec<Report>,
    limit: usize,
}

impl ReportArchive {
    pub fn empty(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit: limit.clamp(1, MAX_ARCHIVE_LIMIT),
        }
    }

    /// 由持久化内容恢复归档
    ///
    /// 入参视为“最新在前”。重复 id 只保留最靠前的一份，超出上限的尾部丢弃。
    pub fn from_entries(entries: Vec<Report>, limit: usize) -> Self {
        let limit = limit.clamp(1, MAX_ARCHIVE_LIMIT);
        let mut kept: Vec<Report> = Vec::with_capacity(entries.len().min(limit));

        for report in entries {
            if kept.iter().any(|r| r.id == report.id) {
                tracing::warn!("归档中存在重复报告 id，已忽略较旧条目: {}", report.id);
                continue;
            }
            if kept.len() == limit {
                tracing::debug!("归档超出上限 {}，丢弃较旧条目", limit);
                break;
            }
            kept.push(report);
        }

        Self {
            entries: kept,
            limit,
        }
    }

    pub fn entries(&self) -> &[Report] {
        &self.entries
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, report_id: &str) -> Option<&Report> {
        self.entries.iter().find(|r| r.id == report_id)
    }

    /// 保存报告，返回新归档；原归档不变
    ///
    /// # 错误
    /// - MissingOperator: 交班人为空（含纯空白）
    pub fn save_report(&self, report: &Report) -> ReportResult<ReportArchive> {
        save_report(report, self)
    }
}

/// 保存报告到归档（纯函数）
pub fn save_report(report: &Report, archive: &ReportArchive) -> ReportResult<ReportArchive> {
    if !report.has_operator() {
        return Err(ReportError::MissingOperator);
    }

    let mut entries = Vec::with_capacity(archive.limit);
    entries.push(report.clone());
    entries.extend(
        archive
            .entries
            .iter()
            .filter(|r| r.id != report.id)
            .take(archive.limit - 1)
            .cloned(),
    );

    Ok(ReportArchive {
        entries,
        limit: archive.limit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::DEFAULT_ARCHIVE_LIMIT;
    use crate::domain::report::{Equipment, EquipmentGroup};
    use crate::domain::types::{Shift, Team};
    use chrono::Utc;

    fn make_report(id: &str, operator: &str) -> Report {
        Report {
            id: id.to_string(),
            created_at: Utc::now(),
            date: "2025-01-15".to_string(),
            shift: Shift::Afternoon,
            team: Team::D,
            operator: operator.to_string(),
            groups: vec![EquipmentGroup::new("Pumps", vec![Equipment::new("p1", "P-101")])],
            observations: String::new(),
        }
    }

    fn ids(archive: &ReportArchive) -> Vec<&str> {
        archive.entries().iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_missing_operator_leaves_archive_unchanged() {
        let archive = ReportArchive::empty(DEFAULT_ARCHIVE_LIMIT)
            .save_report(&make_report("r1", "Ana"))
            .unwrap();

        for operator in ["", "   "] {
            let result = archive.save_report(&make_report("r2", operator));
            assert_eq!(result, Err(ReportError::MissingOperator));
        }
        assert_eq!(ids(&archive), vec!["r1"]);
    }

    #[test]
    fn test_newest_first() {
        let mut archive = ReportArchive::empty(DEFAULT_ARCHIVE_LIMIT);
        for id in ["r1", "r2", "r3"] {
            archive = archive.save_report(&make_report(id, "Ana")).unwrap();
        }
        assert_eq!(ids(&archive), vec!["r3", "r2", "r1"]);
    }

    #[test]
    fn test_keeps_only_most_recent_limit() {
        let mut archive = ReportArchive::empty(DEFAULT_ARCHIVE_LIMIT);
        for n in 0..25 {
            archive = archive
                .save_report(&make_report(&format!("r{}", n), "Ana"))
                .unwrap();
        }

        assert_eq!(archive.len(), 20);
        let expected: Vec<String> = (5..25).rev().map(|n| format!("r{}", n)).collect();
        assert_eq!(ids(&archive), expected.iter().map(|s| s.as_str()).collect::<Vec<_>>());
    }

    #[test]
    fn test_resave_replaces_and_moves_to_front() {
        let mut archive = ReportArchive::empty(DEFAULT_ARCHIVE_LIMIT);
        for id in ["r1", "r2", "r3"] {
            archive = archive.save_report(&make_report(id, "Ana")).unwrap();
        }

        let mut edited = make_report("r1", "Bruno");
        edited.observations = "second pass".to_string();
        let archive = archive.save_report(&edited).unwrap();

        assert_eq!(ids(&archive), vec!["r1", "r3", "r2"]);
        assert_eq!(archive.find("r1").unwrap().operator, "Bruno");
        assert_eq!(archive.find("r1").unwrap().observations, "second pass");
    }

    #[test]
    fn test_resave_at_capacity_does_not_drop_extra_entry() {
        let mut archive = ReportArchive::empty(3);
        for id in ["r1", "r2", "r3"] {
            archive = archive.save_report(&make_report(id, "Ana")).unwrap();
        }

        let archive = archive.save_report(&make_report("r1", "Ana")).unwrap();
        assert_eq!(ids(&archive), vec!["r1", "r3", "r2"]);
    }

    #[test]
    fn test_from_entries_dedups_and_truncates() {
        let entries = vec![
            make_report("a", "x"),
            make_report("b", "x"),
            make_report("a", "y"),
            make_report("c", "x"),
            make_report("d", "x"),
        ];
        let archive = ReportArchive::from_entries(entries, 3);
        assert_eq!(ids(&archive), vec!["a", "b", "c"]);
        assert_eq!(archive.find("a").unwrap().operator, "x");
    }

    #[test]
    fn test_zero_limit_is_clamped() {
        let archive = ReportArchive::empty(0).save_report(&make_report("r1", "Ana")).unwrap();
        assert_eq!(archive.limit(), 1);
        assert_eq!(archive.len(), 1);
    }

    #[test]
    fn test_limit_above_maximum_is_clamped() {
        let mut archive = ReportArchive::empty(50);
        assert_eq!(archive.limit(), 20);
        for i in 0..30 {
            archive = archive.save_report(&make_report(&format!("r{}", i), "Ana")).unwrap();
        }
        assert_eq!(archive.len(), 20);
        assert_eq!(archive.entries()[0].id, "r29");

        let entries: Vec<Report> = (0..25).map(|i| make_report(&format!("s{}", i), "x")).collect();
        let restored = ReportArchive::from_entries(entries, 100);
        assert_eq!(restored.limit(), 20);
        assert_eq!(restored.len(), 20);
        assert_eq!(restored.entries()[19].id, "s19");
    }
}
