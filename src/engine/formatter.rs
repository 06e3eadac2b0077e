// ==========================================
// 交接班设备点检系统 - 报告文本导出
// ==========================================
// 纯函数、确定性、全函数：同值报告 -> 同一字符串
// 版式（对外契约，复制/打印原样使用）:
//   表头（日期/班次/班组/交班人）
//   每个设备组一段: [组名] + 每台设备一行 "位号 — 状态 [备注]"
//   运行情况说明段（为空时省略）
// 自由文本（备注、说明、交班人）中的换行与连续空白压缩为单个空格
// 标签语言由构造参数显式指定，不读取全局语言
// ==========================================

use crate::domain::report::{Equipment, Report};
use crate::engine::archive::ReportArchive;
use crate::engine::summary::StatusSummary;
use crate::i18n::{self, tr, tr_with_args};

const RULE: &str = "==========================================";

/// 按缺省语言导出报告文本
pub fn format_report_to_text(report: &Report) -> String {
    ReportFormatter::default().format(report)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportFormatter {
    locale: &'static str,
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self {
            locale: i18n::DEFAULT_LOCALE,
        }
    }
}

impl ReportFormatter {
    /// 不受支持的语言回退缺省语言
    pub fn new(locale: &str) -> Self {
        Self {
            locale: i18n::normalize_locale(locale).unwrap_or(i18n::DEFAULT_LOCALE),
        }
    }

    pub fn locale(&self) -> &'static str {
        self.locale
    }

    /// 导出完整报告
    pub fn format(&self, report: &Report) -> String {
        let mut lines: Vec<String> = Vec::new();

        // ===== 表头 =====
        lines.push(RULE.to_string());
        lines.push(tr(self.locale, "report.title"));
        lines.push(RULE.to_string());
        lines.push(self.field("report.date", &report.date));
        lines.push(self.field("report.shift", &tr(self.locale, report.shift.label_key())));
        lines.push(self.field(
            "report.team",
            &tr_with_args(self.locale, "team.label", &[("team", report.team.as_str())]),
        ));
        lines.push(self.field("report.operator", &self.operator_display(report)));

        // ===== 设备组 =====
        for group in &report.groups {
            lines.push(String::new());
            lines.push(format!("[{}]", group.name));
            for item in &group.items {
                lines.push(self.equipment_line(item));
            }
        }

        // ===== 运行情况说明 =====
        if report.has_observations() {
            lines.push(String::new());
            lines.push(format!("{}:", tr(self.locale, "report.observations")));
            lines.push(single_line(&report.observations));
        }

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }

    /// 单台设备行: "位号 — 状态" 或 "位号 — 状态 [备注]"
    pub fn equipment_line(&self, item: &Equipment) -> String {
        let status = tr(self.locale, item.status.label_key());
        if item.has_comment() {
            format!("{} — {} [{}]", item.tag, status, single_line(&item.comment))
        } else {
            format!("{} — {}", item.tag, status)
        }
    }

    /// 状态汇总（仅列出计数非零的状态）
    pub fn format_summary(&self, summary: &StatusSummary) -> String {
        let mut lines = vec![format!("{}:", tr(self.locale, "report.summary"))];
        for (status, count) in summary.non_zero() {
            lines.push(format!("  {}: {}", tr(self.locale, status.label_key()), count));
        }
        lines.push(format!("  {}: {}", tr(self.locale, "report.total"), summary.total()));

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }

    /// 归档列表: 每份报告一行 "id  日期 | 班次 | 班组 | 交班人"
    pub fn format_archive_listing(&self, archive: &ReportArchive) -> String {
        if archive.is_empty() {
            return format!("{}\n", tr(self.locale, "archive.empty"));
        }

        let count = archive.len().to_string();
        let mut lines = vec![tr_with_args(self.locale, "archive.header", &[("count", &count)])];
        for report in archive.entries() {
            lines.push(format!(
                "{}  {} | {} | {} | {}",
                report.id,
                report.date,
                tr(self.locale, report.shift.label_key()),
                tr_with_args(self.locale, "team.label", &[("team", report.team.as_str())]),
                self.operator_display(report),
            ));
        }

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }

    fn field(&self, label_key: &str, value: &str) -> String {
        format!("{}: {}", tr(self.locale, label_key), value)
    }

    fn operator_display(&self, report: &Report) -> String {
        if report.has_operator() {
            single_line(&report.operator)
        } else {
            tr(self.locale, "report.operator_unnamed")
        }
    }
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
