// ==========================================
// 交接班设备点检系统 - 命令行界面
// ==========================================
// 职责: 解析操作员命令并转交 ReportStore / ConfigApi
// 每次调用执行一条命令；当前报告以草稿形式在调用之间保留
// ==========================================

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use crate::api::{ApiError, ApiResult};
use crate::app::state::AppState;
use crate::domain::report::Report;
use crate::domain::types::{EquipmentStatus, Shift, Team};
use crate::engine::reducer::ReportAction;
use crate::exporter;
use crate::i18n::{self, tr, tr_with_args};

#[derive(Parser, Debug)]
#[command(
    name = "shift-handover",
    version,
    about = "Shift handover equipment checklist"
)]
pub struct Cli {
    /// SQLite database file (default: $SHIFT_HANDOVER_DB_PATH or the user data dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Output language (zh-CN, en, pt-BR); defaults to the export_locale config
    #[arg(long, global = true, value_name = "LOCALE")]
    pub locale: Option<String>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Discard the current report and start a fresh one from the equipment template
    New,
    /// Print the current report
    Show(ShowArgs),
    /// Edit header fields of the current report
    Header(HeaderArgs),
    /// Update one equipment item of the current report
    Item(ItemArgs),
    /// Archive the current report (operator required)
    Save,
    /// List archived reports, newest first
    History,
    /// Reopen an archived report as the current report
    Open(OpenArgs),
    /// Export the current report as text
    Export(ExportArgs),
    /// Export the whole archive as CSV (one row per equipment item)
    ExportCsv(ExportCsvArgs),
    /// Show status counts for the current report
    Summary,
    /// Inspect or change configuration
    Config(ConfigArgs),
}

#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// List group indexes and equipment ids instead of the text layout
    #[arg(long)]
    pub ids: bool,
}

#[derive(Parser, Debug, Default)]
pub struct HeaderArgs {
    #[arg(long)]
    pub date: Option<String>,

    /// MORNING, AFTERNOON or NIGHT (M/A/N accepted)
    #[arg(long)]
    pub shift: Option<Shift>,

    /// A, B, C or D
    #[arg(long)]
    pub team: Option<Team>,

    #[arg(long)]
    pub operator: Option<String>,

    #[arg(long)]
    pub observations: Option<String>,
}

#[derive(Parser, Debug)]
pub struct ItemArgs {
    /// Group index (0-based) or group name
    pub group: String,

    /// Equipment id or tag
    pub item: String,

    /// RUNNING, STOPPED, STANDBY or ANOMALY
    #[arg(long)]
    pub status: Option<EquipmentStatus>,

    /// Free-text comment; pass "" to clear
    #[arg(long)]
    pub comment: Option<String>,
}

#[derive(Parser, Debug)]
pub struct OpenArgs {
    /// Archived report id
    pub id: String,
}

#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Write to this file instead of stdout
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct ExportCsvArgs {
    #[arg(value_name = "PATH")]
    pub out: PathBuf,
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// List all keys with their effective values
    List,
    Get { key: String },
    Set { key: String, value: String },
    /// Remove an override and fall back to the default
    Reset { key: String },
}

/// 输出选项
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    pub locale: &'static str,
    pub json: bool,
}

impl OutputOptions {
    /// 解析输出语言：--locale 优先，其次为 export_locale 配置
    pub fn resolve(cli_locale: Option<&str>, state: &AppState, json: bool) -> ApiResult<Self> {
        let locale = match cli_locale {
            Some(raw) => i18n::normalize_locale(raw).ok_or_else(|| {
                ApiError::InvalidInput(format!(
                    "不支持的语言: {}（可用: {}）",
                    raw,
                    i18n::SUPPORTED_LOCALES.join(", ")
                ))
            })?,
            None => i18n::normalize_locale(&state.report_store.settings().export_locale)
                .unwrap_or(i18n::DEFAULT_LOCALE),
        };
        Ok(Self { locale, json })
    }
}

// ==========================================
// 命令执行
// ==========================================

/// 执行一条命令，返回应输出到 stdout 的文本
pub fn execute(state: &mut AppState, command: Command, opts: OutputOptions) -> ApiResult<String> {
    tracing::debug!("执行命令: {:?}", command);
    let locale = opts.locale;

    match command {
        Command::New => {
            let id = state.report_store.new_report().id.clone();
            state.report_store.persist_draft()?;
            Ok(line(tr_with_args(locale, "cli.report_created", &[("id", &id)])))
        }
        Command::Show(args) => {
            let report = state.report_store.current();
            if opts.json {
                to_json(report)
            } else if args.ids {
                Ok(format_item_ids(report))
            } else {
                Ok(state.report_store.export_text(Some(locale)))
            }
        }
        Command::Header(args) => {
            let actions = header_actions(args);
            if actions.is_empty() {
                return Err(ApiError::InvalidInput(
                    "至少指定一个字段: --date/--shift/--team/--operator/--observations".to_string(),
                ));
            }
            apply_all(state, actions)?;
            state.report_store.persist_draft()?;
            Ok(line(tr(locale, "cli.report_updated")))
        }
        Command::Item(args) => {
            update_item(state, args)?;
            state.report_store.persist_draft()?;
            Ok(line(tr(locale, "cli.report_updated")))
        }
        Command::Save => {
            let id = state.report_store.save()?.id.clone();
            state.report_store.persist_draft()?;
            Ok(line(tr_with_args(locale, "cli.report_saved", &[("id", &id)])))
        }
        Command::History => {
            if opts.json {
                to_json(state.report_store.archive().entries())
            } else {
                Ok(state
                    .report_store
                    .formatter(Some(locale))
                    .format_archive_listing(state.report_store.archive()))
            }
        }
        Command::Open(args) => {
            let id = state.report_store.open_archived(&args.id)?.id.clone();
            state.report_store.persist_draft()?;
            Ok(line(tr_with_args(locale, "cli.report_opened", &[("id", &id)])))
        }
        Command::Export(args) => {
            let text = state.report_store.export_text(Some(locale));
            match args.out {
                Some(path) => {
                    exporter::export_text(&path, &text)?;
                    let path = path.display().to_string();
                    Ok(line(tr_with_args(locale, "cli.text_exported", &[("path", &path)])))
                }
                None => Ok(text),
            }
        }
        Command::ExportCsv(args) => {
            let rows =
                exporter::export_archive_csv(&args.out, state.report_store.archive().entries())?;
            let rows = rows.to_string();
            let path = args.out.display().to_string();
            Ok(line(tr_with_args(
                locale,
                "cli.csv_exported",
                &[("rows", &rows), ("path", &path)],
            )))
        }
        Command::Summary => {
            let summary = state.report_store.summary();
            if opts.json {
                to_json(&summary)
            } else {
                Ok(state
                    .report_store
                    .formatter(Some(locale))
                    .format_summary(&summary))
            }
        }
        Command::Config(args) => execute_config(state, args.action, opts),
    }
}

fn execute_config(state: &AppState, action: ConfigAction, opts: OutputOptions) -> ApiResult<String> {
    let api = &state.config_api;
    match action {
        ConfigAction::List => {
            let items = api.list_configs()?;
            if opts.json {
                return to_json(&items);
            }
            let mut text = String::new();
            for item in items {
                let marker = if item.is_default { " (default)" } else { "" };
                text.push_str(&format!("{} = {}{}\n", item.key, item.value, marker));
            }
            Ok(text)
        }
        ConfigAction::Get { key } => {
            let item = api.get_config(&key)?;
            if opts.json {
                to_json(&item)
            } else {
                Ok(line(item.value))
            }
        }
        ConfigAction::Set { key, value } => {
            api.update_config(&key, &value)?;
            Ok(line(tr_with_args(opts.locale, "cli.config_updated", &[("key", &key)])))
        }
        ConfigAction::Reset { key } => {
            api.reset_config(&key)?;
            Ok(line(tr_with_args(opts.locale, "cli.config_reset", &[("key", &key)])))
        }
    }
}

fn header_actions(args: HeaderArgs) -> Vec<ReportAction> {
    let mut actions = Vec::new();
    if let Some(date) = args.date {
        actions.push(ReportAction::SetDate(date));
    }
    if let Some(shift) = args.shift {
        actions.push(ReportAction::SetShift(shift));
    }
    if let Some(team) = args.team {
        actions.push(ReportAction::SetTeam(team));
    }
    if let Some(operator) = args.operator {
        actions.push(ReportAction::SetOperator(operator));
    }
    if let Some(observations) = args.observations {
        actions.push(ReportAction::SetObservations(observations));
    }
    actions
}

fn apply_all(state: &mut AppState, actions: Vec<ReportAction>) -> ApiResult<()> {
    for action in actions {
        state.report_store.dispatch(action)?;
    }
    Ok(())
}

/// 按组序号/组名、设备 id/位号定位设备后整体替换
///
/// 定位不到时仍交给 reducer，由其返回 GroupNotFound / EquipmentNotFound
fn update_item(state: &mut AppState, args: ItemArgs) -> ApiResult<()> {
    if args.status.is_none() && args.comment.is_none() {
        return Err(ApiError::InvalidInput(
            "至少指定一个字段: --status/--comment".to_string(),
        ));
    }

    let report = state.report_store.current();
    let group_index = resolve_group(report, &args.group)?;

    let existing = report
        .groups
        .get(group_index)
        .and_then(|g| resolve_item(&g.items, &args.item));

    let updated = match existing {
        Some(item) => {
            let mut item = item.clone();
            if let Some(status) = args.status {
                item.status = status;
            }
            if let Some(comment) = args.comment {
                item.comment = comment;
            }
            item
        }
        None => {
            let action = match args.status {
                Some(status) => ReportAction::SetEquipmentStatus {
                    group_index,
                    item_id: args.item,
                    status,
                },
                None => ReportAction::SetEquipmentComment {
                    group_index,
                    item_id: args.item,
                    comment: args.comment.unwrap_or_default(),
                },
            };
            state.report_store.dispatch(action)?;
            return Ok(());
        }
    };

    state.report_store.update_equipment(group_index, updated)?;
    Ok(())
}

fn resolve_group(report: &Report, raw: &str) -> ApiResult<usize> {
    if let Ok(index) = raw.trim().parse::<usize>() {
        return Ok(index);
    }
    report
        .group_index(raw)
        .or_else(|| {
            report
                .groups
                .iter()
                .position(|g| g.name.eq_ignore_ascii_case(raw.trim()))
        })
        .ok_or_else(|| ApiError::NotFound(format!("设备组不存在: {}", raw)))
}

fn resolve_item<'a>(
    items: &'a [crate::domain::report::Equipment],
    raw: &str,
) -> Option<&'a crate::domain::report::Equipment> {
    let raw = raw.trim();
    items
        .iter()
        .find(|i| i.id == raw)
        .or_else(|| items.iter().find(|i| i.tag.eq_ignore_ascii_case(raw)))
}

fn format_item_ids(report: &Report) -> String {
    let mut text = String::new();
    for (index, group) in report.groups.iter().enumerate() {
        text.push_str(&format!("{}  {}\n", index, group.name));
        for item in &group.items {
            text.push_str(&format!("    {}  {}  {}\n", item.id, item.tag, item.status));
        }
    }
    text
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> ApiResult<String> {
    let mut text = serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::InternalError(format!("JSON 序列化失败: {}", e)))?;
    text.push('\n');
    Ok(text)
}

fn line(text: String) -> String {
    format!("{}\n", text)
}
