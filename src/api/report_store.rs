// ==========================================
// 交接班设备点检系统 - 报告存储 API
// ==========================================
// 职责: 持有当前报告与归档（唯一所有者），处理操作员命令
// 规则: 命令逐条执行；失败时内存状态与持久化状态均不变
// 持久化: 归档整体读写；当前报告作为草稿整体读写
// ==========================================

use chrono::{DateTime, Local, TimeZone};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::config::settings::ReportSettings;
use crate::domain::report::{Equipment, Report};
use crate::domain::template::EquipmentTemplate;
use crate::engine::archive::ReportArchive;
use crate::engine::factory::create_report;
use crate::engine::formatter::ReportFormatter;
use crate::engine::reducer::{self, ReportAction};
use crate::engine::summary::StatusSummary;
use crate::repository::report_archive_repo::ReportArchiveRepository;

// ==========================================
// ReportStore - 报告存储
// ==========================================

/// 报告存储
///
/// 启动时创建、进程内常驻；“新建报告”时整体替换当前报告。
pub struct ReportStore {
    archive_repo: Arc<ReportArchiveRepository>,
    template: EquipmentTemplate,
    settings: ReportSettings,
    current: Report,
    archive: ReportArchive,
}

impl ReportStore {
    /// 打开报告存储
    ///
    /// # 说明
    /// 1. 读取归档（损坏时按空归档处理）
    /// 2. 读取草稿；无草稿时从模板新建报告
    pub fn open(
        archive_repo: Arc<ReportArchiveRepository>,
        template: EquipmentTemplate,
        settings: ReportSettings,
    ) -> ApiResult<Self> {
        let entries = archive_repo.load_archive()?;
        let archive = ReportArchive::from_entries(entries, settings.archive_limit);

        let current = match archive_repo.load_draft()? {
            Some(draft) => {
                debug!("恢复草稿: id={}", draft.id);
                draft
            }
            None => create_report(&template, &settings, &Local::now()),
        };

        info!(
            "报告存储已就绪: 归档{}份(上限{}), 当前报告={}(设备{}台)",
            archive.len(),
            archive.limit(),
            current.id,
            current.equipment_count()
        );

        Ok(Self {
            archive_repo,
            template,
            settings,
            current,
            archive,
        })
    }

    // ==========================================
    // 查询接口
    // ==========================================

    pub fn current(&self) -> &Report {
        &self.current
    }

    pub fn archive(&self) -> &ReportArchive {
        &self.archive
    }

    pub fn template(&self) -> &EquipmentTemplate {
        &self.template
    }

    pub fn settings(&self) -> &ReportSettings {
        &self.settings
    }

    pub fn summary(&self) -> StatusSummary {
        StatusSummary::of(&self.current)
    }

    /// 按配置语言预览当前报告
    pub fn preview(&self) -> String {
        self.export_text(None)
    }

    /// 导出当前报告文本；locale 为空时使用配置语言
    pub fn export_text(&self, locale: Option<&str>) -> String {
        self.formatter(locale).format(&self.current)
    }

    pub fn formatter(&self, locale: Option<&str>) -> ReportFormatter {
        ReportFormatter::new(locale.unwrap_or(&self.settings.export_locale))
    }

    // ==========================================
    // 命令接口
    // ==========================================

    /// 丢弃当前报告，从模板新建
    pub fn new_report(&mut self) -> &Report {
        self.new_report_at(&Local::now())
    }

    pub fn new_report_at<Tz>(&mut self, now: &DateTime<Tz>) -> &Report
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let discarded = std::mem::replace(
            &mut self.current,
            create_report(&self.template, &self.settings, now),
        );
        info!("新建报告: id={} (丢弃 {})", self.current.id, discarded.id);
        &self.current
    }

    /// 执行编辑动作
    pub fn dispatch(&mut self, action: ReportAction) -> ApiResult<&Report> {
        match reducer::apply(&self.current, action) {
            Ok(next) => {
                self.current = next;
                Ok(&self.current)
            }
            Err(e) => {
                warn!("编辑动作被拒绝(报告未变更): {}", e);
                Err(e.into())
            }
        }
    }

    /// 替换设备组内的设备
    pub fn update_equipment(&mut self, group_index: usize, item: Equipment) -> ApiResult<&Report> {
        self.dispatch(ReportAction::UpdateEquipment { group_index, item })
    }

    /// 归档当前报告
    ///
    /// # 错误
    /// - ValidationError: 交班人未填写（归档不变）
    /// - DatabaseError: 写入失败（内存归档不变）
    pub fn save(&mut self) -> ApiResult<&Report> {
        let next = match self.archive.save_report(&self.current) {
            Ok(next) => next,
            Err(e) => {
                warn!("归档被拒绝: {}", e);
                return Err(e.into());
            }
        };

        self.archive_repo.persist_archive(next.entries())?;
        self.archive = next;

        info!(
            "报告已归档: id={}, operator={}, 归档{}份",
            self.current.id,
            self.current.operator.trim(),
            self.archive.len()
        );
        Ok(&self.current)
    }

    /// 打开归档中的报告作为当前报告
    pub fn open_archived(&mut self, report_id: &str) -> ApiResult<&Report> {
        let report = self
            .archive
            .find(report_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("归档报告(id={})不存在", report_id)))?;

        info!("打开归档报告: id={}", report.id);
        self.current = report;
        Ok(&self.current)
    }

    /// 写入当前草稿
    pub fn persist_draft(&self) -> ApiResult<()> {
        self.archive_repo.persist_draft(&self.current)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{EquipmentStatus, Shift, Team};
    use crate::repository::kv_store::{KeyValueStore, MemoryKvStore};
    use crate::repository::report_archive_repo::ARCHIVE_KEY;
    use chrono::Utc;

    fn open_store(kv: Arc<MemoryKvStore>) -> ReportStore {
        let repo = Arc::new(ReportArchiveRepository::new(kv));
        ReportStore::open(repo, EquipmentTemplate::default(), ReportSettings::default()).unwrap()
    }

    #[test]
    fn test_open_with_empty_storage_creates_fresh_report() {
        let store = open_store(Arc::new(MemoryKvStore::new()));
        assert!(store.archive().is_empty());
        assert_eq!(store.current().groups.as_slice(), store.template().groups());
        assert_eq!(store.current().team, Team::C);
    }

    #[test]
    fn test_open_with_corrupted_archive() {
        let kv = Arc::new(MemoryKvStore::new());
        kv.put(ARCHIVE_KEY, "{{{{").unwrap();

        let store = open_store(kv);
        assert!(store.archive().is_empty());
    }

    #[test]
    fn test_save_requires_operator() {
        let kv = Arc::new(MemoryKvStore::new());
        let mut store = open_store(kv.clone());

        let err = store.save().unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert!(store.archive().is_empty());
        assert_eq!(kv.get(ARCHIVE_KEY).unwrap(), None);
    }

    #[test]
    fn test_save_persists_and_reopens() {
        let kv = Arc::new(MemoryKvStore::new());
        let mut store = open_store(kv.clone());

        store
            .dispatch(ReportAction::SetOperator("Ana".to_string()))
            .unwrap();
        let id = store.save().unwrap().id.clone();

        let reopened = open_store(kv);
        assert_eq!(reopened.archive().len(), 1);
        assert_eq!(reopened.archive().entries()[0].id, id);
    }

    #[test]
    fn test_failed_update_leaves_current_unchanged() {
        let mut store = open_store(Arc::new(MemoryKvStore::new()));
        let before = store.current().clone();

        let err = store
            .update_equipment(0, Equipment::new("does-not-exist", "X"))
            .unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");
        assert_eq!(store.current(), &before);
    }

    #[test]
    fn test_new_report_and_open_archived() {
        let mut store = open_store(Arc::new(MemoryKvStore::new()));
        store
            .dispatch(ReportAction::SetOperator("Ana".to_string()))
            .unwrap();
        let first = store.current().clone();
        let item = first.groups[0].items[0].clone();
        store
            .update_equipment(0, item.with_status(EquipmentStatus::Stopped))
            .unwrap();
        store.save().unwrap();
        let saved_id = store.current().id.clone();

        let fresh_id = store.new_report_at(&Utc::now()).id.clone();
        assert_ne!(fresh_id, saved_id);
        assert!(store.current().operator.is_empty());
        assert_eq!(store.current().groups[0].items[0].status, EquipmentStatus::Running);

        let reopened = store.open_archived(&saved_id).unwrap();
        assert_eq!(reopened.groups[0].items[0].status, EquipmentStatus::Stopped);

        assert!(store.open_archived("missing").is_err());
        assert_eq!(store.current().id, saved_id);
    }

    #[test]
    fn test_draft_survives_reopen() {
        let kv = Arc::new(MemoryKvStore::new());
        let mut store = open_store(kv.clone());
        store.dispatch(ReportAction::SetShift(Shift::Night)).unwrap();
        store
            .dispatch(ReportAction::SetObservations("gate valve stiff".to_string()))
            .unwrap();
        store.persist_draft().unwrap();
        let id = store.current().id.clone();

        let reopened = open_store(kv);
        assert_eq!(reopened.current().id, id);
        assert_eq!(reopened.current().shift, Shift::Night);
        assert_eq!(reopened.current().observations, "gate valve stiff");
    }

    #[test]
    fn test_export_text_uses_configured_or_explicit_locale() {
        let kv = Arc::new(MemoryKvStore::new());
        let repo = Arc::new(ReportArchiveRepository::new(kv));
        let settings = ReportSettings {
            export_locale: "en".to_string(),
            ..ReportSettings::default()
        };
        let store = ReportStore::open(repo, EquipmentTemplate::default(), settings).unwrap();

        assert!(store.preview().contains("SHIFT HANDOVER CHECKLIST"));
        assert!(store.export_text(Some("pt-BR")).contains("CHECKLIST DE PASSAGEM DE TURNO"));
    }
}
