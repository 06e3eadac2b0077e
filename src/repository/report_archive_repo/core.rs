use crate::domain::report::Report;
use crate::repository::error::RepositoryResult;
use crate::repository::kv_store::KeyValueStore;
use std::sync::Arc;

/// 归档列表存储键
pub const ARCHIVE_KEY: &str = "shift_handover.archive";

/// 当前草稿存储键（命令行多次调用之间共享当前报告）
pub const DRAFT_KEY: &str = "shift_handover.draft";

// ==========================================
// ReportArchiveRepository - 报告归档仓储
// ==========================================
// 红线: Repository 不做业务逻辑,只做数据映射
// 归档的截断/去重由 engine::archive 负责
pub struct ReportArchiveRepository {
    store: Arc<dyn KeyValueStore>,
}

impl ReportArchiveRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    // ==========================================
    // 归档
    // ==========================================

    /// 读取完整归档列表（新在前）
    ///
    /// # 返回
    /// - `Ok(Vec<Report>)`: 归档列表；键不存在或内容损坏时为空列表
    /// - `Err(...)`: 存储本身读取失败
    pub fn load_archive(&self) -> RepositoryResult<Vec<Report>> {
        let raw = match self.store.get(ARCHIVE_KEY)? {
            Some(raw) => raw,
            None => return Ok(Vec::new()),
        };

        match serde_json::from_str::<Vec<Report>>(&raw) {
            Ok(reports) => {
                tracing::debug!("已加载归档: {} 份报告", reports.len());
                Ok(reports)
            }
            Err(e) => {
                tracing::warn!("归档数据损坏，按空归档处理: {}", e);
                Ok(Vec::new())
            }
        }
    }

    /// 整体写入归档列表
    pub fn persist_archive(&self, reports: &[Report]) -> RepositoryResult<()> {
        let raw = serde_json::to_string(reports)?;
        self.store.put(ARCHIVE_KEY, &raw)?;
        tracing::debug!("已写入归档: {} 份报告", reports.len());
        Ok(())
    }

    // ==========================================
    // 草稿
    // ==========================================

    /// 读取当前草稿；不存在或损坏时返回 None
    pub fn load_draft(&self) -> RepositoryResult<Option<Report>> {
        let raw = match self.store.get(DRAFT_KEY)? {
            Some(raw) => raw,
            None => return Ok(None),
        };

        match serde_json::from_str::<Report>(&raw) {
            Ok(report) => Ok(Some(report)),
            Err(e) => {
                tracing::warn!("草稿数据损坏，已忽略: {}", e);
                Ok(None)
            }
        }
    }

    pub fn persist_draft(&self, report: &Report) -> RepositoryResult<()> {
        let raw = serde_json::to_string(report)?;
        self.store.put(DRAFT_KEY, &raw)
    }
}
