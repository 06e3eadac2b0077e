// ==========================================
// 交接班设备点检系统 - 数据仓储层
// ==========================================
// 职责: 键值存储抽象与报告归档/草稿的数据映射
// 红线: 不含业务逻辑
// ==========================================

pub mod error;
pub mod kv_store;
pub mod report_archive_repo;

pub use error::{RepositoryError, RepositoryResult};
pub use kv_store::{KeyValueStore, MemoryKvStore, SqliteKvStore};
pub use report_archive_repo::ReportArchiveRepository;
