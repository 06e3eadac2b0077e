// ==========================================
// 交接班设备点检系统 - 报告归档数据仓储
// ==========================================
// 存储: kv_store 固定键，归档列表整体作为一个 JSON 数组
// 红线: 存储内容损坏不得导致崩溃，按“无归档”处理
// ==========================================

mod core;


pub use core::{ReportArchiveRepository, ARCHIVE_KEY, DRAFT_KEY};
