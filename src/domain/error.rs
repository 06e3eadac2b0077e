// ==========================================
// 交接班设备点检系统 - 领域规则错误
// ==========================================
// 工具: thiserror 派生宏
// 说明: 领域错误均不致命，调用方状态保持不变
// ==========================================

use thiserror::Error;

/// 报告领域规则错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    // ===== 归档校验 =====
    #[error("归档前必须填写交班人")]
    MissingOperator,

    // ===== 设备更新 =====
    #[error("设备组不存在: group_index={group_index}, 共{group_count}组")]
    GroupNotFound {
        group_index: usize,
        group_count: usize,
    },

    #[error("设备不存在: group={group}, equipment_id={equipment_id}")]
    EquipmentNotFound { group: String, equipment_id: String },

    #[error("设备位号不可修改: equipment_id={equipment_id}, from={from} to={to}")]
    ImmutableTag {
        equipment_id: String,
        from: String,
        to: String,
    },

    // ===== 模板 =====
    #[error("设备模板无效: {0}")]
    InvalidTemplate(String),
}

/// Result 类型别名
pub type ReportResult<T> = Result<T, ReportError>;
