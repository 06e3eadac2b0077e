// ==========================================
// 交接班设备点检系统 - 报告命令处理
// ==========================================
// 纯函数: (当前报告, 动作) -> 新报告
// 红线: 不修改入参；失败时调用方状态保持不变
// 红线: 设备组结构与设备位号不可经由动作改变
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::error::{ReportError, ReportResult};
use crate::domain::report::{Equipment, Report};
use crate::domain::types::{EquipmentStatus, Shift, Team};

/// 报告编辑动作
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportAction {
    SetDate(String),
    SetShift(Shift),
    SetTeam(Team),
    SetOperator(String),
    SetObservations(String),
    /// 整项替换（按 item.id 匹配）
    UpdateEquipment { group_index: usize, item: Equipment },
    SetEquipmentStatus {
        group_index: usize,
        item_id: String,
        status: EquipmentStatus,
    },
    SetEquipmentComment {
        group_index: usize,
        item_id: String,
        comment: String,
    },
}

/// 应用动作，返回新报告
pub fn apply(report: &Report, action: ReportAction) -> ReportResult<Report> {
    match action {
        ReportAction::SetDate(date) => Ok(Report {
            date,
            ..report.clone()
        }),
        ReportAction::SetShift(shift) => Ok(Report {
            shift,
            ..report.clone()
        }),
        ReportAction::SetTeam(team) => Ok(Report {
            team,
            ..report.clone()
        }),
        ReportAction::SetOperator(operator) => Ok(Report {
            operator,
            ..report.clone()
        }),
        ReportAction::SetObservations(observations) => Ok(Report {
            observations,
            ..report.clone()
        }),
        ReportAction::UpdateEquipment { group_index, item } => {
            update_equipment(report, group_index, item)
        }
        ReportAction::SetEquipmentStatus {
            group_index,
            item_id,
            status,
        } => {
            let current = find_equipment(report, group_index, &item_id)?;
            update_equipment(report, group_index, current.clone().with_status(status))
        }
        ReportAction::SetEquipmentComment {
            group_index,
            item_id,
            comment,
        } => {
            let current = find_equipment(report, group_index, &item_id)?;
            update_equipment(report, group_index, current.clone().with_comment(comment))
        }
    }
}

/// 替换指定设备组内 id 匹配的设备
///
/// # 错误
/// - GroupNotFound: group_index 越界
/// - EquipmentNotFound: 组内无此 id
/// - ImmutableTag: 试图修改位号
pub fn update_equipment(
    report: &Report,
    group_index: usize,
    updated_item: Equipment,
) -> ReportResult<Report> {
    let group = report.groups.get(group_index).ok_or(ReportError::GroupNotFound {
        group_index,
        group_count: report.groups.len(),
    })?;

    let item_index = group
        .position_of(&updated_item.id)
        .ok_or_else(|| ReportError::EquipmentNotFound {
            group: group.name.clone(),
            equipment_id: updated_item.id.clone(),
        })?;

    let existing = &group.items[item_index];
    if existing.tag != updated_item.tag {
        return Err(ReportError::ImmutableTag {
            equipment_id: existing.id.clone(),
            from: existing.tag.clone(),
            to: updated_item.tag,
        });
    }

    let mut next = report.clone();
    next.groups[group_index].items[item_index] = updated_item;
    Ok(next)
}

fn find_equipment<'a>(
    report: &'a Report,
    group_index: usize,
    item_id: &str,
) -> ReportResult<&'a Equipment> {
    let group = report.groups.get(group_index).ok_or(ReportError::GroupNotFound {
        group_index,
        group_count: report.groups.len(),
    })?;

    group.find(item_id).ok_or_else(|| ReportError::EquipmentNotFound {
        group: group.name.clone(),
        equipment_id: item_id.to_string(),
    })
}
