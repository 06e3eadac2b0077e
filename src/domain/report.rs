// ==========================================
// 交接班设备点检系统 - 交接班报告领域模型
// ==========================================
// Report -> EquipmentGroup -> Equipment 三层结构
// 红线: 设备组顺序与成员在报告实例化后不再变化
// 红线: 报告 id 创建后不可变、不复用
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{EquipmentStatus, Shift, Team};

// ==========================================
// Equipment - 设备点检项
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: String,              // 组内唯一
    pub tag: String,             // 位号 (不可变)
    pub status: EquipmentStatus, // 运行状态
    #[serde(default)]
    pub comment: String,         // 备注 (空串即无)
}

impl Equipment {
    pub fn new(id: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag: tag.into(),
            status: EquipmentStatus::default(),
            comment: String::new(),
        }
    }

    pub fn with_status(mut self, status: EquipmentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// 备注是否有效（去除空白后非空）
    pub fn has_comment(&self) -> bool {
        !self.comment.trim().is_empty()
    }
}

// ==========================================
// EquipmentGroup - 设备组（子系统）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentGroup {
    pub name: String,
    pub items: Vec<Equipment>,
}

impl EquipmentGroup {
    pub fn new(name: impl Into<String>, items: Vec<Equipment>) -> Self {
        Self {
            name: name.into(),
            items,
        }
    }

    pub fn position_of(&self, equipment_id: &str) -> Option<usize> {
        self.items.iter().position(|i| i.id == equipment_id)
    }

    pub fn find(&self, equipment_id: &str) -> Option<&Equipment> {
        self.items.iter().find(|i| i.id == equipment_id)
    }
}

// ==========================================
// Report - 交接班报告
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    // ===== 标识 =====
    pub id: String,
    pub created_at: DateTime<Utc>,

    // ===== 表头 =====
    pub date: String, // 展示用日期字符串
    pub shift: Shift,
    pub team: Team,
    pub operator: String, // 交班人，归档前必填

    // ===== 点检内容 =====
    pub groups: Vec<EquipmentGroup>,
    #[serde(default)]
    pub observations: String,
}

impl Report {
    /// 交班人是否已填写（去除空白后非空）
    pub fn has_operator(&self) -> bool {
        !self.operator.trim().is_empty()
    }

    pub fn has_observations(&self) -> bool {
        !self.observations.trim().is_empty()
    }

    pub fn group_index(&self, name: &str) -> Option<usize> {
        self.groups.iter().position(|g| g.name == name)
    }

    /// 设备总数
    pub fn equipment_count(&self) -> usize {
        self.groups.iter().map(|g| g.items.len()).sum()
    }

    pub fn equipment(&self) -> impl Iterator<Item = (&EquipmentGroup, &Equipment)> {
        self.groups
            .iter()
            .flat_map(|g| g.items.iter().map(move |i| (g, i)))
    }
}
