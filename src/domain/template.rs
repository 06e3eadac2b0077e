// ==========================================
// 交接班设备点检系统 - 设备点检模板
// ==========================================
// 模板为不可变配置数据：设备组集合与成员固定
// 报告创建时对模板做深拷贝，报告之间不共享可变状态
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::error::{ReportError, ReportResult};
use crate::domain::report::{Equipment, EquipmentGroup};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentTemplate {
    groups: Vec<EquipmentGroup>,
}

impl EquipmentTemplate {
    /// 从设备组构建模板（带校验）
    ///
    /// # 校验
    /// - 组名非空且在模板内唯一
    /// - 设备 id 非空且在所属组内唯一
    pub fn new(groups: Vec<EquipmentGroup>) -> ReportResult<Self> {
        let template = Self { groups };
        template.validate()?;
        Ok(template)
    }

    /// 从 JSON 解析模板（config_kv: equipment_template）
    pub fn from_json(raw: &str) -> ReportResult<Self> {
        let template: EquipmentTemplate = serde_json::from_str(raw)
            .map_err(|e| ReportError::InvalidTemplate(format!("JSON 解析失败: {}", e)))?;
        template.validate()?;
        Ok(template)
    }

    pub fn groups(&self) -> &[EquipmentGroup] {
        &self.groups
    }

    /// 生成报告用的独立设备组副本
    pub fn instantiate(&self) -> Vec<EquipmentGroup> {
        self.groups.clone()
    }

    fn validate(&self) -> ReportResult<()> {
        if self.groups.is_empty() {
            return Err(ReportError::InvalidTemplate("模板至少需要一个设备组".to_string()));
        }

        let mut group_names = HashSet::new();
        for group in &self.groups {
            if group.name.trim().is_empty() {
                return Err(ReportError::InvalidTemplate("设备组名称不能为空".to_string()));
            }
            if !group_names.insert(group.name.as_str()) {
                return Err(ReportError::InvalidTemplate(format!(
                    "设备组名称重复: {}",
                    group.name
                )));
            }

            let mut item_ids = HashSet::new();
            for item in &group.items {
                if item.id.trim().is_empty() {
                    return Err(ReportError::InvalidTemplate(format!(
                        "设备 id 不能为空: group={}",
                        group.name
                    )));
                }
                if !item_ids.insert(item.id.as_str()) {
                    return Err(ReportError::InvalidTemplate(format!(
                        "设备 id 重复: group={}, id={}",
                        group.name, item.id
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Default for EquipmentTemplate {
    /// 内置泵站模板
    fn default() -> Self {
        fn group(name: &str, tags: &[&str]) -> EquipmentGroup {
            EquipmentGroup::new(
                name,
                tags.iter()
                    .map(|tag| Equipment::new(tag.to_lowercase(), *tag))
                    .collect(),
            )
        }

        Self {
            groups: vec![
                group("Intake Pumps", &["P-101", "P-102", "P-103"]),
                group("Booster Station", &["P-201", "P-202"]),
                group("Chemical Dosing", &["DP-301", "DP-302", "AG-303"]),
                group("Compressed Air", &["C-401", "DR-402"]),
                group("Electrical", &["MCC-501", "UPS-502"]),
            ],
        }
    }
}
