// ==========================================
// 交接班设备点检系统 - 设备状态汇总
// ==========================================

use serde::Serialize;

use crate::domain::report::Report;
use crate::domain::types::EquipmentStatus;

/// 按运行状态计数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusSummary {
    pub running: usize,
    pub stopped: usize,
    pub standby: usize,
    pub anomaly: usize,
}

impl StatusSummary {
    pub fn of(report: &Report) -> Self {
        let mut summary = StatusSummary::default();
        for (_, item) in report.equipment() {
            *summary.slot_mut(item.status) += 1;
        }
        summary
    }

    pub fn count(&self, status: EquipmentStatus) -> usize {
        match status {
            EquipmentStatus::Running => self.running,
            EquipmentStatus::Stopped => self.stopped,
            EquipmentStatus::Standby => self.standby,
            EquipmentStatus::Anomaly => self.anomaly,
        }
    }

    pub fn total(&self) -> usize {
        self.running + self.stopped + self.standby + self.anomaly
    }

    /// 计数大于零的状态（固定顺序）
    pub fn non_zero(&self) -> Vec<(EquipmentStatus, usize)> {
        EquipmentStatus::ALL
            .iter()
            .map(|s| (*s, self.count(*s)))
            .filter(|(_, n)| *n > 0)
            .collect()
    }

    fn slot_mut(&mut self, status: EquipmentStatus) -> &mut usize {
        match status {
            EquipmentStatus::Running => &mut self.running,
            EquipmentStatus::Stopped => &mut self.stopped,
            EquipmentStatus::Standby => &mut self.standby,
            EquipmentStatus::Anomaly => &mut self.anomaly,
        }
    }
}
