// ==========================================
// 交接班设备点检系统 - 领域类型定义
// ==========================================
// 班次 / 班组 / 设备运行状态 三个固定枚举
// 序列化格式: SCREAMING_SNAKE_CASE (与持久化 JSON 一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 班次 (Shift)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Shift {
    Morning,   // 早班
    Afternoon, // 中班
    Night,     // 夜班
}

impl Shift {
    pub const ALL: [Shift; 3] = [Shift::Morning, Shift::Afternoon, Shift::Night];

    pub fn as_str(&self) -> &'static str {
        match self {
            Shift::Morning => "MORNING",
            Shift::Afternoon => "AFTERNOON",
            Shift::Night => "NIGHT",
        }
    }

    /// 国际化标签键
    pub fn label_key(&self) -> &'static str {
        match self {
            Shift::Morning => "shift.morning",
            Shift::Afternoon => "shift.afternoon",
            Shift::Night => "shift.night",
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Shift {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "MORNING" | "M" => Ok(Shift::Morning),
            "AFTERNOON" | "A" => Ok(Shift::Afternoon),
            "NIGHT" | "N" => Ok(Shift::Night),
            other => Err(format!("未知班次: {} (可选: MORNING/AFTERNOON/NIGHT)", other)),
        }
    }
}

// ==========================================
// 班组 (Team)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    A,
    B,
    C,
    D,
}

impl Team {
    pub const ALL: [Team; 4] = [Team::A, Team::B, Team::C, Team::D];

    pub fn as_str(&self) -> &'static str {
        match self {
            Team::A => "A",
            Team::B => "B",
            Team::C => "C",
            Team::D => "D",
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Team {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(Team::A),
            "B" => Ok(Team::B),
            "C" => Ok(Team::C),
            "D" => Ok(Team::D),
            other => Err(format!("未知班组: {} (可选: A/B/C/D)", other)),
        }
    }
}

// ==========================================
// 设备运行状态 (Equipment Status)
// ==========================================
// 顺序即汇总/展示顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EquipmentStatus {
    Running, // 运行
    Stopped, // 停机
    Standby, // 备用
    Anomaly, // 异常
}

impl Default for EquipmentStatus {
    fn default() -> Self {
        EquipmentStatus::Running
    }
}

impl EquipmentStatus {
    pub const ALL: [EquipmentStatus; 4] = [
        EquipmentStatus::Running,
        EquipmentStatus::Stopped,
        EquipmentStatus::Standby,
        EquipmentStatus::Anomaly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentStatus::Running => "RUNNING",
            EquipmentStatus::Stopped => "STOPPED",
            EquipmentStatus::Standby => "STANDBY",
            EquipmentStatus::Anomaly => "ANOMALY",
        }
    }

    /// 国际化标签键
    pub fn label_key(&self) -> &'static str {
        match self {
            EquipmentStatus::Running => "status.running",
            EquipmentStatus::Stopped => "status.stopped",
            EquipmentStatus::Standby => "status.standby",
            EquipmentStatus::Anomaly => "status.anomaly",
        }
    }
}

impl fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EquipmentStatus {
    type Err = String;

    /// 同时接受现场简写: ON / OFF / SBY / ERR
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "RUNNING" | "ON" => Ok(EquipmentStatus::Running),
            "STOPPED" | "OFF" => Ok(EquipmentStatus::Stopped),
            "STANDBY" | "SBY" => Ok(EquipmentStatus::Standby),
            "ANOMALY" | "ERR" => Ok(EquipmentStatus::Anomaly),
            other => Err(format!(
                "未知设备状态: {} (可选: RUNNING/STOPPED/STANDBY/ANOMALY)",
                other
            )),
        }
    }
}
