//! # 记录键与结果记录数据模型
//!
//! 定义容器内记录的键（构型类型 + gID）、按指纹归并的能量分量，
//! 以及最终装配输出的归一化结果记录。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `pipeline/`, `commands/` 使用
//! - 使用 `models/structure.rs`, `models/calculator.rs`

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::calculator::CalculatorRecord;
use super::structure::ConfigurationRecord;

/// 构型类型标签
///
/// 命名约定里已知的两种记录类型。`ALL` 的顺序即维度名匹配顺序，
/// 同一 gID 被两种标签命中时后匹配者静默覆盖前者。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConfigType {
    Molecule,
    Bulk,
}

impl ConfigType {
    pub const ALL: [ConfigType; 2] = [ConfigType::Molecule, ConfigType::Bulk];

    /// 维度/变量名中的字面前缀
    pub fn tag(&self) -> &'static str {
        match self {
            ConfigType::Molecule => "MoleculeConfiguration",
            ConfigType::Bulk => "BulkConfiguration",
        }
    }

    /// 分子构型非周期，其余类型周期
    pub fn is_periodic(&self) -> bool {
        !matches!(self, ConfigType::Molecule)
    }
}

impl std::fmt::Display for ConfigType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// 记录键：构型类型 + 三位数字 gID
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordKey {
    pub gid: u16,
    pub config_type: ConfigType,
}

impl RecordKey {
    pub fn new(config_type: ConfigType, gid: u16) -> Self {
        RecordKey { gid, config_type }
    }

    /// gID 渲染形式（三位零填充），指纹表按此字符串索引
    pub fn gid_label(&self) -> String {
        format!("gID{:03}", self.gid)
    }

    /// 构型变量名，如 "BulkConfiguration_gID000"
    pub fn configuration_variable(&self) -> String {
        format!("{}_{}", self.config_type.tag(), self.gid_label())
    }

    /// 计算器变量名，如 "BulkConfiguration_gID000_calculator"
    pub fn calculator_variable(&self) -> String {
        format!("{}_{}_calculator", self.config_type.tag(), self.gid_label())
    }
}

impl std::fmt::Display for RecordKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.config_type.tag(), self.gid_label())
    }
}

// ─────────────────────────────────────────────────────────────
// 能量分量
// ─────────────────────────────────────────────────────────────

/// 有标准名称的四个能量分量在容器里的组件名
pub const COMPONENT_KINETIC: &str = "Kinetic";
pub const COMPONENT_XC: &str = "Exchange-Correlation";
pub const COMPONENT_ELECTROSTATIC: &str = "Electrostatic";
pub const COMPONENT_ENTROPY: &str = "Entropy-Term";

/// 按指纹归并的能量分量 (eV)
///
/// 总能是所有已记录分量之和，无标准名称的分量同样计入总和。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnergyComponents {
    pub components: BTreeMap<String, f64>,
}

impl EnergyComponents {
    /// 所有分量的算术和
    pub fn total(&self) -> f64 {
        self.components.values().sum()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.components.get(name).copied()
    }

    pub fn kinetic(&self) -> Option<f64> {
        self.get(COMPONENT_KINETIC)
    }

    pub fn exchange_correlation(&self) -> Option<f64> {
        self.get(COMPONENT_XC)
    }

    pub fn electrostatic(&self) -> Option<f64> {
        self.get(COMPONENT_ELECTROSTATIC)
    }

    pub fn entropy_term(&self) -> Option<f64> {
        self.get(COMPONENT_ENTROPY)
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────
// 结果记录
// ─────────────────────────────────────────────────────────────

/// 归一化结果记录：每个发现的记录键输出一条
///
/// 构型、计算器与能量/力经由 gID → 指纹间接关联后在此汇合；
/// 关联缺失只导致相应字段为空，不产生错误。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultRecord {
    pub key: RecordKey,

    /// 关联指纹，缺失时能量/力为空
    pub fingerprint: Option<String>,

    /// 构型提取失败时为 None
    pub configuration: Option<ConfigurationRecord>,

    /// 计算器参数，字段可缺失但记录本身总是存在
    pub calculator: CalculatorRecord,

    /// 能量分量 (eV)
    pub energies: EnergyComponents,

    /// 每原子受力 (eV/Å)
    pub forces: Option<Vec<[f64; 3]>>,
}

impl ResultRecord {
    /// 最大受力范数 (eV/Å)
    pub fn max_force(&self) -> Option<f64> {
        let forces = self.forces.as_ref()?;
        forces
            .iter()
            .map(|f| (f[0] * f[0] + f[1] * f[1] + f[2] * f[2]).sqrt())
            .fold(None, |acc: Option<f64>, x| {
                Some(acc.map_or(x, |a| a.max(x)))
            })
    }
}
