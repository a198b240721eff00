//! # 数据模型模块
//!
//! 定义从 ATK NetCDF 容器中重建的归一化记录模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `pipeline/`, `commands/` 使用
//! - 子模块: record, structure, calculator, elements

pub mod calculator;
pub mod elements;
pub mod record;
pub mod structure;

pub use calculator::CalculatorRecord;
pub use record::{ConfigType, EnergyComponents, RecordKey, ResultRecord};
pub use structure::{ConfigurationRecord, Lattice};
