//! # 解析器模块
//!
//! 容器内容的各路提取器：命名约定解析、指纹关联表、
//! 内嵌脚本的构型/计算器提取、能量与力的聚合。
//!
//! ## 依赖关系
//! - 被 `pipeline/` 和 `commands/` 使用
//! - 使用 `models/`, `netcdf/`
//! - 子模块: names, fingerprint, units, configuration, calculator, energy

pub mod calculator;
pub mod configuration;
pub mod energy;
pub mod fingerprint;
pub mod names;
pub mod units;
