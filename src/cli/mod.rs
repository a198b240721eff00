//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `extract`: 从单个容器提取归一化记录
//! - `inspect`: 查看容器的维度/变量/全局属性
//! - `collect`: 收集目录下所有容器的记录并排序汇总
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: extract, inspect, collect

pub mod collect;
pub mod extract;
pub mod inspect;

use clap::{Parser, Subcommand};

/// atkread - ATK NetCDF 输出提取工具
#[derive(Parser)]
#[command(name = "atkread")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "An extraction toolkit for ATK NetCDF output files", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Extract normalized records from an ATK NetCDF output file
    Extract(extract::ExtractArgs),

    /// Inspect dimensions, variables and global attributes of a container
    Inspect(inspect::InspectArgs),

    /// Collect and rank records from all containers under a directory
    Collect(collect::CollectArgs),
}
