//! # extract 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/extract.rs`

use clap::Args;
use std::path::PathBuf;

/// extract 子命令参数
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Path to the ATK NetCDF output file (.nc)
    pub input: PathBuf,

    /// Filename for the per-record CSV output
    #[arg(long)]
    pub output_csv: Option<PathBuf>,

    /// Print atomic positions of each record
    #[arg(long, default_value_t = false)]
    pub positions: bool,

    /// Print per-atom forces of each record
    #[arg(long, default_value_t = false)]
    pub forces: bool,
}
