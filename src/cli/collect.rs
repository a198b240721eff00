//! # collect 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/collect.rs`

use clap::Args;
use std::path::PathBuf;

/// collect 子命令参数
#[derive(Args, Debug)]
pub struct CollectArgs {
    /// Root directory (or single file) containing ATK NetCDF outputs
    pub input: PathBuf,

    /// Glob pattern for container files (comma separated, e.g. "*.nc,*.hdf")
    #[arg(long, default_value = "*.nc")]
    pub pattern: String,

    /// Recurse into subdirectories
    #[arg(long, default_value_t = false)]
    pub recursive: bool,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Number of top records to print in the energy ranking
    #[arg(long, default_value_t = 10)]
    pub top_n: usize,

    /// Filename for the combined CSV output
    #[arg(long, default_value = "atk_collected_results.csv")]
    pub output: PathBuf,
}
