//! # inspect 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/inspect.rs`

use clap::Args;
use std::path::PathBuf;

/// inspect 子命令参数
///
/// 不指定任何区段开关时全部打印。
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Path to the ATK NetCDF output file (.nc)
    pub input: PathBuf,

    /// List dimensions only
    #[arg(long, default_value_t = false)]
    pub dimensions: bool,

    /// List variables only
    #[arg(long, default_value_t = false)]
    pub variables: bool,

    /// List global attributes (incl. the decoded fingerprint table) only
    #[arg(long, default_value_t = false)]
    pub attributes: bool,
}
