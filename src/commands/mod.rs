//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `pipeline/`, `parsers/`, `models/`, `utils/`
//! - 子模块: extract, inspect, collect

pub mod collect;
pub mod extract;
pub mod inspect;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Extract(args) => extract::execute(args),
        Commands::Inspect(args) => inspect::execute(args),
        Commands::Collect(args) => collect::execute(args),
    }
}
