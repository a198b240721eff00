//! # atkread - ATK NetCDF 输出提取工具
//!
//! 读取 ATK 原子级模拟包产生的 NetCDF 输出容器，把散落在扁平
//! 变量命名空间里的构型、计算器参数与能量/力重建为归一化记录。
//!
//! ## 子命令
//! - `extract` - 从单个容器提取归一化记录
//! - `inspect` - 查看容器的维度/变量/全局属性
//! - `collect` - 收集目录下所有容器的记录并排序汇总
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── pipeline/  (逐容器解析流水线)
//!   │     ├── parsers/   (命名约定/指纹/脚本/能量提取器)
//!   │     ├── netcdf/    (容器只读视图)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod cli;
mod commands;
mod error;
mod models;
mod netcdf;
mod parsers;
mod pipeline;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
