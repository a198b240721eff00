//! # collect 命令实现
//!
//! 扫描目录下的所有 ATK 容器，并行解析，按总能排序汇总。
//!
//! ## 功能
//! - glob 模式匹配与递归目录搜索
//! - 跨文件并行解析（逐文件隔离失败）
//! - 终端排名表 + 合并 CSV 输出
//!
//! ## 依赖关系
//! - 使用 `cli/collect.rs` 定义的参数
//! - 使用 `pipeline/`, `models/`
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::cli::collect::CollectArgs;
use crate::error::{AtkError, Result};
use crate::models::ResultRecord;
use crate::pipeline::{self, ParseOutput};
use crate::utils::{output, progress};

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tabled::{Table, Tabled};
use walkdir::WalkDir;

/// 排名表行
#[derive(Debug, Clone, Tabled)]
struct RankRow {
    #[tabled(rename = "Rank")]
    rank: usize,
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "gID")]
    gid: String,
    #[tabled(rename = "Formula")]
    formula: String,
    #[tabled(rename = "E_total (eV)")]
    e_total: String,
    #[tabled(rename = "ΔE (eV)")]
    delta_e: String,
}

/// 汇总条目：文件 + 单条结果记录
struct CollectedEntry {
    path: String,
    record: ResultRecord,
}

impl CollectedEntry {
    /// 排序键：没有能量数据的记录排在最后
    fn sort_energy(&self) -> f64 {
        if self.record.energies.is_empty() {
            f64::INFINITY
        } else {
            self.record.energies.total()
        }
    }
}

/// 执行 collect 命令
pub fn execute(args: CollectArgs) -> Result<()> {
    output::print_header("Collecting ATK Results");

    if !args.input.exists() {
        return Err(AtkError::DirectoryNotFound {
            path: args.input.display().to_string(),
        });
    }

    let files = collect_input_files(&args.input, &args.pattern, args.recursive)?;
    if files.is_empty() {
        return Err(AtkError::NoFilesFound {
            pattern: args.pattern.clone(),
        });
    }
    output::print_info(&format!("Found {} container file(s)", files.len()));

    let num_threads = if args.jobs == 0 {
        num_cpus::get()
    } else {
        args.jobs
    };

    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
        .ok();

    let pb = progress::create_progress_bar(files.len() as u64, "Parsing");
    let success_count = AtomicUsize::new(0);

    let outputs: Vec<ParseOutput> = files
        .par_iter()
        .filter_map(|path| {
            let parsed = match pipeline::parse_file(path) {
                Ok(parsed) => {
                    success_count.fetch_add(1, Ordering::SeqCst);
                    Some(parsed)
                }
                Err(e) => {
                    pb.suspend(|| {
                        output::print_error(&format!("{}: {}", path.display(), e));
                    });
                    None
                }
            };
            pb.inc(1);
            parsed
        })
        .collect();

    pb.finish_and_clear();

    let mut entries: Vec<CollectedEntry> = Vec::new();
    for parsed in outputs {
        for warning in &parsed.warnings {
            output::print_warning(&format!("{}: {}", parsed.path, warning));
        }
        for record in parsed.records {
            entries.push(CollectedEntry {
                path: parsed.path.clone(),
                record,
            });
        }
    }

    if entries.is_empty() {
        output::print_warning("No records found in any container.");
        return Ok(());
    }

    output::print_info(&format!(
        "Collected {} record(s) from {} container(s)",
        entries.len(),
        success_count.load(Ordering::SeqCst)
    ));

    // 按总能升序排序
    entries.sort_by(|a, b| {
        a.sort_energy()
            .partial_cmp(&b.sort_energy())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let min_energy = entries
        .iter()
        .map(|e| e.sort_energy())
        .find(|e| e.is_finite())
        .unwrap_or(0.0);

    output::print_header(&format!(
        "Top {} Records by Total Energy",
        args.top_n.min(entries.len())
    ));

    let rows: Vec<RankRow> = entries
        .iter()
        .take(args.top_n)
        .enumerate()
        .map(|(i, entry)| {
            let has_energy = !entry.record.energies.is_empty();
            let total = entry.record.energies.total();
            RankRow {
                rank: i + 1,
                file: entry.path.clone(),
                gid: entry.record.key.gid_label(),
                formula: entry
                    .record
                    .configuration
                    .as_ref()
                    .map(|c| c.formula())
                    .unwrap_or_else(|| "-".to_string()),
                e_total: if has_energy {
                    format!("{:.6}", total)
                } else {
                    "-".to_string()
                },
                delta_e: if has_energy {
                    format!("{:.6}", total - min_energy)
                } else {
                    "-".to_string()
                },
            }
        })
        .collect();

    println!("{}", Table::new(&rows));

    save_collected_csv(&entries, &args.output)?;
    output::print_success(&format!(
        "Full ranking saved to '{}'",
        args.output.display()
    ));

    output::print_done(&format!(
        "Collected {} record(s) into '{}'",
        entries.len(),
        args.output.display()
    ));

    Ok(())
}

/// 收集输入文件：单文件直接用，目录按模式匹配
fn collect_input_files(input: &Path, pattern: &str, recursive: bool) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }

    let patterns: Vec<glob::Pattern> = pattern
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| {
            glob::Pattern::new(p)
                .map_err(|e| AtkError::Other(format!("Invalid pattern '{}': {}", p, e)))
        })
        .collect::<Result<Vec<_>>>()?;

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut files: Vec<PathBuf> = WalkDir::new(input)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            let name = entry.file_name().to_string_lossy();
            patterns.iter().any(|p| p.matches(&name))
        })
        .map(|entry| entry.path().to_path_buf())
        .collect();

    files.sort();
    Ok(files)
}

/// 保存合并结果到 CSV
fn save_collected_csv(entries: &[CollectedEntry], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path).map_err(AtkError::CsvError)?;

    wtr.write_record([
        "rank",
        "file",
        "gid",
        "config_type",
        "formula",
        "num_atoms",
        "e_total_eV",
        "e_per_atom_eV",
    ])
    .map_err(AtkError::CsvError)?;

    for (i, entry) in entries.iter().enumerate() {
        let configuration = entry.record.configuration.as_ref();
        let num_atoms = configuration.map(|c| c.num_atoms()).unwrap_or(0);
        let has_energy = !entry.record.energies.is_empty();
        let total = entry.record.energies.total();

        wtr.write_record([
            (i + 1).to_string(),
            entry.path.clone(),
            entry.record.key.gid_label(),
            entry.record.key.config_type.tag().to_string(),
            configuration.map(|c| c.formula()).unwrap_or_default(),
            if num_atoms > 0 {
                num_atoms.to_string()
            } else {
                String::new()
            },
            if has_energy {
                format!("{:.10}", total)
            } else {
                String::new()
            },
            if has_energy && num_atoms > 0 {
                format!("{:.10}", total / num_atoms as f64)
            } else {
                String::new()
            },
        ])
        .map_err(AtkError::CsvError)?;
    }

    wtr.flush().map_err(|e| AtkError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}
