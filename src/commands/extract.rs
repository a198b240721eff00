//! # extract 命令实现
//!
//! 解析单个 ATK 容器，打印记录摘要表，按需导出 CSV。
//!
//! ## 依赖关系
//! - 使用 `cli/extract.rs` 定义的参数
//! - 使用 `pipeline/`, `models/`
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::cli::extract::ExtractArgs;
use crate::error::{AtkError, Result};
use crate::models::ResultRecord;
use crate::pipeline;
use crate::utils::{output, progress};

use std::path::Path;
use tabled::{Table, Tabled};

/// 记录摘要行
#[derive(Debug, Clone, Tabled)]
struct RecordRow {
    #[tabled(rename = "gID")]
    gid: String,
    #[tabled(rename = "Type")]
    config_type: String,
    #[tabled(rename = "Formula")]
    formula: String,
    #[tabled(rename = "Atoms")]
    atoms: String,
    #[tabled(rename = "Cell a/b/c (Å)")]
    cell: String,
    #[tabled(rename = "XC")]
    xc: String,
    #[tabled(rename = "E_total (eV)")]
    e_total: String,
    #[tabled(rename = "F_max (eV/Å)")]
    f_max: String,
}

/// 执行 extract 命令
pub fn execute(args: ExtractArgs) -> Result<()> {
    output::print_header("Extracting ATK Records");

    if !args.input.exists() {
        return Err(AtkError::FileNotFound {
            path: args.input.display().to_string(),
        });
    }

    let spinner = progress::create_spinner("Reading container");
    let parsed = pipeline::parse_file(&args.input);
    spinner.finish_and_clear();
    let parsed = parsed?;

    if let Some(version) = &parsed.program_version {
        output::print_info(&format!("Program version: {}", version));
    }
    for warning in &parsed.warnings {
        output::print_warning(warning);
    }

    if parsed.records.is_empty() {
        output::print_warning("No configuration records found in container.");
        return Ok(());
    }

    output::print_info(&format!("Found {} record(s)", parsed.records.len()));

    let rows: Vec<RecordRow> = parsed.records.iter().map(record_row).collect();
    println!("{}", Table::new(&rows));

    if args.positions {
        print_positions(&parsed.records);
    }
    if args.forces {
        print_forces(&parsed.records);
    }

    if let Some(csv_path) = &args.output_csv {
        save_records_csv(&parsed.records, csv_path)?;
        output::print_success(&format!("Records saved to '{}'", csv_path.display()));
    }

    output::print_done(&format!(
        "Extracted {} record(s) from '{}'",
        parsed.records.len(),
        args.input.display()
    ));

    Ok(())
}

fn record_row(record: &ResultRecord) -> RecordRow {
    let (formula, atoms, cell) = match &record.configuration {
        Some(configuration) => (
            configuration.formula(),
            configuration.num_atoms().to_string(),
            match &configuration.lattice {
                Some(lattice) => {
                    let (a, b, c, _, _, _) = lattice.parameters();
                    format!("{:.4}/{:.4}/{:.4}", a, b, c)
                }
                None => "-".to_string(),
            },
        ),
        None => ("-".to_string(), "-".to_string(), "-".to_string()),
    };

    RecordRow {
        gid: record.key.gid_label(),
        config_type: record.key.config_type.tag().to_string(),
        formula,
        atoms,
        cell,
        xc: record
            .calculator
            .exchange_correlation
            .clone()
            .unwrap_or_else(|| "-".to_string()),
        e_total: if record.energies.is_empty() {
            "-".to_string()
        } else {
            format!("{:.6}", record.energies.total())
        },
        f_max: record
            .max_force()
            .map(|f| format!("{:.6}", f))
            .unwrap_or_else(|| "-".to_string()),
    }
}

fn print_positions(records: &[ResultRecord]) {
    for record in records {
        let Some(configuration) = &record.configuration else {
            continue;
        };
        let Some(positions) = &configuration.positions else {
            continue;
        };

        output::print_header(&format!("Positions (Å): {}", record.key));
        for (element, p) in configuration.elements.iter().zip(positions) {
            println!("{:<4} {:16.10} {:16.10} {:16.10}", element, p[0], p[1], p[2]);
        }
    }
}

fn print_forces(records: &[ResultRecord]) {
    for record in records {
        let Some(forces) = &record.forces else {
            continue;
        };

        output::print_header(&format!("Forces (eV/Å): {}", record.key));
        for (i, f) in forces.iter().enumerate() {
            println!("{:<4} {:16.10} {:16.10} {:16.10}", i, f[0], f[1], f[2]);
        }
    }
}

/// 保存记录到 CSV
fn save_records_csv(records: &[ResultRecord], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path).map_err(AtkError::CsvError)?;

    wtr.write_record([
        "gid",
        "config_type",
        "formula",
        "num_atoms",
        "fingerprint",
        "xc_key",
        "xc_functionals",
        "smearing_width_K",
        "charge",
        "cell_volume_A3",
        "e_total_eV",
        "e_kinetic_eV",
        "e_xc_eV",
        "e_electrostatic_eV",
        "e_entropy_eV",
        "f_max_eV_per_A",
    ])
    .map_err(AtkError::CsvError)?;

    let fmt = |value: Option<f64>| value.map(|v| format!("{:.10}", v)).unwrap_or_default();

    for record in records {
        let configuration = record.configuration.as_ref();
        wtr.write_record([
            record.key.gid_label(),
            record.key.config_type.tag().to_string(),
            configuration.map(|c| c.formula()).unwrap_or_default(),
            configuration
                .map(|c| c.num_atoms().to_string())
                .unwrap_or_default(),
            record.fingerprint.clone().unwrap_or_default(),
            record
                .calculator
                .exchange_correlation
                .clone()
                .unwrap_or_default(),
            record.calculator.xc_functionals().join(";"),
            fmt(record.calculator.smearing_width),
            fmt(record.calculator.charge),
            fmt(configuration
                .and_then(|c| c.lattice.as_ref())
                .map(|l| l.volume().abs())),
            if record.energies.is_empty() {
                String::new()
            } else {
                format!("{:.10}", record.energies.total())
            },
            fmt(record.energies.kinetic()),
            fmt(record.energies.exchange_correlation()),
            fmt(record.energies.electrostatic()),
            fmt(record.energies.entropy_term()),
            fmt(record.max_force()),
        ])
        .map_err(AtkError::CsvError)?;
    }

    wtr.flush().map_err(|e| AtkError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}
