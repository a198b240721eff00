//! # 解析流水线
//!
//! 单个容器的完整解析：先建后冻（名称映射、指纹表、能量/力聚合
//! 都在记录级工作开始前一次建成，之后只读），再按 gID 升序逐键
//! 装配结果记录。记录级提取是单变量字节的纯函数，跨键并行执行。
//!
//! 只有容器本身不可访问才会让整个流水线失败；其余任何数据质量
//! 问题都被隔离到单条记录，以警告形式上报，流水线总是为每个发现
//! 的构型键产出一条记录。
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `parsers/`, `models/`, `netcdf/`

use crate::error::{AtkError, Result};
use crate::models::{RecordKey, ResultRecord};
use crate::netcdf::Container;
use crate::parsers::fingerprint::FingerprintTable;
use crate::parsers::{calculator, configuration, energy, names};
use rayon::prelude::*;
use std::path::Path;

/// 一个容器的解析产出
#[derive(Debug)]
pub struct ParseOutput {
    pub path: String,
    pub program_version: Option<String>,
    /// 结果记录，按 gID 升序
    pub records: Vec<ResultRecord>,
    pub warnings: Vec<String>,
}

/// 打开并解析一个容器文件
pub fn parse_file(path: &Path) -> Result<ParseOutput> {
    let container = Container::open(path)?;
    Ok(parse_container(&container))
}

/// 解析一个已冻结的容器视图
pub fn parse_container(container: &Container) -> ParseOutput {
    let maps = names::resolve(container.dimension_names());
    let fingerprints = FingerprintTable::from_attribute(container.attr_text("fingerprint_table"));
    let aggregated = energy::aggregate(container);

    let keys: Vec<RecordKey> = maps.configuration_keys().collect();

    // collect 保持键序，升序契约不受并行影响
    let results: Vec<(ResultRecord, Vec<String>)> = keys
        .par_iter()
        .map(|&key| assemble_record(container, &maps, &fingerprints, &aggregated, key))
        .collect();

    let mut warnings = aggregated.warnings.clone();
    let mut records = Vec::with_capacity(results.len());
    for (record, mut record_warnings) in results {
        warnings.append(&mut record_warnings);
        records.push(record);
    }

    ParseOutput {
        path: container.path().to_string(),
        program_version: container.attr_text("version").map(String::from),
        records,
        warnings,
    }
}

/// 单键装配：构型 + 计算器 + 经指纹间接关联的能量/力
fn assemble_record(
    container: &Container,
    maps: &names::NameMaps,
    fingerprints: &FingerprintTable,
    aggregated: &energy::EnergyForceMaps,
    key: RecordKey,
) -> (ResultRecord, Vec<String>) {
    let mut warnings = Vec::new();

    let configuration = match container.var_text(&key.configuration_variable()) {
        Some(text) => match configuration::extract_configuration(&text, key.config_type) {
            Ok(record) => Some(record),
            Err(e) => {
                warnings.push(e.to_string());
                None
            }
        },
        None => {
            warnings.push(
                AtkError::PatternNotFound {
                    pattern: key.configuration_variable(),
                    context: "container variables".to_string(),
                }
                .to_string(),
            );
            None
        }
    };

    let calculator = maps
        .calculator_key(key.gid)
        .and_then(|calc_key| container.var_text(&calc_key.calculator_variable()))
        .map(|text| calculator::extract_calculator(&text))
        .unwrap_or_default();

    let fingerprint = match fingerprints.get(&key.gid_label()) {
        Some(fp) => Some(fp.to_string()),
        None => {
            warnings.push(
                AtkError::CorrelationMiss {
                    key: key.gid_label(),
                    what: "fingerprint".to_string(),
                }
                .to_string(),
            );
            None
        }
    };

    let energies = fingerprint
        .as_deref()
        .and_then(|fp| aggregated.energies.get(fp))
        .cloned()
        .unwrap_or_default();
    let forces = fingerprint
        .as_deref()
        .and_then(|fp| aggregated.forces.get(fp))
        .cloned();

    (
        ResultRecord {
            key,
            fingerprint,
            configuration,
            calculator,
            energies,
            forces,
        },
        warnings,
    )
}
