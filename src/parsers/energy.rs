//! # 能量/力聚合器
//!
//! 扫描整个变量命名空间，把逐记录的能量分量和力数组按指纹归并。
//! 能量分量变量与对应指纹变量之间没有显式外键，只靠命名约定关联：
//!
//! ```text
//! TotalEnergy_gID000_component_Kinetic      标量分量 (eV)
//! TotalEnergy_gID000_finger_print           指纹字符串
//! Forces_gID000_atom_resolved_forces        每原子力 (eV/Å)
//! ```
//!
//! 注意：力变量的指纹同样取自 `TotalEnergy_` 前缀的指纹变量，
//! 这是命名约定的跨前缀引用，按原样保留。
//!
//! ## 依赖关系
//! - 被 `pipeline/` 使用
//! - 使用 `models/record.rs`, `netcdf/`

use crate::error::AtkError;
use crate::models::EnergyComponents;
use crate::netcdf::Container;
use regex::Regex;
use std::collections::HashMap;

/// 指纹 → 能量分量 / 力数组
#[derive(Debug, Default)]
pub struct EnergyForceMaps {
    pub energies: HashMap<String, EnergyComponents>,
    pub forces: HashMap<String, Vec<[f64; 3]>>,
    pub warnings: Vec<String>,
}

/// 单趟扫描变量命名空间
///
/// 指纹变量缺失的能量/力贡献被静默丢弃（只记一条警告），
/// 不重试也不报错。
pub fn aggregate(container: &Container) -> EnergyForceMaps {
    let energy_re = Regex::new(r"^TotalEnergy_(gID\d+)_component_(\S+)").unwrap();
    let forces_re = Regex::new(r"^Forces_(gID\d+)_atom_resolved_forces").unwrap();

    let mut maps = EnergyForceMaps::default();

    for var in container.variables() {
        if let Some(caps) = energy_re.captures(&var.name) {
            let gid = caps[1].to_string();
            let component = caps[2].to_string();

            let fingerprint = match sibling_fingerprint(container, &gid) {
                Some(fp) => fp,
                None => {
                    maps.warnings.push(
                        AtkError::CorrelationMiss {
                            key: gid,
                            what: "fingerprint variable".to_string(),
                        }
                        .to_string(),
                    );
                    continue;
                }
            };

            let value = match container.var_scalar(&var.name) {
                Some(value) => value,
                None => {
                    maps.warnings
                        .push(format!("Energy component '{}' has no scalar payload", var.name));
                    continue;
                }
            };

            maps.energies
                .entry(fingerprint)
                .or_default()
                .components
                .insert(component, value);
        } else if let Some(caps) = forces_re.captures(&var.name) {
            let gid = caps[1].to_string();

            let fingerprint = match sibling_fingerprint(container, &gid) {
                Some(fp) => fp,
                None => {
                    maps.warnings.push(
                        AtkError::CorrelationMiss {
                            key: gid,
                            what: "fingerprint variable".to_string(),
                        }
                        .to_string(),
                    );
                    continue;
                }
            };

            if let Some((_, values)) = container.var_numeric(&var.name) {
                let force_array: Vec<[f64; 3]> = values
                    .chunks_exact(3)
                    .map(|c| [c[0], c[1], c[2]])
                    .collect();
                maps.forces.insert(fingerprint, force_array);
            }
        }
    }

    maps
}

/// 指纹变量总是 TotalEnergy_ 前缀，力记录也一样
fn sibling_fingerprint(container: &Container, gid: &str) -> Option<String> {
    container.var_text(&format!("TotalEnergy_{}_finger_print", gid))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_container() -> Container {
        let mut c = Container::in_memory("test.nc");
        c.add_scalar_variable("TotalEnergy_gID000_component_Kinetic", 10.0);
        c.add_scalar_variable("TotalEnergy_gID000_component_Exchange-Correlation", -4.0);
        c.add_scalar_variable("TotalEnergy_gID000_component_Electrostatic", -1.5);
        c.add_text_variable("TotalEnergy_gID000_finger_print", "fpA");
        c.add_numeric_variable(
            "Forces_gID000_atom_resolved_forces",
            vec![2, 3],
            vec![0.0, 0.0, 0.1, 0.0, 0.0, -0.1],
        );
        c
    }

    #[test]
    fn test_components_grouped_by_fingerprint() {
        let maps = aggregate(&sample_container());

        let energies = maps.energies.get("fpA").unwrap();
        assert_eq!(energies.components.len(), 3);
        assert_eq!(energies.kinetic(), Some(10.0));
        assert_eq!(energies.exchange_correlation(), Some(-4.0));
        assert!((energies.total() - 4.5).abs() < 1e-12);
        assert!(maps.warnings.is_empty());
    }

    #[test]
    fn test_forces_grouped_via_total_energy_fingerprint() {
        let maps = aggregate(&sample_container());

        let forces = maps.forces.get("fpA").unwrap();
        assert_eq!(forces.len(), 2);
        assert!((forces[0][2] - 0.1).abs() < 1e-12);
        assert!((forces[1][2] + 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_missing_fingerprint_variable_drops_contribution() {
        let mut c = Container::in_memory("test.nc");
        c.add_scalar_variable("TotalEnergy_gID001_component_Kinetic", 2.0);
        c.add_numeric_variable(
            "Forces_gID001_atom_resolved_forces",
            vec![1, 3],
            vec![0.0, 0.0, 0.0],
        );

        let maps = aggregate(&c);

        assert!(maps.energies.is_empty());
        assert!(maps.forces.is_empty());
        assert_eq!(maps.warnings.len(), 2);
    }

    #[test]
    fn test_unmapped_component_names_still_contribute() {
        let mut c = Container::in_memory("test.nc");
        c.add_scalar_variable("TotalEnergy_gID000_component_Kinetic", 1.0);
        c.add_scalar_variable("TotalEnergy_gID000_component_External-Field", 0.25);
        c.add_text_variable("TotalEnergy_gID000_finger_print", "fpX");

        let maps = aggregate(&c);
        let energies = maps.energies.get("fpX").unwrap();

        assert_eq!(energies.get("External-Field"), Some(0.25));
        assert!((energies.total() - 1.25).abs() < 1e-12);
    }

    #[test]
    fn test_multiple_gids_keep_separate_fingerprints() {
        let mut c = sample_container();
        c.add_scalar_variable("TotalEnergy_gID001_component_Kinetic", 7.0);
        c.add_text_variable("TotalEnergy_gID001_finger_print", "fpB");

        let maps = aggregate(&c);

        assert_eq!(maps.energies.len(), 2);
        assert_eq!(maps.energies.get("fpB").unwrap().kinetic(), Some(7.0));
    }

    #[test]
    fn test_unrelated_variables_are_ignored() {
        let mut c = Container::in_memory("test.nc");
        c.add_text_variable("BulkConfiguration_gID000", "elements = [ Silicon ]");
        c.add_scalar_variable("SomeOtherQuantity_gID000", 1.0);

        let maps = aggregate(&c);
        assert!(maps.energies.is_empty());
        assert!(maps.forces.is_empty());
        assert!(maps.warnings.is_empty());
    }
}
