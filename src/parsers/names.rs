//! # 命名约定解析器
//!
//! 从容器维度名推导记录键：
//! `<标签>_gID<三位数字>_dimension` 指向构型变量，
//! `<标签>_gID<三位数字>_calculator_dimension` 指向计算器变量。
//! 两类映射都按 gID 数字索引；不匹配任何约定的维度名被忽略。
//!
//! ## 依赖关系
//! - 被 `pipeline/` 使用
//! - 使用 `models/record.rs`

use crate::models::{ConfigType, RecordKey};
use regex::Regex;
use std::collections::BTreeMap;

/// 记录键 → 变量名的两类映射
///
/// 同一 gID 被多个维度名命中属于数据错误，此处保持
/// 后匹配静默覆盖前者的既有行为。空映射表示容器中没有构型。
#[derive(Debug, Default)]
pub struct NameMaps {
    configurations: BTreeMap<u16, RecordKey>,
    calculators: BTreeMap<u16, RecordKey>,
}

impl NameMaps {
    /// 构型记录键，按 gID 升序
    pub fn configuration_keys(&self) -> impl Iterator<Item = RecordKey> + '_ {
        self.configurations.values().copied()
    }

    pub fn calculator_key(&self, gid: u16) -> Option<RecordKey> {
        self.calculators.get(&gid).copied()
    }

    pub fn len(&self) -> usize {
        self.configurations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configurations.is_empty()
    }
}

/// 扫描维度名，建立记录键映射
pub fn resolve<'a>(dimension_names: impl IntoIterator<Item = &'a str>) -> NameMaps {
    let patterns: Vec<(ConfigType, Regex, Regex)> = ConfigType::ALL
        .iter()
        .map(|&config_type| {
            let tag = config_type.tag();
            let conf = Regex::new(&format!(r"^{}_gID(\d{{3}})_dimension$", tag)).unwrap();
            let calc =
                Regex::new(&format!(r"^{}_gID(\d{{3}})_calculator_dimension$", tag)).unwrap();
            (config_type, conf, calc)
        })
        .collect();

    let mut maps = NameMaps::default();
    for name in dimension_names {
        for (config_type, conf_re, calc_re) in &patterns {
            if let Some(caps) = calc_re.captures(name) {
                if let Ok(gid) = caps[1].parse::<u16>() {
                    maps.calculators.insert(gid, RecordKey::new(*config_type, gid));
                }
            } else if let Some(caps) = conf_re.captures(name) {
                if let Ok(gid) = caps[1].parse::<u16>() {
                    maps.configurations.insert(gid, RecordKey::new(*config_type, gid));
                }
            }
        }
    }
    maps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_bulk_configuration_dimension() {
        let maps = resolve(["BulkConfiguration_gID002_dimension"]);

        assert_eq!(maps.len(), 1);
        let key = maps.configuration_keys().next().unwrap();
        assert_eq!(key.gid, 2);
        assert_eq!(key.config_type, ConfigType::Bulk);
        assert_eq!(key.configuration_variable(), "BulkConfiguration_gID002");
    }

    #[test]
    fn test_resolve_calculator_dimension() {
        let maps = resolve([
            "MoleculeConfiguration_gID000_dimension",
            "MoleculeConfiguration_gID000_calculator_dimension",
        ]);

        assert_eq!(maps.len(), 1);
        let calc = maps.calculator_key(0).unwrap();
        assert_eq!(
            calc.calculator_variable(),
            "MoleculeConfiguration_gID000_calculator"
        );
    }

    #[test]
    fn test_unrelated_dimensions_are_ignored() {
        let maps = resolve([
            "atom_resolved_forces_dimension",
            "BulkConfiguration_gID12_dimension",  // 两位数字不符合约定
            "BulkConfiguration_gID0003_dimension", // 四位数字不符合约定
        ]);

        assert!(maps.is_empty());
        assert!(maps.calculator_key(12).is_none());
    }

    #[test]
    fn test_no_matches_yield_empty_maps() {
        let maps = resolve(std::iter::empty::<&str>());
        assert!(maps.is_empty());
        assert_eq!(maps.configuration_keys().count(), 0);
    }

    #[test]
    fn test_same_gid_later_tag_overwrites() {
        let maps = resolve([
            "MoleculeConfiguration_gID001_dimension",
            "BulkConfiguration_gID001_dimension",
        ]);

        // 同一 gID 两种标签：后匹配的维度名静默覆盖
        assert_eq!(maps.len(), 1);
        let key = maps.configuration_keys().next().unwrap();
        assert_eq!(key.config_type, ConfigType::Bulk);
    }

    #[test]
    fn test_keys_iterate_in_ascending_gid_order() {
        let maps = resolve([
            "BulkConfiguration_gID002_dimension",
            "BulkConfiguration_gID000_dimension",
            "MoleculeConfiguration_gID001_dimension",
        ]);

        let gids: Vec<u16> = maps.configuration_keys().map(|k| k.gid).collect();
        assert_eq!(gids, [0, 1, 2]);
    }
}
