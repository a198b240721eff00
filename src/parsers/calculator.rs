//! # 计算器脚本提取器
//!
//! 从计算器变量的内嵌脚本里提取数值方法参数。三个模式彼此独立，
//! 任何一个缺失都只让对应字段保持空，提取本身从不失败。
//!
//! ```text
//! electron_temperature=300.0*Kelvin
//! charge = 0.0
//! exchange_correlation = GGA.PBE
//! ```
//!
//! ## 依赖关系
//! - 被 `pipeline/` 使用
//! - 使用 `models/calculator.rs`

use crate::models::CalculatorRecord;
use regex::Regex;

/// 提取计算器参数记录
pub fn extract_calculator(text: &str) -> CalculatorRecord {
    let smearing_re = Regex::new(r"electron_temperature *= *([\d\.]+)").unwrap();
    let charge_re = Regex::new(r"charge *= *([\d\.]+)").unwrap();
    let xc_re = Regex::new(r"exchange_correlation *= *(\S+)").unwrap();

    CalculatorRecord {
        smearing_width: smearing_re
            .captures(text)
            .and_then(|caps| caps[1].parse().ok()),
        charge: charge_re.captures(text).and_then(|caps| caps[1].parse().ok()),
        exchange_correlation: xc_re.captures(text).map(|caps| caps[1].to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CALCULATOR_SCRIPT: &str = r#"
#----------------------------------------
# Exchange-Correlation
#----------------------------------------
exchange_correlation = GGA.PBE

numerical_accuracy_parameters = NumericalAccuracyParameters(
    electron_temperature=300.0*Kelvin,
    density_mesh_cutoff=75.0*Hartree,
    )

charge = 0.0

calculator = LCAOCalculator(
    exchange_correlation=exchange_correlation,
    numerical_accuracy_parameters=numerical_accuracy_parameters,
    charge=charge,
    )
"#;

    #[test]
    fn test_extract_all_parameters() {
        let record = extract_calculator(CALCULATOR_SCRIPT);

        assert_eq!(record.smearing_width, Some(300.0));
        assert_eq!(record.charge, Some(0.0));
        assert_eq!(record.exchange_correlation.as_deref(), Some("GGA.PBE"));
        assert_eq!(record.xc_functionals(), ["GGA_X_PBE", "GGA_C_PBE"]);
    }

    #[test]
    fn test_missing_parameters_stay_absent() {
        let record = extract_calculator("exchange_correlation = LDA.PZ\n");

        assert_eq!(record.smearing_width, None);
        assert_eq!(record.charge, None);
        assert_eq!(record.exchange_correlation.as_deref(), Some("LDA.PZ"));
        assert_eq!(record.xc_functionals(), ["LDA_X", "LDA_C_PZ"]);
    }

    #[test]
    fn test_empty_script_yields_empty_record() {
        let record = extract_calculator("");

        assert_eq!(record.smearing_width, None);
        assert_eq!(record.charge, None);
        assert_eq!(record.exchange_correlation, None);
        assert!(record.xc_functionals().is_empty());
    }

    #[test]
    fn test_unrecognized_functional_resolves_to_empty_list() {
        let record = extract_calculator("exchange_correlation = HSE06\n");

        assert_eq!(record.exchange_correlation.as_deref(), Some("HSE06"));
        assert!(record.xc_functionals().is_empty());
    }
}
