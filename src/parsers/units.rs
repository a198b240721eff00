//! # 单位字面量解析
//!
//! 解析脚本里 `<数值>` 或 `<数值>*<单位名>` 形式的字面量，
//! 输出以 Å 表示的量值。单位名大小写不敏感。
//!
//! ## 依赖关系
//! - 被 `parsers/configuration.rs` 使用
//! - 使用 `error.rs`

use crate::error::{AtkError, Result};

/// 1 Bohr = 0.529177210903 Å
const BOHR_IN_ANGSTROM: f64 = 0.529177210903;

/// 解析单位字面量为 Å 量值
///
/// 数值部分不可解析是硬错误，由调用方决定如何隔离；
/// 未识别的单位后缀按已是 Å 处理。
pub fn resolve_unit(token: &str) -> Result<f64> {
    let parts: Vec<&str> = token.split('*').collect();
    let parse = |s: &str| {
        s.trim().parse::<f64>().map_err(|_| AtkError::UnitParseError {
            token: token.to_string(),
        })
    };

    if parts.len() == 2 {
        let magnitude = parse(parts[0])?;
        Ok(magnitude * unit_factor(parts[1].trim()))
    } else {
        parse(parts[0])
    }
}

fn unit_factor(unit: &str) -> f64 {
    match unit.to_lowercase().as_str() {
        "angstrom" => 1.0,
        "bohr" => BOHR_IN_ANGSTROM,
        // 脚本里温度与长度字面量共用一套语法，Kelvin 数值按原样传递
        "kelvin" => 1.0,
        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angstrom_token() {
        assert!((resolve_unit("5.43*Angstrom").unwrap() - 5.43).abs() < 1e-12);
    }

    #[test]
    fn test_bohr_token_converts() {
        assert!((resolve_unit("2*Bohr").unwrap() - 2.0 * BOHR_IN_ANGSTROM).abs() < 1e-12);
    }

    #[test]
    fn test_unit_is_case_insensitive() {
        assert!((resolve_unit("1*BOHR").unwrap() - BOHR_IN_ANGSTROM).abs() < 1e-12);
        assert!((resolve_unit("1*angstrom").unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_kelvin_passes_magnitude_through() {
        assert!((resolve_unit("300*Kelvin").unwrap() - 300.0).abs() < 1e-12);
    }

    #[test]
    fn test_bare_number_is_angstrom() {
        assert!((resolve_unit("3.5").unwrap() - 3.5).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_unit_keeps_magnitude() {
        assert!((resolve_unit("90*Degrees").unwrap() - 90.0).abs() < 1e-12);
    }

    #[test]
    fn test_non_numeric_magnitude_is_error() {
        assert!(matches!(
            resolve_unit("x*Angstrom"),
            Err(AtkError::UnitParseError { .. })
        ));
        assert!(matches!(
            resolve_unit("5.4.3*Angstrom"),
            Err(AtkError::UnitParseError { .. })
        ));
    }
}
