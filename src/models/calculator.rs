//! # 计算器参数数据模型
//!
//! 定义从计算器脚本提取的数值方法参数，以及交换关联泛函键
//! 到标准泛函名的静态映射。
//!
//! ## 依赖关系
//! - 被 `parsers/calculator.rs` 和 `pipeline/` 使用
//! - 无外部模块依赖

use serde::{Deserialize, Serialize};

/// 计算器参数记录
///
/// 提取永不失败：缺失的参数保持 None。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalculatorRecord {
    /// 展宽宽度（电子温度，K）
    pub smearing_width: Option<f64>,

    /// 总电荷
    pub charge: Option<f64>,

    /// 交换关联泛函键，如 "GGA.PBE"
    pub exchange_correlation: Option<String>,
}

impl CalculatorRecord {
    /// 泛函键解析出的标准泛函名列表，未识别的键得到空表
    pub fn xc_functionals(&self) -> &'static [&'static str] {
        self.exchange_correlation
            .as_deref()
            .map(xc_functional_names)
            .unwrap_or(&[])
    }
}

/// 方法族泛函键 → 标准泛函名
pub fn xc_functional_names(key: &str) -> &'static [&'static str] {
    match key {
        "LDA.RPA" => &["LDA_X", "LDA_C_RPA"],
        "LDA.PZ" => &["LDA_X", "LDA_C_PZ"],
        "LDA.PW" => &["LDA_X", "LDA_C_PW"],
        "GGA.PW91" => &["GGA_X_PW91", "GGA_C_PW91"],
        "GGA.PBE" => &["GGA_X_PBE", "GGA_C_PBE"],
        "GGA.PBES" => &["GGA_X_PBE_SOL", "GGA_C_PBE_SOL"],
        "GGA.RPBE" => &["GGA_X_RPBE", "GGA_C_PBE"],
        "BLYP" => &["GGA_X_B88", "GGA_C_LYP"],
        "HCTH407" => &["GGA_XC_HCTH_407"],
        "WC" => &["GGA_X_WC", "GGA_C_PBE"],
        "AM05" => &["GGA_X_AM05", "GGA_C_AM05"],
        "mBEEF" => &["MGGA_X_MBEEF", "GGA_C_PBE_SOL"],
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xc_map_pbe() {
        assert_eq!(xc_functional_names("GGA.PBE"), ["GGA_X_PBE", "GGA_C_PBE"]);
    }

    #[test]
    fn test_xc_map_single_entry() {
        assert_eq!(xc_functional_names("HCTH407"), ["GGA_XC_HCTH_407"]);
    }

    #[test]
    fn test_xc_map_unknown_is_empty() {
        assert!(xc_functional_names("GGA.UNKNOWN").is_empty());
    }

    #[test]
    fn test_record_without_xc_resolves_empty() {
        let record = CalculatorRecord::default();
        assert!(record.xc_functionals().is_empty());
        assert!(record.smearing_width.is_none());
        assert!(record.charge.is_none());
    }

    #[test]
    fn test_record_xc_resolution() {
        let record = CalculatorRecord {
            smearing_width: Some(300.0),
            charge: Some(0.0),
            exchange_correlation: Some("LDA.PZ".to_string()),
        };
        assert_eq!(record.xc_functionals(), ["LDA_X", "LDA_C_PZ"]);
    }
}
