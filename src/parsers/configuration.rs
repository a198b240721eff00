//! # 构型脚本提取器
//!
//! 把构型变量里内嵌的脚本文本解码为结构化的原子构型记录。
//! 脚本从不当作代码执行，只用固定的文本模式提取：
//!
//! ```text
//! elements = [Silicon, Silicon]
//! fractional_coordinates = [[0., 0., 0.], [0.25, 0.25, 0.25]]
//! velocities = [[vx, vy, vz], ...]
//! lattice = FaceCenteredCubic(5.4306*Angstrom)
//! ```
//!
//! 元素列表缺失（或含未知元素名）是不可恢复失败；坐标、速度、
//! 晶格都按尽力而为处理，缺失只得到部分记录。
//!
//! ## 依赖关系
//! - 被 `pipeline/` 使用
//! - 使用 `models/`, `parsers/units.rs`

use crate::error::{AtkError, Result};
use crate::models::elements::{symbol_for_name, title_case};
use crate::models::{ConfigType, ConfigurationRecord, Lattice};
use crate::parsers::units;
use regex::Regex;

/// 数值词法：可选符号、数字、小数点、指数标记
const RE_FLOAT: &str = r"[\d\.\-\+Ee]+";

/// 提取一个构型记录
///
/// 周期性由构型类型标签决定：分子构型非周期且不做晶格提取，
/// 其余类型周期。晶格名未识别时记录保留但晶格缺失，
/// 周期性标志仍然为真（既有行为，保持原样）。
pub fn extract_configuration(text: &str, config_type: ConfigType) -> Result<ConfigurationRecord> {
    let elements_re = Regex::new(r"elements = \[(.+)\]").unwrap();
    let caps = elements_re
        .captures(text)
        .ok_or_else(|| AtkError::PatternNotFound {
            pattern: "elements = [...]".to_string(),
            context: format!("{} script", config_type.tag()),
        })?;

    let mut symbols = Vec::new();
    for name in caps[1].split(',') {
        let name = name.trim();
        match symbol_for_name(&title_case(name)) {
            Some(symbol) => symbols.push(symbol.to_string()),
            None => {
                return Err(AtkError::PatternNotFound {
                    pattern: format!("element name '{}'", name),
                    context: format!("{} script", config_type.tag()),
                });
            }
        }
    }

    let mut record = ConfigurationRecord::new(symbols);

    // 模式不锚定前缀：cartesian_coordinates/fractional_coordinates 一并命中
    if let Some(caps) = triplet_block_re("coordinates").captures(text) {
        record.positions = Some(parse_triplets(&caps[1]));
    }
    if let Some(caps) = triplet_block_re("velocities").captures(text) {
        record.velocities = Some(parse_triplets(&caps[1]));
    }

    // 无坐标的退化记录：只有物种（和可能的速度），周期性保持全假
    if record.positions.is_none() {
        return Ok(record);
    }

    if !config_type.is_periodic() {
        return Ok(record);
    }
    record.pbc = [true; 3];

    let lattice_re = Regex::new(r"(?m)^lattice = (\w+) *\((.+)\)").unwrap();
    if let Some(caps) = lattice_re.captures(text) {
        record.lattice = build_lattice(&caps[1], &caps[2]);
    }

    // 分数坐标经晶格换算为笛卡尔坐标；没有晶格时保留原始数值
    if text.contains("fractional") {
        if let Some(lattice) = record.lattice.clone() {
            if let Some(positions) = record.positions.as_mut() {
                scale_fractional(positions, &lattice);
            }
        }
    }

    Ok(record)
}

/// `<key> = [[...], [...]]` 形式的三元组块
fn triplet_block_re(key: &str) -> Regex {
    Regex::new(&format!(r"{} *= *(\[\s*\[[\s\S]+?\]\s*\])", key)).unwrap()
}

fn parse_triplets(block: &str) -> Vec<[f64; 3]> {
    let triplet_re = Regex::new(&format!(
        r"\[( *{f} *, *{f} *, *{f} *)\]",
        f = RE_FLOAT
    ))
    .unwrap();

    triplet_re
        .captures_iter(block)
        .filter_map(|caps| {
            let mut values = caps[1].split(',');
            let x = values.next()?.trim().parse().ok()?;
            let y = values.next()?.trim().parse().ok()?;
            let z = values.next()?.trim().parse().ok()?;
            Some([x, y, z])
        })
        .collect()
}

/// 晶格名 + 参数列表 → 晶格矩阵
///
/// 参数只取 `<数值>*<单位>` 形式的实参，裸数值忽略。
/// 任何失败（未知晶格名、参数不足、单位解析失败）都返回 None，
/// 调用方按"晶格缺失"继续。
fn build_lattice(name: &str, args: &str) -> Option<Lattice> {
    let unit_token_re = Regex::new(&format!(r"{f} *\* *\w+", f = RE_FLOAT)).unwrap();

    let mut params = Vec::new();
    for token in unit_token_re.find_iter(args) {
        match units::resolve_unit(token.as_str()) {
            Ok(value) => params.push(value),
            Err(_) => return None,
        }
    }

    match name {
        "FaceCenteredCubic" => {
            let a = *params.first()?;
            Some(Lattice::from_vectors([
                [0.0, a / 2.0, a / 2.0],
                [a / 2.0, 0.0, a / 2.0],
                [a / 2.0, a / 2.0, 0.0],
            ]))
        }
        "BodyCenteredCubic" => {
            let a = *params.first()?;
            Some(Lattice::from_vectors([
                [-a / 2.0, a / 2.0, a / 2.0],
                [a / 2.0, -a / 2.0, a / 2.0],
                [a / 2.0, a / 2.0, -a / 2.0],
            ]))
        }
        "Triclinic" => {
            if params.len() < 6 {
                return None;
            }
            Some(Lattice::from_parameters(
                params[0], params[1], params[2], params[3], params[4], params[5],
            ))
        }
        _ => None,
    }
}

/// 分数坐标 → 笛卡尔坐标（行向量晶格）
fn scale_fractional(positions: &mut [[f64; 3]], lattice: &Lattice) {
    let m = lattice.matrix;
    for p in positions.iter_mut() {
        let f = *p;
        for i in 0..3 {
            p[i] = f[0] * m[0][i] + f[1] * m[1][i] + f[2] * m[2][i];
        }
    }
}
