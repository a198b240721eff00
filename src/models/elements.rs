//! # 元素名查询表
//!
//! 内嵌脚本里的元素以全名出现（如 "Silicon"），此表把全名
//! 映射为化学符号。查询前先做首字母大写归一化。
//!
//! ## 依赖关系
//! - 被 `parsers/configuration.rs` 使用
//! - 无外部模块依赖

/// 元素全名（首字母大写形式）→ 化学符号
pub fn symbol_for_name(name: &str) -> Option<&'static str> {
    match name {
        "Hydrogen" => Some("H"),
        "Helium" => Some("He"),
        "Lithium" => Some("Li"),
        "Beryllium" => Some("Be"),
        "Boron" => Some("B"),
        "Carbon" => Some("C"),
        "Nitrogen" => Some("N"),
        "Oxygen" => Some("O"),
        "Fluorine" => Some("F"),
        "Neon" => Some("Ne"),
        "Sodium" => Some("Na"),
        "Magnesium" => Some("Mg"),
        "Aluminium" => Some("Al"),
        "Silicon" => Some("Si"),
        "Phosphorus" => Some("P"),
        "Sulfur" => Some("S"),
        "Chlorine" => Some("Cl"),
        "Argon" => Some("Ar"),
        "Potassium" => Some("K"),
        "Calcium" => Some("Ca"),
        "Scandium" => Some("Sc"),
        "Titanium" => Some("Ti"),
        "Vanadium" => Some("V"),
        "Chromium" => Some("Cr"),
        "Manganese" => Some("Mn"),
        "Iron" => Some("Fe"),
        "Cobalt" => Some("Co"),
        "Nickel" => Some("Ni"),
        "Copper" => Some("Cu"),
        "Zinc" => Some("Zn"),
        "Gallium" => Some("Ga"),
        "Germanium" => Some("Ge"),
        "Arsenic" => Some("As"),
        "Selenium" => Some("Se"),
        "Bromine" => Some("Br"),
        "Krypton" => Some("Kr"),
        "Rubidium" => Some("Rb"),
        "Strontium" => Some("Sr"),
        "Yttrium" => Some("Y"),
        "Zirconium" => Some("Zr"),
        "Niobium" => Some("Nb"),
        "Molybdenum" => Some("Mo"),
        "Technetium" => Some("Tc"),
        "Ruthenium" => Some("Ru"),
        "Rhodium" => Some("Rh"),
        "Palladium" => Some("Pd"),
        "Silver" => Some("Ag"),
        "Cadmium" => Some("Cd"),
        "Indium" => Some("In"),
        "Tin" => Some("Sn"),
        "Antimony" => Some("Sb"),
        "Tellurium" => Some("Te"),
        "Iodine" => Some("I"),
        "Xenon" => Some("Xe"),
        "Caesium" => Some("Cs"),
        "Barium" => Some("Ba"),
        "Lanthanum" => Some("La"),
        "Cerium" => Some("Ce"),
        "Praseodymium" => Some("Pr"),
        "Neodymium" => Some("Nd"),
        "Promethium" => Some("Pm"),
        "Samarium" => Some("Sm"),
        "Europium" => Some("Eu"),
        "Gadolinium" => Some("Gd"),
        "Terbium" => Some("Tb"),
        "Dysprosium" => Some("Dy"),
        "Holmium" => Some("Ho"),
        "Erbium" => Some("Er"),
        "Thulium" => Some("Tm"),
        "Ytterbium" => Some("Yb"),
        "Lutetium" => Some("Lu"),
        "Hafnium" => Some("Hf"),
        "Tantalum" => Some("Ta"),
        "Tungsten" => Some("W"),
        "Rhenium" => Some("Re"),
        "Osmium" => Some("Os"),
        "Iridium" => Some("Ir"),
        "Platinum" => Some("Pt"),
        "Gold" => Some("Au"),
        "Mercury" => Some("Hg"),
        "Thallium" => Some("Tl"),
        "Lead" => Some("Pb"),
        "Bismuth" => Some("Bi"),
        "Polonium" => Some("Po"),
        "Astatine" => Some("At"),
        "Radon" => Some("Rn"),
        "Francium" => Some("Fr"),
        "Radium" => Some("Ra"),
        "Actinium" => Some("Ac"),
        "Thorium" => Some("Th"),
        "Protactinium" => Some("Pa"),
        "Uranium" => Some("U"),
        "Neptunium" => Some("Np"),
        "Plutonium" => Some("Pu"),
        "Americium" => Some("Am"),
        "Curium" => Some("Cm"),
        "Berkelium" => Some("Bk"),
        "Californium" => Some("Cf"),
        "Einsteinium" => Some("Es"),
        "Fermium" => Some("Fm"),
        "Mendelevium" => Some("Md"),
        "Nobelium" => Some("No"),
        "Lawrencium" => Some("Lr"),
        _ => None,
    }
}

/// 首字母大写、其余小写
pub fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_lookup() {
        assert_eq!(symbol_for_name("Silicon"), Some("Si"));
        assert_eq!(symbol_for_name("Hydrogen"), Some("H"));
        assert_eq!(symbol_for_name("Lawrencium"), Some("Lr"));
        assert_eq!(symbol_for_name("Unobtainium"), None);
    }

    #[test]
    fn test_title_case_normalization() {
        assert_eq!(title_case("silicon"), "Silicon");
        assert_eq!(title_case("SILICON"), "Silicon");
        assert_eq!(title_case(""), "");
        assert_eq!(symbol_for_name(&title_case("oxygen")), Some("O"));
    }
}
