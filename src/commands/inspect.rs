//! # inspect 命令实现
//!
//! 打印容器的维度、变量、全局属性与解码后的指纹表，
//! 用于排查命名约定不符合预期的容器。
//!
//! ## 依赖关系
//! - 使用 `cli/inspect.rs` 定义的参数
//! - 使用 `netcdf/`, `parsers/fingerprint.rs`
//! - 使用 `utils/output.rs`

use crate::cli::inspect::InspectArgs;
use crate::error::{AtkError, Result};
use crate::netcdf::{AttrValue, Container};
use crate::parsers::fingerprint::FingerprintTable;
use crate::utils::output;

use tabled::{Table, Tabled};

/// 变量列表行
#[derive(Debug, Clone, Tabled)]
struct VariableRow {
    #[tabled(rename = "Variable")]
    name: String,
    #[tabled(rename = "Type")]
    type_name: String,
    #[tabled(rename = "Shape")]
    shape: String,
    #[tabled(rename = "Len")]
    len: usize,
}

/// 执行 inspect 命令
pub fn execute(args: InspectArgs) -> Result<()> {
    output::print_header("Inspecting ATK Container");

    if !args.input.exists() {
        return Err(AtkError::FileNotFound {
            path: args.input.display().to_string(),
        });
    }

    let container = Container::open(&args.input)?;
    let show_all = !(args.dimensions || args.variables || args.attributes);

    output::print_info(&format!("Container: {}", container.path()));
    if let Some(version) = container.attr_text("version") {
        output::print_info(&format!("Program version: {}", version));
    }

    if show_all || args.dimensions {
        output::print_header("Dimensions");
        for dimension in container.dimensions() {
            println!("{:>10}  {}", dimension.len, dimension.name);
        }
    }

    if show_all || args.variables {
        output::print_header("Variables");
        let rows: Vec<VariableRow> = container
            .variables()
            .iter()
            .map(|var| VariableRow {
                name: var.name.clone(),
                type_name: var.type_name.to_string(),
                shape: var.shape_label(),
                len: var.len(),
            })
            .collect();
        println!("{}", Table::new(&rows));
    }

    if show_all || args.attributes {
        output::print_header("Global Attributes");
        for (name, value) in container.attributes() {
            println!("{} = {}", name, preview(value));
        }

        let fingerprints =
            FingerprintTable::from_attribute(container.attr_text("fingerprint_table"));
        if !fingerprints.is_empty() {
            output::print_header("Fingerprint Table");
            for (gid, fingerprint) in fingerprints.entries() {
                println!("{}  {}", gid, fingerprint);
            }
        }
    }

    Ok(())
}

/// 属性值截断预览
fn preview(value: &AttrValue) -> String {
    match value {
        AttrValue::Text(text) => {
            if text.chars().count() > 72 {
                let head: String = text.chars().take(72).collect();
                format!("{}...", head)
            } else {
                text.clone()
            }
        }
        AttrValue::Numeric(values) => format!("{:?}", values),
    }
}
