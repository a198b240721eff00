//! # NetCDF 容器访问层
//!
//! 把一个 ATK 输出容器固化为只读的 `Container` 视图：维度名、
//! 变量（文本字节或数值数据 + 形状）、全局属性。视图构建完成后
//! 冻结，核心提取阶段只读取视图，从不回触文件。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `pipeline/`, `commands/` 使用
//! - 子模块: reader（NetCDF3 classic 二进制解码）

pub mod reader;

use crate::error::{AtkError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// 命名维度
#[derive(Debug, Clone)]
pub struct Dimension {
    pub name: String,
    pub len: usize,
}

/// 变量负载：脚本/指纹类变量是原始文本字节，其余是数值
#[derive(Debug, Clone)]
pub enum VarData {
    Text(Vec<u8>),
    Numeric(Vec<f64>),
}

/// 命名变量
#[derive(Debug, Clone)]
pub struct Variable {
    pub name: String,
    /// 容器内的原始类型名（char/byte/short/int/float/double）
    pub type_name: &'static str,
    pub shape: Vec<usize>,
    pub data: VarData,
}

impl Variable {
    pub fn len(&self) -> usize {
        match &self.data {
            VarData::Text(bytes) => bytes.len(),
            VarData::Numeric(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 形状渲染形式，如 "(2, 3)"
    pub fn shape_label(&self) -> String {
        let dims: Vec<String> = self.shape.iter().map(|d| d.to_string()).collect();
        format!("({})", dims.join(", "))
    }
}

/// 全局属性值
#[derive(Debug, Clone)]
pub enum AttrValue {
    Text(String),
    Numeric(Vec<f64>),
}

/// 只读容器视图
///
/// 从文件打开一次构建（或在内存中直接搭建，用于测试和工具），
/// 之后不再写入。
#[derive(Debug)]
pub struct Container {
    path: String,
    dims: Vec<Dimension>,
    vars: Vec<Variable>,
    index: HashMap<String, usize>,
    attrs: Vec<(String, AttrValue)>,
}

impl Container {
    /// 读取一个 NetCDF3 容器文件
    pub fn open(path: &Path) -> Result<Container> {
        let label = path.display().to_string();
        let bytes = fs::read(path).map_err(|e| AtkError::FileReadError {
            path: label.clone(),
            source: e,
        })?;
        reader::parse_bytes(&bytes, &label)
    }

    /// 创建空的内存容器
    pub fn in_memory(label: &str) -> Container {
        Container {
            path: label.to_string(),
            dims: Vec::new(),
            vars: Vec::new(),
            index: HashMap::new(),
            attrs: Vec::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────
    // 构建（冻结前）
    // ─────────────────────────────────────────────────────────────

    pub fn add_dimension(&mut self, name: &str, len: usize) {
        self.dims.push(Dimension {
            name: name.to_string(),
            len,
        });
    }

    pub fn add_text_variable(&mut self, name: &str, text: &str) {
        let bytes = text.as_bytes().to_vec();
        let shape = vec![bytes.len()];
        self.push_variable(Variable {
            name: name.to_string(),
            type_name: "char",
            shape,
            data: VarData::Text(bytes),
        });
    }

    pub fn add_scalar_variable(&mut self, name: &str, value: f64) {
        self.push_variable(Variable {
            name: name.to_string(),
            type_name: "double",
            shape: Vec::new(),
            data: VarData::Numeric(vec![value]),
        });
    }

    pub fn add_numeric_variable(&mut self, name: &str, shape: Vec<usize>, values: Vec<f64>) {
        self.push_variable(Variable {
            name: name.to_string(),
            type_name: "double",
            shape,
            data: VarData::Numeric(values),
        });
    }

    pub fn set_text_attr(&mut self, name: &str, value: &str) {
        self.attrs
            .push((name.to_string(), AttrValue::Text(value.to_string())));
    }

    pub(crate) fn push_variable(&mut self, var: Variable) {
        self.index.insert(var.name.clone(), self.vars.len());
        self.vars.push(var);
    }

    pub(crate) fn push_attr(&mut self, name: String, value: AttrValue) {
        self.attrs.push((name, value));
    }

    // ─────────────────────────────────────────────────────────────
    // 只读访问
    // ─────────────────────────────────────────────────────────────

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.dims
    }

    pub fn dimension_names(&self) -> impl Iterator<Item = &str> {
        self.dims.iter().map(|d| d.name.as_str())
    }

    pub fn variables(&self) -> &[Variable] {
        &self.vars
    }

    pub fn attributes(&self) -> &[(String, AttrValue)] {
        &self.attrs
    }

    /// 字符串类型的全局属性
    pub fn attr_text(&self, name: &str) -> Option<&str> {
        self.attrs.iter().rev().find_map(|(n, v)| {
            if n == name {
                match v {
                    AttrValue::Text(s) => Some(s.as_str()),
                    AttrValue::Numeric(_) => None,
                }
            } else {
                None
            }
        })
    }

    pub fn var(&self, name: &str) -> Option<&Variable> {
        self.index.get(name).map(|&i| &self.vars[i])
    }

    /// 文本变量解码为字符串（宽松解码，去掉尾部 NUL 填充）
    pub fn var_text(&self, name: &str) -> Option<String> {
        match &self.var(name)?.data {
            VarData::Text(bytes) => Some(
                String::from_utf8_lossy(bytes)
                    .trim_end_matches('\0')
                    .to_string(),
            ),
            VarData::Numeric(_) => None,
        }
    }

    /// 数值变量的首个元素
    pub fn var_scalar(&self, name: &str) -> Option<f64> {
        match &self.var(name)?.data {
            VarData::Numeric(values) => values.first().copied(),
            VarData::Text(_) => None,
        }
    }

    /// 数值变量的形状与数据
    pub fn var_numeric(&self, name: &str) -> Option<(&[usize], &[f64])> {
        let var = self.var(name)?;
        match &var.data {
            VarData::Numeric(values) => Some((&var.shape, values)),
            VarData::Text(_) => None,
        }
    }
}
