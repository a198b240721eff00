//! # 指纹关联表
//!
//! 解码全局属性 `fingerprint_table`，建立 gID 渲染串（"gID000"）
//! 到指纹的映射。指纹是不透明令牌，只用于把能量/力记录关联回
//! 构型，从不解释其内容。
//!
//! ## 属性格式
//! ```text
//! <fingerprint1>:<gID1>#<fingerprint2>:<gID2>#...#
//! ```
//! 末尾跟一个分隔符，按 `#` 切分后产生的空尾段必须丢弃。
//!
//! ## 依赖关系
//! - 被 `pipeline/` 和 `commands/inspect.rs` 使用
//! - 无外部模块依赖

use std::collections::HashMap;

/// gID 渲染串 → 指纹
#[derive(Debug, Default)]
pub struct FingerprintTable {
    map: HashMap<String, String>,
}

impl FingerprintTable {
    /// 解码全局属性；属性缺失得到空表
    pub fn from_attribute(attr: Option<&str>) -> Self {
        let mut map = HashMap::new();
        if let Some(attr) = attr {
            for entry in attr.split('#').filter(|s| !s.is_empty()) {
                // 条目形如 "<fingerprint>:<gID>"，坏条目按条目隔离跳过
                if let Some((fingerprint, gid)) = entry.split_once(':') {
                    map.insert(gid.to_string(), fingerprint.to_string());
                }
            }
        }
        FingerprintTable { map }
    }

    pub fn get(&self, gid_label: &str) -> Option<&str> {
        self.map.get(gid_label).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// 按 gID 排序的条目列表，用于展示
    pub fn entries(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .map
            .iter()
            .map(|(gid, fp)| (gid.as_str(), fp.as_str()))
            .collect();
        entries.sort();
        entries
    }
}
