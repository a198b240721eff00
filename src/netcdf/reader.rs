//! # NetCDF3 classic 二进制解码
//!
//! 只读解码 NetCDF3 classic（CDF1）与 64-bit offset（CDF2）文件，
//! 覆盖 ATK 输出实际用到的全部结构：命名维度、全局属性、
//! 非记录与记录变量、六种经典类型。任何结构性问题都映射为
//! 致命的 `ContainerError`。
//!
//! ## 文件布局
//! ```text
//! magic('C','D','F',version)  numrecs
//! dim_list  gatt_list  var_list  data...
//! ```
//!
//! ## 依赖关系
//! - 被 `netcdf/mod.rs` 使用
//! - 使用 `error.rs`

use super::{AttrValue, Container, Dimension, VarData, Variable};
use crate::error::{AtkError, Result};

const NC_DIMENSION: u32 = 0x0A;
const NC_VARIABLE: u32 = 0x0B;
const NC_ATTRIBUTE: u32 = 0x0C;

const NC_BYTE: u32 = 1;
const NC_CHAR: u32 = 2;
const NC_SHORT: u32 = 3;
const NC_INT: u32 = 4;
const NC_FLOAT: u32 = 5;
const NC_DOUBLE: u32 = 6;

/// numrecs 的流式写入占位值
const STREAMING: u32 = 0xFFFF_FFFF;

fn container_error(path: &str, reason: impl Into<String>) -> AtkError {
    AtkError::ContainerError {
        path: path.to_string(),
        reason: reason.into(),
    }
}

/// 大端读取游标
struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
    path: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(buf: &'a [u8], path: &'a str) -> Self {
        Cursor { buf, pos: 0, path }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.buf.len())
            .ok_or_else(|| {
                container_error(
                    self.path,
                    format!("unexpected end of file at offset {}", self.pos),
                )
            })?;
        let out = &self.buf[self.pos..end];
        self.pos = end;
        Ok(out)
    }

    fn read_u32(&mut self) -> Result<u32> {
        let b = self.take(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn read_u64(&mut self) -> Result<u64> {
        let b = self.take(8)?;
        Ok(u64::from_be_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ]))
    }

    /// n 字节负载 + 对齐到 4 字节的填充
    fn read_padded(&mut self, n: usize) -> Result<&'a [u8]> {
        let out = self.take(n)?;
        let pad = (4 - n % 4) % 4;
        self.take(pad)?;
        Ok(out)
    }

    fn read_name(&mut self) -> Result<String> {
        let len = self.read_u32()? as usize;
        let bytes = self.read_padded(len)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}

/// 变量头条目（数据延后读取）
struct VarEntry {
    name: String,
    dimids: Vec<usize>,
    nc_type: u32,
    begin: u64,
}

fn type_size(nc_type: u32, path: &str) -> Result<usize> {
    match nc_type {
        NC_BYTE | NC_CHAR => Ok(1),
        NC_SHORT => Ok(2),
        NC_INT | NC_FLOAT => Ok(4),
        NC_DOUBLE => Ok(8),
        other => Err(container_error(
            path,
            format!("unknown NetCDF type id: {}", other),
        )),
    }
}

fn type_name(nc_type: u32) -> &'static str {
    match nc_type {
        NC_BYTE => "byte",
        NC_CHAR => "char",
        NC_SHORT => "short",
        NC_INT => "int",
        NC_FLOAT => "float",
        NC_DOUBLE => "double",
        _ => "unknown",
    }
}

/// 列表头：tag + 元素数；空列表写作 ABSENT (0, 0)
fn read_list_header(cur: &mut Cursor, expected_tag: u32) -> Result<usize> {
    let tag = cur.read_u32()?;
    let nelems = cur.read_u32()? as usize;
    if nelems == 0 {
        return Ok(0);
    }
    if tag != expected_tag {
        return Err(container_error(
            cur.path,
            format!("expected list tag {:#x}, found {:#x}", expected_tag, tag),
        ));
    }
    Ok(nelems)
}

fn read_dim_list(cur: &mut Cursor) -> Result<Vec<Dimension>> {
    let nelems = read_list_header(cur, NC_DIMENSION)?;
    let mut dims = Vec::with_capacity(nelems);
    for _ in 0..nelems {
        let name = cur.read_name()?;
        let len = cur.read_u32()? as usize;
        // 记录维度在头部写 0，真实长度来自 numrecs
        dims.push(Dimension { name, len });
    }
    Ok(dims)
}

fn read_attr_list(cur: &mut Cursor) -> Result<Vec<(String, AttrValue)>> {
    let nelems = read_list_header(cur, NC_ATTRIBUTE)?;
    let mut attrs = Vec::with_capacity(nelems);
    for _ in 0..nelems {
        let name = cur.read_name()?;
        let nc_type = cur.read_u32()?;
        let count = cur.read_u32()? as usize;
        let tsize = type_size(nc_type, cur.path)?;
        let nbytes = count
            .checked_mul(tsize)
            .ok_or_else(|| container_error(cur.path, "attribute too large"))?;
        let raw = cur.read_padded(nbytes)?;
        let value = match nc_type {
            NC_CHAR | NC_BYTE => AttrValue::Text(
                String::from_utf8_lossy(raw)
                    .trim_end_matches('\0')
                    .to_string(),
            ),
            _ => AttrValue::Numeric(decode_numeric(nc_type, raw)),
        };
        attrs.push((name, value));
    }
    Ok(attrs)
}

fn read_var_list(cur: &mut Cursor, version: u8, ndims_total: usize) -> Result<Vec<VarEntry>> {
    let nelems = read_list_header(cur, NC_VARIABLE)?;
    let mut entries = Vec::with_capacity(nelems);
    for _ in 0..nelems {
        let name = cur.read_name()?;
        let ndims = cur.read_u32()? as usize;
        let mut dimids = Vec::with_capacity(ndims);
        for _ in 0..ndims {
            let id = cur.read_u32()? as usize;
            if id >= ndims_total {
                return Err(container_error(
                    cur.path,
                    format!("variable '{}' references unknown dimension {}", name, id),
                ));
            }
            dimids.push(id);
        }
        // 变量属性按格式消耗，本工具不使用
        read_attr_list(cur)?;
        let nc_type = cur.read_u32()?;
        let _vsize = cur.read_u32()?;
        let begin = if version == 1 {
            cur.read_u32()? as u64
        } else {
            cur.read_u64()?
        };
        entries.push(VarEntry {
            name,
            dimids,
            nc_type,
            begin,
        });
    }
    Ok(entries)
}

fn decode_numeric(nc_type: u32, raw: &[u8]) -> Vec<f64> {
    match nc_type {
        NC_BYTE => raw.iter().map(|&b| b as i8 as f64).collect(),
        NC_SHORT => raw
            .chunks_exact(2)
            .map(|c| i16::from_be_bytes([c[0], c[1]]) as f64)
            .collect(),
        NC_INT => raw
            .chunks_exact(4)
            .map(|c| i32::from_be_bytes([c[0], c[1], c[2], c[3]]) as f64)
            .collect(),
        NC_FLOAT => raw
            .chunks_exact(4)
            .map(|c| f32::from_be_bytes([c[0], c[1], c[2], c[3]]) as f64)
            .collect(),
        NC_DOUBLE => raw
            .chunks_exact(8)
            .map(|c| f64::from_be_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]))
            .collect(),
        _ => Vec::new(),
    }
}

fn pad4(n: usize) -> usize {
    n + (4 - n % 4) % 4
}

/// 数据区切片，越界映射为容器错误
fn slice_at<'b>(
    bytes: &'b [u8],
    path: &str,
    var_name: &str,
    start: usize,
    len: usize,
) -> Result<&'b [u8]> {
    start
        .checked_add(len)
        .filter(|&end| end <= bytes.len())
        .map(|end| &bytes[start..end])
        .ok_or_else(|| {
            container_error(
                path,
                format!("data for variable '{}' is out of bounds", var_name),
            )
        })
}

fn product(lens: impl Iterator<Item = usize>, path: &str) -> Result<usize> {
    let mut out: usize = 1;
    for len in lens {
        out = out
            .checked_mul(len)
            .ok_or_else(|| container_error(path, "variable too large"))?;
    }
    Ok(out)
}

/// 解码整个容器文件
pub fn parse_bytes(bytes: &[u8], path: &str) -> Result<Container> {
    let mut cur = Cursor::new(bytes, path);

    let magic = cur.take(4)?;
    if &magic[..3] != b"CDF" {
        return Err(container_error(path, "not a NetCDF classic file (bad magic)"));
    }
    let version = magic[3];
    if version != 1 && version != 2 {
        return Err(container_error(
            path,
            format!("unsupported NetCDF version byte: {}", version),
        ));
    }

    let numrecs_raw = cur.read_u32()?;
    let dims = read_dim_list(&mut cur)?;
    let attrs = read_attr_list(&mut cur)?;
    let entries = read_var_list(&mut cur, version, dims.len())?;

    // ─────────────────────────────────────────────────────────────
    // 记录变量几何
    // ─────────────────────────────────────────────────────────────
    let record_dim = dims.iter().position(|d| d.len == 0);
    let is_record = |e: &VarEntry| record_dim.is_some() && e.dimids.first() == record_dim.as_ref();

    // 每条记录内单个变量的负载大小（未填充）
    let per_record_bytes = |e: &VarEntry| -> Result<usize> {
        let tsize = type_size(e.nc_type, path)?;
        let elems = product(
            e.dimids.iter().skip(1).map(|&id| dims[id].len),
            path,
        )?;
        elems
            .checked_mul(tsize)
            .ok_or_else(|| container_error(path, "variable too large"))
    };

    let record_entries: Vec<&VarEntry> = entries.iter().filter(|e| is_record(e)).collect();
    let mut recsize: usize = 0;
    for e in &record_entries {
        recsize = recsize
            .checked_add(pad4(per_record_bytes(e)?))
            .ok_or_else(|| container_error(path, "record too large"))?;
    }
    if record_entries.len() == 1 {
        // 单记录变量时步长不填充
        recsize = per_record_bytes(record_entries[0])?;
    }

    let numrecs = if record_entries.is_empty() || recsize == 0 {
        0
    } else if numrecs_raw == STREAMING {
        let min_begin = record_entries
            .iter()
            .map(|e| e.begin as usize)
            .min()
            .unwrap_or(bytes.len());
        bytes.len().saturating_sub(min_begin) / recsize
    } else {
        numrecs_raw as usize
    };

    // ─────────────────────────────────────────────────────────────
    // 组装容器并读取数据
    // ─────────────────────────────────────────────────────────────
    let mut container = Container::in_memory(path);
    for (i, d) in dims.iter().enumerate() {
        let len = if Some(i) == record_dim { numrecs } else { d.len };
        container.add_dimension(&d.name, len);
    }
    for (name, value) in attrs {
        container.push_attr(name, value);
    }

    for e in &entries {
        let tsize = type_size(e.nc_type, path)?;
        let shape: Vec<usize> = e
            .dimids
            .iter()
            .map(|&id| {
                if Some(id) == record_dim {
                    numrecs
                } else {
                    dims[id].len
                }
            })
            .collect();

        let raw: Vec<u8> = if is_record(e) {
            let per = per_record_bytes(e)?;
            let mut buf = Vec::with_capacity(per.saturating_mul(numrecs));
            for r in 0..numrecs {
                let start = (e.begin as usize)
                    .checked_add(r.checked_mul(recsize).ok_or_else(|| {
                        container_error(path, "record offset overflow")
                    })?)
                    .ok_or_else(|| container_error(path, "record offset overflow"))?;
                buf.extend_from_slice(slice_at(bytes, path, &e.name, start, per)?);
            }
            buf
        } else {
            let nbytes = product(shape.iter().copied(), path)?
                .checked_mul(tsize)
                .ok_or_else(|| container_error(path, "variable too large"))?;
            slice_at(bytes, path, &e.name, e.begin as usize, nbytes)?.to_vec()
        };

        let data = match e.nc_type {
            NC_CHAR | NC_BYTE => VarData::Text(raw),
            _ => VarData::Numeric(decode_numeric(e.nc_type, &raw)),
        };
        container.push_variable(Variable {
            name: e.name.clone(),
            type_name: type_name(e.nc_type),
            shape,
            data,
        });
    }

    Ok(container)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_u32(buf: &mut Vec<u8>, v: u32) {
        buf.extend_from_slice(&v.to_be_bytes());
    }

    fn push_f64(buf: &mut Vec<u8>, v: f64) {
        buf.extend_from_slice(&v.to_be_bytes());
    }

    fn push_name(buf: &mut Vec<u8>, name: &str) {
        push_u32(buf, name.len() as u32);
        buf.extend_from_slice(name.as_bytes());
        let pad = (4 - name.len() % 4) % 4;
        buf.extend_from_slice(&vec![0u8; pad]);
    }

    fn push_text_padded(buf: &mut Vec<u8>, text: &str) {
        buf.extend_from_slice(text.as_bytes());
        let pad = (4 - text.len() % 4) % 4;
        buf.extend_from_slice(&vec![0u8; pad]);
    }

    fn push_text_attr(buf: &mut Vec<u8>, name: &str, value: &str) {
        push_name(buf, name);
        push_u32(buf, NC_CHAR);
        push_u32(buf, value.len() as u32);
        push_text_padded(buf, value);
    }

    /// 头部两遍生成：第一遍量出长度，第二遍带上真实 begin 偏移
    fn classic_file(build_header: impl Fn(&[u32]) -> Vec<u8>, data_sizes: &[usize]) -> (Vec<u8>, Vec<u32>) {
        let probe = build_header(&vec![0u32; data_sizes.len()]);
        let mut begins = Vec::with_capacity(data_sizes.len());
        let mut offset = probe.len();
        for &size in data_sizes {
            begins.push(offset as u32);
            offset += pad4(size);
        }
        (build_header(&begins), begins)
    }

    #[test]
    fn test_parse_minimal_classic_file() {
        let script = "elements = [ Silicon ]\n";

        let header = |begins: &[u32]| -> Vec<u8> {
            let mut h = Vec::new();
            h.extend_from_slice(b"CDF\x01");
            push_u32(&mut h, 0); // numrecs

            // dim_list
            push_u32(&mut h, NC_DIMENSION);
            push_u32(&mut h, 1);
            push_name(&mut h, "BulkConfiguration_gID000_dimension");
            push_u32(&mut h, script.len() as u32);

            // gatt_list
            push_u32(&mut h, NC_ATTRIBUTE);
            push_u32(&mut h, 2);
            push_text_attr(&mut h, "fingerprint_table", "fpA:gID000#");
            push_text_attr(&mut h, "version", "ATK 2016.0.3");

            // var_list
            push_u32(&mut h, NC_VARIABLE);
            push_u32(&mut h, 2);

            push_name(&mut h, "BulkConfiguration_gID000");
            push_u32(&mut h, 1); // ndims
            push_u32(&mut h, 0); // dimid
            push_u32(&mut h, 0); // vatt ABSENT
            push_u32(&mut h, 0);
            push_u32(&mut h, NC_CHAR);
            push_u32(&mut h, pad4(script.len()) as u32);
            push_u32(&mut h, begins[0]);

            push_name(&mut h, "TotalEnergy_gID000_component_Kinetic");
            push_u32(&mut h, 0); // scalar
            push_u32(&mut h, 0); // vatt ABSENT
            push_u32(&mut h, 0);
            push_u32(&mut h, NC_DOUBLE);
            push_u32(&mut h, 8);
            push_u32(&mut h, begins[1]);

            h
        };

        let (mut file, _) = classic_file(header, &[script.len(), 8]);
        push_text_padded(&mut file, script);
        push_f64(&mut file, 10.0);

        let container = parse_bytes(&file, "Si2.nc").unwrap();

        assert_eq!(container.dimensions().len(), 1);
        assert_eq!(container.dimensions()[0].len, script.len());
        assert_eq!(container.attr_text("fingerprint_table"), Some("fpA:gID000#"));
        assert_eq!(container.attr_text("version"), Some("ATK 2016.0.3"));
        assert_eq!(
            container.var_text("BulkConfiguration_gID000").as_deref(),
            Some(script)
        );
        assert_eq!(
            container.var_scalar("TotalEnergy_gID000_component_Kinetic"),
            Some(10.0)
        );

        let var = container.var("BulkConfiguration_gID000").unwrap();
        assert_eq!(var.type_name, "char");
        assert_eq!(var.shape, [script.len()]);
    }

    #[test]
    fn test_parse_record_variables() {
        // 两个记录变量：每条记录先 3 个 double，再 1 个 double
        let header = |begins: &[u32]| -> Vec<u8> {
            let mut h = Vec::new();
            h.extend_from_slice(b"CDF\x01");
            push_u32(&mut h, 2); // numrecs

            push_u32(&mut h, NC_DIMENSION);
            push_u32(&mut h, 2);
            push_name(&mut h, "time");
            push_u32(&mut h, 0); // 记录维度
            push_name(&mut h, "xyz");
            push_u32(&mut h, 3);

            push_u32(&mut h, 0); // gatt ABSENT
            push_u32(&mut h, 0);

            push_u32(&mut h, NC_VARIABLE);
            push_u32(&mut h, 2);

            push_name(&mut h, "positions");
            push_u32(&mut h, 2);
            push_u32(&mut h, 0);
            push_u32(&mut h, 1);
            push_u32(&mut h, 0); // vatt ABSENT
            push_u32(&mut h, 0);
            push_u32(&mut h, NC_DOUBLE);
            push_u32(&mut h, 24);
            push_u32(&mut h, begins[0]);

            push_name(&mut h, "t");
            push_u32(&mut h, 1);
            push_u32(&mut h, 0);
            push_u32(&mut h, 0); // vatt ABSENT
            push_u32(&mut h, 0);
            push_u32(&mut h, NC_DOUBLE);
            push_u32(&mut h, 8);
            push_u32(&mut h, begins[1]);

            h
        };

        // begin 偏移指向首条记录内各自的槽位，步长 = 32 字节
        let probe = header(&[0, 0]);
        let begin0 = probe.len() as u32;
        let begin1 = begin0 + 24;
        let mut file = header(&[begin0, begin1]);

        for rec in 0..2u32 {
            let base = rec as f64 * 10.0;
            push_f64(&mut file, base + 1.0);
            push_f64(&mut file, base + 2.0);
            push_f64(&mut file, base + 3.0);
            push_f64(&mut file, base);
        }

        let container = parse_bytes(&file, "traj.nc").unwrap();

        let (shape, values) = container.var_numeric("positions").unwrap();
        assert_eq!(shape, [2, 3]);
        assert_eq!(values, [1.0, 2.0, 3.0, 11.0, 12.0, 13.0]);

        let (shape, values) = container.var_numeric("t").unwrap();
        assert_eq!(shape, [2]);
        assert_eq!(values, [0.0, 10.0]);

        // 记录维度长度回填为记录数
        assert_eq!(container.dimensions()[0].len, 2);
    }

    #[test]
    fn test_bad_magic_is_container_error() {
        let err = parse_bytes(b"HDF\x01\x00\x00\x00\x00", "bad.nc").unwrap_err();
        assert!(matches!(err, AtkError::ContainerError { .. }));
    }

    #[test]
    fn test_truncated_file_is_container_error() {
        let err = parse_bytes(b"CDF\x01\x00\x00", "trunc.nc").unwrap_err();
        assert!(matches!(err, AtkError::ContainerError { .. }));
    }
}
