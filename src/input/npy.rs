use std::fs::File;
use std::path::Path;

use memmap2::Mmap;
use ndarray::{Array2, ShapeBuilder};

use crate::input::InputError;

pub const NPY_MAGIC: [u8; 6] = [0x93, b'N', b'U', b'M', b'P', b'Y'];
const MAX_HEADER_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NpyDType {
    F64,
    F32,
    I64,
    I32,
    I16,
    I8,
    U8,
}

impl NpyDType {
    pub fn decode(descr: &str) -> Result<Self, InputError> {
        match descr {
            "<f8" => Ok(Self::F64),
            "<f4" => Ok(Self::F32),
            "<i8" => Ok(Self::I64),
            "<i4" => Ok(Self::I32),
            "<i2" => Ok(Self::I16),
            "|i1" => Ok(Self::I8),
            "|u1" => Ok(Self::U8),
            other => Err(InputError::Npy(format!(
                "unsupported dtype descriptor '{other}'"
            ))),
        }
    }

    pub const fn item_size(self) -> usize {
        match self {
            Self::F64 | Self::I64 => 8,
            Self::F32 | Self::I32 => 4,
            Self::I16 => 2,
            Self::I8 | Self::U8 => 1,
        }
    }

    fn read(self, chunk: &[u8]) -> f64 {
        match self {
            Self::F64 => f64::from_le_bytes(le8(chunk)),
            Self::F32 => f32::from_le_bytes(le4(chunk)) as f64,
            Self::I64 => i64::from_le_bytes(le8(chunk)) as f64,
            Self::I32 => i32::from_le_bytes(le4(chunk)) as f64,
            Self::I16 => i16::from_le_bytes([chunk[0], chunk[1]]) as f64,
            Self::I8 => chunk[0] as i8 as f64,
            Self::U8 => chunk[0] as f64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NpyHeader {
    pub dtype: NpyDType,
    pub fortran_order: bool,
    pub shape: Vec<usize>,
}

pub fn read_matrix(path: &Path) -> Result<Array2<f64>, InputError> {
    let file = File::open(path)?;
    let mmap = unsafe { Mmap::map(&file)? };
    decode_matrix(&mmap[..]).map_err(|err| match err {
        InputError::Npy(reason) => InputError::Npy(format!("{}: {reason}", path.display())),
        other => other,
    })
}

/// Decodes an in-memory `.npy` payload into a (rows, cols) matrix.
/// A 1-D array becomes a single row.
pub fn decode_matrix(bytes: &[u8]) -> Result<Array2<f64>, InputError> {
    let (header, body) = parse_header(bytes)?;
    let (rows, cols) = match header.shape.as_slice() {
        [n] => (1, *n),
        [m, n] => (*m, *n),
        other => {
            return Err(InputError::Npy(format!(
                "expected a 1-D or 2-D array, found {} dimensions",
                other.len()
            )));
        }
    };

    let count = rows
        .checked_mul(cols)
        .ok_or_else(|| InputError::Npy("shape element count overflowed".to_string()))?;
    let item = header.dtype.item_size();
    let needed = count
        .checked_mul(item)
        .ok_or_else(|| InputError::Npy("shape byte size overflowed".to_string()))?;
    if body.len() < needed {
        return Err(InputError::Npy(format!(
            "payload truncated: expected {needed} data bytes, found {}",
            body.len()
        )));
    }

    let values = body[..needed]
        .chunks_exact(item)
        .map(|chunk| header.dtype.read(chunk))
        .collect::<Vec<_>>();

    let shape = (rows, cols);
    let matrix = if header.fortran_order {
        Array2::from_shape_vec(shape.f(), values)
    } else {
        Array2::from_shape_vec(shape, values)
    };
    matrix.map_err(|e| InputError::Npy(e.to_string()))
}

pub fn parse_header(bytes: &[u8]) -> Result<(NpyHeader, &[u8]), InputError> {
    if bytes.len() < 10 || bytes[..6] != NPY_MAGIC {
        return Err(InputError::Npy("missing \\x93NUMPY magic".to_string()));
    }
    let version = (bytes[6], bytes[7]);
    let (header_offset, header_len) = match version {
        (1, 0) => (10, u16::from_le_bytes([bytes[8], bytes[9]]) as usize),
        (2, 0) | (3, 0) => {
            if bytes.len() < 12 {
                return Err(InputError::Npy(
                    "payload truncated before header length".to_string(),
                ));
            }
            let len = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);
            (12, len as usize)
        }
        (major, minor) => {
            return Err(InputError::Npy(format!(
                "unsupported format version {major}.{minor}"
            )));
        }
    };
    if header_len == 0 || header_len > MAX_HEADER_BYTES {
        return Err(InputError::Npy("header length out of bounds".to_string()));
    }
    let end = header_offset + header_len;
    if bytes.len() < end {
        return Err(InputError::Npy(
            "payload truncated before end of header".to_string(),
        ));
    }

    let dictionary = std::str::from_utf8(&bytes[header_offset..end])
        .map_err(|_| InputError::Npy("header is not valid ascii".to_string()))?
        .trim();
    if !(dictionary.starts_with('{') && dictionary.ends_with('}')) {
        return Err(InputError::Npy(
            "header dictionary must be wrapped in braces".to_string(),
        ));
    }

    let descr = parse_quoted_value(extract_after_key(dictionary, "descr")?)?;
    let fortran_tail = extract_after_key(dictionary, "fortran_order")?;
    let fortran_order = if fortran_tail.starts_with("True") {
        true
    } else if fortran_tail.starts_with("False") {
        false
    } else {
        return Err(InputError::Npy(
            "fortran_order must be True or False".to_string(),
        ));
    };
    let shape = parse_shape_tuple(extract_after_key(dictionary, "shape")?)?;

    let header = NpyHeader {
        dtype: NpyDType::decode(descr)?,
        fortran_order,
        shape,
    };
    Ok((header, &bytes[end..]))
}

fn extract_after_key<'a>(dictionary: &'a str, key: &str) -> Result<&'a str, InputError> {
    let single = format!("'{key}'");
    let double = format!("\"{key}\"");
    let start = dictionary
        .find(&single)
        .or_else(|| dictionary.find(&double))
        .ok_or_else(|| InputError::Npy(format!("header field '{key}' is missing")))?;
    let tail = dictionary[start + single.len()..].trim_start();
    let tail = tail
        .strip_prefix(':')
        .ok_or_else(|| InputError::Npy(format!("header field '{key}' has no value")))?;
    Ok(tail.trim_start())
}

fn parse_quoted_value(value: &str) -> Result<&str, InputError> {
    let quote = match value.chars().next() {
        Some(c @ ('\'' | '"')) => c,
        _ => return Err(InputError::Npy("expected a quoted value".to_string())),
    };
    let tail = &value[1..];
    let end = tail
        .find(quote)
        .ok_or_else(|| InputError::Npy("unterminated quoted value".to_string()))?;
    Ok(&tail[..end])
}

fn parse_shape_tuple(value: &str) -> Result<Vec<usize>, InputError> {
    let inner = value
        .strip_prefix('(')
        .and_then(|rest| rest.split_once(')'))
        .map(|(inner, _)| inner)
        .ok_or_else(|| InputError::Npy("shape must be a tuple".to_string()))?;

    let mut shape = Vec::new();
    for token in inner.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let dim = token
            .parse::<usize>()
            .map_err(|_| InputError::Npy(format!("invalid shape entry '{token}'")))?;
        shape.push(dim);
    }
    Ok(shape)
}

fn le8(chunk: &[u8]) -> [u8; 8] {
    let mut out = [0u8; 8];
    out.copy_from_slice(&chunk[..8]);
    out
}

fn le4(chunk: &[u8]) -> [u8; 4] {
    let mut out = [0u8; 4];
    out.copy_from_slice(&chunk[..4]);
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/npy.rs"]
mod tests;
