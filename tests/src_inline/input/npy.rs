use ndarray::array;

use super::*;
use crate::test_support::{encode_npy, temp_dir, write_npy};

fn npy_with(descr: &str, fortran: bool, shape: &str, body: &[u8]) -> Vec<u8> {
    let fortran = if fortran { "True" } else { "False" };
    let mut header =
        format!("{{'descr': '{descr}', 'fortran_order': {fortran}, 'shape': {shape}, }}");
    header.push('\n');
    let mut out = NPY_MAGIC.to_vec();
    out.extend_from_slice(&[1, 0]);
    out.extend_from_slice(&(header.len() as u16).to_le_bytes());
    out.extend_from_slice(header.as_bytes());
    out.extend_from_slice(body);
    out
}

fn f64_bytes(values: &[f64]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

#[test]
fn test_decode_c_order() {
    let m = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
    let decoded = decode_matrix(&encode_npy(&m)).unwrap();
    assert_eq!(decoded, m);
}

#[test]
fn test_decode_fortran_order() {
    let body = f64_bytes(&[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    let decoded = decode_matrix(&npy_with("<f8", true, "(2, 3)", &body)).unwrap();
    assert_eq!(decoded, array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
}

#[test]
fn test_decode_one_dimensional_as_row() {
    let body = f64_bytes(&[7.0, 8.0]);
    let decoded = decode_matrix(&npy_with("<f8", false, "(2,)", &body)).unwrap();
    assert_eq!(decoded, array![[7.0, 8.0]]);
}

#[test]
fn test_decode_widens_integer_and_f32() {
    let body = [1.5f32, -2.0]
        .iter()
        .flat_map(|v| v.to_le_bytes())
        .collect::<Vec<_>>();
    let decoded = decode_matrix(&npy_with("<f4", false, "(1, 2)", &body)).unwrap();
    assert_eq!(decoded, array![[1.5, -2.0]]);

    let body = [3i32, -4]
        .iter()
        .flat_map(|v| v.to_le_bytes())
        .collect::<Vec<_>>();
    let decoded = decode_matrix(&npy_with("<i4", false, "(2, 1)", &body)).unwrap();
    assert_eq!(decoded, array![[3.0], [-4.0]]);
}

#[test]
fn test_parse_header_fields() {
    let bytes = npy_with("<f8", false, "(3, 50)", &[]);
    let (header, body) = parse_header(&bytes).unwrap();
    assert_eq!(header.dtype, NpyDType::F64);
    assert!(!header.fortran_order);
    assert_eq!(header.shape, vec![3, 50]);
    assert!(body.is_empty());
}

#[test]
fn test_rejects_bad_magic() {
    let mut bytes = encode_npy(&array![[1.0]]);
    bytes[1] = b'X';
    assert!(matches!(decode_matrix(&bytes), Err(InputError::Npy(_))));
    assert!(decode_matrix(b"").is_err());
}

#[test]
fn test_rejects_truncated_body() {
    let body = f64_bytes(&[1.0, 2.0, 3.0]);
    let err = decode_matrix(&npy_with("<f8", false, "(2, 2)", &body)).unwrap_err();
    assert!(err.to_string().contains("truncated"));
}

#[test]
fn test_rejects_shape_too_large_to_address() {
    let err = decode_matrix(&npy_with("<f8", false, "(2305843009213693952, 1)", &[])).unwrap_err();
    assert!(matches!(err, InputError::Npy(_)));
    assert!(err.to_string().contains("overflowed"));
}

#[test]
fn test_rejects_unsupported_layouts() {
    let body = f64_bytes(&[0.0; 8]);
    assert!(decode_matrix(&npy_with("<f8", false, "(2, 2, 2)", &body)).is_err());
    assert!(decode_matrix(&npy_with(">f8", false, "(2, 4)", &body)).is_err());
    assert!(decode_matrix(&npy_with("|O", false, "(2, 4)", &body)).is_err());
}

#[test]
fn test_read_matrix_reports_path() {
    let dir = temp_dir();
    let good = dir.path().join("good.npy");
    let m = array![[0.5, -0.5], [1.0, 2.0]];
    write_npy(&good, &m);
    assert_eq!(read_matrix(&good).unwrap(), m);

    let bad = dir.path().join("bad.npy");
    std::fs::write(&bad, b"not an array").unwrap();
    let err = read_matrix(&bad).unwrap_err();
    assert!(err.to_string().contains("bad.npy"));

    let missing = dir.path().join("missing.npy");
    assert!(matches!(read_matrix(&missing), Err(InputError::Io(_))));
}
