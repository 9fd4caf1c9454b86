use super::*;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tempfile::tempdir;
use zip::{CompressionMethod, ZipArchive};

fn header_text(npy: &[u8]) -> String {
    let len = u16::from_le_bytes([npy[8], npy[9]]) as usize;
    String::from_utf8(npy[10..10 + len].to_vec()).unwrap()
}

#[test]
fn test_npy_preamble() {
    let npy = encode_npy(&[1.0f64, 2.0]);

    assert_eq!(&npy[..6], NPY_MAGIC);
    assert_eq!(&npy[6..8], &[1, 0]);
}

#[test]
fn test_npy_header_is_aligned_and_newline_terminated() {
    for n in [0usize, 1, 7, 1000, 123_456] {
        let values = vec![0i64; n];
        let npy = encode_npy(&values);
        let header = header_text(&npy);

        assert_eq!((10 + header.len()) % 64, 0, "n={n}");
        assert!(header.ends_with('\n'));
        assert_eq!(npy.len(), 10 + header.len() + 8 * n);
    }
}

#[test]
fn test_npy_header_describes_array() {
    let npy = encode_npy(&[3i64, 1, 2]);
    let header = header_text(&npy);

    assert!(header.starts_with("{'descr': '<i8', 'fortran_order': False, 'shape': (3,), }"));
}

#[test]
fn test_npy_descr_per_type() {
    assert!(header_text(&encode_npy(&[1u32])).contains("'<u4'"));
    assert!(header_text(&encode_npy(&[1.0f32])).contains("'<f4'"));
    assert!(header_text(&encode_npy(&[1.0f64])).contains("'<f8'"));
}

#[test]
fn test_npy_payload_little_endian() {
    let npy = encode_npy(&[1.5f64, -2.0]);
    let data = &npy[npy.len() - 16..];

    assert_eq!(&data[..8], &1.5f64.to_le_bytes());
    assert_eq!(&data[8..], &(-2.0f64).to_le_bytes());
}

#[test]
fn test_npz_path_appends_extension() {
    assert_eq!(npz_path(Path::new("out/labels.npz")), Path::new("out/labels.npz"));
    assert_eq!(npz_path(Path::new("out/labels")), Path::new("out/labels.npz"));
    assert_eq!(npz_path(Path::new("labels.npy")), Path::new("labels.npy.npz"));
}

#[test]
fn test_save_compressed_single_deflated_entry() {
    let dir = tempdir().unwrap();
    let values: Vec<i64> = (1..=500).map(|i| i % 7 + 1).collect();

    let written = NpzWriter::new()
        .save_compressed(&dir.path().join("labels.npz"), &values)
        .unwrap();

    let mut archive = ZipArchive::new(File::open(&written).unwrap()).unwrap();
    assert_eq!(archive.len(), 1);

    let mut entry = archive.by_name("arr_0.npy").unwrap();
    assert_eq!(entry.compression(), CompressionMethod::Deflated);

    let mut contents = Vec::new();
    entry.read_to_end(&mut contents).unwrap();
    assert_eq!(contents, encode_npy(&values));
}

#[test]
fn test_save_compressed_appends_npz() {
    let dir = tempdir().unwrap();

    let written = NpzWriter::new()
        .save_compressed(&dir.path().join("distances"), &[0.5f64])
        .unwrap();

    assert_eq!(written, dir.path().join("distances.npz"));
    assert!(written.exists());
}

#[test]
fn test_save_compressed_refuses_existing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("labels.npz");
    std::fs::write(&path, b"keep me").unwrap();

    let err = NpzWriter::new().save_compressed(&path, &[1i64]).unwrap_err();

    assert!(matches!(err, NpzError::AlreadyExists(_)));
    assert_eq!(std::fs::read(&path).unwrap(), b"keep me");
}

#[test]
fn test_save_compressed_overwrite() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("labels.npz");
    std::fs::write(&path, b"old").unwrap();

    NpzWriter::new()
        .overwrite(true)
        .save_compressed(&path, &[4i64, 2])
        .unwrap();

    let archive = ZipArchive::new(File::open(&path).unwrap()).unwrap();
    assert_eq!(archive.len(), 1);
}

#[test]
fn test_save_compressed_missing_directory() {
    let dir = tempdir().unwrap();
    let err = NpzWriter::new()
        .save_compressed(&dir.path().join("nope/labels.npz"), &[1i64])
        .unwrap_err();

    assert!(matches!(err, NpzError::Io { .. }));
}
