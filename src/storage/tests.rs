use super::*;
use tempfile::TempDir;

#[test]
fn test_write_piece_atomic() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("piece-0");

    write_piece_atomic(&path, b"hello piece").unwrap();

    assert_eq!(std::fs::read(&path).unwrap(), b"hello piece");
    // No temp file left behind
    assert!(!temp.path().join("piece-0.part").exists());
}

#[test]
fn test_write_piece_atomic_keeps_extension() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("out.bin");

    write_piece_atomic(&path, &[0u8; 1024]).unwrap();

    assert_eq!(std::fs::read(&path).unwrap().len(), 1024);
    assert!(!temp.path().join("out.bin.part").exists());
}

#[test]
fn test_write_piece_atomic_missing_dir() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("no-such-dir").join("piece-0");

    let result = write_piece_atomic(&path, b"data");
    assert!(matches!(result, Err(StorageError::Write { .. })));
    assert!(!path.exists());
}
