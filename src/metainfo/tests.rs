use super::*;
use sha1::{Digest, Sha1};

fn sample_torrent(announce: &str, length: u64, piece_length: u64, num_pieces: usize) -> Vec<u8> {
    let mut pieces = Vec::with_capacity(num_pieces * 20);
    for i in 0..num_pieces {
        pieces.extend_from_slice(&[i as u8; 20]);
    }

    let mut data = Vec::new();
    data.extend_from_slice(format!("d8:announce{}:{}", announce.len(), announce).as_bytes());
    data.extend_from_slice(
        format!(
            "4:infod6:lengthi{}e4:name8:test.bin12:piece lengthi{}e6:pieces{}:",
            length,
            piece_length,
            pieces.len()
        )
        .as_bytes(),
    );
    data.extend_from_slice(&pieces);
    data.extend_from_slice(b"ee");
    data
}

#[test]
fn test_parse_single_file_torrent() {
    let data = sample_torrent("http://tracker.example/announce", 92063, 32768, 3);
    let metainfo = Metainfo::from_bytes(&data).unwrap();

    assert_eq!(metainfo.announce, "http://tracker.example/announce");
    assert_eq!(metainfo.info.name, "test.bin");
    assert_eq!(metainfo.info.length, 92063);
    assert_eq!(metainfo.info.piece_length, 32768);
    assert_eq!(metainfo.info.piece_count(), 3);
    assert_eq!(metainfo.info.piece_hash(1), Some(&[1u8; 20]));
}

#[test]
fn test_info_hash_matches_raw_info_bytes() {
    let data = sample_torrent("http://tracker.example/announce", 92063, 32768, 3);
    let metainfo = Metainfo::from_bytes(&data).unwrap();

    let mut hasher = Sha1::new();
    hasher.update(metainfo.raw_info());
    let expected: [u8; 20] = hasher.finalize().into();

    assert_eq!(metainfo.info_hash.as_bytes(), &expected);
    assert_eq!(metainfo.info_hash.to_hex().len(), 40);
}

#[test]
fn test_info_hash_covers_unknown_info_keys() {
    // A non-standard key inside `info` must change the hash, since the hash
    // is over the original bytes rather than a four-key re-encoding.
    let plain = sample_torrent("http://t/a", 32768, 32768, 1);
    let mut extended = Vec::new();
    extended.extend_from_slice(b"d8:announce10:http://t/a4:infod6:lengthi32768e4:name8:test.bin12:piece lengthi32768e6:pieces20:");
    extended.extend_from_slice(&[0u8; 20]);
    extended.extend_from_slice(b"7:privatei1eee");

    let a = Metainfo::from_bytes(&plain).unwrap();
    let b = Metainfo::from_bytes(&extended).unwrap();

    assert_ne!(a.info_hash, b.info_hash);
    assert!(b.raw_info().ends_with(b"7:privatei1ee"));
}

#[test]
fn test_piece_length_at() {
    let data = sample_torrent("http://t/a", 92063, 32768, 3);
    let metainfo = Metainfo::from_bytes(&data).unwrap();

    assert_eq!(metainfo.info.piece_length_at(0), Some(32768));
    assert_eq!(metainfo.info.piece_length_at(1), Some(32768));
    // 92063 - 2 * 32768
    assert_eq!(metainfo.info.piece_length_at(2), Some(26527));
    assert_eq!(metainfo.info.piece_length_at(3), None);
}

#[test]
fn test_exact_multiple_last_piece() {
    let data = sample_torrent("http://t/a", 65536, 32768, 2);
    let metainfo = Metainfo::from_bytes(&data).unwrap();
    assert_eq!(metainfo.info.piece_length_at(1), Some(32768));
}

#[test]
fn test_missing_announce() {
    let data = b"d4:infod6:lengthi1e4:name1:a12:piece lengthi1e6:pieces20:aaaaaaaaaaaaaaaaaaaaee";
    assert!(matches!(
        Metainfo::from_bytes(data),
        Err(MetainfoError::MissingField("announce"))
    ));
}

#[test]
fn test_wrong_type_for_length() {
    let data =
        b"d8:announce10:http://t/a4:infod6:length3:abc4:name1:a12:piece lengthi1e6:pieces20:aaaaaaaaaaaaaaaaaaaaee";
    assert!(matches!(
        Metainfo::from_bytes(data),
        Err(MetainfoError::InvalidField("length"))
    ));
}

#[test]
fn test_pieces_not_multiple_of_20() {
    let data =
        b"d8:announce10:http://t/a4:infod6:lengthi1e4:name1:a12:piece lengthi1e6:pieces19:aaaaaaaaaaaaaaaaaaaee";
    assert!(matches!(
        Metainfo::from_bytes(data),
        Err(MetainfoError::InvalidPiecesLength(19))
    ));
}

#[test]
fn test_piece_count_mismatch() {
    // length 92063 with piece_length 32768 needs 3 pieces, not 2
    let data = sample_torrent("http://t/a", 92063, 32768, 2);
    assert!(matches!(
        Metainfo::from_bytes(&data),
        Err(MetainfoError::PieceCountMismatch {
            expected: 3,
            actual: 2
        })
    ));
}

#[test]
fn test_url_encode_info_hash() {
    let hash = InfoHash::from_bytes([0xab; 20]);
    assert_eq!(hash.url_encode(), "%ab".repeat(20));
}
