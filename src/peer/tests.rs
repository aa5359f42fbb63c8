use super::*;
use bytes::Bytes;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

#[test]
fn test_handshake_encode_decode() {
    let info_hash = [1u8; 20];
    let peer_id = [2u8; 20];

    let handshake = Handshake::new(info_hash, peer_id);
    let encoded = handshake.encode();
    assert_eq!(encoded.len(), HANDSHAKE_LEN);
    assert_eq!(encoded[0], 19);
    assert_eq!(&encoded[1..20], b"BitTorrent protocol");

    let decoded = Handshake::decode(&encoded).unwrap();
    assert_eq!(decoded.info_hash, info_hash);
    assert_eq!(decoded.peer_id, peer_id);
    assert_eq!(decoded.reserved, [0u8; 8]);
}

#[test]
fn test_handshake_rejects_wrong_length_byte() {
    let mut encoded = Handshake::new([1u8; 20], [2u8; 20]).encode().to_vec();
    encoded[0] = 18;
    assert!(matches!(
        Handshake::decode(&encoded),
        Err(PeerError::InvalidHandshake)
    ));
}

#[test]
fn test_handshake_rejects_wrong_protocol() {
    let mut encoded = Handshake::new([1u8; 20], [2u8; 20]).encode().to_vec();
    encoded[1] = b'X';
    assert!(matches!(
        Handshake::decode(&encoded),
        Err(PeerError::InvalidHandshake)
    ));
}

#[test]
fn test_message_encode_decode_roundtrip() {
    let messages = vec![
        Message::KeepAlive,
        Message::Choke,
        Message::Unchoke,
        Message::Interested,
        Message::Bitfield(Bytes::from_static(&[0b1010_0000])),
        Message::Request {
            index: 1,
            begin: 16384,
            length: 16384,
        },
        Message::Piece {
            index: 1,
            begin: 16384,
            data: Bytes::from_static(b"block data"),
        },
    ];

    for message in messages {
        let encoded = message.encode();
        let decoded = Message::decode(encoded).unwrap();
        assert_eq!(decoded, message);
    }
}

#[test]
fn test_message_request_layout() {
    let encoded = Message::Request {
        index: 0,
        begin: 0,
        length: 16384,
    }
    .encode();

    assert_eq!(&encoded[0..4], &[0, 0, 0, 13]);
    assert_eq!(encoded[4], 6);
    assert_eq!(&encoded[5..9], &[0, 0, 0, 0]);
    assert_eq!(&encoded[13..17], &[0, 0, 0x40, 0]);
}

#[test]
fn test_message_decode_unknown_id() {
    let frame = Bytes::from_static(&[0, 0, 0, 1, 9]);
    assert!(matches!(
        Message::decode(frame),
        Err(PeerError::InvalidMessageId(9))
    ));
}

#[test]
fn test_message_decode_keep_alive() {
    let frame = Bytes::from_static(&[0, 0, 0, 0]);
    assert_eq!(Message::decode(frame).unwrap(), Message::KeepAlive);
}

#[test]
fn test_message_decode_truncated_frame() {
    let frame = Bytes::from_static(&[0, 0, 0, 5, 7, 1]);
    assert!(matches!(
        Message::decode(frame),
        Err(PeerError::InvalidMessage(_))
    ));
}

#[test]
fn test_bitfield_indexing() {
    let bf = Bitfield::from_bytes(Bytes::from_static(&[0b1000_0001, 0b0100_0000]));
    assert!(bf.has_piece(0));
    assert!(!bf.has_piece(1));
    assert!(bf.has_piece(7));
    assert!(!bf.has_piece(8));
    assert!(bf.has_piece(9));
    assert!(!bf.has_piece(100));
}

#[test]
fn test_bitfield_set() {
    let mut bf = Bitfield::new(10);
    assert!(!bf.has_piece(9));
    bf.set_piece(9);
    assert!(bf.has_piece(9));
    assert_eq!(bf.as_bytes().len(), 2);
}

#[test]
fn test_peer_id_hex() {
    let id = PeerId::default();
    assert_eq!(id.as_bytes(), b"00112233445566778899");
    assert_eq!(id.to_hex(), "3030313132323333343435353636373738383939");
}

#[test]
fn test_connect_performs_handshake() {
    let info_hash = [7u8; 20];
    let remote_id = [9u8; 20];

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let server = thread::spawn(move || {
        let (mut socket, _) = listener.accept().unwrap();

        let mut received = [0u8; HANDSHAKE_LEN];
        socket.read_exact(&mut received).unwrap();
        let theirs = Handshake::decode(&received).unwrap();
        assert_eq!(theirs.info_hash, info_hash);
        assert_eq!(&theirs.peer_id, b"00112233445566778899");

        socket
            .write_all(&Handshake::new(info_hash, remote_id).encode())
            .unwrap();

        // Keep-alive first; the client should skip it and see Unchoke
        socket.write_all(&Message::KeepAlive.encode()).unwrap();
        socket.write_all(&Message::Unchoke.encode()).unwrap();
    });

    let mut conn = PeerConnection::connect(addr, info_hash, PeerId::default()).unwrap();
    assert_eq!(conn.peer_id.as_bytes(), &remote_id);

    assert_eq!(conn.receive().unwrap(), Message::Unchoke);

    server.join().unwrap();
}

#[test]
fn test_connect_rejects_wrong_info_hash() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let server = thread::spawn(move || {
        let (mut socket, _) = listener.accept().unwrap();
        let mut received = [0u8; HANDSHAKE_LEN];
        socket.read_exact(&mut received).unwrap();
        socket
            .write_all(&Handshake::new([0xffu8; 20], [9u8; 20]).encode())
            .unwrap();
    });

    let result = PeerConnection::connect(addr, [7u8; 20], PeerId::default());
    assert!(matches!(result, Err(PeerError::InfoHashMismatch)));

    server.join().unwrap();
}
