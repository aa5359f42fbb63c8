use std::collections::BTreeMap;
use std::io::Cursor;

use bytes::Bytes;

use super::*;

#[test]
fn test_decode_integer() {
    assert_eq!(decode(b"i42e").unwrap(), Value::Integer(42));
    assert_eq!(decode(b"i-17e").unwrap(), Value::Integer(-17));
    assert_eq!(decode(b"i0e").unwrap(), Value::Integer(0));
}

#[test]
fn test_decode_integer_lenient() {
    // Leading zeros and -0 are tolerated on decode
    assert_eq!(decode(b"i007e").unwrap(), Value::Integer(7));
    assert_eq!(decode(b"i-0e").unwrap(), Value::Integer(0));
}

#[test]
fn test_decode_integer_invalid() {
    assert!(matches!(
        decode(b"ie"),
        Err(BencodeError::InvalidInteger(_))
    ));
    assert!(matches!(
        decode(b"i12x3e"),
        Err(BencodeError::InvalidInteger(_))
    ));
    // Overflows i64
    assert!(matches!(
        decode(b"i99999999999999999999e"),
        Err(BencodeError::InvalidInteger(_))
    ));
}

#[test]
fn test_decode_bytes() {
    assert_eq!(
        decode(b"5:hello").unwrap(),
        Value::Bytes(Bytes::from_static(b"hello"))
    );
    assert_eq!(
        decode(b"0:").unwrap(),
        Value::Bytes(Bytes::from_static(b""))
    );
}

#[test]
fn test_decode_bytes_binary_payload() {
    // Non-UTF-8 content is preserved byte for byte
    let data = b"4:\xff\x00\xfe\x01";
    assert_eq!(
        decode(data).unwrap(),
        Value::Bytes(Bytes::from_static(b"\xff\x00\xfe\x01"))
    );
}

#[test]
fn test_decode_list() {
    let result = decode(b"l5:helloi3ee").unwrap();
    match result {
        Value::List(l) => {
            assert_eq!(l.len(), 2);
            assert_eq!(l[0], Value::Bytes(Bytes::from_static(b"hello")));
            assert_eq!(l[1], Value::Integer(3));
        }
        _ => panic!("expected list"),
    }
}

#[test]
fn test_decode_dict() {
    let result = decode(b"d3:foo3:bar5:helloi52ee").unwrap();
    assert_eq!(result.get(b"foo").and_then(|v| v.as_str()), Some("bar"));
    assert_eq!(result.get(b"hello").and_then(|v| v.as_integer()), Some(52));
}

#[test]
fn test_decode_dict_key_must_be_string() {
    assert!(matches!(
        decode(b"di1ei2ee"),
        Err(BencodeError::InvalidDictKey)
    ));
}

#[test]
fn test_decode_truncated() {
    assert!(matches!(decode(b""), Err(BencodeError::UnexpectedEof)));
    assert!(matches!(decode(b"i42"), Err(BencodeError::UnexpectedEof)));
    assert!(matches!(decode(b"5:hel"), Err(BencodeError::UnexpectedEof)));
    assert!(matches!(
        decode(b"l5:hello"),
        Err(BencodeError::UnexpectedEof)
    ));
    assert!(matches!(
        decode(b"d3:foo"),
        Err(BencodeError::UnexpectedEof)
    ));
}

#[test]
fn test_decode_unexpected_char() {
    assert!(matches!(
        decode(b"x"),
        Err(BencodeError::UnexpectedChar('x'))
    ));
}

#[test]
fn test_decode_trailing_data() {
    assert!(matches!(
        decode(b"i42eextra"),
        Err(BencodeError::TrailingData)
    ));
}

#[test]
fn test_decode_nesting_limit() {
    let mut deep = vec![b'l'; 100];
    deep.extend(vec![b'e'; 100]);
    assert!(matches!(decode(&deep), Err(BencodeError::NestingTooDeep)));
}

#[test]
fn test_decode_streaming_from_reader() {
    // Streaming decode pulls exactly one value and leaves the rest
    let mut cursor = Cursor::new(b"l4:spami42eeTRAILER".to_vec());
    let mut decoder = Decoder::new(&mut cursor);
    let value = decoder.decode_value().unwrap();

    assert_eq!(value.as_list().unwrap().len(), 2);
    assert_eq!(decoder.position(), 12);

    let mut rest = String::new();
    std::io::Read::read_to_string(&mut cursor, &mut rest).unwrap();
    assert_eq!(rest, "TRAILER");
}

#[test]
fn test_decode_dict_spans() {
    let data = b"d8:announce9:http://tr4:infod6:lengthi3eee";
    let entries = decode_dict_spans(data).unwrap();

    let (announce, _) = &entries[b"announce".as_slice()];
    assert_eq!(announce.as_str(), Some("http://tr"));

    let (info, span) = &entries[b"info".as_slice()];
    assert!(info.as_dict().is_some());
    assert_eq!(&data[span.clone()], b"d6:lengthi3ee");
}

#[test]
fn test_decode_dict_spans_rejects_non_dict() {
    assert!(decode_dict_spans(b"i42e").is_err());
    assert!(decode_dict_spans(b"le").is_err());
}

#[test]
fn test_encode_integer() {
    assert_eq!(encode(&Value::Integer(42)), b"i42e");
    assert_eq!(encode(&Value::Integer(-42)), b"i-42e");
    assert_eq!(encode(&Value::Integer(0)), b"i0e");
}

#[test]
fn test_encode_bytes() {
    assert_eq!(encode(&Value::Bytes(Bytes::from_static(b"spam"))), b"4:spam");
}

#[test]
fn test_encode_dict_sorted_keys() {
    let mut dict = BTreeMap::new();
    dict.insert(Bytes::from_static(b"zz"), Value::Integer(1));
    dict.insert(Bytes::from_static(b"aa"), Value::Integer(2));
    assert_eq!(encode(&Value::Dict(dict)), b"d2:aai2e2:zzi1ee");
}

#[test]
fn test_roundtrip() {
    // Canonically sorted input reproduces itself
    let original: &[u8] =
        b"d8:announce15:http://test.com4:infod4:name4:test12:piece lengthi16384eee";
    let decoded = decode(original).unwrap();
    assert_eq!(encode(&decoded), original);
}

#[test]
fn test_to_json() {
    let value = decode(b"d4:listl2:abi-1ee3:numi5e3:str5:helloe").unwrap();
    let json = to_json(&value);
    assert_eq!(json["num"], 5);
    assert_eq!(json["str"], "hello");
    assert_eq!(json["list"][0], "ab");
    assert_eq!(json["list"][1], -1);
}

#[test]
fn test_value_accessors() {
    let value = Value::Integer(42);
    assert_eq!(value.as_integer(), Some(42));
    assert_eq!(value.as_str(), None);
    assert_eq!(value.as_list(), None);

    let value = Value::from("hi");
    assert_eq!(value.as_str(), Some("hi"));
    assert_eq!(value.as_bytes(), Some(b"hi".as_slice()));
}
