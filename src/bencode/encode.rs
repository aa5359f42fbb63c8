use super::value::Value;

/// Serializes a value in canonical bencode form.
///
/// Integers come out as `i<decimal>e` with no leading zeros, byte strings as
/// `<length>:<bytes>`, and dictionary keys in raw-byte order (the dictionary
/// representation already holds them sorted). Serialization into a byte
/// buffer cannot fail.
///
/// # Examples
///
/// ```
/// use bitfetch::bencode::{decode, encode};
///
/// let value = decode(b"d3:cow3:moo4:spami7ee").unwrap();
/// assert_eq!(encode(&value), b"d3:cow3:moo4:spami7ee");
/// ```
pub fn encode(value: &Value) -> Vec<u8> {
    let mut out = Vec::new();
    write_value(value, &mut out);
    out
}

fn write_value(value: &Value, out: &mut Vec<u8>) {
    match value {
        Value::Integer(n) => {
            out.push(b'i');
            out.extend_from_slice(n.to_string().as_bytes());
            out.push(b'e');
        }
        Value::Bytes(bytes) => write_string(bytes, out),
        Value::List(items) => {
            out.push(b'l');
            for item in items {
                write_value(item, out);
            }
            out.push(b'e');
        }
        Value::Dict(entries) => {
            out.push(b'd');
            for (key, entry) in entries {
                write_string(key, out);
                write_value(entry, out);
            }
            out.push(b'e');
        }
    }
}

// Keys and byte-string values share the <length>:<bytes> form.
fn write_string(bytes: &[u8], out: &mut Vec<u8>) {
    out.extend_from_slice(bytes.len().to_string().as_bytes());
    out.push(b':');
    out.extend_from_slice(bytes);
}
