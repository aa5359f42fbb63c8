use bytes::Bytes;
use std::collections::BTreeMap;

/// A decoded bencode value.
///
/// The four wire kinds share one tagged enum. Consumers pattern-match on it
/// or use the `as_*` projections to pull typed fields out of torrent files
/// and tracker responses, failing upward when a field has the wrong shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A signed 64-bit integer.
    Integer(i64),
    /// A byte string. Not necessarily UTF-8: piece hashes and compact peer
    /// lists arrive as raw binary.
    Bytes(Bytes),
    /// An ordered list of values.
    List(Vec<Value>),
    /// A dictionary keyed by byte strings, held in raw-byte key order.
    Dict(BTreeMap<Bytes, Value>),
}

impl Value {
    /// Projects an integer out of the value.
    ///
    /// # Examples
    ///
    /// ```
    /// use bitfetch::bencode::decode;
    ///
    /// let info = decode(b"d6:lengthi92063e12:piece lengthi32768ee").unwrap();
    /// assert_eq!(info.get(b"length").and_then(|v| v.as_integer()), Some(92063));
    /// assert_eq!(info.get(b"name").and_then(|v| v.as_integer()), None);
    /// ```
    pub fn as_integer(&self) -> Option<i64> {
        if let Value::Integer(n) = self {
            Some(*n)
        } else {
            None
        }
    }

    /// Projects the raw bytes out of a byte string.
    ///
    /// # Examples
    ///
    /// ```
    /// use bitfetch::bencode::decode;
    ///
    /// let response = decode(b"d5:peers6:\x01\x02\x03\x04\x1a\xe1e").unwrap();
    /// let peers = response.get(b"peers").and_then(|v| v.as_bytes()).unwrap();
    /// assert_eq!(peers.len() % 6, 0);
    /// ```
    pub fn as_bytes(&self) -> Option<&[u8]> {
        if let Value::Bytes(bytes) = self {
            Some(bytes.as_ref())
        } else {
            None
        }
    }

    /// Projects a byte string as UTF-8 text.
    ///
    /// Byte strings carry no encoding on the wire; this only succeeds for
    /// fields that happen to hold valid UTF-8, like `announce` or `name`.
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes().and_then(|bytes| std::str::from_utf8(bytes).ok())
    }

    /// Projects the elements of a list.
    pub fn as_list(&self) -> Option<&[Value]> {
        if let Value::List(items) = self {
            Some(items.as_slice())
        } else {
            None
        }
    }

    /// Projects the entries of a dictionary.
    pub fn as_dict(&self) -> Option<&BTreeMap<Bytes, Value>> {
        if let Value::Dict(entries) = self {
            Some(entries)
        } else {
            None
        }
    }

    /// Looks up a dictionary entry by key.
    ///
    /// Returns `None` both for a missing key and for a value that is not a
    /// dictionary, so lookups chain without a separate shape check.
    ///
    /// # Examples
    ///
    /// ```
    /// use bitfetch::bencode::decode;
    ///
    /// let root = decode(b"d8:announce12:http://t/anne").unwrap();
    /// assert_eq!(root.get(b"announce").and_then(|v| v.as_str()), Some("http://t/ann"));
    /// assert_eq!(root.get(b"comment"), None);
    /// ```
    pub fn get(&self, key: &[u8]) -> Option<&Value> {
        match self {
            Value::Dict(entries) => entries.get(key),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Bytes(Bytes::copy_from_slice(s.as_bytes()))
    }
}

impl From<Bytes> for Value {
    fn from(bytes: Bytes) -> Self {
        Value::Bytes(bytes)
    }
}
