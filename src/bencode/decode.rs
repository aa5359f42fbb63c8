use std::collections::BTreeMap;
use std::io::BufRead;
use std::ops::Range;

use bytes::Bytes;

use super::error::BencodeError;
use super::value::Value;

const MAX_DEPTH: usize = 64;

/// Decodes a bencode value from a byte slice.
///
/// The input must contain exactly one complete bencode value with no trailing
/// data.
///
/// # Errors
///
/// Returns an error if:
/// - The input is empty or truncated ([`BencodeError::UnexpectedEof`])
/// - The input contains invalid bencode syntax
/// - The nesting depth exceeds 64 levels ([`BencodeError::NestingTooDeep`])
/// - There is data after the value ([`BencodeError::TrailingData`])
///
/// # Examples
///
/// ```
/// use bitfetch::bencode::decode;
///
/// let int = decode(b"i42e").unwrap();
/// assert_eq!(int.as_integer(), Some(42));
///
/// let string = decode(b"5:hello").unwrap();
/// assert_eq!(string.as_str(), Some("hello"));
///
/// let list = decode(b"l5:helloi3ee").unwrap();
/// assert_eq!(list.as_list().unwrap().len(), 2);
///
/// let dict = decode(b"d3:foo3:bar5:helloi52ee").unwrap();
/// assert_eq!(dict.get(b"hello").and_then(|v| v.as_integer()), Some(52));
/// ```
pub fn decode(data: &[u8]) -> Result<Value, BencodeError> {
    let mut decoder = Decoder::new(data);
    let value = decoder.decode_value()?;

    if decoder.position() != data.len() as u64 {
        return Err(BencodeError::TrailingData);
    }

    Ok(value)
}

/// Decodes a top-level bencode dictionary from a byte slice, recording the
/// byte range each entry's value occupied in the input.
///
/// The ranges make it possible to recover the exact encoded bytes of a
/// sub-value, which is how the torrent info hash is computed without
/// re-encoding.
///
/// # Examples
///
/// ```
/// use bitfetch::bencode::decode_dict_spans;
///
/// let data = b"d3:fooi7e3:bar4:spame";
/// let entries = decode_dict_spans(data).unwrap();
/// let (_, span) = &entries[b"foo".as_slice()];
/// assert_eq!(&data[span.clone()], b"i7e");
/// ```
pub fn decode_dict_spans(
    data: &[u8],
) -> Result<BTreeMap<Bytes, (Value, Range<usize>)>, BencodeError> {
    let mut decoder = Decoder::new(data);

    match decoder.peek()? {
        Some(b'd') => decoder.bump(),
        Some(c) => return Err(BencodeError::UnexpectedChar(c as char)),
        None => return Err(BencodeError::UnexpectedEof),
    }

    let mut entries = BTreeMap::new();
    loop {
        match decoder.peek()? {
            Some(b'e') => {
                decoder.bump();
                break;
            }
            Some(c) if c.is_ascii_digit() => {}
            Some(_) => return Err(BencodeError::InvalidDictKey),
            None => return Err(BencodeError::UnexpectedEof),
        }

        let key = decoder.decode_bytes()?;
        let start = decoder.position() as usize;
        let value = decoder.decode_at_depth(1)?;
        let end = decoder.position() as usize;
        entries.insert(key, (value, start..end));
    }

    if decoder.position() != data.len() as u64 {
        return Err(BencodeError::TrailingData);
    }

    Ok(entries)
}

/// A streaming bencode decoder.
///
/// Decoding works on any buffered reader with one byte of lookahead, so a
/// value can be pulled directly off a file or socket without holding the
/// whole input in memory. [`position`](Decoder::position) reports the number
/// of bytes consumed so far.
pub struct Decoder<R> {
    reader: R,
    consumed: u64,
}

impl<R: BufRead> Decoder<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            consumed: 0,
        }
    }

    /// Bytes consumed from the underlying reader so far.
    pub fn position(&self) -> u64 {
        self.consumed
    }

    /// Decodes the next complete value from the reader.
    pub fn decode_value(&mut self) -> Result<Value, BencodeError> {
        self.decode_at_depth(0)
    }

    fn decode_at_depth(&mut self, depth: usize) -> Result<Value, BencodeError> {
        if depth > MAX_DEPTH {
            return Err(BencodeError::NestingTooDeep);
        }

        match self.peek()? {
            Some(b'i') => self.decode_integer(),
            Some(b'l') => self.decode_list(depth),
            Some(b'd') => self.decode_dict(depth),
            Some(c) if c.is_ascii_digit() => Ok(Value::Bytes(self.decode_bytes()?)),
            Some(c) => Err(BencodeError::UnexpectedChar(c as char)),
            None => Err(BencodeError::UnexpectedEof),
        }
    }

    fn decode_integer(&mut self) -> Result<Value, BencodeError> {
        self.bump();

        let digits = self.take_until(b'e')?;
        let int_str = std::str::from_utf8(&digits)
            .map_err(|_| BencodeError::InvalidInteger("invalid utf8".into()))?;

        if int_str.is_empty() {
            return Err(BencodeError::InvalidInteger("empty".into()));
        }

        // Lenient mode: `-0` and leading zeros are accepted for interop with
        // encoders that emit them. The canonical encoder never produces them.
        let value: i64 = int_str
            .parse()
            .map_err(|_| BencodeError::InvalidInteger(int_str.into()))?;

        Ok(Value::Integer(value))
    }

    fn decode_bytes(&mut self) -> Result<Bytes, BencodeError> {
        let digits = self.take_until(b':')?;
        let len_str =
            std::str::from_utf8(&digits).map_err(|_| BencodeError::InvalidStringLength)?;

        if len_str.is_empty() || !len_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(BencodeError::InvalidStringLength);
        }

        let len: usize = len_str
            .parse()
            .map_err(|_| BencodeError::InvalidStringLength)?;

        let mut payload = vec![0u8; len];
        self.reader.read_exact(&mut payload).map_err(|e| {
            if e.kind() == std::io::ErrorKind::UnexpectedEof {
                BencodeError::UnexpectedEof
            } else {
                BencodeError::Io(e)
            }
        })?;
        self.consumed += len as u64;

        Ok(Bytes::from(payload))
    }

    fn decode_list(&mut self, depth: usize) -> Result<Value, BencodeError> {
        self.bump();
        let mut list = Vec::new();

        loop {
            match self.peek()? {
                Some(b'e') => {
                    self.bump();
                    return Ok(Value::List(list));
                }
                Some(_) => list.push(self.decode_at_depth(depth + 1)?),
                None => return Err(BencodeError::UnexpectedEof),
            }
        }
    }

    fn decode_dict(&mut self, depth: usize) -> Result<Value, BencodeError> {
        self.bump();
        let mut dict = BTreeMap::new();

        loop {
            match self.peek()? {
                Some(b'e') => {
                    self.bump();
                    return Ok(Value::Dict(dict));
                }
                Some(c) if c.is_ascii_digit() => {}
                Some(_) => return Err(BencodeError::InvalidDictKey),
                None => return Err(BencodeError::UnexpectedEof),
            }

            let key = self.decode_bytes()?;
            let value = self.decode_at_depth(depth + 1)?;
            dict.insert(key, value);
        }
    }

    /// One-byte lookahead without consuming.
    fn peek(&mut self) -> Result<Option<u8>, BencodeError> {
        let buf = self.reader.fill_buf()?;
        Ok(buf.first().copied())
    }

    /// Consumes the byte previously seen by `peek`.
    fn bump(&mut self) {
        self.reader.consume(1);
        self.consumed += 1;
    }

    /// Reads bytes up to and including `delim`, returning everything before it.
    fn take_until(&mut self, delim: u8) -> Result<Vec<u8>, BencodeError> {
        let mut out = Vec::new();
        loop {
            match self.peek()? {
                Some(b) if b == delim => {
                    self.bump();
                    return Ok(out);
                }
                Some(b) => {
                    out.push(b);
                    self.bump();
                }
                None => return Err(BencodeError::UnexpectedEof),
            }
        }
    }
}
