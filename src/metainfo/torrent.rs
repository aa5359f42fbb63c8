use bytes::Bytes;

use super::error::MetainfoError;
use super::info_hash::InfoHash;
use crate::bencode::{decode_dict_spans, Value};

/// A parsed single-file torrent.
///
/// # Examples
///
/// ```no_run
/// use bitfetch::metainfo::Metainfo;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let data = std::fs::read("example.torrent")?;
/// let metainfo = Metainfo::from_bytes(&data)?;
///
/// println!("Tracker: {}", metainfo.announce);
/// println!("Size: {} bytes", metainfo.info.length);
/// println!("Info hash: {}", metainfo.info_hash);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Metainfo {
    /// Tracker announce URL.
    pub announce: String,
    /// The info dictionary describing the file and its pieces.
    pub info: Info,
    /// The unique identifier for this torrent (hash of the info dictionary).
    pub info_hash: InfoHash,
    raw_info: Bytes,
}

/// The info dictionary from a single-file torrent.
///
/// The SHA1 hash of this dictionary's bencoded bytes is the info hash.
#[derive(Debug, Clone)]
pub struct Info {
    /// Suggested name for the downloaded file.
    pub name: String,
    /// Total file size in bytes.
    pub length: u64,
    /// Number of bytes per piece (except possibly the last).
    pub piece_length: u64,
    /// SHA1 hash of each piece (20 bytes each).
    pub pieces: Vec<[u8; 20]>,
}

impl Metainfo {
    /// Parses a torrent file from raw bytes.
    ///
    /// The info hash is the SHA1 of the `info` value's bytes exactly as they
    /// appear in the input, so torrents whose info dictionary carries keys
    /// beyond the standard four still hash correctly.
    ///
    /// # Errors
    ///
    /// Returns an error if the data is not valid bencode, required fields
    /// are missing or have the wrong type, or the piece table is
    /// inconsistent with the file length.
    pub fn from_bytes(data: &[u8]) -> Result<Self, MetainfoError> {
        let mut entries = decode_dict_spans(data)?;

        let announce = entries
            .get(b"announce".as_slice())
            .map(|(v, _)| v)
            .ok_or(MetainfoError::MissingField("announce"))?
            .as_str()
            .ok_or(MetainfoError::InvalidField("announce"))?
            .to_string();

        let (info_value, info_span) = entries
            .remove(b"info".as_slice())
            .ok_or(MetainfoError::MissingField("info"))?;

        let raw_info = Bytes::copy_from_slice(&data[info_span]);
        let info_hash = InfoHash::from_info_bytes(&raw_info);

        let info = parse_info(&info_value)?;

        Ok(Self {
            announce,
            info,
            info_hash,
            raw_info,
        })
    }

    /// Returns the raw bencoded info dictionary.
    pub fn raw_info(&self) -> &Bytes {
        &self.raw_info
    }
}

impl Info {
    /// Number of pieces in the torrent.
    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    /// Length in bytes of the piece at `index`.
    ///
    /// Every piece is `piece_length` bytes except the last, which holds the
    /// remainder of the file. Returns `None` for an out-of-range index.
    pub fn piece_length_at(&self, index: u32) -> Option<u64> {
        let count = self.pieces.len() as u64;
        let index = index as u64;
        if index >= count {
            return None;
        }
        if index == count - 1 {
            Some(self.length - (count - 1) * self.piece_length)
        } else {
            Some(self.piece_length)
        }
    }

    /// Expected SHA1 hash of the piece at `index`.
    pub fn piece_hash(&self, index: u32) -> Option<&[u8; 20]> {
        self.pieces.get(index as usize)
    }
}

fn parse_info(value: &Value) -> Result<Info, MetainfoError> {
    let dict = value.as_dict().ok_or(MetainfoError::InvalidField("info"))?;

    let name = dict
        .get(b"name".as_slice())
        .ok_or(MetainfoError::MissingField("name"))?
        .as_str()
        .ok_or(MetainfoError::InvalidField("name"))?
        .to_string();

    let length = dict
        .get(b"length".as_slice())
        .ok_or(MetainfoError::MissingField("length"))?
        .as_integer()
        .filter(|l| *l >= 0)
        .ok_or(MetainfoError::InvalidField("length"))? as u64;

    let piece_length = dict
        .get(b"piece length".as_slice())
        .ok_or(MetainfoError::MissingField("piece length"))?
        .as_integer()
        .filter(|l| *l > 0)
        .ok_or(MetainfoError::InvalidField("piece length"))? as u64;

    let pieces_bytes = dict
        .get(b"pieces".as_slice())
        .ok_or(MetainfoError::MissingField("pieces"))?
        .as_bytes()
        .ok_or(MetainfoError::InvalidField("pieces"))?;

    if pieces_bytes.len() % 20 != 0 {
        return Err(MetainfoError::InvalidPiecesLength(pieces_bytes.len()));
    }

    let pieces: Vec<[u8; 20]> = pieces_bytes
        .chunks_exact(20)
        .map(|chunk| {
            let mut hash = [0u8; 20];
            hash.copy_from_slice(chunk);
            hash
        })
        .collect();

    let expected = length.div_ceil(piece_length);
    if pieces.len() as u64 != expected {
        return Err(MetainfoError::PieceCountMismatch {
            expected,
            actual: pieces.len() as u64,
        });
    }

    Ok(Info {
        name,
        length,
        piece_length,
        pieces,
    })
}
