//! Bencode encoding and decoding (BEP-3)
//!
//! Bencode is the encoding used by BitTorrent for storing and transmitting
//! loosely structured data: torrent files and tracker responses are both
//! bencoded dictionaries.

mod decode;
mod encode;
mod error;
mod json;
mod value;

pub use decode::{decode, decode_dict_spans, Decoder};
pub use encode::encode;
pub use error::BencodeError;
pub use json::to_json;
pub use value::Value;

#[cfg(test)]
mod tests;
