//! Torrent metainfo handling (BEP-3)
//!
//! Parses single-file `.torrent` files into a typed model and derives the
//! info hash from the raw bytes of the `info` dictionary.

mod error;
mod info_hash;
mod torrent;

pub use error::MetainfoError;
pub use info_hash::InfoHash;
pub use torrent::{Info, Metainfo};

#[cfg(test)]
mod tests;
