//! bitfetch - a minimal BitTorrent client
//!
//! Parses single-file torrent metainfo, announces to an HTTP tracker,
//! handshakes with a peer over TCP, and downloads one piece with SHA1
//! verification. All I/O is synchronous and blocking; one invocation drives
//! one tracker request and one peer session.
//!
//! # Modules
//!
//! - [`bencode`] - BEP-3 Bencode encoding/decoding
//! - [`metainfo`] - Torrent metainfo and info hash
//! - [`tracker`] - HTTP tracker announce and compact peer lists
//! - [`peer`] - Peer wire protocol: handshake and message framing
//! - [`download`] - Single-piece download state machine
//! - [`storage`] - Atomic piece writes

pub mod bencode;
pub mod constants;
pub mod download;
pub mod metainfo;
pub mod peer;
pub mod storage;
pub mod tracker;

pub use bencode::{decode, encode, BencodeError, Value};
pub use download::{DownloadError, PieceDownloader};
pub use metainfo::{Info, InfoHash, Metainfo, MetainfoError};
pub use peer::{Bitfield, Handshake, Message, PeerConnection, PeerError, PeerId};
pub use storage::{write_piece_atomic, StorageError};
pub use tracker::{AnnounceResponse, HttpTracker, TrackerError};
