//! HTTP tracker protocol (BEP-3)
//!
//! Announces the client to the tracker named in the torrent and parses the
//! compact peer list out of the bencoded response.

mod error;
mod http;
mod response;

pub use error::TrackerError;
pub use http::HttpTracker;
pub use response::{parse_compact_peers, AnnounceResponse};
