//! Peer wire protocol (BEP-3)
//!
//! TCP handshake and length-prefixed message framing between two BitTorrent
//! clients. Only the message subset needed to download a piece is
//! implemented.

mod bitfield;
mod connection;
mod error;
mod message;
mod peer_id;

pub use bitfield::Bitfield;
pub use connection::PeerConnection;
pub use error::PeerError;
pub use message::{Handshake, Message, MessageId, HANDSHAKE_LEN};
pub use peer_id::PeerId;

#[cfg(test)]
mod tests;
