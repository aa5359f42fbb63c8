use thiserror::Error;

/// Errors that can occur during peer communication.
#[derive(Debug, Error)]
pub enum PeerError {
    /// Network I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A socket read or write exceeded its timeout.
    #[error("timeout")]
    Timeout,

    /// The connection was closed by the peer.
    #[error("connection closed")]
    ConnectionClosed,

    /// The peer sent a malformed handshake (wrong length byte or protocol
    /// string).
    #[error("invalid handshake")]
    InvalidHandshake,

    /// The peer's echoed info hash doesn't match the torrent's.
    #[error("info hash mismatch")]
    InfoHashMismatch,

    /// Received an unknown message ID.
    #[error("invalid message id: {0}")]
    InvalidMessageId(u8),

    /// Received a malformed protocol message.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
