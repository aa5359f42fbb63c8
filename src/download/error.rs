use thiserror::Error;

use crate::peer::PeerError;
use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("peer error: {0}")]
    Peer(#[from] PeerError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("invalid piece index: {0}")]
    InvalidPieceIndex(u32),

    #[error("peer does not have piece {0}")]
    PieceUnavailable(u32),

    #[error("protocol error: {0}")]
    Protocol(String),

    #[error(
        "block mismatch: requested piece {expected_index} offset {expected_begin}, \
         got piece {index} offset {begin}"
    )]
    BlockMismatch {
        expected_index: u32,
        expected_begin: u32,
        index: u32,
        begin: u32,
    },

    #[error("piece {0} hash mismatch")]
    HashMismatch(u32),
}
