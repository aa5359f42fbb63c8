use bytes::Bytes;

use super::error::DownloadError;
use crate::constants::BLOCK_SIZE;

/// Number of blocks in a piece of the given length.
pub fn block_count(piece_length: u64) -> u32 {
    piece_length.div_ceil(BLOCK_SIZE as u64) as u32
}

/// Length of a specific block within a piece. Every block is
/// [`BLOCK_SIZE`] bytes except the last, which holds the remainder.
pub fn block_length(piece_length: u64, block_index: u32) -> u32 {
    let offset = block_index as u64 * BLOCK_SIZE as u64;
    let remaining = piece_length.saturating_sub(offset);
    remaining.min(BLOCK_SIZE as u64) as u32
}

/// A pre-sized piece buffer assembled from blocks.
///
/// Blocks are written at their `begin` offset rather than appended, and each
/// offset may be filled exactly once, so assembly stays correct even if
/// requests are ever pipelined.
#[derive(Debug)]
pub struct PieceBuffer {
    data: Vec<u8>,
    filled: Vec<bool>,
}

impl PieceBuffer {
    pub fn new(piece_length: u64) -> Self {
        Self {
            data: vec![0u8; piece_length as usize],
            filled: vec![false; block_count(piece_length) as usize],
        }
    }

    /// Writes one block at its offset within the piece.
    ///
    /// `begin` must be block-aligned and the block must have exactly the
    /// length that position calls for.
    pub fn write_block(&mut self, begin: u32, block: &[u8]) -> Result<(), DownloadError> {
        if begin % BLOCK_SIZE != 0 {
            return Err(DownloadError::Protocol(format!(
                "block offset {} is not block-aligned",
                begin
            )));
        }

        let block_index = (begin / BLOCK_SIZE) as usize;
        if block_index >= self.filled.len() {
            return Err(DownloadError::Protocol(format!(
                "block offset {} is beyond the piece",
                begin
            )));
        }

        let expected = block_length(self.data.len() as u64, block_index as u32) as usize;
        if block.len() != expected {
            return Err(DownloadError::Protocol(format!(
                "block at offset {} has length {}, expected {}",
                begin,
                block.len(),
                expected
            )));
        }

        if self.filled[block_index] {
            return Err(DownloadError::Protocol(format!(
                "block at offset {} already filled",
                begin
            )));
        }

        self.data[begin as usize..begin as usize + block.len()].copy_from_slice(block);
        self.filled[block_index] = true;
        Ok(())
    }

    /// True once every block has been written.
    pub fn is_complete(&self) -> bool {
        self.filled.iter().all(|&f| f)
    }

    /// The assembled piece. Call only after [`is_complete`](Self::is_complete).
    pub fn into_bytes(self) -> Bytes {
        Bytes::from(self.data)
    }
}
