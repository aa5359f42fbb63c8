use std::path::Path;

use bytes::Bytes;
use sha1::{Digest, Sha1};
use tracing::{debug, info};

use super::error::DownloadError;
use super::piece::{block_count, block_length, PieceBuffer};
use crate::constants::BLOCK_SIZE;
use crate::metainfo::Metainfo;
use crate::peer::{Bitfield, Message, PeerConnection};
use crate::storage::write_piece_atomic;

/// Downloads single pieces over one peer connection.
///
/// The downloader owns the connection for its lifetime; any protocol or I/O
/// error aborts the session and the connection is closed when the
/// downloader is dropped.
pub struct PieceDownloader<'a> {
    conn: PeerConnection,
    metainfo: &'a Metainfo,
}

impl<'a> PieceDownloader<'a> {
    /// Wraps a freshly handshaken connection.
    ///
    /// The connection must not have exchanged any post-handshake messages
    /// yet: the peer's bitfield is still in flight and is the first thing
    /// [`download`](Self::download) expects to read.
    pub fn new(conn: PeerConnection, metainfo: &'a Metainfo) -> Self {
        Self { conn, metainfo }
    }

    /// Downloads and verifies piece `index`, returning the piece bytes.
    ///
    /// Runs the full exchange: waits for the peer's `Bitfield`, sends
    /// `Interested`, waits for `Unchoke`, then requests the piece's blocks
    /// one at a time, validating that every `Piece` reply matches the
    /// outstanding request. The assembled bytes are verified against the
    /// torrent's piece hash before being returned.
    pub fn download(&mut self, index: u32) -> Result<Bytes, DownloadError> {
        let piece_length = self
            .metainfo
            .info
            .piece_length_at(index)
            .ok_or(DownloadError::InvalidPieceIndex(index))?;

        let bitfield = match self.conn.receive()? {
            Message::Bitfield(bits) => Bitfield::from_bytes(bits),
            other => return Err(unexpected("Bitfield", &other)),
        };

        if !bitfield.has_piece(index as usize) {
            return Err(DownloadError::PieceUnavailable(index));
        }

        self.conn.send(&Message::Interested)?;

        match self.conn.receive()? {
            Message::Unchoke => {}
            other => return Err(unexpected("Unchoke", &other)),
        }

        debug!(piece = index, len = piece_length, "unchoked, requesting blocks");

        let mut buffer = PieceBuffer::new(piece_length);
        for block_index in 0..block_count(piece_length) {
            let begin = block_index * BLOCK_SIZE;
            let length = block_length(piece_length, block_index);

            self.conn.send(&Message::Request {
                index,
                begin,
                length,
            })?;

            let (got_index, got_begin, data) = match self.conn.receive()? {
                Message::Piece { index, begin, data } => (index, begin, data),
                other => return Err(unexpected("Piece", &other)),
            };

            if got_index != index || got_begin != begin {
                return Err(DownloadError::BlockMismatch {
                    expected_index: index,
                    expected_begin: begin,
                    index: got_index,
                    begin: got_begin,
                });
            }

            buffer.write_block(begin, &data)?;
            debug!(piece = index, begin, length, "block received");
        }

        let data = buffer.into_bytes();

        let mut hasher = Sha1::new();
        hasher.update(&data);
        let actual: [u8; 20] = hasher.finalize().into();

        let expected = self
            .metainfo
            .info
            .piece_hash(index)
            .ok_or(DownloadError::InvalidPieceIndex(index))?;

        if &actual != expected {
            return Err(DownloadError::HashMismatch(index));
        }

        info!(piece = index, len = data.len(), "piece verified");
        Ok(data)
    }

    /// Downloads piece `index` and writes it to `path` atomically.
    ///
    /// Nothing is written unless the piece verified.
    pub fn download_to(&mut self, index: u32, path: &Path) -> Result<(), DownloadError> {
        let data = self.download(index)?;
        write_piece_atomic(path, &data)?;
        Ok(())
    }
}

fn unexpected(expected: &'static str, got: &Message) -> DownloadError {
    DownloadError::Protocol(format!("expected {}, got {}", expected, got.name()))
}
