use std::io::{ErrorKind, Read, Write};
use std::net::{SocketAddr, TcpStream};

use bytes::{BufMut, BytesMut};
use tracing::debug;

use super::error::PeerError;
use super::message::{Handshake, Message, HANDSHAKE_LEN};
use super::peer_id::PeerId;
use crate::constants::{CONNECT_TIMEOUT, MAX_MESSAGE_SIZE, PEER_IO_TIMEOUT};

/// A connection to a single remote peer.
///
/// The connection is synchronous: every send and receive blocks the calling
/// thread, with socket-level timeouts bounding each operation. Dropping the
/// connection closes the socket.
pub struct PeerConnection {
    stream: TcpStream,
    /// The remote peer's address.
    pub addr: SocketAddr,
    /// The remote peer's identity from its handshake.
    pub peer_id: PeerId,
}

impl PeerConnection {
    /// Dials the peer and performs the handshake exchange.
    ///
    /// Writes our 68-byte handshake, reads exactly 68 bytes back, and
    /// validates the protocol string and echoed info hash.
    ///
    /// # Errors
    ///
    /// [`PeerError::InvalidHandshake`] if the reply has the wrong length
    /// byte or protocol string, [`PeerError::InfoHashMismatch`] if the peer
    /// is serving a different torrent, or an I/O error if the dial or
    /// either transfer fails.
    pub fn connect(
        addr: SocketAddr,
        info_hash: [u8; 20],
        our_peer_id: PeerId,
    ) -> Result<Self, PeerError> {
        let stream = TcpStream::connect_timeout(&addr, CONNECT_TIMEOUT)?;
        stream.set_read_timeout(Some(PEER_IO_TIMEOUT))?;
        stream.set_write_timeout(Some(PEER_IO_TIMEOUT))?;

        let mut conn = Self {
            stream,
            addr,
            peer_id: PeerId::default(),
        };

        let handshake = Handshake::new(info_hash, *our_peer_id.as_bytes());
        conn.stream.write_all(&handshake.encode()).map_err(map_io)?;

        let mut reply = [0u8; HANDSHAKE_LEN];
        conn.read_full(&mut reply)?;

        let their_handshake = Handshake::decode(&reply)?;
        if their_handshake.info_hash != info_hash {
            return Err(PeerError::InfoHashMismatch);
        }

        conn.peer_id = PeerId(their_handshake.peer_id);
        debug!(addr = %addr, peer_id = %conn.peer_id, "handshake complete");

        Ok(conn)
    }

    /// Sends a single message.
    pub fn send(&mut self, message: &Message) -> Result<(), PeerError> {
        self.stream.write_all(&message.encode()).map_err(map_io)
    }

    /// Receives the next message, silently skipping keep-alive frames.
    pub fn receive(&mut self) -> Result<Message, PeerError> {
        loop {
            let mut len_buf = [0u8; 4];
            self.read_full(&mut len_buf)?;
            let length = u32::from_be_bytes(len_buf) as usize;

            if length == 0 {
                debug!(addr = %self.addr, "keep-alive");
                continue;
            }

            if length > MAX_MESSAGE_SIZE {
                return Err(PeerError::InvalidMessage(format!(
                    "message too large: {}",
                    length
                )));
            }

            let mut payload = vec![0u8; length];
            self.read_full(&mut payload)?;

            let mut frame = BytesMut::with_capacity(4 + length);
            frame.put_u32(length as u32);
            frame.put_slice(&payload);

            return Message::decode(frame.freeze());
        }
    }

    /// Blocking read-to-full; a short read is an error.
    fn read_full(&mut self, buf: &mut [u8]) -> Result<(), PeerError> {
        self.stream.read_exact(buf).map_err(map_io)
    }
}

fn map_io(e: std::io::Error) -> PeerError {
    match e.kind() {
        ErrorKind::UnexpectedEof => PeerError::ConnectionClosed,
        ErrorKind::WouldBlock | ErrorKind::TimedOut => PeerError::Timeout,
        _ => PeerError::Io(e),
    }
}
