//! Protocol constants and tuning parameters.
//!
//! All the fixed values used by the client: identity, ports, block size,
//! timeouts, and peer wire protocol constants.

use std::time::Duration;

// ============================================================================
// Client identification
// ============================================================================

/// Fixed 20-byte client identity sent to trackers and peers.
pub const PEER_ID: [u8; 20] = *b"00112233445566778899";

/// Listen port reported to the tracker. The client never accepts incoming
/// connections, so this is purely informational.
pub const LISTEN_PORT: u16 = 6881;

// ============================================================================
// Block and piece sizes
// ============================================================================

/// Standard block size for piece requests (16KB).
pub const BLOCK_SIZE: u32 = 16384;

// ============================================================================
// Timeouts
// ============================================================================

/// HTTP tracker request timeout.
pub const TRACKER_TIMEOUT: Duration = Duration::from_secs(10);

/// TCP connection timeout when dialing a peer.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Read/write timeout on an established peer socket.
pub const PEER_IO_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// Protocol constants
// ============================================================================

/// BitTorrent protocol string exchanged in the handshake.
pub const PROTOCOL_STRING: &[u8] = b"BitTorrent protocol";

/// Reserved bytes in the handshake. No extensions are advertised.
pub const RESERVED_BYTES: [u8; 8] = [0, 0, 0, 0, 0, 0, 0, 0];

/// Sanity cap on a single peer wire message (16MB).
pub const MAX_MESSAGE_SIZE: usize = 16777216;
