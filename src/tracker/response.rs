use std::net::{Ipv4Addr, SocketAddrV4};

use super::error::TrackerError;

/// A successful announce response.
#[derive(Debug, Clone)]
pub struct AnnounceResponse {
    /// Seconds the tracker asks us to wait before re-announcing.
    pub interval: Option<u32>,
    /// Peers currently in the swarm.
    pub peers: Vec<SocketAddrV4>,
}

/// Parses a compact peer list: 6 bytes per peer, 4-byte IPv4 followed by a
/// big-endian port.
///
/// # Errors
///
/// Returns [`TrackerError::InvalidResponse`] if the input length is not a
/// multiple of 6.
///
/// # Examples
///
/// ```
/// use bitfetch::tracker::parse_compact_peers;
///
/// let peers = parse_compact_peers(&[1, 2, 3, 4, 0x1a, 0xe1]).unwrap();
/// assert_eq!(peers[0].to_string(), "1.2.3.4:6881");
/// ```
pub fn parse_compact_peers(data: &[u8]) -> Result<Vec<SocketAddrV4>, TrackerError> {
    if data.len() % 6 != 0 {
        return Err(TrackerError::InvalidResponse(format!(
            "compact peer list length {} is not a multiple of 6",
            data.len()
        )));
    }

    Ok(data
        .chunks_exact(6)
        .map(|chunk| {
            let ip = Ipv4Addr::new(chunk[0], chunk[1], chunk[2], chunk[3]);
            let port = u16::from_be_bytes([chunk[4], chunk[5]]);
            SocketAddrV4::new(ip, port)
        })
        .collect())
}
