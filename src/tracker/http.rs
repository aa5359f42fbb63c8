use reqwest::blocking::Client;
use tracing::debug;

use super::error::TrackerError;
use super::response::{parse_compact_peers, AnnounceResponse};
use crate::bencode::decode;
use crate::constants::TRACKER_TIMEOUT;
use crate::metainfo::InfoHash;

/// An HTTP tracker client (BEP-3).
///
/// # Examples
///
/// ```no_run
/// use bitfetch::metainfo::InfoHash;
/// use bitfetch::tracker::HttpTracker;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let tracker = HttpTracker::new("http://tracker.example.com/announce")?;
/// let response = tracker.announce(
///     &InfoHash::from_bytes([0u8; 20]),
///     b"00112233445566778899",
///     6881,
///     1000, // bytes left
/// )?;
/// println!("Found {} peers", response.peers.len());
/// # Ok(())
/// # }
/// ```
pub struct HttpTracker {
    client: Client,
    url: String,
}

impl HttpTracker {
    pub fn new(url: &str) -> Result<Self, TrackerError> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(TrackerError::InvalidUrl(url.to_string()));
        }

        let client = Client::builder()
            .timeout(TRACKER_TIMEOUT)
            .build()
            .map_err(TrackerError::Http)?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    /// Announces to the tracker and returns the compact peer list.
    ///
    /// `uploaded` and `downloaded` are always reported as zero: the client
    /// downloads a single piece per invocation and never seeds.
    pub fn announce(
        &self,
        info_hash: &InfoHash,
        peer_id: &[u8; 20],
        port: u16,
        left: u64,
    ) -> Result<AnnounceResponse, TrackerError> {
        let url = format!(
            "{}?info_hash={}&peer_id={}&port={}&uploaded=0&downloaded=0&left={}&compact=1",
            self.url,
            info_hash.url_encode(),
            url_encode(peer_id),
            port,
            left,
        );

        debug!(url = %url, "announcing to tracker");

        let response = self.client.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(TrackerError::BadStatus(status.as_u16()));
        }

        let bytes = response.bytes()?;
        let value = decode(&bytes)?;
        let dict = value
            .as_dict()
            .ok_or_else(|| TrackerError::InvalidResponse("expected dict".into()))?;

        if let Some(failure) = dict
            .get(b"failure reason".as_slice())
            .and_then(|v| v.as_str())
        {
            return Err(TrackerError::Failure(failure.to_string()));
        }

        let interval = dict
            .get(b"interval".as_slice())
            .and_then(|v| v.as_integer())
            .map(|v| v as u32);

        let peers_bytes = dict
            .get(b"peers".as_slice())
            .and_then(|v| v.as_bytes())
            .ok_or_else(|| TrackerError::InvalidResponse("missing peers".into()))?;

        let peers = parse_compact_peers(peers_bytes)?;
        debug!(count = peers.len(), "tracker returned peers");

        Ok(AnnounceResponse { interval, peers })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

fn url_encode(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| {
            if b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b'.' || b == b'~' {
                format!("{}", b as char)
            } else {
                format!("%{:02X}", b)
            }
        })
        .collect()
}
