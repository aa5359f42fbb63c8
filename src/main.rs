//! bitfetch - command-line entry point
//!
//! Thin dispatcher over the library: each subcommand maps to one protocol
//! flow, errors surface as a single diagnostic line and a non-zero exit.

use std::net::{SocketAddr, SocketAddrV4};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use bitfetch::constants::LISTEN_PORT;
use bitfetch::download::PieceDownloader;
use bitfetch::metainfo::Metainfo;
use bitfetch::peer::{PeerConnection, PeerId};
use bitfetch::tracker::HttpTracker;

#[derive(Debug, Parser)]
#[command(name = "bitfetch", version, about = "A minimal BitTorrent client")]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Decode a bencoded string and print it as JSON
    Decode {
        /// The bencoded value
        value: String,
    },
    /// Print a torrent's tracker, size, info hash, and piece hashes
    Info {
        /// Path to the .torrent file
        torrent: PathBuf,
    },
    /// Ask the tracker for peers and print one ip:port per line
    Peers {
        /// Path to the .torrent file
        torrent: PathBuf,
    },
    /// Handshake with a peer and print its peer ID
    Handshake {
        /// Path to the .torrent file
        torrent: PathBuf,
        /// Peer address as ip:port
        peer: SocketAddr,
    },
    /// Download and verify a single piece
    #[command(name = "download_piece")]
    DownloadPiece {
        /// Output path for the downloaded piece
        #[arg(short)]
        output: PathBuf,
        /// Path to the .torrent file
        torrent: PathBuf,
        /// Piece index
        piece: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Decode { value } => decode_command(&value),
        Command::Info { torrent } => info_command(&torrent),
        Command::Peers { torrent } => peers_command(&torrent),
        Command::Handshake { torrent, peer } => handshake_command(&torrent, peer),
        Command::DownloadPiece {
            output,
            torrent,
            piece,
        } => download_piece_command(&output, &torrent, piece),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn load_metainfo(path: &Path) -> Result<Metainfo> {
    let data = std::fs::read(path)
        .with_context(|| format!("failed to read torrent file {}", path.display()))?;
    let metainfo = Metainfo::from_bytes(&data)
        .with_context(|| format!("failed to parse torrent file {}", path.display()))?;
    Ok(metainfo)
}

fn decode_command(value: &str) -> Result<()> {
    let decoded = bitfetch::decode(value.as_bytes()).context("failed to decode value")?;
    println!("{}", bitfetch::bencode::to_json(&decoded));
    Ok(())
}

fn info_command(torrent: &Path) -> Result<()> {
    let metainfo = load_metainfo(torrent)?;

    println!("Tracker URL: {}", metainfo.announce);
    println!("Length: {}", metainfo.info.length);
    println!("Info Hash: {}", metainfo.info_hash);
    println!("Piece Length: {}", metainfo.info.piece_length);
    println!("Piece Hashes:");
    for hash in &metainfo.info.pieces {
        println!("{}", hex(hash));
    }

    Ok(())
}

fn fetch_peers(metainfo: &Metainfo) -> Result<Vec<SocketAddrV4>> {
    let tracker = HttpTracker::new(&metainfo.announce).context("invalid tracker url")?;
    let response = tracker
        .announce(
            &metainfo.info_hash,
            PeerId::default().as_bytes(),
            LISTEN_PORT,
            metainfo.info.length,
        )
        .context("tracker announce failed")?;
    Ok(response.peers)
}

fn peers_command(torrent: &Path) -> Result<()> {
    let metainfo = load_metainfo(torrent)?;
    for peer in fetch_peers(&metainfo)? {
        println!("{}", peer);
    }
    Ok(())
}

fn handshake_command(torrent: &Path, peer: SocketAddr) -> Result<()> {
    let metainfo = load_metainfo(torrent)?;
    let conn = PeerConnection::connect(peer, *metainfo.info_hash.as_bytes(), PeerId::default())
        .with_context(|| format!("handshake with {} failed", peer))?;
    println!("Peer ID: {}", conn.peer_id.to_hex());
    Ok(())
}

fn download_piece_command(output: &Path, torrent: &Path, piece: u32) -> Result<()> {
    let metainfo = load_metainfo(torrent)?;

    let peers = fetch_peers(&metainfo)?;
    let Some(peer) = peers.first() else {
        bail!("tracker returned no peers");
    };
    info!(peer = %peer, "connecting to first peer");

    let conn = PeerConnection::connect(
        SocketAddr::V4(*peer),
        *metainfo.info_hash.as_bytes(),
        PeerId::default(),
    )
    .with_context(|| format!("handshake with {} failed", peer))?;

    let mut downloader = PieceDownloader::new(conn, &metainfo);
    downloader
        .download_to(piece, output)
        .with_context(|| format!("failed to download piece {}", piece))?;

    println!("Piece {} downloaded to {}.", piece, output.display());
    Ok(())
}

fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .fold(String::with_capacity(bytes.len() * 2), |mut s, b| {
            use std::fmt::Write;
            let _ = write!(s, "{:02x}", b);
            s
        })
}
