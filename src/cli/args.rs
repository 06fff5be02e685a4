//! Command-line argument parsing for the `delta` binary.
//!
//! One struct per subcommand, built on `clap`'s derive API rather than
//! hand-rolled `argv` parsing, since this CLI has no legacy flag surface
//! it needs to stay byte-compatible with.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::DEFAULT_BLOCK_SIZE;

/// Binary delta encoder/applier.
#[derive(Debug, Parser)]
#[command(name = "delta", author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity: 0 = silent, 1 = errors, 2 = normal, 3 = verbose.
    #[arg(short, long, global = true, default_value_t = 2)]
    pub verbose: u32,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Encode a delta that reconstructs `target` from `reference`.
    Encode(EncodeArgs),
    /// Reconstruct a target file by applying a delta to a reference file.
    Apply(ApplyArgs),
}

#[derive(Debug, Parser)]
pub struct EncodeArgs {
    /// Reference (base) file.
    #[arg(long)]
    pub reference: PathBuf,

    /// Target file to encode relative to `reference`.
    #[arg(long)]
    pub target: PathBuf,

    /// Output delta file.
    #[arg(long)]
    pub out: PathBuf,

    /// Block size for the reference index; power of two in [16, 65536].
    #[arg(long, default_value_t = DEFAULT_BLOCK_SIZE)]
    pub block_size: usize,

    /// Maximum delta size in bytes (0 = unbounded).
    #[arg(long, default_value_t = 0)]
    pub max_size: u64,
}

#[derive(Debug, Parser)]
pub struct ApplyArgs {
    /// Reference (base) file the delta was computed against.
    #[arg(long)]
    pub reference: PathBuf,

    /// Delta file produced by `delta encode`.
    #[arg(long)]
    pub delta: PathBuf,

    /// Output file to reconstruct.
    #[arg(long)]
    pub out: PathBuf,
}
