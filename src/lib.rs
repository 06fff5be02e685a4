//! Binary delta compressor: a content-defined block index over a
//! reference buffer, and a greedy encoder that chooses COPY vs INSERT
//! opcodes to reconstruct a target buffer from it.
//!
//! ```
//! let reference = b"the quick brown fox";
//! let target = b"the quick brown fox jumps";
//! let delta = delta::diff_delta(reference, target, 0).unwrap();
//! let restored = delta::apply_delta(reference, &delta).unwrap();
//! assert_eq!(restored, target);
//! ```

pub mod adler32;
pub mod apply;
pub mod arena;
pub mod cli;
pub mod config;
pub mod encoder;
pub mod index;
pub mod util;

pub use apply::{apply_delta, ApplyError};
pub use encoder::{diff_delta, diff_delta_with_block_size, DeltaError};
