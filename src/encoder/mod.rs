//! Delta encoder: match search plus opcode serialization.

mod compress;
mod search;
mod types;

pub use compress::{diff_delta, diff_delta_with_block_size, DeltaError};
pub use types::{cost, MAX_OP_SIZE};
