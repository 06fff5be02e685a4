// cli/constants.rs — verbosity infrastructure for the `delta` CLI binary.
//
// Rather than pull in the `log` crate for a single binary's stderr
// chatter, the classic DISPLAYLEVEL macro pattern from LZ4's CLI becomes
// an atomic level plus a displaylevel! macro.
//
// 0 = silent; 1 = errors only; 2 = normal (default); 3 = verbose.

use std::sync::atomic::{AtomicU32, Ordering};

pub static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(2);

/// Returns the current display level.
#[inline]
pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

/// Sets the display level.
#[inline]
pub fn set_display_level(level: u32) {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
}

/// Conditionally print to stderr at or above `level` — equivalent to the
/// teacher's `displaylevel!`, itself a port of LZ4's `DISPLAYLEVEL` macro.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::cli::constants::display_level() >= $level {
            eprint!($($arg)*);
        }
    };
}
