//! CLI-wide constants and the `DISPLAYLEVEL`-style diagnostic macros.
//!
//! A file-scoped display level, settable via `-v`/`-q`, gating
//! `eprint!`-based diagnostics. The decoder library itself performs no I/O
//! and emits no log lines; these macros exist only for the CLI binary layer.

use std::sync::atomic::{AtomicU32, Ordering};

pub const PROGRAM_NAME: &str = "brotli";
pub const AUTHOR: &str = "the Brotli authors";
pub const BROTLI_EXTENSION: &str = ".br";

/// 0 = no output; 1 = errors only; 2 = normal; 3 = verbose.
pub static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(2);

#[inline]
pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

#[inline]
pub fn set_display_level(level: u32) {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
}

/// Print to stdout unconditionally, regardless of the display level.
#[macro_export]
macro_rules! displayout {
    ($($arg:tt)*) => { print!($($arg)*) };
}

/// Print to stderr unconditionally, regardless of the display level.
#[macro_export]
macro_rules! display {
    ($($arg:tt)*) => { eprint!($($arg)*) };
}

/// Print to stderr only at or above the given verbosity level.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::cli::constants::display_level() >= $level {
            eprint!($($arg)*);
        }
    };
}
