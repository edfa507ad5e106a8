//! Compile-time configuration constants for the CLI binary layer.
//!
//! A small set of constants the CLI consults, pruned to what a decode-only
//! tool with no compression levels or thread pools actually needs.

/// Default verbosity when neither `-v` nor `-q` is given.
pub const DISPLAY_LEVEL_DEFAULT: u32 = 2;

/// Default destination when no `--output` is given: standard output.
pub const DEFAULT_OUTPUT_IS_STDOUT: bool = true;
