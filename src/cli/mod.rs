//! CLI driver modules: argument parsing, help text, and display-level
//! constants. The decoder library (everything outside this module and
//! `main.rs`) has no dependency on any of this — the CLI is an external
//! collaborator, not the other way around.

pub mod args;
pub mod constants;
