//! Command-line argument parsing for the `brotli` decoder binary.
//!
//! The raw Brotli stream defines no outer framing or filename-suffix
//! convention of its own — `.br` naming is a convention of the surrounding
//! tooling, not this library — so this surface stays small: `clap`'s derive
//! API is a good fit for a flag set this size.

use clap::Parser;

use crate::cli::constants::PROGRAM_NAME;
use crate::config::DISPLAY_LEVEL_DEFAULT;

/// Decompress a Brotli-compressed file, or read from standard input.
#[derive(Debug, Parser)]
#[command(name = PROGRAM_NAME, version, about, long_about = None)]
pub struct Args {
    /// Input file. Omit, or pass `-`, to read from standard input.
    pub input: Option<String>,

    /// Write output to FILE instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<String>,

    /// Decompress (the only supported mode; accepted for familiarity with
    /// other Brotli tools, which default to compressing).
    #[arg(short = 'd', long)]
    pub decompress: bool,

    /// Write to stdout, keeping any input file as-is.
    #[arg(short = 'c', long = "stdout")]
    pub to_stdout: bool,

    /// Keep (do not delete) the input file after a successful decode to a
    /// sibling output file.
    #[arg(short, long)]
    pub keep: bool,

    /// Overwrite an existing output file without prompting.
    #[arg(short, long)]
    pub force: bool,

    /// Test mode: decode and discard the output, reporting only the exit
    /// code (`Ok` vs. a specific failure).
    #[arg(short = 't', long)]
    pub test: bool,

    /// Increase diagnostic verbosity. May be repeated.
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all diagnostics except fatal errors.
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

impl Args {
    /// Resolve verbosity into the 0..=4 scale `cli::constants` expects:
    /// `--quiet` wins outright; otherwise [`DISPLAY_LEVEL_DEFAULT`] plus one
    /// per repeated `-v`.
    pub fn display_level(&self) -> u32 {
        if self.quiet {
            0
        } else {
            DISPLAY_LEVEL_DEFAULT + u32::from(self.verbose)
        }
    }
}
