//! Binary entry point for the `brotli` decoder CLI.
//!
//! Reads an input file (or stdin) fully into memory, calls
//! [`brotli_decoder::decode`], writes the result (or discards it, in test
//! mode), and maps the decode outcome to a process exit code. Everything
//! beyond that — the meta-block state machine, the prefix-code subsystem,
//! the static dictionary — lives in the library crate; this binary is a
//! thin collaborator.

use std::fs;
use std::io::{self, IsTerminal, Read, Write};
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;

use brotli_decoder::cli::args::Args;
use brotli_decoder::cli::constants::set_display_level;
use brotli_decoder::config::DEFAULT_OUTPUT_IS_STDOUT;
use brotli_decoder::{decode, displaylevel};

fn main() -> ExitCode {
    let args = Args::parse();
    set_display_level(args.display_level());

    match run(&args) {
        Ok(code) => ExitCode::from(code as u8),
        Err(msg) => {
            eprintln!("brotli: {msg}");
            ExitCode::from(1)
        }
    }
}

fn run(args: &Args) -> anyhow::Result<i32> {
    let input = read_input(args.input.as_deref())?;

    displaylevel!(3, "*** brotli decoder, {}-bit ***\n", std::mem::size_of::<*const ()>() * 8);

    let outcome = decode(&input, None);

    match outcome.result {
        Ok(()) => {
            if !args.test {
                write_output(args, &outcome.output)?;
            }
            if outcome.consumed_input_bytes < input.len() {
                displaylevel!(
                    2,
                    "brotli: warning: {} trailing byte(s) after the last meta-block\n",
                    input.len() - outcome.consumed_input_bytes
                );
            }
            Ok(0)
        }
        Err(err) => {
            displaylevel!(1, "brotli: {err}\n");
            Ok(err.exit_code())
        }
    }
}

/// Read the whole input into memory: a file path, or stdin when `path` is
/// `None` or `"-"`. Deliberately small — a streaming input model is out of
/// scope for a tool that decodes one complete buffer at a time.
fn read_input(path: Option<&str>) -> anyhow::Result<Vec<u8>> {
    match path {
        None | Some("-") => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
        Some(p) => Ok(fs::read(p)?),
    }
}

fn write_output(args: &Args, bytes: &[u8]) -> anyhow::Result<()> {
    let to_stdout = args.to_stdout || (args.output.is_none() && DEFAULT_OUTPUT_IS_STDOUT);
    if to_stdout {
        if io::stdout().is_terminal() && !args.force {
            displaylevel!(
                1,
                "brotli: refusing to write decompressed binary to a terminal; use -f to override\n"
            );
            return Ok(());
        }
        io::stdout().write_all(bytes)?;
        return Ok(());
    }

    let out_path = args.output.as_deref().expect("to_stdout is false only when set");
    if Path::new(out_path).exists() && !args.force {
        anyhow::bail!("'{out_path}' already exists; use -f to overwrite");
    }
    fs::write(out_path, bytes)?;

    if !args.keep {
        if let Some(input) = &args.input {
            if input != "-" {
                fs::remove_file(input)?;
            }
        }
    }
    Ok(())
}
