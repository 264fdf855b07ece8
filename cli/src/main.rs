//! Demonstration program for `argflags-core`.
//!
//! Declares a boolean `-v/--verbose` and a required integer `-s/--size`,
//! parses the process arguments, then prints the flag values and the
//! remaining positional arguments.

use std::process::ExitCode;

use argflags_core::{FlagSet, FlagUse, ParserConfig};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const DEFAULT_SIZE: i64 = 42;

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr; `RUST_LOG=argflags_core=debug` shows parser decisions.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> argflags_core::Result<()> {
    let mut flags = FlagSet::with_config(
        ParserConfig::default()
            .with_description("Prints the parsed flags and the remaining arguments."),
    );
    let verbose = flags.add_bool(('v', "verbose"), FlagUse::Optional, "Enable verbose logging")?;
    let size = flags.add_int(('s', "size"), FlagUse::Required, "Size of something")?;

    // Exits with status 1 on bad input and 0 after printing help.
    let args = flags.parse_env();

    let verbose = verbose.present(&flags)? && verbose.get(&flags)?;
    println!("verbose = {verbose}");

    let size = if size.present(&flags)? {
        size.get(&flags)?
    } else {
        DEFAULT_SIZE
    };
    println!("size = {size}");

    let positionals = args.get(1..).unwrap_or_default();
    debug!(count = positionals.len(), "Positional arguments");
    if !positionals.is_empty() {
        println!("args = {}", positionals.join(" "));
    }

    Ok(())
}
