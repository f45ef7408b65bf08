pub mod types;

pub use types::*;

use clap::Parser;
use std::process;

/// Parse command line arguments and validate them.
///
/// Exits the process with status 1 if validation fails.
#[must_use]
pub fn args_checks() -> Args {
    let args = Args::parse();

    if let Err(e) = args.validate() {
        eprintln!("Error: {e}");
        process::exit(1);
    }

    args
}
