use gifshare::{GifshareError, args, run_app};
use std::error::Error;

fn main() {
    // Parse command-line arguments
    let args = args::args_checks();

    // Run the application logic
    if let Err(e) = run_app(&args) {
        report(&e);
        std::process::exit(1);
    }
}

/// User mistakes get a single line; anything else gets the full chain.
fn report(e: &GifshareError) {
    if e.is_user_error() {
        eprintln!("{e}");
        return;
    }

    eprintln!("Application error: {e}");
    let mut source = e.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
    eprintln!("{e:?}");
}
