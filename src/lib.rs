pub mod app;
pub mod args;
pub mod config;
pub mod errors;
pub mod fetch;
pub mod image;
pub mod interfaces;
pub mod progress;
pub mod s3;
pub mod share;
pub mod store;
pub mod utils;

pub use app::{execute, run_app};
pub use args::Args;
pub use errors::{GifshareError, Result};
pub use share::GifShare;
