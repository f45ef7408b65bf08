use crate::args::{Args, Command};
use crate::config::StoreConfig;
use crate::errors::{GifshareError, Result};
use crate::fetch::HttpFetcher;
use crate::image::Classifier;
use crate::interfaces::{InferDetector, SystemBrowser};
use crate::s3::S3Backend;
use crate::share::GifShare;
use crate::store::Bucket;
use crate::utils::log_utils::Logger;
use rand::seq::SliceRandom;
use std::io::Write;

/// Load configuration, connect to the bucket and run the requested command.
pub fn run_app(args: &Args) -> Result<()> {
    let logger = Logger::new(args.verbose);
    let config = StoreConfig::load()?;
    logger.debug(&format!("Loaded configuration: {:?}", config));

    let backend = S3Backend::new(&config, logger)?;

    if args.command == Command::Init {
        return backend.init_bucket();
    }

    let bucket = Bucket::new(Box::new(backend), &config.web_root, logger);
    let app = GifShare::new(
        bucket,
        Box::new(HttpFetcher::new(logger)?),
        Classifier::new(Box::new(InferDetector)),
        Box::new(SystemBrowser),
        logger,
    );

    let stdout = std::io::stdout();
    execute(&args.command, &app, &mut stdout.lock())
}

/// Run one command against `app`, writing its output to `out`.
pub fn execute(command: &Command, app: &GifShare, out: &mut dyn Write) -> Result<()> {
    match command {
        Command::Upload { force, path, name } => {
            let url = app.upload(path, name.as_deref(), *force)?;
            writeln!(out, "{url}")?;
        }
        Command::List { random: false } => {
            for url in app.list() {
                writeln!(out, "{}", url?)?;
            }
        }
        Command::List { random: true } => {
            let urls = app.list().collect::<Result<Vec<_>>>()?;
            let url = urls
                .choose(&mut rand::thread_rng())
                .ok_or(GifshareError::EmptyBucket)?;
            writeln!(out, "{url}")?;
        }
        Command::Delete { path } => {
            app.delete(path)?;
        }
        Command::Expand { path } => {
            writeln!(out, "{}", app.get_url(path)?)?;
        }
        Command::Show { path } => {
            app.show(path)?;
        }
        Command::Grep { pattern } => {
            for url in app.grep(pattern) {
                writeln!(out, "{}", url?)?;
            }
        }
        Command::Init => {
            return Err(GifshareError::Config(
                "init must be run against the configured S3 bucket".to_string(),
            ));
        }
    }
    Ok(())
}
