use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "gifshare - A command-line tool to upload images to S3.",
    long_about = None
)]
pub struct Args {
    /// Print extra stuff (use -v -v or --verbose --verbose for even more detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Upload an image to your bucket.
    Upload {
        /// Overwrite any existing files if necessary.
        #[arg(short, long)]
        force: bool,
        /// The path or URL of an image to upload
        path: String,
        /// A nice filename for the image.
        name: Option<String>,
    },
    /// List images stored in your bucket.
    List {
        /// Display a single random image URL.
        #[arg(short, long)]
        random: bool,
    },
    /// Delete a file in your bucket.
    Delete {
        /// The name of the file to delete
        path: String,
    },
    /// Convert a filename to a URL
    Expand {
        /// The name of the uploaded file.
        path: String,
    },
    /// Display a remote image in the browser.
    Show {
        /// The name of the uploaded file.
        path: String,
    },
    /// List images whose names contain a pattern.
    Grep {
        /// Literal text to look for in image names
        pattern: String,
    },
    /// Create the bucket and configure it for public website hosting.
    Init,
}

impl Args {
    /// Validate argument combinations clap cannot express
    ///
    /// # Errors
    ///
    /// Returns an error message if an argument is unusable.
    pub fn validate(&self) -> Result<(), String> {
        match &self.command {
            Command::Upload { path, .. } if path.trim().is_empty() => {
                Err("upload needs a path or URL".to_string())
            }
            _ => Ok(()),
        }
    }
}
