// pixzip/src/cli.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pixzip", version, about = "Resize images over HTTP or in bulk on disk")]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the upload server
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value_t = 5000)]
        port: u16,

        /// Root directory for per-upload working directories
        #[arg(long)]
        temp_root: Option<PathBuf>,
    },

    /// Resize every image under a directory into an output directory
    Batch {
        /// Input directory (walked recursively)
        input: PathBuf,

        /// Output directory (relative layout is preserved)
        output: PathBuf,

        /// Scale factor applied to width and height
        #[arg(short, long)]
        ratio: f64,
    },

    /// Delete stale files from upload working directories
    Sweep {
        /// Root directory holding the working directories
        #[arg(long)]
        temp_root: Option<PathBuf>,

        /// Age threshold in hours
        #[arg(long, default_value_t = 2)]
        older_than_hours: u64,
    },
}
