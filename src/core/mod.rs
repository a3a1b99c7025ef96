// pixzip/src/core/mod.rs
pub mod pipeline;

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Entry name of the archive returned to the caller.
pub const RESULT_ARCHIVE_NAME: &str = "resized_images.zip";

/// Name under which an uploaded archive is saved before extraction.
pub const UPLOADED_ARCHIVE_NAME: &str = "uploaded.zip";

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Upload extensions accepted at the HTTP boundary (images plus "zip").
    pub allowed_extensions: Vec<String>,
    /// Maximum accepted request body size, in bytes.
    pub max_request_size: u64,
    /// Shared root under which per-upload working directories are created.
    pub temp_root: PathBuf,
    /// Age after which the sweeper reclaims files in working directories.
    pub retention_threshold: Duration,
    /// Name prefix marking a directory as a sweepable working directory.
    pub upload_dir_prefix: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            allowed_extensions: ["png", "jpg", "jpeg", "bmp", "gif", "zip"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_request_size: 1024 * 1024 * 1024,
            temp_root: std::env::temp_dir(),
            retention_threshold: Duration::from_secs(2 * 60 * 60),
            upload_dir_prefix: "upload_".to_string(),
        }
    }
}

/// Structured result of a batch run: which inputs produced an output and
/// which were skipped, with the reason.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub succeeded: Vec<String>,
    pub failed: Vec<(String, String)>,
}

#[derive(Debug, Default)]
pub struct SweepStats {
    pub files_removed: usize,
    pub dirs_removed: usize,
}

#[derive(Error, Debug)]
pub enum PixzipError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("{0}")]
    Validation(String),

    #[error("Corrupt archive: {0}")]
    ArchiveCorrupt(String),

    #[error("Resize error: {0}")]
    Resize(String),

    #[error("Packaging error: {0}")]
    Packaging(String),
}

pub type Result<T> = std::result::Result<T, PixzipError>;
