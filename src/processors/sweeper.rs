// pixzip/src/processors/sweeper.rs
use crate::core::{Result, ServiceConfig, SweepStats};
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

/// Reclaims stale upload working directories under the shared temp root.
/// Runs out-of-band from request handling; each request uses its own
/// working directory, so no coordination with live uploads is needed.
pub struct RetentionSweeper {
    temp_root: PathBuf,
    threshold: Duration,
    dir_prefix: String,
}

impl RetentionSweeper {
    pub fn new(config: &ServiceConfig) -> Self {
        Self {
            temp_root: config.temp_root.clone(),
            threshold: config.retention_threshold,
            dir_prefix: config.upload_dir_prefix.clone(),
        }
    }

    /// One sequential pass: in every working directory, delete each directly
    /// contained file older than the threshold, then remove the directory
    /// itself if it ended up empty. Directories still holding fresh files
    /// are left intact.
    pub fn sweep(&self) -> Result<SweepStats> {
        let now = SystemTime::now();
        let mut stats = SweepStats::default();

        for entry in std::fs::read_dir(&self.temp_root)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Unreadable entry under {}: {}", self.temp_root.display(), e);
                    continue;
                }
            };

            let dir_path = entry.path();
            let is_upload_dir = dir_path.is_dir()
                && entry
                    .file_name()
                    .to_str()
                    .map(|name| name.starts_with(&self.dir_prefix))
                    .unwrap_or(false);
            if !is_upload_dir {
                continue;
            }

            for file_entry in std::fs::read_dir(&dir_path)? {
                let file_path = match file_entry {
                    Ok(entry) => entry.path(),
                    Err(_) => continue,
                };
                if !file_path.is_file() {
                    continue;
                }

                if self.is_stale(&file_path, now) {
                    log::info!("Deleting old file: {}", file_path.display());
                    if let Err(e) = std::fs::remove_file(&file_path) {
                        log::warn!("Failed to delete {}: {}", file_path.display(), e);
                    } else {
                        stats.files_removed += 1;
                    }
                }
            }

            let is_empty = std::fs::read_dir(&dir_path)?.next().is_none();
            if is_empty {
                log::info!("Deleting empty folder: {}", dir_path.display());
                if let Err(e) = std::fs::remove_dir(&dir_path) {
                    log::warn!("Failed to delete {}: {}", dir_path.display(), e);
                } else {
                    stats.dirs_removed += 1;
                }
            }
        }

        Ok(stats)
    }

    fn is_stale(&self, path: &std::path::Path, now: SystemTime) -> bool {
        let modified = match path.metadata().and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(e) => {
                log::warn!("No modification time for {}: {}", path.display(), e);
                return false;
            }
        };

        match now.duration_since(modified) {
            Ok(age) => age > self.threshold,
            // Modified in the future; treat as fresh
            Err(_) => false,
        }
    }
}
