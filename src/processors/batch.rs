// pixzip/src/processors/batch.rs
use crate::core::{BatchOutcome, PixzipError, Result, ServiceConfig};
use crate::processors::Resizer;
use crate::utils::is_image_file;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Resizes every image under a directory tree into an output directory,
/// preserving the relative subdirectory structure. Sequential, with per-file
/// failure isolation.
pub struct BatchResizer {
    resizer: Resizer,
    allowed_extensions: Vec<String>,
    ratio: f64,
}

impl BatchResizer {
    pub fn new(ratio: f64) -> Self {
        Self {
            resizer: Resizer::new(),
            allowed_extensions: ServiceConfig::default().allowed_extensions,
            ratio,
        }
    }

    pub fn process_directory(&self, input_dir: &Path, output_dir: &Path) -> Result<BatchOutcome> {
        self.validate_paths(input_dir, output_dir)?;

        let image_paths = self.collect_image_paths(input_dir);
        if image_paths.is_empty() {
            log::warn!("No image files found in {}", input_dir.display());
            return Ok(BatchOutcome::default());
        }

        log::info!(
            "Resizing {} images from {}",
            image_paths.len(),
            input_dir.display()
        );

        std::fs::create_dir_all(output_dir)?;

        let mut outcome = BatchOutcome::default();
        for input_path in &image_paths {
            // Mirror the source layout under the output root
            let relative = input_path
                .strip_prefix(input_dir)
                .unwrap_or(input_path.as_path());
            let output_path = output_dir.join(relative);

            log::info!(
                "Resizing {} to {}",
                input_path.display(),
                output_path.display()
            );

            match self.resizer.resize(input_path, &output_path, self.ratio) {
                Ok(_) => outcome.succeeded.push(relative.display().to_string()),
                Err(e) => {
                    log::warn!("Skipping {}: {}", input_path.display(), e);
                    outcome
                        .failed
                        .push((relative.display().to_string(), e.to_string()));
                }
            }
        }

        Ok(outcome)
    }

    fn collect_image_paths(&self, input_dir: &Path) -> Vec<PathBuf> {
        WalkDir::new(input_dir)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| is_image_file(entry.path(), &self.allowed_extensions))
            .map(|entry| entry.into_path())
            .collect()
    }

    fn validate_paths(&self, input_dir: &Path, output_dir: &Path) -> Result<()> {
        if !input_dir.exists() {
            return Err(PixzipError::Validation(format!(
                "Input directory does not exist: {}",
                input_dir.display()
            )));
        }

        if !input_dir.is_dir() {
            return Err(PixzipError::Validation(format!(
                "Input path is not a directory: {}",
                input_dir.display()
            )));
        }

        if output_dir.exists() && !output_dir.is_dir() {
            return Err(PixzipError::Validation(format!(
                "Output path exists but is not a directory: {}",
                output_dir.display()
            )));
        }

        if input_dir == output_dir {
            return Err(PixzipError::Validation(
                "Input and output directories cannot be the same".to_string(),
            ));
        }

        Ok(())
    }
}
