// pixzip/src/core/pipeline.rs
use super::{
    BatchOutcome, PixzipError, Result, ServiceConfig, RESULT_ARCHIVE_NAME, UPLOADED_ARCHIVE_NAME,
};
use crate::processors::{Archiver, Resizer};
use crate::utils::{allowed_file, get_file_extension, is_image_file, sanitize_filename};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct PipelineOutput {
    /// Path of the result archive inside the working directory.
    pub archive_path: PathBuf,
    /// Result archive bytes, ready to send as the response body.
    pub archive_bytes: Vec<u8>,
    /// Per-request scratch directory; left on disk for the sweeper.
    pub working_dir: PathBuf,
    pub outcome: BatchOutcome,
}

/// Orchestrates one upload: validation, working-directory setup, dispatch to
/// the single-image or archive branch, and result packaging.
pub struct UploadPipeline {
    config: ServiceConfig,
    resizer: Resizer,
    archiver: Archiver,
}

impl UploadPipeline {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            config,
            resizer: Resizer::new(),
            archiver: Archiver::new(),
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Check an upload before any filesystem work. `declared_size` is the
    /// request body size as reported by the caller.
    pub fn validate_request(
        &self,
        filename: &str,
        declared_size: Option<u64>,
        ratio: f64,
    ) -> Result<()> {
        if let Some(size) = declared_size {
            if size > self.config.max_request_size {
                return Err(PixzipError::Validation(
                    "File is too large. The maximum allowed file size is 1GB.".to_string(),
                ));
            }
        }

        if filename.is_empty() || !allowed_file(filename, &self.config.allowed_extensions) {
            return Err(PixzipError::Validation(
                "Invalid file format. Please upload an image or a zip file.".to_string(),
            ));
        }

        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(PixzipError::Validation(
                "Invalid resize ratio. Please provide a positive number.".to_string(),
            ));
        }

        Ok(())
    }

    /// Run the whole pipeline for one upload and return the packaged result.
    ///
    /// A zip upload is processed with per-file failure isolation: corrupt
    /// images are skipped and recorded in the outcome while the batch
    /// continues. A single-image upload fails the request if its one resize
    /// fails.
    pub fn process(&self, filename: &str, data: &[u8], ratio: f64) -> Result<PipelineOutput> {
        self.validate_request(filename, Some(data.len() as u64), ratio)?;

        let working_dir = self.create_working_dir()?;
        log::debug!("Working directory: {}", working_dir.display());

        let mut outcome = BatchOutcome::default();
        let mut resized_files = Vec::new();

        if get_file_extension(Path::new(filename)).as_deref() == Some("zip") {
            self.process_archive(data, &working_dir, ratio, &mut outcome, &mut resized_files)?;
        } else {
            self.process_single_image(
                filename,
                data,
                &working_dir,
                ratio,
                &mut outcome,
                &mut resized_files,
            )?;
        }

        let archive_path = working_dir.join(RESULT_ARCHIVE_NAME);
        self.archiver.pack(&resized_files, &archive_path)?;
        let archive_bytes = std::fs::read(&archive_path)?;

        log::info!(
            "Upload processed: {} resized, {} skipped",
            outcome.succeeded.len(),
            outcome.failed.len()
        );

        Ok(PipelineOutput {
            archive_path,
            archive_bytes,
            working_dir,
            outcome,
        })
    }

    fn process_archive(
        &self,
        data: &[u8],
        working_dir: &Path,
        ratio: f64,
        outcome: &mut BatchOutcome,
        resized_files: &mut Vec<PathBuf>,
    ) -> Result<()> {
        let uploaded = working_dir.join(UPLOADED_ARCHIVE_NAME);
        std::fs::write(&uploaded, data)?;

        // A malformed archive fails the whole request; isolation starts
        // per-file only after extraction succeeds.
        let extracted = self.archiver.extract(&uploaded, working_dir)?;

        for input_path in extracted {
            if !is_image_file(&input_path, &self.config.allowed_extensions) {
                continue;
            }

            let base_name = match input_path.file_name().and_then(|n| n.to_str()) {
                Some(name) => name.to_string(),
                None => continue,
            };
            let output_path = working_dir.join(format!("resized_{}", base_name));

            match self.resizer.resize(&input_path, &output_path, ratio) {
                Ok(_) => {
                    resized_files.push(output_path);
                    outcome.succeeded.push(base_name);
                }
                Err(e) => {
                    log::warn!("Error resizing {}: {}", input_path.display(), e);
                    outcome.failed.push((base_name, e.to_string()));
                }
            }
        }

        Ok(())
    }

    fn process_single_image(
        &self,
        filename: &str,
        data: &[u8],
        working_dir: &Path,
        ratio: f64,
        outcome: &mut BatchOutcome,
        resized_files: &mut Vec<PathBuf>,
    ) -> Result<()> {
        let safe_name = sanitize_filename(filename);
        let input_path = working_dir.join(&safe_name);
        std::fs::write(&input_path, data)?;

        let output_path = working_dir.join(format!("resized_{}", safe_name));
        self.resizer.resize(&input_path, &output_path, ratio)?;

        resized_files.push(output_path);
        outcome.succeeded.push(safe_name);
        Ok(())
    }

    fn create_working_dir(&self) -> Result<PathBuf> {
        // Random id instead of a timestamp so two requests in the same
        // second cannot share a directory
        let name = format!(
            "{}{}",
            self.config.upload_dir_prefix,
            uuid::Uuid::new_v4().simple()
        );
        let working_dir = self.config.temp_root.join(name);
        std::fs::create_dir_all(&working_dir)?;
        Ok(working_dir)
    }
}
