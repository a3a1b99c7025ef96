// pixzip/src/processors/resizer.rs
use crate::core::{PixzipError, Result};
use image::{imageops::FilterType, ImageReader};
use std::path::Path;

const MAX_TARGET_DIMENSION: u32 = 100_000;

/// Resizes one image file by a ratio applied to both axes.
pub struct Resizer {
    filter: FilterType,
}

impl Resizer {
    pub fn new() -> Self {
        Self {
            filter: FilterType::Lanczos3,
        }
    }

    /// Resize the image at `input_path` by `ratio` and write the result to
    /// `output_path`, creating intermediate directories as needed. The output
    /// container format follows the output path's extension. Returns the
    /// produced dimensions.
    pub fn resize(&self, input_path: &Path, output_path: &Path, ratio: f64) -> Result<(u32, u32)> {
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(PixzipError::Resize(format!(
                "Resize ratio must be a positive number, got {}",
                ratio
            )));
        }

        let image = ImageReader::open(input_path)?
            .with_guessed_format()?
            .decode()
            .map_err(|e| {
                PixzipError::Resize(format!(
                    "Failed to decode {}: {}",
                    input_path.display(),
                    e
                ))
            })?;

        let new_width = (image.width() as f64 * ratio).floor() as u32;
        let new_height = (image.height() as f64 * ratio).floor() as u32;

        if new_width == 0 || new_height == 0 {
            return Err(PixzipError::Resize(format!(
                "Target dimensions {}x{} are empty for {}",
                new_width,
                new_height,
                input_path.display()
            )));
        }

        if new_width > MAX_TARGET_DIMENSION || new_height > MAX_TARGET_DIMENSION {
            return Err(PixzipError::Resize(format!(
                "Target dimensions {}x{} exceed maximum {}",
                new_width, new_height, MAX_TARGET_DIMENSION
            )));
        }

        log::debug!(
            "Resizing {} from {}x{} to {}x{}",
            input_path.display(),
            image.width(),
            image.height(),
            new_width,
            new_height
        );

        let resized = image.resize_exact(new_width, new_height, self.filter);

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        resized.save(output_path).map_err(|e| {
            PixzipError::Resize(format!(
                "Failed to encode {}: {}",
                output_path.display(),
                e
            ))
        })?;

        Ok((new_width, new_height))
    }
}

impl Default for Resizer {
    fn default() -> Self {
        Self::new()
    }
}
