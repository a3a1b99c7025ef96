// pixzip/src/processors/archiver.rs
use crate::core::{PixzipError, Result};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::write::{FileOptions, ZipWriter};
use zip::{CompressionMethod, ZipArchive};

/// Unpacks uploaded zip archives and packs result archives.
pub struct Archiver;

impl Archiver {
    pub fn new() -> Self {
        Self
    }

    /// Extract every entry of the archive at `archive_path` under
    /// `destination_dir`, preserving relative paths. Entries whose names
    /// escape the destination are skipped. Returns the extracted file paths
    /// in archive order.
    pub fn extract(&self, archive_path: &Path, destination_dir: &Path) -> Result<Vec<PathBuf>> {
        let file = File::open(archive_path)?;
        let mut archive = ZipArchive::new(file)
            .map_err(|e| PixzipError::ArchiveCorrupt(e.to_string()))?;

        let mut extracted = Vec::new();
        for index in 0..archive.len() {
            let mut entry = archive
                .by_index(index)
                .map_err(|e| PixzipError::ArchiveCorrupt(e.to_string()))?;

            let relative = match entry.enclosed_name().map(|p| p.to_path_buf()) {
                Some(path) => path,
                None => {
                    log::warn!("Skipping zip entry with unsafe name: {}", entry.name());
                    continue;
                }
            };

            let target = destination_dir.join(relative);
            if entry.is_dir() {
                std::fs::create_dir_all(&target)?;
                continue;
            }

            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let mut output = File::create(&target)?;
            std::io::copy(&mut entry, &mut output)?;
            extracted.push(target);
        }

        log::debug!(
            "Extracted {} entries into {}",
            extracted.len(),
            destination_dir.display()
        );

        Ok(extracted)
    }

    /// Pack the given files into a new zip at `archive_path`, flat, using
    /// only each file's base name. Duplicate base names resolve to the last
    /// path in the list, one entry per name.
    pub fn pack(&self, files: &[PathBuf], archive_path: &Path) -> Result<()> {
        let mut entries: Vec<(String, &PathBuf)> = Vec::new();
        for path in files {
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .filter(|s| !s.is_empty())
                .ok_or_else(|| {
                    PixzipError::Packaging(format!("Unusable file name: {}", path.display()))
                })?
                .to_string();

            match entries.iter_mut().find(|(existing, _)| *existing == name) {
                Some(slot) => slot.1 = path,
                None => entries.push((name, path)),
            }
        }

        let file = File::create(archive_path)?;
        let mut writer = ZipWriter::new(file);
        let options = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(0o644);

        for (name, path) in entries {
            let data = std::fs::read(path)?;
            writer
                .start_file(name.as_str(), options)
                .map_err(|e| PixzipError::Packaging(format!("Failed to add {}: {}", name, e)))?;
            writer
                .write_all(&data)
                .map_err(|e| PixzipError::Packaging(format!("Failed to write {}: {}", name, e)))?;
        }

        writer
            .finish()
            .map_err(|e| PixzipError::Packaging(format!("Failed to finalize archive: {}", e)))?;

        Ok(())
    }
}

impl Default for Archiver {
    fn default() -> Self {
        Self::new()
    }
}
