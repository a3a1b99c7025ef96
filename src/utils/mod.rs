// pixzip/src/utils/mod.rs
use std::path::Path;

/// Check whether a filename carries an allowed extension. The filename must
/// contain a dot; the extension match is case-insensitive.
pub fn allowed_file(filename: &str, allowed_extensions: &[String]) -> bool {
    match filename.rsplit_once('.') {
        Some((_, ext)) => allowed_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ext)),
        None => false,
    }
}

/// Check whether a path points at a resizable image: an allowed extension
/// that is not "zip" (archives are accepted at upload, never resized).
pub fn is_image_file(path: &Path, allowed_extensions: &[String]) -> bool {
    match get_file_extension(path) {
        Some(ext) if ext == "zip" => false,
        Some(ext) => allowed_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(&ext)),
        None => false,
    }
}

pub fn sanitize_filename(filename: &str) -> String {
    let invalid_chars = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];
    filename
        .chars()
        .map(|c| if invalid_chars.contains(&c) { '_' } else { c })
        .collect()
}

pub fn get_file_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase())
}
