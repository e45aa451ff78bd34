//! Utility functions for common operations
//!
//! Classification and size formatting shared by the pipeline and the CLI.

use crate::constants::SIZE_UNITS;
use crate::file::SourceImage;

/// Check whether a file's declared MIME type is an image type.
///
/// # Returns
/// * `true` only when the MIME type starts with `image/`; a missing file or a
///   missing MIME type yields `false`
pub fn is_image_file(file: Option<&SourceImage>) -> bool {
    is_image_mime(file.and_then(|f| f.mime_type.as_deref()))
}

pub fn is_image_mime(mime_type: Option<&str>) -> bool {
    mime_type.is_some_and(|mime| mime.starts_with("image/"))
}

/// Format file size in human-readable format using 1024-based units
///
/// # Arguments
/// * `bytes` - Size in bytes
///
/// # Returns
/// * Size rounded to at most two decimals with trailing zeros stripped
///   (e.g. "0 Bytes", "1 KB", "1.5 KB", "1.46 MB")
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return format!("0 {}", SIZE_UNITS[0]);
    }

    let mut unit_index = 0;
    while unit_index + 1 < SIZE_UNITS.len() && bytes >= 1024u64.pow(unit_index as u32 + 1) {
        unit_index += 1;
    }

    let value = bytes as f64 / 1024f64.powi(unit_index as i32);
    let rounded = (value * 100.0).round() / 100.0;

    format!("{} {}", rounded, SIZE_UNITS[unit_index])
}

/// Calculate compression ratio as a percentage
///
/// # Returns
/// * Positive means reduction, negative means increase
pub fn calculate_compression_ratio(original_size: u64, compressed_size: u64) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    ((original_size as f64 - compressed_size as f64) / original_size as f64) * 100.0
}
