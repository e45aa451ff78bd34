use crate::constants::MAX_FILE_SIZE;
use crate::error::{CompressionError, Result};
use std::fs;
use std::path::Path;

/// Validate an input file path before reading it into memory.
///
/// # Returns
/// * The file size in bytes
pub fn validate_input_path(path: &Path) -> Result<u64> {
    if !path.exists() {
        return Err(CompressionError::FileNotFound(path.to_path_buf()));
    }

    if !path.is_file() {
        return Err(CompressionError::UnsupportedFormat(format!(
            "{} is not a file",
            path.display()
        )));
    }

    // Check file size before loading to prevent DoS attacks
    let file_size = fs::metadata(path)?.len();
    if file_size > MAX_FILE_SIZE {
        return Err(CompressionError::FileTooLarge(file_size, MAX_FILE_SIZE));
    }

    Ok(file_size)
}

/// Create the output directory if needed.
pub fn ensure_output_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .map_err(|_| CompressionError::DirectoryCreationFailed(path.to_path_buf()))
}
