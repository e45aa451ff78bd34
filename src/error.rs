use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode {name}: {reason}")]
    Decode { name: String, reason: String },

    #[error("Failed to encode {name}: {reason}")]
    Encode { name: String, reason: String },

    #[error("Invalid {field} value: {value}")]
    InvalidQuality { field: &'static str, value: f64 },

    #[error("Invalid bounding box: {0}x{1}. Both sides must be greater than zero")]
    InvalidBounds(u32, u32),

    #[error("Invalid size budget: {0} MB. Must be a positive number")]
    InvalidSizeBudget(f64),

    #[error("Invalid image dimensions: {0}x{1}. Maximum allowed: {2}x{2}")]
    InvalidDimensions(u32, u32, u32),

    #[error("File too large: {0} bytes. Maximum allowed: {1} bytes")]
    FileTooLarge(u64, u64),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to create output directory: {0}")]
    DirectoryCreationFailed(PathBuf),

    #[error("No image files found in input path: {0}")]
    NoImageFilesFound(String),

    #[error("Walkdir error: {0}")]
    WalkdirError(#[from] walkdir::Error),

    #[error("Batch file count limit exceeded: {0} files, maximum allowed {1}")]
    BatchFileLimitExceeded(usize, usize),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

impl CompressionError {
    /// Name of the file a decode or encode failure belongs to.
    pub fn file_name(&self) -> Option<&str> {
        match self {
            CompressionError::Decode { name, .. } | CompressionError::Encode { name, .. } => {
                Some(name)
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CompressionError>;
