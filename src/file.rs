//! File-like values entering and leaving the pipeline.

use crate::constants::{OUTPUT_EXTENSION, OUTPUT_MIME_TYPE};
use crate::error::Result;
use crate::formats::SourceFormat;
use crate::quality::BudgetOutcome;
use crate::validation::{ensure_output_dir, validate_input_path};
use std::fs;
use std::path::{Path, PathBuf};

/// A user-selected file: display name, declared MIME type and raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    pub name: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl SourceImage {
    pub fn new(name: impl Into<String>, mime_type: Option<&str>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.map(str::to_string),
            bytes,
        }
    }

    /// Reads a file from disk. The MIME type is guessed from the extension and
    /// left empty for unknown extensions.
    pub fn from_path(path: &Path) -> Result<Self> {
        validate_input_path(path)?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        let mime_type = SourceFormat::from_path(path).map(|f| f.mime_type());
        let bytes = fs::read(path)?;

        Ok(Self::new(name, mime_type, bytes))
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_image(&self) -> bool {
        crate::utils::is_image_file(Some(self))
    }
}

/// Pipeline output, always a baseline JPEG.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressedImage {
    pub name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub quality: f64,
    pub attempts: u32,
    pub outcome: BudgetOutcome,
}

impl CompressedImage {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Writes the bytes under `dir` using the rewritten file name.
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf> {
        ensure_output_dir(dir)?;
        let path = dir.join(&self.name);
        fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// Replaces the final `.ext` segment of `name` with `.jpg`.
///
/// Names without an extension are returned unchanged. Only the last
/// dot-separated segment is touched: `my.photo.backup.png` becomes
/// `my.photo.backup.jpg`.
pub fn rewrite_extension(name: &str) -> String {
    match name.rfind('.') {
        Some(dot) if dot + 1 < name.len() => format!("{}.{}", &name[..dot], OUTPUT_EXTENSION),
        _ => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_rewrite_extension() {
        assert_eq!(rewrite_extension("photo.png"), "photo.jpg");
        assert_eq!(rewrite_extension("photo.JPEG"), "photo.jpg");
        assert_eq!(rewrite_extension("photo.jpg"), "photo.jpg");
        assert_eq!(rewrite_extension("photo"), "photo");
        assert_eq!(rewrite_extension("my.photo.backup.png"), "my.photo.backup.jpg");
    }

    #[test]
    fn test_rewrite_extension_edge_cases() {
        // a trailing dot has no extension to replace
        assert_eq!(rewrite_extension("photo."), "photo.");
        assert_eq!(rewrite_extension(".hidden"), ".jpg");
        assert_eq!(rewrite_extension(""), "");
    }

    #[test]
    fn test_source_image_from_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("lamp.PNG");
        fs::File::create(&path)
            .unwrap()
            .write_all(b"not decoded yet")
            .unwrap();

        let source = SourceImage::from_path(&path).unwrap();
        assert_eq!(source.name, "lamp.PNG");
        assert_eq!(source.mime_type.as_deref(), Some("image/png"));
        assert_eq!(source.size(), 15);
        assert!(source.is_image());
    }

    #[test]
    fn test_source_image_unknown_extension_has_no_mime() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.txt");
        fs::write(&path, b"hello").unwrap();

        let source = SourceImage::from_path(&path).unwrap();
        assert_eq!(source.mime_type, None);
        assert!(!source.is_image());
    }

    #[test]
    fn test_write_to_dir() {
        let temp_dir = TempDir::new().unwrap();
        let output = CompressedImage {
            name: "chair.jpg".to_string(),
            mime_type: OUTPUT_MIME_TYPE,
            bytes: vec![0xFF, 0xD8, 0xFF, 0xD9],
            width: 1,
            height: 1,
            quality: 0.8,
            attempts: 1,
            outcome: BudgetOutcome::WithinBudget,
        };

        let out_dir = temp_dir.path().join("out");
        let path = output.write_to_dir(&out_dir).unwrap();
        assert_eq!(path, out_dir.join("chair.jpg"));
        assert_eq!(fs::read(path).unwrap(), output.bytes);
    }
}
