use crate::config::CompressionConfig;
use crate::error::{CompressionError, Result};
use crate::file::{rewrite_extension, SourceImage};
use crate::resize::target_dimensions;
use crate::status;
use crate::utils::format_file_size;
use std::path::Path;

/// What the pipeline would do with a file, without encoding it.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageInfo {
    pub name: String,
    pub mime_type: Option<String>,
    pub file_size: u64,
    pub width: u32,
    pub height: u32,
    pub target_width: u32,
    pub target_height: u32,
    pub output_name: String,
    pub within_budget: bool,
}

impl ImageInfo {
    pub fn needs_resize(&self) -> bool {
        (self.width, self.height) != (self.target_width, self.target_height)
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height.max(1) as f64
    }
}

pub fn get_image_info(input_path: &Path, config: &CompressionConfig) -> Result<ImageInfo> {
    let source = SourceImage::from_path(input_path)?;

    // Header-only read; no full decode needed for the dimensions
    let (width, height) = image::ImageReader::new(std::io::Cursor::new(&source.bytes))
        .with_guessed_format()
        .map_err(|e| CompressionError::Decode {
            name: source.name.clone(),
            reason: e.to_string(),
        })?
        .into_dimensions()
        .map_err(|e| CompressionError::Decode {
            name: source.name.clone(),
            reason: e.to_string(),
        })?;

    let (target_width, target_height) =
        target_dimensions(width, height, config.max_width, config.max_height);

    Ok(ImageInfo {
        output_name: rewrite_extension(&source.name),
        within_budget: source.size() <= config.max_size_bytes,
        file_size: source.size(),
        name: source.name,
        mime_type: source.mime_type,
        width,
        height,
        target_width,
        target_height,
    })
}

pub fn print_image_info(info: &ImageInfo, config: &CompressionConfig) {
    status!("📋 Basic Information:");
    status!("  📁 File: {}", info.name);
    status!(
        "  🎭 MIME type: {}",
        info.mime_type.as_deref().unwrap_or("unknown")
    );
    status!("  📏 Dimensions: {}x{} pixels", info.width, info.height);
    status!(
        "  📦 File size: {} ({} bytes)",
        format_file_size(info.file_size),
        info.file_size
    );
    status!("  📐 Aspect ratio: {:.2}:1", info.aspect_ratio());

    status!("\n💡 Compression Plan:");
    if info.needs_resize() {
        status!(
            "  📏 Downscale to {}x{} (bounds {}x{})",
            info.target_width,
            info.target_height,
            config.max_width,
            config.max_height
        );
    } else {
        status!("  📏 Keep dimensions, already within {}x{}", config.max_width, config.max_height);
    }
    if info.within_budget {
        status!(
            "  🎯 Already under the {} budget",
            format_file_size(config.max_size_bytes)
        );
    } else {
        status!(
            "  🎯 Re-encode from quality {:.2} toward the {} budget (floor {:.2})",
            config.initial_quality,
            format_file_size(config.max_size_bytes),
            config.min_quality
        );
    }
    status!("  📄 Output: {} (image/jpeg)", info.output_name);
}
