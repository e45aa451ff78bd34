use crate::codec::{CodecError, ImageCodec, JpegCodec};
use crate::config::CompressionConfig;
use crate::constants::{OUTPUT_MIME_TYPE, PROGRESS_SPINNER_TEMPLATE};
use crate::error::{CompressionError, Result};
use crate::file::{rewrite_extension, CompressedImage, SourceImage};
use crate::quality::{reduce_quality, BudgetOutcome};
use crate::resize::target_dimensions;
use crate::status;
use crate::utils::{calculate_compression_ratio, format_file_size, is_image_file};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Core image processing pipeline: decode -> resize -> reduce quality -> rename
///
/// # Arguments
/// * `codec` - Decode/encode capability
/// * `source` - The user-selected file
/// * `config` - Bounding box, size budget and quality range
///
/// # Returns
/// * `Ok(CompressedImage)` - A JPEG named after the source with a `.jpg` extension.
///   Its size may still exceed the budget if the quality floor was reached.
/// * `Err(CompressionError::Decode)` / `Err(CompressionError::Encode)` - carrying
///   the source file name
/// * `Err(CompressionError::InvalidQuality)` and friends - `config` failed validation
///
/// The MIME type is not re-validated here; filter with
/// [`is_image_file`](crate::utils::is_image_file) first.
pub fn compress_image<C: ImageCodec>(
    codec: &C,
    source: &SourceImage,
    config: &CompressionConfig,
) -> Result<CompressedImage> {
    config.validate()?;

    let bitmap = codec
        .decode(&source.bytes)
        .map_err(|e| attribute(e, &source.name))?;

    let (width, height) = codec.dimensions(&bitmap);
    let (target_width, target_height) =
        target_dimensions(width, height, config.max_width, config.max_height);

    let bitmap = if (target_width, target_height) != (width, height) {
        debug!(
            name = %source.name,
            from = %format!("{}x{}", width, height),
            to = %format!("{}x{}", target_width, target_height),
            "resizing"
        );
        codec
            .resize(bitmap, target_width, target_height)
            .map_err(|e| attribute(e, &source.name))?
    } else {
        bitmap
    };

    let encoded = reduce_quality(codec, &bitmap, config).map_err(|e| attribute(e, &source.name))?;

    Ok(CompressedImage {
        name: rewrite_extension(&source.name),
        mime_type: OUTPUT_MIME_TYPE,
        bytes: encoded.bytes,
        width: target_width,
        height: target_height,
        quality: encoded.quality,
        attempts: encoded.attempts,
        outcome: encoded.outcome,
    })
}

fn attribute(error: CodecError, name: &str) -> CompressionError {
    match error {
        CodecError::Decode(reason) => CompressionError::Decode {
            name: name.to_string(),
            reason,
        },
        CodecError::Encode(reason) => CompressionError::Encode {
            name: name.to_string(),
            reason,
        },
    }
}

/// Loads `input`, compresses it with [`JpegCodec`] and writes the result into
/// `output_dir`.
///
/// # Returns
/// * `Ok((original_size, compressed, output_path))`
pub fn compress_file(
    input: &Path,
    output_dir: &Path,
    config: &CompressionConfig,
) -> Result<(u64, CompressedImage, PathBuf)> {
    let source = SourceImage::from_path(input)?;
    if !is_image_file(Some(&source)) {
        return Err(CompressionError::UnsupportedFormat(source.name));
    }

    let compressed = compress_image(&JpegCodec::default(), &source, config)?;
    let output_path = compressed.write_to_dir(output_dir)?;

    Ok((source.size(), compressed, output_path))
}

pub fn compress_command(input: &Path, output_dir: &Path, config: &CompressionConfig) -> Result<()> {
    status!("🗜️  Compressing image: {:?}", input);
    status!("📁 Output directory: {:?}", output_dir);

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template(PROGRESS_SPINNER_TEMPLATE) {
        pb.set_style(style);
    }
    if crate::logger::is_quiet() {
        pb.set_draw_target(indicatif::ProgressDrawTarget::hidden());
    }
    pb.set_message("Compressing...");

    let result = compress_file(input, output_dir, config);
    pb.finish_and_clear();
    let (original_size, compressed, output_path) = result?;

    status!(
        "📊 Original size: {} ({} bytes)",
        format_file_size(original_size),
        original_size
    );
    status!(
        "📈 Compressed size: {} ({} bytes, {}x{}, quality {:.2}, {} attempt(s))",
        format_file_size(compressed.size()),
        compressed.size(),
        compressed.width,
        compressed.height,
        compressed.quality,
        compressed.attempts
    );

    let ratio = calculate_compression_ratio(original_size, compressed.size());
    status!("🎯 Compression ratio: {:.1}%", ratio);

    if compressed.outcome == BudgetOutcome::FloorReached {
        status!(
            "⚠️  Still above the {} budget at the minimum quality",
            format_file_size(config.max_size_bytes)
        );
    }
    status!("✅ Saved {:?}", output_path);

    Ok(())
}
