use crate::codec::{ImageCodec, JpegCodec};
use crate::config::CompressionConfig;
use crate::constants::{BATCH_FILES_PER_THREAD, MAX_BATCH_FILES, PROGRESS_BAR_TEMPLATE};
use crate::error::{CompressionError, Result};
use crate::file::{CompressedImage, SourceImage};
use crate::formats::SourceFormat;
use crate::processing::compress_image;
use crate::quality::BudgetOutcome;
use crate::status;
use crate::utils::{calculate_compression_ratio, format_file_size};
use crate::validation::ensure_output_dir;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Runs the single-file pipeline over `sources` in parallel.
///
/// The returned vector has one slot per input, in input order. A file that
/// fails to decode or encode only fails its own slot.
pub fn compress_batch<C: ImageCodec>(
    codec: &C,
    sources: &[SourceImage],
    config: &CompressionConfig,
) -> Vec<Result<CompressedImage>> {
    sources
        .par_iter()
        .map(|source| {
            let result = compress_image(codec, source, config);
            if let Err(e) = &result {
                warn!(name = %source.name, error = %e, "failed to compress");
            }
            result
        })
        .collect()
}

/// Aggregate counts for a finished batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: Vec<String>,
    pub total_before: u64,
    pub total_after: u64,
    pub over_budget: usize,
}

impl BatchSummary {
    pub fn record(&mut self, name: &str, original_size: u64, result: &Result<CompressedImage>) {
        match result {
            Ok(compressed) => {
                self.succeeded += 1;
                self.total_before += original_size;
                self.total_after += compressed.size();
                if compressed.outcome == BudgetOutcome::FloorReached {
                    self.over_budget += 1;
                }
            }
            Err(e) => self
                .failed
                .push(e.file_name().unwrap_or(name).to_string()),
        }
    }

    /// `sources` and `results` are paired by position.
    pub fn from_results(sources: &[SourceImage], results: &[Result<CompressedImage>]) -> Self {
        let mut summary = BatchSummary::default();
        for (source, result) in sources.iter().zip(results) {
            summary.record(&source.name, source.size(), result);
        }
        summary
    }

    pub fn compression_ratio(&self) -> f64 {
        calculate_compression_ratio(self.total_before, self.total_after)
    }
}

/// Compresses every image matched by `input` into `output`.
///
/// Files are loaded and compressed in chunks through [`compress_batch`], so
/// only a few sources per thread are held in memory. Outputs that would share
/// a file name are written as `name-1.jpg`, `name-2.jpg` and so on, in input
/// order. Per-file failures are reported in the summary and do not fail the
/// batch.
pub fn batch_compress_files(
    input: &str,
    output: &Path,
    config: &CompressionConfig,
    recursive: bool,
) -> Result<BatchSummary> {
    status!("🚀 Starting batch compression...");
    status!("📁 Input: {}", input);
    status!("📁 Output: {:?}", output);

    let start_time = Instant::now();

    let image_files = collect_image_files(input, recursive)?;
    let total_files = image_files.len();

    if total_files == 0 {
        status!("⚠️  No image files found in the input path");
        return Ok(BatchSummary::default());
    }

    status!("📊 Found {} image files to process", total_files);
    ensure_output_dir(output)?;

    let main_progress = ProgressBar::new(total_files as u64);
    if let Ok(style) = ProgressStyle::default_bar().template(PROGRESS_BAR_TEMPLATE) {
        main_progress.set_style(style.progress_chars("#>-"));
    }
    if crate::logger::is_quiet() {
        main_progress.set_draw_target(indicatif::ProgressDrawTarget::hidden());
    }

    let codec = JpegCodec::default();
    let chunk_size = rayon::current_num_threads().max(1) * BATCH_FILES_PER_THREAD;
    let mut taken_names = HashSet::new();
    let mut summary = BatchSummary::default();

    for chunk in image_files.chunks(chunk_size) {
        let (sources, load_failures) = load_sources(chunk);
        for (name, e) in load_failures {
            warn!(name = %name, error = %e, "failed to read");
            summary.record(&name, 0, &Err(e));
        }

        let results = compress_batch(&codec, &sources, config);
        for (source, result) in sources.iter().zip(results) {
            let result = result.and_then(|compressed| {
                write_output(compressed, &source.name, output, &mut taken_names)
            });
            summary.record(&source.name, source.size(), &result);
        }

        main_progress.inc(chunk.len() as u64);
    }

    main_progress.finish_with_message("✅ Batch compression complete");

    let elapsed_time = start_time.elapsed();

    status!("\n📊 Batch Compression Summary:");
    status!("  📁 Total files processed: {}", summary.succeeded);
    status!(
        "  📊 Total original size: {}",
        format_file_size(summary.total_before)
    );
    status!(
        "  📊 Total compressed size: {}",
        format_file_size(summary.total_after)
    );
    status!(
        "  🎯 Overall compression ratio: {:.1}%",
        summary.compression_ratio()
    );
    status!("  ⏱️  Total time: {:?}", elapsed_time);
    if summary.over_budget > 0 {
        status!(
            "  ⚠️  Above the {} budget at minimum quality: {}",
            format_file_size(config.max_size_bytes),
            summary.over_budget
        );
    }
    if !summary.failed.is_empty() {
        status!("  ⚠️  Failed files: {}", summary.failed.len());
    }

    Ok(summary)
}

/// Reads `paths` in parallel. Sources keep input order; read failures are
/// returned separately with the display name of the file.
fn load_sources(paths: &[PathBuf]) -> (Vec<SourceImage>, Vec<(String, CompressionError)>) {
    let loaded: Vec<(String, Result<SourceImage>)> = paths
        .par_iter()
        .map(|path| (display_name(path), SourceImage::from_path(path)))
        .collect();

    let mut sources = Vec::with_capacity(loaded.len());
    let mut failures = Vec::new();
    for (name, result) in loaded {
        match result {
            Ok(source) => sources.push(source),
            Err(e) => failures.push((name, e)),
        }
    }
    (sources, failures)
}

fn write_output(
    mut compressed: CompressedImage,
    source_name: &str,
    output: &Path,
    taken_names: &mut HashSet<String>,
) -> Result<CompressedImage> {
    let name = claim_output_name(&compressed.name, taken_names);
    if name != compressed.name {
        debug!(source = %source_name, from = %compressed.name, to = %name, "output name taken");
        status!("  ↪️  {} saved as {}", source_name, name);
        compressed.name = name;
    }

    if let Err(e) = compressed.write_to_dir(output) {
        warn!(name = %source_name, error = %e, "failed to write");
        return Err(e);
    }
    Ok(compressed)
}

/// Returns `name`, or `stem-N.ext` with the smallest free `N`, and marks the
/// result as taken.
///
/// Names compare case-insensitively so outputs stay distinct on
/// case-insensitive filesystems.
fn claim_output_name(name: &str, taken: &mut HashSet<String>) -> String {
    if taken.insert(name.to_lowercase()) {
        return name.to_string();
    }

    let (stem, extension) = match name.rfind('.') {
        Some(dot) => name.split_at(dot),
        None => (name, ""),
    };
    let mut counter = 1;
    loop {
        let candidate = format!("{}-{}{}", stem, counter, extension);
        if taken.insert(candidate.to_lowercase()) {
            return candidate;
        }
        counter += 1;
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Collects image files from a single file, a directory or a glob pattern.
pub fn collect_image_files(input: &str, recursive: bool) -> Result<Vec<PathBuf>> {
    let mut image_files = Vec::new();
    let input_path = Path::new(input);

    if input_path.is_file() {
        image_files.push(input_path.to_path_buf());
    } else if input_path.is_dir() {
        let walker = if recursive {
            WalkDir::new(input_path)
        } else {
            WalkDir::new(input_path).max_depth(1)
        };

        // Depth 0 is the root itself and is never skipped
        for entry in walker
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'))
        {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() && has_image_extension(path) {
                image_files.push(path.to_path_buf());
            }
        }
    } else if let Ok(glob_pattern) = glob(input) {
        for entry in glob_pattern.flatten() {
            if entry.is_file() && has_image_extension(&entry) {
                image_files.push(entry);
            }
        }
    } else {
        return Err(CompressionError::NoImageFilesFound(input.to_string()));
    }

    check_file_limit(&image_files, MAX_BATCH_FILES)?;
    Ok(image_files)
}

fn check_file_limit(files: &[PathBuf], limit: usize) -> Result<()> {
    if files.len() > limit {
        return Err(CompressionError::BatchFileLimitExceeded(files.len(), limit));
    }
    Ok(())
}

fn has_image_extension(path: &Path) -> bool {
    let mime_type = SourceFormat::from_path(path).map(|f| f.mime_type());
    crate::utils::is_image_mime(mime_type)
}
