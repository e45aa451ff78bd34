pub const DEFAULT_MAX_WIDTH: u32 = 1920;
pub const DEFAULT_MAX_HEIGHT: u32 = 1080;
pub const DEFAULT_INITIAL_QUALITY: f64 = 0.8;
pub const DEFAULT_MAX_SIZE_MB: f64 = 1.0;
pub const DEFAULT_MIN_QUALITY: f64 = 0.1;

/// Multiplier applied on top of the linear size correction so a retry lands
/// under the budget instead of oscillating around it.
pub const QUALITY_SAFETY_MARGIN: f64 = 0.9;

pub const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Maximum source file size in bytes (100MB)
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;
pub const MAX_IMAGE_DIMENSION: u32 = 16384;
pub const MAX_BATCH_FILES: usize = 10_000;
/// Files loaded per rayon thread before a batch chunk is compressed and written.
pub const BATCH_FILES_PER_THREAD: usize = 2;

pub const OUTPUT_MIME_TYPE: &str = "image/jpeg";
pub const OUTPUT_EXTENSION: &str = "jpg";

pub const SIZE_UNITS: &[&str] = &["Bytes", "KB", "MB", "GB", "TB", "PB", "EB"];

pub const PROGRESS_SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";
pub const PROGRESS_BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}";
