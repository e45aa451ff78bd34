pub mod batch;
pub mod cli;
pub mod codec;
pub mod config;
pub mod constants;
pub mod error;
pub mod file;
pub mod formats;
pub mod info;
pub mod logger;
pub mod processing;
pub mod quality;
pub mod resize;
pub mod utils;
pub mod validation;

pub use batch::{batch_compress_files, collect_image_files, compress_batch, BatchSummary};
pub use codec::{CodecError, ImageCodec, JpegCodec};
pub use config::{CompressionConfig, CompressionOverrides};
pub use error::{CompressionError, Result};
pub use file::{rewrite_extension, CompressedImage, SourceImage};
pub use info::{get_image_info, print_image_info, ImageInfo};
pub use processing::{compress_command, compress_file, compress_image};
pub use quality::{reduce_quality, BudgetOutcome, EncodedImage};
pub use resize::{scale_to_fit, target_dimensions, ScaledSize};
pub use utils::{format_file_size, is_image_file, is_image_mime};
