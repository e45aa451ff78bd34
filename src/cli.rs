use crate::config::{CompressionConfig, CompressionOverrides};
use crate::error::Result;
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "photo-squeeze",
    about = "Shrink listing photos to JPEG under a size budget before upload",
    long_about = "photo-squeeze prepares photos for a marketplace listing upload. Each image is \
                  decoded, downscaled to fit a bounding box while keeping its aspect ratio, and \
                  re-encoded as JPEG at decreasing quality until it fits the size budget or the \
                  quality floor is reached.",
    version,
    after_help = "EXAMPLES:\n  \
    photo-squeeze compress sofa.png ./upload --max-size-mb 0.5\n  \
    photo-squeeze batch \"./photos/*.png\" ./upload -r -w 1280 -H 1280\n  \
    photo-squeeze info lamp.webp --config squeeze.json"
)]
pub struct Args {
    #[arg(short, long, global = true, help = "Log every encode attempt")]
    pub verbose: bool,

    #[arg(short, long, global = true, conflicts_with = "verbose", help = "Only print errors")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(
        about = "Compress a single image",
        long_about = "Compress a single image into the output directory. The output keeps the \
                      input name with its extension replaced by .jpg."
    )]
    Compress {
        #[arg(help = "Input image file path")]
        input: PathBuf,

        #[arg(help = "Output directory path")]
        output: PathBuf,

        #[command(flatten)]
        tuning: TuningArgs,
    },

    #[command(
        about = "Compress multiple images in parallel",
        long_about = "Process multiple images in parallel. A file that fails to decode is \
                      reported and skipped; the rest of the batch still completes."
    )]
    Batch {
        #[arg(
            help = "Input directory, file pattern, or glob",
            long_help = "Input can be a directory path, file pattern, or glob expression. \
                         Examples: './photos', '*.png', '/path/to/photos/*.{jpg,png}'"
        )]
        input: String,

        #[arg(help = "Output directory path")]
        output: PathBuf,

        #[command(flatten)]
        tuning: TuningArgs,

        #[arg(
            short = 'j',
            long,
            help = "Number of parallel threads (default: auto)",
            long_help = "Number of threads for parallel batch processing."
        )]
        threads: Option<usize>,

        #[arg(
            short = 'r',
            long,
            help = "Process subdirectories recursively",
            long_help = "Recursively process all subdirectories when input is a directory."
        )]
        recursive: bool,
    },

    #[command(
        about = "Show image details and the compression plan",
        long_about = "Display dimensions, MIME type and file size, plus the target dimensions \
                      and output name the compressor would use."
    )]
    Info {
        #[arg(help = "Image file path to analyze")]
        input: PathBuf,

        #[command(flatten)]
        tuning: TuningArgs,
    },
}

/// Compression settings shared by every subcommand.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct TuningArgs {
    #[arg(short = 'w', long, help = "Maximum width in pixels (default: 1920)")]
    pub max_width: Option<u32>,

    #[arg(short = 'H', long, help = "Maximum height in pixels (default: 1080)")]
    pub max_height: Option<u32>,

    #[arg(
        short = 'Q',
        long = "quality",
        help = "Initial JPEG quality in (0, 1] (default: 0.8)"
    )]
    pub initial_quality: Option<f64>,

    #[arg(short = 's', long, help = "Size budget in MB (default: 1)")]
    pub max_size_mb: Option<f64>,

    #[arg(
        short = 'm',
        long,
        help = "Quality floor in (0, 1) (default: 0.1)",
        long_help = "Lowest quality the compressor retries at. An image still over budget at \
                     this quality is kept as is."
    )]
    pub min_quality: Option<f64>,

    #[arg(
        short = 'c',
        long,
        help = "JSON file with maxWidth, maxHeight, initialQuality, maxSizeMB, minQuality"
    )]
    pub config: Option<PathBuf>,
}

impl TuningArgs {
    /// Config file values first, then command-line flags on top.
    pub fn to_config(&self) -> Result<CompressionConfig> {
        let from_file = match &self.config {
            Some(path) => CompressionOverrides::from_json_file(path)?,
            None => CompressionOverrides::default(),
        };
        let from_flags = CompressionOverrides {
            max_width: self.max_width,
            max_height: self.max_height,
            initial_quality: self.initial_quality,
            max_size_mb: self.max_size_mb,
            min_quality: self.min_quality,
        };
        CompressionConfig::from_overrides(&from_file.merge(from_flags))
    }
}
