use anyhow::Context;
use clap::Parser;
use photo_squeeze::cli::{Args, Commands};
use photo_squeeze::logger::init_logging;
use photo_squeeze::{batch_compress_files, compress_command, get_image_info, print_image_info};
use rayon::ThreadPoolBuilder;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    match args.command {
        Commands::Compress {
            input,
            output,
            tuning,
        } => {
            let config = tuning.to_config().context("invalid compression settings")?;
            compress_command(&input, &output, &config)
                .with_context(|| format!("failed to compress {}", input.display()))?;
        }
        Commands::Batch {
            input,
            output,
            tuning,
            threads,
            recursive,
        } => {
            let config = tuning.to_config().context("invalid compression settings")?;
            setup_thread_pool(threads);
            batch_compress_files(&input, &output, &config, recursive)
                .with_context(|| format!("batch compression of {} failed", input))?;
        }
        Commands::Info { input, tuning } => {
            let config = tuning.to_config().context("invalid compression settings")?;
            let info = get_image_info(&input, &config)
                .with_context(|| format!("failed to inspect {}", input.display()))?;
            print_image_info(&info, &config);
        }
    }

    Ok(())
}

fn setup_thread_pool(threads: Option<usize>) {
    if let Some(num_threads) = threads {
        if let Err(e) = ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
        {
            tracing::warn!("failed to set thread pool size: {}", e);
        }
    }
}
