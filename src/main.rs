// CLI entry for imageops-smooth
use std::num::NonZeroUsize;
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueHint};
use imageops_smooth::{open_rgb, save_rgb, Smooth, SmoothConfig};
use log::info;

#[derive(Parser, Debug)]
#[command(name = "imageops-smooth", version, about = "Multithreaded box smoothing")]
struct Cli {
    /// Input image path
    #[arg(value_hint = ValueHint::FilePath)]
    input: String,
    /// Output image path, format taken from the extension
    #[arg(value_hint = ValueHint::FilePath)]
    output: String,
    /// Side length of the averaging window
    window_size: u32,
    /// Number of worker threads, defaults to the available parallelism
    thread_count: Option<usize>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let source = open_rgb(&cli.input).context("reading source image")?;
    let (width, height) = source.dimensions();
    info!("Source file: {} {}x{}", cli.input, width, height);
    if let Some(first) = source.get_pixel_checked(0, 0) {
        info!("RGB for pixel (0,0): {:?}", first.0);
    }

    let thread_count = cli.thread_count.unwrap_or_else(|| {
        let available = thread::available_parallelism().map_or(1, NonZeroUsize::get);
        available.min(height as usize).max(1)
    });
    let config = SmoothConfig::new(cli.window_size, thread_count);

    let start = Instant::now();
    let smoothed = source
        .smooth(&config)
        .with_context(|| format!("smoothing with {:?}", config))?;
    info!(
        "Time elapsed: {:.6}s using {} threads",
        start.elapsed().as_secs_f64(),
        thread_count
    );

    save_rgb(&smoothed, &cli.output).context("writing output image")?;
    info!("Output file: {}", cli.output);
    Ok(())
}
