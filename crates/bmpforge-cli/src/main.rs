use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{debug, info, Level};

use bmpforge_core::{apply_pipeline, codec, Transform};

mod cli;

use cli::{with_bmp_extension, Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let steps = match &cli.command {
        Command::Info => return print_info(&cli.input),
        Command::Pipeline { file } => load_pipeline(file)?,
        command => command.to_transform().into_iter().collect(),
    };

    let output = cli
        .output
        .as_deref()
        .context("An output path is required for this command")?;
    run(&cli.input, output, &steps)
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_info(input: &Path) -> Result<()> {
    let bytes =
        fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let header = codec::BmpHeader::parse(&bytes)
        .with_context(|| format!("{} is not a BMP file", input.display()))?;
    let image = codec::decode_bytes(&bytes)
        .with_context(|| format!("Failed to decode {}", input.display()))?;

    println!("{}", input.display());
    println!("  dimensions:     {}x{}", image.width(), image.height());
    println!("  bits per pixel: {}", header.bits_per_pixel);
    println!("  file size:      {} bytes", header.file_size);
    Ok(())
}

fn load_pipeline(file: &Path) -> Result<Vec<Transform>> {
    let text = fs::read_to_string(file)
        .with_context(|| format!("Failed to read pipeline {}", file.display()))?;
    let steps: Vec<Transform> = serde_json::from_str(&text)
        .with_context(|| format!("Invalid pipeline {}", file.display()))?;
    debug!(steps = steps.len(), "Loaded pipeline");
    Ok(steps)
}

/// Validate every step, then decode, transform and encode.
fn run(input: &Path, output: &Path, steps: &[Transform]) -> Result<()> {
    for (index, step) in steps.iter().enumerate() {
        step.validate()
            .with_context(|| format!("Step {} ({}) rejected", index + 1, step.name()))?;
    }

    let image = codec::try_decode(input)
        .with_context(|| format!("Failed to decode {}", input.display()))?;
    info!(
        width = image.width(),
        height = image.height(),
        "Decoded {}",
        input.display()
    );

    let result = apply_pipeline(&image, steps);
    if result.is_empty() {
        bail!("Transform produced an empty image");
    }

    let output = with_bmp_extension(output);
    codec::try_encode(&output, &result)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!(
        width = result.width(),
        height = result.height(),
        "Wrote {}",
        output.display()
    );
    Ok(())
}
