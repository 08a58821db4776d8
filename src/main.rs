use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gridmark::{Codec, CodecError};

/// Generate and read branded module-grid codes
#[derive(Parser)]
#[command(name = "gridmark")]
#[command(version)]
#[command(about = "Generate and read branded module-grid codes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode text into a code image (format picked from the extension: png, jpg, svg or txt)
    Encode {
        /// Text to encode
        text: String,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Refuse text that would wrap around the grid instead of repeating
        #[arg(long)]
        strict: bool,
    },

    /// Decode the text from one or more images, stopping at the first that holds a code
    Decode {
        /// Image files to read, tried in order
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let codec = Codec::default();

    match cli.command {
        Commands::Encode { text, output, strict } => encode(&codec, &text, &output, strict),
        Commands::Decode { inputs } => decode(&codec, &inputs),
    }
}

fn encode(codec: &Codec, text: &str, output: &Path, strict: bool) -> Result<()> {
    if strict && !codec.fits(text) {
        bail!(
            "Text needs {} bits but the grid holds {}",
            (text.len() + codec.marker().len()) * 8,
            codec.capacity()
        );
    }

    let symbol = codec.encode(text);
    let ext = output.extension().and_then(|e| e.to_str()).unwrap_or("png").to_lowercase();
    match ext.as_str() {
        "svg" => std::fs::write(output, symbol.to_svg())
            .with_context(|| format!("Failed to write {}", output.display()))?,
        "txt" => std::fs::write(output, symbol.to_str())
            .with_context(|| format!("Failed to write {}", output.display()))?,
        "jpg" | "jpeg" => image::DynamicImage::ImageRgba8(symbol.to_image())
            .to_rgb8()
            .save(output)
            .with_context(|| format!("Failed to save {}", output.display()))?,
        _ => symbol
            .to_image()
            .save(output)
            .with_context(|| format!("Failed to save {}", output.display()))?,
    }

    println!("Code written: {}", output.display());
    println!("  Payload: {} bytes", text.len());
    println!("  Capacity: {} bits", codec.capacity());
    println!("  Dark modules: {}", symbol.count_dark_modules());
    Ok(())
}

fn decode(codec: &Codec, inputs: &[PathBuf]) -> Result<()> {
    for input in inputs {
        match codec.decode_file(input) {
            Ok(text) => {
                println!("{text}");
                return Ok(());
            }
            Err(CodecError::NoMarkerFound) => {
                tracing::info!("No code found in {}", input.display());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", input.display()));
            }
        }
    }
    bail!("No code found in any input")
}
