//! Veles CLI - Command-line tool for decoding DDS textures.
//!
//! This is the main entry point for the Veles command-line application.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use veles::prelude::*;

/// Veles - DDS texture decoding tool
#[derive(Parser)]
#[command(name = "veles")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a DDS texture to a PNG image
    Decode {
        /// Input DDS file
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file
        #[arg(short, long)]
        output: PathBuf,

        /// Flip the image vertically
        #[arg(short, long)]
        flip: bool,
    },

    /// Show DDS header information
    Info {
        /// Input DDS file
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Decode { input, output, flip } => {
            cmd_decode(&input, &output, flip)?;
        }
        Commands::Info { input } => {
            cmd_info(&input)?;
        }
    }

    Ok(())
}

fn cmd_decode(input: &PathBuf, output: &PathBuf, flip: bool) -> Result<()> {
    println!("Decoding: {} -> {}", input.display(), output.display());

    let decoded = DdsImage::decode_file(input, flip).context("Failed to decode DDS file")?;

    let (width, height) = (decoded.width(), decoded.height());
    if decoded.depth() > 1 {
        println!("Volume texture: exporting the first of {} slices", decoded.depth());
    }

    // PNG output carries a single slice.
    let slice_size = width as usize * height as usize * 4;
    let mut pixels = decoded.into_pixels();
    pixels.truncate(slice_size);

    let buffer = image::RgbaImage::from_raw(width, height, pixels)
        .context("Pixel buffer does not match image dimensions")?;
    buffer.save(output).context("Failed to write output file")?;

    println!("Decoded {}x{} pixels", width, height);

    Ok(())
}

fn cmd_info(input: &PathBuf) -> Result<()> {
    let data = fs::read(input).context("Failed to read input file")?;
    let dds = DdsFile::parse(&data).context("Failed to parse DDS header")?;

    let header = dds.header;
    println!("Dimensions:  {}x{}x{}", dds.width(), dds.height(), dds.depth());
    println!("Mipmaps:     {}", { header.mipmap_count });
    println!("Flags:       {:#010x}", { header.flags });
    println!("Caps:        {:#010x}", { header.caps });

    let pixel_format = header.pixel_format;
    if pixel_format.is_four_cc() {
        println!("Format:      {} (compressed)", { pixel_format.four_cc });
    } else {
        println!("Format:      uncompressed, {} bpp", { pixel_format.rgb_bit_count });
    }

    if let Some(dx10) = dds.dx10 {
        println!("DX10 header: present (DXGI format {})", { dx10.dxgi_format });
    }

    println!("Payload:     {} bytes", dds.payload().len());

    Ok(())
}
