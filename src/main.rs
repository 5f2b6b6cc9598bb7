use clap::{Parser, Subcommand};
use recallio_media::crop::{CropEngine, CropRect};
use recallio_media::imaging::{
    CompressionTarget, PrepareResult, Quality, RasterBackend, RustBackend, prepare_photo,
};
use recallio_media::output::{self, InspectReport, PrepareReport};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Shared flags for commands that read an image.
#[derive(clap::Args, Clone)]
struct InputArgs {
    /// Source image (JPEG, PNG or WebP)
    #[arg(long)]
    input: PathBuf,

    /// Committed crop as normalized left,top,right,bottom in [0,1]
    #[arg(long, value_parser = parse_crop)]
    crop: Option<CropRect>,
}

#[derive(Parser)]
#[command(name = "recallio-media")]
#[command(about = "Prepare review photos: crop, then compress to a byte budget")]
#[command(long_about = "\
Prepare review photos: crop, then compress to a byte budget

The crop is given in normalized coordinates (fractions of the image size),
the same representation the editing UI works in. It is normalized before
use: values are clamped into [0,1], opposing edges are held at least 0.1
apart, and a crop covering the full image is treated as no crop.

Compression searches for the largest downscale of the (cropped) image that
still encodes under --target-bytes, using at most 11 encode passes. When
nothing fits, the original file is passed through unchanged and the report
says \"fit\": false.

Each command prints a JSON report on stdout. Set RUST_LOG=debug to watch
the scale search on stderr.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Crop and re-encode an image to fit a byte budget
    Prepare {
        #[command(flatten)]
        input: InputArgs,

        /// Byte budget for the encoded output
        #[arg(long)]
        target_bytes: usize,

        /// Cap on the longer edge, applied before the scale search
        #[arg(long)]
        max_resolution: Option<u32>,

        /// JPEG quality (1-100)
        #[arg(long, default_value_t = 90)]
        quality: u32,

        /// Directory to write the prepared file into
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Print dimensions and resolved crop bounds without encoding
    Inspect {
        #[command(flatten)]
        input: InputArgs,
    },
}

/// Parse `l,t,r,b` and normalize it through the crop engine, so the CLI
/// accepts exactly what the editing UI would have committed.
fn parse_crop(s: &str) -> Result<CropRect, String> {
    let parts: Vec<f64> = s
        .split(',')
        .map(|p| {
            p.trim()
                .parse::<f64>()
                .map_err(|e| format!("invalid crop component {:?}: {}", p.trim(), e))
        })
        .collect::<Result<_, _>>()?;
    let [left, top, right, bottom] = parts[..] else {
        return Err("expected four values: left,top,right,bottom".to_string());
    };

    let mut engine = CropEngine::new();
    engine.set_committed(Some(CropRect {
        left,
        top,
        right,
        bottom,
    }));
    engine
        .stored()
        .ok_or_else(|| "crop covers the full image; omit --crop instead".to_string())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Prepare {
            input,
            target_bytes,
            max_resolution,
            quality,
            out_dir,
        } => {
            let backend = RustBackend::open(&input.input, Quality::new(quality))?;
            let original_name = file_name(&input.input)?;
            let original_bytes = std::fs::metadata(&input.input)?.len();
            let target = CompressionTarget {
                target_bytes,
                max_resolution,
            };

            tracing::info!(
                input = %input.input.display(),
                target_bytes,
                cropped = input.crop.is_some(),
                "preparing photo"
            );
            let result = prepare_photo(&backend, &original_name, input.crop, &target)?;

            std::fs::create_dir_all(&out_dir)?;
            let report = match result {
                PrepareResult::Compressed(file) => {
                    let out_path = out_dir.join(&file.file_name);
                    std::fs::write(&out_path, &file.bytes)?;
                    PrepareReport {
                        input: input.input.display().to_string(),
                        output: out_path.display().to_string(),
                        original_bytes,
                        output_bytes: file.bytes.len() as u64,
                        mime_type: Some(file.mime_type),
                        fit: true,
                        cropped: input.crop.is_some(),
                    }
                }
                PrepareResult::Unfit => {
                    // Fall back to the original file, untouched
                    let out_path = out_dir.join(&original_name);
                    if out_path != input.input {
                        std::fs::copy(&input.input, &out_path)?;
                    }
                    tracing::info!(
                        input = %input.input.display(),
                        "no encoding fit the budget, passing the original through"
                    );
                    PrepareReport {
                        input: input.input.display().to_string(),
                        output: out_path.display().to_string(),
                        original_bytes,
                        output_bytes: original_bytes,
                        mime_type: None,
                        fit: false,
                        cropped: input.crop.is_some(),
                    }
                }
            };
            println!("{}", output::render(&report)?);
        }
        Command::Inspect { input } => {
            let backend = RustBackend::open(&input.input, Quality::default())?;
            let dims = backend.dimensions();
            let pixel_bounds = input.crop.map(|rect| {
                let (x, y, w, h) = rect.pixel_bounds(dims.width, dims.height);
                [x, y, w, h]
            });
            let report = InspectReport {
                input: input.input.display().to_string(),
                width: dims.width,
                height: dims.height,
                crop: input.crop,
                pixel_bounds,
            };
            println!("{}", output::render(&report)?);
        }
    }

    Ok(())
}

fn file_name(path: &std::path::Path) -> Result<String, Box<dyn std::error::Error>> {
    Ok(path
        .file_name()
        .ok_or_else(|| format!("{} has no file name", path.display()))?
        .to_string_lossy()
        .into_owned())
}
