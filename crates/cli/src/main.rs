//! morphrecon CLI - grayscale morphological reconstruction

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use morphrecon_algorithms::morphology::{
    border_marker, dilate, erode, eroded_marker, fill_holes, open_by_reconstruction, reconstruct,
    EdgePolicy, Method, ReconstructParams, StructuringElement,
};
use morphrecon_core::io::{read_gray8, write_gray8};
use morphrecon_core::{Connectivity, Image};

mod compare;

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "morphrecon")]
#[command(author, version, about = "Grayscale morphological reconstruction", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show information about a grayscale image
    Info {
        /// Input image file
        input: PathBuf,
    },
    /// Erosion (minimum filter)
    Erode {
        /// Input image
        input: PathBuf,
        /// Output file
        output: PathBuf,
        /// Structuring element shape: disk, square, cross
        #[arg(long, default_value = "disk")]
        shape: String,
        /// Structuring element radius in pixels
        #[arg(short, long, default_value = "1")]
        radius: usize,
        /// Border handling: clamp, neutral
        #[arg(long, default_value = "clamp")]
        edge: String,
    },
    /// Dilation (maximum filter)
    Dilate {
        /// Input image
        input: PathBuf,
        /// Output file
        output: PathBuf,
        #[arg(long, default_value = "disk")]
        shape: String,
        #[arg(short, long, default_value = "1")]
        radius: usize,
        #[arg(long, default_value = "clamp")]
        edge: String,
    },
    /// Morphological reconstruction of a marker under a mask
    Reconstruct {
        /// Marker image (the seed)
        marker: PathBuf,
        /// Mask image (the bound)
        mask: PathBuf,
        /// Output file
        output: PathBuf,
        /// Elementary step: dilation, erosion
        #[arg(short, long, default_value = "dilation")]
        method: String,
        /// Propagation neighborhood: 4, 8
        #[arg(short, long, default_value = "8")]
        connectivity: String,
        /// Optional cap on propagation steps
        #[arg(long)]
        budget: Option<usize>,
    },
    /// Fill interior holes in bright regions
    FillHoles {
        /// Input image
        input: PathBuf,
        /// Output file
        output: PathBuf,
        #[arg(short, long, default_value = "8")]
        connectivity: String,
    },
    /// Remove small bright features, keeping larger ones pixel-exact
    OpenRecon {
        /// Input image
        input: PathBuf,
        /// Output file
        output: PathBuf,
        #[arg(long, default_value = "disk")]
        shape: String,
        #[arg(short, long, default_value = "2")]
        radius: usize,
        #[arg(short, long, default_value = "8")]
        connectivity: String,
    },
    /// Run both demonstrations on one image, writing comparison sheets
    Demo {
        /// Input image, resolved under --image-dir unless it exists as-is
        image: PathBuf,
        /// Directory the image name is resolved under
        #[arg(long, default_value = "images")]
        image_dir: PathBuf,
        /// Directory the comparison sheets are written to
        #[arg(long, default_value = "output")]
        out_dir: PathBuf,
        /// Structuring element radius for opening by reconstruction
        #[arg(short, long, default_value = "2")]
        radius: usize,
    },
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn read_image(path: &Path) -> Result<Image<u8>> {
    let pb = spinner("Reading image...");
    let image = read_gray8(path).context("Failed to read image")?;
    pb.finish_and_clear();
    info!("Input: {} x {}", image.cols(), image.rows());
    Ok(image)
}

fn write_result(image: &Image<u8>, path: &Path) -> Result<()> {
    let pb = spinner("Writing output...");
    write_gray8(image, path).context("Failed to write output")?;
    pb.finish_and_clear();
    Ok(())
}

fn done(name: &str, path: &Path, elapsed: std::time::Duration) {
    println!("{} saved to: {}", name, path.display());
    println!("  Processing time: {:.2?}", elapsed);
}

fn parse_se(shape: &str, radius: usize) -> Result<StructuringElement> {
    let se = match shape.to_lowercase().as_str() {
        "disk" | "circle" => StructuringElement::Disk(radius),
        "square" | "sq" => StructuringElement::Square(radius),
        "cross" | "cr" => StructuringElement::Cross(radius),
        _ => anyhow::bail!("Unknown shape: {}. Use disk, square, or cross.", shape),
    };
    se.validate()
        .map_err(|e| anyhow::anyhow!("Invalid structuring element: {}", e))?;
    Ok(se)
}

fn parse_edge(s: &str) -> Result<EdgePolicy> {
    match s.to_lowercase().as_str() {
        "clamp" => Ok(EdgePolicy::Clamp),
        "neutral" => Ok(EdgePolicy::Neutral),
        _ => anyhow::bail!("Unknown edge policy: {}. Use clamp or neutral.", s),
    }
}

fn parse_connectivity(s: &str) -> Result<Connectivity> {
    match s {
        "4" | "four" => Ok(Connectivity::Four),
        "8" | "eight" => Ok(Connectivity::Eight),
        _ => anyhow::bail!("Unknown connectivity: {}. Use 4 or 8.", s),
    }
}

fn parse_method(s: &str) -> Result<Method> {
    match s.to_lowercase().as_str() {
        "dilation" | "dilate" => Ok(Method::Dilation),
        "erosion" | "erode" => Ok(Method::Erosion),
        _ => anyhow::bail!("Unknown method: {}. Use dilation or erosion.", s),
    }
}

/// Resolve the demo image path: as given if it exists, otherwise under
/// the image directory.
fn resolve_image(image: &Path, image_dir: &Path) -> PathBuf {
    if image.exists() || image.is_absolute() {
        image.to_path_buf()
    } else {
        image_dir.join(image)
    }
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        // ── Info ─────────────────────────────────────────────────────
        Commands::Info { input } => {
            let image = read_image(&input)?;
            let (rows, cols) = image.shape();
            let stats = image.statistics();

            println!("File: {}", input.display());
            println!("Dimensions: {} x {} ({} pixels)", cols, rows, image.len());
            println!("\nStatistics:");
            if let Some(min) = stats.min {
                println!("  Min: {}", min);
            }
            if let Some(max) = stats.max {
                println!("  Max: {}", max);
            }
            if let Some(mean) = stats.mean {
                println!("  Mean: {:.2}", mean);
            }
        }

        // ── Elementary operators ─────────────────────────────────────
        Commands::Erode {
            input,
            output,
            shape,
            radius,
            edge,
        } => {
            let se = parse_se(&shape, radius)?;
            let edge = parse_edge(&edge)?;
            let image = read_image(&input)?;
            let start = Instant::now();
            let result = erode(&image, &se, edge).context("Failed to erode")?;
            let elapsed = start.elapsed();
            write_result(&result, &output)?;
            done("Erosion", &output, elapsed);
        }

        Commands::Dilate {
            input,
            output,
            shape,
            radius,
            edge,
        } => {
            let se = parse_se(&shape, radius)?;
            let edge = parse_edge(&edge)?;
            let image = read_image(&input)?;
            let start = Instant::now();
            let result = dilate(&image, &se, edge).context("Failed to dilate")?;
            let elapsed = start.elapsed();
            write_result(&result, &output)?;
            done("Dilation", &output, elapsed);
        }

        // ── Reconstruction ───────────────────────────────────────────
        Commands::Reconstruct {
            marker,
            mask,
            output,
            method,
            connectivity,
            budget,
        } => {
            let params = ReconstructParams {
                method: parse_method(&method)?,
                connectivity: parse_connectivity(&connectivity)?,
                budget,
            };
            let marker = read_image(&marker)?;
            let mask = read_image(&mask)?;
            let start = Instant::now();
            let result =
                reconstruct(&marker, &mask, &params).context("Failed to reconstruct")?;
            let elapsed = start.elapsed();
            write_result(&result, &output)?;
            done("Reconstruction", &output, elapsed);
        }

        Commands::FillHoles {
            input,
            output,
            connectivity,
        } => {
            let connectivity = parse_connectivity(&connectivity)?;
            let image = read_image(&input)?;
            let start = Instant::now();
            let result = fill_holes(&image, connectivity).context("Failed to fill holes")?;
            let elapsed = start.elapsed();
            write_result(&result, &output)?;
            done("Hole filling", &output, elapsed);
        }

        Commands::OpenRecon {
            input,
            output,
            shape,
            radius,
            connectivity,
        } => {
            let se = parse_se(&shape, radius)?;
            let connectivity = parse_connectivity(&connectivity)?;
            let image = read_image(&input)?;
            let start = Instant::now();
            let result = open_by_reconstruction(&image, &se, connectivity)
                .context("Failed to open by reconstruction")?;
            let elapsed = start.elapsed();
            write_result(&result, &output)?;
            done("Opening by reconstruction", &output, elapsed);
        }

        // ── Demo ─────────────────────────────────────────────────────
        Commands::Demo {
            image,
            image_dir,
            out_dir,
            radius,
        } => {
            let path = resolve_image(&image, &image_dir);
            let input = read_image(&path)?;

            // Each demonstration is reported on its own; one failing does
            // not abort the other.
            println!("\nRunning demonstration 1: hole filling");
            if let Err(e) = demo_fill_holes(&input, &out_dir) {
                eprintln!("Hole filling failed: {:#}", e);
            }

            println!("\nRunning demonstration 2: opening by reconstruction");
            if let Err(e) = demo_open_recon(&input, radius, &out_dir) {
                eprintln!("Opening by reconstruction failed: {:#}", e);
            }
        }
    }

    Ok(())
}

fn demo_fill_holes(input: &Image<u8>, out_dir: &Path) -> Result<()> {
    let start = Instant::now();
    let marker = border_marker(input, Method::Erosion);
    let filled = fill_holes(input, Connectivity::Eight)?;
    let elapsed = start.elapsed();

    let path = out_dir.join("fill_holes.png");
    compare::write_comparison(input, &marker, &filled, "Hole filling", &path)?;
    done("Hole filling comparison", &path, elapsed);
    Ok(())
}

fn demo_open_recon(input: &Image<u8>, radius: usize, out_dir: &Path) -> Result<()> {
    let se = parse_se("disk", radius)?;
    let start = Instant::now();
    let marker = eroded_marker(input, &se, EdgePolicy::Clamp)?;
    let opened = open_by_reconstruction(input, &se, Connectivity::Eight)?;
    let elapsed = start.elapsed();

    let path = out_dir.join("open_by_reconstruction.png");
    compare::write_comparison(input, &marker, &opened, "Opening by reconstruction", &path)?;
    done("Opening comparison", &path, elapsed);
    Ok(())
}
