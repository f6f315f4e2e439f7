//! Reconstruction demo: synthetic image processing pipeline
//!
//! Generates a 200x200 synthetic grayscale image with:
//! - Uniform background (intensity 30)
//! - Large bright rectangle (intensity 200) containing two dark holes
//! - Small bright spots (single-pixel, intensity 255) - "salt" noise
//!
//! Then runs the two reconstruction applications and writes each result
//! to PNG:
//!   1. original.png  - the synthetic input
//!   2. filled.png    - hole filling (dark holes inside the rectangle rise
//!      to the rectangle intensity)
//!   3. opened.png    - opening by reconstruction (salt spots removed, the
//!      rectangle kept pixel-exact)
//!
//! Run:
//!   cargo run -p morphrecon-algorithms --example reconstruction_demo

use std::path::Path;

use morphrecon_algorithms::morphology::{fill_holes, open_by_reconstruction, StructuringElement};
use morphrecon_core::io::write_gray8;
use morphrecon_core::{Connectivity, Image};

const ROWS: usize = 200;
const COLS: usize = 200;

fn main() {
    let out_dir = Path::new("output/reconstruction_demo");

    // --- 1. Build synthetic image ---
    let input = build_synthetic_image();
    println!("Synthetic image: {}x{}", COLS, ROWS);
    print_stats("  input", &input);
    save(out_dir, "original.png", &input);

    // --- 2. Hole filling ---
    let filled = fill_holes(&input, Connectivity::Eight).expect("fill_holes failed");
    print_stats("  filled", &filled);
    save(out_dir, "filled.png", &filled);

    // --- 3. Opening by reconstruction ---
    let se = StructuringElement::Disk(2);
    let opened =
        open_by_reconstruction(&input, &se, Connectivity::Eight).expect("open failed");
    print_stats("  opened", &opened);
    save(out_dir, "opened.png", &opened);

    println!("\n3 PNG files written to {}/", out_dir.display());

    // --- 4. Verify the two effects ---
    verify(&input, &filled, &opened);
}

/// Build a 200x200 synthetic image with a holed rectangle and salt noise.
fn build_synthetic_image() -> Image<u8> {
    let mut img = Image::filled(ROWS, COLS, 30);

    // Large bright rectangle: rows 40..120, cols 30..150
    for r in 40..120 {
        for c in 30..150 {
            img.set(r, c, 200).unwrap();
        }
    }

    // Two dark holes fully enclosed by the rectangle
    for r in 60..70 {
        for c in 50..60 {
            img.set(r, c, 0).unwrap();
        }
    }
    for r in 90..100 {
        for c in 110..125 {
            img.set(r, c, 10).unwrap();
        }
    }

    // Salt noise: 60 bright single-pixel spots (intensity 255)
    // Deterministic positions using a simple LCG
    let mut seed: u64 = 42;
    for _ in 0..60 {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        let r = ((seed >> 33) as usize) % ROWS;
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        let c = ((seed >> 33) as usize) % COLS;
        img.set(r, c, 255).unwrap();
    }

    img
}

fn print_stats(label: &str, image: &Image<u8>) {
    let s = image.statistics();
    println!(
        "{:<10} min={:>3}  max={:>3}  mean={:>6.1}",
        label,
        s.min.unwrap_or(0),
        s.max.unwrap_or(0),
        s.mean.unwrap_or(f64::NAN),
    );
}

fn save(dir: &Path, name: &str, image: &Image<u8>) {
    let path = dir.join(name);
    write_gray8(image, &path)
        .unwrap_or_else(|e| panic!("Failed to write {}: {}", path.display(), e));
}

/// Count the pixels each application was supposed to change.
fn verify(original: &Image<u8>, filled: &Image<u8>, opened: &Image<u8>) {
    println!("\n--- Verification ---");

    let mut hole_pixels = 0usize;
    let mut holes_left = 0usize;
    let mut salt = 0usize;
    let mut salt_left = 0usize;

    for r in 0..ROWS {
        for c in 0..COLS {
            let ov = original.get(r, c).unwrap();
            let in_rect = (40..120).contains(&r) && (30..150).contains(&c);

            if in_rect && ov < 200 {
                hole_pixels += 1;
                if filled.get(r, c).unwrap() < 200 {
                    holes_left += 1;
                }
            }
            if !in_rect && ov == 255 {
                salt += 1;
                if opened.get(r, c).unwrap() > 30 {
                    salt_left += 1;
                }
            }
        }
    }

    println!("  Hole pixels: {} ({} still dark after filling)", hole_pixels, holes_left);
    println!("  Salt pixels: {} ({} still bright after opening)", salt, salt_left);
}
