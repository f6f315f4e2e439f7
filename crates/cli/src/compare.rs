//! Side-by-side comparison rendering
//!
//! Renders original, marker and reconstructed panels next to each other in
//! a single grayscale image, the headless stand-in for an on-screen
//! comparison plot. Purely a consumer of finished buffers.

use anyhow::{bail, Result};
use morphrecon_core::io::write_gray8;
use morphrecon_core::Image;
use std::path::Path;
use tracing::info;

/// Width of the light gutter between panels, in pixels
const GUTTER: usize = 4;

/// Compose three same-shaped panels into one image, left to right.
pub fn side_by_side(panels: [&Image<u8>; 3]) -> Result<Image<u8>> {
    let (rows, cols) = panels[0].shape();
    for panel in &panels[1..] {
        if panel.shape() != (rows, cols) {
            bail!(
                "comparison panels must share one shape: {}x{} vs {}x{}",
                rows,
                cols,
                panel.rows(),
                panel.cols()
            );
        }
    }

    let out_cols = cols * panels.len() + GUTTER * (panels.len() - 1);
    let mut out = Image::filled(rows, out_cols, 255u8);

    for (idx, panel) in panels.iter().enumerate() {
        let col0 = idx * (cols + GUTTER);
        for row in 0..rows {
            for col in 0..cols {
                let v = unsafe { panel.get_unchecked(row, col) };
                unsafe { out.set_unchecked(row, col0 + col, v) };
            }
        }
    }

    Ok(out)
}

/// Write an original | marker | reconstructed comparison image.
pub fn write_comparison(
    original: &Image<u8>,
    marker: &Image<u8>,
    reconstructed: &Image<u8>,
    title: &str,
    path: &Path,
) -> Result<()> {
    let composed = side_by_side([original, marker, reconstructed])?;
    write_gray8(&composed, path)?;
    info!(
        "{}: original | marker | reconstructed -> {}",
        title,
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_by_side_layout() {
        let a: Image<u8> = Image::filled(3, 4, 10);
        let b: Image<u8> = Image::filled(3, 4, 20);
        let c: Image<u8> = Image::filled(3, 4, 30);

        let out = side_by_side([&a, &b, &c]).unwrap();
        assert_eq!(out.shape(), (3, 4 * 3 + GUTTER * 2));
        assert_eq!(out.get(1, 0).unwrap(), 10);
        assert_eq!(out.get(1, 4).unwrap(), 255); // gutter
        assert_eq!(out.get(1, 4 + GUTTER).unwrap(), 20);
        assert_eq!(out.get(2, 2 * (4 + GUTTER) + 3).unwrap(), 30);
    }

    #[test]
    fn test_side_by_side_rejects_shape_mismatch() {
        let a: Image<u8> = Image::filled(3, 4, 10);
        let b: Image<u8> = Image::filled(3, 5, 20);
        assert!(side_by_side([&a, &b, &a]).is_err());
    }
}
