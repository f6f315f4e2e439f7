//! Morphological erosion (minimum filter)
//!
//! Replaces each pixel with the minimum intensity in its structuring
//! element neighborhood. Shrinks bright regions and enlarges dark regions.

use crate::maybe_rayon::*;
use morphrecon_core::{Algorithm, Error, Image, PixelValue, Result};

use super::edge::EdgePolicy;
use super::element::StructuringElement;

/// Parameters for morphological erosion
#[derive(Debug, Clone, Default)]
pub struct ErodeParams {
    /// Structuring element shape
    pub element: StructuringElement,
    /// Border handling
    pub edge: EdgePolicy,
}

/// Erosion algorithm
#[derive(Debug, Clone, Default)]
pub struct Erode;

impl Algorithm for Erode {
    type Input = Image<u8>;
    type Output = Image<u8>;
    type Params = ErodeParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Erode"
    }

    fn description(&self) -> &'static str {
        "Morphological erosion (minimum filter over structuring element)"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        erode(&input, &params.element, params.edge)
    }
}

/// Perform morphological erosion on an image
///
/// Each output pixel is the minimum intensity within the structuring
/// element neighborhood. Where the neighborhood extends past the image
/// border, missing neighbors are resolved by `edge` ([`EdgePolicy::Clamp`]
/// reads the nearest edge pixel, [`EdgePolicy::Neutral`] treats them as the
/// maximum intensity, leaving the minimum unaffected).
///
/// Pure function: the input is not mutated. O(rows * cols * |element|).
///
/// # Arguments
/// * `image` - Input image
/// * `element` - Structuring element defining the neighborhood shape
/// * `edge` - Border handling policy
pub fn erode<T: PixelValue>(
    image: &Image<T>,
    element: &StructuringElement,
    edge: EdgePolicy,
) -> Result<Image<T>> {
    element.validate()?;

    let (rows, cols) = image.shape();
    if rows == 0 || cols == 0 {
        return Err(Error::InvalidDimensions {
            width: cols,
            height: rows,
        });
    }
    let offsets = element.offsets();

    let output_data: Vec<T> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = Vec::with_capacity(cols);

            for col in 0..cols {
                let mut min_val: Option<T> = None;

                for &(dr, dc) in &offsets {
                    let nr = row as isize + dr;
                    let nc = col as isize + dc;
                    let Some((nr, nc)) = edge.resolve(nr, nc, rows, cols) else {
                        continue;
                    };
                    let v = unsafe { image.get_unchecked(nr, nc) };
                    match min_val {
                        Some(m) if m <= v => {}
                        _ => min_val = Some(v),
                    }
                }

                // The element contains the origin, so at least the center
                // pixel contributed; max_value is the erosion neutral.
                row_data.push(min_val.unwrap_or_else(T::max_value));
            }

            row_data
        })
        .collect();

    Image::from_vec(output_data, rows, cols)
}
