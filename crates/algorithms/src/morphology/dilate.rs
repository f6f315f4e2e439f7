//! Morphological dilation (maximum filter)
//!
//! Replaces each pixel with the maximum intensity in its structuring
//! element neighborhood. Expands bright regions and shrinks dark regions.

use crate::maybe_rayon::*;
use morphrecon_core::{Algorithm, Error, Image, PixelValue, Result};

use super::edge::EdgePolicy;
use super::element::StructuringElement;

/// Parameters for morphological dilation
#[derive(Debug, Clone, Default)]
pub struct DilateParams {
    /// Structuring element shape
    pub element: StructuringElement,
    /// Border handling
    pub edge: EdgePolicy,
}

/// Dilation algorithm
#[derive(Debug, Clone, Default)]
pub struct Dilate;

impl Algorithm for Dilate {
    type Input = Image<u8>;
    type Output = Image<u8>;
    type Params = DilateParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Dilate"
    }

    fn description(&self) -> &'static str {
        "Morphological dilation (maximum filter over structuring element)"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        dilate(&input, &params.element, params.edge)
    }
}

/// Perform morphological dilation on an image
///
/// Each output pixel is the maximum intensity within the structuring
/// element neighborhood. Where the neighborhood extends past the image
/// border, missing neighbors are resolved by `edge` ([`EdgePolicy::Clamp`]
/// reads the nearest edge pixel, [`EdgePolicy::Neutral`] treats them as the
/// minimum intensity, leaving the maximum unaffected).
///
/// Pure function: the input is not mutated. O(rows * cols * |element|).
///
/// # Arguments
/// * `image` - Input image
/// * `element` - Structuring element defining the neighborhood shape
/// * `edge` - Border handling policy
pub fn dilate<T: PixelValue>(
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
                let mut max_val: Option<T> = None;

                for &(dr, dc) in &offsets {
                    let nr = row as isize + dr;
                    let nc = col as isize + dc;
                    let Some((nr, nc)) = edge.resolve(nr, nc, rows, cols) else {
                        continue;
                    };
                    let v = unsafe { image.get_unchecked(nr, nc) };
                    match max_val {
                        Some(m) if m >= v => {}
                        _ => max_val = Some(v),
                    }
                }

                // The element contains the origin, so at least the center
                // pixel contributed; min_value is the dilation neutral.
                row_data.push(max_val.unwrap_or_else(T::min_value));
            }

            row_data
        })
        .collect();

    Image::from_vec(output_data, rows, cols)
}
