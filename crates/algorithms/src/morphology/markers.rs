//! Marker builders and the applications derived from reconstruction
//!
//! - **Hole filling**: reconstruct from a border-only marker; interior dark
//!   regions enclosed by brighter pixels rise to the flood level reachable
//!   from the border.
//! - **Opening by reconstruction**: reconstruct from an eroded marker;
//!   features smaller than the element vanish, surviving features regrow
//!   to their exact original shape (unlike a plain opening, which rounds
//!   their boundary).

use morphrecon_core::{Algorithm, Connectivity, Error, Image, PixelValue, Result};

use super::edge::EdgePolicy;
use super::element::StructuringElement;
use super::erode::erode;
use super::reconstruct::{reconstruct, Method, ReconstructParams};

/// Copy of `image` with every pixel not on the outermost 1-pixel border
/// pinned to the intensity extreme the chosen method regrows from: the
/// minimum for dilation-method seeds, the maximum for erosion-method
/// seeds (hole filling).
///
/// Either way the result is a valid marker for `image` itself: border
/// pixels equal the mask, interior pixels sit at the end of the range the
/// method propagates away from. Images of two rows/columns or fewer are
/// all border and are returned unchanged.
pub fn border_marker<T: PixelValue>(image: &Image<T>, method: Method) -> Image<T> {
    let interior = match method {
        Method::Dilation => T::min_value(),
        Method::Erosion => T::max_value(),
    };

    let (rows, cols) = image.shape();
    let mut marker = image.clone();
    if rows > 2 && cols > 2 {
        for row in 1..rows - 1 {
            for col in 1..cols - 1 {
                unsafe { marker.set_unchecked(row, col, interior) };
            }
        }
    }
    marker
}

/// Erosion of `image` under `element`: the marker for opening by
/// reconstruction. Always pointwise <= `image` because every element
/// contains the origin.
pub fn eroded_marker<T: PixelValue>(
    image: &Image<T>,
    element: &StructuringElement,
    edge: EdgePolicy,
) -> Result<Image<T>> {
    erode(image, element, edge)
}

/// Fill interior holes in bright regions.
///
/// Reconstructs `image` by erosion from the border marker: the marker
/// starts at the maximum intensity everywhere inside the rim and sinks
/// onto the image, except where a dark region is fully enclosed by
/// brighter pixels; there it can only sink to the enclosing rim level, so
/// the hole comes out filled. Dark regions connected to the border are
/// reached by the border's own intensities and are left alone.
pub fn fill_holes<T: PixelValue>(image: &Image<T>, connectivity: Connectivity) -> Result<Image<T>> {
    let marker = border_marker(image, Method::Erosion);
    reconstruct(
        &marker,
        image,
        &ReconstructParams {
            method: Method::Erosion,
            connectivity,
            budget: None,
        },
    )
}

/// Remove bright features smaller than `element`, leaving larger features
/// geometrically undeformed.
///
/// Erodes `image` under `element` (collapsing small features to the
/// background), then reconstructs by dilation with the original image as
/// mask. Erosion uses the [`EdgePolicy::Clamp`] border.
pub fn open_by_reconstruction<T: PixelValue>(
    image: &Image<T>,
    element: &StructuringElement,
    connectivity: Connectivity,
) -> Result<Image<T>> {
    let marker = eroded_marker(image, element, EdgePolicy::Clamp)?;
    reconstruct(
        &marker,
        image,
        &ReconstructParams {
            method: Method::Dilation,
            connectivity,
            budget: None,
        },
    )
}

/// Parameters for hole filling
#[derive(Debug, Clone, Default)]
pub struct FillHolesParams {
    /// Propagation neighborhood of the reconstruction
    pub connectivity: Connectivity,
}

/// Hole filling algorithm
#[derive(Debug, Clone, Default)]
pub struct FillHoles;

impl Algorithm for FillHoles {
    type Input = Image<u8>;
    type Output = Image<u8>;
    type Params = FillHolesParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Fill Holes"
    }

    fn description(&self) -> &'static str {
        "Fill interior holes by reconstruction from a border marker"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        fill_holes(&input, params.connectivity)
    }
}

/// Parameters for opening by reconstruction
#[derive(Debug, Clone, Default)]
pub struct OpenByReconstructionParams {
    /// Structuring element that sets the feature-size cutoff
    pub element: StructuringElement,
    /// Propagation neighborhood of the reconstruction
    pub connectivity: Connectivity,
}

/// Opening-by-reconstruction algorithm
#[derive(Debug, Clone, Default)]
pub struct OpenByReconstruction;

impl Algorithm for OpenByReconstruction {
    type Input = Image<u8>;
    type Output = Image<u8>;
    type Params = OpenByReconstructionParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Open by Reconstruction"
    }

    fn description(&self) -> &'static str {
        "Remove small bright features without deforming larger ones"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        open_by_reconstruction(&input, &params.element, params.connectivity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_border_marker_shapes() {
        let image: Image<u8> = Image::filled(5, 6, 90);

        let seed_low = border_marker(&image, Method::Dilation);
        let seed_high = border_marker(&image, Method::Erosion);
        for row in 0..5 {
            for col in 0..6 {
                if image.is_border(row, col) {
                    assert_eq!(seed_low.get(row, col).unwrap(), 90);
                    assert_eq!(seed_high.get(row, col).unwrap(), 90);
                } else {
                    assert_eq!(seed_low.get(row, col).unwrap(), 0);
                    assert_eq!(seed_high.get(row, col).unwrap(), 255);
                }
            }
        }
    }

    #[test]
    fn test_border_marker_tiny_image() {
        let image: Image<u8> = Image::filled(2, 7, 33);
        assert_eq!(border_marker(&image, Method::Dilation), image);
        assert_eq!(border_marker(&image, Method::Erosion), image);
    }

    #[test]
    fn test_fill_holes_closed_basin() {
        // 5x5 image, border 200, interior 3x3 hole of 0: the hole is
        // bounded by 200 on all sides, so it fills to a uniform 200.
        let mut image: Image<u8> = Image::filled(5, 5, 200);
        for row in 1..4 {
            for col in 1..4 {
                image.set(row, col, 0).unwrap();
            }
        }

        let filled = fill_holes(&image, Connectivity::Eight).unwrap();
        assert_eq!(filled, Image::filled(5, 5, 200));
    }

    #[test]
    fn test_fill_holes_leaves_open_basin() {
        // A dark channel reaching the border is not a hole: the flood
        // level from the border follows the channel in.
        let mut image: Image<u8> = Image::filled(5, 5, 200);
        for row in 1..4 {
            for col in 1..4 {
                image.set(row, col, 0).unwrap();
            }
        }
        image.set(0, 2, 0).unwrap(); // breach the rim

        let filled = fill_holes(&image, Connectivity::Four).unwrap();
        assert_eq!(filled.get(2, 2).unwrap(), 0);
        assert_eq!(filled.get(0, 2).unwrap(), 0);
        // Rim pixels are untouched
        assert_eq!(filled.get(0, 0).unwrap(), 200);
        assert_eq!(filled.get(4, 4).unwrap(), 200);
    }

    #[test]
    fn test_fill_holes_respects_basin_floor() {
        // The hole fills exactly to the lowest rim intensity around it
        let mut image: Image<u8> = Image::filled(7, 7, 150);
        image.set(3, 3, 10).unwrap();
        image.set(2, 3, 120).unwrap(); // lowest rim pixel

        let filled = fill_holes(&image, Connectivity::Eight).unwrap();
        assert_eq!(filled.get(3, 3).unwrap(), 120);
        // Everything else is already at its flood level
        assert_eq!(filled.get(2, 3).unwrap(), 120);
        assert_eq!(filled.get(0, 0).unwrap(), 150);
    }

    #[test]
    fn test_open_by_reconstruction_scenario() {
        // Isolated bright pixel (too small for Disk(2)) plus a 10x10
        // solid square: the pixel is removed, the square is restored to
        // its exact original extent and intensity.
        let mut image: Image<u8> = Image::new(16, 20);
        for row in 3..13 {
            for col in 3..13 {
                image.set(row, col, 255).unwrap();
            }
        }
        image.set(2, 17, 255).unwrap();

        let opened =
            open_by_reconstruction(&image, &StructuringElement::Disk(2), Connectivity::Eight)
                .unwrap();

        assert_eq!(opened.get(2, 17).unwrap(), 0, "isolated pixel must vanish");
        assert_eq!(opened, {
            let mut expected: Image<u8> = Image::new(16, 20);
            for row in 3..13 {
                for col in 3..13 {
                    expected.set(row, col, 255).unwrap();
                }
            }
            expected
        });
    }

    #[test]
    fn test_open_by_reconstruction_restores_corners() {
        // Plain opening with a disk rounds square corners; reconstruction
        // regrows the surviving feature to its exact original shape.
        let mut image: Image<u8> = Image::new(12, 12);
        for row in 3..8 {
            for col in 3..8 {
                image.set(row, col, 180).unwrap();
            }
        }

        let se = StructuringElement::Disk(2);
        let opened = open_by_reconstruction(&image, &se, Connectivity::Eight).unwrap();
        assert_eq!(opened, image, "surviving feature must be restored exactly");
    }

    #[test]
    fn test_marker_is_valid_for_dilation() {
        let mut image: Image<u8> = Image::filled(9, 9, 40);
        image.set(4, 4, 250).unwrap();

        let marker = eroded_marker(&image, &StructuringElement::Disk(1), EdgePolicy::Clamp)
            .unwrap();
        for row in 0..9 {
            for col in 0..9 {
                assert!(marker.get(row, col).unwrap() <= image.get(row, col).unwrap());
            }
        }
    }
}
