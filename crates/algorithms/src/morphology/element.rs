//! Structuring element definitions for morphological operations
//!
//! A structuring element defines the neighborhood shape used in erosion,
//! dilation, and the marker builders derived from them.

use morphrecon_core::{Error, Result};

/// Shape of a structuring element for morphological operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuringElement {
    /// Disk element: all offsets within Euclidean distance `radius`
    Disk(usize),
    /// Square element of given radius (side = 2*radius + 1)
    Square(usize),
    /// Cross (plus-shaped) element of given radius
    Cross(usize),
}

impl Default for StructuringElement {
    fn default() -> Self {
        StructuringElement::Disk(1)
    }
}

impl StructuringElement {
    /// Validate the structuring element, returning an error for invalid
    /// configurations
    pub fn validate(&self) -> Result<()> {
        match self {
            StructuringElement::Disk(r)
            | StructuringElement::Square(r)
            | StructuringElement::Cross(r) => {
                if *r == 0 {
                    return Err(Error::InvalidParameter {
                        name: "radius",
                        value: "0".to_string(),
                        reason: "structuring element radius must be at least 1".to_string(),
                    });
                }
                Ok(())
            }
        }
    }

    /// Get the radius of the structuring element
    pub fn radius(&self) -> usize {
        match self {
            StructuringElement::Disk(r)
            | StructuringElement::Square(r)
            | StructuringElement::Cross(r) => *r,
        }
    }

    /// Compute (dr, dc) offsets relative to center for all active cells.
    ///
    /// Every shape contains the origin, so the neighborhood of a pixel
    /// always includes the pixel itself.
    pub fn offsets(&self) -> Vec<(isize, isize)> {
        let r = self.radius() as isize;
        let mut offsets = Vec::new();

        match self {
            StructuringElement::Disk(_) => {
                for dr in -r..=r {
                    for dc in -r..=r {
                        if dr * dr + dc * dc <= r * r {
                            offsets.push((dr, dc));
                        }
                    }
                }
            }
            StructuringElement::Square(_) => {
                for dr in -r..=r {
                    for dc in -r..=r {
                        offsets.push((dr, dc));
                    }
                }
            }
            StructuringElement::Cross(_) => {
                for d in -r..=r {
                    offsets.push((d, 0)); // vertical arm
                    if d != 0 {
                        offsets.push((0, d)); // horizontal arm (skip center duplicate)
                    }
                }
            }
        }

        offsets
    }
}
