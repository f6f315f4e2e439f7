//! # morphrecon algorithms
//!
//! Morphological operators for grayscale images.
//!
//! The centerpiece is [`morphology::reconstruct`], grayscale morphological
//! reconstruction: a marker image is repeatedly expanded (or shrunk) under
//! a mask image until a fixed point is reached. The elementary operators
//! ([`morphology::erode`], [`morphology::dilate`]) and the marker builders
//! it is combined with live alongside it.

pub mod morphology;

pub(crate) mod maybe_rayon;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::morphology::{
        border_marker, dilate, erode, eroded_marker, fill_holes, open_by_reconstruction,
        reconstruct, EdgePolicy, FillHoles, Method, OpenByReconstruction, Reconstruct,
        ReconstructParams, StructuringElement,
    };
    pub use morphrecon_core::prelude::*;
}
