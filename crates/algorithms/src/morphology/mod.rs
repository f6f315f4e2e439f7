//! Mathematical morphology for grayscale images
//!
//! - **Erosion**: minimum filter (shrinks bright regions)
//! - **Dilation**: maximum filter (expands bright regions)
//! - **Reconstruction**: fixed-point propagation of a marker under a mask
//! - **Marker builders**: hole filling and opening by reconstruction

mod dilate;
mod edge;
mod element;
mod erode;
mod markers;
mod reconstruct;

pub use dilate::{dilate, Dilate, DilateParams};
pub use edge::EdgePolicy;
pub use element::StructuringElement;
pub use erode::{erode, Erode, ErodeParams};
pub use markers::{
    border_marker, eroded_marker, fill_holes, open_by_reconstruction, FillHoles, FillHolesParams,
    OpenByReconstruction, OpenByReconstructionParams,
};
pub use reconstruct::{reconstruct, Method, Reconstruct, ReconstructParams};
