//! Image buffer data structures and neighborhood definitions

mod connectivity;
mod element;
mod grid;

pub use connectivity::Connectivity;
pub use element::PixelValue;
pub use grid::{Image, ImageStatistics};
