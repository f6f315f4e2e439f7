//! # morphrecon core
//!
//! Core types, traits and I/O for the morphrecon grayscale morphology
//! library.
//!
//! This crate provides:
//! - `Image<T>`: 2D grayscale intensity grid
//! - `PixelValue`: trait bounding storable intensity types
//! - `Connectivity`: 4-/8-connected propagation neighborhoods
//! - Algorithm traits for a consistent API
//! - Grayscale image file I/O

pub mod buffer;
pub mod error;
pub mod io;

pub use buffer::{Connectivity, Image, PixelValue};
pub use error::{Error, Result};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::buffer::{Connectivity, Image, PixelValue};
    pub use crate::error::{Error, Result};
    pub use crate::Algorithm;
}

/// Core trait for all algorithms in morphrecon.
///
/// Algorithms are pure functions that transform input data according to
/// parameters. No algorithm mutates its input or touches global state.
pub trait Algorithm {
    /// Input type for the algorithm
    type Input;
    /// Output type for the algorithm
    type Output;
    /// Parameters controlling algorithm behavior
    type Params: Default;
    /// Error type for algorithm execution
    type Error: std::error::Error;

    /// Returns the algorithm name
    fn name(&self) -> &'static str;

    /// Returns a description of what the algorithm does
    fn description(&self) -> &'static str;

    /// Execute the algorithm
    fn execute(
        &self,
        input: Self::Input,
        params: Self::Params,
    ) -> std::result::Result<Self::Output, Self::Error>;

    /// Execute with default parameters
    fn execute_default(&self, input: Self::Input) -> std::result::Result<Self::Output, Self::Error> {
        self.execute(input, Self::Params::default())
    }
}
