//! Parallel/sequential execution shim.
//!
//! With the `parallel` feature enabled this re-exports rayon's parallel
//! iterator traits. Without it, a sequential stand-in provides the same
//! `into_par_iter()` entry point so the operator loops compile unchanged.

#[cfg(feature = "parallel")]
pub use rayon::prelude::*;

#[cfg(not(feature = "parallel"))]
mod sequential {
    /// Sequential stand-in for `rayon::prelude::IntoParallelIterator`.
    ///
    /// `into_par_iter()` degrades to `into_iter()`, after which the rest of
    /// the chain (`.flat_map()`, `.collect()`) resolves to the standard
    /// `Iterator` methods.
    pub trait IntoParallelIterator {
        type Iter;
        type Item;
        fn into_par_iter(self) -> Self::Iter;
    }

    impl<I: IntoIterator> IntoParallelIterator for I {
        type Iter = I::IntoIter;
        type Item = I::Item;
        fn into_par_iter(self) -> Self::Iter {
            self.into_iter()
        }
    }
}

#[cfg(not(feature = "parallel"))]
pub use sequential::*;
