//! Main Image type

use crate::buffer::PixelValue;
use crate::error::{Error, Result};
use ndarray::{Array2, ArrayView2};

/// A 2D grayscale intensity grid.
///
/// `Image<T>` stores intensity values of type `T` in row-major order and
/// carries its own dimensions. All indexed access is bounds-checked; the
/// `unsafe` unchecked accessors exist for loops that have validated their
/// bounds up front.
///
/// # Type Parameters
///
/// - `T`: The intensity type, must implement [`PixelValue`]
///
/// # Example
///
/// ```ignore
/// use morphrecon_core::Image;
///
/// // Create a 100x100 image filled with zeros
/// let mut image: Image<u8> = Image::new(100, 100);
///
/// image.set(10, 20, 42)?;
/// let value = image.get(10, 20)?;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Image<T: PixelValue> {
    /// Intensity data stored in row-major order (row, col)
    data: Array2<T>,
}

impl<T: PixelValue> Image<T> {
    /// Create a new image filled with zeros
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            data: Array2::zeros((rows, cols)),
        }
    }

    /// Create a new image filled with a specific intensity
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            data: Array2::from_elem((rows, cols), value),
        }
    }

    /// Create an image from existing row-major data
    pub fn from_vec(data: Vec<T>, rows: usize, cols: usize) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(Error::InvalidDimensions {
                width: cols,
                height: rows,
            });
        }

        let array = Array2::from_shape_vec((rows, cols), data)
            .map_err(|e| Error::Other(e.to_string()))?;

        Ok(Self { data: array })
    }

    /// Create an image from an ndarray
    pub fn from_array(data: Array2<T>) -> Self {
        Self { data }
    }

    /// Create an image with the same dimensions, filled with a value
    pub fn like(&self, fill_value: T) -> Self {
        Self {
            data: Array2::from_elem(self.data.dim(), fill_value),
        }
    }

    // Dimensions

    /// Number of rows (image height)
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns (image width)
    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// Dimensions as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Total number of pixels
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the image is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    // Data access

    /// Get intensity at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        self.data
            .get((row, col))
            .copied()
            .ok_or(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            })
    }

    /// Get intensity at (row, col) without bounds checking
    ///
    /// # Safety
    /// Caller must ensure row < self.rows() and col < self.cols()
    pub unsafe fn get_unchecked(&self, row: usize, col: usize) -> T {
        unsafe { *self.data.uget((row, col)) }
    }

    /// Set intensity at (row, col)
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        if row >= self.rows() || col >= self.cols() {
            return Err(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        self.data[(row, col)] = value;
        Ok(())
    }

    /// Set intensity at (row, col) without bounds checking
    ///
    /// # Safety
    /// Caller must ensure row < self.rows() and col < self.cols()
    pub unsafe fn set_unchecked(&mut self, row: usize, col: usize, value: T) {
        unsafe {
            *self.data.uget_mut((row, col)) = value;
        }
    }

    /// Get a view of the underlying data
    pub fn view(&self) -> ArrayView2<'_, T> {
        self.data.view()
    }

    /// Get a reference to the underlying array
    pub fn data(&self) -> &Array2<T> {
        &self.data
    }

    /// Get a mutable reference to the underlying array
    pub fn data_mut(&mut self) -> &mut Array2<T> {
        &mut self.data
    }

    /// Consume the image and return the underlying array
    pub fn into_array(self) -> Array2<T> {
        self.data
    }

    /// Whether (row, col) lies on the outermost 1-pixel border
    pub fn is_border(&self, row: usize, col: usize) -> bool {
        row == 0 || col == 0 || row == self.rows() - 1 || col == self.cols() - 1
    }

    // Statistics

    /// Calculate basic statistics (min, max, mean)
    pub fn statistics(&self) -> ImageStatistics<T> {
        let mut min = None;
        let mut max = None;
        let mut sum: f64 = 0.0;

        for &value in self.data.iter() {
            if min.is_none() || value < min.unwrap() {
                min = Some(value);
            }
            if max.is_none() || value > max.unwrap() {
                max = Some(value);
            }
            if let Some(v) = value.to_f64() {
                sum += v;
            }
        }

        let mean = if self.data.is_empty() {
            None
        } else {
            Some(sum / self.data.len() as f64)
        };

        ImageStatistics { min, max, mean }
    }
}

/// Basic statistics for an image
#[derive(Debug, Clone)]
pub struct ImageStatistics<T> {
    pub min: Option<T>,
    pub max: Option<T>,
    pub mean: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_creation() {
        let image: Image<u8> = Image::new(100, 200);
        assert_eq!(image.rows(), 100);
        assert_eq!(image.cols(), 200);
        assert_eq!(image.shape(), (100, 200));
        assert_eq!(image.len(), 20_000);
    }

    #[test]
    fn test_image_access() {
        let mut image: Image<u8> = Image::new(10, 10);
        image.set(5, 5, 42).unwrap();
        assert_eq!(image.get(5, 5).unwrap(), 42);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut image: Image<u8> = Image::new(4, 4);
        assert!(matches!(
            image.get(4, 0),
            Err(Error::IndexOutOfBounds { .. })
        ));
        assert!(matches!(
            image.set(0, 7, 1),
            Err(Error::IndexOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_from_vec_length_check() {
        let result: Result<Image<u8>> = Image::from_vec(vec![0; 11], 3, 4);
        assert!(matches!(result, Err(Error::InvalidDimensions { .. })));
    }

    #[test]
    fn test_is_border() {
        let image: Image<u8> = Image::new(5, 5);
        assert!(image.is_border(0, 2));
        assert!(image.is_border(4, 4));
        assert!(image.is_border(3, 0));
        assert!(!image.is_border(2, 2));
    }

    #[test]
    fn test_statistics() {
        let mut image: Image<u8> = Image::new(10, 10);
        for i in 0..10 {
            for j in 0..10 {
                image.set(i, j, (i * 10 + j) as u8).unwrap();
            }
        }

        let stats = image.statistics();
        assert_eq!(stats.min, Some(0));
        assert_eq!(stats.max, Some(99));
        assert!((stats.mean.unwrap() - 49.5).abs() < 1e-10);
    }
}
