//! Grayscale 8-bit image file I/O
//!
//! Uses the `image` crate for decoding and encoding. Whatever the source
//! format, content is converted to 8-bit luma on read; the output format
//! is chosen by the file extension on write.

use crate::buffer::Image;
use crate::error::{Error, Result};
use image::GrayImage;
use std::path::Path;

/// Read an image file and convert it to an 8-bit grayscale buffer.
///
/// Fails with [`Error::FileNotFound`] if the path does not resolve and
/// [`Error::UnsupportedFormat`] if the content cannot be decoded.
pub fn read_gray8<P: AsRef<Path>>(path: P) -> Result<Image<u8>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let decoded = image::open(path).map_err(|e| match e {
        image::ImageError::IoError(io) => Error::Io(io),
        other => Error::UnsupportedFormat(format!("{}: {}", path.display(), other)),
    })?;

    let gray = decoded.into_luma8();
    let rows = gray.height() as usize;
    let cols = gray.width() as usize;
    Image::from_vec(gray.into_raw(), rows, cols)
}

/// Write an 8-bit grayscale buffer to a file, creating parent directories.
pub fn write_gray8<P: AsRef<Path>>(img: &Image<u8>, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let (rows, cols) = img.shape();
    let data: Vec<u8> = img.data().iter().copied().collect();
    let buffer = GrayImage::from_raw(cols as u32, rows as u32, data).ok_or(
        Error::InvalidDimensions {
            width: cols,
            height: rows,
        },
    )?;

    buffer.save(path).map_err(|e| match e {
        image::ImageError::IoError(io) => Error::Io(io),
        other => Error::UnsupportedFormat(format!("{}: {}", path.display(), other)),
    })
}
