//! I/O for reading and writing grayscale images

mod gray;

pub use gray::{read_gray8, write_gray8};
