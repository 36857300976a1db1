pub mod bmp;

pub use bmp::{BmpError, BmpImage};
