use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};
use thiserror::Error;

/// Why a BMP file failed to decode
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BmpError {
    /// Image file could not be opened
    #[error("image file not found")]
    NotFound,

    /// File does not carry the `BM` signature
    #[error("not a BMP image")]
    WrongImageFormat,

    /// Pixel format is not 24-bit RGB
    #[error("unsupported pixel format: {0} bits per pixel")]
    WrongPixelFormat(u16),

    /// Pixel data is shorter than the declared dimensions require
    #[error("image data is truncated or corrupted")]
    Corrupted,
}

/// An uncompressed 24-bit BMP decoded into a raw pixel array.
///
/// Pixels are stored exactly as the file stores them: three bytes per
/// pixel in B, G, R order, no alpha, rows **bottom-up** — the first row of
/// the buffer is the visually bottom row of the image. Callers that want
/// visual order can walk [`rows_top_down`](Self::rows_top_down).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BmpImage {
    width: i32,
    height: i32,
    pixels: Vec<u8>,
}

impl BmpImage {
    /// Decode a BMP file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BmpError> {
        let file = File::open(path).map_err(|_| BmpError::NotFound)?;
        Self::decode(BufReader::new(file))
    }

    /// Decode a BMP from any seekable byte stream.
    ///
    /// Reads the 14-byte file header and 40-byte info header, validates
    /// the signature and bit depth, seeks to the recorded pixel-data
    /// offset, then reads `height` rows of `width * 3` bytes, skipping the
    /// padding that aligns each stored row to 4 bytes. The total byte
    /// count read is compared against `width * height * 3` to catch
    /// truncated files.
    pub fn decode<R: Read + Seek>(mut reader: R) -> Result<Self, BmpError> {
        let mut signature = [0u8; 2];
        reader
            .read_exact(&mut signature)
            .map_err(|_| BmpError::WrongImageFormat)?;
        if &signature != b"BM" {
            return Err(BmpError::WrongImageFormat);
        }

        // Rest of the file header
        let _file_size = read_u32(&mut reader)?;
        let _reserved = read_u32(&mut reader)?;
        let data_offset = read_u32(&mut reader)?;

        // Info header
        let _header_size = read_u32(&mut reader)?;
        let width = read_i32(&mut reader)?;
        let height = read_i32(&mut reader)?;
        let _planes = read_u16(&mut reader)?;
        let bits_per_pixel = read_u16(&mut reader)?;

        if bits_per_pixel != 24 {
            return Err(BmpError::WrongPixelFormat(bits_per_pixel));
        }
        if width <= 0 || height <= 0 {
            return Err(BmpError::Corrupted);
        }

        let row_bytes = width as usize * 3;
        let padding = (4 - row_bytes % 4) % 4;
        let expected = row_bytes * height as usize;

        reader
            .seek(SeekFrom::Start(data_offset as u64))
            .map_err(|_| BmpError::Corrupted)?;

        let mut pixels = vec![0u8; expected];
        let mut total_read = 0usize;
        for row in pixels.chunks_exact_mut(row_bytes) {
            total_read += read_up_to(&mut reader, row)?;
            if padding > 0 {
                reader
                    .seek(SeekFrom::Current(padding as i64))
                    .map_err(|_| BmpError::Corrupted)?;
            }
        }

        if total_read != expected {
            return Err(BmpError::Corrupted);
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Raw pixel bytes, B,G,R per pixel, rows bottom-up as stored.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Rows in visual order, top row first.
    ///
    /// Storage stays bottom-up; this only reverses the iteration.
    pub fn rows_top_down(&self) -> impl Iterator<Item = &[u8]> {
        self.pixels.chunks_exact(self.width as usize * 3).rev()
    }
}

/// Read as many bytes as the stream has for this row, up to `buf.len()`.
///
/// Unlike `read_exact`, a short row is not an error here; the caller sums
/// row counts and reports truncation once, against the whole image.
fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize, BmpError> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(_) => return Err(BmpError::Corrupted),
        }
    }
    Ok(filled)
}

fn read_u16<R: Read>(reader: &mut R) -> Result<u16, BmpError> {
    reader.read_u16::<LittleEndian>().map_err(|_| BmpError::Corrupted)
}

fn read_u32<R: Read>(reader: &mut R) -> Result<u32, BmpError> {
    reader.read_u32::<LittleEndian>().map_err(|_| BmpError::Corrupted)
}

fn read_i32<R: Read>(reader: &mut R) -> Result<i32, BmpError> {
    reader.read_i32::<LittleEndian>().map_err(|_| BmpError::Corrupted)
}
