//! Gzip decompression for downloaded market-depth files.

use depthdump_types::DepthError;
use flate2::read::MultiGzDecoder;
use std::fs;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during decompression.
#[derive(Error, Debug)]
pub enum DecompressError {
    /// Gzip decoding failed.
    #[error("Gzip decompression failed: {0}")]
    Gzip(String),

    /// Empty input data.
    #[error("Empty input data")]
    EmptyInput,

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<DecompressError> for DepthError {
    fn from(err: DecompressError) -> Self {
        match err {
            DecompressError::Io(e) => Self::Io(e),
            e => Self::Decompress(e.to_string()),
        }
    }
}

/// Decompresses a complete gzip payload in memory, concatenating every
/// member of a multi-member stream.
///
/// # Errors
///
/// Returns an error if the input is empty or not valid gzip.
pub fn decompress_gzip(compressed: &[u8]) -> Result<Vec<u8>, DecompressError> {
    if compressed.is_empty() {
        return Err(DecompressError::EmptyInput);
    }

    let mut decompressed = Vec::new();
    MultiGzDecoder::new(compressed)
        .read_to_end(&mut decompressed)
        .map_err(|e| DecompressError::Gzip(e.to_string()))?;

    Ok(decompressed)
}

/// Reads the gzip file at `src` in full, decompresses it and writes the
/// result to `dst`. Returns the number of decompressed bytes written.
///
/// # Errors
///
/// Returns an error if either file cannot be accessed or the content is
/// not valid gzip.
pub fn decompress_file(src: &Path, dst: &Path) -> Result<usize, DecompressError> {
    let compressed = fs::read(src)?;
    let decompressed = decompress_gzip(&compressed)?;
    fs::write(dst, &decompressed)?;
    Ok(decompressed.len())
}
