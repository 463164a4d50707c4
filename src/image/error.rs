//! Error type for image assembly

use std::path::PathBuf;
use std::{io, result};
use thiserror::Error;

/// Error type for image assembly.
///
/// Every variant is build-fatal: the partial artifact is discarded and
/// nothing appears under the final output name.
#[derive(Debug, Error)]
pub enum Error {
    /// Underlying cause of error is I/O related
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// A source ROM's on-disk length no longer matches the length recorded
    /// when it was allocated.
    #[error("{} is {actual} bytes on disk but {expected} bytes were allocated", .path.display())]
    SourceSizeMismatch {
        path: PathBuf,
        expected: u64,
        actual: u64,
    },

    /// Writing a bank's content would cross the bank boundary.
    #[error("bank {bank} content ({written} bytes) exceeds its {capacity} byte capacity")]
    BankOverflow {
        bank: usize,
        written: u64,
        capacity: u64,
    },

    /// The finished image is not exactly the chip's capacity.
    #[error("assembled {actual} bytes, expected exactly {expected}")]
    ImageLength { expected: u64, actual: u64 },
}

impl From<Error> for io::Error {
    fn from(err: Error) -> io::Error {
        match err {
            Error::IoError(e) => e,
            _ => io::Error::new(io::ErrorKind::Other, format!("{}", err)),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
