//! Error types for the MetaShift library.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the MetaShift codec core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetaShiftError {
    /// Ciphertext and metadata do not have the same number of characters.
    #[error("Metadata length ({metadata}) does not match ciphertext length ({ciphertext})")]
    LengthMismatch {
        /// Number of characters in the ciphertext.
        ciphertext: usize,
        /// Number of symbols in the metadata stream.
        metadata: usize,
    },
    /// A metadata symbol outside `0..=4` was found.
    #[error("Invalid metadata symbol {symbol:?} at index {index}")]
    InvalidMetadataSymbol {
        /// Character index of the offending symbol.
        index: usize,
        /// The symbol itself.
        symbol: char,
    },
    /// An alphabet is not 26 distinct symbols.
    #[error("Invalid alphabet: {0}")]
    InvalidAlphabet(String),
}

/// Errors produced by the file pipeline wrapped around the codec.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Reading or writing an artifact failed.
    #[error("I/O error on {}", .path.display())]
    Io {
        /// The file being accessed.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The raw input file does not exist.
    #[error("Input file not found: {}", .0.display())]
    MissingInput(PathBuf),
    /// Configuration could not be read, parsed or written.
    #[error("Configuration error: {0}")]
    Config(String),
    /// A shift parameter was not a valid integer.
    #[error("Invalid shift value {0:?}: expected an integer")]
    InvalidShift(String),
    /// The codec rejected its input.
    #[error(transparent)]
    Codec(#[from] MetaShiftError),
}

impl PipelineError {
    /// Wraps an I/O error with the path it occurred on.
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        PipelineError::Io {
            path: path.into(),
            source,
        }
    }
}
