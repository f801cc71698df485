//! Error type shared by the library.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building constraints, loading word lists or solving.
///
/// Running out of candidates while solving is not an error; see
/// [`Outcome::NoSolution`](crate::solver::Outcome::NoSolution).
#[derive(Error, Debug)]
pub enum AidError {
    #[error("word \"{word}\" must be length {expected}")]
    LengthMismatch { word: String, expected: usize },
    #[error("word \"{word}\" contains invalid character {ch:?}")]
    InvalidCharacter { word: String, ch: char },
    #[error("invalid selection \"{0}\", expected a count or a percentage such as 10%")]
    InvalidSelection(String),
    #[error("unbalanced quotes in start options file {0}")]
    InvalidFlags(PathBuf),
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, AidError>;
