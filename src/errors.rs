/*!
 * Error types for the srtconv library.
 *
 * This module contains the error kinds surfaced by the conversion pipeline,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading an SRT container
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// The content holds no well-formed cue block
    #[error("no valid subtitle cues were found in the SRT content")]
    NoCues,

    /// A time-range line could not be interpreted
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

/// Errors returned by the conversion entry points
#[derive(Error, Debug)]
pub enum ConversionError {
    /// The input path does not exist
    #[error("input file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The container content is malformed or empty
    #[error("failed to parse subtitle file: {0}")]
    Parse(#[from] SubtitleError),

    /// The script conversion dictionaries could not be loaded at startup
    #[error("script conversion is unavailable: the conversion dictionaries could not be loaded")]
    ConversionUnavailable,

    /// An operation was invoked without the option it requires
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// The input exists but could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        /// Path that was being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The destination could not be written
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        /// Path that was being written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

