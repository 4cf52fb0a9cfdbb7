//! Error types for the persistent store and the terminal host.
//!
//! The simulation itself has no error states; everything here comes from
//! I/O around it.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by a `KeyValueStore`.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("store I/O on {path}: {source}")]
    Io {
        /// The file being accessed.
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Key names map to file names, so they are restricted.
    #[error("invalid store key: {0:?}")]
    InvalidKey(String),
}

/// Errors that end the program.
#[derive(Error, Debug)]
pub enum ShooterError {
    /// Terminal setup, drawing or event reading failed.
    #[error("terminal I/O: {0}")]
    Terminal(#[from] io::Error),

    /// The log file could not be opened.
    #[error("cannot open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Command-line options are inconsistent.
    #[error("invalid configuration: {0}")]
    Config(String),
}
