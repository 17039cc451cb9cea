//! Error types shared by the collector, extractor and CLI.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while validating a mod tree.
#[derive(Error, Debug)]
pub enum CheckError {
    /// Staged mode was requested but nothing relevant is staged.
    #[error("no staged files to validate")]
    EmptyInput,
    #[error("cannot read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is not valid UTF-8")]
    Decode { path: PathBuf },
    #[error("path does not exist: {0}")]
    InvalidPath(PathBuf),
    #[error("path is not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("git: {0}")]
    Git(String),
    #[error("invalid config: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CheckError>;
