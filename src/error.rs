//! Error types for distsweep
//!
//! Uses `thiserror` for library errors; the binary wraps these in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for distsweep operations
pub type SweepResult<T> = Result<T, SweepError>;

/// Main error type for distsweep operations
#[derive(Error, Debug)]
pub enum SweepError {
    /// Config file missing at the given path
    #[error("could not open \"{}\"", .path.display())]
    ConfigNotFound { path: PathBuf },

    /// Config file exists but is not parsable
    #[error("could not parse \"{}\": {message}", .path.display())]
    ConfigParse { path: PathBuf, message: String },

    /// Config parsed but lacks usable roots
    #[error(
        "could not find string fields \"rootDir\" and \"outDir\" under \"compilerOptions\" in \"{}\"",
        .path.display()
    )]
    MissingRoots { path: PathBuf },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Filesystem notification error
    #[error("watch error: {0}")]
    Notify(#[from] notify::Error),
}
