//! Errors that abort a build

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A fatal build error. Each variant names the path that failed.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("cannot read source directory {path:?}: {source}")]
    ReadSourceDir { path: PathBuf, source: io::Error },

    #[error("cannot read template {path:?}: {source}")]
    ReadTemplate { path: PathBuf, source: io::Error },

    #[error("cannot read article {path:?}: {source}")]
    ReadDocument { path: PathBuf, source: io::Error },

    #[error("cannot write {path:?}: {source}")]
    WriteOutput { path: PathBuf, source: io::Error },
}

pub type BuildResult<T> = std::result::Result<T, BuildError>;
