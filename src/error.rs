//! Errors surfaced by the ambient (non-engine) layers of the crate.
//!
//! The engine itself never returns a recoverable error; this type exists
//! purely for the CLI's ROM loading step.

use std::fmt;
use std::io;

#[derive(Debug)]
pub enum LoadError {
    Io(io::Error),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(err) => write!(f, "failed to read ROM image: {err}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(err) => Some(err),
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(err: io::Error) -> Self {
        LoadError::Io(err)
    }
}
