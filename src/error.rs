use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while loading or analyzing a force series.
#[derive(Debug, Error)]
pub enum ForcesError {
    #[error("could not find file: {0:?}")]
    NotFound(PathBuf),

    #[error("failed to read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid glob pattern for {path:?}")]
    Pattern {
        path: PathBuf,
        #[source]
        source: glob::PatternError,
    },

    #[error("filter window must be an odd number, but is {0}")]
    InvalidWindow(usize),

    #[error("time range must be non-negative and ordered, but is ({start}, {end})")]
    InvalidRange { start: f64, end: f64 },

    #[error("{name} must be finite and positive, but is {value}")]
    InvalidScale { name: &'static str, value: f64 },

    #[error("missing {0}")]
    Precondition(&'static str),

    #[error("{0} is not implemented")]
    NotImplemented(&'static str),
}

pub type Result<T> = std::result::Result<T, ForcesError>;
