//! Map loading errors.

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong turning a map file into walls.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("failed to read map `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed map JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("wall #{index} is invalid: {reason}")]
    InvalidWall { index: usize, reason: String },
}
