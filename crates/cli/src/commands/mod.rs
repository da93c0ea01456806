//! CLI command implementations.

pub mod catalog;
pub mod quote;

use std::path::Path;

use thiserror::Error;

/// Errors shared by the file-driven commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("catalog has {0} invariant violation(s)")]
    InvalidCatalog(usize),
}

/// Read and deserialize a JSON file.
pub fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CommandError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CommandError::Read {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| CommandError::Parse {
        path: path.display().to_string(),
        source,
    })
}
