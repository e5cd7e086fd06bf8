//! Error types for catalog operations

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why a remote fetch did not produce a body
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("HTTP {0}")]
    Status(u16),

    #[error("request timed out")]
    Timeout,

    #[error("{0}")]
    Transport(String),
}

/// Errors reported per unit of work (one name, one file)
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{kind} \"{name}\" not found. Available: {}", available.join(", "))]
    NotFound {
        kind: &'static str,
        name: String,
        available: Vec<String>,
    },

    #[error("Could not obtain {registry_path} ({reason}). Copy it manually from: {url}")]
    SourceUnavailable {
        registry_path: String,
        url: String,
        reason: FetchError,
    },

    #[error("Failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No source available for {0}")]
    NoSource(String),

    #[error("Invalid registry URL: {0}")]
    InvalidUrl(String),

    #[error("Project not initialized. Run \"{0} init\" first.")]
    NotInitialized(&'static str),
}

impl CatalogError {
    pub(crate) fn io(action: &'static str, path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
