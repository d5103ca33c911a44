//! Error types for the geometry core.

use std::path::PathBuf;
use thiserror::Error;

/// Result type used throughout the core.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by mesh construction, the generators and OBJ file I/O.
#[derive(Debug, Error)]
pub enum Error {
    /// A mesh or centroid was requested for zero vertices.
    #[error("mesh has no vertices")]
    EmptyMesh,

    /// A face lists fewer than three vertex indices.
    #[error("face {face} has {count} indices, at least 3 are required")]
    DegenerateFace { face: usize, count: usize },

    /// A face references a vertex that does not exist.
    #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        face: usize,
        index: i64,
        vertex_count: usize,
    },

    /// The revolution profile is too short to sweep.
    #[error("profile needs at least 2 points, got {0}")]
    InsufficientProfile(usize),

    #[error("slice count must be at least 1")]
    InvalidSlices,

    #[error("grid size must be at least 1")]
    InvalidGrid,

    /// A surface domain bound is not a number.
    #[error("invalid value for {name}: {value:?}")]
    InvalidBound { name: &'static str, value: String },

    #[error("unknown rotation axis: {0:?}")]
    UnknownAxis(String),

    #[error("unknown solid: {0:?}")]
    UnknownSolid(String),

    #[error("unknown projection: {0:?}")]
    UnknownProjection(String),

    /// Reading or writing an OBJ file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create an invalid bound error
    pub fn invalid_bound(name: &'static str, value: impl Into<String>) -> Self {
        Error::InvalidBound {
            name,
            value: value.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
