//! Error types for PerilGIS

use crate::geometry::GeometryKind;
use thiserror::Error;

/// Main error type for PerilGIS operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("wrong geometry kind: expected {expected}, got {actual}")]
    GeometryKindMismatch {
        expected: GeometryKind,
        actual: GeometryKind,
    },

    #[error("unsupported geometry kind for this operation: {0}")]
    UnsupportedGeometryKind(GeometryKind),

    #[error("field not found: {0}")]
    FieldNotFound(String),

    #[error("field already exists: {0}")]
    DuplicateField(String),

    #[error("attribute arity mismatch: expected {expected}, got {actual}")]
    AttributeArity { expected: usize, actual: usize },

    #[error("edit session: {0}")]
    EditSession(&'static str),

    #[error("postprocessor lifecycle: {0}")]
    Lifecycle(&'static str),

    #[error("missing parameter: {0}")]
    MissingParameter(&'static str),

    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("GeoJSON error: {0}")]
    GeoJson(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for PerilGIS operations
pub type Result<T> = std::result::Result<T, Error>;
