//! # PerilGIS Core
//!
//! Core types and I/O for the PerilGIS disaster-impact toolkit.
//!
//! This crate provides:
//! - `MemoryLayer`: in-memory vector feature collection with an edit/commit
//!   transaction bracket
//! - `Feature`, `Schema`, `AttributeValue`: positional attribute model
//! - `GeometryOps` / `GeoEngine`: geometry engine seam and its `geo`-backed
//!   default implementation
//! - `Crs`: coordinate reference system metadata
//! - GeoJSON I/O for vector layers

pub mod crs;
pub mod error;
pub mod geometry;
pub mod io;
pub mod vector;

pub use crs::Crs;
pub use error::{Error, Result};
pub use geometry::{GeoEngine, GeometryKind, GeometryOps};
pub use vector::{
    AttributeValue, BoundingBox, Feature, FeatureFilter, Field, FieldType, MemoryLayer, Schema,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::crs::Crs;
    pub use crate::error::{Error, Result};
    pub use crate::geometry::{GeoEngine, GeometryKind, GeometryOps};
    pub use crate::vector::{
        AttributeValue, BoundingBox, Feature, FeatureFilter, Field, FieldType, MemoryLayer, Schema,
    };
}
