//! Vector data structures
//!
//! - [`Feature`]: geometry + positional attributes
//! - [`Schema`] / [`Field`] / [`AttributeValue`]: attribute model
//! - [`MemoryLayer`]: homogeneous feature collection with an edit/commit
//!   transaction bracket
//! - [`BoundingBox`]: layer extents

mod attribute;
mod extent;
mod feature;
mod layer;

pub use attribute::{AttributeValue, Field, FieldType, Schema};
pub use extent::BoundingBox;
pub use feature::Feature;
pub use layer::{FeatureFilter, MemoryLayer};
