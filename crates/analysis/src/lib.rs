//! # PerilGIS Analysis
//!
//! Disaster-impact analysis operations for PerilGIS.
//!
//! ## Available categories
//!
//! - **vector**: point-to-rectangle expansion, dissolve, polygon split
//! - **postprocessors**: gender, age and minimum-needs impact indicators

pub mod postprocessors;
pub mod vector;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::postprocessors::{
        AgePostprocessor, GenderPostprocessor, IndicatorResult, MinimumNeedsPostprocessor,
        Postprocessor, PostprocessorParams, ResultLog,
    };
    pub use crate::vector::{points_to_rectangles, split_by_polygon, union_geometry, MarkDirective};
    pub use perilgis_core::prelude::*;
}
