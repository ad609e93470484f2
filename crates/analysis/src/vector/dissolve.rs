//! Geometry union (dissolve)
//!
//! Merges the geometries of a layer into one combined outline, removing
//! internal boundaries. Attributes are ignored.

use geo_types::Geometry;
use perilgis_core::{FeatureFilter, GeometryOps, MemoryLayer};

/// Union of a layer's geometries, regardless of attributes.
///
/// Geometries are combined pairwise; after each combination the candidate is
/// validated and an invalid (or failed) combination is discarded, keeping
/// the previous accumulator. A single malformed feature therefore cannot
/// poison the whole union: it is silently skipped and the result is the
/// union of the remaining combinable geometries.
///
/// # Arguments
/// * `engine` - Geometry engine
/// * `layer` - Input layer
/// * `filter` - Optional predicate restricting which features participate
///
/// # Returns
/// The combined geometry, or `None` when no feature matches the filter
pub fn union_geometry(
    engine: &impl GeometryOps,
    layer: &MemoryLayer,
    filter: Option<&FeatureFilter>,
) -> Option<Geometry<f64>> {
    let mut result: Option<Geometry<f64>> = None;
    for feature in layer.features_filtered(filter) {
        match &result {
            None => result = Some(feature.geometry.clone()),
            Some(accumulated) => {
                if let Some(combined) = engine.combine(accumulated, &feature.geometry) {
                    if engine.is_valid(&combined) {
                        result = Some(combined);
                    }
                }
            }
        }
    }
    result
}
