//! Feature type: one geometry plus positional attributes

use crate::vector::AttributeValue;
use geo_types::Geometry;

/// A geographic feature with geometry and positionally ordered attributes.
///
/// The attribute order follows the owning layer's schema; the feature itself
/// carries no field names.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// Feature geometry
    pub geometry: Geometry<f64>,
    /// Attribute values, one per schema field
    pub attributes: Vec<AttributeValue>,
}

impl Feature {
    pub fn new(geometry: Geometry<f64>, attributes: Vec<AttributeValue>) -> Self {
        Self {
            geometry,
            attributes,
        }
    }

    /// Create a feature with no attributes
    pub fn from_geometry(geometry: Geometry<f64>) -> Self {
        Self {
            geometry,
            attributes: Vec::new(),
        }
    }
}

impl From<Geometry<f64>> for Feature {
    fn from(geometry: Geometry<f64>) -> Self {
        Self::from_geometry(geometry)
    }
}
