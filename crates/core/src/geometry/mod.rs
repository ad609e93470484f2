//! Geometry kinds and the geometry engine seam
//!
//! Vector layers are homogeneous in [`GeometryKind`]. The actual geometry
//! math (predicates, overlays, decomposition) sits behind the
//! [`GeometryOps`] trait so analysis code stays engine-agnostic and can be
//! exercised with fakes; [`GeoEngine`] is the default implementation backed
//! by the `geo` crate.

mod engine;

pub use engine::GeoEngine;

use geo_types::Geometry;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three homogeneous geometry kinds a vector layer can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryKind {
    Point,
    Line,
    Polygon,
}

impl GeometryKind {
    /// Classify a geometry value.
    ///
    /// Multi-geometries classify as their member kind. Returns `None` for
    /// geometry collections, which are not homogeneous.
    pub fn of(geometry: &Geometry<f64>) -> Option<GeometryKind> {
        match geometry {
            Geometry::Point(_) | Geometry::MultiPoint(_) => Some(GeometryKind::Point),
            Geometry::Line(_) | Geometry::LineString(_) | Geometry::MultiLineString(_) => {
                Some(GeometryKind::Line)
            }
            Geometry::Polygon(_)
            | Geometry::MultiPolygon(_)
            | Geometry::Rect(_)
            | Geometry::Triangle(_) => Some(GeometryKind::Polygon),
            Geometry::GeometryCollection(_) => None,
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GeometryKind::Point => "point",
            GeometryKind::Line => "line",
            GeometryKind::Polygon => "polygon",
        };
        write!(f, "{}", name)
    }
}

/// Geometry operations consumed by the vector analysis routines.
///
/// `b` is the overlay geometry (in practice a polygon or multipolygon);
/// `a` is a feature geometry of any kind.
pub trait GeometryOps {
    /// Whether the two geometries share any point
    fn intersects(&self, a: &Geometry<f64>, b: &Geometry<f64>) -> bool;

    /// The parts of `a` covered by polygonal `b`
    fn intersection(&self, a: &Geometry<f64>, b: &Geometry<f64>) -> Geometry<f64>;

    /// The parts of `a` outside polygonal `b`
    fn difference(&self, a: &Geometry<f64>, b: &Geometry<f64>) -> Geometry<f64>;

    /// Union of two geometries of the same kind.
    ///
    /// Returns `None` when the pair cannot be combined (e.g. mixed kinds).
    fn combine(&self, a: &Geometry<f64>, b: &Geometry<f64>) -> Option<Geometry<f64>>;

    /// Whether the geometry is valid by the engine's rules
    fn is_valid(&self, geometry: &Geometry<f64>) -> bool;

    /// Decompose a geometry into leaf parts.
    ///
    /// Multi-geometries yield their members, collections are flattened
    /// recursively, and a simple geometry yields itself.
    fn parts(&self, geometry: &Geometry<f64>) -> Vec<Geometry<f64>>;
}
