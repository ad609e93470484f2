//! Default geometry engine backed by the `geo` crate
//!
//! Overlay semantics per feature kind:
//! - polygon vs polygon goes through [`BooleanOps`]
//! - line vs polygon uses [`BooleanOps::clip`] (keep inside / keep outside)
//! - point vs polygon reduces to a membership test
//!
//! Overlays against a non-polygonal `b` produce an empty collection;
//! callers gate on [`GeometryOps::intersects`] first.

use geo::{BooleanOps, Intersects, Validation};
use geo_types::{
    Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point,
};

use super::GeometryOps;

/// Geometry engine delegating to `geo`
#[derive(Debug, Default, Clone, Copy)]
pub struct GeoEngine;

impl GeoEngine {
    pub fn new() -> Self {
        GeoEngine
    }

    /// Normalize polygonal geometries to a multipolygon
    fn as_multi_polygon(geometry: &Geometry<f64>) -> Option<MultiPolygon<f64>> {
        match geometry {
            Geometry::Polygon(p) => Some(MultiPolygon::new(vec![p.clone()])),
            Geometry::MultiPolygon(mp) => Some(mp.clone()),
            Geometry::Rect(r) => Some(MultiPolygon::new(vec![r.to_polygon()])),
            Geometry::Triangle(t) => Some(MultiPolygon::new(vec![t.to_polygon()])),
            _ => None,
        }
    }

    /// Normalize linear geometries to a multilinestring
    fn as_multi_line(geometry: &Geometry<f64>) -> Option<MultiLineString<f64>> {
        match geometry {
            Geometry::LineString(ls) => Some(MultiLineString::new(vec![ls.clone()])),
            Geometry::MultiLineString(mls) => Some(mls.clone()),
            Geometry::Line(l) => Some(MultiLineString::new(vec![LineString::from(vec![
                l.start, l.end,
            ])])),
            _ => None,
        }
    }

    /// Normalize point geometries to a multipoint
    fn as_multi_point(geometry: &Geometry<f64>) -> Option<MultiPoint<f64>> {
        match geometry {
            Geometry::Point(p) => Some(MultiPoint::new(vec![*p])),
            Geometry::MultiPoint(mp) => Some(mp.clone()),
            _ => None,
        }
    }

    fn empty() -> Geometry<f64> {
        Geometry::GeometryCollection(GeometryCollection::default())
    }

    /// Shared body of `intersection` / `difference`; `keep_outside` picks
    /// which side of the overlay survives.
    fn overlay(a: &Geometry<f64>, b: &Geometry<f64>, keep_outside: bool) -> Geometry<f64> {
        let Some(mask) = Self::as_multi_polygon(b) else {
            return Self::empty();
        };
        if let Some(mp) = Self::as_multi_polygon(a) {
            let result = if keep_outside {
                mp.difference(&mask)
            } else {
                mp.intersection(&mask)
            };
            Geometry::MultiPolygon(result)
        } else if let Some(mls) = Self::as_multi_line(a) {
            Geometry::MultiLineString(mask.clip(&mls, keep_outside))
        } else if let Some(points) = Self::as_multi_point(a) {
            let kept: Vec<Point<f64>> = points
                .0
                .into_iter()
                .filter(|p| mask.intersects(p) != keep_outside)
                .collect();
            Geometry::MultiPoint(MultiPoint::new(kept))
        } else {
            Self::empty()
        }
    }
}

impl GeometryOps for GeoEngine {
    fn intersects(&self, a: &Geometry<f64>, b: &Geometry<f64>) -> bool {
        a.intersects(b)
    }

    fn intersection(&self, a: &Geometry<f64>, b: &Geometry<f64>) -> Geometry<f64> {
        Self::overlay(a, b, false)
    }

    fn difference(&self, a: &Geometry<f64>, b: &Geometry<f64>) -> Geometry<f64> {
        Self::overlay(a, b, true)
    }

    fn combine(&self, a: &Geometry<f64>, b: &Geometry<f64>) -> Option<Geometry<f64>> {
        if let (Some(pa), Some(pb)) = (Self::as_multi_polygon(a), Self::as_multi_polygon(b)) {
            return Some(Geometry::MultiPolygon(pa.union(&pb)));
        }
        if let (Some(la), Some(lb)) = (Self::as_multi_line(a), Self::as_multi_line(b)) {
            let mut lines = la.0;
            lines.extend(lb.0);
            return Some(Geometry::MultiLineString(MultiLineString::new(lines)));
        }
        if let (Some(pa), Some(pb)) = (Self::as_multi_point(a), Self::as_multi_point(b)) {
            let mut points = pa.0;
            points.extend(pb.0);
            return Some(Geometry::MultiPoint(MultiPoint::new(points)));
        }
        None
    }

    fn is_valid(&self, geometry: &Geometry<f64>) -> bool {
        geometry.is_valid()
    }

    fn parts(&self, geometry: &Geometry<f64>) -> Vec<Geometry<f64>> {
        match geometry {
            Geometry::MultiPolygon(mp) => {
                mp.0.iter().cloned().map(Geometry::Polygon).collect()
            }
            Geometry::MultiLineString(mls) => {
                mls.0.iter().cloned().map(Geometry::LineString).collect()
            }
            Geometry::MultiPoint(mp) => mp.0.iter().copied().map(Geometry::Point).collect(),
            Geometry::GeometryCollection(gc) => {
                gc.0.iter().flat_map(|g| self.parts(g)).collect()
            }
            other => vec![other.clone()],
        }
    }
}
