//! Point-to-rectangle expansion
//!
//! Turns a point layer into a polygon layer of `dx` by `dy` rectangles,
//! one per point, with the point at the upper-left corner. Used to grow
//! sampling locations into footprint cells before overlay analysis.

use geo_types::{Geometry, LineString, Polygon};
use perilgis_core::{Feature, GeometryKind, MemoryLayer, Result};

/// Create a polygon layer of rectangles around the points of a layer.
///
/// Each point `(x, y)` becomes the rectangle `(x, y) (x+dx, y) (x+dx, y-dy)
/// (x, y-dy)`: the point is the upper-left corner and the rectangle extends
/// right and down. Attributes are copied unchanged, and the output layer
/// shares the input's CRS and schema. Members of a multipoint each produce
/// one rectangle.
///
/// # Arguments
/// * `points` - Point layer
/// * `dx` - Length of the horizontal sides (positive)
/// * `dy` - Length of the vertical sides (positive)
///
/// # Returns
/// A polygon layer with one rectangle per input point
pub fn points_to_rectangles(points: &MemoryLayer, dx: f64, dy: f64) -> Result<MemoryLayer> {
    let mut polygons = MemoryLayer::new(
        GeometryKind::Polygon,
        points.crs().clone(),
        points.schema().clone(),
    );

    polygons.start_editing()?;
    let mut features = Vec::with_capacity(points.len());
    for feature in points.features() {
        match &feature.geometry {
            Geometry::Point(p) => {
                features.push(Feature::new(
                    Geometry::Polygon(rectangle(p.x(), p.y(), dx, dy)),
                    feature.attributes.clone(),
                ));
            }
            Geometry::MultiPoint(mp) => {
                for p in &mp.0 {
                    features.push(Feature::new(
                        Geometry::Polygon(rectangle(p.x(), p.y(), dx, dy)),
                        feature.attributes.clone(),
                    ));
                }
            }
            _ => {}
        }
    }
    polygons.add_features(features)?;
    polygons.commit_changes()?;
    polygons.update_extents();

    Ok(polygons)
}

fn rectangle(x: f64, y: f64, dx: f64, dy: f64) -> Polygon<f64> {
    Polygon::new(
        LineString::from(vec![
            (x, y),
            (x + dx, y),
            (x + dx, y - dy),
            (x, y - dy),
            (x, y),
        ]),
        vec![],
    )
}
