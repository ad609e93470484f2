//! Splitting layer features by a polygon
//!
//! Each feature is cut into the parts inside and outside a splitting
//! polygon. An optional mark directive tags output features with an integer
//! field: the supplied value for inside parts, `0` for outside parts and
//! untouched features.

use geo_types::Geometry;
use perilgis_core::{
    AttributeValue, Error, Feature, FeatureFilter, Field, FieldType, GeometryKind, GeometryOps,
    MemoryLayer, Result,
};

/// Field name and value used to tag the parts that fell inside the polygon
#[derive(Debug, Clone, PartialEq)]
pub struct MarkDirective {
    pub field: String,
    pub value: i64,
}

impl MarkDirective {
    pub fn new(field: impl Into<String>, value: i64) -> Self {
        Self {
            field: field.into(),
            value,
        }
    }
}

/// Split the features of a layer by a polygon.
///
/// Features intersecting the polygon are decomposed: one output feature per
/// part of the intersection (marked with the directive's value) and one per
/// part of the remainder outside the polygon (marked `0`). Parts not
/// matching the layer's geometry kind (degenerate artifacts of the overlay)
/// are dropped. Features not intersecting the polygon are passed through
/// unchanged, marked `0`.
///
/// If the mark field is missing from the schema it is appended once as an
/// integer field; otherwise it is overwritten in place.
///
/// # Arguments
/// * `engine` - Geometry engine
/// * `layer` - Input layer; point layers cannot be split
/// * `polygon` - Splitting polygon geometry
/// * `filter` - Optional predicate restricting which features are split
/// * `mark` - Optional mark directive
///
/// # Returns
/// A new layer of the same kind and CRS holding the split features
///
/// # Errors
/// `UnsupportedGeometryKind` for point layers; `FieldNotFound` when the
/// mark field cannot be resolved after schema extension.
pub fn split_by_polygon(
    engine: &impl GeometryOps,
    layer: &MemoryLayer,
    polygon: &Geometry<f64>,
    filter: Option<&FeatureFilter>,
    mark: Option<&MarkDirective>,
) -> Result<MemoryLayer> {
    let kind = layer.kind();
    if kind == GeometryKind::Point {
        return Err(Error::UnsupportedGeometryKind(kind));
    }

    let mut result = MemoryLayer::new(kind, layer.crs().clone(), layer.schema().clone());

    // One-time schema extension for a mark field not present on the source
    let mut field_added = false;
    if let Some(mark) = mark {
        if !result.schema().contains(&mark.field) {
            result.start_editing()?;
            result.add_field(Field::new(mark.field.clone(), FieldType::Int))?;
            result.commit_changes()?;
            field_added = true;
        }
    }
    let mark_index = match mark {
        Some(m) => Some(
            result
                .schema()
                .index_of(&m.field)
                .ok_or_else(|| Error::FieldNotFound(m.field.clone()))?,
        ),
        None => None,
    };

    let mut split_features = Vec::new();
    for feature in layer.features_filtered(filter) {
        let geometry = &feature.geometry;
        if engine.intersects(geometry, polygon) {
            let inside = engine.intersection(geometry, polygon);
            for part in engine.parts(&inside) {
                if GeometryKind::of(&part) != Some(kind) {
                    continue;
                }
                let attributes = marked_attributes(
                    &feature.attributes,
                    mark_index,
                    field_added,
                    mark.map(|m| m.value),
                );
                split_features.push(Feature::new(part, attributes));
            }

            let outside = engine.difference(geometry, polygon);
            for part in engine.parts(&outside) {
                if GeometryKind::of(&part) != Some(kind) {
                    continue;
                }
                let attributes =
                    marked_attributes(&feature.attributes, mark_index, field_added, mark.map(|_| 0));
                split_features.push(Feature::new(part, attributes));
            }
        } else {
            let attributes =
                marked_attributes(&feature.attributes, mark_index, field_added, mark.map(|_| 0));
            split_features.push(Feature::new(geometry.clone(), attributes));
        }
    }

    result.start_editing()?;
    result.add_features(split_features)?;
    result.commit_changes()?;
    result.update_extents();

    Ok(result)
}

/// Copy the source attributes, setting the mark field when marking is on.
/// An appended field is pushed; a pre-existing one is overwritten in place.
fn marked_attributes(
    attributes: &[AttributeValue],
    mark_index: Option<usize>,
    field_added: bool,
    value: Option<i64>,
) -> Vec<AttributeValue> {
    let mut out = attributes.to_vec();
    if let (Some(index), Some(value)) = (mark_index, value) {
        if field_added {
            out.push(AttributeValue::Int(value));
        } else {
            out[index] = AttributeValue::Int(value);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{point, LineString, Polygon};
    use perilgis_core::{Crs, GeoEngine, Schema};

    fn square(x0: f64, y0: f64, size: f64) -> Polygon<f64> {
        Polygon::new(
            LineString::from(vec![
                (x0, y0),
                (x0 + size, y0),
                (x0 + size, y0 + size),
                (x0, y0 + size),
                (x0, y0),
            ]),
            vec![],
        )
    }

    fn point_layer() -> MemoryLayer {
        let mut layer = MemoryLayer::new(GeometryKind::Point, Crs::wgs84(), Schema::empty());
        layer.start_editing().unwrap();
        layer
            .add_features(vec![Feature::from_geometry(Geometry::Point(
                point! { x: 0.0, y: 0.0 },
            ))])
            .unwrap();
        layer.commit_changes().unwrap();
        layer
    }

    #[test]
    fn test_point_layer_rejected() {
        let mask = Geometry::Polygon(square(0.0, 0.0, 10.0));
        let result = split_by_polygon(&GeoEngine::new(), &point_layer(), &mask, None, None);
        assert!(matches!(
            result,
            Err(Error::UnsupportedGeometryKind(GeometryKind::Point))
        ));
    }

    #[test]
    fn test_mark_overwrites_existing_field_in_place() {
        let mut layer = MemoryLayer::new(
            GeometryKind::Polygon,
            Crs::wgs84(),
            Schema::new(vec![
                Field::new("affected", FieldType::Int),
                Field::new("name", FieldType::String),
            ]),
        );
        layer.start_editing().unwrap();
        layer
            .add_features(vec![Feature::new(
                Geometry::Polygon(square(2.0, 2.0, 2.0)),
                vec![
                    AttributeValue::Int(-1),
                    AttributeValue::String("a".to_string()),
                ],
            )])
            .unwrap();
        layer.commit_changes().unwrap();

        let mask = Geometry::Polygon(square(0.0, 0.0, 10.0));
        let result = split_by_polygon(
            &GeoEngine::new(),
            &layer,
            &mask,
            None,
            Some(&MarkDirective::new("affected", 1)),
        )
        .unwrap();

        // Schema unchanged, mark written over the old value
        assert_eq!(result.schema().len(), 2);
        assert_eq!(result.len(), 1);
        assert_eq!(result.features()[0].attributes[0], AttributeValue::Int(1));
        assert_eq!(
            result.features()[0].attributes[1],
            AttributeValue::String("a".to_string())
        );
    }

    #[test]
    fn test_mark_field_appended_to_empty_schema() {
        let mut layer = MemoryLayer::new(GeometryKind::Polygon, Crs::wgs84(), Schema::empty());
        layer.start_editing().unwrap();
        layer
            .add_features(vec![Feature::from_geometry(Geometry::Polygon(square(
                0.0, 0.0, 1.0,
            )))])
            .unwrap();
        layer.commit_changes().unwrap();

        let mask = Geometry::Polygon(square(5.0, 5.0, 1.0));
        let result = split_by_polygon(
            &GeoEngine::new(),
            &layer,
            &mask,
            None,
            Some(&MarkDirective::new("affected", 7)),
        )
        .unwrap();

        assert_eq!(result.schema().index_of("affected"), Some(0));
        assert_eq!(result.features()[0].attributes, vec![AttributeValue::Int(0)]);
    }
}
