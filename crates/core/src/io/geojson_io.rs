//! GeoJSON reading and writing for [`MemoryLayer`]
//!
//! The schema is derived from feature properties; the layer kind is inferred
//! from the first geometry and all features must match it. Per RFC 7946 the
//! CRS of GeoJSON data is WGS84.

use crate::error::{Error, Result};
use crate::geometry::GeometryKind;
use crate::vector::{AttributeValue, Feature, Field, FieldType, MemoryLayer, Schema};
use crate::Crs;
use geojson::{FeatureCollection, GeoJson};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Read a GeoJSON FeatureCollection file into a layer
pub fn read_geojson(path: impl AsRef<Path>) -> Result<MemoryLayer> {
    let raw = fs::read_to_string(path)?;
    layer_from_geojson_str(&raw)
}

/// Write a layer to a GeoJSON FeatureCollection file
pub fn write_geojson(layer: &MemoryLayer, path: impl AsRef<Path>) -> Result<()> {
    let raw = layer_to_geojson_string(layer)?;
    fs::write(path, raw)?;
    Ok(())
}

/// Parse a GeoJSON FeatureCollection string into a layer
pub fn layer_from_geojson_str(raw: &str) -> Result<MemoryLayer> {
    let gj: GeoJson = raw
        .parse()
        .map_err(|e: geojson::Error| Error::GeoJson(e.to_string()))?;
    let GeoJson::FeatureCollection(fc) = gj else {
        return Err(Error::GeoJson("expected a FeatureCollection".to_string()));
    };

    let schema = infer_schema(&fc);

    let mut kind: Option<GeometryKind> = None;
    let mut features = Vec::with_capacity(fc.features.len());
    for gj_feature in fc.features {
        let geometry = gj_feature
            .geometry
            .ok_or_else(|| Error::GeoJson("feature without geometry".to_string()))?;
        let geometry = geo_types::Geometry::<f64>::try_from(geometry.value)
            .map_err(|e| Error::GeoJson(e.to_string()))?;

        let actual = GeometryKind::of(&geometry)
            .ok_or_else(|| Error::GeoJson("unsupported geometry type".to_string()))?;
        match kind {
            None => kind = Some(actual),
            Some(expected) if expected == actual => {}
            Some(expected) => return Err(Error::GeometryKindMismatch { expected, actual }),
        }

        let attributes = schema
            .fields()
            .iter()
            .map(|field| {
                gj_feature
                    .properties
                    .as_ref()
                    .and_then(|props| props.get(field.name()))
                    .map(json_to_attribute)
                    .unwrap_or(AttributeValue::Null)
            })
            .collect();
        features.push(Feature::new(geometry, attributes));
    }

    let kind = kind.ok_or_else(|| Error::GeoJson("empty feature collection".to_string()))?;
    let mut layer = MemoryLayer::new(kind, Crs::wgs84(), schema);
    layer.start_editing()?;
    layer.add_features(features)?;
    layer.commit_changes()?;
    layer.update_extents();
    Ok(layer)
}

/// Serialize a layer to a GeoJSON FeatureCollection string
pub fn layer_to_geojson_string(layer: &MemoryLayer) -> Result<String> {
    let features = layer
        .features()
        .iter()
        .map(|feature| {
            let mut properties = Map::new();
            for (field, value) in layer.schema().fields().iter().zip(&feature.attributes) {
                properties.insert(field.name().to_string(), attribute_to_json(value));
            }
            geojson::Feature {
                bbox: None,
                geometry: Some(geojson::Geometry::new(geojson::Value::from(
                    &feature.geometry,
                ))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    let fc = FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    };
    Ok(GeoJson::FeatureCollection(fc).to_string())
}

/// Union of property keys across features, types from the first non-null value
fn infer_schema(fc: &FeatureCollection) -> Schema {
    let mut names: Vec<String> = Vec::new();
    let mut types: Vec<Option<FieldType>> = Vec::new();

    for feature in &fc.features {
        let Some(props) = &feature.properties else {
            continue;
        };
        for (name, value) in props {
            let index = match names.iter().position(|n| n == name) {
                Some(i) => i,
                None => {
                    names.push(name.clone());
                    types.push(None);
                    names.len() - 1
                }
            };
            if types[index].is_none() {
                types[index] = infer_field_type(value);
            }
        }
    }

    Schema::new(
        names
            .into_iter()
            .zip(types)
            .map(|(name, ty)| Field::new(name, ty.unwrap_or(FieldType::String)))
            .collect(),
    )
}

fn infer_field_type(value: &Value) -> Option<FieldType> {
    match value {
        Value::Null => None,
        Value::Bool(_) => Some(FieldType::Bool),
        Value::Number(n) if n.is_i64() || n.is_u64() => Some(FieldType::Int),
        Value::Number(_) => Some(FieldType::Float),
        _ => Some(FieldType::String),
    }
}

fn json_to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null,
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => AttributeValue::Int(i),
            None => AttributeValue::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => AttributeValue::String(s.clone()),
        other => AttributeValue::String(other.to_string()),
    }
}

fn attribute_to_json(value: &AttributeValue) -> Value {
    match value {
        AttributeValue::Null => Value::Null,
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::Int(i) => Value::from(*i),
        AttributeValue::Float(x) => Value::from(*x),
        AttributeValue::String(s) => Value::String(s.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POINTS: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [106.8, -6.2] },
                "properties": { "name": "Jakarta", "population": 10562088 }
            },
            {
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [110.4, -7.0] },
                "properties": { "name": "Semarang", "population": 1653524 }
            }
        ]
    }"#;

    #[test]
    fn test_read_points() {
        let layer = layer_from_geojson_str(POINTS).unwrap();

        assert_eq!(layer.kind(), GeometryKind::Point);
        assert_eq!(layer.len(), 2);
        assert_eq!(layer.schema().len(), 2);
        assert!(layer.schema().contains("population"));

        let idx = layer.schema().index_of("name").unwrap();
        assert_eq!(
            layer.features()[0].attributes[idx],
            AttributeValue::String("Jakarta".to_string())
        );
        assert!(layer.extent().is_some());
    }

    #[test]
    fn test_roundtrip_preserves_features() {
        let layer = layer_from_geojson_str(POINTS).unwrap();
        let raw = layer_to_geojson_string(&layer).unwrap();
        let back = layer_from_geojson_str(&raw).unwrap();

        assert_eq!(back.len(), layer.len());
        assert_eq!(back.schema(), layer.schema());
        assert_eq!(back.features()[1], layer.features()[1]);
    }

    #[test]
    fn test_mixed_kinds_rejected() {
        let mixed = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": { "type": "Point", "coordinates": [0.0, 0.0] },
                    "properties": {}
                },
                {
                    "type": "Feature",
                    "geometry": { "type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]] },
                    "properties": {}
                }
            ]
        }"#;
        assert!(matches!(
            layer_from_geojson_str(mixed),
            Err(Error::GeometryKindMismatch { .. })
        ));
    }

    #[test]
    fn test_empty_collection_rejected() {
        let empty = r#"{ "type": "FeatureCollection", "features": [] }"#;
        assert!(matches!(
            layer_from_geojson_str(empty),
            Err(Error::GeoJson(_))
        ));
    }

    #[test]
    fn test_missing_property_reads_as_null() {
        let sparse = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": { "type": "Point", "coordinates": [0.0, 0.0] },
                    "properties": { "name": "a" }
                },
                {
                    "type": "Feature",
                    "geometry": { "type": "Point", "coordinates": [1.0, 1.0] },
                    "properties": { "flag": true }
                }
            ]
        }"#;
        let layer = layer_from_geojson_str(sparse).unwrap();
        assert_eq!(layer.schema().len(), 2);

        let flag_idx = layer.schema().index_of("flag").unwrap();
        assert_eq!(layer.features()[0].attributes[flag_idx], AttributeValue::Null);
        assert_eq!(
            layer.features()[1].attributes[flag_idx],
            AttributeValue::Bool(true)
        );
    }
}
