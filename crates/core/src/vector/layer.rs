//! In-memory vector layer
//!
//! A [`MemoryLayer`] is an ordered collection of features sharing one
//! geometry kind and one CRS. Schema extension and feature appends go
//! through an edit session: changes are staged, invisible to readers, and
//! applied atomically on commit. A rejected append or a rollback leaves the
//! committed state untouched.

use crate::error::{Error, Result};
use crate::geometry::GeometryKind;
use crate::vector::{AttributeValue, BoundingBox, Feature, Field, Schema};
use crate::Crs;

/// Predicate used to restrict feature iteration
pub type FeatureFilter = dyn Fn(&Feature) -> bool;

/// Staged changes of an open edit session
#[derive(Debug, Clone, Default)]
struct EditSession {
    fields: Vec<Field>,
    features: Vec<Feature>,
}

/// A homogeneous, ordered, in-memory feature collection
#[derive(Debug, Clone)]
pub struct MemoryLayer {
    kind: GeometryKind,
    crs: Crs,
    schema: Schema,
    features: Vec<Feature>,
    extent: Option<BoundingBox>,
    session: Option<EditSession>,
}

impl MemoryLayer {
    /// Create an empty layer
    pub fn new(kind: GeometryKind, crs: Crs, schema: Schema) -> Self {
        Self {
            kind,
            crs,
            schema,
            features: Vec::new(),
            extent: None,
            session: None,
        }
    }

    /// Geometry kind shared by all features
    pub fn kind(&self) -> GeometryKind {
        self.kind
    }

    pub fn crs(&self) -> &Crs {
        &self.crs
    }

    /// Committed schema (staged fields are not visible until commit)
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Committed features
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Cached extent; `None` until `update_extents` runs on a non-empty layer
    pub fn extent(&self) -> Option<BoundingBox> {
        self.extent
    }

    pub fn is_editing(&self) -> bool {
        self.session.is_some()
    }

    /// Iterate committed features, optionally restricted by a predicate
    pub fn features_filtered<'a>(
        &'a self,
        filter: Option<&'a FeatureFilter>,
    ) -> impl Iterator<Item = &'a Feature> + 'a {
        self.features.iter().filter(move |f| match filter {
            Some(predicate) => predicate(f),
            None => true,
        })
    }

    // Edit session

    /// Open an edit session. Fails if one is already open.
    pub fn start_editing(&mut self) -> Result<()> {
        if self.session.is_some() {
            return Err(Error::EditSession("edit session already open"));
        }
        self.session = Some(EditSession::default());
        Ok(())
    }

    /// Stage a schema field append.
    ///
    /// Existing committed features are padded with `Null` for the new field
    /// at commit time, so arity stays consistent.
    pub fn add_field(&mut self, field: Field) -> Result<()> {
        let schema = &self.schema;
        let session = self
            .session
            .as_mut()
            .ok_or(Error::EditSession("add_field requires an open edit session"))?;

        let duplicate = schema.contains(field.name())
            || session.fields.iter().any(|f| f.name() == field.name());
        if duplicate {
            return Err(Error::DuplicateField(field.name().to_string()));
        }

        session.fields.push(field);
        Ok(())
    }

    /// Stage a bulk feature append.
    ///
    /// Every feature must match the layer's geometry kind and the staged
    /// schema arity; a failing feature rejects the whole call and stages
    /// nothing.
    pub fn add_features(&mut self, features: Vec<Feature>) -> Result<()> {
        let kind = self.kind;
        let arity = self.schema.len()
            + self
                .session
                .as_ref()
                .map(|s| s.fields.len())
                .unwrap_or_default();
        let session = self.session.as_mut().ok_or(Error::EditSession(
            "add_features requires an open edit session",
        ))?;

        for feature in &features {
            match GeometryKind::of(&feature.geometry) {
                Some(actual) if actual == kind => {}
                Some(actual) => {
                    return Err(Error::GeometryKindMismatch {
                        expected: kind,
                        actual,
                    })
                }
                None => {
                    return Err(Error::Other(
                        "geometry collections cannot be stored in a layer".to_string(),
                    ))
                }
            }
            if feature.attributes.len() != arity {
                return Err(Error::AttributeArity {
                    expected: arity,
                    actual: feature.attributes.len(),
                });
            }
        }

        session.features.extend(features);
        Ok(())
    }

    /// Apply all staged changes at once
    pub fn commit_changes(&mut self) -> Result<()> {
        let session = self
            .session
            .take()
            .ok_or(Error::EditSession("no edit session to commit"))?;

        for field in session.fields {
            self.schema.push(field);
            for feature in &mut self.features {
                feature.attributes.push(AttributeValue::Null);
            }
        }
        self.features.extend(session.features);
        Ok(())
    }

    /// Discard all staged changes
    pub fn rollback(&mut self) -> Result<()> {
        self.session
            .take()
            .map(|_| ())
            .ok_or(Error::EditSession("no edit session to roll back"))
    }

    /// Recompute the cached extent from committed features
    pub fn update_extents(&mut self) {
        self.extent = self
            .features
            .iter()
            .filter_map(|f| BoundingBox::of_geometry(&f.geometry))
            .reduce(|acc, bb| acc.merged(&bb));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::FieldType;
    use geo_types::{point, Geometry, LineString};

    fn point_layer() -> MemoryLayer {
        MemoryLayer::new(
            GeometryKind::Point,
            Crs::wgs84(),
            Schema::new(vec![Field::new("name", FieldType::String)]),
        )
    }

    fn named_point(x: f64, y: f64, name: &str) -> Feature {
        Feature::new(
            Geometry::Point(point! { x: x, y: y }),
            vec![AttributeValue::String(name.to_string())],
        )
    }

    #[test]
    fn test_append_requires_session() {
        let mut layer = point_layer();
        let err = layer.add_features(vec![named_point(0.0, 0.0, "a")]);
        assert!(matches!(err, Err(Error::EditSession(_))));
    }

    #[test]
    fn test_staged_features_invisible_until_commit() {
        let mut layer = point_layer();
        layer.start_editing().unwrap();
        layer.add_features(vec![named_point(1.0, 2.0, "a")]).unwrap();

        assert!(layer.is_empty());

        layer.commit_changes().unwrap();
        assert_eq!(layer.len(), 1);
    }

    #[test]
    fn test_rollback_restores_prior_state() {
        let mut layer = point_layer();
        layer.start_editing().unwrap();
        layer.add_features(vec![named_point(1.0, 2.0, "a")]).unwrap();
        layer.add_field(Field::new("flag", FieldType::Int)).unwrap();
        layer.rollback().unwrap();

        assert!(layer.is_empty());
        assert_eq!(layer.schema().len(), 1);
        assert!(!layer.is_editing());
    }

    #[test]
    fn test_nested_sessions_rejected() {
        let mut layer = point_layer();
        layer.start_editing().unwrap();
        assert!(matches!(
            layer.start_editing(),
            Err(Error::EditSession(_))
        ));
    }

    #[test]
    fn test_kind_mismatch_rejected() {
        let mut layer = point_layer();
        layer.start_editing().unwrap();

        let line = Feature::new(
            Geometry::LineString(LineString::from(vec![(0.0, 0.0), (1.0, 1.0)])),
            vec![AttributeValue::Null],
        );
        let err = layer.add_features(vec![line]);
        assert!(matches!(err, Err(Error::GeometryKindMismatch { .. })));

        // Nothing staged from the rejected call
        layer.commit_changes().unwrap();
        assert!(layer.is_empty());
    }

    #[test]
    fn test_arity_mismatch_rejected() {
        let mut layer = point_layer();
        layer.start_editing().unwrap();

        let bare = Feature::from_geometry(Geometry::Point(point! { x: 0.0, y: 0.0 }));
        assert!(matches!(
            layer.add_features(vec![bare]),
            Err(Error::AttributeArity {
                expected: 1,
                actual: 0
            })
        ));
    }

    #[test]
    fn test_add_field_pads_existing_features() {
        let mut layer = point_layer();
        layer.start_editing().unwrap();
        layer.add_features(vec![named_point(0.0, 0.0, "a")]).unwrap();
        layer.commit_changes().unwrap();

        layer.start_editing().unwrap();
        layer.add_field(Field::new("affected", FieldType::Int)).unwrap();
        // New features must already carry the staged arity
        let padded = Feature::new(
            Geometry::Point(point! { x: 1.0, y: 1.0 }),
            vec![
                AttributeValue::String("b".to_string()),
                AttributeValue::Int(1),
            ],
        );
        layer.add_features(vec![padded]).unwrap();
        layer.commit_changes().unwrap();

        assert_eq!(layer.schema().len(), 2);
        assert_eq!(layer.features()[0].attributes.len(), 2);
        assert_eq!(layer.features()[0].attributes[1], AttributeValue::Null);
        assert_eq!(layer.features()[1].attributes[1], AttributeValue::Int(1));
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let mut layer = point_layer();
        layer.start_editing().unwrap();
        let err = layer.add_field(Field::new("name", FieldType::String));
        assert!(matches!(err, Err(Error::DuplicateField(_))));
    }

    #[test]
    fn test_filtered_iteration() {
        let mut layer = point_layer();
        layer.start_editing().unwrap();
        layer
            .add_features(vec![
                named_point(0.0, 0.0, "keep"),
                named_point(1.0, 1.0, "drop"),
                named_point(2.0, 2.0, "keep"),
            ])
            .unwrap();
        layer.commit_changes().unwrap();

        let keep = |f: &Feature| f.attributes[0] == AttributeValue::String("keep".to_string());
        assert_eq!(layer.features_filtered(Some(&keep)).count(), 2);
        assert_eq!(layer.features_filtered(None).count(), 3);
    }

    #[test]
    fn test_update_extents() {
        let mut layer = point_layer();
        assert!(layer.extent().is_none());

        layer.start_editing().unwrap();
        layer
            .add_features(vec![named_point(-3.0, 2.0, "a"), named_point(7.0, -1.0, "b")])
            .unwrap();
        layer.commit_changes().unwrap();
        layer.update_extents();

        let extent = layer.extent().unwrap();
        assert_eq!(extent.min_x, -3.0);
        assert_eq!(extent.max_x, 7.0);
        assert_eq!(extent.min_y, -1.0);
        assert_eq!(extent.max_y, 2.0);
    }
}
