//! Geometry conversion for intersection testing.
//!
//! The intersection predicate itself comes from `geo::Intersects`; this
//! module only bridges parsed GeoJSON geometries into `geo` types.

use geo_types::Geometry;
use geojson::Feature;

/// Convert a feature's GeoJSON geometry into a `geo` geometry.
///
/// Features without a geometry, or with one that cannot be represented,
/// yield None and never intersect anything.
pub fn feature_geometry(feature: &Feature) -> Option<Geometry<f64>> {
    let geometry = feature.geometry.as_ref()?;
    Geometry::<f64>::try_from(&geometry.value).ok()
}

/// Convert each feature's geometry once, keeping slot alignment with the
/// input list so downstream accumulators can key on the caller's feature
/// instance by index.
pub fn convert_features(features: &[Feature]) -> Vec<Option<Geometry<f64>>> {
    features.iter().map(feature_geometry).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Intersects;
    use geojson::{Geometry as GeoJsonGeometry, Value};

    fn feature_from(value: Value) -> Feature {
        Feature {
            bbox: None,
            geometry: Some(GeoJsonGeometry::new(value)),
            id: None,
            properties: None,
            foreign_members: None,
        }
    }

    fn square(min: f64, max: f64) -> Value {
        Value::Polygon(vec![vec![
            vec![min, min],
            vec![max, min],
            vec![max, max],
            vec![min, max],
            vec![min, min],
        ]])
    }

    #[test]
    fn test_point_in_polygon_intersects() {
        let point = feature_geometry(&feature_from(Value::Point(vec![10.0, 10.0]))).unwrap();
        let polygon = feature_geometry(&feature_from(square(5.0, 15.0))).unwrap();
        assert!(polygon.intersects(&point));
    }

    #[test]
    fn test_disjoint_geometries_do_not_intersect() {
        let point = feature_geometry(&feature_from(Value::Point(vec![100.0, 100.0]))).unwrap();
        let polygon = feature_geometry(&feature_from(square(5.0, 15.0))).unwrap();
        assert!(!polygon.intersects(&point));
    }

    #[test]
    fn test_feature_without_geometry() {
        let feature = Feature {
            bbox: None,
            geometry: None,
            id: None,
            properties: None,
            foreign_members: None,
        };
        assert!(feature_geometry(&feature).is_none());
    }

    #[test]
    fn test_convert_features_keeps_slot_alignment() {
        let features = vec![
            feature_from(Value::Point(vec![1.0, 1.0])),
            Feature {
                bbox: None,
                geometry: None,
                id: None,
                properties: None,
                foreign_members: None,
            },
            feature_from(Value::Point(vec![2.0, 2.0])),
        ];
        let converted = convert_features(&features);
        assert_eq!(converted.len(), 3);
        assert!(converted[0].is_some());
        assert!(converted[1].is_none());
        assert!(converted[2].is_some());
    }
}
