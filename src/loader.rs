//! Reference feature loading from GeoJSON files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use geojson::{Feature, FeatureCollection, GeoJson};

/// Load a GeoJSON file into its list of features.
///
/// Accepts a FeatureCollection, a single Feature, or a bare Geometry
/// (wrapped into one feature with no properties). The file handle is
/// scoped to this call.
pub fn load_feature_collection<P: AsRef<Path>>(path: P) -> Result<Vec<Feature>> {
    let path = path.as_ref();
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let geojson: GeoJson = content
        .parse()
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    let features = match geojson {
        GeoJson::FeatureCollection(FeatureCollection { features, .. }) => features,
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(geometry) => vec![Feature {
            bbox: None,
            geometry: Some(geometry),
            id: None,
            properties: None,
            foreign_members: None,
        }],
    };

    Ok(features)
}

/// Render a feature property as a trimmed tag candidate.
///
/// String, number, and bool values become tags; null, arrays, objects, and
/// values that are blank after trimming do not.
pub fn property_string(feature: &Feature, name: &str) -> Option<String> {
    let value = feature.properties.as_ref()?.get(name)?;
    let text = match value {
        serde_json::Value::String(s) => s.trim().to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geojson::{Geometry, JsonObject, Value};
    use serde_json::json;

    fn feature_with_properties(properties: JsonObject) -> Feature {
        Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Point(vec![0.0, 0.0]))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }

    #[test]
    fn test_property_string_trims_and_renders() {
        let mut properties = JsonObject::new();
        properties.insert("name".to_string(), json!("  Maple Park  "));
        properties.insert("acres".to_string(), json!(128));
        properties.insert("open".to_string(), json!(true));
        properties.insert("none".to_string(), json!(null));
        properties.insert("list".to_string(), json!(["a", "b"]));
        properties.insert("blank".to_string(), json!("   "));
        let feature = feature_with_properties(properties);

        assert_eq!(
            property_string(&feature, "name").as_deref(),
            Some("Maple Park")
        );
        assert_eq!(property_string(&feature, "acres").as_deref(), Some("128"));
        assert_eq!(property_string(&feature, "open").as_deref(), Some("true"));
        assert_eq!(property_string(&feature, "none"), None);
        assert_eq!(property_string(&feature, "list"), None);
        assert_eq!(property_string(&feature, "blank"), None);
        assert_eq!(property_string(&feature, "missing"), None);
    }

    #[test]
    fn test_property_string_without_properties() {
        let feature = Feature {
            bbox: None,
            geometry: None,
            id: None,
            properties: None,
            foreign_members: None,
        };
        assert_eq!(property_string(&feature, "name"), None);
    }

    #[test]
    fn test_load_feature_collection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("collection.geojson");
        fs::write(
            &path,
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","geometry":{"type":"Point","coordinates":[1.0,2.0]},"properties":{"name":"A"}},
                {"type":"Feature","geometry":null,"properties":{"name":"B"}}
            ]}"#,
        )
        .unwrap();

        let features = load_feature_collection(&path).unwrap();
        assert_eq!(features.len(), 2);
        assert!(features[1].geometry.is_none());
    }

    #[test]
    fn test_load_bare_geometry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("point.geojson");
        fs::write(&path, r#"{"type":"Point","coordinates":[1.0,2.0]}"#).unwrap();

        let features = load_feature_collection(&path).unwrap();
        assert_eq!(features.len(), 1);
        assert!(features[0].geometry.is_some());
        assert!(features[0].properties.is_none());
    }

    #[test]
    fn test_load_missing_or_malformed_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_feature_collection(dir.path().join("nope.geojson")).is_err());

        let path = dir.path().join("bad.geojson");
        fs::write(&path, "not geojson at all").unwrap();
        assert!(load_feature_collection(&path).is_err());
    }
}
