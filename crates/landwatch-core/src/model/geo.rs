//! GeoJSON detection layer.

use super::{non_empty, opt_string_or_number};
use crate::model::imagery::UNKNOWN_OWNER;
use serde::{Deserialize, Serialize};

/// Properties shown in a feature popup.
///
/// Properties the popup does not read are kept as raw JSON, whatever their type.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FeatureProperties {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub owner: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub khasra: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub timestamp: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl FeatureProperties {
    pub fn owner_label(&self) -> &str {
        non_empty(self.owner.as_deref()).unwrap_or(UNKNOWN_OWNER)
    }

    pub fn khasra_label(&self) -> &str {
        non_empty(self.khasra.as_deref()).unwrap_or("-")
    }

    pub fn timestamp_label(&self) -> &str {
        non_empty(self.timestamp.as_deref()).unwrap_or("-")
    }
}

/// A GeoJSON feature. Geometry is passed through untouched to the map layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GeoFeature {
    #[serde(default)]
    pub geometry: serde_json::Value,
    #[serde(default)]
    pub properties: FeatureProperties,
}

/// `GET /api/detections.geojson`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FeatureCollection {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub features: Vec<GeoFeature>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_properties_fallbacks() {
        let collection: FeatureCollection = serde_json::from_str(
            r#"{"type": "FeatureCollection", "features": [
                {"type": "Feature", "geometry": {"type": "Point", "coordinates": [75.8, 22.7]},
                 "properties": {"owner": null, "khasra": null, "timestamp": "2025-01-01"}}
            ]}"#,
        )
        .unwrap();
        let props = &collection.features[0].properties;
        assert_eq!(props.owner_label(), "Unknown");
        assert_eq!(props.khasra_label(), "-");
        assert_eq!(props.timestamp_label(), "2025-01-01");
    }

    #[test]
    fn test_unread_properties_of_any_type_decode() {
        let collection: FeatureCollection = serde_json::from_str(
            r#"{"type": "FeatureCollection", "features": [
                {"geometry": null, "properties": {"owner": "A", "severity": "high", "ward": [1, 2]}},
                {"geometry": null, "properties": {"owner": "B", "severity": 0.8, "khasra": 783}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(collection.features.len(), 2);
        let first = &collection.features[0].properties;
        assert_eq!(first.owner_label(), "A");
        assert_eq!(first.extra["severity"], "high");
        assert_eq!(collection.features[1].properties.khasra_label(), "783");
    }
}
