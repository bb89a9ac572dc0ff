//! Imagery thumbnails, manual fetch and change detection payloads.

use super::{non_empty, opt_number, opt_string_or_number};
use serde::{Deserialize, Serialize};

/// Placeholder for an unknown owner.
pub const UNKNOWN_OWNER: &str = "Unknown";

/// Tags marking the two scenes compared by change detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageTag {
    ManualOld,
    ManualNew,
}

impl ImageTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageTag::ManualOld => "manual_old",
            ImageTag::ManualNew => "manual_new",
        }
    }
}

/// One entry of `GET /api/images`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageItem {
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub display_image: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl ImageItem {
    pub fn has_tag(&self, tag: ImageTag) -> bool {
        self.tag.as_deref() == Some(tag.as_str())
    }

    /// Base64 PNG payload, preferring `display_image`.
    pub fn base64_png(&self) -> Option<&str> {
        non_empty(self.display_image.as_deref()).or_else(|| non_empty(self.image.as_deref()))
    }

    /// `data:` URI usable as an image source.
    pub fn data_uri(&self) -> Option<String> {
        self.base64_png()
            .map(|b64| format!("data:image/png;base64,{b64}"))
    }
}

/// First item carrying `tag`.
pub fn find_tagged(items: &[ImageItem], tag: ImageTag) -> Option<&ImageItem> {
    items.iter().find(|item| item.has_tag(tag))
}

/// `POST /api/fetch/manual`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ManualFetchRequest {
    pub start_date: String,
    pub end_date: String,
}

/// Parcel ownership attached to a detection, as returned by the land-record lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OwnerInfo {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub owner_name: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub owner: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub khasra_no: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub property_id: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub address: Option<String>,
}

impl OwnerInfo {
    pub fn display_name(&self) -> &str {
        non_empty(self.owner_name.as_deref())
            .or_else(|| non_empty(self.owner.as_deref()))
            .unwrap_or(UNKNOWN_OWNER)
    }
}

/// A detected change. Only the owner is read; the rest stays raw JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Anomaly {
    #[serde(default)]
    pub owner: OwnerInfo,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Result of `GET /api/detect`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DetectionResult {
    #[serde(default)]
    pub ok: Option<bool>,
    #[serde(default)]
    pub detected: bool,
    #[serde(default)]
    pub mask_path: Option<String>,
    #[serde(default)]
    pub anomalies: Vec<Anomaly>,
    #[serde(default)]
    pub error: Option<String>,
}

impl DetectionResult {
    /// Owner of the first anomaly.
    pub fn owner_name(&self) -> &str {
        self.anomalies
            .first()
            .map(|a| a.owner.display_name())
            .unwrap_or(UNKNOWN_OWNER)
    }

    /// User-facing summary of the detection.
    pub fn summary(&self) -> String {
        if !self.detected {
            return "No illegal construction detected.".to_string();
        }
        format!(
            "Illegal construction detected!\nOwner: {}\nMask: {}",
            self.owner_name(),
            non_empty(self.mask_path.as_deref()).unwrap_or("-"),
        )
    }
}

/// One ward of `GET /api/detect/hotspots`, with a risk score in `0..=1`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Hotspot {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub ward: Option<String>,
    #[serde(default, deserialize_with = "opt_number")]
    pub risk: Option<f64>,
}

impl Hotspot {
    /// Risk as a whole percentage, `-` when unknown.
    pub fn risk_label(&self) -> String {
        match self.risk {
            Some(risk) => format!("{:.0}%", risk * 100.0),
            None => "-".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HotspotsEnvelope {
    #[serde(default)]
    pub ok: Option<bool>,
    #[serde(default)]
    pub hotspots: Vec<Hotspot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_tagged_and_data_uri() {
        let items: Vec<ImageItem> = serde_json::from_str(
            r#"[
                {"tag": "manual_old", "image": "AAA"},
                {"tag": "manual_new", "image": "BBB", "display_image": "CCC"}
            ]"#,
        )
        .unwrap();

        let old = find_tagged(&items, ImageTag::ManualOld).unwrap();
        assert_eq!(old.data_uri().as_deref(), Some("data:image/png;base64,AAA"));
        let new = find_tagged(&items, ImageTag::ManualNew).unwrap();
        assert_eq!(new.data_uri().as_deref(), Some("data:image/png;base64,CCC"));
    }

    #[test]
    fn test_item_without_payload_has_no_uri() {
        let item = ImageItem {
            tag: Some("manual_old".to_string()),
            ..Default::default()
        };
        assert!(item.data_uri().is_none());
    }

    #[test]
    fn test_detection_summary() {
        let result: DetectionResult = serde_json::from_str(
            r#"{"detected": true, "mask_path": "masks/m1.png",
                "anomalies": [{"owner": {"owner_name": "Demo Owner", "khasra_no": "123/45"}}]}"#,
        )
        .unwrap();
        assert_eq!(
            result.summary(),
            "Illegal construction detected!\nOwner: Demo Owner\nMask: masks/m1.png"
        );
    }

    #[test]
    fn test_numeric_land_record_fields_decode() {
        let result: DetectionResult = serde_json::from_str(
            r#"{"detected": true, "mask_path": "masks/m2.png",
                "anomalies": [{"type": "new_structure", "severity": "high", "area_m2": "120",
                               "owner": {"owner_name": "Demo Owner", "khasra_no": 783, "property_id": 4401}}]}"#,
        )
        .unwrap();
        let owner = &result.anomalies[0].owner;
        assert_eq!(owner.khasra_no.as_deref(), Some("783"));
        assert_eq!(owner.property_id.as_deref(), Some("4401"));
        assert_eq!(
            result.summary(),
            "Illegal construction detected!\nOwner: Demo Owner\nMask: masks/m2.png"
        );
    }

    #[test]
    fn test_detection_summary_none_found() {
        let result: DetectionResult =
            serde_json::from_str(r#"{"detected": false, "anomalies": []}"#).unwrap();
        assert_eq!(result.summary(), "No illegal construction detected.");
    }

    #[test]
    fn test_detection_without_owner() {
        let result = DetectionResult {
            detected: true,
            ..Default::default()
        };
        assert_eq!(result.summary(), "Illegal construction detected!\nOwner: Unknown\nMask: -");
    }

    #[test]
    fn test_hotspots_decode_and_label() {
        let envelope: HotspotsEnvelope = serde_json::from_str(
            r#"{"ok": true, "hotspots": [{"ward": 12, "risk": 0.83}, {"ward": "3", "risk": "0.5"}, {"ward": 7}]}"#,
        )
        .unwrap();
        let labels: Vec<(Option<&str>, String)> = envelope
            .hotspots
            .iter()
            .map(|h| (h.ward.as_deref(), h.risk_label()))
            .collect();
        assert_eq!(
            labels,
            vec![
                (Some("12"), "83%".to_string()),
                (Some("3"), "50%".to_string()),
                (Some("7"), "-".to_string()),
            ]
        );
    }
}
