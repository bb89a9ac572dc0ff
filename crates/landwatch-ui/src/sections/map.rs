//! Detection map layer.

use super::SectionContext;
use crate::page::MapOverlay;
use crate::templates::feature_popup;

pub const MAP: &str = "map";

pub struct MapSection {
    cx: SectionContext,
}

impl MapSection {
    pub fn bind(cx: &SectionContext) -> Option<Self> {
        cx.guard(MAP).map(|cx| Self { cx })
    }

    pub async fn load(&self) {
        let collection = match self.cx.client.detections_geojson().await {
            Ok(collection) => collection,
            Err(e) => {
                self.cx.failed("load detections map", &e);
                return;
            }
        };

        let overlays: Vec<MapOverlay> = collection
            .features
            .iter()
            .map(|feature| MapOverlay {
                geometry: feature.geometry.clone(),
                popup: feature_popup(&feature.properties),
            })
            .collect();
        tracing::debug!(features = overlays.len(), "Map layer loaded");
        self.cx.page.show_map_overlays(MAP, &overlays);
    }
}
