//! Dashboard: image thumbnails, manual fetch, detection trigger and the
//! public counters.

use super::SectionContext;
use crate::templates::{HOTSPOT_COLUMNS, error_row, hotspot_row, rows};
use landwatch_core::model::{ImageTag, find_tagged};

pub const OLD_IMAGE: &str = "oldImage";
pub const NEW_IMAGE: &str = "newImage";

pub const MANUAL_FETCH_FORM: &str = "manualFetchForm";
pub const START_DATE: &str = "startDate";
pub const END_DATE: &str = "endDate";

pub const RUN_DETECTION: &str = "runDetectionBtn";

pub const HOTSPOTS_TABLE: &str = "hotspotsTableBody";

pub const TOTAL_DETECTIONS: &str = "totalDetections";
pub const PENDING_ALERTS: &str = "pendingAlerts";
pub const RESOLVED_CASES: &str = "resolvedCases";

pub const FETCH_OK: &str = "Images fetched successfully.";

/// Two thumbnails: the older and the newer manually fetched image.
#[derive(Clone)]
pub struct ThumbnailsSection {
    cx: SectionContext,
}

impl ThumbnailsSection {
    pub fn bind(cx: &SectionContext) -> Option<Self> {
        cx.guard(OLD_IMAGE)
            .or_else(|| cx.guard(NEW_IMAGE))
            .map(|cx| Self { cx })
    }

    pub async fn load(&self) {
        let items = match self.cx.client.images().await {
            Ok(items) => items,
            Err(e) => {
                self.cx.failed("load thumbnails", &e);
                return;
            }
        };

        for (tag, id) in [(ImageTag::ManualOld, OLD_IMAGE), (ImageTag::ManualNew, NEW_IMAGE)] {
            match find_tagged(&items, tag).and_then(|item| item.data_uri()) {
                Some(src) => self.cx.page.set_image_src(id, &src),
                None => tracing::debug!(tag = tag.as_str(), "No image for tag"),
            }
        }
    }
}

pub struct ManualFetchSection {
    cx: SectionContext,
    thumbnails: ThumbnailsSection,
}

impl ManualFetchSection {
    pub fn bind(cx: &SectionContext) -> Option<Self> {
        cx.guard(MANUAL_FETCH_FORM).map(|cx| Self {
            thumbnails: ThumbnailsSection { cx: cx.clone() },
            cx,
        })
    }

    pub async fn submit(&self) {
        let start = self.cx.page.field(START_DATE);
        let end = self.cx.page.field(END_DATE);
        match self.cx.client.manual_fetch(&start, &end).await {
            Ok(_) => {
                self.thumbnails.load().await;
                self.cx.page.alert(FETCH_OK);
            }
            Err(e) => {
                self.cx.failed("manual fetch", &e);
                self.cx
                    .page
                    .alert(&format!("Error fetching images: {}", e.user_message()));
            }
        }
    }
}

pub struct DetectionSection {
    cx: SectionContext,
}

impl DetectionSection {
    pub fn bind(cx: &SectionContext) -> Option<Self> {
        cx.guard(RUN_DETECTION).map(|cx| Self { cx })
    }

    pub async fn run(&self) {
        match self.cx.client.detect().await {
            Ok(result) => {
                tracing::info!(detected = result.detected, anomalies = result.anomalies.len(), "Detection finished");
                self.cx.page.alert(&result.summary());
            }
            Err(e) => {
                self.cx.failed("run detection", &e);
                self.cx
                    .page
                    .alert(&format!("Detection failed: {}", e.user_message()));
            }
        }
    }
}

/// Wards ranked by encroachment risk.
pub struct HotspotsSection {
    cx: SectionContext,
}

impl HotspotsSection {
    pub fn bind(cx: &SectionContext) -> Option<Self> {
        cx.guard(HOTSPOTS_TABLE).map(|cx| Self { cx })
    }

    pub async fn load(&self) {
        let html = match self.cx.client.hotspots().await {
            Ok(hotspots) => rows(&hotspots, hotspot_row),
            Err(e) => {
                self.cx.failed("load hotspots", &e);
                error_row(
                    HOTSPOT_COLUMNS,
                    &format!("Failed to load hotspots: {}", e.user_message()),
                )
            }
        };
        self.cx.page.set_html(HOTSPOTS_TABLE, &html);
    }
}

pub struct PublicStatsSection {
    cx: SectionContext,
}

impl PublicStatsSection {
    pub fn bind(cx: &SectionContext) -> Option<Self> {
        cx.guard(TOTAL_DETECTIONS).map(|cx| Self { cx })
    }

    pub async fn load(&self) {
        match self.cx.client.dashboard_stats().await {
            Ok(stats) => {
                let page = &self.cx.page;
                page.set_text(TOTAL_DETECTIONS, &stats.total_detections.to_string());
                page.set_text(PENDING_ALERTS, &stats.pending_alerts.to_string());
                page.set_text(RESOLVED_CASES, &stats.resolved_cases.to_string());
            }
            Err(e) => self.cx.failed("load dashboard stats", &e),
        }
    }
}
