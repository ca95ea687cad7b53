use serde::{Deserialize, Serialize};

use crate::error::EnrichError;

/// One entry from a YouTube watch-history export (Google Takeout shape).
/// Only the watch URL and timestamp matter; every other Takeout field is
/// ignored. Ads and since-removed videos arrive without a `titleUrl`.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchEvent {
    #[serde(rename = "titleUrl")]
    pub title_url: Option<String>,
    pub time: Option<String>,
}

/// Enriched metadata for one watched video. Field names are the response
/// contract; `watch_date` is the source event's timestamp, carried through
/// untouched.
#[derive(Debug, Clone, Serialize)]
pub struct VideoMetadata {
    pub video_id: String,
    pub video_title: String,
    pub length_seconds: Option<u64>,
    pub keywords: Vec<String>,
    pub thumbnail: String,
    pub view_count: String,
    pub category: String,
    pub upload_date: String,
    pub channel_id: String,
    pub channel_name: String,
    pub channel_url: String,
    pub watch_date: Option<String>,
}

/// Emitted in place of metadata when one event could not be enriched.
/// Carries the video id when extraction succeeded, otherwise the raw URL.
#[derive(Debug, Clone, Serialize)]
pub struct FailedLookup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    pub error: EnrichError,
    pub watch_date: Option<String>,
}

/// One output row per usable watch event: enriched metadata or a failure
/// record, never both.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum EnrichedRecord {
    Video(VideoMetadata),
    Failed(FailedLookup),
}

impl EnrichedRecord {
    pub fn is_failed(&self) -> bool {
        matches!(self, EnrichedRecord::Failed(_))
    }
}
