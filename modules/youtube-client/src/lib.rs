pub mod error;
pub mod types;

pub use error::{Result, YouTubeError};
pub use types::{
    ContentDetails, Snippet, Statistics, Thumbnail, Thumbnails, Video, VideoListResponse,
};

use std::time::Duration;

const BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Response parts requested on every video lookup.
const VIDEO_PARTS: &str = "snippet,contentDetails,statistics";

/// Per-request bound. A lookup that outlives this surfaces as a network error.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct YouTubeClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl YouTubeClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, BASE_URL)
    }

    /// Point the client at a non-default API root (tests use this to target
    /// a local mock server).
    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Fetch snippet, content details, and statistics for a single video.
    /// Returns `Ok(None)` when the API has no resource for the id.
    pub async fn video(&self, video_id: &str) -> Result<Option<Video>> {
        tracing::debug!(video_id, "Fetching video metadata");

        let url = format!("{}/videos", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("part", VIDEO_PARTS),
                ("id", video_id),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(YouTubeError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = resp.text().await?;
        let listing: VideoListResponse = serde_json::from_str(&body)?;
        Ok(listing.items.into_iter().next())
    }
}
