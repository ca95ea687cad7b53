use async_trait::async_trait;
use tracing::warn;
use youtube_client::{Video, YouTubeClient, YouTubeError};

use crate::duration::parse_duration;
use crate::error::EnrichError;
use crate::types::VideoMetadata;

/// Channel pages are never fetched; their URL is synthesized from the id.
const CHANNEL_URL_BASE: &str = "https://www.youtube.com/channel/";

/// The catalog lookup seam. `Ok(None)` means the catalog has no record for
/// the id; `Err` is any transport or decode failure.
#[async_trait]
pub trait VideoCatalog: Send + Sync {
    async fn lookup(&self, video_id: &str) -> Result<Option<Video>, YouTubeError>;
}

#[async_trait]
impl VideoCatalog for YouTubeClient {
    async fn lookup(&self, video_id: &str) -> Result<Option<Video>, YouTubeError> {
        self.video(video_id).await
    }
}

/// Fetch metadata for one video id and shape it into the response record.
/// Lookup problems never escape as call failures: a missing video is
/// `NotFound`, anything transport-shaped is `FetchFailed`.
pub async fn fetch_video_metadata(
    catalog: &dyn VideoCatalog,
    video_id: &str,
) -> Result<VideoMetadata, EnrichError> {
    match catalog.lookup(video_id).await {
        Ok(Some(video)) => Ok(metadata_from_video(video_id, video)),
        Ok(None) => Err(EnrichError::NotFound),
        Err(e) => {
            warn!(video_id, error = %e, "Video metadata fetch failed");
            Err(EnrichError::FetchFailed)
        }
    }
}

/// Flatten a raw catalog item into the response record, substituting a named
/// fallback for every field the provider may omit. The channel URL is built
/// from the raw channel id (empty when absent), not from the fallback text.
fn metadata_from_video(video_id: &str, video: Video) -> VideoMetadata {
    let snippet = video.snippet.unwrap_or_default();
    let channel_id = snippet.channel_id;
    let channel_url = format!("{}{}", CHANNEL_URL_BASE, channel_id.as_deref().unwrap_or(""));

    VideoMetadata {
        video_id: video_id.to_string(),
        video_title: snippet
            .title
            .unwrap_or_else(|| "Title not found".to_string()),
        length_seconds: video
            .content_details
            .and_then(|cd| cd.duration)
            .and_then(|d| parse_duration(&d)),
        keywords: snippet.tags.unwrap_or_default(),
        thumbnail: snippet
            .thumbnails
            .and_then(|t| t.high)
            .and_then(|t| t.url)
            .unwrap_or_else(|| "Thumbnail not found".to_string()),
        view_count: video
            .statistics
            .and_then(|s| s.view_count)
            .unwrap_or_else(|| "View count not found".to_string()),
        category: snippet
            .category_id
            .unwrap_or_else(|| "Category not found".to_string()),
        upload_date: snippet
            .published_at
            .unwrap_or_else(|| "Upload date not found".to_string()),
        channel_id: channel_id.unwrap_or_else(|| "Channel ID not found".to_string()),
        channel_name: snippet
            .channel_title
            .unwrap_or_else(|| "Author not found".to_string()),
        channel_url,
        watch_date: None,
    }
}
