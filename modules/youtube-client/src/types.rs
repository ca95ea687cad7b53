use serde::Deserialize;

/// Envelope for a `videos.list` response. Paging fields are ignored since
/// lookups here are always single-id.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<Video>,
}

/// One video resource carrying the three parts this client requests.
/// Every part is optional on the wire, so every field is too.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Video {
    pub id: Option<String>,
    pub snippet: Option<Snippet>,
    #[serde(rename = "contentDetails")]
    pub content_details: Option<ContentDetails>,
    pub statistics: Option<Statistics>,
}

/// The `snippet` part: upload metadata and channel attribution.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Snippet {
    pub title: Option<String>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
    #[serde(rename = "channelId")]
    pub channel_id: Option<String>,
    #[serde(rename = "channelTitle")]
    pub channel_title: Option<String>,
    #[serde(rename = "categoryId")]
    pub category_id: Option<String>,
    pub tags: Option<Vec<String>>,
    pub thumbnails: Option<Thumbnails>,
}

/// Thumbnail variants keyed by size tier. A tier is absent when YouTube has
/// not generated that size for the video.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Thumbnails {
    pub default: Option<Thumbnail>,
    pub medium: Option<Thumbnail>,
    pub high: Option<Thumbnail>,
    pub standard: Option<Thumbnail>,
    pub maxres: Option<Thumbnail>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Thumbnail {
    pub url: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// The `contentDetails` part. `duration` is an ISO 8601 designator string
/// such as "PT1H2M30S".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentDetails {
    pub duration: Option<String>,
}

/// The `statistics` part. Counts arrive as decimal strings on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Statistics {
    #[serde(rename = "viewCount")]
    pub view_count: Option<String>,
    #[serde(rename = "likeCount")]
    pub like_count: Option<String>,
}
