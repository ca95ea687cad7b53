pub mod duration;
pub mod enrich;
pub mod error;
pub mod fetcher;
pub mod types;
pub mod video_id;

pub use duration::parse_duration;
pub use enrich::Enricher;
pub use error::{EnrichError, Result};
pub use fetcher::{fetch_video_metadata, VideoCatalog};
pub use types::{EnrichedRecord, FailedLookup, VideoMetadata, WatchEvent};
pub use video_id::extract_video_id;
