use serde::{Serialize, Serializer};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EnrichError>;

/// Failure vocabulary for watch-history enrichment.
///
/// The first three variants describe a single event and end up inside
/// failure records; `EmptyBatch` is the only failure that aborts a whole
/// call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EnrichError {
    #[error("Invalid YouTube URL")]
    InvalidUrl,

    #[error("Video not found")]
    NotFound,

    #[error("Failed to fetch video metadata")]
    FetchFailed,

    #[error("No watch history provided")]
    EmptyBatch,
}

/// Failure records serialize the error as its display string, which is the
/// message consumers of the response already match on.
impl Serialize for EnrichError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
