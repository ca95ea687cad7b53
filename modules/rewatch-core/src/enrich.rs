use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use crate::error::EnrichError;
use crate::fetcher::{fetch_video_metadata, VideoCatalog};
use crate::types::{EnrichedRecord, FailedLookup, WatchEvent};
use crate::video_id::extract_video_id;

/// Upper bound on catalog lookups in flight at any moment.
const MAX_CONCURRENT_LOOKUPS: usize = 10;

/// One dispatchable lookup: the extracted id plus the correlation data that
/// ties the finished fetch back to its watch event.
struct LookupJob {
    video_id: String,
    watch_date: Option<String>,
}

/// Drives batch enrichment: URL triage, bounded concurrent lookups, and
/// reassembly of results with their watch timestamps.
pub struct Enricher {
    catalog: Arc<dyn VideoCatalog>,
}

impl Enricher {
    pub fn new(catalog: Arc<dyn VideoCatalog>) -> Self {
        Self { catalog }
    }

    /// Enrich a watch-history batch.
    ///
    /// Every event with a URL yields exactly one record, metadata or
    /// failure, in completion order. Events without a `titleUrl` are
    /// skipped. An empty batch is the one call-level error; nothing is
    /// fetched in that case.
    pub async fn enrich(
        &self,
        history: &[WatchEvent],
    ) -> Result<Vec<EnrichedRecord>, EnrichError> {
        if history.is_empty() {
            return Err(EnrichError::EmptyBatch);
        }

        let mut records = Vec::new();
        let mut jobs = Vec::new();

        for event in history {
            let Some(url) = event.title_url.as_deref() else {
                continue;
            };
            match extract_video_id(url) {
                Ok(video_id) => jobs.push(LookupJob {
                    video_id,
                    watch_date: event.time.clone(),
                }),
                Err(error) => {
                    warn!(url, "Watch event URL has no video id");
                    records.push(EnrichedRecord::Failed(FailedLookup {
                        video_id: None,
                        video_url: Some(url.to_string()),
                        error,
                        watch_date: event.time.clone(),
                    }));
                }
            }
        }

        info!(
            events = history.len(),
            lookups = jobs.len(),
            "Dispatching catalog lookups"
        );

        let fetched: Vec<EnrichedRecord> = stream::iter(jobs.into_iter().map(|job| {
            let catalog = self.catalog.clone();
            async move {
                match fetch_video_metadata(catalog.as_ref(), &job.video_id).await {
                    Ok(mut metadata) => {
                        metadata.watch_date = job.watch_date;
                        EnrichedRecord::Video(metadata)
                    }
                    Err(error) => EnrichedRecord::Failed(FailedLookup {
                        video_id: Some(job.video_id),
                        video_url: None,
                        error,
                        watch_date: job.watch_date,
                    }),
                }
            }
        }))
        .buffer_unordered(MAX_CONCURRENT_LOOKUPS)
        .collect()
        .await;

        records.extend(fetched);

        let failed = records.iter().filter(|r| r.is_failed()).count();
        info!(total = records.len(), failed, "Batch enrichment complete");

        Ok(records)
    }
}
