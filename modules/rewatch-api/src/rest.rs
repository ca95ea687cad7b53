use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tracing::warn;

use rewatch_core::{EnrichError, WatchEvent};

use crate::AppState;

#[derive(Deserialize)]
pub struct WatchHistoryRequest {
    watch_history: Vec<WatchEvent>,
}

/// Enrich a watch-history export. One record per usable event comes back
/// under `data`, in completion order.
pub async fn scrape_watch_history(
    State(state): State<Arc<AppState>>,
    Json(body): Json<WatchHistoryRequest>,
) -> impl IntoResponse {
    match state.enricher.enrich(&body.watch_history).await {
        Ok(records) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": "Scraping complete",
                "data": records,
            })),
        )
            .into_response(),
        Err(err @ EnrichError::EmptyBatch) => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"detail": err.to_string()})),
        )
            .into_response(),
        Err(err) => {
            // per-event failures come back as records, so this is unreachable
            // short of a bug in the enricher
            warn!(error = %err, "Enrichment failed unexpectedly");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use rewatch_core::{Enricher, VideoCatalog};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use youtube_client::{ContentDetails, Snippet, Video, YouTubeError};

    use super::*;
    use crate::router;

    /// Catalog that knows exactly one video.
    struct SingleVideoCatalog;

    #[async_trait]
    impl VideoCatalog for SingleVideoCatalog {
        async fn lookup(&self, video_id: &str) -> Result<Option<Video>, YouTubeError> {
            if video_id != "abc123" {
                return Ok(None);
            }
            Ok(Some(Video {
                id: Some(video_id.to_string()),
                snippet: Some(Snippet {
                    title: Some("Test Video".to_string()),
                    ..Default::default()
                }),
                content_details: Some(ContentDetails {
                    duration: Some("PT2M".to_string()),
                }),
                statistics: None,
            }))
        }
    }

    fn test_app() -> axum::Router {
        let state = Arc::new(AppState {
            enricher: Enricher::new(Arc::new(SingleVideoCatalog)),
        });
        router(state)
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_check_responds() {
        let response = test_app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn empty_history_is_a_client_error() {
        let request = Request::builder()
            .method("POST")
            .uri("/scrape-watch-history/")
            .header("content-type", "application/json")
            .body(Body::from(json!({"watch_history": []}).to_string()))
            .unwrap();

        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["detail"], "No watch history provided");
    }

    #[tokio::test]
    async fn enriches_history_and_reports_completion() {
        let payload = json!({
            "watch_history": [
                {"titleUrl": "https://www.youtube.com/watch?v=abc123", "time": "2024-01-01T00:00:00Z"},
                {"title": "Watched a removed video", "time": "2024-01-02T00:00:00Z"}
            ]
        });
        let request = Request::builder()
            .method("POST")
            .uri("/scrape-watch-history/")
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap();

        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Scraping complete");

        // the url-less event is skipped, the other enriched
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["video_id"], "abc123");
        assert_eq!(data[0]["video_title"], "Test Video");
        assert_eq!(data[0]["length_seconds"], 120);
        assert_eq!(data[0]["watch_date"], "2024-01-01T00:00:00Z");
    }

    #[tokio::test]
    async fn unknown_videos_come_back_as_error_records() {
        let payload = json!({
            "watch_history": [
                {"titleUrl": "https://www.youtube.com/watch?v=gone404", "time": "2024-01-01T00:00:00Z"}
            ]
        });
        let request = Request::builder()
            .method("POST")
            .uri("/scrape-watch-history/")
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap();

        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["error"], "Video not found");
        assert_eq!(data[0]["video_id"], "gone404");
        assert_eq!(data[0]["watch_date"], "2024-01-01T00:00:00Z");
    }

    #[tokio::test]
    async fn accepts_a_whole_takeout_export_in_one_request() {
        let events: Vec<Value> = (0..25_000)
            .map(|i| {
                json!({
                    "header": "YouTube",
                    "title": format!("Watched video number {i}"),
                    "titleUrl": "https://www.youtube.com/watch?v=abc123",
                    "time": "2024-01-01T00:00:00Z"
                })
            })
            .collect();
        let payload = json!({"watch_history": events}).to_string();
        // must clear the extractor's default size cap by a wide margin
        assert!(payload.len() > 2 * 1024 * 1024);

        let request = Request::builder()
            .method("POST")
            .uri("/scrape-watch-history/")
            .header("content-type", "application/json")
            .body(Body::from(payload))
            .unwrap();

        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 25_000);
    }

    #[tokio::test]
    async fn malformed_bodies_never_reach_the_handler() {
        // bad JSON syntax
        let request = Request::builder()
            .method("POST")
            .uri("/scrape-watch-history/")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // well-formed JSON of the wrong shape
        let request = Request::builder()
            .method("POST")
            .uri("/scrape-watch-history/")
            .header("content-type", "application/json")
            .body(Body::from(
                json!({"watch_history": "not a list"}).to_string(),
            ))
            .unwrap();
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
