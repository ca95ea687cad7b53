use crate::error::EnrichError;

/// Extract the video identifier from a watch-page URL.
///
/// Marker matching, not URL parsing: the identifier is whatever follows the
/// first `v=`, up to the next `&` or end of string. An empty value
/// (`...watch?v=`) still extracts; the catalog lookup then reports it as
/// not found. Only a missing marker fails.
pub fn extract_video_id(url: &str) -> Result<String, EnrichError> {
    let (_, after) = url.split_once("v=").ok_or(EnrichError::InvalidUrl)?;
    let id = after.split_once('&').map_or(after, |(id, _)| id);
    Ok(id.to_string())
}
