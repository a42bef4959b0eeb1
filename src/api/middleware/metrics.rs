use crate::api::middleware::request_id::REQUEST_ID_HEADER;
use axum::{
    body::HttpBody,
    extract::Request,
    http::{HeaderMap, header::CONTENT_LENGTH},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::info;

fn content_length(headers: &HeaderMap) -> u64 {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

/// One `metrics` line per call: upload size in, relay answer size out
pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let path = req.uri().path().to_string();
    let request_id = req
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();
    let bytes_in = content_length(req.headers());

    let response = next.run(req).await;

    info!(
        target: "metrics",
        path = %path,
        request_id = %request_id,
        status = response.status().as_u16(),
        bytes_in,
        bytes_out = response.body().size_hint().exact().unwrap_or(0),
        latency_ms = start.elapsed().as_millis() as u64,
        "relay_request_completed"
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_content_length_parses_header() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_LENGTH, HeaderValue::from_static("1024"));
        assert_eq!(content_length(&headers), 1024);
    }

    #[test]
    fn test_content_length_defaults_to_zero() {
        let mut headers = HeaderMap::new();
        assert_eq!(content_length(&headers), 0);
        headers.insert(CONTENT_LENGTH, HeaderValue::from_static("lots"));
        assert_eq!(content_length(&headers), 0);
    }
}
