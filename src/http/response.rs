//! HTTP response building module
//!
//! Provides builders for the handful of responses the server emits.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::HeaderValue;
use hyper::Response;

use super::cache::CachePolicy;

/// Build 200 response carrying a gzip payload verbatim
///
/// `Content-Length` always reflects the payload, also for HEAD where the body is dropped.
pub fn build_asset_response(
    payload: Bytes,
    content_type: &HeaderValue,
    max_age: u64,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = payload.len();
    let body = if is_head { Bytes::new() } else { payload };

    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Encoding", "gzip")
        .header("Content-Length", content_length)
        .header("Cache-Control", CachePolicy::Public(max_age).to_header_value())
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .header("Cache-Control", CachePolicy::NoStore.to_header_value())
        .body(Full::new(Bytes::from("404 Not Found")))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from("404 Not Found")))
        })
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Allow", "GET, HEAD")
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    tracing::error!(%error, "failed to build {status} response");
}
