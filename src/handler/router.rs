//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: exact path lookup, method check,
//! and access logging.

use crate::config::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::rotation;
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let response = dispatch(&req, &state, rotation::now_unix());

    if state.config.logging.access_log {
        let entry = access_entry(&req, &response, peer_addr, started);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Resolve a request against the route table at the given Unix time
pub fn dispatch<B>(req: &Request<B>, state: &AppState, now: i64) -> Response<Full<Bytes>> {
    let Some(route) = state.routes.get(req.uri().path()) else {
        return http::build_404_response();
    };

    match *req.method() {
        Method::GET => route.respond(now, false),
        Method::HEAD => route.respond(now, true),
        _ => {
            tracing::debug!(method = %req.method(), path = req.uri().path(), "method not allowed");
            http::build_405_response()
        }
    }
}

fn access_entry<B>(
    req: &Request<B>,
    response: &Response<Full<Bytes>>,
    peer_addr: SocketAddr,
    started: Instant,
) -> AccessLogEntry {
    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = version_label(req.version()).to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = response
        .body()
        .size_hint()
        .exact()
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or_default();
    entry.referer = header_string(req, "referer");
    entry.user_agent = header_string(req, "user-agent");
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    entry
}

fn header_string<B>(req: &Request<B>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::routing::RouteTable;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    fn state(root: &TempDir) -> Arc<AppState> {
        let dir = root.path().join("banner");
        fs::create_dir(&dir).unwrap();
        for name in ["c.png", "a.png", "b.png"] {
            fs::write(dir.join(name), name).unwrap();
        }

        let vars: HashMap<String, String> = [
            ("EXTENSION", "png"),
            ("MIMETYPE", "image/png"),
            ("TTL", "10"),
            ("ALLOWED_NAMES", "banner"),
            ("ACCESS_LOG", "false"),
        ]
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .chain([(
            "ASSET_ROOT".to_string(),
            root.path().display().to_string(),
        )])
        .collect();

        let config = Config::load_from(
            "does-not-exist/rotator",
            config::Environment::default().source(Some(vars)),
        )
        .unwrap();
        let routes = RouteTable::load(&config.assets).unwrap();
        AppState::new(config, routes)
    }

    fn request(method: Method, path: &str) -> Request<()> {
        Request::builder().method(method).uri(path).body(()).unwrap()
    }

    #[test]
    fn test_get_serves_selected_asset() {
        let root = TempDir::new().unwrap();
        let state = state(&root);

        let resp = dispatch(&request(Method::GET, "/banner.png"), &state, 1005);
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["cache-control"], "public, max-age=5");

        let expected = state.routes.get("/banner.png").unwrap().assets().get(1);
        assert_eq!(expected.file_name, "b.png");
        assert_eq!(
            resp.headers()["content-length"],
            expected.payload.len().to_string().as_str()
        );
    }

    #[test]
    fn test_head_is_served() {
        let root = TempDir::new().unwrap();
        let state = state(&root);

        let resp = dispatch(&request(Method::HEAD, "/banner.png"), &state, 1010);
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["cache-control"], "public, max-age=10");
        assert_eq!(resp.body().size_hint().exact(), Some(0));
    }

    #[test]
    fn test_unknown_path() {
        let root = TempDir::new().unwrap();
        let state = state(&root);

        for path in ["/", "/banner", "/banner.jpg", "/banner.png/extra", "/other.png"] {
            let resp = dispatch(&request(Method::GET, path), &state, 1005);
            assert_eq!(resp.status(), 404, "{path}");
        }
    }

    #[test]
    fn test_other_methods_rejected() {
        let root = TempDir::new().unwrap();
        let state = state(&root);

        for method in [Method::POST, Method::PUT, Method::DELETE] {
            let resp = dispatch(&request(method, "/banner.png"), &state, 1005);
            assert_eq!(resp.status(), 405);
        }
    }

    #[test]
    fn test_query_string_ignored_for_lookup() {
        let root = TempDir::new().unwrap();
        let state = state(&root);

        let resp = dispatch(&request(Method::GET, "/banner.png?v=3"), &state, 1005);
        assert_eq!(resp.status(), 200);
    }

    #[test]
    fn test_version_label() {
        assert_eq!(version_label(Version::HTTP_10), "1.0");
        assert_eq!(version_label(Version::HTTP_11), "1.1");
        assert_eq!(version_label(Version::HTTP_2), "2");
    }
}
