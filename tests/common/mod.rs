#![allow(dead_code)]

use http_body_util::{BodyExt, Empty};
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use hyper_util::rt::TokioIo;
use rotator::config::{AppState, Config};
use rotator::routing::RouteTable;
use rotator::server::{self, SignalHandler};
use std::collections::HashMap;
use std::fs;
use std::net::SocketAddr;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::net::TcpStream;
use tokio::task::JoinHandle;

/// Asset tree on disk: name -> [(file name, content)]
pub fn asset_root(tree: &[(&str, &[(&str, &[u8])])]) -> TempDir {
    let root = TempDir::new().unwrap();
    for (name, files) in tree {
        let dir = root.path().join(name);
        fs::create_dir_all(&dir).unwrap();
        for (file, content) in *files {
            fs::write(dir.join(file), content).unwrap();
        }
    }
    root
}

pub fn test_config(root: &TempDir, vars: &[(&str, &str)]) -> Config {
    let mut map: HashMap<String, String> = [
        ("EXTENSION", "png"),
        ("MIMETYPE", "image/png"),
        ("TTL", "3600"),
        ("HOST", "127.0.0.1"),
        ("PORT", "0"),
        ("ACCESS_LOG", "false"),
    ]
    .iter()
    .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
    .collect();
    map.insert("ASSET_ROOT".to_string(), root.path().display().to_string());
    for (k, v) in vars {
        map.insert((*k).to_string(), (*v).to_string());
    }

    Config::load_from(
        "does-not-exist/rotator",
        config::Environment::default().source(Some(map)),
    )
    .unwrap()
}

pub struct TestServer {
    pub addr: SocketAddr,
    pub signals: Arc<SignalHandler>,
    pub handle: JoinHandle<std::io::Result<()>>,
}

pub async fn start(cfg: Config) -> TestServer {
    let routes = RouteTable::load(&cfg.assets).unwrap();
    let listener = server::create_reusable_listener(cfg.server.addr).unwrap();
    let addr = listener.local_addr().unwrap();
    let signals = SignalHandler::new();
    let handle = tokio::spawn(server::run(listener, AppState::new(cfg, routes), signals.clone()));
    TestServer {
        addr,
        signals,
        handle,
    }
}

pub struct Client {
    sender: hyper::client::conn::http1::SendRequest<Empty<Bytes>>,
}

impl Client {
    pub async fn connect(addr: SocketAddr) -> Self {
        let stream = TcpStream::connect(addr).await.unwrap();
        let (sender, conn) = hyper::client::conn::http1::handshake(TokioIo::new(stream))
            .await
            .unwrap();
        tokio::spawn(conn);
        Self { sender }
    }

    pub async fn send(&mut self, method: Method, path: &str) -> (Response<()>, Bytes) {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("host", "localhost")
            .body(Empty::new())
            .unwrap();
        let resp = self.sender.send_request(req).await.unwrap();
        let (parts, body) = resp.into_parts();
        let body = body.collect().await.unwrap().to_bytes();
        (Response::from_parts(parts, ()), body)
    }
}

pub fn gunzip(data: &[u8]) -> Vec<u8> {
    use std::io::Read;
    let mut out = Vec::new();
    flate2::read::GzDecoder::new(data)
        .read_to_end(&mut out)
        .unwrap();
    out
}
