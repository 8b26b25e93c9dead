//! Rotating asset serving
//!
//! A `RotatingAsset` is the immutable value owned by one route: the compressed
//! asset set plus the headers it is announced with.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::HeaderValue;
use hyper::Response;

use crate::assets::{Asset, AssetSet};
use crate::http;
use crate::rotation::{self, Rotation, Ttl};

/// Asset set bound to its MIME type and rotation period
#[derive(Debug, Clone)]
pub struct RotatingAsset {
    assets: AssetSet,
    mime_type: HeaderValue,
    ttl: Ttl,
}

impl RotatingAsset {
    pub const fn new(assets: AssetSet, mime_type: HeaderValue, ttl: Ttl) -> Self {
        Self {
            assets,
            mime_type,
            ttl,
        }
    }

    pub const fn assets(&self) -> &AssetSet {
        &self.assets
    }

    /// Asset selected at `now` together with the rotation it came from
    pub fn select(&self, now: i64) -> (&Asset, Rotation) {
        let rotation = rotation::select(now, self.ttl, self.assets.count());
        (self.assets.get(rotation.index), rotation)
    }

    /// Build the response for a request arriving at `now`
    pub fn respond(&self, now: i64, is_head: bool) -> Response<Full<Bytes>> {
        let (asset, rotation) = self.select(now);
        tracing::trace!(
            name = self.assets.name(),
            file = %asset.file_name,
            bucket = rotation.bucket,
            max_age = rotation.max_age,
            "serving asset"
        );
        http::build_asset_response(
            asset.payload.clone(),
            &self.mime_type,
            rotation.max_age,
            is_head,
        )
    }
}
