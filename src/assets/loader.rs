//! Asset directory loader
//!
//! Collects the files of one directory that carry the configured extension,
//! orders them by file name and compresses each of them once.

use hyper::body::Bytes;
use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;

use super::compress::gzip_best;
use crate::error::LoadError;

/// A single gzip-compressed asset
#[derive(Debug, Clone)]
pub struct Asset {
    /// File name the payload was read from, lossily decoded for display
    pub file_name: String,
    /// Uncompressed size in bytes
    pub original_len: usize,
    /// Gzip payload, served verbatim
    pub payload: Bytes,
}

/// Immutable, non-empty, ordered list of compressed assets for one name
#[derive(Debug, Clone)]
pub struct AssetSet {
    name: String,
    assets: Vec<Asset>,
}

impl AssetSet {
    /// Returns `None` for an empty list.
    pub fn new(name: impl Into<String>, assets: Vec<Asset>) -> Option<Self> {
        if assets.is_empty() {
            return None;
        }
        Some(Self {
            name: name.into(),
            assets,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn count(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.assets.len()).unwrap_or(NonZeroUsize::MIN)
    }

    /// Asset at `index`, which is reduced modulo the set length.
    pub fn get(&self, index: usize) -> &Asset {
        &self.assets[index % self.assets.len()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Asset> {
        self.assets.iter()
    }

    /// Total size of all compressed payloads
    pub fn compressed_bytes(&self) -> usize {
        self.assets.iter().map(|a| a.payload.len()).sum()
    }
}

/// Load every `*.<extension>` file in `dir`, sorted by file name, gzip-compressed.
///
/// Fails on an unreadable directory or file, and when nothing matches.
pub fn load_asset_set(dir: &Path, name: &str, extension: &str) -> Result<AssetSet, LoadError> {
    let suffix = format!(".{extension}");

    let entries = fs::read_dir(dir).map_err(|source| LoadError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut file_names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| LoadError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;
        // Raw bytes, so names that are not valid UTF-8 still match
        let file_name = entry.file_name();
        if file_name.as_encoded_bytes().ends_with(suffix.as_bytes()) {
            file_names.push(file_name);
        }
    }

    // Rotation order is the byte order of the file names.
    file_names.sort_unstable_by(|a, b| a.as_encoded_bytes().cmp(b.as_encoded_bytes()));

    let mut assets = Vec::with_capacity(file_names.len());
    for file_name in file_names {
        let path = dir.join(&file_name);
        let content = fs::read(&path).map_err(|source| LoadError::ReadFile {
            path: path.clone(),
            source,
        })?;
        let payload = gzip_best(&content).map_err(|source| LoadError::Compress {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(
            file = %path.display(),
            original = content.len(),
            compressed = payload.len(),
            "asset compressed"
        );

        assets.push(Asset {
            file_name: file_name.to_string_lossy().into_owned(),
            original_len: content.len(),
            payload: Bytes::from(payload),
        });
    }

    AssetSet::new(name, assets).ok_or_else(|| LoadError::NoMatch {
        dir: dir.to_path_buf(),
        extension: extension.to_string(),
    })
}
