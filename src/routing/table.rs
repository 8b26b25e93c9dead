//! Route table
//!
//! One exact-match entry per configured name, built once at startup.

use std::collections::HashMap;

use crate::assets::load_asset_set;
use crate::config::AssetConfig;
use crate::error::StartupError;
use crate::handler::RotatingAsset;

/// Path to rotating asset lookup, immutable after construction
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: HashMap<String, RotatingAsset>,
}

impl RouteTable {
    /// Load the assets for every configured name and register them.
    ///
    /// The first name that fails to load aborts the whole table.
    pub fn load(config: &AssetConfig) -> Result<Self, StartupError> {
        let mut table = Self::default();
        for name in &config.names {
            let dir = config.source_dir(name);
            let assets = load_asset_set(&dir, name, &config.extension).map_err(|source| {
                StartupError::Load {
                    name: name.clone(),
                    source,
                }
            })?;

            let path = config.route_path(name);
            tracing::info!(
                route = %path,
                dir = %dir.display(),
                assets = assets.count().get(),
                compressed_bytes = assets.compressed_bytes(),
                "route registered"
            );
            table.insert(
                path,
                RotatingAsset::new(assets, config.mime_type.clone(), config.ttl),
            );
        }
        Ok(table)
    }

    fn insert(&mut self, path: String, asset: RotatingAsset) {
        self.routes.insert(path, asset);
    }

    pub fn get(&self, path: &str) -> Option<&RotatingAsset> {
        self.routes.get(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadError;
    use crate::rotation::Ttl;
    use hyper::header::HeaderValue;
    use std::fs;
    use tempfile::TempDir;

    fn asset_config(root: &TempDir, names: &[&str]) -> AssetConfig {
        AssetConfig {
            extension: "png".to_string(),
            mime_type: HeaderValue::from_static("image/png"),
            ttl: Ttl::new(10).unwrap(),
            names: names.iter().map(ToString::to_string).collect(),
            root: root.path().to_path_buf(),
        }
    }

    #[test]
    fn test_load_registers_each_name() {
        let root = TempDir::new().unwrap();
        for name in ["banner", "logo"] {
            fs::create_dir(root.path().join(name)).unwrap();
            fs::write(root.path().join(name).join("1.png"), name).unwrap();
        }

        let table = RouteTable::load(&asset_config(&root, &["banner", "logo"])).unwrap();
        assert_eq!(table.routes.len(), 2);
        assert_eq!(table.get("/logo.png").unwrap().assets().name(), "logo");
        assert!(table.get("/banner.png").is_some());
        assert!(table.get("/banner").is_none());
    }

    #[test]
    fn test_one_bad_name_fails_everything() {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("banner")).unwrap();
        fs::write(root.path().join("banner").join("1.png"), "x").unwrap();
        fs::create_dir(root.path().join("empty")).unwrap();

        let err = RouteTable::load(&asset_config(&root, &["banner", "empty"])).unwrap_err();
        assert!(matches!(
            err,
            StartupError::Load { ref name, source: LoadError::NoMatch { .. } } if name == "empty"
        ));
    }
}
