#![deny(missing_docs)]

//! # API Snapshot
//!
//! Immutable bundle of everything one build pass reads: the action catalog,
//! the route table, the settings and the package descriptor. The compiler
//! receives it by reference and never reaches for global state.

use crate::catalog::{ActionCatalog, PackageMetadata, RouteTable};
use crate::error::{AppError, AppResult};
use crate::settings::{parse_by_extension, Settings};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// On-disk layout of a catalog file.
///
/// ```yaml
/// actions:
///   widgetShow:
///     "1": { inputs: { id: { required: true } } }
/// router:
///   verbs: [get, post]
///   routes:
///     get: [{ path: /widgets/:id, action: widgetShow }]
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogFile {
    /// Action registry.
    #[serde(default)]
    pub actions: ActionCatalog,
    /// Supported verbs and explicit route tables.
    #[serde(default)]
    pub router: RouteTable,
}

/// Read-only input of a build pass.
#[derive(Debug, Clone, Default)]
pub struct ApiSnapshot {
    /// Action registry.
    pub catalog: ActionCatalog,
    /// Route table.
    pub routes: RouteTable,
    /// Host configuration.
    pub settings: Settings,
    /// Package descriptor.
    pub package: PackageMetadata,
}

impl ApiSnapshot {
    /// Creates a snapshot from already materialized parts.
    pub fn new(
        catalog: ActionCatalog,
        routes: RouteTable,
        settings: Settings,
        package: PackageMetadata,
    ) -> Self {
        Self {
            catalog,
            routes,
            settings,
            package,
        }
    }

    /// Loads a snapshot from disk. Settings and package files are optional;
    /// defaults apply when they are omitted.
    pub fn load(
        catalog_path: &Path,
        settings_path: Option<&Path>,
        package_path: Option<&Path>,
    ) -> AppResult<Self> {
        let catalog_file: CatalogFile = read_file(catalog_path)?;
        let settings = match settings_path {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        let package = match package_path {
            Some(path) => read_file(path)?,
            None => PackageMetadata::default(),
        };

        tracing::debug!(
            catalog = %catalog_path.display(),
            actions = catalog_file.actions.iter().count(),
            "Loaded API snapshot"
        );

        Ok(Self::new(
            catalog_file.actions,
            catalog_file.router,
            settings,
            package,
        ))
    }
}

fn read_file<T>(path: &Path) -> AppResult<T>
where
    T: serde::de::DeserializeOwned,
{
    if !path.exists() {
        return Err(AppError::General(format!("File not found: {:?}", path)));
    }
    let raw = fs::read_to_string(path)?;
    parse_by_extension(path, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_yaml_catalog_and_json_package() {
        let dir = tempdir().unwrap();
        let catalog_path = dir.path().join("catalog.yaml");
        let package_path = dir.path().join("package.json");

        fs::write(
            &catalog_path,
            r#"
actions:
  widgetShow:
    "1":
      inputs:
        id: { required: true }
router:
  verbs: [get]
  routes:
    get:
      - { path: "/widgets/:id", action: widgetShow }
"#,
        )
        .unwrap();
        fs::write(&package_path, r#"{ "name": "widgets", "version": "2.0.0" }"#).unwrap();

        let snapshot = ApiSnapshot::load(&catalog_path, None, Some(&package_path)).unwrap();
        let action = snapshot.catalog.versions("widgetShow").next().unwrap();
        assert_eq!(action.name, "widgetShow");
        assert_eq!(snapshot.routes.verbs(), &["get".to_string()]);
        assert_eq!(snapshot.package.version, "2.0.0");
        assert!(snapshot.settings.servers.web.simple_routing);
    }

    #[test]
    fn test_missing_catalog() {
        let dir = tempdir().unwrap();
        let err = ApiSnapshot::load(&dir.path().join("nope.yaml"), None, None).unwrap_err();
        assert!(format!("{}", err).contains("File not found"));
    }
}
