#![deny(missing_docs)]

//! # Settings
//!
//! Static host configuration consumed by the compiler. Every field has a
//! default so partial files (or none at all) are accepted.

use crate::error::{AppError, AppResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Root of the configuration tree.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Process-wide settings.
    #[serde(default)]
    pub general: GeneralSettings,
    /// Transport servers.
    #[serde(default)]
    pub servers: ServersSettings,
    /// Document generation.
    #[serde(default)]
    pub oas: OasSettings,
}

/// `general` section.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralSettings {
    /// Display name of the server; preferred over the package name as title.
    pub server_name: Option<String>,
    /// API version; preferred over the package version.
    pub api_version: Option<String>,
    /// Well-known directories.
    #[serde(default)]
    pub paths: GeneralPaths,
}

/// `general.paths` section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct GeneralPaths {
    /// Publicly served directories. The first one receives the document.
    #[serde(default)]
    pub public: Vec<String>,
}

/// `servers` section.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ServersSettings {
    /// HTTP server.
    #[serde(default)]
    pub web: WebSettings,
}

/// `servers.web` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebSettings {
    /// Whether the server terminates TLS.
    #[serde(default)]
    pub secure: bool,
    /// Externally reachable address of the server.
    #[serde(default = "WebSettings::default_host")]
    pub host: String,
    /// Listening port.
    #[serde(default = "WebSettings::default_port")]
    pub port: u16,
    /// Base path under which actions are served.
    pub url_path_for_actions: Option<String>,
    /// `/{actionName}` routing for every action.
    #[serde(default = "default_true")]
    pub simple_routing: bool,
    /// `/?action=name` routing.
    #[serde(default = "default_true")]
    pub query_routing: bool,
}

impl Default for WebSettings {
    fn default() -> Self {
        Self {
            secure: false,
            host: Self::default_host(),
            port: Self::default_port(),
            url_path_for_actions: None,
            simple_routing: true,
            query_routing: true,
        }
    }
}

impl WebSettings {
    fn default_host() -> String {
        "127.0.0.1".to_string()
    }

    fn default_port() -> u16 {
        8080
    }
}

fn default_true() -> bool {
    true
}

/// Metadata attached to a named tag.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagInfo {
    /// Tag description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// External Documentation Object, passed through verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<Value>,
}

/// `oas` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OasSettings {
    /// Directory, relative to the first public directory, receiving the document.
    #[serde(default = "OasSettings::default_document_path")]
    pub open_api_document_path: Option<String>,
    /// File name of the document, without extension. `null` disables writing.
    #[serde(default = "OasSettings::default_document_name")]
    pub open_api_document_name: Option<String>,
    /// `host:port` used in the synthesized server URL.
    pub base_url: Option<String>,
    /// Route paths never documented.
    #[serde(default)]
    pub ignore_routes: Vec<String>,
    /// Tag every operation with its action version.
    #[serde(default)]
    pub group_by_version_tag: bool,
    /// Replaces `servers.web.host` in the synthesized server URL.
    pub host_override: Option<String>,
    /// Replaces `servers.web.port` in the synthesized server URL.
    pub port_override: Option<u16>,
    /// Top-level External Documentation Object.
    pub api_documentation: Option<Value>,
    /// Tag metadata keyed by tag name (version tags included).
    #[serde(default)]
    pub tags_info: IndexMap<String, TagInfo>,
    /// Explicit Server Objects. Rejected unless every entry has a `url`.
    pub servers: Option<Vec<Value>>,
    /// Security requirement override.
    pub security: Option<Vec<Map<String, Value>>>,
}

impl Default for OasSettings {
    fn default() -> Self {
        Self {
            open_api_document_path: Self::default_document_path(),
            open_api_document_name: Self::default_document_name(),
            base_url: None,
            ignore_routes: Vec::new(),
            group_by_version_tag: false,
            host_override: None,
            port_override: None,
            api_documentation: None,
            tags_info: IndexMap::new(),
            servers: None,
            security: None,
        }
    }
}

impl OasSettings {
    fn default_document_path() -> Option<String> {
        Some("/".to_string())
    }

    fn default_document_name() -> Option<String> {
        Some("openapi".to_string())
    }
}

impl Settings {
    /// Loads settings from a YAML or JSON file (chosen by extension).
    pub fn load(path: &Path) -> AppResult<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            AppError::General(format!("Failed to read settings {:?}: {}", path, e))
        })?;
        parse_by_extension(path, &raw)
    }
}

/// Parses `raw` as JSON when `path` ends in `.json`, as YAML otherwise.
pub fn parse_by_extension<T>(path: &Path, raw: &str) -> AppResult<T>
where
    T: serde::de::DeserializeOwned,
{
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        Ok(serde_json::from_str(raw)?)
    } else {
        Ok(serde_yaml::from_str(raw)?)
    }
}

/// Returns the trimmed value unless it is blank.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.servers.web.simple_routing);
        assert!(settings.servers.web.query_routing);
        assert_eq!(settings.servers.web.port, 8080);
        assert_eq!(settings.oas.open_api_document_name.as_deref(), Some("openapi"));
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = r#"
general:
  serverName: widgets
  paths:
    public: [public]
servers:
  web:
    port: 9000
    simpleRouting: false
oas:
  groupByVersionTag: true
  ignoreRoutes: ["/status"]
  tagsInfo:
    "1":
      description: Version 1 of the API
"#;
        let settings: Settings =
            parse_by_extension(&PathBuf::from("config.yaml"), yaml).unwrap();
        assert_eq!(settings.general.server_name.as_deref(), Some("widgets"));
        assert_eq!(settings.servers.web.port, 9000);
        assert!(!settings.servers.web.simple_routing);
        assert!(settings.servers.web.query_routing);
        assert!(settings.oas.group_by_version_tag);
        assert_eq!(
            settings.oas.tags_info["1"].description.as_deref(),
            Some("Version 1 of the API")
        );
    }

    #[test]
    fn test_json_by_extension() {
        let settings: Settings = parse_by_extension(
            &PathBuf::from("config.JSON"),
            r#"{ "oas": { "portOverride": 443 } }"#,
        )
        .unwrap();
        assert_eq!(settings.oas.port_override, Some(443));
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  ")), None);
        assert_eq!(non_blank(Some(" api ")), Some("api"));
        assert_eq!(non_blank(None), None);
    }
}
