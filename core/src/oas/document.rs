#![deny(missing_docs)]

//! # Document Assembler
//!
//! Orchestrates one build pass over an [`ApiSnapshot`]: info, servers,
//! security, paths, tags, external docs and the accumulated components.

use crate::catalog::Person;
use crate::oas::components::ComponentRegistry;
use crate::oas::operation::OperationContext;
use crate::oas::paths::PathEnumerator;
use crate::settings::{non_blank, OasSettings, Settings, TagInfo};
use crate::snapshot::ApiSnapshot;
use serde_json::{json, Map, Value};

/// OpenAPI version emitted at the document root.
pub const OPENAPI_VERSION: &str = "3.0.1";

/// Base path used in the synthesized server URL when none is configured.
pub const DEFAULT_BASE_PATH: &str = "api";

/// Metadata for the Info Object.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OpenApiInfo {
    /// The title of the API.
    pub title: String,
    /// The version of the API.
    pub version: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional contact, omitted when every field is empty.
    pub contact: Option<Person>,
    /// Optional license name.
    pub license: Option<String>,
}

impl OpenApiInfo {
    /// Creates info with the required fields.
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            version: version.into(),
            ..Self::default()
        }
    }

    /// Derives info from the server settings, falling back to the package.
    pub fn from_snapshot(snapshot: &ApiSnapshot) -> Self {
        let general = &snapshot.settings.general;
        let package = &snapshot.package;

        let title = non_blank(general.server_name.as_deref()).unwrap_or(&package.name);
        let version = non_blank(general.api_version.as_deref()).unwrap_or(&package.version);

        Self {
            title: title.to_string(),
            version: version.to_string(),
            description: package.description.clone(),
            contact: package
                .author
                .as_ref()
                .map(|author| author.person())
                .filter(|person| !person.is_empty()),
            license: package.license.clone(),
        }
    }

    /// The Info Object.
    pub fn to_value(&self) -> Value {
        let mut info = Map::new();
        info.insert("title".to_string(), json!(self.title));
        if let Some(description) = &self.description {
            info.insert("description".to_string(), json!(description));
        }
        if let Some(contact) = &self.contact {
            let mut contact_obj = Map::new();
            if let Some(name) = &contact.name {
                contact_obj.insert("name".to_string(), json!(name));
            }
            if let Some(email) = &contact.email {
                contact_obj.insert("email".to_string(), json!(email));
            }
            if let Some(url) = &contact.url {
                contact_obj.insert("url".to_string(), json!(url));
            }
            if !contact_obj.is_empty() {
                info.insert("contact".to_string(), Value::Object(contact_obj));
            }
        }
        if let Some(license) = &self.license {
            info.insert("license".to_string(), json!({ "name": license }));
        }
        info.insert("version".to_string(), json!(self.version));
        Value::Object(info)
    }
}

/// Tag metadata for the root `tags` array.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenApiTag {
    /// The tag name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional External Documentation Object.
    pub external_docs: Option<Value>,
}

impl OpenApiTag {
    /// Creates a tag, copying metadata from `info` when present.
    pub fn new(name: impl Into<String>, info: Option<&TagInfo>) -> Self {
        Self {
            name: name.into(),
            description: info.and_then(|i| i.description.clone()),
            external_docs: info.and_then(|i| i.external_docs.clone()),
        }
    }

    /// The Tag Object.
    pub fn to_value(&self) -> Value {
        let mut tag = Map::new();
        tag.insert("name".to_string(), json!(self.name));
        if let Some(description) = non_blank(self.description.as_deref()) {
            tag.insert("description".to_string(), json!(description));
        }
        if let Some(docs) = &self.external_docs {
            tag.insert("externalDocs".to_string(), docs.clone());
        }
        Value::Object(tag)
    }
}

/// API-key header plus bearer JWT.
pub fn default_security() -> Vec<Value> {
    vec![
        json!({ "type": "apiKey", "name": "Authorization", "in": "header" }),
        json!({ "type": "http", "scheme": "bearer", "bearerFormat": "JWT" }),
    ]
}

/// The configured security list when non-empty, otherwise [`default_security`].
pub fn resolve_security(oas: &OasSettings) -> Vec<Value> {
    match &oas.security {
        Some(list) if !list.is_empty() => list.iter().cloned().map(Value::Object).collect(),
        _ => default_security(),
    }
}

/// The configured servers when valid, otherwise one synthesized entry.
///
/// A configured list is valid when it is non-empty and every entry carries a
/// non-blank string `url`.
pub fn resolve_servers(settings: &Settings) -> Vec<Value> {
    if let Some(servers) = &settings.oas.servers {
        let valid = !servers.is_empty()
            && servers
                .iter()
                .all(|server| non_blank(server.get("url").and_then(Value::as_str)).is_some());
        if valid {
            return servers.clone();
        }
        tracing::debug!(count = servers.len(), "Rejected configured servers");
    }

    vec![json!({ "url": synthesized_server_url(settings) })]
}

/// `{scheme}://{baseUrl}/{basePath}`.
pub fn synthesized_server_url(settings: &Settings) -> String {
    let web = &settings.servers.web;
    let oas = &settings.oas;

    let scheme = if web.secure { "https" } else { "http" };
    let base_url = match non_blank(oas.base_url.as_deref()) {
        Some(base_url) => base_url.to_string(),
        None => {
            let host = non_blank(oas.host_override.as_deref()).unwrap_or(&web.host);
            let port = oas.port_override.unwrap_or(web.port);
            format!("{}:{}", host, port)
        }
    };
    let base_path = non_blank(web.url_path_for_actions.as_deref()).unwrap_or(DEFAULT_BASE_PATH);

    format!("{}://{}/{}", scheme, base_url, base_path)
}

/// Version tags (when grouping) followed by the remaining configured tags,
/// deduplicated by name.
pub fn collect_tags(snapshot: &ApiSnapshot) -> Vec<OpenApiTag> {
    let oas = &snapshot.settings.oas;
    let mut tags: Vec<OpenApiTag> = Vec::new();

    if oas.group_by_version_tag {
        for version in snapshot.catalog.version_keys() {
            let info = oas.tags_info.get(&version);
            tags.push(OpenApiTag::new(version, info));
        }
    }

    for (name, info) in &oas.tags_info {
        if tags.iter().any(|tag| &tag.name == name) {
            continue;
        }
        tags.push(OpenApiTag::new(name.clone(), Some(info)));
    }

    tags
}

/// Builds the OpenAPI document. Never fails; a fresh component registry is
/// used on every call.
pub fn build_document(snapshot: &ApiSnapshot) -> Value {
    let oas = &snapshot.settings.oas;
    let mut registry = ComponentRegistry::new();
    tracing::debug!(
        actions = snapshot.catalog.iter().count(),
        "Building OpenAPI document"
    );

    let info = OpenApiInfo::from_snapshot(snapshot);
    let servers = resolve_servers(&snapshot.settings);
    let security = resolve_security(oas);

    let context = OperationContext {
        group_by_version_tag: oas.group_by_version_tag,
        security: &security,
    };
    let paths = PathEnumerator::new(snapshot, context).enumerate(&mut registry);
    let tags = collect_tags(snapshot);

    tracing::debug!(
        paths = paths.len(),
        components = registry.len(),
        tags = tags.len(),
        "Built OpenAPI document"
    );

    let mut doc = Map::new();
    doc.insert("openapi".to_string(), json!(OPENAPI_VERSION));
    doc.insert("info".to_string(), info.to_value());
    doc.insert("servers".to_string(), Value::Array(servers));
    doc.insert("security".to_string(), Value::Array(security));
    doc.insert("paths".to_string(), Value::Object(paths));
    if !tags.is_empty() {
        let tag_entries = tags.iter().map(OpenApiTag::to_value).collect::<Vec<_>>();
        doc.insert("tags".to_string(), Value::Array(tag_entries));
    }
    if let Some(docs) = &oas.api_documentation {
        if !docs.is_null() {
            doc.insert("externalDocs".to_string(), docs.clone());
        }
    }
    if !registry.is_empty() {
        doc.insert("components".to_string(), registry.to_value());
    }

    Value::Object(doc)
}
