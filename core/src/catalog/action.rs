#![deny(missing_docs)]

//! # Action Descriptors
//!
//! Read-only model of the host's action registry: `name -> version -> action`.

use crate::catalog::input::{parse_inputs, InputDecl, InputMap};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Number, Value};
use std::fmt;

/// Numeric or textual action version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum ActionVersion {
    /// A numeric version such as `1` or `2.5`.
    Number(serde_json::Number),
    /// A free-form version such as `"v2"`.
    Text(String),
}

impl Default for ActionVersion {
    fn default() -> Self {
        ActionVersion::Number(1.into())
    }
}

impl fmt::Display for ActionVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionVersion::Number(n) => write!(f, "{}", n),
            ActionVersion::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i32> for ActionVersion {
    fn from(value: i32) -> Self {
        ActionVersion::Number(value.into())
    }
}

impl From<&str> for ActionVersion {
    fn from(value: &str) -> Self {
        ActionVersion::Text(value.to_string())
    }
}

impl ActionVersion {
    /// Version implied by a catalog key: numeric keys become numbers.
    pub fn from_key(key: &str) -> Self {
        match serde_json::from_str::<Number>(key) {
            Ok(number) => ActionVersion::Number(number),
            Err(_) => ActionVersion::Text(key.to_string()),
        }
    }

    fn to_value(&self) -> Value {
        match self {
            ActionVersion::Number(n) => Value::Number(n.clone()),
            ActionVersion::Text(s) => Value::String(s.clone()),
        }
    }
}

/// Header declared by an action, surfaced as an `in: header` parameter.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct HeaderDescriptor {
    /// Header description.
    pub description: Option<String>,
    /// Schema object, passed through verbatim.
    pub schema: Option<Value>,
    /// Explode flag.
    pub explode: Option<bool>,
    /// Serialization style. Defaults to `simple` in the document.
    pub style: Option<String>,
    /// Example value.
    pub example: Option<Value>,
    /// Required flag. Defaults to `false` in the document.
    pub required: Option<bool>,
}

/// A named, versioned server-side operation.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionDescriptor {
    /// Action name. Filled from the catalog key when omitted.
    #[serde(default)]
    pub name: String,
    /// Action version. Filled from the catalog key when omitted.
    #[serde(default)]
    pub version: ActionVersion,
    /// Short summary, copied onto every path item that exposes the action.
    #[serde(default, deserialize_with = "lenient")]
    pub summary: Option<String>,
    /// Long description, copied onto every path item that exposes the action.
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    /// Operation tags. Non-string entries are dropped.
    #[serde(default, deserialize_with = "string_list")]
    pub tags: Vec<String>,
    /// Deprecation flag, emitted verbatim when declared.
    #[serde(default, deserialize_with = "lenient")]
    pub deprecated: Option<bool>,
    /// Default parameter location for every input of this action.
    #[serde(rename = "in", default, deserialize_with = "lenient")]
    pub default_location: Option<String>,
    /// Input declarations.
    #[serde(default, deserialize_with = "inputs_or_empty")]
    pub inputs: InputMap,
    /// Status code to Response Object.
    #[serde(default, deserialize_with = "lenient")]
    pub response_schemas: Option<Map<String, Value>>,
    /// Example output, attached to the `200` response when it has no content.
    pub output_example: Option<Value>,
    /// Header declarations. Malformed entries are dropped.
    #[serde(default, deserialize_with = "header_map")]
    pub headers: Option<IndexMap<String, HeaderDescriptor>>,
}

impl ActionDescriptor {
    /// Creates an action with no inputs.
    pub fn new(name: impl Into<String>, version: impl Into<ActionVersion>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            ..Self::default()
        }
    }

    /// Adds an input declaration.
    pub fn with_input(mut self, name: impl Into<String>, input: impl Into<InputDecl>) -> Self {
        self.inputs.insert(name.into(), input.into());
        self
    }

    /// Sets the default parameter location.
    pub fn with_default_location(mut self, location: impl Into<String>) -> Self {
        self.default_location = Some(location.into());
        self
    }

    /// Component name shared by the request body and the operation id:
    /// `{name}_{version}`.
    pub fn component_name(&self) -> String {
        format!("{}_{}", self.name, self.version)
    }
}

/// Tolerates a missing, `null` or otherwise non-object `inputs` field.
fn inputs_or_empty<'de, D>(deserializer: D) -> Result<InputMap, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Object(map) => Ok(parse_inputs(map)),
        _ => Ok(InputMap::new()),
    }
}

/// Keeps a value of the expected type and treats anything else as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect()),
        _ => Ok(Vec::new()),
    }
}

fn header_map<'de, D>(
    deserializer: D,
) -> Result<Option<IndexMap<String, HeaderDescriptor>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Object(map) => Ok(Some(
            map.into_iter()
                .filter_map(|(name, header)| {
                    serde_json::from_value(header).ok().map(|header| (name, header))
                })
                .collect(),
        )),
        _ => Ok(None),
    }
}

type RawCatalog = IndexMap<String, IndexMap<String, Value>>;

/// The full action registry, in declaration order.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(try_from = "RawCatalog")]
pub struct ActionCatalog {
    actions: IndexMap<String, IndexMap<String, ActionDescriptor>>,
}

impl TryFrom<RawCatalog> for ActionCatalog {
    type Error = serde_json::Error;

    /// Fills an undeclared name or version from the enclosing keys.
    fn try_from(raw: RawCatalog) -> Result<Self, Self::Error> {
        let mut actions = IndexMap::with_capacity(raw.len());
        for (name, versions) in raw {
            let mut parsed: IndexMap<String, ActionDescriptor> =
                IndexMap::with_capacity(versions.len());
            for (key, mut value) in versions {
                if let Value::Object(fields) = &mut value {
                    if !matches!(fields.get("name"), Some(Value::String(s)) if !s.is_empty()) {
                        fields.insert("name".to_string(), Value::String(name.clone()));
                    }
                    if !matches!(fields.get("version"), Some(Value::Number(_) | Value::String(_))) {
                        let version = ActionVersion::from_key(&key).to_value();
                        fields.insert("version".to_string(), version);
                    }
                }
                parsed.insert(key, serde_json::from_value(value)?);
            }
            actions.insert(name, parsed);
        }
        Ok(Self { actions })
    }
}

impl ActionCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an action under its name and version.
    pub fn insert(&mut self, action: ActionDescriptor) {
        self.actions
            .entry(action.name.clone())
            .or_default()
            .insert(action.version.to_string(), action);
    }

    /// Builder-style [`ActionCatalog::insert`].
    pub fn with_action(mut self, action: ActionDescriptor) -> Self {
        self.insert(action);
        self
    }

    /// Every version of the named action, in declaration order.
    pub fn versions(&self, name: &str) -> impl Iterator<Item = &ActionDescriptor> {
        self.actions
            .get(name)
            .into_iter()
            .flat_map(|versions| versions.values())
    }

    /// Every action of every version.
    pub fn iter(&self) -> impl Iterator<Item = &ActionDescriptor> {
        self.actions.values().flat_map(|versions| versions.values())
    }

    /// Distinct version keys across the catalog, in first-seen order.
    pub fn version_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = Vec::new();
        for versions in self.actions.values() {
            for key in versions.keys() {
                if !keys.contains(key) {
                    keys.push(key.clone());
                }
            }
        }
        keys
    }

    /// Whether no actions are registered.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_catalog_fills_missing_names() {
        let catalog: ActionCatalog = serde_json::from_value(json!({
            "status": { "1": { "version": 1 } }
        }))
        .unwrap();
        let action = catalog.versions("status").next().unwrap();
        assert_eq!(action.name, "status");
        assert_eq!(action.component_name(), "status_1");
    }

    #[test]
    fn test_catalog_fills_missing_versions_from_keys() {
        let catalog: ActionCatalog = serde_json::from_value(json!({
            "widgetCreate": { "1": {}, "2": {}, "beta": {}, "3": { "version": 7 } }
        }))
        .unwrap();
        let names: Vec<String> = catalog.iter().map(|a| a.component_name()).collect();
        assert_eq!(
            names,
            vec!["widgetCreate_1", "widgetCreate_2", "widgetCreate_beta", "widgetCreate_7"]
        );
        let second = catalog.versions("widgetCreate").nth(1).unwrap();
        assert_eq!(second.version, ActionVersion::from(2));
    }

    #[test]
    fn test_loosely_typed_fields_are_dropped() {
        let catalog: ActionCatalog = serde_json::from_value(json!({
            "status": { "1": {
                "tags": "Core",
                "deprecated": "yes",
                "summary": 5,
                "in": ["query"],
                "responseSchemas": [],
                "headers": { "X-Ok": { "required": true }, "X-Bad": "nope" }
            } },
            "mixed": { "1": { "tags": ["Core", 3, "Extra"], "headers": "none" } }
        }))
        .unwrap();

        let status = catalog.versions("status").next().unwrap();
        assert!(status.tags.is_empty());
        assert_eq!(status.deprecated, None);
        assert_eq!(status.summary, None);
        assert_eq!(status.default_location, None);
        assert_eq!(status.response_schemas, None);
        let headers = status.headers.as_ref().unwrap();
        assert_eq!(headers.keys().collect::<Vec<_>>(), vec!["X-Ok"]);

        let mixed = catalog.versions("mixed").next().unwrap();
        assert_eq!(mixed.tags, vec!["Core", "Extra"]);
        assert_eq!(mixed.headers, None);
    }

    #[test]
    fn test_version_display() {
        assert_eq!(ActionVersion::from(2).to_string(), "2");
        assert_eq!(ActionVersion::from("beta").to_string(), "beta");
        let float: ActionVersion = serde_json::from_value(json!(1.5)).unwrap();
        assert_eq!(float.to_string(), "1.5");
    }

    #[test]
    fn test_null_inputs_are_empty() {
        let action: ActionDescriptor =
            serde_json::from_value(json!({ "name": "x", "inputs": null })).unwrap();
        assert!(action.inputs.is_empty());
    }

    #[test]
    fn test_version_keys_are_distinct() {
        let catalog = ActionCatalog::new()
            .with_action(ActionDescriptor::new("a", 1))
            .with_action(ActionDescriptor::new("a", 2))
            .with_action(ActionDescriptor::new("b", 1));
        assert_eq!(catalog.version_keys(), vec!["1", "2"]);
        assert_eq!(catalog.iter().count(), 3);
    }
}
