#![deny(missing_docs)]

//! # Route Table
//!
//! Explicit `verb -> [binding]` routing configuration of the host.

use indexmap::IndexMap;
use serde::Deserialize;

/// Verbs the host web server answers when none are configured.
pub const DEFAULT_VERBS: [&str; 6] = ["head", "get", "post", "put", "patch", "delete"];

/// Route-table verb that binds a route to every supported verb.
pub const WILDCARD_VERB: &str = "all";

/// A static `(verb, path) -> action` binding.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RouteBinding {
    /// Path template, possibly holding `:name` variables.
    pub path: String,
    /// Name of the bound action.
    pub action: String,
    /// Bindings the host marks as hidden from documentation.
    #[serde(default)]
    pub ignored: bool,
}

impl RouteBinding {
    /// Creates a visible binding.
    pub fn new(path: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            action: action.into(),
            ignored: false,
        }
    }
}

#[derive(Deserialize)]
struct RawRouteTable {
    #[serde(default)]
    verbs: Option<Vec<String>>,
    #[serde(default)]
    routes: IndexMap<String, Vec<RouteBinding>>,
}

/// Supported verbs plus the explicit verb tables.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawRouteTable")]
pub struct RouteTable {
    verbs: Vec<String>,
    routes: IndexMap<String, Vec<RouteBinding>>,
}

impl From<RawRouteTable> for RouteTable {
    fn from(raw: RawRouteTable) -> Self {
        let mut table = match raw.verbs {
            Some(verbs) if !verbs.is_empty() => Self::with_verbs(verbs),
            _ => Self::default(),
        };
        for (verb, bindings) in raw.routes {
            for binding in bindings {
                table.bind(&verb, binding);
            }
        }
        table
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::with_verbs(DEFAULT_VERBS)
    }
}

impl RouteTable {
    /// Creates an empty table answering the given verbs.
    pub fn with_verbs<I, S>(verbs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for verb in verbs {
            let verb = verb.as_ref().to_ascii_lowercase();
            if !normalized.contains(&verb) {
                normalized.push(verb);
            }
        }
        Self {
            verbs: normalized,
            routes: IndexMap::new(),
        }
    }

    /// Appends a binding under `verb` (case-insensitive).
    pub fn bind(&mut self, verb: &str, binding: RouteBinding) {
        self.routes
            .entry(verb.to_ascii_lowercase())
            .or_default()
            .push(binding);
    }

    /// Builder-style [`RouteTable::bind`].
    pub fn with_route(mut self, verb: &str, binding: RouteBinding) -> Self {
        self.bind(verb, binding);
        self
    }

    /// Every verb the host supports.
    pub fn verbs(&self) -> &[String] {
        &self.verbs
    }

    /// Explicit tables in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &[RouteBinding])> {
        self.routes
            .iter()
            .map(|(verb, bindings)| (verb.as_str(), bindings.as_slice()))
    }

    /// Concrete verbs a table entry registers: every supported verb for the
    /// wildcard, otherwise the verb itself.
    pub fn expand_verb(&self, verb: &str) -> Vec<String> {
        if verb.eq_ignore_ascii_case(WILDCARD_VERB) {
            self.verbs.clone()
        } else {
            vec![verb.to_ascii_lowercase()]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_verbs() {
        let table = RouteTable::default();
        assert_eq!(table.verbs().len(), 6);
        assert_eq!(table.entries().count(), 0);
    }

    #[test]
    fn test_deserialize_lowercases_verbs() {
        let table: RouteTable = serde_json::from_value(json!({
            "verbs": ["GET", "post", "get"],
            "routes": {
                "GET": [{ "path": "/widgets/:id", "action": "widgetShow" }],
                "all": [{ "path": "/status", "action": "status", "ignored": true }]
            }
        }))
        .unwrap();
        assert_eq!(table.verbs(), &["get".to_string(), "post".to_string()]);
        let entries: Vec<_> = table.entries().collect();
        assert_eq!(entries[0].0, "get");
        assert!(entries[1].1[0].ignored);
    }

    #[test]
    fn test_expand_wildcard() {
        let table = RouteTable::with_verbs(["get", "post"]);
        assert_eq!(table.expand_verb("ALL"), vec!["get", "post"]);
        assert_eq!(table.expand_verb("Put"), vec!["put"]);
    }
}
