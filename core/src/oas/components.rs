//! # Component Registry
//!
//! Deduplicating store of reusable document fragments, scoped to one build
//! pass. The first value registered under an `(aspect, name)` pair wins;
//! later registrations only hand back a reference.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// Component sections populated by the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentAspect {
    /// `#/components/parameters`
    Parameters,
    /// `#/components/requestBodies`
    RequestBodies,
}

impl ComponentAspect {
    /// Key of the section under `components`.
    pub fn as_str(self) -> &'static str {
        match self {
            ComponentAspect::Parameters => "parameters",
            ComponentAspect::RequestBodies => "requestBodies",
        }
    }
}

impl fmt::Display for ComponentAspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference Object pointing into `components`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference {
    /// JSON pointer, e.g. `#/components/requestBodies/createWidget_1`.
    #[serde(rename = "$ref")]
    pub pointer: String,
}

impl Reference {
    /// Reference to `#/components/{aspect}/{name}`.
    pub fn component(aspect: ComponentAspect, name: &str) -> Self {
        Self {
            pointer: format!("#/components/{}/{}", aspect, name),
        }
    }

    /// The Reference Object as JSON.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("$ref".to_string(), Value::String(self.pointer.clone()));
        Value::Object(map)
    }
}

/// Accumulated components of one build pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentRegistry {
    parameters: Map<String, Value>,
    request_bodies: Map<String, Value>,
}

impl ComponentRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    fn section(&self, aspect: ComponentAspect) -> &Map<String, Value> {
        match aspect {
            ComponentAspect::Parameters => &self.parameters,
            ComponentAspect::RequestBodies => &self.request_bodies,
        }
    }

    fn section_mut(&mut self, aspect: ComponentAspect) -> &mut Map<String, Value> {
        match aspect {
            ComponentAspect::Parameters => &mut self.parameters,
            ComponentAspect::RequestBodies => &mut self.request_bodies,
        }
    }

    /// Returns a reference when `(aspect, name)` exists.
    ///
    /// Without an existing entry: `value == None` is a pure lookup and returns
    /// `None`; otherwise `value` is stored and its reference returned. An
    /// existing entry is never replaced.
    pub fn resolve(
        &mut self,
        aspect: ComponentAspect,
        name: &str,
        value: Option<Value>,
    ) -> Option<Reference> {
        if self.contains(aspect, name) {
            return Some(Reference::component(aspect, name));
        }
        let value = value?;
        self.section_mut(aspect).insert(name.to_string(), value);
        Some(Reference::component(aspect, name))
    }

    /// Pure lookup.
    pub fn lookup(&self, aspect: ComponentAspect, name: &str) -> Option<Reference> {
        self.contains(aspect, name)
            .then(|| Reference::component(aspect, name))
    }

    /// Returns the existing reference, or materializes the component with
    /// `build` and registers it. `build` runs at most once per name.
    pub fn resolve_with<F>(&mut self, aspect: ComponentAspect, name: &str, build: F) -> Reference
    where
        F: FnOnce() -> Value,
    {
        if let Some(reference) = self.lookup(aspect, name) {
            return reference;
        }
        self.section_mut(aspect).insert(name.to_string(), build());
        Reference::component(aspect, name)
    }

    /// Whether `(aspect, name)` is registered.
    pub fn contains(&self, aspect: ComponentAspect, name: &str) -> bool {
        self.section(aspect).contains_key(name)
    }

    /// The stored component.
    pub fn get(&self, aspect: ComponentAspect, name: &str) -> Option<&Value> {
        self.section(aspect).get(name)
    }

    /// Number of stored components across every aspect.
    pub fn len(&self) -> usize {
        self.parameters.len() + self.request_bodies.len()
    }

    /// Whether nothing was registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every entry.
    pub fn reset(&mut self) {
        self.parameters.clear();
        self.request_bodies.clear();
    }

    /// The Components Object, omitting empty sections.
    pub fn to_value(&self) -> Value {
        let mut components = Map::new();
        for aspect in [ComponentAspect::Parameters, ComponentAspect::RequestBodies] {
            let section = self.section(aspect);
            if !section.is_empty() {
                components.insert(aspect.to_string(), Value::Object(section.clone()));
            }
        }
        Value::Object(components)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_only_mode() {
        let mut registry = ComponentRegistry::new();
        assert_eq!(registry.resolve(ComponentAspect::Parameters, "a_1_id", None), None);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_first_registration_wins() {
        let mut registry = ComponentRegistry::new();
        let first = registry
            .resolve(ComponentAspect::RequestBodies, "a_1", Some(json!({ "v": 1 })))
            .unwrap();
        let second = registry
            .resolve(ComponentAspect::RequestBodies, "a_1", Some(json!({ "v": 2 })))
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(first.pointer, "#/components/requestBodies/a_1");
        assert_eq!(
            registry.get(ComponentAspect::RequestBodies, "a_1"),
            Some(&json!({ "v": 1 }))
        );
    }

    #[test]
    fn test_resolve_with_builds_once() {
        let mut registry = ComponentRegistry::new();
        let mut calls = 0;
        for _ in 0..3 {
            registry.resolve_with(ComponentAspect::Parameters, "a_1_q", || {
                calls += 1;
                json!({ "name": "q" })
            });
        }
        assert_eq!(calls, 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_aspects_are_independent() {
        let mut registry = ComponentRegistry::new();
        registry.resolve(ComponentAspect::Parameters, "x", Some(json!({})));
        assert!(registry.lookup(ComponentAspect::RequestBodies, "x").is_none());
    }

    #[test]
    fn test_to_value_and_reset() {
        let mut registry = ComponentRegistry::new();
        registry.resolve(ComponentAspect::RequestBodies, "a_1", Some(json!({ "required": true })));
        assert_eq!(
            registry.to_value(),
            json!({ "requestBodies": { "a_1": { "required": true } } })
        );
        registry.reset();
        assert!(registry.is_empty());
        assert_eq!(registry.to_value(), json!({}));
    }

    #[test]
    fn test_reference_serialization() {
        let reference = Reference::component(ComponentAspect::Parameters, "a_1_id");
        assert_eq!(
            serde_json::to_value(&reference).unwrap(),
            reference.to_value()
        );
    }
}
