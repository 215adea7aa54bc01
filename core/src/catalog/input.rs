#![deny(missing_docs)]

//! # Input Declarations
//!
//! Typed view over the loosely shaped input declarations an action exposes.
//!
//! Raw declarations are ingested exactly once into a closed union so the
//! schema builder walks a typed tree instead of re-checking JSON shapes at
//! every level. A declaration that is not an object is kept as
//! [`InputDecl::Malformed`]; the schema builder refuses to describe any input
//! set that contains one.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Ordered mapping of input name to its declaration.
pub type InputMap = IndexMap<String, InputDecl>;

/// Type assumed when an input does not declare one.
pub const DEFAULT_INPUT_TYPE: &str = "string";

/// Keys that only carry meaning for the host runtime (default generators,
/// validators and formatters) and never reach a generated document.
pub const IMPLEMENTATION_ONLY_KEYS: [&str; 3] = ["default", "validator", "formatter"];

/// A single input declaration as found in the action catalog.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum InputDecl {
    /// An object declaration, parsed into its typed form.
    Descriptor(InputDescriptor),
    /// Anything that is not an object. Preserved verbatim.
    Malformed(Value),
}

impl From<Value> for InputDecl {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => InputDecl::Descriptor(InputDescriptor::from_map(map)),
            other => InputDecl::Malformed(other),
        }
    }
}

impl From<InputDescriptor> for InputDecl {
    fn from(descriptor: InputDescriptor) -> Self {
        InputDecl::Descriptor(descriptor)
    }
}

impl InputDecl {
    /// Returns the typed descriptor unless the declaration is malformed.
    pub fn as_descriptor(&self) -> Option<&InputDescriptor> {
        match self {
            InputDecl::Descriptor(descriptor) => Some(descriptor),
            InputDecl::Malformed(_) => None,
        }
    }

    /// Whether the declaration failed ingestion.
    pub fn is_malformed(&self) -> bool {
        matches!(self, InputDecl::Malformed(_))
    }
}

/// Structural shape of an input.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputShape {
    /// A value described by its `type` alone.
    #[default]
    Leaf,
    /// `type: array`.
    Array(ArrayItems),
    /// An input carrying a nested `schema` of further inputs.
    Object(InputMap),
}

/// Item description of an array input.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayItems {
    /// No `items` given; string items are assumed.
    Implicit,
    /// An inline `items` schema, passed through as declared.
    Inline(Map<String, Value>),
    /// `items.schema` (or `schema` on an array) holding nested inputs.
    Nested(InputMap),
}

/// Typed input declaration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InputDescriptor {
    /// Declared `type`, if any.
    pub ty: Option<String>,
    /// Declared `in` override. Validated later by the parameter classifier.
    pub location: Option<String>,
    /// Declared `required` flag. Non-boolean values are ignored.
    pub required: Option<bool>,
    /// Human readable description.
    pub description: Option<String>,
    /// Example value.
    pub example: Option<Value>,
    /// Parameter serialization style.
    pub style: Option<String>,
    /// Parameter `explode` flag.
    pub explode: Option<bool>,
    /// Parameter `allowEmptyValue` flag.
    pub allow_empty_value: Option<bool>,
    /// Structural shape (leaf, array or nested object).
    pub shape: InputShape,
    /// Every other keyword, in declaration order.
    pub extra: Map<String, Value>,
}

impl InputDescriptor {
    /// Creates a leaf descriptor of the given type.
    pub fn new(ty: impl Into<String>) -> Self {
        Self {
            ty: Some(ty.into()),
            ..Self::default()
        }
    }

    /// Marks the input as required (or explicitly optional).
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Sets the declared location override.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the shape.
    pub fn with_shape(mut self, shape: InputShape) -> Self {
        self.shape = shape;
        self
    }

    /// Parses an object declaration.
    pub fn from_map(mut map: Map<String, Value>) -> Self {
        let ty = take_string(&mut map, "type");
        let location = take_string(&mut map, "in");
        let required = take_bool(&mut map, "required");
        let description = take_string(&mut map, "description");
        let example = map.shift_remove("example");
        let style = take_string(&mut map, "style");
        let explode = take_bool(&mut map, "explode");
        let allow_empty_value = take_bool(&mut map, "allowEmptyValue");

        let schema = match map.shift_remove("schema") {
            Some(Value::Object(schema)) => Some(schema),
            _ => None,
        };
        let items = map.shift_remove("items");
        let item_schema = match &items {
            Some(Value::Object(items)) => match items.get("schema") {
                Some(Value::Object(schema)) => Some(schema.clone()),
                _ => None,
            },
            _ => None,
        };

        let is_array = ty.as_deref() == Some("array");
        let shape = match schema.or(item_schema).map(parse_inputs) {
            Some(inputs) if is_array => InputShape::Array(ArrayItems::Nested(inputs)),
            Some(inputs) => InputShape::Object(inputs),
            None if is_array => match items {
                Some(Value::Object(items)) => InputShape::Array(ArrayItems::Inline(items)),
                _ => InputShape::Array(ArrayItems::Implicit),
            },
            None => {
                if let Some(items) = items {
                    map.insert("items".to_string(), items);
                }
                InputShape::Leaf
            }
        };

        Self {
            ty,
            location,
            required,
            description,
            example,
            style,
            explode,
            allow_empty_value,
            shape,
            extra: map,
        }
    }

    /// The effective type tag: `array` / `object` for composite shapes,
    /// otherwise the declared type or [`DEFAULT_INPUT_TYPE`].
    pub fn type_name(&self) -> &str {
        match &self.shape {
            InputShape::Array(_) => "array",
            InputShape::Object(_) => "object",
            InputShape::Leaf => self
                .ty
                .as_deref()
                .filter(|ty| !ty.trim().is_empty())
                .unwrap_or(DEFAULT_INPUT_TYPE),
        }
    }

    /// True only when `required` was declared as `true`.
    pub fn is_required(&self) -> bool {
        self.required == Some(true)
    }
}

/// Ingests every member of a raw input object.
pub fn parse_inputs(map: Map<String, Value>) -> InputMap {
    map.into_iter()
        .map(|(name, value)| (name, InputDecl::from(value)))
        .collect()
}

fn take_string(map: &mut Map<String, Value>, key: &str) -> Option<String> {
    match map.shift_remove(key) {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

fn take_bool(map: &mut Map<String, Value>, key: &str) -> Option<bool> {
    match map.shift_remove(key) {
        Some(Value::Bool(b)) => Some(b),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn descriptor(value: Value) -> InputDescriptor {
        match InputDecl::from(value) {
            InputDecl::Descriptor(d) => d,
            InputDecl::Malformed(v) => panic!("unexpected malformed input: {}", v),
        }
    }

    #[test]
    fn test_leaf_defaults_to_string() {
        let d = descriptor(json!({ "required": true }));
        assert_eq!(d.type_name(), "string");
        assert!(d.is_required());
        assert_eq!(d.shape, InputShape::Leaf);
    }

    #[test]
    fn test_array_without_items_is_implicit() {
        let d = descriptor(json!({ "type": "array" }));
        assert_eq!(d.shape, InputShape::Array(ArrayItems::Implicit));
        assert_eq!(d.type_name(), "array");
    }

    #[test]
    fn test_array_with_inline_items() {
        let d = descriptor(json!({ "type": "array", "items": { "type": "integer" } }));
        match d.shape {
            InputShape::Array(ArrayItems::Inline(items)) => assert_eq!(items["type"], "integer"),
            other => panic!("unexpected shape {:?}", other),
        }
    }

    #[test]
    fn test_array_with_nested_item_schema() {
        let d = descriptor(json!({
            "type": "array",
            "items": { "schema": { "id": { "type": "number" } } }
        }));
        match d.shape {
            InputShape::Array(ArrayItems::Nested(inputs)) => assert!(inputs.contains_key("id")),
            other => panic!("unexpected shape {:?}", other),
        }
    }

    #[test]
    fn test_nested_schema_becomes_object() {
        let d = descriptor(json!({
            "type": "string",
            "schema": { "street": {}, "zip": "bogus" }
        }));
        assert_eq!(d.type_name(), "object");
        match d.shape {
            InputShape::Object(inputs) => {
                assert!(!inputs["street"].is_malformed());
                assert!(inputs["zip"].is_malformed());
            }
            other => panic!("unexpected shape {:?}", other),
        }
    }

    #[test]
    fn test_non_object_is_malformed() {
        assert!(InputDecl::from(json!("id")).is_malformed());
        assert!(InputDecl::from(json!(null)).is_malformed());
    }

    #[test]
    fn test_extra_keeps_unknown_keywords_in_order() {
        let d = descriptor(json!({
            "format": "email",
            "default": "a@b.c",
            "required": "yes",
            "maxLength": 64
        }));
        let keys: Vec<_> = d.extra.keys().cloned().collect();
        assert_eq!(keys, vec!["format", "default", "maxLength"]);
        assert_eq!(d.required, None);
    }
}
