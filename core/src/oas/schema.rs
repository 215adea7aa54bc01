//! # Schema Builder
//!
//! Derives JSON-Schema-shaped descriptions from input declarations.
//!
//! Required-ness is hoisted to the parent (`required: [name, ...]`) at every
//! object level, implementation-only keys are dropped and unknown keywords
//! pass through. A malformed declaration anywhere in the tree yields `None`
//! for the whole call.
//!
//! Parameter-only keys (`in`, `style`, `explode`, `allowEmptyValue`) never
//! reach a schema node, and neither does a non-boolean `required`.

use crate::catalog::input::IMPLEMENTATION_ONLY_KEYS;
use crate::catalog::{ArrayItems, InputDecl, InputDescriptor, InputMap, InputShape};
use serde_json::{json, Map, Value};

/// Where a derived schema is going to live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaContext {
    /// Media Type Object: the type tag is written inline (`type: string`).
    Body,
    /// Parameter Object: the type tag is nested (`schema: { type: string }`).
    Parameter,
}

/// Builds `{ properties, required? }` for `inputs`.
///
/// When `whitelist` is given, root-level inputs not listed are skipped.
/// Nested levels are never filtered.
pub fn build_schema(
    inputs: &InputMap,
    whitelist: Option<&[String]>,
    context: SchemaContext,
) -> Option<Value> {
    let (properties, required) = describe_members(inputs, whitelist, context)?;
    let mut schema = Map::new();
    schema.insert("properties".to_string(), Value::Object(properties));
    if !required.is_empty() {
        schema.insert("required".to_string(), json!(required));
    }
    Some(Value::Object(schema))
}

/// Schema of a single parameter.
///
/// Leaves map to `{ type }`. Composite inputs are described structurally and
/// their `type` is inferred with [`infer_schema_type`].
pub fn parameter_schema(input: &InputDescriptor) -> Option<Value> {
    let described = match &input.shape {
        InputShape::Leaf => return Some(json!({ "type": input.type_name() })),
        InputShape::Array(items) => {
            let mut map = Map::new();
            map.insert(
                "items".to_string(),
                describe_items(items, SchemaContext::Parameter)?,
            );
            Value::Object(map)
        }
        InputShape::Object(inputs) => build_schema(inputs, None, SchemaContext::Parameter)?,
    };

    let mut schema = Map::new();
    schema.insert("type".to_string(), json!(infer_schema_type(&described)));
    if let Value::Object(map) = described {
        schema.extend(map);
    }
    Some(Value::Object(schema))
}

/// `array` when `items` is present, `object` when `properties` is, else `string`.
pub fn infer_schema_type(schema: &Value) -> &'static str {
    if schema.get("items").is_some() {
        "array"
    } else if schema.get("properties").is_some() {
        "object"
    } else {
        "string"
    }
}

fn describe_members(
    inputs: &InputMap,
    whitelist: Option<&[String]>,
    context: SchemaContext,
) -> Option<(Map<String, Value>, Vec<String>)> {
    if inputs.values().any(InputDecl::is_malformed) {
        return None;
    }

    let mut properties = Map::new();
    let mut required = Vec::new();

    for (name, decl) in inputs {
        if let Some(list) = whitelist {
            if !list.iter().any(|allowed| allowed == name) {
                continue;
            }
        }
        let input = decl.as_descriptor()?;
        let node = describe_input(input, context)?;
        if input.is_required() {
            required.push(name.clone());
        }
        properties.insert(name.clone(), Value::Object(node));
    }

    Some((properties, required))
}

fn describe_input(input: &InputDescriptor, context: SchemaContext) -> Option<Map<String, Value>> {
    let mut node = Map::new();
    write_type(&mut node, input.type_name(), context);

    match &input.shape {
        InputShape::Leaf => {}
        InputShape::Array(items) => {
            node.insert("items".to_string(), describe_items(items, context)?);
        }
        InputShape::Object(inputs) => {
            let (properties, required) = describe_members(inputs, None, context)?;
            node.insert("properties".to_string(), Value::Object(properties));
            if !required.is_empty() {
                node.insert("required".to_string(), json!(required));
            }
        }
    }

    if let Some(description) = &input.description {
        node.insert("description".to_string(), json!(description));
    }
    if let Some(example) = &input.example {
        node.insert("example".to_string(), example.clone());
    }
    for (key, value) in &input.extra {
        if IMPLEMENTATION_ONLY_KEYS.contains(&key.as_str()) {
            continue;
        }
        node.entry(key.clone()).or_insert_with(|| value.clone());
    }

    Some(node)
}

fn describe_items(items: &ArrayItems, context: SchemaContext) -> Option<Value> {
    match items {
        ArrayItems::Implicit => Some(json!({ "type": "string" })),
        ArrayItems::Inline(schema) => {
            let mut schema = schema.clone();
            for key in IMPLEMENTATION_ONLY_KEYS {
                schema.shift_remove(key);
            }
            Some(Value::Object(schema))
        }
        ArrayItems::Nested(inputs) => {
            let (properties, required) = describe_members(inputs, None, context)?;
            let mut node = Map::new();
            write_type(&mut node, "object", context);
            node.insert("properties".to_string(), Value::Object(properties));
            if !required.is_empty() {
                node.insert("required".to_string(), json!(required));
            }
            Some(Value::Object(node))
        }
    }
}

fn write_type(node: &mut Map<String, Value>, ty: &str, context: SchemaContext) {
    match context {
        SchemaContext::Body => {
            node.insert("type".to_string(), json!(ty));
        }
        SchemaContext::Parameter => {
            node.insert("schema".to_string(), json!({ "type": ty }));
        }
    }
}
