//! # Operation Assembler
//!
//! Builds one Operation Object for an `(action, verb, route)` triple.
//! Request bodies and parameters are registered as components and referenced.

use crate::catalog::{ActionDescriptor, HeaderDescriptor, InputDecl, InputDescriptor};
use crate::oas::classifier::{classify, ParamLocation};
use crate::oas::components::{ComponentAspect, ComponentRegistry};
use crate::oas::schema::{build_schema, parameter_schema, SchemaContext};
use serde_json::{json, Map, Value};

/// Verbs whose unlocated inputs travel in the request body.
pub const WRITE_VERBS: [&str; 3] = ["post", "put", "patch"];

/// Media type of every generated request body.
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Document-wide state shared by every operation of a build pass.
#[derive(Debug, Clone, Copy)]
pub struct OperationContext<'a> {
    /// Seed each operation's tags with its action version.
    pub group_by_version_tag: bool,
    /// Security requirements attached to every operation.
    pub security: &'a [Value],
}

/// Inputs of an action split by destination.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DividedInputs<'a> {
    /// Inputs sent in the request body.
    pub body: Vec<&'a str>,
    /// Inputs sent as parameters.
    pub params: Vec<&'a str>,
}

/// Splits inputs between the request body and the parameter list.
///
/// Only write verbs have a body; an input goes there when it cannot be
/// classified to a non-body location.
pub fn divide_inputs<'a>(action: &'a ActionDescriptor, verb: &str, route: &str) -> DividedInputs<'a> {
    let has_body = WRITE_VERBS.contains(&verb);
    let mut divided = DividedInputs::default();

    for (name, decl) in &action.inputs {
        if has_body && locate(action, name, decl, route).is_none() {
            divided.body.push(name);
        } else {
            divided.params.push(name);
        }
    }

    divided
}

/// Assembles the Operation Object.
pub fn assemble_operation(
    action: &ActionDescriptor,
    verb: &str,
    route: &str,
    context: &OperationContext<'_>,
    registry: &mut ComponentRegistry,
) -> Value {
    let mut operation = Map::new();

    let mut tags = Vec::new();
    if context.group_by_version_tag {
        tags.push(action.version.to_string());
    }
    tags.extend(action.tags.iter().cloned());
    if !tags.is_empty() {
        operation.insert("tags".to_string(), json!(tags));
    }

    operation.insert("operationId".to_string(), json!(action.component_name()));

    let divided = divide_inputs(action, verb, route);

    if let Some(body) = request_body(action, &divided.body, registry) {
        operation.insert("requestBody".to_string(), body);
    }

    let mut parameters: Vec<Value> = divided
        .params
        .iter()
        .map(|name| parameter(action, name, route, registry))
        .collect();
    if let Some(headers) = &action.headers {
        parameters.extend(headers.iter().map(|(name, header)| header_parameter(name, header)));
    }
    if !parameters.is_empty() {
        operation.insert("parameters".to_string(), Value::Array(parameters));
    }

    operation.insert("responses".to_string(), responses(action));

    if let Some(deprecated) = action.deprecated {
        operation.insert("deprecated".to_string(), json!(deprecated));
    }

    operation.insert("security".to_string(), Value::Array(context.security.to_vec()));

    Value::Object(operation)
}

fn locate(
    action: &ActionDescriptor,
    name: &str,
    decl: &InputDecl,
    route: &str,
) -> Option<ParamLocation> {
    let fallback = InputDescriptor::default();
    let input = decl.as_descriptor().unwrap_or(&fallback);
    classify(name, input, action.default_location.as_deref(), route)
}

fn request_body(
    action: &ActionDescriptor,
    body: &[&str],
    registry: &mut ComponentRegistry,
) -> Option<Value> {
    if body.is_empty() {
        return None;
    }

    let reference = registry.resolve_with(
        ComponentAspect::RequestBodies,
        &action.component_name(),
        || {
            let whitelist: Vec<String> = body.iter().map(|name| name.to_string()).collect();
            let mut media_type = Map::new();
            let schema = build_schema(&action.inputs, Some(whitelist.as_slice()), SchemaContext::Body);
            if let Some(schema) = schema {
                media_type.insert("schema".to_string(), schema);
            }

            let required = body.iter().any(|name| {
                action
                    .inputs
                    .get(*name)
                    .and_then(InputDecl::as_descriptor)
                    .is_some_and(InputDescriptor::is_required)
            });

            json!({
                "content": { JSON_MEDIA_TYPE: media_type },
                "required": required
            })
        },
    );
    Some(reference.to_value())
}

fn parameter(
    action: &ActionDescriptor,
    name: &str,
    route: &str,
    registry: &mut ComponentRegistry,
) -> Value {
    let component = format!("{}_{}", action.component_name(), name);
    registry
        .resolve_with(ComponentAspect::Parameters, &component, || {
            parameter_object(action, name, route)
        })
        .to_value()
}

fn parameter_object(action: &ActionDescriptor, name: &str, route: &str) -> Value {
    let fallback = InputDescriptor::default();
    let decl = action.inputs.get(name);
    let input = decl.and_then(InputDecl::as_descriptor).unwrap_or(&fallback);
    let location = decl
        .and_then(|decl| locate(action, name, decl, route))
        .unwrap_or(ParamLocation::Query);

    let mut object = Map::new();
    object.insert("name".to_string(), json!(name));
    object.insert("in".to_string(), json!(location.as_str()));
    if let Some(description) = &input.description {
        object.insert("description".to_string(), json!(description));
    }
    if let Some(required) = input.required {
        object.insert("required".to_string(), json!(required));
    }
    if location == ParamLocation::Query {
        if let Some(allow) = input.allow_empty_value {
            object.insert("allowEmptyValue".to_string(), json!(allow));
        }
    }
    if let Some(schema) = parameter_schema(input) {
        object.insert("schema".to_string(), schema);
    }
    if let Some(style) = &input.style {
        object.insert("style".to_string(), json!(style));
    }
    Value::Object(object)
}

fn header_parameter(name: &str, header: &HeaderDescriptor) -> Value {
    let mut object = Map::new();
    object.insert("name".to_string(), json!(name));
    object.insert("in".to_string(), json!(ParamLocation::Header.as_str()));
    if let Some(description) = &header.description {
        object.insert("description".to_string(), json!(description));
    }
    if let Some(schema) = &header.schema {
        object.insert("schema".to_string(), schema.clone());
    }
    if header.explode == Some(true) {
        object.insert("explode".to_string(), json!(true));
    }
    object.insert(
        "style".to_string(),
        json!(header.style.as_deref().unwrap_or("simple")),
    );
    if let Some(example) = &header.example {
        object.insert("example".to_string(), example.clone());
    }
    object.insert("required".to_string(), json!(header.required.unwrap_or(false)));
    Value::Object(object)
}

fn responses(action: &ActionDescriptor) -> Value {
    let mut responses = Map::new();
    responses.insert("200".to_string(), json!({ "description": "OK" }));
    if let Some(declared) = &action.response_schemas {
        for (status, response) in declared {
            responses.insert(status.clone(), response.clone());
        }
    }

    let example = match &action.output_example {
        Some(Value::Object(example)) if !example.is_empty() => example,
        _ => return Value::Object(responses),
    };
    if let Some(Value::Object(ok)) = responses.get_mut("200") {
        if !ok.contains_key("content") {
            ok.insert(
                "content".to_string(),
                json!({ JSON_MEDIA_TYPE: { "examples": example } }),
            );
        }
    }

    Value::Object(responses)
}
