//! # Path Enumerator
//!
//! Produces the Paths Object from three additive routing strategies:
//! simple routing (`/{action}`), query routing (`/?action=...`) and the
//! explicit verb tables. Strategies run in that order and a later
//! `(path, verb)` entry replaces an earlier one.

use crate::catalog::{ActionDescriptor, InputDescriptor};
use crate::oas::components::ComponentRegistry;
use crate::oas::operation::{assemble_operation, OperationContext};
use crate::snapshot::ApiSnapshot;
use serde_json::{json, Map, Value};

/// Name of the synthetic action documenting query routing.
pub const QUERY_ROUTING_ACTION: &str = "genericQueryRoutingAction";

/// Route under which query routing is documented.
pub const QUERY_ROUTING_PATH: &str = "/";

/// The synthetic action behind `/?action=name&apiVersion=v`.
pub fn query_routing_action() -> ActionDescriptor {
    ActionDescriptor::new(QUERY_ROUTING_ACTION, 1)
        .with_default_location("query")
        .with_input("action", InputDescriptor::new("string").with_required(true))
        .with_input("apiVersion", InputDescriptor::new("string").with_required(false))
}

/// Walks the snapshot's routing configuration and assembles every operation.
#[derive(Debug, Clone, Copy)]
pub struct PathEnumerator<'a> {
    snapshot: &'a ApiSnapshot,
    context: OperationContext<'a>,
}

impl<'a> PathEnumerator<'a> {
    /// Creates an enumerator over `snapshot`.
    pub fn new(snapshot: &'a ApiSnapshot, context: OperationContext<'a>) -> Self {
        Self { snapshot, context }
    }

    /// Builds the Paths Object, registering components into `registry`.
    pub fn enumerate(&self, registry: &mut ComponentRegistry) -> Map<String, Value> {
        let web = &self.snapshot.settings.servers.web;
        let verbs = self.snapshot.routes.verbs();
        let mut paths = Map::new();

        if web.simple_routing {
            for action in self.snapshot.catalog.iter() {
                let route = format!("/{}", action.name);
                self.register(&mut paths, &route, action, verbs, registry);
            }
        }

        if web.query_routing {
            let action = query_routing_action();
            self.register(&mut paths, QUERY_ROUTING_PATH, &action, verbs, registry);
        }

        for (verb, bindings) in self.snapshot.routes.entries() {
            let targets = self.snapshot.routes.expand_verb(verb);
            for binding in bindings {
                if binding.ignored {
                    tracing::debug!(path = %binding.path, verb, "Skipping route marked as ignored");
                    continue;
                }
                let mut versions = self.snapshot.catalog.versions(&binding.action).peekable();
                if versions.peek().is_none() {
                    tracing::debug!(
                        path = %binding.path,
                        action = %binding.action,
                        "Skipping route bound to an unknown action"
                    );
                    continue;
                }
                for action in versions {
                    self.register(&mut paths, &binding.path, action, &targets, registry);
                }
            }
        }

        paths
    }

    /// Whether `route` is listed in `oas.ignoreRoutes`.
    pub fn is_ignored(&self, route: &str) -> bool {
        self.snapshot
            .settings
            .oas
            .ignore_routes
            .iter()
            .any(|ignored| ignored == route)
    }

    fn register(
        &self,
        paths: &mut Map<String, Value>,
        route: &str,
        action: &ActionDescriptor,
        verbs: &[String],
        registry: &mut ComponentRegistry,
    ) {
        if self.is_ignored(route) {
            tracing::debug!(path = route, action = %action.name, "Skipping ignored route");
            return;
        }

        let item = paths
            .entry(route.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        let Value::Object(item) = item else {
            return;
        };

        for verb in verbs {
            let operation = assemble_operation(action, verb, route, &self.context, registry);
            if let Some(summary) = &action.summary {
                item.insert("summary".to_string(), json!(summary));
            }
            if let Some(description) = &action.description {
                item.insert("description".to_string(), json!(description));
            }
            item.insert(verb.clone(), operation);
        }
    }
}
