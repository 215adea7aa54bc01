#![deny(missing_docs)]

//! # Check Command
//!
//! Compiles the document without writing it and reports what it contains.

use crate::error::CliResult;
use crate::source::SourceArgs;
use actiondoc_core::build_document;
use serde_json::Value;

/// Arguments for the check command.
#[derive(clap::Args, Debug, Clone)]
pub struct CheckArgs {
    /// Snapshot files.
    #[clap(flatten)]
    pub source: SourceArgs,
}

/// Counts gathered from a compiled document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DocumentSummary {
    /// Entries under `paths`.
    pub paths: usize,
    /// Operations across every path item.
    pub operations: usize,
    /// Entries under `components.parameters`.
    pub parameters: usize,
    /// Entries under `components.requestBodies`.
    pub request_bodies: usize,
}

impl DocumentSummary {
    /// Summarizes `document`.
    pub fn of(document: &Value) -> Self {
        let paths = document.get("paths").and_then(Value::as_object);
        let operations = paths
            .map(|paths| {
                paths
                    .values()
                    .filter_map(Value::as_object)
                    .flat_map(|item| item.keys())
                    .filter(|key| !matches!(key.as_str(), "summary" | "description"))
                    .count()
            })
            .unwrap_or(0);
        let section = |name: &str| {
            document
                .get("components")
                .and_then(|c| c.get(name))
                .and_then(Value::as_object)
                .map_or(0, |s| s.len())
        };

        Self {
            paths: paths.map_or(0, |p| p.len()),
            operations,
            parameters: section("parameters"),
            request_bodies: section("requestBodies"),
        }
    }
}

/// Executes the check.
pub fn execute(args: &CheckArgs) -> CliResult<DocumentSummary> {
    let snapshot = args.source.load()?;
    let document = build_document(&snapshot);
    let summary = DocumentSummary::of(&document);

    println!(
        "{} paths, {} operations, {} parameters, {} request bodies",
        summary.paths, summary.operations, summary.parameters, summary.request_bodies
    );
    Ok(summary)
}
