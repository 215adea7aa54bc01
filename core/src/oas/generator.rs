//! # Generator
//!
//! Owns a snapshot and the last document built from it.

use crate::oas::document::build_document;
use crate::oas::writer::write_document;
use crate::snapshot::ApiSnapshot;
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Builds and persists the OpenAPI document of one host snapshot.
#[derive(Debug, Clone)]
pub struct OpenApiGenerator {
    snapshot: ApiSnapshot,
    document: Value,
}

impl OpenApiGenerator {
    /// Creates a generator. Nothing is built until [`OpenApiGenerator::build`].
    pub fn new(snapshot: ApiSnapshot) -> Self {
        Self {
            snapshot,
            document: Value::Object(Map::new()),
        }
    }

    /// Rebuilds the document from scratch and returns it.
    pub fn build(&mut self) -> &Value {
        self.document = build_document(&self.snapshot);
        &self.document
    }

    /// The last built document; empty before the first build.
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// The snapshot the document is built from.
    pub fn snapshot(&self) -> &ApiSnapshot {
        &self.snapshot
    }

    /// Persists the last built document. See [`write_document`].
    pub fn write(&self) -> Option<PathBuf> {
        write_document(&self.document, &self.snapshot.settings)
    }
}
