#![deny(missing_docs)]

//! # OpenAPI Compilation Module
//!
//! - **classifier**: Parameter location resolution.
//! - **schema**: Input declarations to schema nodes.
//! - **components**: Deduplicating component store.
//! - **operation**: Operation Object assembly.
//! - **paths**: Routing strategies to the Paths Object.
//! - **document**: Root document orchestration.
//! - **writer**: Persistence to the public directory.
//! - **generator**: Stateful build/write facade.

pub mod classifier;
pub mod components;
pub mod document;
pub mod generator;
pub mod operation;
pub mod paths;
pub mod schema;
pub mod writer;

pub use classifier::{classify, ParamLocation};
pub use components::{ComponentAspect, ComponentRegistry, Reference};
pub use document::{build_document, OpenApiInfo, OpenApiTag, OPENAPI_VERSION};
pub use generator::OpenApiGenerator;
pub use operation::{assemble_operation, OperationContext};
pub use paths::PathEnumerator;
pub use schema::{build_schema, SchemaContext};
pub use writer::write_document;
