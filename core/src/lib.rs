#![deny(missing_docs)]

//! # Actiondoc Core
//!
//! Compiles an action catalog and its routing configuration into an
//! OpenAPI 3.0.1 document.

/// Shared error types.
pub mod error;

/// Host action registry, route table and package descriptor.
pub mod catalog;

/// Host configuration.
pub mod settings;

/// Immutable input of a build pass.
pub mod snapshot;

/// OpenAPI document compilation.
pub mod oas;

pub use catalog::{
    ActionCatalog, ActionDescriptor, ActionVersion, HeaderDescriptor, InputDecl, InputDescriptor,
    PackageMetadata, RouteBinding, RouteTable,
};
pub use error::{AppError, AppResult};
pub use oas::{build_document, write_document, ComponentRegistry, OpenApiGenerator};
pub use settings::Settings;
pub use snapshot::ApiSnapshot;
