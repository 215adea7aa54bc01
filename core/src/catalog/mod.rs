//! # Host Catalog
//!
//! Read-only model of everything the host process exposes to the compiler:
//! the action registry, the explicit route table and the package descriptor.

/// Action registry.
pub mod action;

/// Input declarations and their typed shapes.
pub mod input;

/// Package descriptor.
pub mod package;

/// Explicit route tables.
pub mod routes;

pub use action::{ActionCatalog, ActionDescriptor, ActionVersion, HeaderDescriptor};
pub use input::{ArrayItems, InputDecl, InputDescriptor, InputMap, InputShape};
pub use package::{PackageAuthor, PackageMetadata, Person};
pub use routes::{RouteBinding, RouteTable};
