#![deny(missing_docs)]

//! # Snapshot Sources
//!
//! File arguments shared by every command that compiles a document.

use crate::error::CliResult;
use actiondoc_core::ApiSnapshot;
use std::path::PathBuf;

/// Catalog, configuration and package files.
#[derive(clap::Args, Debug, Clone)]
pub struct SourceArgs {
    /// Action catalog and route table (YAML or JSON).
    #[clap(long, env = "ACTIONDOC_CATALOG")]
    pub catalog: PathBuf,

    /// Host configuration (YAML or JSON). Defaults apply when omitted.
    #[clap(long, env = "ACTIONDOC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Package descriptor, usually `package.json`.
    #[clap(long, env = "ACTIONDOC_PACKAGE")]
    pub package: Option<PathBuf>,
}

impl SourceArgs {
    /// Loads the snapshot described by the arguments.
    pub fn load(&self) -> CliResult<ApiSnapshot> {
        let snapshot = ApiSnapshot::load(
            &self.catalog,
            self.config.as_deref(),
            self.package.as_deref(),
        )?;
        Ok(snapshot)
    }
}
