#![deny(missing_docs)]

//! # Build Command
//!
//! Compiles the document and writes it under the public directory, or prints
//! it to stdout.

use crate::error::{CliError, CliResult};
use crate::source::SourceArgs;
use actiondoc_core::OpenApiGenerator;
use std::path::PathBuf;

/// Arguments for the build command.
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Snapshot files.
    #[clap(flatten)]
    pub source: SourceArgs,

    /// Print the document instead of writing it.
    #[clap(long)]
    pub stdout: bool,
}

/// Executes the build.
///
/// Returns the written path, or `None` when the document went to stdout.
pub fn execute(args: &BuildArgs) -> CliResult<Option<PathBuf>> {
    let snapshot = args.source.load()?;
    let mut generator = OpenApiGenerator::new(snapshot);
    generator.build();

    if args.stdout {
        println!("{}", serde_json::to_string_pretty(generator.document())?);
        return Ok(None);
    }

    match generator.write() {
        Some(path) => {
            println!("Wrote {}", path.display());
            Ok(Some(path))
        }
        None => Err(CliError::General(
            "OpenAPI document was not written; check general.paths.public and the oas settings"
                .to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_build_writes_document() {
        let dir = tempdir().unwrap();
        let public = dir.path().join("public");
        let catalog = dir.path().join("catalog.yaml");
        let config = dir.path().join("config.yaml");

        fs::write(
            &catalog,
            "actions:\n  status:\n    \"1\":\n      summary: Health check\n",
        )
        .unwrap();
        fs::write(
            &config,
            format!("general:\n  paths:\n    public: [\"{}\"]\n", public.display()),
        )
        .unwrap();

        let args = BuildArgs {
            source: SourceArgs {
                catalog,
                config: Some(config),
                package: None,
            },
            stdout: false,
        };
        let written = execute(&args).unwrap().unwrap();
        assert_eq!(written, public.join("openapi.json"));

        let doc: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(written).unwrap()).unwrap();
        assert_eq!(doc["paths"]["/status"]["summary"], "Health check");
    }

    #[test]
    fn test_build_without_public_dir_fails() {
        let dir = tempdir().unwrap();
        let catalog = dir.path().join("catalog.json");
        fs::write(&catalog, r#"{ "actions": {} }"#).unwrap();

        let args = BuildArgs {
            source: SourceArgs {
                catalog,
                config: None,
                package: None,
            },
            stdout: false,
        };
        assert!(execute(&args).is_err());
    }
}
