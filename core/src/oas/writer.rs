//! # Document Writer
//!
//! Persists a built document under the first public directory. Every skip or
//! failure is logged and reported as `None`.

use crate::error::AppResult;
use crate::settings::{non_blank, Settings};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Destination of the document, when the settings allow writing.
pub fn document_destination(settings: &Settings) -> Option<PathBuf> {
    let public = settings.general.paths.public.first()?;
    let dir = non_blank(settings.oas.open_api_document_path.as_deref())?;
    let name = non_blank(settings.oas.open_api_document_name.as_deref())?;

    let relative = dir.trim_start_matches('/');
    Some(Path::new(public).join(relative).join(format!("{}.json", name)))
}

/// Writes `document` as pretty JSON and returns the written path.
pub fn write_document(document: &Value, settings: &Settings) -> Option<PathBuf> {
    if settings.general.paths.public.is_empty() {
        tracing::warn!("No public directory found to write OpenAPI document");
        return None;
    }

    let is_empty = match document {
        Value::Object(map) => map.is_empty(),
        Value::Null => true,
        _ => false,
    };
    if is_empty {
        tracing::warn!("OpenAPI document is empty");
        return None;
    }

    let Some(destination) = document_destination(settings) else {
        tracing::warn!("No path or name defined to write OpenAPI document");
        return None;
    };

    match persist(document, &destination) {
        Ok(()) => {
            tracing::info!(path = %destination.display(), "Wrote OpenAPI document");
            Some(destination)
        }
        Err(e) => {
            tracing::warn!(
                path = %destination.display(),
                error = %e,
                "Cannot write OpenAPI document"
            );
            None
        }
    }
}

fn persist(document: &Value, destination: &Path) -> AppResult<()> {
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_string_pretty(document)?;
    fs::write(destination, data)?;
    Ok(())
}
