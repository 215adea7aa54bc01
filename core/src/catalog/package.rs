#![deny(missing_docs)]

//! # Package Metadata
//!
//! The slice of the host's package descriptor (`package.json`) that feeds the
//! Info Object: name, version, description, license and author.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A person, as found in a structured `author` field or parsed from the
/// `"Name <email> (url)"` shorthand.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Person {
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Homepage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Person {
    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.url.is_none()
    }
}

/// The `author` field: either an object or a free-text shorthand.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PackageAuthor {
    /// `"author": "Jane Doe <jane@example.com> (https://example.com)"`.
    Text(String),
    /// `"author": { "name": "...", "email": "...", "url": "..." }`.
    Structured(Person),
}

impl PackageAuthor {
    /// Resolves the author into a person, parsing the shorthand when needed.
    pub fn person(&self) -> Person {
        match self {
            PackageAuthor::Structured(person) => person.clone(),
            PackageAuthor::Text(text) => parse_author(text),
        }
    }
}

/// Package descriptor of the host application.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct PackageMetadata {
    /// Package name.
    #[serde(default)]
    pub name: String,
    /// Package version.
    #[serde(default)]
    pub version: String,
    /// Package description.
    pub description: Option<String>,
    /// SPDX license expression.
    pub license: Option<String>,
    /// Package author.
    pub author: Option<PackageAuthor>,
}

impl PackageMetadata {
    /// Creates a descriptor with the required name and version.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            ..Self::default()
        }
    }
}

/// Parses `Name <email> (url)`; each part is optional.
pub fn parse_author(text: &str) -> Person {
    static AUTHOR_RE: OnceLock<Regex> = OnceLock::new();
    let re = AUTHOR_RE.get_or_init(|| {
        Regex::new(r"^([^<(]+?)?[ \t]*(?:<([^>(]+?)>)?[ \t]*(?:\(([^)]+?)\)|$)")
            .expect("Invalid regex")
    });

    let Some(caps) = re.captures(text.trim()) else {
        return Person::default();
    };
    let group = |idx: usize| {
        caps.get(idx)
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty())
    };

    Person {
        name: group(1),
        email: group(2),
        url: group(3),
    }
}
