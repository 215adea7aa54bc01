//! # Parameter Classifier
//!
//! Decides where a single input travels: path, query, header or cookie.
//! `None` means "no non-body location", which write verbs read as "request
//! body" and every other verb reads as `query`.

use crate::catalog::InputDescriptor;
use crate::settings::non_blank;
use std::fmt;
use std::str::FromStr;

/// OpenAPI `in` values for Parameter Objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamLocation {
    /// `in: query`
    Query,
    /// `in: header`
    Header,
    /// `in: path`
    Path,
    /// `in: cookie`
    Cookie,
}

impl ParamLocation {
    /// The OpenAPI spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            ParamLocation::Query => "query",
            ParamLocation::Header => "header",
            ParamLocation::Path => "path",
            ParamLocation::Cookie => "cookie",
        }
    }
}

impl fmt::Display for ParamLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParamLocation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "query" => Ok(ParamLocation::Query),
            "header" => Ok(ParamLocation::Header),
            "path" => Ok(ParamLocation::Path),
            "cookie" => Ok(ParamLocation::Cookie),
            other => Err(format!("Unknown parameter location '{}'", other)),
        }
    }
}

/// Resolves the location of `input_name`.
///
/// Precedence:
/// 1. the input's own `in`, when it names a valid location;
/// 2. the action's default `in`, when it names a valid location;
/// 3. `path`, when `route` has a segment exactly equal to `:{input_name}`;
/// 4. otherwise `None`.
pub fn classify(
    input_name: &str,
    input: &InputDescriptor,
    action_default: Option<&str>,
    route: &str,
) -> Option<ParamLocation> {
    let declared = [input.location.as_deref(), action_default]
        .into_iter()
        .filter_map(|candidate| non_blank(candidate)?.parse::<ParamLocation>().ok())
        .next();
    if declared.is_some() {
        return declared;
    }

    if has_path_variable(route, input_name) {
        Some(ParamLocation::Path)
    } else {
        None
    }
}

/// Whether `route` holds a `:{name}` segment.
pub fn has_path_variable(route: &str, name: &str) -> bool {
    route
        .split('/')
        .filter_map(|segment| segment.strip_prefix(':'))
        .any(|variable| variable == name)
}
