//! `<variable>.<property>` column specifications.

use crate::{PathError, PathResult};
use regex_lite::Regex;
use std::fmt;
use std::sync::OnceLock;

const VARIABLE: &str = r"^[A-Za-z_][A-Za-z0-9_]*$";
const PROJECTION: &str = r"^([A-Za-z_][A-Za-z0-9_]*)\.(\S+)$";

fn compiled(
    cell: &'static OnceLock<Result<Regex, regex_lite::Error>>,
    pattern: &str,
) -> PathResult<&'static Regex> {
    cell.get_or_init(|| Regex::new(pattern))
        .as_ref()
        .map_err(|err| PathError::invalid_projection(err.to_string()))
}

/// Whether `name` is usable as a path variable.
pub fn is_variable_name(name: &str) -> PathResult<bool> {
    static RE: OnceLock<Result<Regex, regex_lite::Error>> = OnceLock::new();
    Ok(compiled(&RE, VARIABLE)?.is_match(name))
}

/// A parsed column specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    pub var: String,
    pub property: String,
}

impl Projection {
    /// Parse `"h1.project"` into variable `h1` and property `project`.
    pub fn parse(spec: &str) -> PathResult<Self> {
        static RE: OnceLock<Result<Regex, regex_lite::Error>> = OnceLock::new();
        let captures = compiled(&RE, PROJECTION)?
            .captures(spec.trim())
            .ok_or_else(|| PathError::invalid_projection(spec))?;
        Ok(Self {
            var: captures[1].to_string(),
            property: captures[2].to_string(),
        })
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.var, self.property)
    }
}
