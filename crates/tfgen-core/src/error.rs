use std::fmt;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported OpenAPI version: {0}")]
    UnsupportedVersion(String),
}

/// Where in the document a resolution failure happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Schema name or path being resolved.
    pub subject: String,
    /// Offending property, when the failure is tied to one.
    pub property: Option<String>,
}

impl Location {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            property: None,
        }
    }

    pub fn with_property(mut self, property: impl Into<String>) -> Self {
        self.property = Some(property.into());
        self
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.property {
            Some(property) => write!(f, "{}.{}", self.subject, property),
            None => write!(f, "{}", self.subject),
        }
    }
}

/// Fatal resolution failures. There is no degraded output mode.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("unresolvable reference '{reference}' at {location}")]
    UnresolvableReference { location: Location, reference: String },

    #[error("unsupported shape at {location}: {reason}")]
    UnsupportedShape { location: Location, reason: String },
}

impl ResolveError {
    pub fn unresolvable(location: Location, reference: impl Into<String>) -> Self {
        ResolveError::UnresolvableReference {
            location,
            reference: reference.into(),
        }
    }

    pub fn unsupported(location: Location, reason: impl Into<String>) -> Self {
        ResolveError::UnsupportedShape {
            location,
            reason: reason.into(),
        }
    }

    pub fn location(&self) -> &Location {
        match self {
            ResolveError::UnresolvableReference { location, .. } => location,
            ResolveError::UnsupportedShape { location, .. } => location,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml_ng::Error,
    },
}

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("resolve error: {0}")]
    Resolve(#[from] ResolveError),

    #[error("template error: {0}")]
    Template(String),
}
