use serde::Serialize;

use super::schemas::SchemaObject;

/// The resolved shape of one API operation path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathObject {
    pub path: String,
    pub description: Option<String>,
    /// Path parameter names in declaration order.
    pub parameters: Vec<String>,
    pub get: GetOperation,
}

/// The GET operation of a path: the only one data sources read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetOperation {
    pub summary: Option<String>,
    pub description: Option<String>,
    /// Field names accepted by `$select`, as the API declares them.
    pub select_parameters: Vec<String>,
    pub response: SchemaObject,
}
