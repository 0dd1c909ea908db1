use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A JSON Schema type keyword value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Null,
}

/// The `type` field can be a single type or an array of types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeSet {
    Single(SchemaType),
    Multiple(Vec<SchemaType>),
}

impl TypeSet {
    /// The single non-null type, if there is exactly one.
    pub fn primary(&self) -> Option<SchemaType> {
        match self {
            TypeSet::Single(t) => Some(*t),
            TypeSet::Multiple(types) => {
                let mut non_null = types.iter().filter(|t| **t != SchemaType::Null);
                match (non_null.next(), non_null.next()) {
                    (Some(t), None) => Some(*t),
                    _ => None,
                }
            }
        }
    }
}

/// A reference or inline schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
        /// Graph may flag a relationship directly beside its `$ref`.
        #[serde(
            rename = "x-ms-navigationProperty",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        navigation_property: Option<bool>,
    },
    Schema(Box<Schema>),
}

impl SchemaOrRef {
    pub fn as_ref_path(&self) -> Option<&str> {
        match self {
            SchemaOrRef::Ref { ref_path, .. } => Some(ref_path),
            SchemaOrRef::Schema(_) => None,
        }
    }

    /// Whether this edge is a navigation property, whichever form it takes.
    pub fn is_navigation(&self) -> bool {
        match self {
            SchemaOrRef::Ref {
                navigation_property,
                ..
            } => navigation_property.unwrap_or(false),
            SchemaOrRef::Schema(schema) => schema.is_navigation(),
        }
    }

    pub fn as_schema(&self) -> Option<&Schema> {
        match self {
            SchemaOrRef::Ref { .. } => None,
            SchemaOrRef::Schema(schema) => Some(schema),
        }
    }
}

/// A JSON Schema object as Microsoft Graph's OpenAPI description uses it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<TypeSet>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, SchemaOrRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaOrRef>>,

    #[serde(rename = "allOf", default, skip_serializing_if = "Vec::is_empty")]
    pub all_of: Vec<SchemaOrRef>,

    #[serde(rename = "oneOf", default, skip_serializing_if = "Vec::is_empty")]
    pub one_of: Vec<SchemaOrRef>,

    #[serde(rename = "anyOf", default, skip_serializing_if = "Vec::is_empty")]
    pub any_of: Vec<SchemaOrRef>,

    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<serde_json::Value>,

    /// Graph marks relationship edges with this extension.
    #[serde(
        rename = "x-ms-navigationProperty",
        skip_serializing_if = "Option::is_none"
    )]
    pub navigation_property: Option<bool>,
}

impl Schema {
    pub fn is_navigation(&self) -> bool {
        self.navigation_property.unwrap_or(false)
    }

    pub fn primary_type(&self) -> Option<SchemaType> {
        self.schema_type.as_ref().and_then(TypeSet::primary)
    }
}
