use std::fmt;

use serde::Serialize;

use crate::parse::schema::SchemaType;

/// Whether a resolved schema is a plain object or a string enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    Object,
    Enum,
}

/// The resolved shape of one named or inline schema.
///
/// Properties are owned, never references: every nested object has been
/// flattened into its own `SchemaObject`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaObject {
    pub title: String,
    pub kind: SchemaKind,
    pub properties: Vec<SchemaProperty>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
}

impl SchemaObject {
    pub fn object(title: impl Into<String>, properties: Vec<SchemaProperty>) -> Self {
        Self {
            title: title.into(),
            kind: SchemaKind::Object,
            properties,
            enum_values: Vec::new(),
        }
    }

    pub fn enumeration(title: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            title: title.into(),
            kind: SchemaKind::Enum,
            properties: Vec::new(),
            enum_values: values,
        }
    }

    /// The empty shape used for open/extensible values.
    pub fn opaque() -> Self {
        Self::object("", Vec::new())
    }

    pub fn is_enum(&self) -> bool {
        self.kind == SchemaKind::Enum
    }

    pub fn property(&self, name: &str) -> Option<&SchemaProperty> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn property_names(&self) -> Vec<&str> {
        self.properties.iter().map(|p| p.name.as_str()).collect()
    }
}

/// How a property was resolved. Every emitter keys off this one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Classification {
    Primitive,
    PrimitiveArray,
    Object,
    ObjectArray,
    Enum,
    OpaqueObject,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Classification::Primitive => "Primitive",
            Classification::PrimitiveArray => "PrimitiveArray",
            Classification::Object => "Object",
            Classification::ObjectArray => "ObjectArray",
            Classification::Enum => "Enum",
            Classification::OpaqueObject => "OpaqueObject",
        };
        f.write_str(s)
    }
}

/// JSON primitive type of a `Primitive` value or `PrimitiveArray` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    String,
    Boolean,
    Integer,
    Number,
}

impl PrimitiveType {
    pub fn from_schema_type(schema_type: SchemaType) -> Option<Self> {
        match schema_type {
            SchemaType::String => Some(PrimitiveType::String),
            SchemaType::Boolean => Some(PrimitiveType::Boolean),
            SchemaType::Integer => Some(PrimitiveType::Integer),
            SchemaType::Number => Some(PrimitiveType::Number),
            SchemaType::Array | SchemaType::Object | SchemaType::Null => None,
        }
    }
}

/// One resolved field of a `SchemaObject`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaProperty {
    /// Wire name, camelCase as declared.
    pub name: String,
    pub classification: Classification,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primitive: Option<PrimitiveType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Set for `Object`, `ObjectArray`, `Enum` and `OpaqueObject`, and for a
    /// `PrimitiveArray` whose elements are enum members.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nested: Option<SchemaObject>,
}

impl SchemaProperty {
    pub fn primitive(
        name: impl Into<String>,
        primitive: PrimitiveType,
        format: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            classification: Classification::Primitive,
            primitive: Some(primitive),
            format,
            nested: None,
        }
    }

    pub fn primitive_array(
        name: impl Into<String>,
        primitive: Option<PrimitiveType>,
        format: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            classification: Classification::PrimitiveArray,
            primitive,
            format,
            nested: None,
        }
    }

    /// An array of enum members: a list of strings whose values come from `members`.
    pub fn enum_array(name: impl Into<String>, members: SchemaObject) -> Self {
        Self {
            name: name.into(),
            classification: Classification::PrimitiveArray,
            primitive: Some(PrimitiveType::String),
            format: None,
            nested: Some(members),
        }
    }

    pub fn object(name: impl Into<String>, nested: SchemaObject) -> Self {
        Self::with_nested(name, Classification::Object, nested)
    }

    pub fn object_array(name: impl Into<String>, nested: SchemaObject) -> Self {
        Self::with_nested(name, Classification::ObjectArray, nested)
    }

    pub fn enumeration(name: impl Into<String>, nested: SchemaObject) -> Self {
        Self::with_nested(name, Classification::Enum, nested)
    }

    pub fn opaque(name: impl Into<String>) -> Self {
        Self::with_nested(name, Classification::OpaqueObject, SchemaObject::opaque())
    }

    fn with_nested(
        name: impl Into<String>,
        classification: Classification,
        nested: SchemaObject,
    ) -> Self {
        Self {
            name: name.into(),
            classification,
            primitive: None,
            format: None,
            nested: Some(nested),
        }
    }

    /// True when the elements of a `PrimitiveArray` are enum members.
    pub fn has_enum_elements(&self) -> bool {
        self.classification == Classification::PrimitiveArray
            && self.nested.as_ref().is_some_and(SchemaObject::is_enum)
    }
}
