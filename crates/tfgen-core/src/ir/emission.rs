//! The attribute rule table.
//!
//! Declaration, model field and response mapping all come from one
//! [`EmissionRule`] per property, so the three emitted artifacts cannot
//! disagree about a property's shape.

use serde::Serialize;

use super::schemas::{Classification, PrimitiveType, SchemaProperty};

/// Wire formats whose SDK value is not a plain string and must be rendered
/// with its `String()` method.
const STRINGIFY_FORMATS: &[&str] = &["date-time", "date", "time", "uuid", "duration"];

/// Wire formats the SDK surfaces as raw bytes.
const BYTE_FORMATS: &[&str] = &["base64url", "byte"];

/// Integer formats the SDK surfaces narrower than 64 bits.
const NARROW_INTEGER_FORMATS: &[&str] = &["int32", "int16", "int8", "uint8"];

/// Number formats the SDK surfaces as 32-bit floats.
const NARROW_NUMBER_FORMATS: &[&str] = &["float"];

/// Element type of a list-of-primitive attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ElementType {
    String,
    Bool,
    Int64,
    Float64,
}

/// Attribute declaration shape in the schema emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Declaration {
    String,
    Bool,
    Int64,
    Float64,
    List(ElementType),
    SingleNested,
    ListNested,
    /// Nested attribute with no sub-attributes.
    EmptyNested,
}

/// Field type in the state model emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldType {
    String,
    Bool,
    Int64,
    Float64,
    List(ElementType),
    Object,
    ObjectList,
    Placeholder,
}

/// How one SDK value becomes a state value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Conversion {
    /// Dereference and assign.
    Direct,
    /// Call the value's `String()` method.
    Stringify,
    /// Widen to the 64-bit attribute type.
    Widen,
    /// Convert a byte slice to a string.
    Bytes,
}

/// Value-extraction strategy of the mapping emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Extraction {
    Scalar(Conversion),
    /// Iterate the source collection, converting each element.
    List(Conversion),
    /// Allocate the nested model and recurse into its properties.
    Nested,
    /// Iterate the source collection, recursing per element.
    NestedList,
    /// Allocate an empty value, nothing further to copy.
    Placeholder,
}

/// The single choice every emitter honours for a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmissionRule {
    pub declaration: Declaration,
    pub field: FieldType,
    pub extraction: Extraction,
}

impl EmissionRule {
    const fn new(declaration: Declaration, field: FieldType, extraction: Extraction) -> Self {
        Self {
            declaration,
            field,
            extraction,
        }
    }
}

/// Select the rule for a property from its classification, primitive type and format.
pub fn emission_rule(property: &SchemaProperty) -> EmissionRule {
    let format = property.format.as_deref();

    match property.classification {
        Classification::Primitive => {
            let (element, conversion) = scalar(property.primitive, format);
            EmissionRule::new(
                element.declaration(),
                element.field(),
                Extraction::Scalar(conversion),
            )
        }
        Classification::PrimitiveArray => {
            let (element, conversion) = if property.has_enum_elements() {
                (ElementType::String, Conversion::Stringify)
            } else {
                scalar(property.primitive, format)
            };
            EmissionRule::new(
                Declaration::List(element),
                FieldType::List(element),
                Extraction::List(conversion),
            )
        }
        Classification::Object => EmissionRule::new(
            Declaration::SingleNested,
            FieldType::Object,
            Extraction::Nested,
        ),
        Classification::ObjectArray => EmissionRule::new(
            Declaration::ListNested,
            FieldType::ObjectList,
            Extraction::NestedList,
        ),
        Classification::Enum => EmissionRule::new(
            Declaration::String,
            FieldType::String,
            Extraction::Scalar(Conversion::Stringify),
        ),
        Classification::OpaqueObject => EmissionRule::new(
            Declaration::EmptyNested,
            FieldType::Placeholder,
            Extraction::Placeholder,
        ),
    }
}

/// Element type and conversion for one primitive value.
fn scalar(primitive: Option<PrimitiveType>, format: Option<&str>) -> (ElementType, Conversion) {
    let has = |formats: &[&str]| format.is_some_and(|f| formats.contains(&f));

    match primitive {
        Some(PrimitiveType::Boolean) => (ElementType::Bool, Conversion::Direct),
        Some(PrimitiveType::Integer) if has(NARROW_INTEGER_FORMATS) => {
            (ElementType::Int64, Conversion::Widen)
        }
        Some(PrimitiveType::Integer) => (ElementType::Int64, Conversion::Direct),
        Some(PrimitiveType::Number) if has(NARROW_NUMBER_FORMATS) => {
            (ElementType::Float64, Conversion::Widen)
        }
        Some(PrimitiveType::Number) => (ElementType::Float64, Conversion::Direct),
        Some(PrimitiveType::String) | None if has(STRINGIFY_FORMATS) => {
            (ElementType::String, Conversion::Stringify)
        }
        Some(PrimitiveType::String) | None if has(BYTE_FORMATS) => {
            (ElementType::String, Conversion::Bytes)
        }
        Some(PrimitiveType::String) | None => (ElementType::String, Conversion::Direct),
    }
}

impl ElementType {
    fn declaration(self) -> Declaration {
        match self {
            ElementType::String => Declaration::String,
            ElementType::Bool => Declaration::Bool,
            ElementType::Int64 => Declaration::Int64,
            ElementType::Float64 => Declaration::Float64,
        }
    }

    fn field(self) -> FieldType {
        match self {
            ElementType::String => FieldType::String,
            ElementType::Bool => FieldType::Bool,
            ElementType::Int64 => FieldType::Int64,
            ElementType::Float64 => FieldType::Float64,
        }
    }
}
