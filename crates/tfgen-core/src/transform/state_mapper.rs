use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::ir::{Conversion, ElementType, EmissionRule, Extraction, FieldType, SchemaObject};
use crate::ir::{SchemaProperty, emission_rule};

/// A state value as the generated mapping code would produce it.
///
/// `Null` is the explicit unset state: absent or null response fields never
/// become zero values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StateValue {
    Null,
    String(String),
    Bool(bool),
    Int64(i64),
    Float64(f64),
    List(Vec<StateValue>),
    Object(IndexMap<String, StateValue>),
}

impl StateValue {
    pub fn is_null(&self) -> bool {
        matches!(self, StateValue::Null)
    }

    /// Field of an object value, `None` for other values.
    pub fn get(&self, name: &str) -> Option<&StateValue> {
        match self {
            StateValue::Object(fields) => fields.get(name),
            _ => None,
        }
    }
}

/// Map a JSON response body onto the state tree of `schema`, applying the
/// same rule table the mapping emitter uses.
pub fn map_response(schema: &SchemaObject, response: &Value) -> StateValue {
    match response {
        Value::Object(_) => map_object(schema, response),
        _ => StateValue::Null,
    }
}

fn map_object(schema: &SchemaObject, value: &Value) -> StateValue {
    let fields = schema
        .properties
        .iter()
        .map(|property| {
            let mapped = match value.get(&property.name) {
                None | Some(Value::Null) => StateValue::Null,
                Some(v) => map_property(property, &emission_rule(property), v),
            };
            (property.name.clone(), mapped)
        })
        .collect();
    StateValue::Object(fields)
}

fn map_property(property: &SchemaProperty, rule: &EmissionRule, value: &Value) -> StateValue {
    let nested = property.nested.as_ref();
    match (rule.extraction, value) {
        (Extraction::Scalar(conversion), _) => convert(scalar_type(rule.field), conversion, value),
        (Extraction::List(conversion), Value::Array(items)) => {
            let element = match rule.field {
                FieldType::List(element) => element,
                _ => ElementType::String,
            };
            StateValue::List(
                items
                    .iter()
                    .filter(|item| !item.is_null())
                    .map(|item| convert(element, conversion, item))
                    .collect(),
            )
        }
        (Extraction::Nested, Value::Object(_)) => match nested {
            Some(schema) => map_object(schema, value),
            None => StateValue::Null,
        },
        (Extraction::NestedList, Value::Array(items)) => match nested {
            Some(schema) => StateValue::List(
                items
                    .iter()
                    .filter(|item| item.is_object())
                    .map(|item| map_object(schema, item))
                    .collect(),
            ),
            None => StateValue::Null,
        },
        (Extraction::Placeholder, Value::Object(_)) => StateValue::Object(IndexMap::new()),
        _ => {
            log::warn!(
                "{}: response value does not match {:?}, leaving unset",
                property.name,
                rule.extraction
            );
            StateValue::Null
        }
    }
}

fn scalar_type(field: FieldType) -> ElementType {
    match field {
        FieldType::Bool => ElementType::Bool,
        FieldType::Int64 => ElementType::Int64,
        FieldType::Float64 => ElementType::Float64,
        _ => ElementType::String,
    }
}

/// Convert one wire value. JSON already carries formatted values and bytes
/// as strings, so `Stringify` and `Bytes` only differ from `Direct` for
/// non-string input.
fn convert(element: ElementType, conversion: Conversion, value: &Value) -> StateValue {
    match (element, value) {
        (ElementType::String, Value::String(s)) => StateValue::String(s.clone()),
        (ElementType::String, other) if conversion != Conversion::Direct => {
            StateValue::String(other.to_string())
        }
        (ElementType::Bool, Value::Bool(b)) => StateValue::Bool(*b),
        (ElementType::Int64, Value::Number(n)) => {
            n.as_i64().map(StateValue::Int64).unwrap_or(StateValue::Null)
        }
        (ElementType::Float64, Value::Number(n)) => {
            n.as_f64().map(StateValue::Float64).unwrap_or(StateValue::Null)
        }
        _ => StateValue::Null,
    }
}
