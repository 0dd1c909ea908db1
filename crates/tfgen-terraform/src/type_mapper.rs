use tfgen_core::ir::{Conversion, Declaration, ElementType, FieldType};

/// Map a declaration shape to its terraform-plugin-framework attribute type.
pub fn attribute_kind(declaration: Declaration) -> &'static str {
    match declaration {
        Declaration::String => "schema.StringAttribute",
        Declaration::Bool => "schema.BoolAttribute",
        Declaration::Int64 => "schema.Int64Attribute",
        Declaration::Float64 => "schema.Float64Attribute",
        Declaration::List(_) => "schema.ListAttribute",
        Declaration::SingleNested | Declaration::EmptyNested => "schema.SingleNestedAttribute",
        Declaration::ListNested => "schema.ListNestedAttribute",
    }
}

/// Map a list element type to its `attr.Type` value.
pub fn element_type(element: ElementType) -> &'static str {
    match element {
        ElementType::String => "types.StringType",
        ElementType::Bool => "types.BoolType",
        ElementType::Int64 => "types.Int64Type",
        ElementType::Float64 => "types.Float64Type",
    }
}

/// Go type of a model struct field. Nested objects use the generated struct.
pub fn field_type(field: FieldType, nested_struct: &str) -> String {
    match field {
        FieldType::String => "types.String".to_string(),
        FieldType::Bool => "types.Bool".to_string(),
        FieldType::Int64 => "types.Int64".to_string(),
        FieldType::Float64 => "types.Float64".to_string(),
        FieldType::List(_) => "types.List".to_string(),
        FieldType::Object => format!("*{nested_struct}"),
        FieldType::ObjectList => format!("[]{nested_struct}"),
        FieldType::Placeholder => "types.Object".to_string(),
    }
}

/// Expression for the unset state of a field.
pub fn null_value(field: FieldType) -> String {
    match field {
        FieldType::String => "types.StringNull()".to_string(),
        FieldType::Bool => "types.BoolNull()".to_string(),
        FieldType::Int64 => "types.Int64Null()".to_string(),
        FieldType::Float64 => "types.Float64Null()".to_string(),
        FieldType::List(element) => format!("types.ListNull({})", element_type(element)),
        FieldType::Object | FieldType::ObjectList => "nil".to_string(),
        FieldType::Placeholder => "types.ObjectNull(map[string]attr.Type{})".to_string(),
    }
}

/// Expression converting an SDK value into a framework value.
///
/// Scalar accessors return pointers, list elements are plain values, so
/// `pointer` controls whether `operand` is dereferenced.
pub fn value_expression(
    element: ElementType,
    conversion: Conversion,
    operand: &str,
    pointer: bool,
) -> String {
    let value = if pointer {
        format!("*{operand}")
    } else {
        operand.to_string()
    };
    match (element, conversion) {
        (ElementType::String, Conversion::Stringify) => {
            format!("types.StringValue({operand}.String())")
        }
        (ElementType::String, Conversion::Bytes) => format!("types.StringValue(string({operand}))"),
        (ElementType::String, _) => format!("types.StringValue({value})"),
        (ElementType::Bool, _) => format!("types.BoolValue({value})"),
        (ElementType::Int64, Conversion::Widen) => format!("types.Int64Value(int64({value}))"),
        (ElementType::Int64, _) => format!("types.Int64Value({value})"),
        (ElementType::Float64, Conversion::Widen) => {
            format!("types.Float64Value(float64({value}))")
        }
        (ElementType::Float64, _) => format!("types.Float64Value({value})"),
    }
}

/// Value stored for an opaque object that was present in the response.
pub fn placeholder_value() -> &'static str {
    "types.ObjectValueMust(map[string]attr.Type{}, map[string]attr.Value{})"
}
