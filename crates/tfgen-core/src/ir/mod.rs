pub mod emission;
pub mod names;
pub mod paths;
pub mod schemas;

pub use emission::{
    Conversion, Declaration, ElementType, EmissionRule, Extraction, FieldType, emission_rule,
};
pub use names::NormalizedName;
pub use paths::{GetOperation, PathObject};
pub use schemas::{Classification, PrimitiveType, SchemaKind, SchemaObject, SchemaProperty};
