use crate::error::{Location, ResolveError};
use crate::ir::{PrimitiveType, SchemaObject, SchemaProperty};
use crate::parse::schema::{Schema, SchemaOrRef, SchemaType};

use super::document::{Document, parse_ref_name};

/// The type discriminator Graph declares on every entity. Never data.
const DISCRIMINATOR: &str = "@odata.type";

/// Resolves named schemas into finite, ordered property trees.
///
/// Navigation properties are the cut points of Graph's cyclic type graph;
/// a visited stack per resolution catches any cycle that slips past them.
pub struct SchemaResolver<'a> {
    document: &'a Document,
}

/// Schema names on the path from the root currently being resolved.
#[derive(Debug, Default)]
struct ResolutionPath {
    stack: Vec<String>,
}

impl ResolutionPath {
    fn describe(&self, next: &str) -> String {
        let mut chain = self.stack.join(" -> ");
        chain.push_str(" -> ");
        chain.push_str(next);
        chain
    }
}

impl<'a> SchemaResolver<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self { document }
    }

    /// Resolve a named component schema.
    pub fn resolve(&self, name: &str) -> Result<SchemaObject, ResolveError> {
        log::debug!("resolving schema {name}");
        let mut path = ResolutionPath::default();
        self.resolve_named(name, &Location::new(name), &mut path)
    }

    /// Resolve a schema reached by reference or declared inline, e.g. a
    /// response body. `context` names the caller for error reporting.
    pub fn resolve_inline(
        &self,
        context: &str,
        schema: &SchemaOrRef,
    ) -> Result<SchemaObject, ResolveError> {
        let mut path = ResolutionPath::default();
        self.resolve_member(schema, &Location::new(context), &mut path)
    }

    fn resolve_named(
        &self,
        name: &str,
        referrer: &Location,
        path: &mut ResolutionPath,
    ) -> Result<SchemaObject, ResolveError> {
        let schema = self
            .document
            .schema(name)
            .ok_or_else(|| ResolveError::unresolvable(referrer.clone(), name))?;

        if path.stack.iter().any(|visited| visited == name) {
            return Err(ResolveError::unsupported(
                referrer.clone(),
                format!("cyclic reference {}", path.describe(name)),
            ));
        }

        path.stack.push(name.to_string());
        let resolved = match schema {
            // A component that only aliases another one.
            SchemaOrRef::Ref { ref_path, .. } => {
                self.resolve_ref(ref_path, &Location::new(name), path)
            }
            SchemaOrRef::Schema(s) => self.resolve_schema(name, s, path),
        };
        path.stack.pop();
        resolved
    }

    fn resolve_ref(
        &self,
        ref_path: &str,
        referrer: &Location,
        path: &mut ResolutionPath,
    ) -> Result<SchemaObject, ResolveError> {
        let name = parse_ref_name(ref_path, "schemas")
            .ok_or_else(|| ResolveError::unresolvable(referrer.clone(), ref_path))?;
        self.resolve_named(name, referrer, path)
    }

    fn resolve_member(
        &self,
        member: &SchemaOrRef,
        referrer: &Location,
        path: &mut ResolutionPath,
    ) -> Result<SchemaObject, ResolveError> {
        match member {
            SchemaOrRef::Ref { ref_path, .. } => self.resolve_ref(ref_path, referrer, path),
            SchemaOrRef::Schema(s) => self.resolve_schema(&referrer.to_string(), s, path),
        }
    }

    /// Titled schemas are resolved directly; untitled ones must be an
    /// `allOf: [parent, extension]` composition.
    fn resolve_schema(
        &self,
        subject: &str,
        schema: &Schema,
        path: &mut ResolutionPath,
    ) -> Result<SchemaObject, ResolveError> {
        if let Some(title) = schema.title.as_deref() {
            if !schema.enum_values.is_empty() {
                return Ok(SchemaObject::enumeration(title, enum_strings(schema)));
            }
            let properties = self.classify_properties(subject, schema, path)?;
            return Ok(SchemaObject::object(title, properties));
        }

        match schema.all_of.as_slice() {
            [parent, extension] => self.resolve_composition(subject, parent, extension, path),
            _ => Err(ResolveError::unsupported(
                Location::new(subject),
                "schema has neither a title nor a two-element allOf composition",
            )),
        }
    }

    /// Inherited properties first in the parent's order, then the
    /// extension's own. The concatenation is not re-sorted.
    fn resolve_composition(
        &self,
        subject: &str,
        parent: &SchemaOrRef,
        extension: &SchemaOrRef,
        path: &mut ResolutionPath,
    ) -> Result<SchemaObject, ResolveError> {
        let extension = extension.as_schema().ok_or_else(|| {
            ResolveError::unsupported(
                Location::new(subject),
                "allOf extension must be an inline schema",
            )
        })?;

        let inherited = self.resolve_member(parent, &Location::new(subject), path)?;
        let mut properties = inherited.properties;
        properties.extend(self.classify_properties(subject, extension, path)?);

        let title = extension.title.clone().unwrap_or_default();
        log::trace!(
            "{subject}: composed '{}' with {} properties",
            inherited.title,
            properties.len()
        );
        Ok(SchemaObject::object(title, properties))
    }

    /// Classify a schema's own declared properties, in name order.
    fn classify_properties(
        &self,
        subject: &str,
        schema: &Schema,
        path: &mut ResolutionPath,
    ) -> Result<Vec<SchemaProperty>, ResolveError> {
        let mut names: Vec<&String> = schema.properties.keys().collect();
        names.sort();

        let mut properties = Vec::with_capacity(names.len());
        for name in names {
            if name == DISCRIMINATOR {
                continue;
            }
            let location = Location::new(subject).with_property(name.as_str());
            let declared = &schema.properties[name];
            if declared.is_navigation() {
                log::trace!("{location}: skipping navigation property");
                continue;
            }
            let property = match declared {
                SchemaOrRef::Ref { ref_path, .. } => {
                    let nested = self.resolve_ref(ref_path, &location, path)?;
                    single_reference(name, nested)
                }
                SchemaOrRef::Schema(s) => self.classify_property(name, s, &location, path)?,
            };
            log::trace!("{location}: {}", property.classification);
            properties.push(property);
        }
        Ok(properties)
    }

    fn classify_property(
        &self,
        name: &str,
        schema: &Schema,
        location: &Location,
        path: &mut ResolutionPath,
    ) -> Result<SchemaProperty, ResolveError> {
        let schema_type = schema.primary_type();
        if schema_type == Some(SchemaType::Array) {
            return self.classify_array(name, schema, location, path);
        }
        if let Some(primitive) = schema_type.and_then(PrimitiveType::from_schema_type) {
            return Ok(SchemaProperty::primitive(
                name,
                primitive,
                schema.format.clone(),
            ));
        }

        if let Some(member) = singleton_member(schema, location)? {
            let nested = self.resolve_member(member, location, path)?;
            return Ok(single_reference(name, nested));
        }
        if !schema.properties.is_empty() || !schema.all_of.is_empty() {
            return Err(ResolveError::unsupported(
                location.clone(),
                "inline object shapes are not supported, declare a named schema",
            ));
        }
        Ok(SchemaProperty::opaque(name))
    }

    fn classify_array(
        &self,
        name: &str,
        schema: &Schema,
        location: &Location,
        path: &mut ResolutionPath,
    ) -> Result<SchemaProperty, ResolveError> {
        let member = match schema.items.as_deref() {
            Some(items @ SchemaOrRef::Ref { .. }) => Some(items),
            Some(SchemaOrRef::Schema(item)) => singleton_member(item, location)?,
            None => None,
        };

        if let Some(member) = member {
            let nested = self.resolve_member(member, location, path)?;
            return Ok(if nested.is_enum() {
                SchemaProperty::enum_array(name, nested)
            } else {
                SchemaProperty::object_array(name, nested)
            });
        }

        let item = schema.items.as_deref().and_then(SchemaOrRef::as_schema);
        if item.is_some_and(|i| !i.properties.is_empty() || !i.all_of.is_empty()) {
            return Err(ResolveError::unsupported(
                location.clone(),
                "inline array item shapes are not supported, declare a named schema",
            ));
        }
        let primitive = item
            .and_then(Schema::primary_type)
            .and_then(PrimitiveType::from_schema_type);
        if primitive.is_none() {
            log::warn!("{location}: array items declare no primitive type, treating as strings");
        }
        let format = item.and_then(|i| i.format.clone());
        Ok(SchemaProperty::primitive_array(name, primitive, format))
    }
}

/// A property holding exactly one related value: an object, or an enum member.
fn single_reference(name: &str, nested: SchemaObject) -> SchemaProperty {
    if nested.is_enum() {
        SchemaProperty::enumeration(name, nested)
    } else {
        SchemaProperty::object(name, nested)
    }
}

/// The one member of a polymorphic singleton union, if the schema is one.
///
/// Graph pairs the real member with a bare `{type: object, nullable: true}`
/// placeholder; placeholders do not count as members. A union with several
/// real members has no single shape to resolve to.
fn singleton_member<'s>(
    schema: &'s Schema,
    location: &Location,
) -> Result<Option<&'s SchemaOrRef>, ResolveError> {
    let members: Vec<&SchemaOrRef> = schema
        .any_of
        .iter()
        .chain(&schema.one_of)
        .filter(|m| !is_null_placeholder(m))
        .collect();
    match members.as_slice() {
        [] => Ok(None),
        [member] => Ok(Some(*member)),
        _ => Err(ResolveError::unsupported(
            location.clone(),
            format!("union of {} members is not supported", members.len()),
        )),
    }
}

fn is_null_placeholder(member: &SchemaOrRef) -> bool {
    let Some(s) = member.as_schema() else {
        return false;
    };
    s.title.is_none()
        && s.properties.is_empty()
        && s.items.is_none()
        && s.all_of.is_empty()
        && s.any_of.is_empty()
        && s.one_of.is_empty()
        && s.enum_values.is_empty()
        && matches!(
            s.primary_type(),
            None | Some(SchemaType::Object) | Some(SchemaType::Null)
        )
}

/// Enum members as strings; non-string members are stringified with a warning.
pub(super) fn enum_strings(schema: &Schema) -> Vec<String> {
    schema
        .enum_values
        .iter()
        .map(|v| match v {
            serde_json::Value::String(s) => s.clone(),
            other => {
                log::warn!("non-string enum value {other} rendered as a string");
                other.to_string()
            }
        })
        .collect()
}
