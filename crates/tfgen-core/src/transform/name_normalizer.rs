use heck::{ToLowerCamelCase, ToPascalCase, ToSnakeCase};

use crate::ir::NormalizedName;

/// Create a `NormalizedName` from an arbitrary string, computing all casing variants.
pub fn normalize_name(name: &str) -> NormalizedName {
    let sanitized = sanitize_identifier(name);

    NormalizedName {
        original: name.to_string(),
        pascal_case: sanitized.to_pascal_case(),
        camel_case: sanitized.to_lower_camel_case(),
        snake_case: sanitized.to_snake_case(),
    }
}

/// Sanitize a string to be a valid identifier.
fn sanitize_identifier(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut prev_was_separator = false;

    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if prev_was_separator && !result.is_empty() {
                result.push('_');
            }
            result.push(ch);
            prev_was_separator = false;
        } else {
            prev_was_separator = true;
        }
    }

    if result.is_empty() {
        return "unnamed".to_string();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_property_name() {
        let n = normalize_name("onPremisesSamAccountName");
        assert_eq!(n.pascal_case, "OnPremisesSamAccountName");
        assert_eq!(n.camel_case, "onPremisesSamAccountName");
        assert_eq!(n.snake_case, "on_premises_sam_account_name");
    }

    #[test]
    fn test_odata_annotation() {
        let n = normalize_name("@odata.type");
        assert_eq!(n.pascal_case, "OdataType");
        assert_eq!(n.snake_case, "odata_type");
    }

    #[test]
    fn test_kebab_case() {
        let n = normalize_name("user-id");
        assert_eq!(n.pascal_case, "UserId");
        assert_eq!(n.camel_case, "userId");
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(normalize_name("$").snake_case, "unnamed");
    }
}
