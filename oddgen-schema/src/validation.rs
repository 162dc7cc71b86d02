//! Generation-time validation.
//!
//! Enumerations whose literals collide after sanitization, or whose names
//! are not valid Rust identifiers, cannot be emitted. Callers drop them.

use crate::error::SchemaError;
use crate::ir::EnumDef;
use crate::naming::is_identifier_fragment;
use std::collections::HashSet;

/// Validates an enumeration before emission.
///
/// # Errors
/// Returns `SchemaError::Validation` describing the first problem found.
pub fn check_data_type(def: &EnumDef) -> Result<(), SchemaError> {
    if !is_type_name(&def.name) {
        return Err(SchemaError::Validation {
            message: format!("'{}' is not a valid type name", def.name),
        });
    }

    let mut seen = HashSet::new();
    seen.insert(def.none_literal());
    seen.insert(def.max_literal());

    for literal in &def.literals {
        if !is_identifier_fragment(&literal.ident) {
            return Err(SchemaError::Validation {
                message: format!(
                    "literal '{}' of '{}' is not a valid identifier",
                    literal.value, def.name
                ),
            });
        }
        if !seen.insert(literal.ident.clone()) {
            return Err(SchemaError::Validation {
                message: format!(
                    "literal '{}' collides with '{}' in '{}'",
                    literal.value, literal.ident, def.name
                ),
            });
        }
    }

    Ok(())
}

fn is_type_name(name: &str) -> bool {
    is_identifier_fragment(name) && name.chars().next().is_some_and(|c| !c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::EnumLiteral;

    fn enum_def(name: &str, values: &[&str]) -> EnumDef {
        let prefix = name.strip_prefix("data_").unwrap_or(name).to_string();
        EnumDef {
            name: name.to_string(),
            schema_name: name.replace('_', "."),
            literals: values
                .iter()
                .map(|v| EnumLiteral {
                    value: (*v).to_string(),
                    ident: format!("{prefix}_{}", crate::naming::sanitize_literal(v)),
                })
                .collect(),
            prefix,
            alternate: false,
        }
    }

    #[test]
    fn test_valid_enum() {
        let def = enum_def("data_BOOLEAN", &["true", "false"]);
        assert!(check_data_type(&def).is_ok());
        let def = enum_def("data_PITCH", &["4.5", "C+"]);
        assert!(check_data_type(&def).is_ok());
    }

    #[test]
    fn test_collision_is_rejected() {
        let def = enum_def("data_CLASH", &["a.b", "a-b"]);
        let err = check_data_type(&def).expect_err("should collide");
        assert!(err.to_string().contains("collides"));
        assert!(matches!(err, SchemaError::Validation { .. }));
    }

    #[test]
    fn test_reserved_literal_is_rejected() {
        let def = enum_def("data_MODE", &["NONE"]);
        assert!(check_data_type(&def).is_err());
    }

    #[test]
    fn test_invalid_identifier_is_rejected() {
        let def = enum_def("data_SPACE", &["a b"]);
        assert!(check_data_type(&def).is_err());
        let def = enum_def("data.DOTTED", &["x"]);
        assert!(check_data_type(&def).is_err());
    }
}
