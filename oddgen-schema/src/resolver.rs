//! Attribute type resolution.
//!
//! Determines the semantic type, default value expression and converter pair
//! of every attribute, consulting configuration overrides before the
//! datatype construct captured from the schema.

use crate::config::{GeneratorConfig, ScalarValue};
use crate::ir::collect_enums;
use crate::model::{Attribute, SchemaModel};
use crate::naming::{
    converter_base, converter_pair, formatted_type, is_identifier_fragment, scoped_list_name,
    to_snake_case, value_prefix,
};
use std::collections::BTreeSet;
use std::fmt;

/// Built-in datatypes resolved to `int`.
const INTEGER_TYPES: &[&str] = &[
    "integer",
    "positiveInteger",
    "nonNegativeInteger",
    "negativeInteger",
    "nonPositiveInteger",
    "int",
    "long",
    "short",
];

/// Built-in datatypes resolved to `double`.
const DECIMAL_TYPES: &[&str] = &["decimal", "double", "float"];

/// Semantic type of an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AttType {
    /// 32-bit integer with an unset sentinel.
    Int,
    /// 64-bit float.
    Double,
    /// Single character.
    Char,
    /// Text.
    Str,
    /// Enumeration, by formatted type name.
    Enum(String),
    /// Enumeration with explicit presence tracking.
    AlternateEnum(String),
}

impl AttType {
    /// Returns the Rust type of a member holding this type.
    #[must_use]
    pub fn rust_type(&self) -> String {
        match self {
            Self::Int => "i32".to_string(),
            Self::Double => "f64".to_string(),
            Self::Char => "char".to_string(),
            Self::Str => "String".to_string(),
            Self::Enum(name) => name.clone(),
            Self::AlternateEnum(name) => format!("Alternate<{name}>"),
        }
    }

    /// Returns true if presence is tracked explicitly.
    #[must_use]
    pub const fn is_alternate(&self) -> bool {
        matches!(self, Self::AlternateEnum(_))
    }
}

impl fmt::Display for AttType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int => f.write_str("int"),
            Self::Double => f.write_str("double"),
            Self::Char => f.write_str("char"),
            Self::Str => f.write_str("string"),
            Self::Enum(name) | Self::AlternateEnum(name) => f.write_str(name),
        }
    }
}

/// Resolution of one attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAttribute {
    /// Semantic type.
    pub ty: AttType,
    /// Default value as a Rust expression.
    pub default: String,
    /// Converter pair `(StrTo{base}, {base}ToStr)`.
    pub converters: (String, String),
}

impl ResolvedAttribute {
    /// Returns the snake_case name of the read converter method.
    #[must_use]
    pub fn read_fn(&self) -> String {
        to_snake_case(&self.converters.0)
    }

    /// Returns the snake_case name of the write converter method.
    #[must_use]
    pub fn write_fn(&self) -> String {
        to_snake_case(&self.converters.1)
    }
}

/// Resolves attribute types against the configuration and emitted enums.
#[derive(Debug)]
pub struct TypeResolver<'a> {
    config: &'a GeneratorConfig,
    enums: BTreeSet<String>,
}

impl<'a> TypeResolver<'a> {
    /// Creates a resolver for a model, computing the emitted enumerations.
    #[must_use]
    pub fn new(model: &SchemaModel, config: &'a GeneratorConfig) -> Self {
        let enums = collect_enums(model, config)
            .into_iter()
            .map(|e| e.name)
            .collect();
        Self::with_enums(config, enums)
    }

    /// Creates a resolver from a known set of emitted enumeration names.
    #[must_use]
    pub const fn with_enums(config: &'a GeneratorConfig, enums: BTreeSet<String>) -> Self {
        Self { config, enums }
    }

    /// Resolves the attribute of `owner` (a class or element) in `module`.
    #[must_use]
    pub fn resolve(&self, module: &str, owner: &str, attribute: &Attribute) -> ResolvedAttribute {
        let overrides = self
            .config
            .attribute_override(module, owner, &attribute.ident)
            .or_else(|| {
                self.config
                    .attribute_override(module, owner, &attribute.wire_name)
            });

        let (ty, schema_name) = match overrides.and_then(|o| o.ty.as_deref()) {
            Some(target) => (self.classify(target, target, attribute), target.to_string()),
            None => self.infer(owner, attribute),
        };
        let override_default = overrides.and_then(|o| o.default.as_ref());
        let default = self.default_for(&ty, &schema_name, override_default);
        let converters = converters_for(&ty);

        ResolvedAttribute {
            ty,
            default,
            converters,
        }
    }

    /// Infers the type from the schema hint.
    ///
    /// Returns the type and the schema-level name it was resolved from.
    fn infer(&self, owner: &str, attribute: &Attribute) -> (AttType, String) {
        let hint = &attribute.hint;
        if let Some(data) = hint.data_name.as_deref() {
            if INTEGER_TYPES.contains(&data) {
                return (AttType::Int, data.to_string());
            }
            if DECIMAL_TYPES.contains(&data) {
                return (AttType::Double, data.to_string());
            }
        }
        if let Some(reference) = hint.reference.as_deref() {
            let formatted = self
                .config
                .mapped
                .get(reference)
                .cloned()
                .unwrap_or_else(|| formatted_type(reference));
            return (self.classify(reference, &formatted, attribute), reference.to_string());
        }
        if hint.closed_list && owner.starts_with("att.") {
            let scoped = scoped_list_name(owner, &attribute.schema_ident);
            let key = format!("{owner}@{}", attribute.schema_ident);
            return (self.classify(&key, &scoped, attribute), key);
        }
        tracing::debug!(
            owner,
            attribute = %attribute.wire_name,
            "No override or datatype hint, using string"
        );
        (AttType::Str, String::new())
    }

    /// Maps a target type name to a semantic type.
    fn classify(&self, name: &str, formatted: &str, attribute: &Attribute) -> AttType {
        match formatted {
            "int" => return AttType::Int,
            "double" => return AttType::Double,
            "char" => return AttType::Char,
            "string" | "String" | "std::string" => return AttType::Str,
            _ => {}
        }

        let known = self.enums.contains(formatted) || self.config.is_excluded(name, formatted);
        if !known {
            tracing::debug!(
                attribute = %attribute.wire_name,
                datatype = formatted,
                "No enumeration emitted for datatype, using string"
            );
            return AttType::Str;
        }
        if self.config.is_alternate(name, formatted) {
            AttType::AlternateEnum(formatted.to_string())
        } else {
            AttType::Enum(formatted.to_string())
        }
    }

    fn default_for(
        &self,
        ty: &AttType,
        schema_name: &str,
        override_default: Option<&ScalarValue>,
    ) -> String {
        match ty {
            AttType::Int => match override_default {
                Some(ScalarValue::Float(v)) => format!("{}", *v as i64),
                Some(value) => value.to_string(),
                None => "oddgen_core::UNSET".to_string(),
            },
            AttType::Double => match override_default {
                Some(ScalarValue::Int(v)) => format!("{v}.0"),
                Some(value) => value.to_string(),
                None => "0.0".to_string(),
            },
            AttType::Char => match override_default {
                Some(ScalarValue::Int(v)) => {
                    let c = u32::try_from(*v).ok().and_then(char::from_u32).unwrap_or('\0');
                    format!("{c:?}")
                }
                Some(ScalarValue::Str(v)) if v.chars().count() == 1 => format!("'{v}'"),
                Some(value) => value.to_string(),
                None => "'\\0'".to_string(),
            },
            AttType::Str => "String::new()".to_string(),
            AttType::Enum(name) => {
                let value = override_default
                    .map(ToString::to_string)
                    .or_else(|| {
                        self.config
                            .type_default(schema_name, name)
                            .map(ToString::to_string)
                    })
                    .unwrap_or_else(|| format!("{}_NONE", value_prefix(name)));
                qualify_literal(name, &value)
            }
            AttType::AlternateEnum(_) => "Alternate::empty()".to_string(),
        }
    }
}

/// Qualifies a bare literal name with its enumeration type.
fn qualify_literal(type_name: &str, value: &str) -> String {
    if is_identifier_fragment(value) {
        format!("{type_name}::{value}")
    } else {
        value.to_string()
    }
}

fn converters_for(ty: &AttType) -> (String, String) {
    let (read, write) = match ty {
        AttType::Int => ("StrToInt", "IntToStr"),
        AttType::Double => ("StrToDbl", "DblToStr"),
        AttType::Char => ("StrToChar", "CharToStr"),
        AttType::Str => ("StrToStr", "StrToStr"),
        AttType::Enum(name) | AttType::AlternateEnum(name) => {
            return converter_pair(&converter_base(name));
        }
    };
    (read.to_string(), write.to_string())
}
