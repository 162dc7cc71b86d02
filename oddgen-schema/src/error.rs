//! Error types for schema loading, model building and configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for loading the schema document into a tree.
#[derive(Debug, Error)]
pub enum ParseError {
    /// XML parsing error.
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed or duplicated attribute.
    #[error("XML attribute error: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    /// Text decoding error.
    #[error("XML encoding error: {0}")]
    Encoding(#[from] quick_xml::encoding::EncodingError),

    /// A prefix is used without a namespace declaration in scope.
    #[error("undeclared namespace prefix '{prefix}'")]
    UnknownPrefix {
        /// The prefix.
        prefix: String,
    },

    /// A general entity reference that is not predefined.
    #[error("unknown entity reference '&{name};'")]
    UnknownEntity {
        /// Entity name.
        name: String,
    },

    /// Invalid document structure.
    #[error("invalid document structure: {message}")]
    InvalidStructure {
        /// Error message.
        message: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

/// Error type for building the schema model.
///
/// Every variant other than `Parse` and `Validation` is a structure error: a
/// node the model needs exactly once is missing or duplicated.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Parsing error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Missing required attribute on a spec node.
    #[error("missing required attribute '{attribute}' on '{element}'")]
    MissingAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
    },

    /// Duplicate definition.
    #[error("duplicate {kind} definition: '{name}'")]
    DuplicateDefinition {
        /// Kind of definition (classSpec, elementSpec, ...).
        kind: String,
        /// Name of the duplicate.
        name: String,
    },

    /// A reference names a definition that does not exist.
    #[error("{kind} '{name}' referenced from '{context}' is not defined")]
    MissingDefinition {
        /// Kind of definition expected.
        kind: String,
        /// Referenced name.
        name: String,
        /// Where the reference appears.
        context: String,
    },

    /// Attribute ident uses a namespace prefix outside the known table.
    #[error("unknown namespace prefix '{prefix}' on attribute '{attribute}'")]
    UnknownNamespacePrefix {
        /// The prefix.
        prefix: String,
        /// Full attribute ident.
        attribute: String,
    },

    /// Invalid schema structure.
    #[error("invalid schema structure: {message}")]
    InvalidStructure {
        /// Error message.
        message: String,
    },

    /// Generation-time validation failure.
    #[error("validation error: {message}")]
    Validation {
        /// Error message.
        message: String,
    },
}

impl SchemaError {
    /// Creates a missing attribute error.
    pub fn missing_attr(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingAttribute {
            element: element.into(),
            attribute: attribute.into(),
        }
    }

    /// Creates a duplicate definition error.
    pub fn duplicate(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateDefinition {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Creates a missing definition error.
    pub fn missing(
        kind: impl Into<String>,
        name: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self::MissingDefinition {
            kind: kind.into(),
            name: name.into(),
            context: context.into(),
        }
    }
}

/// Error type for the override configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("cannot read configuration '{}': {source}", path.display())]
    Read {
        /// Configuration path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// Configuration is not valid YAML for the expected layout.
    #[error("malformed configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A value is present but unusable.
    #[error("invalid configuration value for '{key}': {message}")]
    Invalid {
        /// Configuration key.
        key: String,
        /// Error message.
        message: String,
    },
}

impl ConfigError {
    /// Creates an invalid value error.
    pub fn invalid(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            key: key.into(),
            message: message.into(),
        }
    }
}
