//! # oddgen Schema
//!
//! TEI-ODD schema loading, modeling and type resolution.
//!
//! This crate provides:
//! - Loading of compiled ODD documents into a namespace-resolved tree
//! - A normalized model of attribute classes, elements and enumerations
//! - Identifier formatting for the generated Rust code
//! - The override configuration and attribute type resolution
//! - Intermediate representation for code generation

pub mod builder;
pub mod config;
pub mod error;
pub mod ir;
pub mod model;
pub mod naming;
pub mod resolver;
pub mod tree;
pub mod validation;

pub use builder::{BuildOptions, build, build_with};
pub use config::{AttributeOverride, GeneratorConfig, ScalarValue};
pub use error::{ConfigError, ParseError, SchemaError};
pub use ir::{
    EnumDef, EnumLiteral, ResolvedClass, ResolvedElement, ResolvedMember, ResolvedModule,
    ResolvedSchema,
};
pub use model::{
    Attribute, AttributeClass, DataScope, DataType, DatatypeHint, ElementSpec, SchemaModel,
};
pub use resolver::{AttType, ResolvedAttribute, TypeResolver};
pub use tree::{Content, Document, Node, load_file, load_tree};
