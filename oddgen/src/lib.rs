//! # oddgen
//!
//! Generate Rust attribute and element types from TEI-ODD schemas.
//!
//! `oddgen` reads a compiled ODD schema (such as the MEI schema), flattens
//! its attribute-class graph, resolves the type of every attribute and emits
//! Rust source for the value enumerations, converters, attribute holders and
//! element types.
//!
//! ## Quick Start
//!
//! ```ignore
//! use oddgen::prelude::*;
//! use std::path::Path;
//!
//! let config = GeneratorConfig::load(Path::new("mei.yml"))?;
//! let files = generate_to_dir(Path::new("mei-all.xml"), &config)?;
//! println!("wrote {} files", files.len());
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - Runtime types and traits used by generated code
//! - [`schema`] - Schema loading, model building and type resolution
//! - [`codegen`] - Rust code generation and output writing
//! - [`cli`] - Command-line front end

pub mod cli;
pub mod prelude;

/// Runtime types and traits used by generated code.
pub mod core {
    pub use oddgen_core::*;
}

/// Schema loading, model building and type resolution.
pub mod schema {
    pub use oddgen_schema::*;
}

/// Rust code generation from schemas.
pub mod codegen {
    pub use oddgen_codegen::*;
}

// Re-export commonly used items at the crate root
pub use oddgen_codegen::{
    CodegenError, GeneratedFiles, Generator, generate_from_file, generate_from_xml,
    generate_to_dir,
};
pub use oddgen_schema::{GeneratorConfig, ResolvedSchema, SchemaModel};
