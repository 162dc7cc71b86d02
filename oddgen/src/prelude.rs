//! Prelude module for convenient imports.
//!
//! ```ignore
//! use oddgen::prelude::*;
//! ```

// Runtime types
pub use oddgen_core::{
    Alternate, AttAccessor, AttClass, AttValue, AttributeCarrier, BaseConverter, Element,
};

// Schema types
pub use oddgen_schema::{
    AttType, ConfigError, GeneratorConfig, ResolvedSchema, SchemaError, SchemaModel, TypeResolver,
};

// Code generation
pub use oddgen_codegen::{
    CodegenError, GeneratedFiles, Generator, generate_from_file, generate_from_xml,
    generate_to_dir, write_files,
};
