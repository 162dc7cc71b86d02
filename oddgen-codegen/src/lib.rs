//! # oddgen Codegen
//!
//! Rust code generation from TEI-ODD schemas.
//!
//! This crate provides:
//! - Enumerations and converters for every extracted data type and list
//! - Attribute-holder types with static name-indexed dispatch tables
//! - Element types composing their attribute classes, or an accessor module
//!   for hand-written elements
//! - An optional allow-list validator for a reduced schema
//! - An output writer that replaces the destination directory

pub mod addons;
pub mod error;
pub mod generator;
pub mod rust;
pub mod writer;

#[cfg(test)]
pub(crate) mod fixtures;

pub use addons::{Addon, load_addons};
pub use error::CodegenError;
pub use generator::{GeneratedFiles, Generator};
pub use writer::write_files;

use oddgen_schema::{BuildOptions, Document, GeneratorConfig, ResolvedSchema, SchemaModel};
use std::path::Path;

/// Generates Rust code from a schema string.
///
/// # Arguments
/// * `xml` - Compiled ODD schema content
/// * `config` - Generator configuration
///
/// # Returns
/// Generated files keyed by file name.
///
/// # Errors
/// Returns `CodegenError` if parsing, building or generation fails.
pub fn generate_from_xml(xml: &str, config: &GeneratorConfig) -> Result<GeneratedFiles, CodegenError> {
    let document = oddgen_schema::load_tree(xml)?;
    generate_from_document(&document, config)
}

/// Generates Rust code from a schema file.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, building or generation fails.
pub fn generate_from_file(path: &Path, config: &GeneratorConfig) -> Result<GeneratedFiles, CodegenError> {
    let document = oddgen_schema::load_file(path)?;
    generate_from_document(&document, config)
}

/// Generates Rust code from a schema file and writes it to `output_dir`.
///
/// Nothing is written unless generation succeeds.
///
/// # Errors
/// Returns `CodegenError` if generation or writing fails.
pub fn generate_to_dir(path: &Path, config: &GeneratorConfig) -> Result<GeneratedFiles, CodegenError> {
    let files = generate_from_file(path, config)?;
    write_files(&files, &config.output_dir)?;
    Ok(files)
}

fn generate_from_document(
    document: &Document,
    config: &GeneratorConfig,
) -> Result<GeneratedFiles, CodegenError> {
    let options = BuildOptions {
        resolve_elements: config.elements,
    };
    let model = oddgen_schema::build_with(document, options)?;
    let ir = ResolvedSchema::from_model(&model, config);

    let basic = config.basic_odd.as_deref().map(load_basic).transpose()?;
    let addons = match config.addons_dir.as_deref() {
        Some(dir) => load_addons(dir)?,
        None => Vec::new(),
    };

    let mut generator = Generator::new(&ir, config).with_addons(&addons);
    if let Some(model) = basic.as_ref() {
        generator = generator.with_basic(model);
    }
    generator.generate()
}

fn load_basic(path: &Path) -> Result<SchemaModel, CodegenError> {
    let document = oddgen_schema::load_file(path)?;
    let model = oddgen_schema::build(&document)?;
    tracing::debug!(path = %path.display(), elements = model.elements.len(), "Loaded basic schema");
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_from_xml() {
        let files = generate_from_xml(fixtures::SCHEMA, &fixtures::config()).expect("Failed to generate");
        assert!(files.get("atts_shared.rs").is_some());
        assert!(files.get("att_module.rs").is_some());
        assert!(files.get("shared.rs").is_none());
    }

    #[test]
    fn test_structure_error_aborts() {
        let xml = r#"<TEI xmlns="http://www.tei-c.org/ns/1.0">
  <classSpec ident="att.a" type="atts" module="MEI.shared"/>
  <classSpec ident="att.a" type="atts" module="MEI.shared"/>
</TEI>"#;
        let err = generate_from_xml(xml, &GeneratorConfig::default()).expect_err("should fail");
        assert!(matches!(err, CodegenError::Schema(_)));
    }

    #[test]
    fn test_malformed_xml() {
        let err = generate_from_xml("<TEI><unclosed></TEI>", &GeneratorConfig::default())
            .expect_err("should fail");
        assert!(matches!(err, CodegenError::Parse(_)));
    }

    #[test]
    fn test_generate_to_dir() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let schema = dir.path().join("mei.xml");
        let basic = dir.path().join("basic.xml");
        std::fs::write(&schema, fixtures::SCHEMA).expect("Failed to write schema");
        std::fs::write(&basic, fixtures::SCHEMA).expect("Failed to write basic schema");

        let config = GeneratorConfig {
            elements: true,
            output_dir: dir.path().join("out"),
            basic_odd: Some(basic),
            ..fixtures::config()
        };
        let files = generate_to_dir(&schema, &config).expect("Failed to generate");
        assert!(files.get("basic.rs").is_some());
        assert!(dir.path().join("out").join("shared.rs").is_file());
        assert!(dir.path().join("out").join("mod.rs").is_file());
    }

    #[test]
    fn test_failed_generation_writes_nothing() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = GeneratorConfig {
            output_dir: dir.path().join("out"),
            ..GeneratorConfig::default()
        };
        let err = generate_to_dir(&dir.path().join("missing.xml"), &config).expect_err("should fail");
        assert!(matches!(err, CodegenError::Parse(_)));
        assert!(!dir.path().join("out").exists());
    }
}
