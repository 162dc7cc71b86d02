//! Rust code generation modules.

pub mod accessors;
pub mod att_classes;
pub mod basic;
pub mod converters;
pub mod elements;
pub mod enums;
pub mod holders;
pub(crate) mod members;
pub mod modules;

pub use accessors::AccessorModuleGenerator;
pub use att_classes::ClassIdGenerator;
pub use basic::BasicGenerator;
pub use converters::ConverterGenerator;
pub use elements::ElementGenerator;
pub use enums::EnumGenerator;
pub use holders::HolderGenerator;
pub use modules::ModuleIndexGenerator;

/// Returns the preamble of a generated file.
pub(crate) fn file_header(summary: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("//! {summary}\n"));
    output.push_str("//!\n");
    output.push_str("//! Generated by oddgen. Do not edit.\n\n");
    output.push_str("#![allow(non_camel_case_types, unused_imports, clippy::all)]\n\n");
    output
}

/// Returns `text` as `///` lines indented by `indent` spaces.
pub(crate) fn doc_comment(text: &str, indent: usize) -> String {
    let pad = " ".repeat(indent);
    let mut output = String::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if !line.is_empty() && line.len() + word.len() + 1 > 76 {
            output.push_str(&format!("{pad}/// {line}\n"));
            line.clear();
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        output.push_str(&format!("{pad}/// {line}\n"));
    }

    output
}

/// Returns the path of a sibling generated module.
pub(crate) fn sibling(namespace: &str, module: &str) -> String {
    format!("{namespace}::{module}")
}

/// File stem of the holder module for `module`.
pub(crate) fn holder_module(module: &str) -> String {
    format!("atts_{module}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_header() {
        let header = file_header("Attribute types.");
        assert!(header.starts_with("//! Attribute types.\n"));
        assert!(header.contains("Do not edit."));
        assert!(header.contains("#![allow(non_camel_case_types"));
    }

    #[test]
    fn test_doc_comment_wraps() {
        assert_eq!(doc_comment("Single note.", 0), "/// Single note.\n");
        assert_eq!(doc_comment("", 4), "");

        let long = "word ".repeat(30);
        let doc = doc_comment(&long, 4);
        assert!(doc.lines().count() > 1);
        assert!(doc.lines().all(|l| l.starts_with("    /// ") && l.len() <= 84));
    }

    #[test]
    fn test_sibling() {
        assert_eq!(sibling("super", "att_types"), "super::att_types");
        assert_eq!(holder_module("shared"), "atts_shared");
    }
}
