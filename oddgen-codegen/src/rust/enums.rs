//! Enumeration code generation (`att_types.rs`).

use super::{doc_comment, file_header, sibling};
use oddgen_schema::ir::{EnumDef, ResolvedSchema};

/// Generator for the enumerations of every emitted data type and list.
pub struct EnumGenerator<'a> {
    ir: &'a ResolvedSchema,
    namespace: &'a str,
    addons: &'a [String],
}

impl<'a> EnumGenerator<'a> {
    /// Creates a new enum generator.
    #[must_use]
    pub fn new(ir: &'a ResolvedSchema, namespace: &'a str) -> Self {
        Self {
            ir,
            namespace,
            addons: &[],
        }
    }

    /// Re-exports the given addon modules so hand-written types resolve.
    #[must_use]
    pub fn with_addons(mut self, addons: &'a [String]) -> Self {
        self.addons = addons;
        self
    }

    /// Generates the content of `att_types.rs`.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = file_header("Attribute value enumerations.");

        for def in &self.ir.enums {
            output.push_str(&self.generate_enum(def));
        }

        for addon in self.addons {
            output.push_str(&format!("pub use {}::*;\n", sibling(self.namespace, addon)));
        }

        output
    }

    /// Generates one enumeration.
    fn generate_enum(&self, def: &EnumDef) -> String {
        let mut output = String::new();

        output.push_str(&doc_comment(&format!("Values of `{}`.", def.schema_name), 0));
        output.push_str(
            "#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]\n",
        );
        output.push_str("#[repr(i32)]\n");
        output.push_str(&format!("pub enum {} {{\n", def.name));
        output.push_str("    #[default]\n");
        output.push_str(&format!("    {} = 0,\n", def.none_literal()));
        for literal in &def.literals {
            output.push_str(&format!("    /// `{}`\n", literal.value));
            output.push_str(&format!("    {},\n", literal.ident));
        }
        output.push_str(&format!("    {},\n", def.max_literal()));
        output.push_str("}\n\n");

        output
    }
}
