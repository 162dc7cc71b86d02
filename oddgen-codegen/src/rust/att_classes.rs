//! Attribute class identifier generation (`att_classes.rs`).

use super::file_header;
use oddgen_schema::ir::ResolvedSchema;

/// Generator for the `AttClassId` enumeration.
pub struct ClassIdGenerator<'a> {
    ir: &'a ResolvedSchema,
}

impl<'a> ClassIdGenerator<'a> {
    /// Creates a new class-ID generator.
    #[must_use]
    pub fn new(ir: &'a ResolvedSchema) -> Self {
        Self { ir }
    }

    /// Generates the content of `att_classes.rs`.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = file_header("Attribute class identifiers.");

        output.push_str("/// Identifier of a generated attribute class.\n");
        output.push_str("#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]\n");
        output.push_str("#[repr(i32)]\n");
        output.push_str("pub enum AttClassId {\n");
        output.push_str("    ATT_CLASS_min = 0,\n");
        for class in self.ir.classes() {
            output.push_str(&format!("    /// `{}`\n", class.name));
            output.push_str(&format!("    {},\n", class.id_literal));
        }
        output.push_str("    ATT_CLASS_max,\n");
        output.push_str("}\n\n");

        output.push_str("impl AttClassId {\n");
        output.push_str("    /// Returns the schema name of the class.\n");
        output.push_str("    #[must_use]\n");
        output.push_str("    pub const fn class_name(self) -> &'static str {\n");
        output.push_str("        match self {\n");
        for class in self.ir.classes() {
            output.push_str(&format!(
                "            Self::{} => \"{}\",\n",
                class.id_literal, class.name
            ));
        }
        output.push_str("            Self::ATT_CLASS_min | Self::ATT_CLASS_max => \"\",\n");
        output.push_str("        }\n");
        output.push_str("    }\n");
        output.push_str("}\n");

        output
    }
}
