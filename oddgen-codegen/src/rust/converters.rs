//! Converter code generation (`att_converter.rs`).

use super::{file_header, sibling};
use oddgen_schema::ir::{EnumDef, ResolvedSchema};

/// Generator for `AttConverter` and its per-enumeration converter pairs.
pub struct ConverterGenerator<'a> {
    ir: &'a ResolvedSchema,
    namespace: &'a str,
}

impl<'a> ConverterGenerator<'a> {
    /// Creates a new converter generator.
    #[must_use]
    pub fn new(ir: &'a ResolvedSchema, namespace: &'a str) -> Self {
        Self { ir, namespace }
    }

    /// Generates the content of `att_converter.rs`.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = file_header("Attribute value converters.");

        output.push_str("use oddgen_core::{BaseConverter, log_unknown_value, log_unsupported_value};\n");
        output.push_str(&format!("use {}::*;\n\n", sibling(self.namespace, "att_types")));

        output.push_str("/// Converts attribute values to and from their text form.\n");
        output.push_str("#[derive(Debug, Clone, Copy, Default)]\n");
        output.push_str("pub struct AttConverter;\n\n");
        output.push_str("impl BaseConverter for AttConverter {}\n\n");

        if self.ir.enums.is_empty() {
            return output;
        }

        output.push_str("impl AttConverter {\n");
        let mut first = true;
        for def in &self.ir.enums {
            if !first {
                output.push('\n');
            }
            first = false;
            output.push_str(&self.generate_to_str(def));
            output.push('\n');
            output.push_str(&self.generate_from_str(def));
        }
        output.push_str("}\n");

        output
    }

    /// Generates `{base}_to_str`.
    fn generate_to_str(&self, def: &EnumDef) -> String {
        let mut output = String::new();
        let name = &def.name;

        output.push_str(&format!(
            "    /// Returns the text of a `{}` value.\n",
            def.schema_name
        ));
        output.push_str(&format!(
            "    pub fn {}(&self, data: {name}) -> String {{\n",
            def.write_fn()
        ));
        output.push_str("        let value = match data {\n");
        for literal in &def.literals {
            output.push_str(&format!(
                "            {name}::{} => {:?},\n",
                literal.ident, literal.value
            ));
        }
        output.push_str("            _ => {\n");
        output.push_str(&format!(
            "                log_unknown_value({:?}, data as i32);\n",
            def.schema_name
        ));
        output.push_str("                \"\"\n");
        output.push_str("            }\n");
        output.push_str("        };\n");
        output.push_str("        value.to_string()\n");
        output.push_str("    }\n");

        output
    }

    /// Generates `str_to_{base}`.
    fn generate_from_str(&self, def: &EnumDef) -> String {
        let mut output = String::new();
        let name = &def.name;

        output.push_str(&format!(
            "    /// Parses a `{}` value. Unknown text yields `{}`.\n",
            def.schema_name,
            def.none_literal()
        ));
        output.push_str(&format!(
            "    pub fn {}(&self, value: &str, log_warning: bool) -> {name} {{\n",
            def.read_fn()
        ));
        output.push_str("        match value {\n");
        for literal in &def.literals {
            output.push_str(&format!(
                "            {:?} => {name}::{},\n",
                literal.value, literal.ident
            ));
        }
        output.push_str("            _ => {\n");
        output.push_str("                if log_warning {\n");
        output.push_str(&format!(
            "                    log_unsupported_value({:?}, value);\n",
            def.schema_name
        ));
        output.push_str("                }\n");
        output.push_str(&format!("                {name}::{}\n", def.none_literal()));
        output.push_str("            }\n");
        output.push_str("        }\n");
        output.push_str("    }\n");

        output
    }
}
