//! Attribute-holder code generation (`atts_{module}.rs`).

use super::members::{
    accessor_methods, accessor_row, field_decl, field_init, read_block, reset_stmt, write_block,
};
use super::{file_header, sibling};
use oddgen_schema::ir::{ResolvedClass, ResolvedModule};

/// Generator for the attribute-holder types of one module.
pub struct HolderGenerator<'a> {
    module: &'a ResolvedModule,
    namespace: &'a str,
}

impl<'a> HolderGenerator<'a> {
    /// Creates a new holder generator.
    #[must_use]
    pub fn new(module: &'a ResolvedModule, namespace: &'a str) -> Self {
        Self { module, namespace }
    }

    /// Generates the content of `atts_{module}.rs`.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = file_header(&format!(
            "Attribute classes of the `{}` module.",
            self.module.name
        ));

        output.push_str("use oddgen_core::{\n");
        output.push_str(
            "    Alternate, AttAccessor, AttClass, AttValue, AttributeCarrier, BaseConverter,\n",
        );
        output.push_str("    find_accessor,\n");
        output.push_str("};\n");
        output.push_str(&format!(
            "use {}::AttConverter;\n",
            sibling(self.namespace, "att_converter")
        ));
        output.push_str(&format!(
            "use {}::*;\n\n",
            sibling(self.namespace, "att_types")
        ));

        for class in &self.module.classes {
            output.push_str(&self.generate_holder(class));
        }

        output
    }

    /// Generates one holder type with its table and trait impl.
    fn generate_holder(&self, class: &ResolvedClass) -> String {
        let mut output = String::new();
        let holder = &class.holder;
        let table = format!("{}_ACCESSORS", class.id_literal);

        // Struct
        output.push_str(&format!("/// Attributes of `{}`.\n", class.name));
        output.push_str("#[derive(Debug, Clone, PartialEq)]\n");
        output.push_str(&format!("pub struct {holder} {{\n"));
        for member in &class.members {
            output.push_str(&field_decl(member));
        }
        output.push_str("}\n\n");

        // Inherent methods
        output.push_str(&format!("impl {holder} {{\n"));
        output.push_str("    /// Creates a holder with every member at its default.\n");
        output.push_str("    #[must_use]\n");
        output.push_str("    pub fn new() -> Self {\n");
        output.push_str("        Self {\n");
        for member in &class.members {
            output.push_str(&field_init(member));
        }
        output.push_str("        }\n");
        output.push_str("    }\n\n");
        for member in &class.members {
            output.push_str(&accessor_methods(member));
        }
        output.push_str("    /// Returns the dispatch row for a wire name.\n");
        output.push_str("    #[must_use]\n");
        output.push_str("    pub fn accessor(name: &str) -> Option<&'static AttAccessor<Self>> {\n");
        output.push_str(&format!("        find_accessor({table}, name)\n"));
        output.push_str("    }\n\n");
        output.push_str("    /// Returns every dispatch row, sorted by wire name.\n");
        output.push_str("    #[must_use]\n");
        output.push_str("    pub fn accessors() -> &'static [AttAccessor<Self>] {\n");
        output.push_str(&format!("        {table}\n"));
        output.push_str("    }\n");
        output.push_str("}\n\n");

        output.push_str(&format!("impl Default for {holder} {{\n"));
        output.push_str("    fn default() -> Self {\n");
        output.push_str("        Self::new()\n");
        output.push_str("    }\n");
        output.push_str("}\n\n");

        // Trait impl
        output.push_str(&format!("impl AttClass for {holder} {{\n"));
        output.push_str("    fn reset(&mut self) {\n");
        for member in &class.members {
            output.push_str(&reset_stmt(member));
        }
        output.push_str("    }\n\n");
        output.push_str(
            "    fn read(&mut self, element: &mut AttributeCarrier, remove_attr: bool) -> bool {\n",
        );
        output.push_str("        let mut has_attribute = false;\n");
        for member in &class.members {
            output.push_str(&read_block(member));
        }
        output.push_str("        has_attribute\n");
        output.push_str("    }\n\n");
        output.push_str("    fn write(&self, element: &mut AttributeCarrier) -> bool {\n");
        output.push_str("        let mut was_written = false;\n");
        for member in &class.members {
            output.push_str(&write_block(member));
        }
        output.push_str("        was_written\n");
        output.push_str("    }\n");
        output.push_str("}\n\n");

        // Dispatch table
        output.push_str(&format!("static {table}: &[AttAccessor<{holder}>] = &[\n"));
        for member in &class.members {
            output.push_str(&accessor_row(member));
        }
        output.push_str("];\n\n");

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn shared() -> String {
        let ir = fixtures::resolve(&fixtures::config());
        let module = ir.modules.get("shared").expect("shared exists");
        HolderGenerator::new(module, "super").generate()
    }

    #[test]
    fn test_holder_layout() {
        let code = shared();
        assert!(code.contains("pub struct AttSized {\n    ratio: f64,\n    size: i32,\n}"));
        assert!(code.contains("pub struct AttTyped {\n    n: String,\n    href: String,\n}"));
        assert!(code.contains("impl AttClass for AttSized {"));
        assert!(code.contains("use super::att_converter::AttConverter;"));
    }

    #[test]
    fn test_override_default_drives_presence() {
        let code = shared();
        assert!(code.contains("            size: 0,\n"));
        assert!(code.contains("        self.size != 0\n"));
        assert!(code.contains("            ratio: 0.0,\n"));
        assert!(code.contains("        self.size = 0;\n"));
    }

    #[test]
    fn test_read_and_write() {
        let code = shared();
        assert!(code.contains("if let Some(value) = element.attribute(\"size\") {"));
        assert!(code.contains("self.size = AttConverter.str_to_int(value);"));
        assert!(code.contains(
            "element.append_attribute(\"size\", AttConverter.int_to_str(self.size));"
        ));
        assert!(code.contains("if let Some(value) = element.attribute(\"xlink:href\") {"));
    }

    #[test]
    fn test_dispatch_table_sorted() {
        let code = shared();
        let table = code
            .split("static ATT_TYPED_ACCESSORS: &[AttAccessor<AttTyped>] = &[")
            .nth(1)
            .expect("table exists");
        let n = table.find("name: \"n\"").expect("n row");
        let href = table.find("name: \"xlink:href\"").expect("href row");
        assert!(n < href);
        assert!(code.contains("find_accessor(ATT_TYPED_ACCESSORS, name)"));
    }

    #[test]
    fn test_alternate_member() {
        let code = shared();
        assert!(code.contains("    width: Alternate<data_MEASUREMENTABS>,\n"));
        assert!(code.contains("            width: Alternate::empty(),\n"));
        assert!(code.contains("        self.width.reset();\n"));
        assert!(code.contains(
            "self.width.set(AttConverter.str_to_measurementabs(value, true));"
        ));
    }

    #[test]
    fn test_documentation_carried() {
        let code = shared();
        assert!(code.contains("    /// Number or label.\n    pub fn set_n("));
    }
}
