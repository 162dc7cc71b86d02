//! Accessor module generation (`att_module.rs`).
//!
//! Used when element types are written by hand. Elements expose their
//! holders through `AttClassHolder` and the per-module functions dispatch
//! through the static class tables.

use super::{file_header, holder_module, sibling};
use oddgen_schema::ir::{ResolvedClass, ResolvedModule, ResolvedSchema};

/// Generator for the attribute-class accessor module.
pub struct AccessorModuleGenerator<'a> {
    ir: &'a ResolvedSchema,
    namespace: &'a str,
}

impl<'a> AccessorModuleGenerator<'a> {
    /// Creates a new accessor module generator.
    #[must_use]
    pub fn new(ir: &'a ResolvedSchema, namespace: &'a str) -> Self {
        Self { ir, namespace }
    }

    /// Generates the content of `att_module.rs`.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = file_header("Name-based access to attribute classes.");

        if self.ir.classes().next().is_none() {
            output.push_str("// The schema defines no attribute classes.\n");
            return output;
        }

        output.push_str("use oddgen_core::{AttValue, collect_attributes};\n");
        output.push_str(&format!(
            "use {}::AttClassId;\n",
            sibling(self.namespace, "att_classes")
        ));
        for module in self.ir.modules.values().filter(|m| !m.classes.is_empty()) {
            let holders: Vec<&str> = module.classes.iter().map(|c| c.holder.as_str()).collect();
            output.push_str(&format!(
                "use {}::{{{}}};\n",
                sibling(self.namespace, &holder_module(&module.name)),
                holders.join(", ")
            ));
        }
        output.push('\n');

        output.push_str(&self.generate_capability());

        for module in self.ir.modules.values().filter(|m| !m.classes.is_empty()) {
            output.push_str(&self.generate_module(module));
        }

        output
    }

    /// Generates the tagged references and the `AttClassHolder` trait.
    fn generate_capability(&self) -> String {
        let mut output = String::new();

        output.push_str("/// Shared reference to one attribute-class holder of an element.\n");
        output.push_str("#[derive(Debug, Clone, Copy)]\n");
        output.push_str("pub enum AttClassRef<'a> {\n");
        for class in self.ir.classes() {
            output.push_str(&format!("    {0}(&'a {0}),\n", class.holder));
        }
        output.push_str("}\n\n");

        output.push_str("/// Mutable reference to one attribute-class holder of an element.\n");
        output.push_str("#[derive(Debug)]\n");
        output.push_str("pub enum AttClassMut<'a> {\n");
        for class in self.ir.classes() {
            output.push_str(&format!("    {0}(&'a mut {0}),\n", class.holder));
        }
        output.push_str("}\n\n");

        output.push_str("/// Element types that compose generated attribute classes.\n");
        output.push_str("///\n");
        output.push_str("/// Implementations return the holder matching `id`, or `None` if the\n");
        output.push_str("/// element does not compose that class.\n");
        output.push_str("pub trait AttClassHolder {\n");
        output.push_str("    /// Returns the holder of a composed class.\n");
        output.push_str("    fn att_class(&self, id: AttClassId) -> Option<AttClassRef<'_>>;\n\n");
        output.push_str("    /// Returns the mutable holder of a composed class.\n");
        output.push_str("    fn att_class_mut(&mut self, id: AttClassId) -> Option<AttClassMut<'_>>;\n");
        output.push_str("}\n\n");

        output
    }

    /// Generates `set_*`, `get_*`, `copy_*` and `value_*` for one module.
    fn generate_module(&self, module: &ResolvedModule) -> String {
        let mut output = String::new();
        let name = &module.name;

        // set
        output.push_str(&format!(
            "/// Sets an attribute of a `{name}` class. Returns false if no composed class knows it.\n"
        ));
        output.push_str(&format!(
            "pub fn set_{name}(element: &mut dyn AttClassHolder, attr_type: &str, attr_value: &str) -> bool {{\n"
        ));
        for class in &module.classes {
            output.push_str(&format!(
                "    if let Some(row) = {}::accessor(attr_type) {{\n",
                class.holder
            ));
            output.push_str(&format!("        {}\n", mut_pattern(class, "element")));
            output.push_str("            (row.set)(att, attr_value);\n");
            output.push_str("            return true;\n");
            output.push_str("        }\n");
            output.push_str("    }\n");
        }
        output.push_str("    false\n");
        output.push_str("}\n\n");

        // get
        output.push_str(&format!(
            "/// Appends the present attributes of every `{name}` class. Returns true if any was appended.\n"
        ));
        output.push_str(&format!(
            "pub fn get_{name}(element: &dyn AttClassHolder, attributes: &mut Vec<(String, String)>) -> bool {{\n"
        ));
        output.push_str("    let mut has_attribute = false;\n");
        for class in &module.classes {
            output.push_str(&format!("    {}\n", ref_pattern(class, "element")));
            output.push_str(&format!(
                "        has_attribute = collect_attributes({}::accessors(), att, attributes) || has_attribute;\n",
                class.holder
            ));
            output.push_str("    }\n");
        }
        output.push_str("    has_attribute\n");
        output.push_str("}\n\n");

        // copy
        output.push_str(&format!(
            "/// Copies the present attributes of every `{name}` class both elements compose.\n"
        ));
        output.push_str(&format!(
            "pub fn copy_{name}(source: &dyn AttClassHolder, target: &mut dyn AttClassHolder) {{\n"
        ));
        for class in &module.classes {
            output.push_str(&format!(
                "    if let (Some(AttClassRef::{0}(src)), Some(AttClassMut::{0}(dst))) = (\n",
                class.holder
            ));
            output.push_str(&format!(
                "        source.att_class(AttClassId::{}),\n",
                class.id_literal
            ));
            output.push_str(&format!(
                "        target.att_class_mut(AttClassId::{}),\n",
                class.id_literal
            ));
            output.push_str("    ) {\n");
            output.push_str(&format!("        for row in {}::accessors() {{\n", class.holder));
            output.push_str("            if (row.get)(src).is_some() {\n");
            output.push_str("                (row.copy)(src, dst);\n");
            output.push_str("            }\n");
            output.push_str("        }\n");
            output.push_str("    }\n");
        }
        output.push_str("}\n\n");

        // value
        output.push_str(&format!(
            "/// Returns the tagged value of a present `{name}` attribute.\n"
        ));
        output.push_str(&format!(
            "pub fn value_{name}(element: &dyn AttClassHolder, attr_type: &str) -> Option<AttValue> {{\n"
        ));
        for class in &module.classes {
            output.push_str(&format!(
                "    if let Some(row) = {}::accessor(attr_type) {{\n",
                class.holder
            ));
            output.push_str(&format!("        {}\n", ref_pattern(class, "element")));
            output.push_str("            return (row.value)(att);\n");
            output.push_str("        }\n");
            output.push_str("    }\n");
        }
        output.push_str("    None\n");
        output.push_str("}\n\n");

        output
    }
}

fn ref_pattern(class: &ResolvedClass, receiver: &str) -> String {
    format!(
        "if let Some(AttClassRef::{}(att)) = {receiver}.att_class(AttClassId::{}) {{",
        class.holder, class.id_literal
    )
}

fn mut_pattern(class: &ResolvedClass, receiver: &str) -> String {
    format!(
        "if let Some(AttClassMut::{}(att)) = {receiver}.att_class_mut(AttClassId::{}) {{",
        class.holder, class.id_literal
    )
}
