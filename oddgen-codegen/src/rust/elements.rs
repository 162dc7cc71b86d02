//! Element code generation (`{module}.rs`).
//!
//! Each element owns one holder field per composed attribute class, in
//! class-name order. `reset`, `read` and `write` visit the intrinsic
//! `xml:id` first, then the holders in that order, then the element's own
//! attributes.

use super::members::{
    accessor_methods, accessor_row, field_decl, field_init, read_block, reset_stmt, write_block,
};
use super::{doc_comment, file_header, holder_module, sibling};
use crate::error::CodegenError;
use oddgen_schema::ir::{ResolvedClass, ResolvedElement, ResolvedModule, ResolvedSchema};
use oddgen_schema::naming::to_snake_case;
use std::collections::BTreeMap;

/// Generator for the element types of one module.
pub struct ElementGenerator<'a> {
    ir: &'a ResolvedSchema,
    module: &'a ResolvedModule,
    namespace: &'a str,
}

impl<'a> ElementGenerator<'a> {
    /// Creates a new element generator.
    #[must_use]
    pub fn new(ir: &'a ResolvedSchema, module: &'a ResolvedModule, namespace: &'a str) -> Self {
        Self {
            ir,
            module,
            namespace,
        }
    }

    /// Generates the content of `{module}.rs`.
    ///
    /// # Errors
    /// Returns `CodegenError::Generation` if an element composes a class that
    /// has no holder.
    pub fn generate(&self) -> Result<String, CodegenError> {
        let mut output = file_header(&format!("Elements of the `{}` module.", self.module.name));
        output.push_str(&self.generate_imports()?);

        for element in &self.module.elements {
            let classes = self.composed(element)?;
            output.push_str(&self.generate_element(element, &classes));
        }

        Ok(output)
    }

    fn composed(&self, element: &ResolvedElement) -> Result<Vec<&'a ResolvedClass>, CodegenError> {
        element
            .classes
            .iter()
            .map(|name| {
                self.ir.class(name).ok_or_else(|| {
                    CodegenError::generation(format!(
                        "element '{}' composes '{}', which has no holder",
                        element.name, name
                    ))
                })
            })
            .collect()
    }

    fn generate_imports(&self) -> Result<String, CodegenError> {
        let mut output = String::new();
        let mut holders: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for element in &self.module.elements {
            for class in self.composed(element)? {
                let entry = holders.entry(class.module.as_str()).or_default();
                if !entry.contains(&class.holder.as_str()) {
                    entry.push(class.holder.as_str());
                }
            }
        }

        output.push_str("use oddgen_core::{\n");
        output.push_str("    Alternate, AttAccessor, AttClass, AttValue, AttributeCarrier, BaseConverter,\n");
        output.push_str("    Element, ID_ATTRIBUTE, collect_attributes, find_accessor,\n");
        output.push_str("};\n");
        output.push_str(&format!(
            "use {}::AttClassId;\n",
            sibling(self.namespace, "att_classes")
        ));
        output.push_str(&format!(
            "use {}::AttConverter;\n",
            sibling(self.namespace, "att_converter")
        ));
        output.push_str(&format!(
            "use {}::*;\n",
            sibling(self.namespace, "att_types")
        ));
        for (module, mut names) in holders {
            names.sort_unstable();
            output.push_str(&format!(
                "use {}::{{{}}};\n",
                sibling(self.namespace, &holder_module(module)),
                names.join(", ")
            ));
        }
        output.push('\n');

        Ok(output)
    }

    fn generate_element(&self, element: &ResolvedElement, classes: &[&ResolvedClass]) -> String {
        let mut output = String::new();
        let name = &element.type_name;
        let table = format!("{}_ACCESSORS", to_snake_case(name).to_uppercase());
        let has_table = !element.self_members.is_empty();

        // Struct
        if element.description.is_empty() {
            output.push_str(&format!("/// `<{}>`\n", element.name));
        } else {
            output.push_str(&doc_comment(&element.description, 0));
        }
        output.push_str("#[derive(Debug, Clone, PartialEq)]\n");
        output.push_str(&format!("pub struct {name} {{\n"));
        output.push_str("    id: String,\n");
        for class in classes {
            output.push_str(&format!("    pub {}: {},\n", class.field, class.holder));
        }
        for member in &element.self_members {
            output.push_str(&field_decl(member));
        }
        output.push_str("}\n\n");

        // Inherent methods
        output.push_str(&format!("impl {name} {{\n"));
        output.push_str("    /// Attribute classes composed by this element, sorted by name.\n");
        output.push_str("    pub const ATT_CLASSES: &'static [AttClassId] = &[\n");
        for class in classes {
            output.push_str(&format!("        AttClassId::{},\n", class.id_literal));
        }
        output.push_str("    ];\n\n");
        output.push_str("    /// Creates an element with every attribute at its default.\n");
        output.push_str("    #[must_use]\n");
        output.push_str("    pub fn new() -> Self {\n");
        output.push_str("        Self {\n");
        output.push_str("            id: String::new(),\n");
        for class in classes {
            output.push_str(&format!("            {}: {}::new(),\n", class.field, class.holder));
        }
        for member in &element.self_members {
            output.push_str(&field_init(member));
        }
        output.push_str("        }\n");
        output.push_str("    }\n\n");
        output.push_str("    /// Returns true if this element composes the given class.\n");
        output.push_str("    #[must_use]\n");
        output.push_str("    pub fn has_att_class(&self, id: AttClassId) -> bool {\n");
        output.push_str("        Self::ATT_CLASSES.contains(&id)\n");
        output.push_str("    }\n");
        for member in &element.self_members {
            output.push('\n');
            let methods = accessor_methods(member);
            output.push_str(methods.trim_end_matches('\n'));
            output.push('\n');
        }
        output.push_str("}\n\n");

        output.push_str(&format!("impl Default for {name} {{\n"));
        output.push_str("    fn default() -> Self {\n");
        output.push_str("        Self::new()\n");
        output.push_str("    }\n");
        output.push_str("}\n\n");

        output.push_str(&self.generate_element_impl(element, classes, has_table.then_some(table.as_str())));

        if has_table {
            output.push_str(&format!("static {table}: &[AttAccessor<{name}>] = &[\n"));
            for member in &element.self_members {
                output.push_str(&accessor_row(member));
            }
            output.push_str("];\n\n");
        }

        output
    }

    fn generate_element_impl(
        &self,
        element: &ResolvedElement,
        classes: &[&ResolvedClass],
        table: Option<&str>,
    ) -> String {
        let mut output = String::new();

        output.push_str(&format!("impl Element for {} {{\n", element.type_name));
        output.push_str("    fn name(&self) -> &'static str {\n");
        output.push_str(&format!("        \"{}\"\n", element.name));
        output.push_str("    }\n\n");
        output.push_str("    fn id(&self) -> &str {\n");
        output.push_str("        &self.id\n");
        output.push_str("    }\n\n");
        output.push_str("    fn set_id(&mut self, id: String) {\n");
        output.push_str("        self.id = id;\n");
        output.push_str("    }\n\n");

        // reset
        output.push_str("    fn reset(&mut self) {\n");
        output.push_str("        self.id.clear();\n");
        for class in classes {
            output.push_str(&format!("        self.{}.reset();\n", class.field));
        }
        for member in &element.self_members {
            output.push_str(&reset_stmt(member));
        }
        output.push_str("    }\n\n");

        // read
        output.push_str(
            "    fn read(&mut self, element: &mut AttributeCarrier, remove_attr: bool) -> bool {\n",
        );
        output.push_str("        let mut has_attribute = false;\n");
        output.push_str("        if let Some(value) = element.attribute(ID_ATTRIBUTE) {\n");
        output.push_str("            self.id = value.to_string();\n");
        output.push_str("            if remove_attr {\n");
        output.push_str("                element.remove_attribute(ID_ATTRIBUTE);\n");
        output.push_str("            }\n");
        output.push_str("            has_attribute = true;\n");
        output.push_str("        }\n");
        for class in classes {
            output.push_str(&format!(
                "        has_attribute = self.{}.read(element, remove_attr) || has_attribute;\n",
                class.field
            ));
        }
        for member in &element.self_members {
            output.push_str(&read_block(member));
        }
        output.push_str("        has_attribute\n");
        output.push_str("    }\n\n");

        // write
        output.push_str("    fn write(&self, element: &mut AttributeCarrier) -> bool {\n");
        output.push_str("        let mut was_written = false;\n");
        output.push_str("        if !self.id.is_empty() {\n");
        output.push_str("            element.append_attribute(ID_ATTRIBUTE, self.id.as_str());\n");
        output.push_str("            was_written = true;\n");
        output.push_str("        }\n");
        for class in classes {
            output.push_str(&format!(
                "        was_written = self.{}.write(element) || was_written;\n",
                class.field
            ));
        }
        for member in &element.self_members {
            output.push_str(&write_block(member));
        }
        output.push_str("        was_written\n");
        output.push_str("    }\n\n");

        // set_attribute
        output.push_str("    fn set_attribute(&mut self, name: &str, value: &str) -> bool {\n");
        output.push_str("        if name == ID_ATTRIBUTE {\n");
        output.push_str("            self.id = value.to_string();\n");
        output.push_str("            return true;\n");
        output.push_str("        }\n");
        for class in classes {
            output.push_str(&format!(
                "        if let Some(row) = {}::accessor(name) {{\n",
                class.holder
            ));
            output.push_str(&format!(
                "            (row.set)(&mut self.{}, value);\n",
                class.field
            ));
            output.push_str("            return true;\n");
            output.push_str("        }\n");
        }
        if let Some(table) = table {
            output.push_str(&format!(
                "        if let Some(row) = find_accessor({table}, name) {{\n"
            ));
            output.push_str("            (row.set)(self, value);\n");
            output.push_str("            return true;\n");
            output.push_str("        }\n");
        }
        output.push_str("        false\n");
        output.push_str("    }\n\n");

        // attributes
        output.push_str("    fn attributes(&self) -> Vec<(String, String)> {\n");
        output.push_str("        let mut attributes = Vec::new();\n");
        output.push_str("        if !self.id.is_empty() {\n");
        output.push_str("            attributes.push((ID_ATTRIBUTE.to_string(), self.id.clone()));\n");
        output.push_str("        }\n");
        for class in classes {
            output.push_str(&format!(
                "        collect_attributes({}::accessors(), &self.{}, &mut attributes);\n",
                class.holder, class.field
            ));
        }
        if let Some(table) = table {
            output.push_str(&format!(
                "        collect_attributes({table}, self, &mut attributes);\n"
            ));
        }
        output.push_str("        attributes\n");
        output.push_str("    }\n\n");

        // attribute_value
        output.push_str("    fn attribute_value(&self, name: &str) -> Option<AttValue> {\n");
        output.push_str("        if name == ID_ATTRIBUTE {\n");
        output.push_str("            return (!self.id.is_empty()).then(|| AttValue::Str(self.id.clone()));\n");
        output.push_str("        }\n");
        for class in classes {
            output.push_str(&format!(
                "        if let Some(row) = {}::accessor(name) {{\n",
                class.holder
            ));
            output.push_str(&format!("            return (row.value)(&self.{});\n", class.field));
            output.push_str("        }\n");
        }
        match table {
            Some(table) => output.push_str(&format!(
                "        find_accessor({table}, name).and_then(|row| (row.value)(self))\n"
            )),
            None => output.push_str("        None\n"),
        }
        output.push_str("    }\n");
        output.push_str("}\n\n");

        output
    }
}
