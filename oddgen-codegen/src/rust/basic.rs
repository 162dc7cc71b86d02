//! Basic-profile validator generation (`basic.rs`).

use super::file_header;
use oddgen_core::ID_ATTRIBUTE;
use oddgen_schema::SchemaModel;

/// Generator for the element/attribute allow-list of a reduced schema.
pub struct BasicGenerator<'a> {
    model: &'a SchemaModel,
}

impl<'a> BasicGenerator<'a> {
    /// Creates a new basic validator generator.
    #[must_use]
    pub fn new(model: &'a SchemaModel) -> Self {
        Self { model }
    }

    /// Returns the sorted allow-list of every element.
    #[must_use]
    pub fn allowed(&self) -> Vec<(&'a str, Vec<String>)> {
        self.model
            .elements
            .values()
            .map(|element| {
                let mut attributes = self.model.element_attributes(element);
                attributes.push(ID_ATTRIBUTE.to_string());
                attributes.sort();
                attributes.dedup();
                (element.name.as_str(), attributes)
            })
            .collect()
    }

    /// Generates the content of `basic.rs`.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = file_header("Attribute allow-list of the basic profile.");

        output.push_str("use oddgen_core::ID_ATTRIBUTE;\n\n");

        output.push_str("/// Attributes allowed per element, sorted by element then attribute.\n");
        output.push_str("static BASIC_ATTRIBUTES: &[(&str, &[&str])] = &[\n");
        for (element, attributes) in self.allowed() {
            let list: Vec<String> = attributes.iter().map(|a| format!("{a:?}")).collect();
            output.push_str(&format!("    ({element:?}, &[{}]),\n", list.join(", ")));
        }
        output.push_str("];\n\n");

        output.push_str("/// Checks attributes against the basic profile.\n");
        output.push_str("#[derive(Debug, Clone, Copy, Default)]\n");
        output.push_str("pub struct BasicValidator;\n\n");
        output.push_str("impl BasicValidator {\n");
        output.push_str("    /// Returns true if `attr` is allowed on `element`.\n");
        output.push_str("    ///\n");
        output.push_str("    /// The identifier attribute is always allowed.\n");
        output.push_str("    #[must_use]\n");
        output.push_str("    pub fn is_allowed(element: &str, attr: &str) -> bool {\n");
        output.push_str("        if attr == ID_ATTRIBUTE {\n");
        output.push_str("            return true;\n");
        output.push_str("        }\n");
        output.push_str("        Self::attributes(element).is_some_and(|list| list.binary_search(&attr).is_ok())\n");
        output.push_str("    }\n\n");
        output.push_str("    /// Returns the attributes allowed on `element`, if it is in the profile.\n");
        output.push_str("    #[must_use]\n");
        output.push_str("    pub fn attributes(element: &str) -> Option<&'static [&'static str]> {\n");
        output.push_str("        BASIC_ATTRIBUTES\n");
        output.push_str("            .binary_search_by(|(name, _)| (*name).cmp(element))\n");
        output.push_str("            .ok()\n");
        output.push_str("            .map(|idx| BASIC_ATTRIBUTES[idx].1)\n");
        output.push_str("    }\n");
        output.push_str("}\n");

        output
    }
}
