//! Normalized schema model.
//!
//! Built once from the loaded document by [`crate::builder`] and read-only
//! afterwards. Every collection is ordered by name.

use std::collections::{BTreeMap, BTreeSet};

/// Datatype construct declared on an attribute definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatatypeHint {
    /// Built-in datatype name (`dataRef/@name` or `rng:data/@type`).
    pub data_name: Option<String>,
    /// Named datatype reference (`dataRef/@key` or `rng:ref/@name`).
    pub reference: Option<String>,
    /// True if the attribute declares a closed value list.
    pub closed_list: bool,
}

/// Attribute definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Local name with hyphens normalized.
    pub ident: String,
    /// Identifier as written in the schema, prefix included.
    pub schema_ident: String,
    /// Namespace URI, if the attribute is qualified.
    pub namespace: Option<String>,
    /// Name as written in documents (`prefix:name` for qualified attributes).
    pub wire_name: String,
    /// Datatype construct captured from the schema.
    pub hint: DatatypeHint,
    /// Documentation string with whitespace collapsed.
    pub description: String,
}

/// Attribute class definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeClass {
    /// Class name (`att.typed`).
    pub name: String,
    /// Owning module key.
    pub module: String,
    /// Attributes sorted by wire name, `id` excluded.
    pub attributes: Vec<Attribute>,
    /// Attribute classes this class is a member of.
    pub member_of: Vec<String>,
}

impl AttributeClass {
    /// Returns true if the class has no attributes to emit.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Finds an attribute by local name.
    #[must_use]
    pub fn attribute(&self, ident: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.ident == ident)
    }
}

/// Element definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSpec {
    /// Element name.
    pub name: String,
    /// Owning module key.
    pub module: String,
    /// Every attribute class reachable through membership, sorted by name.
    pub classes: BTreeSet<String>,
    /// Attributes declared directly on the element, sorted by wire name.
    pub self_attributes: Vec<Attribute>,
    /// Documentation string with whitespace collapsed.
    pub description: String,
}

/// Scope of an extracted enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataScope {
    /// Named datatype from a macro or data spec.
    Global,
    /// Value list local to a class attribute.
    Local {
        /// Owning class name.
        owner: String,
        /// Attribute identifier as written in the schema.
        attribute: String,
    },
}

/// Extracted enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataType {
    /// Schema name (`data.BOOLEAN`, or `att.accid@func` for scoped lists).
    pub name: String,
    /// Literal values, deduplicated, in first-seen order.
    pub values: Vec<String>,
    /// Scope of the enumeration.
    pub scope: DataScope,
}

/// The normalized schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaModel {
    /// Every attribute class except the identifier class, empty ones included.
    pub classes: BTreeMap<String, AttributeClass>,
    /// Element specs keyed by name.
    pub elements: BTreeMap<String, ElementSpec>,
    /// Named datatypes keyed by schema name.
    pub data_types: BTreeMap<String, DataType>,
    /// Scoped value lists keyed by `{owner}@{attribute}`.
    pub data_lists: BTreeMap<String, DataType>,
}

impl SchemaModel {
    /// Gets an attribute class by name.
    #[must_use]
    pub fn class(&self, name: &str) -> Option<&AttributeClass> {
        self.classes.get(name)
    }

    /// Iterates over the classes that carry attributes.
    pub fn non_empty_classes(&self) -> impl Iterator<Item = &AttributeClass> {
        self.classes.values().filter(|c| !c.is_empty())
    }

    /// Returns the module owning a non-empty class.
    #[must_use]
    pub fn module_of_class(&self, name: &str) -> Option<&str> {
        self.classes
            .get(name)
            .filter(|c| !c.is_empty())
            .map(|c| c.module.as_str())
    }

    /// Returns the wire names of every attribute allowed on an element.
    ///
    /// Composed classes come first in class order, then self-attributes.
    #[must_use]
    pub fn element_attributes(&self, element: &ElementSpec) -> Vec<String> {
        element
            .classes
            .iter()
            .filter_map(|name| self.classes.get(name))
            .flat_map(|class| class.attributes.iter())
            .chain(element.self_attributes.iter())
            .map(|a| a.wire_name.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attribute(ident: &str) -> Attribute {
        Attribute {
            ident: ident.to_string(),
            schema_ident: ident.to_string(),
            namespace: None,
            wire_name: ident.to_string(),
            hint: DatatypeHint::default(),
            description: String::new(),
        }
    }

    #[test]
    fn test_module_index_skips_empty_classes() {
        let mut model = SchemaModel::default();
        model.classes.insert(
            "att.typed".into(),
            AttributeClass {
                name: "att.typed".into(),
                module: "shared".into(),
                attributes: vec![attribute("type")],
                member_of: vec![],
            },
        );
        model.classes.insert(
            "att.marker".into(),
            AttributeClass {
                name: "att.marker".into(),
                module: "cmn".into(),
                attributes: vec![],
                member_of: vec![],
            },
        );

        assert_eq!(model.module_of_class("att.typed"), Some("shared"));
        assert_eq!(model.module_of_class("att.marker"), None);
        let names: Vec<&str> = model.non_empty_classes().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["att.typed"]);
    }
}
