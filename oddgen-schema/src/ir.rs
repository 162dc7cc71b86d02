//! Intermediate representation for code generation.
//!
//! This module provides a flattened, resolved representation of the schema
//! model: every attribute carries its resolved type, every name is already
//! formatted, and every collection is sorted.

use crate::config::GeneratorConfig;
use crate::model::{Attribute, DataScope, DataType, SchemaModel};
use crate::naming::{
    class_id_literal, converter_base, element_type_name, field_name, formatted_type, holder_field,
    holder_name, member_name, sanitize_literal, scoped_list_name, to_snake_case, value_prefix,
};
use crate::resolver::{ResolvedAttribute, TypeResolver};
use crate::validation::check_data_type;
use std::collections::{BTreeMap, BTreeSet};

/// Target names that are primitive types rather than enumerations.
const PRIMITIVE_TARGETS: &[&str] = &["int", "double", "char", "string", "String", "std::string"];

/// Literal of an emitted enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumLiteral {
    /// Value as written in documents.
    pub value: String,
    /// Variant identifier (`BOOLEAN_true`).
    pub ident: String,
}

/// Enumeration to emit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDef {
    /// Formatted type name (`data_BOOLEAN`, `Accid_FUNC`).
    pub name: String,
    /// Schema name (`data.BOOLEAN`, `att.accid@func`).
    pub schema_name: String,
    /// Variant prefix (`BOOLEAN`).
    pub prefix: String,
    /// Literals in schema order.
    pub literals: Vec<EnumLiteral>,
    /// True if members of this type track presence explicitly.
    pub alternate: bool,
}

impl EnumDef {
    /// Creates the enumeration for an extracted data type.
    #[must_use]
    pub fn from_data_type(data_type: &DataType, config: &GeneratorConfig) -> Self {
        let name = match &data_type.scope {
            DataScope::Global => config
                .mapped
                .get(&data_type.name)
                .cloned()
                .unwrap_or_else(|| formatted_type(&data_type.name)),
            DataScope::Local { owner, attribute } => scoped_list_name(owner, attribute),
        };
        let prefix = value_prefix(&name).to_string();
        let literals = data_type
            .values
            .iter()
            .map(|value| EnumLiteral {
                value: value.clone(),
                ident: format!("{prefix}_{}", sanitize_literal(value)),
            })
            .collect();

        Self {
            alternate: config.is_alternate(&data_type.name, &name),
            schema_name: data_type.name.clone(),
            name,
            prefix,
            literals,
        }
    }

    /// Returns the reserved zero literal.
    #[must_use]
    pub fn none_literal(&self) -> String {
        format!("{}_NONE", self.prefix)
    }

    /// Returns the trailing bound literal.
    #[must_use]
    pub fn max_literal(&self) -> String {
        format!("{}_MAX", self.prefix)
    }

    /// Returns the snake_case name of the `{base}ToStr` converter.
    #[must_use]
    pub fn write_fn(&self) -> String {
        to_snake_case(&format!("{}ToStr", converter_base(&self.name)))
    }

    /// Returns the snake_case name of the `StrTo{base}` converter.
    #[must_use]
    pub fn read_fn(&self) -> String {
        to_snake_case(&format!("StrTo{}", converter_base(&self.name)))
    }
}

/// Computes the enumerations to emit, sorted as data types then data lists.
///
/// Excluded types, types mapped to primitives and types failing validation
/// are left out.
#[must_use]
pub fn collect_enums(model: &SchemaModel, config: &GeneratorConfig) -> Vec<EnumDef> {
    let mut seen = BTreeSet::new();
    let mut enums = Vec::new();

    for data_type in model.data_types.values().chain(model.data_lists.values()) {
        let def = EnumDef::from_data_type(data_type, config);
        if config.is_excluded(&def.schema_name, &def.name) {
            tracing::debug!(datatype = %def.schema_name, "Skipping excluded datatype");
            continue;
        }
        if PRIMITIVE_TARGETS.contains(&def.name.as_str()) {
            tracing::debug!(datatype = %def.schema_name, target = %def.name, "Datatype mapped to a primitive");
            continue;
        }
        if let Err(e) = check_data_type(&def) {
            tracing::warn!(datatype = %def.schema_name, error = %e, "Dropping datatype");
            continue;
        }
        if !seen.insert(def.name.clone()) {
            tracing::warn!(datatype = %def.schema_name, name = %def.name, "Dropping datatype with a duplicate name");
            continue;
        }
        enums.push(def);
    }

    enums
}

/// Attribute with its resolution and generated names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMember {
    /// Source attribute.
    pub attribute: Attribute,
    /// Field name, keyword-escaped.
    pub field: String,
    /// Unescaped snake_case name used in accessor names.
    pub member: String,
    /// Resolved type, default and converters.
    pub resolved: ResolvedAttribute,
}

impl ResolvedMember {
    fn new(attribute: &Attribute, resolved: ResolvedAttribute) -> Self {
        Self {
            field: field_name(&attribute.ident),
            member: member_name(&attribute.ident),
            attribute: attribute.clone(),
            resolved,
        }
    }

    /// Returns the wire name of the attribute.
    #[must_use]
    pub fn wire_name(&self) -> &str {
        &self.attribute.wire_name
    }
}

/// Attribute class ready for emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedClass {
    /// Class name.
    pub name: String,
    /// Owning module key.
    pub module: String,
    /// Holder type name (`AttTyped`).
    pub holder: String,
    /// Holder field name in element types (`att_typed`).
    pub field: String,
    /// Class-ID literal (`ATT_TYPED`).
    pub id_literal: String,
    /// Members sorted by wire name.
    pub members: Vec<ResolvedMember>,
}

/// Element ready for emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedElement {
    /// Element name.
    pub name: String,
    /// Owning module key.
    pub module: String,
    /// Type name (`Note`).
    pub type_name: String,
    /// Documentation string.
    pub description: String,
    /// Composed classes that carry attributes, sorted by name.
    pub classes: Vec<String>,
    /// Self-attributes sorted by wire name.
    pub self_members: Vec<ResolvedMember>,
}

/// Per-module emission set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedModule {
    /// Module key.
    pub name: String,
    /// Non-empty attribute classes sorted by name.
    pub classes: Vec<ResolvedClass>,
    /// Elements sorted by name.
    pub elements: Vec<ResolvedElement>,
}

/// Intermediate representation of a schema for code generation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedSchema {
    /// Modules keyed by name.
    pub modules: BTreeMap<String, ResolvedModule>,
    /// Enumerations to emit.
    pub enums: Vec<EnumDef>,
}

impl ResolvedSchema {
    /// Creates an intermediate representation from a schema model.
    #[must_use]
    pub fn from_model(model: &SchemaModel, config: &GeneratorConfig) -> Self {
        let enums = collect_enums(model, config);
        let resolver = TypeResolver::with_enums(config, enums.iter().map(|e| e.name.clone()).collect());
        let mut modules: BTreeMap<String, ResolvedModule> = BTreeMap::new();

        for class in model.non_empty_classes() {
            let members = class
                .attributes
                .iter()
                .map(|a| ResolvedMember::new(a, resolver.resolve(&class.module, &class.name, a)))
                .collect();
            let resolved = ResolvedClass {
                name: class.name.clone(),
                module: class.module.clone(),
                holder: holder_name(&class.name),
                field: holder_field(&class.name),
                id_literal: class_id_literal(&class.name),
                members,
            };
            module_entry(&mut modules, &class.module).classes.push(resolved);
        }

        for element in model.elements.values() {
            let self_members = element
                .self_attributes
                .iter()
                .map(|a| ResolvedMember::new(a, resolver.resolve(&element.module, &element.name, a)))
                .collect();
            let resolved = ResolvedElement {
                name: element.name.clone(),
                module: element.module.clone(),
                type_name: element_type_name(&element.name),
                description: element.description.clone(),
                classes: element
                    .classes
                    .iter()
                    .filter(|c| model.module_of_class(c).is_some())
                    .cloned()
                    .collect(),
                self_members,
            };
            module_entry(&mut modules, &element.module).elements.push(resolved);
        }

        tracing::debug!(
            modules = modules.len(),
            enums = enums.len(),
            "Resolved schema"
        );
        Self { modules, enums }
    }

    /// Iterates over every emitted class, sorted by name.
    pub fn classes(&self) -> impl Iterator<Item = &ResolvedClass> {
        let mut classes: Vec<&ResolvedClass> =
            self.modules.values().flat_map(|m| m.classes.iter()).collect();
        classes.sort_by(|a, b| a.name.cmp(&b.name));
        classes.into_iter()
    }

    /// Gets an emitted class by name.
    #[must_use]
    pub fn class(&self, name: &str) -> Option<&ResolvedClass> {
        self.modules
            .values()
            .flat_map(|m| m.classes.iter())
            .find(|c| c.name == name)
    }

    /// Iterates over every element, sorted by module then name.
    pub fn elements(&self) -> impl Iterator<Item = &ResolvedElement> {
        self.modules.values().flat_map(|m| m.elements.iter())
    }

    /// Gets an emitted enumeration by formatted name.
    #[must_use]
    pub fn enum_def(&self, name: &str) -> Option<&EnumDef> {
        self.enums.iter().find(|e| e.name == name)
    }
}

fn module_entry<'m>(
    modules: &'m mut BTreeMap<String, ResolvedModule>,
    name: &str,
) -> &'m mut ResolvedModule {
    modules
        .entry(name.to_string())
        .or_insert_with(|| ResolvedModule {
            name: name.to_string(),
            ..ResolvedModule::default()
        })
}
