//! Schema model builder.
//!
//! Walks the loaded document once to collect attribute classes, elements and
//! enumerated value domains into a [`SchemaModel`].

use crate::error::SchemaError;
use crate::model::{
    Attribute, AttributeClass, DataScope, DataType, DatatypeHint, ElementSpec, SchemaModel,
};
use crate::naming::{
    ID_ATTRIBUTE, ID_CLASS, module_key, namespace_prefix, namespace_uri, normalize_hyphens,
    split_namespace,
};
use crate::tree::{Document, Node, RNG_NS, TEI_NS};
use std::collections::{BTreeMap, BTreeSet};

/// Options controlling model building.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    /// Resolve element specs and their composed classes.
    pub resolve_elements: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            resolve_elements: true,
        }
    }
}

/// Builds the schema model with default options.
///
/// # Errors
/// Returns `SchemaError` if a required node is missing or duplicated.
pub fn build(document: &Document) -> Result<SchemaModel, SchemaError> {
    build_with(document, BuildOptions::default())
}

/// Builds the schema model.
///
/// # Errors
/// Returns `SchemaError` if a required node is missing or duplicated.
pub fn build_with(document: &Document, options: BuildOptions) -> Result<SchemaModel, SchemaError> {
    let builder = Builder::index(document)?;

    let mut model = SchemaModel {
        classes: builder.collect_classes()?,
        ..SchemaModel::default()
    };
    if options.resolve_elements {
        model.elements = builder.collect_elements(&model.classes)?;
    }
    let (data_types, data_lists) = builder.collect_data()?;
    model.data_types = data_types;
    model.data_lists = data_lists;

    tracing::debug!(
        classes = model.classes.len(),
        elements = model.elements.len(),
        data_types = model.data_types.len(),
        data_lists = model.data_lists.len(),
        "Built schema model"
    );
    Ok(model)
}

/// Spec nodes indexed by ident.
struct Builder<'a> {
    class_specs: BTreeMap<&'a str, &'a Node>,
    element_specs: BTreeMap<&'a str, &'a Node>,
    macro_specs: BTreeMap<&'a str, &'a Node>,
    data_specs: BTreeMap<&'a str, &'a Node>,
}

impl<'a> Builder<'a> {
    fn index(document: &'a Document) -> Result<Self, SchemaError> {
        Ok(Self {
            class_specs: index_specs(document, "classSpec")?,
            element_specs: index_specs(document, "elementSpec")?,
            macro_specs: index_specs(document, "macroSpec")?,
            data_specs: index_specs(document, "dataSpec")?,
        })
    }

    fn collect_classes(&self) -> Result<BTreeMap<String, AttributeClass>, SchemaError> {
        let mut classes = BTreeMap::new();

        for (&name, node) in &self.class_specs {
            if node.attr("type") != Some("atts") || name == ID_CLASS {
                continue;
            }
            let module = required(node, "module")?;
            let class = AttributeClass {
                name: name.to_string(),
                module: module_key(module),
                attributes: parse_att_list(node, name)?,
                member_of: memberships(node),
            };
            if class.is_empty() {
                tracing::debug!(class = name, "Attribute class has no attributes");
            }
            classes.insert(name.to_string(), class);
        }

        Ok(classes)
    }

    fn collect_elements(
        &self,
        classes: &BTreeMap<String, AttributeClass>,
    ) -> Result<BTreeMap<String, ElementSpec>, SchemaError> {
        let mut elements = BTreeMap::new();

        for (&name, node) in &self.element_specs {
            let module = required(node, "module")?;
            let mut visited = BTreeSet::new();
            for key in memberships(node) {
                collect_membership(classes, &key, name, &mut visited)?;
            }

            let element = ElementSpec {
                name: name.to_string(),
                module: module_key(module),
                classes: visited,
                self_attributes: parse_att_list(node, name)?,
                description: description(node),
            };
            elements.insert(name.to_string(), element);
        }

        Ok(elements)
    }

    fn collect_data(
        &self,
    ) -> Result<(BTreeMap<String, DataType>, BTreeMap<String, DataType>), SchemaError> {
        let mut types: BTreeMap<String, Vec<String>> = BTreeMap::new();

        // One-of-two alternates pull values from each alternative.
        for spec in self.macro_specs.values().chain(self.data_specs.values()) {
            let is_dt = spec.is(TEI_NS, "dataSpec") || spec.attr("type") == Some("dt");
            if !is_dt || !spec.has_descendant(is_exclusive_alternate) {
                continue;
            }
            let name = required(spec, "ident")?;
            for alternate in spec.find_descendants(TEI_NS, "alternate") {
                for reference in alternate.children() {
                    let target = if reference.is(TEI_NS, "macroRef") {
                        let key = required(reference, "key")?;
                        self.macro_specs
                            .get(key)
                            .ok_or_else(|| SchemaError::missing("macroSpec", key, name))?
                    } else if reference.is(TEI_NS, "dataRef") {
                        let Some(key) = reference.attr("key") else {
                            continue;
                        };
                        self.data_specs
                            .get(key)
                            .ok_or_else(|| SchemaError::missing("dataSpec", key, name))?
                    } else {
                        continue;
                    };
                    push_values(&mut types, name, list_values(target));
                }
            }
        }

        // Choices of references pull values from each referenced spec.
        for spec in self.macro_specs.values().chain(self.data_specs.values()) {
            let is_dt = spec.is(TEI_NS, "dataSpec") || spec.attr("type") == Some("dt");
            if !is_dt {
                continue;
            }
            let choices = spec.find_descendants(RNG_NS, "choice");
            if choices.is_empty() {
                continue;
            }
            let name = required(spec, "ident")?;
            for choice in choices {
                for reference in choice.child_elements(RNG_NS, "ref") {
                    let Some(target) = reference.attr("name").and_then(|key| {
                        self.macro_specs
                            .get(key)
                            .or_else(|| self.data_specs.get(key))
                    }) else {
                        continue;
                    };
                    push_values(&mut types, name, list_values(target));
                }
            }
        }

        // Directly nested closed or semi-closed lists.
        for spec in self.macro_specs.values().chain(self.data_specs.values()) {
            if !spec.has_descendant(is_enumerating_list) {
                continue;
            }
            let name = required(spec, "ident")?;
            push_values(&mut types, name, list_values(spec));
        }

        let mut lists: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut scopes: BTreeMap<String, (String, String)> = BTreeMap::new();

        // Lists local to a class attribute.
        for (&owner, class) in &self.class_specs {
            for att_def in class.find_descendants(TEI_NS, "attDef") {
                for list in att_def.children().filter(|n| is_enumerating_list(n)) {
                    let attribute = required(att_def, "ident")?;
                    let key = format!("{owner}@{attribute}");
                    let values = list
                        .find_descendants(TEI_NS, "valItem")
                        .into_iter()
                        .filter_map(|item| item.attr("ident"));
                    push_values(&mut lists, &key, values);
                    scopes.insert(key, (owner.to_string(), attribute.to_string()));
                }
            }
        }

        let data_types = finish_enums(types, |_| DataScope::Global);
        let data_lists = finish_enums(lists, |key| {
            let (owner, attribute) = scopes.get(key).cloned().unwrap_or_default();
            DataScope::Local { owner, attribute }
        });
        Ok((data_types, data_lists))
    }
}

/// Indexes every spec node of one kind by ident, rejecting duplicates.
fn index_specs<'a>(
    document: &'a Document,
    kind: &str,
) -> Result<BTreeMap<&'a str, &'a Node>, SchemaError> {
    let mut specs = BTreeMap::new();
    for node in document.find_all(TEI_NS, kind) {
        let ident = required(node, "ident")?;
        if specs.insert(ident, node).is_some() {
            return Err(SchemaError::duplicate(kind, ident));
        }
    }
    Ok(specs)
}

fn required<'a>(node: &'a Node, attribute: &str) -> Result<&'a str, SchemaError> {
    node.attr(attribute)
        .ok_or_else(|| SchemaError::missing_attr(node.name.as_str(), attribute))
}

/// Returns the attribute class keys a spec is a member of.
fn memberships(node: &Node) -> Vec<String> {
    node.child_elements(TEI_NS, "classes")
        .flat_map(|classes| classes.child_elements(TEI_NS, "memberOf"))
        .filter_map(|member| member.attr("key"))
        .filter(|key| key.starts_with("att."))
        .map(str::to_string)
        .collect()
}

/// Depth-first traversal of the membership graph, visiting each class once.
fn collect_membership(
    classes: &BTreeMap<String, AttributeClass>,
    key: &str,
    element: &str,
    visited: &mut BTreeSet<String>,
) -> Result<(), SchemaError> {
    if key == ID_CLASS || !visited.insert(key.to_string()) {
        return Ok(());
    }
    let class = classes
        .get(key)
        .ok_or_else(|| SchemaError::missing("classSpec", key, element))?;
    for parent in &class.member_of {
        collect_membership(classes, parent, element, visited)?;
    }
    Ok(())
}

/// Parses the direct `attList/attDef` children of a spec, skipping `id`.
fn parse_att_list(spec: &Node, owner: &str) -> Result<Vec<Attribute>, SchemaError> {
    let mut attributes: Vec<Attribute> = Vec::new();
    for att_def in spec
        .child_elements(TEI_NS, "attList")
        .flat_map(|list| list.child_elements(TEI_NS, "attDef"))
    {
        let ident = required(att_def, "ident")?;
        if ident == ID_ATTRIBUTE {
            continue;
        }
        let attribute = parse_attribute(att_def, ident)?;
        if attributes.iter().any(|a| a.wire_name == attribute.wire_name) {
            return Err(SchemaError::duplicate(
                "attDef",
                format!("{owner}@{}", attribute.wire_name),
            ));
        }
        attributes.push(attribute);
    }
    attributes.sort_by(|a, b| a.wire_name.cmp(&b.wire_name));
    Ok(attributes)
}

fn parse_attribute(att_def: &Node, ident: &str) -> Result<Attribute, SchemaError> {
    let (namespace, prefix, local) = if let Some(uri) = att_def.attr("ns") {
        let prefix = namespace_prefix(uri).ok_or_else(|| SchemaError::UnknownNamespacePrefix {
            prefix: uri.to_string(),
            attribute: ident.to_string(),
        })?;
        (Some(uri), Some(prefix), ident)
    } else if let Some((prefix, local)) = split_namespace(ident) {
        let uri = namespace_uri(prefix).ok_or_else(|| SchemaError::UnknownNamespacePrefix {
            prefix: prefix.to_string(),
            attribute: ident.to_string(),
        })?;
        (Some(uri), Some(prefix), local)
    } else {
        (None, None, ident)
    };

    let normalized = normalize_hyphens(local);
    let wire_name = match prefix {
        Some(prefix) => format!("{prefix}:{local}"),
        None => local.to_string(),
    };

    Ok(Attribute {
        ident: normalized,
        schema_ident: ident.to_string(),
        namespace: namespace.map(str::to_string),
        wire_name,
        hint: datatype_hint(att_def),
        description: description(att_def),
    })
}

fn datatype_hint(att_def: &Node) -> DatatypeHint {
    let mut hint = DatatypeHint {
        closed_list: att_def
            .child_elements(TEI_NS, "valList")
            .any(|list| list.attr("type") == Some("closed")),
        ..DatatypeHint::default()
    };

    for datatype in att_def.child_elements(TEI_NS, "datatype") {
        for child in datatype.children() {
            if child.is(TEI_NS, "dataRef") {
                hint.data_name = hint.data_name.or_else(|| child.attr("name").map(str::to_string));
                hint.reference = hint.reference.or_else(|| child.attr("key").map(str::to_string));
            } else if child.is(RNG_NS, "data") {
                hint.data_name = hint.data_name.or_else(|| child.attr("type").map(str::to_string));
            } else if child.is(RNG_NS, "ref") {
                hint.reference = hint.reference.or_else(|| child.attr("name").map(str::to_string));
            }
        }
    }
    hint
}

/// Returns the documentation of a spec with whitespace collapsed.
fn description(node: &Node) -> String {
    node.first_child(TEI_NS, "desc")
        .map(|desc| {
            desc.text_content()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_default()
}

fn is_exclusive_alternate(node: &Node) -> bool {
    node.is(TEI_NS, "alternate")
        && node.attr("minOccurs") == Some("1")
        && node.attr("maxOccurs") == Some("1")
}

fn is_enumerating_list(node: &Node) -> bool {
    node.is(TEI_NS, "valList") && matches!(node.attr("type"), Some("closed" | "semi"))
}

/// Returns every `valList/valItem` ident below a spec.
fn list_values(spec: &Node) -> Vec<&str> {
    spec.find_descendants(TEI_NS, "valList")
        .into_iter()
        .flat_map(|list| list.child_elements(TEI_NS, "valItem"))
        .filter_map(|item| item.attr("ident"))
        .collect()
}

fn push_values<'v>(
    sets: &mut BTreeMap<String, Vec<String>>,
    name: &str,
    values: impl IntoIterator<Item = &'v str>,
) {
    let entry = sets.entry(name.to_string()).or_default();
    for value in values {
        if !entry.iter().any(|v| v == value) {
            entry.push(value.to_string());
        }
    }
}

fn finish_enums(
    sets: BTreeMap<String, Vec<String>>,
    scope: impl Fn(&str) -> DataScope,
) -> BTreeMap<String, DataType> {
    sets.into_iter()
        .filter_map(|(name, values)| {
            if values.is_empty() {
                tracing::debug!(name = %name, "Dropping empty enumeration");
                return None;
            }
            let data_scope = scope(&name);
            Some((
                name.clone(),
                DataType {
                    name,
                    values,
                    scope: data_scope,
                },
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::load_tree;

    const SCHEMA: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<TEI xmlns="http://www.tei-c.org/ns/1.0" xmlns:rng="http://relaxng.org/ns/structure/1.0">
  <classSpec ident="att.id" type="atts" module="MEI.shared">
    <attList><attDef ident="id"><datatype><rng:data type="ID"/></datatype></attDef></attList>
  </classSpec>
  <classSpec ident="att.typed" type="atts" module="MEI.shared">
    <attList>
      <attDef ident="n"><desc>A   <ref>literal</ref> &amp; name.</desc><datatype><rng:data type="NMTOKEN"/></datatype></attDef>
    </attList>
  </classSpec>
  <classSpec ident="att.sized" type="atts" module="MEI.shared">
    <classes><memberOf key="att.typed"/><memberOf key="att.id"/></classes>
    <attList>
      <attDef ident="size"><datatype><rng:data type="integer"/></datatype></attDef>
    </attList>
  </classSpec>
  <classSpec ident="att.marker" type="atts" module="MEI.cmn">
    <attList><attDef ident="id"/></attList>
  </classSpec>
  <classSpec ident="att.linking" type="atts" module="MEI.shared">
    <attList>
      <attDef ident="xlink:href"/>
      <attDef ident="glyph-auth"/>
      <attDef ident="func">
        <valList type="closed"><valItem ident="4.5"/><valItem ident="C+"/><valItem ident="4.5"/></valList>
      </attDef>
    </attList>
  </classSpec>
  <classSpec ident="model.noteLike" type="model" module="MEI.shared"/>
  <macroSpec ident="data.BOOLEAN" type="dt" module="MEI">
    <content><valList type="closed"><valItem ident="true"/><valItem ident="false"/></valList></content>
  </macroSpec>
  <macroSpec ident="data.EMPTY" type="dt" module="MEI">
    <content><valList type="closed"/></content>
  </macroSpec>
  <elementSpec ident="note" module="MEI.shared">
    <desc>A single <term>pitched</term>
      event.</desc>
    <classes>
      <memberOf key="att.sized"/>
      <memberOf key="att.id"/>
      <memberOf key="att.marker"/>
      <memberOf key="model.noteLike"/>
    </classes>
    <attList><attDef ident="id"/><attDef ident="label"/></attList>
  </elementSpec>
</TEI>"#;

    fn load(xml: &str) -> SchemaModel {
        let doc = load_tree(xml).expect("Failed to load");
        build(&doc).expect("Failed to build")
    }

    #[test]
    fn test_composed_classes() {
        let model = load(SCHEMA);
        let note = model.elements.get("note").expect("note exists");
        let classes: Vec<&str> = note.classes.iter().map(String::as_str).collect();
        assert_eq!(classes, vec!["att.marker", "att.sized", "att.typed"]);
        assert_eq!(note.module, "shared");
        assert_eq!(note.description, "A single pitched event.");
        assert_eq!(note.self_attributes.len(), 1);
        assert_eq!(note.self_attributes[0].ident, "label");
    }

    #[test]
    fn test_identifier_class_is_skipped() {
        let model = load(SCHEMA);
        assert!(model.class("att.id").is_none());
        assert!(model.elements.values().all(|e| !e.classes.contains("att.id")));
    }

    #[test]
    fn test_empty_class_is_marker_only() {
        let model = load(SCHEMA);
        let marker = model.class("att.marker").expect("marker kept");
        assert!(marker.is_empty());
        assert!(model.non_empty_classes().all(|c| c.name != "att.marker"));
        assert!(model.non_empty_classes().all(|c| c.module != "cmn"));
    }

    #[test]
    fn test_attribute_normalization() {
        let model = load(SCHEMA);
        let linking = model.class("att.linking").expect("linking exists");
        let names: Vec<&str> = linking.attributes.iter().map(|a| a.wire_name.as_str()).collect();
        assert_eq!(names, vec!["func", "glyph-auth", "xlink:href"]);

        let href = linking.attribute("href").expect("href exists");
        assert_eq!(href.namespace.as_deref(), Some("http://www.w3.org/1999/xlink"));
        assert!(linking.attribute("glyphAuth").is_some());

        let typed = model.class("att.typed").expect("typed exists");
        assert_eq!(typed.attributes[0].description, "A literal & name.");
        assert_eq!(typed.attributes[0].hint.data_name.as_deref(), Some("NMTOKEN"));
    }

    #[test]
    fn test_data_extraction() {
        let model = load(SCHEMA);
        let boolean = model.data_types.get("data.BOOLEAN").expect("boolean exists");
        assert_eq!(boolean.values, vec!["true", "false"]);
        assert!(!model.data_types.contains_key("data.EMPTY"));

        let func = model.data_lists.get("att.linking@func").expect("list exists");
        assert_eq!(func.values, vec!["4.5", "C+"]);
        assert_eq!(
            func.scope,
            DataScope::Local {
                owner: "att.linking".into(),
                attribute: "func".into()
            }
        );
        let func_att = model
            .class("att.linking")
            .and_then(|c| c.attribute("func"))
            .expect("func exists");
        assert!(func_att.hint.closed_list);
    }

    #[test]
    fn test_alternate_and_choice_extraction() {
        let xml = r#"<TEI xmlns="http://www.tei-c.org/ns/1.0" xmlns:rng="http://relaxng.org/ns/structure/1.0">
  <macroSpec ident="data.DURATION.gestural" type="dt" module="MEI">
    <content><valList type="closed"><valItem ident="4"/><valItem ident="8"/></valList></content>
  </macroSpec>
  <macroSpec ident="data.DURATION.mensural" type="dt" module="MEI">
    <content><valList type="closed"><valItem ident="brevis"/><valItem ident="4"/></valList></content>
  </macroSpec>
  <macroSpec ident="data.DURATION" type="dt" module="MEI">
    <content>
      <alternate minOccurs="1" maxOccurs="1">
        <macroRef key="data.DURATION.gestural"/>
        <macroRef key="data.DURATION.mensural"/>
      </alternate>
    </content>
  </macroSpec>
  <dataSpec ident="data.MODE" module="MEI">
    <content>
      <rng:choice><rng:ref name="data.DURATION.gestural"/><rng:ref name="data.UNDEFINED"/></rng:choice>
    </content>
  </dataSpec>
</TEI>"#;
        let model = load(xml);
        let duration = model.data_types.get("data.DURATION").expect("duration exists");
        assert_eq!(duration.values, vec!["4", "8", "brevis"]);
        let mode = model.data_types.get("data.MODE").expect("mode exists");
        assert_eq!(mode.values, vec!["4", "8"]);
    }

    #[test]
    fn test_missing_alternate_target_is_error() {
        let xml = r#"<TEI xmlns="http://www.tei-c.org/ns/1.0">
  <macroSpec ident="data.X" type="dt" module="MEI">
    <content><alternate minOccurs="1" maxOccurs="1"><macroRef key="data.MISSING"/></alternate></content>
  </macroSpec>
</TEI>"#;
        let doc = load_tree(xml).expect("Failed to load");
        let err = build(&doc).expect_err("should fail");
        assert!(matches!(err, SchemaError::MissingDefinition { .. }));
    }

    #[test]
    fn test_membership_cycle_terminates() {
        let xml = r#"<TEI xmlns="http://www.tei-c.org/ns/1.0">
  <classSpec ident="att.a" type="atts" module="MEI.shared">
    <classes><memberOf key="att.b"/></classes>
    <attList><attDef ident="a"/></attList>
  </classSpec>
  <classSpec ident="att.b" type="atts" module="MEI.shared">
    <classes><memberOf key="att.a"/></classes>
    <attList><attDef ident="b"/></attList>
  </classSpec>
  <elementSpec ident="x" module="MEI.shared">
    <classes><memberOf key="att.a"/><memberOf key="att.b"/></classes>
  </elementSpec>
</TEI>"#;
        let model = load(xml);
        let x = model.elements.get("x").expect("x exists");
        assert_eq!(x.classes.len(), 2);
        assert_eq!(model.element_attributes(x), vec!["a", "b"]);
    }

    #[test]
    fn test_structure_errors() {
        let duplicate = r#"<TEI xmlns="http://www.tei-c.org/ns/1.0">
  <classSpec ident="att.a" type="atts" module="MEI.shared"/>
  <classSpec ident="att.a" type="atts" module="MEI.shared"/>
</TEI>"#;
        let doc = load_tree(duplicate).expect("Failed to load");
        assert!(matches!(
            build(&doc),
            Err(SchemaError::DuplicateDefinition { .. })
        ));

        let missing = r#"<TEI xmlns="http://www.tei-c.org/ns/1.0">
  <elementSpec ident="x" module="MEI.shared">
    <classes><memberOf key="att.undefined"/></classes>
  </elementSpec>
</TEI>"#;
        let doc = load_tree(missing).expect("Failed to load");
        assert!(matches!(
            build(&doc),
            Err(SchemaError::MissingDefinition { .. })
        ));

        let prefix = r#"<TEI xmlns="http://www.tei-c.org/ns/1.0">
  <classSpec ident="att.a" type="atts" module="MEI.shared">
    <attList><attDef ident="svg:x"/></attList>
  </classSpec>
</TEI>"#;
        let doc = load_tree(prefix).expect("Failed to load");
        assert!(matches!(
            build(&doc),
            Err(SchemaError::UnknownNamespacePrefix { .. })
        ));
    }

    #[test]
    fn test_skip_element_resolution() {
        let doc = load_tree(SCHEMA).expect("Failed to load");
        let model = build_with(
            &doc,
            BuildOptions {
                resolve_elements: false,
            },
        )
        .expect("Failed to build");
        assert!(model.elements.is_empty());
        assert!(model.class("att.typed").is_some());
    }
}
