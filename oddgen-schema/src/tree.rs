//! Schema document loader.
//!
//! Reads the compiled ODD document with the `quick-xml` event reader into an
//! owned element tree. Namespace prefixes are resolved while reading, so
//! queries match on namespace URI and local name.

use crate::error::ParseError;
use quick_xml::NsReader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use std::path::Path;

/// TEI namespace URI.
pub const TEI_NS: &str = "http://www.tei-c.org/ns/1.0";
/// RelaxNG structure namespace URI.
pub const RNG_NS: &str = "http://relaxng.org/ns/structure/1.0";
/// Reserved `xml:` namespace URI.
pub const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";
/// XLink namespace URI.
pub const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// Ordered content item of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Character data, with references resolved.
    Text(String),
    /// Child element.
    Element(Node),
}

/// Element node of the loaded document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    /// Resolved namespace URI, if any.
    pub namespace: Option<String>,
    /// Local name.
    pub name: String,
    /// Attributes in document order, keyed by their qualified name.
    pub attributes: Vec<(String, String)>,
    /// Text and child elements in document order.
    pub content: Vec<Content>,
}

impl Node {
    /// Returns true if this node has the given namespace and local name.
    #[must_use]
    pub fn is(&self, namespace: &str, name: &str) -> bool {
        self.name == name && self.namespace.as_deref() == Some(namespace)
    }

    /// Returns the value of an attribute.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Iterates over child elements in document order.
    pub fn children(&self) -> impl DoubleEndedIterator<Item = &Node> {
        self.content.iter().filter_map(|item| match item {
            Content::Element(node) => Some(node),
            Content::Text(_) => None,
        })
    }

    /// Iterates over child elements with the given namespace and local name.
    pub fn child_elements<'a>(
        &'a self,
        namespace: &'a str,
        name: &'a str,
    ) -> impl Iterator<Item = &'a Node> + 'a {
        self.children().filter(move |c| c.is(namespace, name))
    }

    /// Returns the first child element with the given name.
    #[must_use]
    pub fn first_child(&self, namespace: &str, name: &str) -> Option<&Node> {
        self.children().find(|c| c.is(namespace, name))
    }

    /// Iterates over every descendant element in document order.
    #[must_use]
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children().rev().collect(),
        }
    }

    /// Returns every descendant element with the given name.
    #[must_use]
    pub fn find_descendants(&self, namespace: &str, name: &str) -> Vec<&Node> {
        self.descendants().filter(|n| n.is(namespace, name)).collect()
    }

    /// Returns true if some descendant matches the predicate.
    pub fn has_descendant(&self, predicate: impl Fn(&Node) -> bool) -> bool {
        self.descendants().any(|n| predicate(n))
    }

    /// Returns the text of this node and its descendants in document order.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for item in &self.content {
            match item {
                Content::Text(text) => out.push_str(text),
                Content::Element(node) => node.collect_text(out),
            }
        }
    }

    /// Appends text, merging with a preceding text item.
    fn push_text(&mut self, text: &str) {
        if let Some(Content::Text(last)) = self.content.last_mut() {
            last.push_str(text);
        } else {
            self.content.push(Content::Text(text.to_string()));
        }
    }
}

/// Pre-order iterator over descendant elements.
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().rev());
        Some(node)
    }
}

/// Loaded schema document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Root element.
    pub root: Node,
}

impl Document {
    /// Iterates over the root and every element below it.
    pub fn all_elements(&self) -> impl Iterator<Item = &Node> {
        std::iter::once(&self.root).chain(self.root.descendants())
    }

    /// Returns every element in the document with the given name.
    #[must_use]
    pub fn find_all(&self, namespace: &str, name: &str) -> Vec<&Node> {
        self.all_elements()
            .filter(|n| n.is(namespace, name))
            .collect()
    }
}

/// Loads a schema document from a string.
///
/// # Errors
/// Returns `ParseError` if the XML is malformed, uses an undeclared prefix or
/// an unknown entity, or has no root element.
pub fn load_tree(xml: &str) -> Result<Document, ParseError> {
    let mut reader = NsReader::from_str(xml);

    let mut stack: Vec<Node> = Vec::new();
    let mut root: Option<Node> = None;

    loop {
        let (resolved, event) = reader.read_resolved_event()?;
        let namespace = namespace_uri(resolved)?;
        match event {
            Event::Start(ref e) => {
                let node = open_node(&reader, namespace, e)?;
                stack.push(node);
            }
            Event::Empty(ref e) => {
                let node = open_node(&reader, namespace, e)?;
                attach(node, &mut stack, &mut root)?;
            }
            Event::End(_) => {
                let node = stack.pop().ok_or_else(|| ParseError::InvalidStructure {
                    message: "unbalanced end tag".to_string(),
                })?;
                attach(node, &mut stack, &mut root)?;
            }
            Event::Text(ref t) => {
                if let Some(current) = stack.last_mut() {
                    current.push_text(&t.xml_content()?);
                }
            }
            Event::CData(ref t) => {
                if let Some(current) = stack.last_mut() {
                    current.push_text(&t.decode()?);
                }
            }
            Event::GeneralRef(ref r) => {
                if let Some(current) = stack.last_mut() {
                    if let Some(ch) = r.resolve_char_ref()? {
                        current.push_text(ch.encode_utf8(&mut [0; 4]));
                    } else {
                        let name = r.decode()?;
                        let text = resolve_predefined_entity(&name).ok_or_else(|| {
                            ParseError::UnknownEntity {
                                name: name.to_string(),
                            }
                        })?;
                        current.push_text(text);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(ParseError::InvalidStructure {
            message: format!("unclosed element '{}'", open.name),
        });
    }

    root.map(|root| Document { root })
        .ok_or_else(|| ParseError::InvalidStructure {
            message: "document has no root element".to_string(),
        })
}

/// Loads a schema document from a file.
///
/// # Errors
/// Returns `ParseError` if the file cannot be read or is not valid XML.
pub fn load_file(path: &Path) -> Result<Document, ParseError> {
    let xml = std::fs::read_to_string(path)?;
    load_tree(&xml)
}

/// Builds a node from a start tag whose namespace is already resolved.
///
/// Attribute prefixes must be declared in scope.
///
/// Namespace declarations are consumed by the reader and not kept as
/// attributes.
fn open_node(
    reader: &NsReader<&[u8]>,
    namespace: Option<String>,
    e: &BytesStart<'_>,
) -> Result<Node, ParseError> {
    let name = std::str::from_utf8(e.local_name().as_ref())?.to_string();

    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let (resolved, _) = reader.resolver().resolve_attribute(attr.key);
        namespace_uri(resolved)?;
        let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
        let value = attr.decode_and_unescape_value(reader.decoder())?.into_owned();
        attributes.push((key, value));
    }

    Ok(Node {
        namespace,
        name,
        attributes,
        content: Vec::new(),
    })
}

/// Converts a resolution result into a namespace URI.
fn namespace_uri(result: ResolveResult<'_>) -> Result<Option<String>, ParseError> {
    match result {
        ResolveResult::Bound(ns) => Ok(Some(std::str::from_utf8(ns.as_ref())?.to_string())),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(ParseError::UnknownPrefix {
            prefix: String::from_utf8_lossy(&prefix).into_owned(),
        }),
    }
}

/// Attaches a finished node to its parent, or makes it the root.
fn attach(node: Node, stack: &mut [Node], root: &mut Option<Node>) -> Result<(), ParseError> {
    match stack.last_mut() {
        Some(parent) => {
            parent.content.push(Content::Element(node));
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(node);
            Ok(())
        }
        None => Err(ParseError::InvalidStructure {
            message: "document has more than one root element".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<TEI xmlns="http://www.tei-c.org/ns/1.0" xmlns:rng="http://relaxng.org/ns/structure/1.0">
    <classSpec ident="att.typed" type="atts" module="MEI.shared">
        <desc>Typed and labelled.</desc>
        <attList>
            <attDef ident="n"><datatype><rng:data type="NMTOKEN"/></datatype></attDef>
        </attList>
    </classSpec>
</TEI>"#;

    #[test]
    fn test_load_resolves_namespaces() {
        let doc = load_tree(DOC).expect("Failed to load");
        assert!(doc.root.is(TEI_NS, "TEI"));

        let class = doc.find_all(TEI_NS, "classSpec");
        assert_eq!(class.len(), 1);
        assert_eq!(class[0].attr("ident"), Some("att.typed"));

        let data = doc.find_all(RNG_NS, "data");
        assert_eq!(data.len(), 1);
        assert_eq!(data[0].attr("type"), Some("NMTOKEN"));
        assert!(doc.find_all(TEI_NS, "data").is_empty());
    }

    #[test]
    fn test_text_content() {
        let doc = load_tree(DOC).expect("Failed to load");
        let desc = doc.find_all(TEI_NS, "desc");
        assert_eq!(desc[0].text_content(), "Typed and labelled.");
    }

    #[test]
    fn test_descendants_in_document_order() {
        let doc = load_tree(DOC).expect("Failed to load");
        let names: Vec<&str> = doc.root.descendants().map(|n| n.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["classSpec", "desc", "attList", "attDef", "datatype", "data"]
        );
    }

    #[test]
    fn test_prefixed_default_namespace() {
        let xml = r#"<tei:TEI xmlns:tei="http://www.tei-c.org/ns/1.0"><tei:elementSpec ident="note"/></tei:TEI>"#;
        let doc = load_tree(xml).expect("Failed to load");
        assert_eq!(doc.find_all(TEI_NS, "elementSpec").len(), 1);
    }

    #[test]
    fn test_mixed_content_keeps_document_order() {
        let xml = r#"<TEI xmlns="http://www.tei-c.org/ns/1.0"><desc>Indicates the <gi>note</gi> duration &amp; more&#x21;</desc></TEI>"#;
        let doc = load_tree(xml).expect("Failed to load");
        let desc = doc.find_all(TEI_NS, "desc");
        assert_eq!(desc[0].text_content(), "Indicates the note duration & more!");
        assert_eq!(desc[0].children().count(), 1);
    }

    #[test]
    fn test_escaped_attribute_value() {
        let xml = r#"<TEI xmlns="http://www.tei-c.org/ns/1.0" xml:id="a&amp;b"/>"#;
        let doc = load_tree(xml).expect("Failed to load");
        assert_eq!(doc.root.attr("xml:id"), Some("a&b"));
        assert!(doc.root.attr("xmlns").is_none());
    }

    #[test]
    fn test_unknown_entity_is_error() {
        let err = load_tree("<TEI><desc>&nbsp;</desc></TEI>").expect_err("should fail");
        assert!(matches!(err, ParseError::UnknownEntity { .. }));
    }

    #[test]
    fn test_duplicate_attribute_is_error() {
        let err = load_tree(r#"<TEI ident="a" ident="b"/>"#).expect_err("should fail");
        assert!(matches!(err, ParseError::Attr(_)));
    }

    #[test]
    fn test_undeclared_prefix_is_error() {
        let err = load_tree("<tei:TEI/>").expect_err("should fail");
        assert!(matches!(err, ParseError::UnknownPrefix { .. }));
    }

    #[test]
    fn test_empty_document_is_error() {
        assert!(load_tree("").is_err());
    }

    #[test]
    fn test_malformed_document_is_error() {
        assert!(load_tree("<a><b></a>").is_err());
    }
}
