//! Identifier formatting.
//!
//! Pure string transforms that turn schema names (`att.duration.gestural`,
//! `data.BOOLEAN`, `xlink:href`, `dur-ges`) into the identifiers used by the
//! generated Rust code.

use crate::tree::{XLINK_NS, XML_NS};

/// Reserved identifier attribute class.
pub const ID_CLASS: &str = "att.id";

/// Reserved identifier attribute.
pub const ID_ATTRIBUTE: &str = "id";

/// Known namespace prefixes and their URIs.
const NAMESPACES: &[(&str, &str)] = &[("xml", XML_NS), ("xlink", XLINK_NS)];

/// Rust keywords that must be escaped when used as field names.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do", "dyn",
    "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in", "let",
    "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref", "return",
    "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized", "use",
    "virtual", "where", "while", "yield",
];

/// Keywords that cannot be raw identifiers.
const NON_RAW_KEYWORDS: &[&str] = &["crate", "self", "Self", "super"];

/// Capitalizes the first character of a string.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Converts a dotted name to CamelCase.
///
/// Splits on `.` and capitalizes the first character of each segment,
/// leaving the rest of the segment untouched: `duration.gestural` becomes
/// `DurationGestural`.
#[must_use]
pub fn camel_case(name: &str) -> String {
    name.split('.').map(capitalize).collect()
}

/// Converts a dotted name to lowerCamel.
#[must_use]
pub fn lower_camel(name: &str) -> String {
    let camel = camel_case(name);
    let mut chars = camel.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Normalizes a hyphenated identifier: `foo-bar` becomes `fooBar`.
#[must_use]
pub fn normalize_hyphens(ident: &str) -> String {
    let mut parts = ident.split('-');
    let mut result = parts.next().unwrap_or_default().to_string();
    for part in parts {
        result.push_str(&capitalize(part));
    }
    result
}

/// Strips a leading `att.` from a class name.
#[must_use]
pub fn strip_att_prefix(name: &str) -> &str {
    name.strip_prefix("att.").unwrap_or(name)
}

/// Splits a `prefix:name` identifier.
#[must_use]
pub fn split_namespace(ident: &str) -> Option<(&str, &str)> {
    ident.split_once(':')
}

/// Returns the namespace URI for a known prefix.
#[must_use]
pub fn namespace_uri(prefix: &str) -> Option<&'static str> {
    NAMESPACES
        .iter()
        .find(|(p, _)| *p == prefix)
        .map(|(_, uri)| *uri)
}

/// Returns the prefix for a known namespace URI.
#[must_use]
pub fn namespace_prefix(uri: &str) -> Option<&'static str> {
    NAMESPACES
        .iter()
        .find(|(_, u)| *u == uri)
        .map(|(prefix, _)| *prefix)
}

/// Sanitizes a value literal into an identifier fragment.
///
/// `.`, `-` and `,` become `_`; `+` becomes `plus`.
#[must_use]
pub fn sanitize_literal(value: &str) -> String {
    let mut result = String::with_capacity(value.len() + 4);
    for c in value.chars() {
        match c {
            '.' | '-' | ',' => result.push('_'),
            '+' => result.push_str("plus"),
            _ => result.push(c),
        }
    }
    result
}

/// Formats the name of a list scoped to a class attribute.
///
/// `att.accid@func` becomes `Accid_FUNC`.
#[must_use]
pub fn scoped_list_name(owner: &str, attribute: &str) -> String {
    let suffix: String = attribute
        .to_uppercase()
        .chars()
        .filter(|c| *c != '.' && *c != ':')
        .collect();
    format!("{}_{}", camel_case(strip_att_prefix(owner)), suffix)
}

/// Formats a global datatype name: `data.BOOLEAN` becomes `data_BOOLEAN`.
#[must_use]
pub fn formatted_type(name: &str) -> String {
    name.replace('.', "_")
}

/// Returns the literal prefix of a formatted type name.
#[must_use]
pub fn value_prefix(formatted: &str) -> &str {
    formatted.strip_prefix("data_").unwrap_or(formatted)
}

/// Derives the converter base name of a formatted type.
///
/// `data_BOOLEAN` becomes `Boolean`, `Accid_FUNC` becomes `AccidFunc`.
#[must_use]
pub fn converter_base(formatted: &str) -> String {
    let Some((left, right)) = formatted.split_once('_') else {
        return capitalize(formatted);
    };
    let rest: String = right
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect();
    if left == "data" {
        rest
    } else {
        format!("{}{}", capitalize(left), rest)
    }
}

/// Returns the `(read, write)` converter names for a base name.
#[must_use]
pub fn converter_pair(base: &str) -> (String, String) {
    (format!("StrTo{base}"), format!("{base}ToStr"))
}

/// Converts a string to snake_case.
#[must_use]
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() && i > 0 && !result.ends_with('_') {
            result.push('_');
        }
        result.push(c.to_ascii_lowercase());
    }
    result
}

/// Converts a string to PascalCase.
#[must_use]
pub fn to_pascal_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = true;

    for c in s.chars() {
        if c == '_' || c == '-' || c == '.' {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

/// Returns the unescaped snake_case member name of an attribute.
///
/// Used to build accessor names (`set_dur_ges`).
#[must_use]
pub fn member_name(ident: &str) -> String {
    to_snake_case(&lower_camel(ident))
}

/// Returns the field name of an attribute, escaping Rust keywords.
#[must_use]
pub fn field_name(ident: &str) -> String {
    let name = member_name(ident);
    if NON_RAW_KEYWORDS.contains(&name.as_str()) {
        format!("{name}_")
    } else if KEYWORDS.contains(&name.as_str()) {
        format!("r#{name}")
    } else {
        name
    }
}

/// Returns the class-ID literal of an attribute class: `ATT_DURATIONGESTURAL`.
#[must_use]
pub fn class_id_literal(class: &str) -> String {
    format!("ATT_{}", camel_case(strip_att_prefix(class)).to_uppercase())
}

/// Returns the holder type name of an attribute class: `AttDurationGestural`.
#[must_use]
pub fn holder_name(class: &str) -> String {
    format!("Att{}", camel_case(strip_att_prefix(class)))
}

/// Returns the holder field name used by element types: `att_duration_gestural`.
#[must_use]
pub fn holder_field(class: &str) -> String {
    format!("att_{}", member_name(strip_att_prefix(class)))
}

/// Returns the element type name: `beamSpan` becomes `BeamSpan`.
#[must_use]
pub fn element_type_name(name: &str) -> String {
    to_pascal_case(name)
}

/// Returns the module key of a schema module: `MEI.shared` becomes `shared`.
#[must_use]
pub fn module_key(module: &str) -> String {
    module
        .rsplit('.')
        .next()
        .unwrap_or(module)
        .to_lowercase()
}

/// Returns true if `s` is a valid identifier fragment.
#[must_use]
pub fn is_identifier_fragment(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("duration.gestural"), "DurationGestural");
        assert_eq!(camel_case("typed"), "Typed");
        assert_eq!(lower_camel("dur.ges"), "durGes");
    }

    #[test]
    fn test_normalize_hyphens() {
        assert_eq!(normalize_hyphens("foo-bar"), "fooBar");
        assert_eq!(normalize_hyphens("glyph-auth-x"), "glyphAuthX");
        assert_eq!(normalize_hyphens("plain"), "plain");
    }

    #[test]
    fn test_sanitize_literal() {
        assert_eq!(sanitize_literal("4.5"), "4_5");
        assert_eq!(sanitize_literal("C+"), "Cplus");
        assert_eq!(sanitize_literal("a-b,c"), "a_b_c");
    }

    #[test]
    fn test_scoped_list_name() {
        assert_eq!(scoped_list_name("att.accid", "func"), "Accid_FUNC");
        assert_eq!(
            scoped_list_name("att.meter.sig", "xml:form.x"),
            "MeterSig_XMLFORMX"
        );
    }

    #[test]
    fn test_converter_base() {
        assert_eq!(converter_base("data_BOOLEAN"), "Boolean");
        assert_eq!(converter_base("data_DURATION_gestural"), "DurationGestural");
        assert_eq!(converter_base("Accid_FUNC"), "AccidFunc");
        assert_eq!(converter_base("plain"), "Plain");
        assert_eq!(
            converter_pair("Boolean"),
            ("StrToBoolean".to_string(), "BooleanToStr".to_string())
        );
    }

    #[test]
    fn test_value_prefix() {
        assert_eq!(value_prefix("data_BOOLEAN"), "BOOLEAN");
        assert_eq!(value_prefix("Accid_FUNC"), "Accid_FUNC");
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("StrToBoolean"), "str_to_boolean");
        assert_eq!(to_snake_case("durGes"), "dur_ges");
        assert_eq!(to_snake_case("size"), "size");
    }

    #[test]
    fn test_field_name_escapes_keywords() {
        assert_eq!(field_name("type"), "r#type");
        assert_eq!(field_name("self"), "self_");
        assert_eq!(field_name("dur.ges"), "dur_ges");
        assert_eq!(member_name("type"), "type");
    }

    #[test]
    fn test_class_names() {
        assert_eq!(class_id_literal("att.duration.gestural"), "ATT_DURATIONGESTURAL");
        assert_eq!(holder_name("att.duration.gestural"), "AttDurationGestural");
        assert_eq!(holder_field("att.duration.gestural"), "att_duration_gestural");
        assert_eq!(element_type_name("beamSpan"), "BeamSpan");
    }

    #[test]
    fn test_namespaces() {
        assert_eq!(split_namespace("xlink:href"), Some(("xlink", "href")));
        assert_eq!(namespace_uri("xlink"), Some(XLINK_NS));
        assert_eq!(namespace_prefix(XML_NS), Some("xml"));
        assert_eq!(namespace_uri("svg"), None);
    }

    #[test]
    fn test_module_key() {
        assert_eq!(module_key("MEI.shared"), "shared");
        assert_eq!(module_key("MEI"), "mei");
    }

    #[test]
    fn test_identifier_fragment() {
        assert!(is_identifier_fragment("BOOLEAN_true"));
        assert!(!is_identifier_fragment("a b"));
        assert!(!is_identifier_fragment(""));
    }
}
