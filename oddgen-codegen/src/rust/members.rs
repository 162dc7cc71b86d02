//! Member-level code fragments shared by holder and element generation.

use oddgen_schema::ir::ResolvedMember;
use oddgen_schema::resolver::AttType;

/// Returns the field declaration of a member.
pub(crate) fn field_decl(member: &ResolvedMember) -> String {
    format!(
        "    {}: {},\n",
        member.field,
        member.resolved.ty.rust_type()
    )
}

/// Returns the constructor initializer of a member.
pub(crate) fn field_init(member: &ResolvedMember) -> String {
    format!("            {}: {},\n", member.field, member.resolved.default)
}

/// Returns the statement restoring a member to its default.
pub(crate) fn reset_stmt(member: &ResolvedMember) -> String {
    match member.resolved.ty {
        AttType::AlternateEnum(_) => format!("        self.{}.reset();\n", member.field),
        _ => format!(
            "        self.{} = {};\n",
            member.field, member.resolved.default
        ),
    }
}

/// Returns the expression converting `value: &str` into the member type.
pub(crate) fn from_str_expr(member: &ResolvedMember, value: &str) -> String {
    let read = member.resolved.read_fn();
    match member.resolved.ty {
        AttType::Enum(_) | AttType::AlternateEnum(_) => {
            format!("AttConverter.{read}({value}, true)")
        }
        _ => format!("AttConverter.{read}({value})"),
    }
}

/// Returns the expression converting the member of `receiver` to a string.
pub(crate) fn to_str_expr(member: &ResolvedMember, receiver: &str) -> String {
    let write = member.resolved.write_fn();
    match member.resolved.ty {
        AttType::Str => format!("AttConverter.{write}(&{receiver}.{})", member.field),
        AttType::AlternateEnum(_) => {
            format!("AttConverter.{write}({receiver}.{}.value())", member.field)
        }
        _ => format!("AttConverter.{write}({receiver}.{})", member.field),
    }
}

/// Returns the statement storing `value: &str` into the member of `receiver`.
pub(crate) fn assign_stmt(member: &ResolvedMember, receiver: &str, value: &str) -> String {
    let converted = from_str_expr(member, value);
    match member.resolved.ty {
        AttType::AlternateEnum(_) => format!("{receiver}.{}.set({converted})", member.field),
        _ => format!("{receiver}.{} = {converted}", member.field),
    }
}

/// Returns the tagged-value expression of the member of `receiver`.
pub(crate) fn att_value_expr(member: &ResolvedMember, receiver: &str) -> String {
    let field = &member.field;
    match &member.resolved.ty {
        AttType::Int => format!("AttValue::Int({receiver}.{field})"),
        AttType::Double => format!("AttValue::Double({receiver}.{field})"),
        AttType::Char => format!("AttValue::Char({receiver}.{field})"),
        AttType::Str => format!("AttValue::Str({receiver}.{field}.clone())"),
        AttType::Enum(name) | AttType::AlternateEnum(name) => format!(
            "AttValue::Enum {{ type_name: \"{name}\", literal: {} }}",
            to_str_expr(member, receiver)
        ),
    }
}

/// Returns the `set_*`, `get_*` and `has_*` methods of a member.
pub(crate) fn accessor_methods(member: &ResolvedMember) -> String {
    let mut output = String::new();
    let field = &member.field;
    let name = &member.member;
    let default = &member.resolved.default;

    if !member.attribute.description.is_empty() {
        output.push_str(&super::doc_comment(&member.attribute.description, 4));
    }
    match &member.resolved.ty {
        AttType::Str => {
            output.push_str(&format!(
                "    pub fn set_{name}(&mut self, value: impl Into<String>) {{\n"
            ));
            output.push_str(&format!("        self.{field} = value.into();\n"));
            output.push_str("    }\n\n");
            output.push_str("    #[must_use]\n");
            output.push_str(&format!("    pub fn get_{name}(&self) -> &str {{\n"));
            output.push_str(&format!("        &self.{field}\n"));
            output.push_str("    }\n\n");
            output.push_str("    #[must_use]\n");
            output.push_str(&format!("    pub fn has_{name}(&self) -> bool {{\n"));
            output.push_str(&format!("        !self.{field}.is_empty()\n"));
            output.push_str("    }\n\n");
        }
        AttType::AlternateEnum(ty) => {
            output.push_str(&format!(
                "    pub fn set_{name}(&mut self, value: {ty}) {{\n"
            ));
            output.push_str(&format!("        self.{field}.set(value);\n"));
            output.push_str("    }\n\n");
            output.push_str("    #[must_use]\n");
            output.push_str(&format!("    pub fn get_{name}(&self) -> {ty} {{\n"));
            output.push_str(&format!("        self.{field}.value()\n"));
            output.push_str("    }\n\n");
            output.push_str("    #[must_use]\n");
            output.push_str(&format!("    pub fn has_{name}(&self) -> bool {{\n"));
            output.push_str(&format!("        self.{field}.has_value()\n"));
            output.push_str("    }\n\n");
            output.push_str(&format!(
                "    pub fn get_{name}_alternate(&mut self) -> &mut Alternate<{ty}> {{\n"
            ));
            output.push_str(&format!("        &mut self.{field}\n"));
            output.push_str("    }\n\n");
        }
        ty => {
            let rust_type = ty.rust_type();
            output.push_str(&format!(
                "    pub fn set_{name}(&mut self, value: {rust_type}) {{\n"
            ));
            output.push_str(&format!("        self.{field} = value;\n"));
            output.push_str("    }\n\n");
            output.push_str("    #[must_use]\n");
            output.push_str(&format!(
                "    pub fn get_{name}(&self) -> {rust_type} {{\n"
            ));
            output.push_str(&format!("        self.{field}\n"));
            output.push_str("    }\n\n");
            output.push_str("    #[must_use]\n");
            output.push_str(&format!("    pub fn has_{name}(&self) -> bool {{\n"));
            output.push_str(&format!("        self.{field} != {default}\n"));
            output.push_str("    }\n\n");
        }
    }

    output
}

/// Returns the block reading a member from `element` inside `read`.
pub(crate) fn read_block(member: &ResolvedMember) -> String {
    let mut output = String::new();
    let wire = member.wire_name();

    output.push_str(&format!(
        "        if let Some(value) = element.attribute(\"{wire}\") {{\n"
    ));
    output.push_str(&format!(
        "            {};\n",
        assign_stmt(member, "self", "value")
    ));
    output.push_str("            if remove_attr {\n");
    output.push_str(&format!(
        "                element.remove_attribute(\"{wire}\");\n"
    ));
    output.push_str("            }\n");
    output.push_str("            has_attribute = true;\n");
    output.push_str("        }\n");

    output
}

/// Returns the block writing a member to `element` inside `write`.
pub(crate) fn write_block(member: &ResolvedMember) -> String {
    let mut output = String::new();

    output.push_str(&format!("        if self.has_{}() {{\n", member.member));
    output.push_str(&format!(
        "            element.append_attribute(\"{}\", {});\n",
        member.wire_name(),
        to_str_expr(member, "self")
    ));
    output.push_str("            was_written = true;\n");
    output.push_str("        }\n");

    output
}

/// Returns the dispatch-table row of a member.
pub(crate) fn accessor_row(member: &ResolvedMember) -> String {
    let mut output = String::new();
    let name = &member.member;
    let field = &member.field;

    output.push_str("    AttAccessor {\n");
    output.push_str(&format!("        name: \"{}\",\n", member.wire_name()));
    output.push_str(&format!(
        "        get: |att| att.has_{name}().then(|| {}),\n",
        to_str_expr(member, "att")
    ));
    output.push_str(&format!(
        "        set: |att, value| {},\n",
        assign_stmt(member, "att", "value")
    ));
    let copy = match member.resolved.ty {
        AttType::Str => format!("dst.{field} = src.{field}.clone()"),
        _ => format!("dst.{field} = src.{field}"),
    };
    output.push_str(&format!("        copy: |src, dst| {copy},\n"));
    output.push_str(&format!(
        "        value: |att| att.has_{name}().then(|| {}),\n",
        att_value_expr(member, "att")
    ));
    output.push_str("    },\n");

    output
}
