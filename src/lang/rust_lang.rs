//! Rust profile table and conventions.
//!
//! Visibility follows the `visibility_modifier` node: any `pub` form counts
//! as public API. Attributes are the decorator set; doc comments directly
//! above a removed item travel with it. Struct literals are
//! structural-literal initialization, so trimming them keeps every field.

use tree_sitter::Node;

use crate::ast::{self, body_field, name_field};
use crate::collect::SyntaxConventions;
use crate::lang::LanguageSpec;
use crate::placeholder::CommentStyle;
use crate::profile::{ProfileSpec, ProfileTable, TableError};
use crate::trim::LiteralKind;

pub fn spec() -> LanguageSpec {
    LanguageSpec {
        comment: CommentStyle::SLASHES,
        conventions: SyntaxConventions {
            decorator_wrapper: None,
            decorator_kinds: &["attribute_item"],
            comment_kinds: &["line_comment", "block_comment"],
            extract_name: name_field,
        },
        import_kinds: &["use_declaration"],
        literal_kind,
        body_delimited: true,
        build_table: table,
    }
}

fn is_public(node: Node, source: &[u8]) -> bool {
    ast::child_of_kind(node, "visibility_modifier")
        .map(|v| ast::node_text(v, source).starts_with("pub"))
        .unwrap_or(false)
}

/// Methods are only judged inside inherent impls; trait impl members follow
/// the trait's surface and stay.
fn in_inherent_impl(node: Node, _source: &[u8]) -> bool {
    node.parent()
        .and_then(|list| list.parent())
        .map(|imp| imp.kind() == "impl_item" && imp.child_by_field_name("trait").is_none())
        .unwrap_or(false)
}

/// `#[macro_export]` on a preceding attribute exports a macro.
fn macro_is_exported(node: Node, source: &[u8]) -> bool {
    let mut current = node.prev_sibling();
    while let Some(prev) = current {
        match prev.kind() {
            "attribute_item" => {
                if ast::node_text(prev, source).contains("macro_export") {
                    return true;
                }
            }
            "line_comment" | "block_comment" => {}
            _ => break,
        }
        current = prev.prev_sibling();
    }
    false
}

fn table() -> Result<ProfileTable, TableError> {
    ProfileTable::builder()
        .profile(
            ProfileSpec::new("method")
                .query("(impl_item body: (declaration_list (function_item) @def))")
                .filter(in_inherent_impl)
                .visibility(is_public)
                .with_body(body_field),
        )
        .profile(
            ProfileSpec::new("function")
                .query("(source_file (function_item) @def)")
                .visibility(is_public)
                .with_body(body_field),
        )
        .profile(
            ProfileSpec::new("struct")
                .query("(struct_item) @def")
                .visibility(is_public),
        )
        .profile(
            ProfileSpec::new("enum")
                .query("(enum_item) @def")
                .visibility(is_public),
        )
        .profile(
            ProfileSpec::new("trait")
                .query("(trait_item) @def")
                .visibility(is_public),
        )
        .profile(
            ProfileSpec::new("field")
                .query("(field_declaration) @def")
                .visibility(is_public),
        )
        .profile(
            ProfileSpec::new("constant")
                .query("[(const_item) (static_item)] @def")
                .visibility(is_public),
        )
        .profile(
            ProfileSpec::new("type_alias")
                .query("(type_item) @def")
                .visibility(is_public),
        )
        .profile(
            ProfileSpec::new("module")
                .query("(mod_item) @def")
                .visibility(is_public),
        )
        .profile(
            ProfileSpec::new("macro")
                .query("(macro_definition) @def")
                .exported(macro_is_exported),
        )
        .build()
}

fn literal_kind(node: Node, _source: &[u8]) -> Option<LiteralKind> {
    match node.kind() {
        "array_expression" => Some(LiteralKind::Sequence {
            open: "[",
            close: "]",
        }),
        "struct_expression" => Some(LiteralKind::KeyValue {
            open: "{",
            close: "}",
            require_all_keys: true,
        }),
        "string_literal" | "raw_string_literal" => Some(LiteralKind::Quoted),
        _ => None,
    }
}
