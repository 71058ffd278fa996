//! Go profile table and conventions.
//!
//! Export follows the capitalization rule: an uppercase first rune means
//! exported. Queries capture the name tokens, which the collector resolves
//! to their parent declarations. Grouped `type`/`const`/`var` declarations
//! are judged by their first spec's name.

use tree_sitter::Node;

use crate::ast::{self, body_field};
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
            decorator_kinds: &[],
            comment_kinds: &["comment"],
            extract_name: declared_name,
        },
        import_kinds: &["import_declaration"],
        literal_kind,
        body_delimited: true,
        build_table: table,
    }
}

/// Name of a declaration: its `name` field, or the first spec's name for
/// grouped declarations.
fn declared_name(node: Node, source: &[u8]) -> Option<String> {
    if let Some(name) = node.child_by_field_name("name") {
        return Some(ast::node_text(name, source).to_string());
    }
    let mut cursor = node.walk();
    let spec = node
        .children(&mut cursor)
        .find(|c| matches!(c.kind(), "type_spec" | "const_spec" | "var_spec"))?;
    spec.child_by_field_name("name")
        .map(|n| ast::node_text(n, source).to_string())
}

fn is_exported(node: Node, source: &[u8]) -> bool {
    declared_name(node, source)
        .and_then(|name| name.chars().next())
        .map(|first| first.is_uppercase())
        // Unnamed: leave it alone.
        .unwrap_or(true)
}

fn table() -> Result<ProfileTable, TableError> {
    ProfileTable::builder()
        .profile(
            ProfileSpec::new("function")
                .query("(function_declaration name: (identifier) @def)")
                .exported(is_exported)
                .with_body(body_field),
        )
        .profile(
            ProfileSpec::new("method")
                .query("(method_declaration name: (field_identifier) @def)")
                .exported(is_exported)
                .with_body(body_field),
        )
        .profile(
            ProfileSpec::new("type")
                .query("(source_file (type_declaration) @def)")
                .exported(is_exported),
        )
        .profile(
            ProfileSpec::new("constant")
                .query("(source_file [(const_declaration) (var_declaration)] @def)")
                .exported(is_exported),
        )
        .profile(
            ProfileSpec::new("field")
                .query("(field_declaration name: (field_identifier) @def)")
                .exported(is_exported),
        )
        .build()
}

fn literal_kind(node: Node, _source: &[u8]) -> Option<LiteralKind> {
    match node.kind() {
        "composite_literal" => {
            let body = node.child_by_field_name("body")?;
            let mut cursor = body.walk();
            let keyed = body
                .children(&mut cursor)
                .any(|c| c.kind() == "keyed_element");
            Some(if keyed {
                LiteralKind::KeyValue {
                    open: "{",
                    close: "}",
                    require_all_keys: false,
                }
            } else {
                LiteralKind::Sequence {
                    open: "{",
                    close: "}",
                }
            })
        }
        "interpreted_string_literal" | "raw_string_literal" => Some(LiteralKind::Quoted),
        _ => None,
    }
}
