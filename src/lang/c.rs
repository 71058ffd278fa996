//! C profile table and conventions.
//!
//! C has no visibility keywords; `static` storage class makes a file-scope
//! function or variable private to its translation unit, which is the
//! removal rule here. Designated initializer lists trim at pair granularity.

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
            extract_name: declarator_name,
        },
        import_kinds: &["preproc_include"],
        literal_kind,
        body_delimited: true,
        build_table: table,
    }
}

/// Follow the declarator chain down to the declared identifier.
fn declarator_name(node: Node, source: &[u8]) -> Option<String> {
    let mut declarator = node.child_by_field_name("declarator")?;
    loop {
        if declarator.kind() == "identifier" {
            return Some(ast::node_text(declarator, source).to_string());
        }
        match declarator.child_by_field_name("declarator") {
            Some(inner) => declarator = inner,
            None => return None,
        }
    }
}

/// `static` storage class means private to the translation unit.
fn is_external(node: Node, source: &[u8]) -> bool {
    let mut cursor = node.walk();
    let is_static = node
        .children(&mut cursor)
        .any(|c| c.kind() == "storage_class_specifier" && ast::node_text(c, source) == "static");
    !is_static
}

fn table() -> Result<ProfileTable, TableError> {
    ProfileTable::builder()
        .profile(
            ProfileSpec::new("function")
                .query("(function_definition) @def")
                .visibility(is_external)
                .with_body(body_field),
        )
        .profile(
            ProfileSpec::new("variable")
                .query("(translation_unit (declaration) @def)")
                .visibility(is_external),
        )
        .build()
}

fn literal_kind(node: Node, _source: &[u8]) -> Option<LiteralKind> {
    match node.kind() {
        "initializer_list" => {
            let mut cursor = node.walk();
            let designated = node
                .children(&mut cursor)
                .any(|c| c.kind() == "initializer_pair");
            Some(if designated {
                LiteralKind::AtomicPair {
                    open: "{",
                    close: "}",
                }
            } else {
                LiteralKind::Sequence {
                    open: "{",
                    close: "}",
                }
            })
        }
        "string_literal" => Some(LiteralKind::Quoted),
        _ => None,
    }
}
