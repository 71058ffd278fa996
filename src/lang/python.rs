//! Python profile table and conventions.
//!
//! Privacy follows the leading-underscore convention; dunder names are part
//! of the protocol surface and stay. Decorators arrive through the
//! `decorated_definition` wrapper node. Function bodies are indentation
//! blocks with a possible leading docstring.

use once_cell::sync::Lazy;
use regex::Regex;
use tree_sitter::Node;

use crate::ast::{self, body_field, name_field};
use crate::collect::SyntaxConventions;
use crate::lang::LanguageSpec;
use crate::placeholder::CommentStyle;
use crate::profile::{ProfileSpec, ProfileTable, TableError};
use crate::trim::LiteralKind;

static DUNDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^__\w+__$").expect("dunder pattern"));

pub fn spec() -> LanguageSpec {
    LanguageSpec {
        comment: CommentStyle::HASH,
        conventions: SyntaxConventions {
            decorator_wrapper: Some("decorated_definition"),
            decorator_kinds: &["decorator"],
            comment_kinds: &["comment"],
            extract_name: declared_name,
        },
        import_kinds: &["import_statement", "import_from_statement"],
        literal_kind,
        body_delimited: false,
        build_table: table,
    }
}

fn name_is_public(name: &str) -> bool {
    !name.starts_with('_') || DUNDER.is_match(name)
}

fn is_public(node: Node, source: &[u8]) -> bool {
    name_field(node, source)
        .map(|name| name_is_public(&name))
        .unwrap_or(true)
}

/// The nearest enclosing definition decides method-ness; wrapper and block
/// nodes in between are skipped.
fn enclosing_scope_is_class(node: Node, _source: &[u8]) -> bool {
    let mut current = node.parent();
    while let Some(parent) = current {
        match parent.kind() {
            "class_definition" => return true,
            "function_definition" | "module" => return false,
            _ => current = parent.parent(),
        }
    }
    false
}

/// Class-level assignments: privacy judged by the left-hand identifier.
fn assignment_is_public(node: Node, source: &[u8]) -> bool {
    let Some(left) = node.child_by_field_name("left") else {
        return true;
    };
    if left.kind() != "identifier" {
        return true;
    }
    name_is_public(ast::node_text(left, source))
}

/// Name of a definition, or the left-hand side of an assignment.
fn declared_name(node: Node, source: &[u8]) -> Option<String> {
    name_field(node, source).or_else(|| {
        node.child_by_field_name("left")
            .map(|left| ast::node_text(left, source).to_string())
    })
}

/// Leading docstring of a block: its first statement when that statement is
/// a bare string expression.
fn block_docstring<'t>(body: Node<'t>, _source: &[u8]) -> Option<Node<'t>> {
    let first = body.child(0)?;
    if first.kind() != "expression_statement" {
        return None;
    }
    let expr = first.child(0)?;
    (expr.kind() == "string").then_some(first)
}

fn table() -> Result<ProfileTable, TableError> {
    // Declaration order is the tie-break: "method" claims definitions whose
    // nearest scope is a class, then "function" takes the rest.
    ProfileTable::builder()
        .profile(
            ProfileSpec::new("method")
                .inherits("function")
                .filter(enclosing_scope_is_class),
        )
        .profile(
            ProfileSpec::new("function")
                .query("(function_definition) @def")
                .visibility(is_public)
                .with_body(body_field)
                .docstring(block_docstring),
        )
        .profile(
            ProfileSpec::new("class")
                .query("(class_definition) @def")
                .visibility(is_public),
        )
        .profile(
            ProfileSpec::new("class_attribute")
                .query("(class_definition body: (block (expression_statement (assignment) @def)))")
                .visibility(assignment_is_public),
        )
        .build()
}

fn literal_kind(node: Node, _source: &[u8]) -> Option<LiteralKind> {
    match node.kind() {
        "list" => Some(LiteralKind::Sequence {
            open: "[",
            close: "]",
        }),
        "tuple" => Some(LiteralKind::Sequence {
            open: "(",
            close: ")",
        }),
        "set" => Some(LiteralKind::Sequence {
            open: "{",
            close: "}",
        }),
        "dictionary" => Some(LiteralKind::KeyValue {
            open: "{",
            close: "}",
            require_all_keys: false,
        }),
        // Statement-position strings are docstrings; those belong to the
        // body trimmer, never the literal trimmer.
        "string" => {
            let in_statement_position = node
                .parent()
                .is_some_and(|p| p.kind() == "expression_statement");
            (!in_statement_position).then_some(LiteralKind::Quoted)
        }
        _ => None,
    }
}
