//! TypeScript and JavaScript profile tables and conventions.
//!
//! Top-level declarations are public API only when an `export_statement`
//! wraps them. Class members are private through an `accessibility_modifier`
//! or a `#`-name. The JavaScript table is the subset of the TypeScript one
//! that its grammar can express.

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
        conventions: conventions(),
        import_kinds: &["import_statement"],
        literal_kind,
        body_delimited: true,
        build_table: table,
    }
}

pub fn javascript_spec() -> LanguageSpec {
    LanguageSpec {
        comment: CommentStyle::SLASHES,
        conventions: conventions(),
        import_kinds: &["import_statement"],
        literal_kind,
        body_delimited: true,
        build_table: javascript_table,
    }
}

fn conventions() -> SyntaxConventions {
    SyntaxConventions {
        decorator_wrapper: None,
        decorator_kinds: &["decorator"],
        comment_kinds: &["comment"],
        extract_name: name_field,
    }
}

/// Only module-scope declarations are judged; nested declarations follow
/// their surroundings.
fn at_top_level(node: Node, _source: &[u8]) -> bool {
    node.parent()
        .map(|p| matches!(p.kind(), "program" | "export_statement"))
        .unwrap_or(false)
}

fn is_exported(node: Node, _source: &[u8]) -> bool {
    node.parent()
        .map(|p| p.kind() == "export_statement")
        .unwrap_or(false)
}

/// Class member privacy: `private`/`protected` modifier or a `#`-name.
fn member_is_public(node: Node, source: &[u8]) -> bool {
    if let Some(modifier) = ast::child_of_kind(node, "accessibility_modifier") {
        let text = ast::node_text(modifier, source);
        if text == "private" || text == "protected" {
            return false;
        }
    }
    if let Some(name) = node.child_by_field_name("name") {
        if name.kind() == "private_property_identifier" {
            return false;
        }
    }
    true
}

fn table() -> Result<ProfileTable, TableError> {
    ProfileTable::builder()
        .profile(
            ProfileSpec::new("function")
                .query("(function_declaration) @def")
                .filter(at_top_level)
                .exported(is_exported)
                .with_body(body_field),
        )
        .profile(
            ProfileSpec::new("class")
                .query("(class_declaration) @def")
                .filter(at_top_level)
                .exported(is_exported)
                .with_body(body_field),
        )
        .profile(
            ProfileSpec::new("interface")
                .query("(interface_declaration) @def")
                .filter(at_top_level)
                .exported(is_exported),
        )
        .profile(
            ProfileSpec::new("type_alias")
                .query("(type_alias_declaration) @def")
                .filter(at_top_level)
                .exported(is_exported),
        )
        .profile(
            ProfileSpec::new("enum")
                .query("(enum_declaration) @def")
                .filter(at_top_level)
                .exported(is_exported),
        )
        .profile(
            ProfileSpec::new("variable")
                .query("(lexical_declaration) @def")
                .filter(at_top_level)
                .exported(is_exported),
        )
        .profile(
            ProfileSpec::new("method")
                .query("(method_definition) @def")
                .visibility(member_is_public)
                .with_body(body_field),
        )
        .profile(
            ProfileSpec::new("field")
                .query("(public_field_definition) @def")
                .visibility(member_is_public),
        )
        .build()
}

fn javascript_table() -> Result<ProfileTable, TableError> {
    ProfileTable::builder()
        .profile(
            ProfileSpec::new("function")
                .query("(function_declaration) @def")
                .filter(at_top_level)
                .exported(is_exported)
                .with_body(body_field),
        )
        .profile(
            ProfileSpec::new("class")
                .query("(class_declaration) @def")
                .filter(at_top_level)
                .exported(is_exported)
                .with_body(body_field),
        )
        .profile(
            ProfileSpec::new("variable")
                .query("(lexical_declaration) @def")
                .filter(at_top_level)
                .exported(is_exported),
        )
        .profile(
            ProfileSpec::new("method")
                .query("(method_definition) @def")
                .visibility(member_is_public)
                .with_body(body_field),
        )
        .profile(
            ProfileSpec::new("field")
                .query("(field_definition) @def")
                .visibility(member_is_public),
        )
        .build()
}

fn literal_kind(node: Node, _source: &[u8]) -> Option<LiteralKind> {
    match node.kind() {
        "array" => Some(LiteralKind::Sequence {
            open: "[",
            close: "]",
        }),
        "object" => Some(LiteralKind::KeyValue {
            open: "{",
            close: "}",
            require_all_keys: false,
        }),
        "string" | "template_string" => Some(LiteralKind::Quoted),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tree_sitter::Parser;

    fn parse(source: &str) -> tree_sitter::Tree {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())
            .unwrap();
        parser.parse(source, None).unwrap()
    }

    fn first_node_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
        if node.kind() == kind {
            return Some(node);
        }
        let mut cursor = node.walk();
        let children: Vec<Node> = node.children(&mut cursor).collect();
        children
            .into_iter()
            .find_map(|c| first_node_of_kind(c, kind))
    }

    #[test]
    fn test_export_detection() {
        let source = "export function api() {}\nfunction local() {}\n";
        let tree = parse(source);
        let mut funcs = Vec::new();
        let root = tree.root_node();
        let mut cursor = root.walk();
        for child in root.children(&mut cursor) {
            if let Some(f) = first_node_of_kind(child, "function_declaration") {
                funcs.push(f);
            }
        }
        assert_eq!(funcs.len(), 2);
        assert!(is_exported(funcs[0], source.as_bytes()));
        assert!(!is_exported(funcs[1], source.as_bytes()));
        assert!(at_top_level(funcs[0], source.as_bytes()));
        assert!(at_top_level(funcs[1], source.as_bytes()));
    }

    #[test]
    fn test_private_member_detection() {
        let source = "class S {\n    private count = 0;\n    #secret() {}\n    run() {}\n}\n";
        let tree = parse(source);
        let field = first_node_of_kind(tree.root_node(), "public_field_definition").unwrap();
        assert!(!member_is_public(field, source.as_bytes()));

        let root = tree.root_node();
        let body = first_node_of_kind(root, "class_body").unwrap();
        let mut cursor = body.walk();
        let methods: Vec<Node> = body
            .children(&mut cursor)
            .filter(|c| c.kind() == "method_definition")
            .collect();
        assert_eq!(methods.len(), 2);
        assert!(!member_is_public(methods[0], source.as_bytes()));
        assert!(member_is_public(methods[1], source.as_bytes()));
    }

    #[test]
    fn test_nested_function_not_judged() {
        let source = "export function outer() {\n    function inner() {}\n}\n";
        let tree = parse(source);
        let outer = first_node_of_kind(tree.root_node(), "function_declaration").unwrap();
        let inner = first_node_of_kind(outer.child_by_field_name("body").unwrap(), "function_declaration")
            .unwrap();
        assert!(!at_top_level(inner, source.as_bytes()));
    }
}
