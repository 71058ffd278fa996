//! Thin helpers over the tree-sitter node and query API.
//!
//! Everything the engine knows about a parse tree goes through here: text
//! slicing, line spans, sibling walks, and query execution. Nothing else in
//! the crate touches grammar-library specifics beyond `Node` itself.

use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Query, QueryCursor};

/// Text of a node as a borrowed slice of the source buffer.
pub fn node_text<'a>(node: Node, source: &'a [u8]) -> &'a str {
    let slice = source.get(node.start_byte()..node.end_byte()).unwrap_or(&[]);
    std::str::from_utf8(slice).unwrap_or("")
}

/// Inclusive start row and end row of a node, zero-based.
pub fn line_span(node: Node) -> (usize, usize) {
    (node.start_position().row, node.end_position().row)
}

/// Run a compiled query against `root`, yielding every captured node in
/// source order together with its capture tag index.
pub fn query_captures<'t>(
    query: &Query,
    root: Node<'t>,
    source: &[u8],
) -> Vec<(Node<'t>, u32)> {
    let mut cursor = QueryCursor::new();
    let mut out = Vec::new();
    let mut matches = cursor.matches(query, root, source);
    while let Some(m) = matches.next() {
        for capture in m.captures {
            out.push((capture.node, capture.index));
        }
    }
    out.sort_by_key(|(node, _)| (node.start_byte(), node.end_byte()));
    out
}

/// First child of `node` with the given kind, if any.
pub fn child_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find(|c| c.kind() == kind);
    found
}

/// True when some ancestor of `node` has one of the given kinds.
pub fn has_ancestor_of_kind(node: Node, kinds: &[&str]) -> bool {
    let mut current = node.parent();
    while let Some(parent) = current {
        if kinds.contains(&parent.kind()) {
            return true;
        }
        current = parent.parent();
    }
    false
}

/// Default body locator: the node's `body` field.
pub fn body_field(node: Node<'_>) -> Option<Node<'_>> {
    node.child_by_field_name("body")
}

/// Default name extraction: text of the node's `name` field.
pub fn name_field(node: Node, source: &[u8]) -> Option<String> {
    node.child_by_field_name("name")
        .map(|n| node_text(n, source).to_string())
}

/// Indentation (spaces/tabs) of the line containing byte `offset` in `text`.
pub fn line_indent_at(text: &str, offset: usize) -> &str {
    let upto = offset.min(text.len());
    let line_start = text[..upto].rfind('\n').map(|p| p + 1).unwrap_or(0);
    let rest = &text[line_start..];
    let indent_len = rest
        .char_indices()
        .find(|&(_, c)| c != ' ' && c != '\t')
        .map(|(i, _)| i)
        .unwrap_or(rest.len());
    &rest[..indent_len]
}
