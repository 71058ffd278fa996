//! Element collection: from profile queries to well-formed removal ranges.
//!
//! One collection pass runs every profile in table order against the parse
//! tree, resolves captures to definition nodes, attaches decorators, extends
//! ranges over trailing separators, and finally drops candidates nested
//! inside other candidates. Elements are created fresh per pass and never
//! mutated afterwards; the tree itself is read-only throughout.

use std::collections::HashSet;

use tree_sitter::{Node, Query};

use crate::ast;
use crate::profile::{ElementProfile, ProfileTable};

/// Extended byte span of a removal candidate. Distinct from the definition
/// node's own range: it may reach back over decorators and attached comments
/// and forward over one trailing separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ElementRange {
    pub start: usize,
    pub end: usize,
}

impl ElementRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// True when `self` contains `other` and the two spans differ.
    pub fn strictly_contains(&self, other: &ElementRange) -> bool {
        self.start <= other.start && other.end <= self.end && self != other
    }
}

/// Sibling-walk and naming conventions of one language, consumed by the
/// collector. Pure data, supplied alongside the profile table.
#[derive(Clone, Copy)]
pub struct SyntaxConventions {
    /// Grammar wrapper bundling decorators with the definition, if the
    /// language has one (e.g. Python's `decorated_definition`).
    pub decorator_wrapper: Option<&'static str>,
    pub decorator_kinds: &'static [&'static str],
    pub comment_kinds: &'static [&'static str],
    pub extract_name: fn(Node<'_>, &[u8]) -> Option<String>,
}

/// One removal candidate, alive for a single file-reduction pass.
#[derive(Debug, Clone)]
pub struct CodeElement<'t, 'p> {
    pub profile: &'p ElementProfile,
    pub node: Node<'t>,
    pub name: Option<String>,
    pub is_public: bool,
    pub decorators: Vec<Node<'t>>,
    pub body: Option<Node<'t>>,
    pub docstring: Option<Node<'t>>,
    pub range: ElementRange,
}

/// Everything one collection pass produced.
pub struct Collection<'t, 'p> {
    /// All matched elements, public and private, in source order.
    pub elements: Vec<CodeElement<'t, 'p>>,
    /// Captures that could not be resolved to a definition node.
    pub unresolved: usize,
}

/// Run every profile of `table` against `root`.
///
/// `queries` must be compiled from the table's profiles, in table order.
/// When two profiles match the same definition node, the first profile in
/// table order claims it.
pub fn collect_elements<'t, 'p>(
    table: &'p ProfileTable,
    queries: &[Query],
    conventions: &SyntaxConventions,
    root: Node<'t>,
    source: &[u8],
) -> Collection<'t, 'p> {
    debug_assert_eq!(table.len(), queries.len());

    let mut claimed: HashSet<usize> = HashSet::new();
    let mut elements = Vec::new();
    let mut unresolved = 0usize;

    for (profile, query) in table.profiles().iter().zip(queries) {
        for (captured, _tag) in ast::query_captures(query, root, source) {
            let Some(definition) = resolve_definition(captured) else {
                unresolved += 1;
                continue;
            };
            if !profile.accepts(definition, source) {
                continue;
            }
            if !claimed.insert(definition.id()) {
                continue;
            }

            let is_public = profile.is_public(definition, source);
            let (decorators, start) = attach_decorators(definition, conventions, source);
            let end = extend_past_separator(source, definition.end_byte());

            let body = profile.body_locator.and_then(|locate| locate(definition));
            let docstring = match (body, profile.docstring_locator) {
                (Some(body), Some(locate)) => locate(body, source),
                _ => None,
            };

            elements.push(CodeElement {
                profile,
                node: definition,
                name: (conventions.extract_name)(definition, source),
                is_public,
                decorators,
                body,
                docstring,
                range: ElementRange::new(start, end),
            });
        }
    }

    elements.sort_by_key(|el| (el.range.start, el.range.end));
    Collection {
        elements,
        unresolved,
    }
}

/// A bare name token resolves to its immediate parent definition; any node
/// with structure already is the definition.
fn resolve_definition(captured: Node<'_>) -> Option<Node<'_>> {
    if captured.child_count() == 0 {
        captured.parent()
    } else {
        Some(captured)
    }
}

/// Compute the decorator list and the extended range start for `node`.
fn attach_decorators<'t>(
    node: Node<'t>,
    conventions: &SyntaxConventions,
    source: &[u8],
) -> (Vec<Node<'t>>, usize) {
    if let Some(wrapper) = conventions.decorator_wrapper {
        if let Some(parent) = node.parent() {
            if parent.kind() == wrapper {
                let mut cursor = parent.walk();
                let decorators = parent
                    .children(&mut cursor)
                    .filter(|c| conventions.decorator_kinds.contains(&c.kind()))
                    .collect();
                return (decorators, parent.start_byte());
            }
        }
    }

    let mut start = node.start_byte();
    let mut decorators = Vec::new();
    let mut current = node.prev_sibling();
    while let Some(prev) = current {
        let kind = prev.kind();
        if conventions.decorator_kinds.contains(&kind) {
            decorators.push(prev);
            start = prev.start_byte();
        } else if conventions.comment_kinds.contains(&kind)
            && gap_is_tight(source, prev.end_byte(), start)
        {
            start = prev.start_byte();
        } else {
            break;
        }
        current = prev.prev_sibling();
    }
    decorators.reverse();
    (decorators, start)
}

/// True when the bytes between `from` and `to` are whitespace with at most
/// one line break — a comment separated by a blank line is not attached.
fn gap_is_tight(source: &[u8], from: usize, to: usize) -> bool {
    let Some(gap) = source.get(from..to) else {
        return false;
    };
    gap.iter().all(|b| b.is_ascii_whitespace()) && gap.iter().filter(|&&b| b == b'\n').count() <= 1
}

/// Extend `end` forward past a single trailing comma/semicolon, skipping
/// only horizontal whitespace.
fn extend_past_separator(source: &[u8], end: usize) -> usize {
    let mut i = end;
    while i < source.len() && (source[i] == b' ' || source[i] == b'\t') {
        i += 1;
    }
    if i < source.len() && (source[i] == b',' || source[i] == b';') {
        i + 1
    } else {
        end
    }
}

/// Keep only private elements and drop every candidate strictly nested in
/// another candidate: the outer removal subsumes the inner one.
pub fn private_candidates<'t, 'p>(
    elements: &[CodeElement<'t, 'p>],
) -> Vec<CodeElement<'t, 'p>> {
    let private: Vec<&CodeElement> = elements.iter().filter(|el| !el.is_public).collect();
    let ranges: Vec<ElementRange> = private.iter().map(|el| el.range).collect();

    private
        .iter()
        .enumerate()
        .filter(|(i, el)| {
            !ranges
                .iter()
                .enumerate()
                .any(|(j, other)| j != *i && other.strictly_contains(&el.range))
        })
        .map(|(_, el)| (*el).clone())
        .collect()
}

/// A contiguous run of removal candidates whose spans touch or are separated
/// by whitespace only. Adjacent removed fields collapse into one region so a
/// single placeholder replaces them with no orphan separators in between.
#[derive(Debug)]
pub struct RemovalRegion<'t, 'p> {
    pub range: ElementRange,
    pub elements: Vec<CodeElement<'t, 'p>>,
}

impl RemovalRegion<'_, '_> {
    /// Category label for the placeholder: the shared profile name, or
    /// "element" for a mixed region.
    pub fn category(&self) -> &'static str {
        let first = self.elements[0].profile.name;
        if self.elements.iter().all(|el| el.profile.name == first) {
            first
        } else {
            "element"
        }
    }
}

pub fn coalesce_adjacent<'t, 'p>(
    mut elements: Vec<CodeElement<'t, 'p>>,
    text: &str,
) -> Vec<RemovalRegion<'t, 'p>> {
    elements.sort_by_key(|el| (el.range.start, el.range.end));

    let mut regions: Vec<RemovalRegion> = Vec::new();
    for element in elements {
        if let Some(last) = regions.last_mut() {
            let gap = text
                .get(last.range.end..element.range.start)
                .unwrap_or("non-empty");
            if element.range.start <= last.range.end
                || gap.chars().all(|c| c.is_whitespace())
            {
                last.range.end = last.range.end.max(element.range.end);
                last.elements.push(element);
                continue;
            }
        }
        regions.push(RemovalRegion {
            range: element.range,
            elements: vec![element],
        });
    }
    regions
}
