//! Comment-shaped placeholder text for removed or trimmed content.
//!
//! The formats here are observable output and kept stable: a single line in
//! the target language's comment syntax, carrying a short category label and
//! a count (lines for removed elements and trimmed bodies, tokens for
//! trimmed literals).

/// Per-language comment syntax, supplied by the language descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentStyle {
    pub line_prefix: &'static str,
}

impl CommentStyle {
    pub const SLASHES: CommentStyle = CommentStyle { line_prefix: "//" };
    pub const HASH: CommentStyle = CommentStyle { line_prefix: "#" };

    /// Render `message` as a single comment line (no trailing newline).
    pub fn line(&self, message: &str) -> String {
        format!("{} {}", self.line_prefix, message)
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {}", pluralize(noun))
    }
}

/// Naive English plural, good enough for category labels and metric keys.
pub fn pluralize(noun: &str) -> String {
    if noun.ends_with('s') {
        format!("{noun}es")
    } else {
        format!("{noun}s")
    }
}

/// Placeholder for one or more removed elements of the same category.
///
/// `category` is the profile name ("function", "field", ...); a coalesced
/// region reports how many elements it swallowed.
pub fn removed_elements(style: &CommentStyle, category: &str, count: usize, lines: usize) -> String {
    let label = if count == 1 {
        format!("private {category} omitted")
    } else {
        format!("{} private {} omitted", count, pluralize(category))
    };
    style.line(&format!("{label} ({})", plural(lines, "line")))
}

/// Placeholder appended after the kept prefix of a trimmed function body.
pub fn trimmed_body(style: &CommentStyle, lines: usize) -> String {
    style.line(&format!("... ({} trimmed)", plural(lines, "line")))
}

/// Marker line inserted before the closing delimiter of a trimmed literal.
pub fn trimmed_literal(style: &CommentStyle, tokens_saved: usize) -> String {
    style.line(&format!("... ({} trimmed)", plural(tokens_saved, "token")))
}

/// Placeholder for a collapsed run of import statements.
pub fn omitted_imports(style: &CommentStyle, count: usize) -> String {
    style.line(&format!("{} omitted", plural(count, "import")))
}
