//! Comment classification for the optional comment-stripping pass.
//!
//! Doc comments, section dividers, TODO-family markers, and explanatory
//! comments survive reduction; short throwaway comments and commented-out
//! code do not.

use crate::placeholder::CommentStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentClass {
    /// Documentation comment (`///`, `//!`, `/**`, `/*!`).
    Doc,
    /// Section dividers: `// --- Section ---` or `## Header`.
    Structural,
    /// TODO, FIXME, NOTE, HACK, XXX, BUG, WARNING.
    Todo,
    /// Intent/explanatory comment.
    Explanatory,
    /// Short, non-meaningful comment.
    Trivial,
    /// Commented-out code.
    DisabledCode,
}

const DOC_MARKERS: &[&str] = &["///", "//!", "/**", "/*!"];

/// Classify one comment's text.
pub fn classify(text: &str, style: &CommentStyle) -> CommentClass {
    let trimmed = text.trim();

    if DOC_MARKERS.iter().any(|m| trimmed.starts_with(m)) {
        return CommentClass::Doc;
    }
    if trimmed.starts_with("##") {
        return CommentClass::Structural;
    }

    let content = trimmed
        .trim_start_matches(style.line_prefix)
        .trim_start_matches(|c: char| c == '#' || c == '/' || c == '*')
        .trim_end_matches("*/")
        .trim();

    if content.starts_with("---")
        || content.ends_with("---")
        || content.starts_with("===")
        || content.ends_with("===")
    {
        return CommentClass::Structural;
    }

    let upper = content.to_uppercase();
    if ["TODO", "FIXME", "NOTE", "HACK", "XXX", "BUG", "WARNING"]
        .iter()
        .any(|m| upper.starts_with(m))
    {
        return CommentClass::Todo;
    }

    if looks_like_disabled_code(content) {
        return CommentClass::DisabledCode;
    }

    if content.len() < 15 && !content.ends_with(':') {
        return CommentClass::Trivial;
    }

    CommentClass::Explanatory
}

/// Whether a stripped-comments run removes this comment.
pub fn should_strip(class: CommentClass) -> bool {
    matches!(class, CommentClass::Trivial | CommentClass::DisabledCode)
}

fn looks_like_disabled_code(content: &str) -> bool {
    let c = content.trim();
    if c.is_empty() {
        return false;
    }

    // Call without surrounding prose: foo() or obj.method()
    if c.contains('(') && c.contains(')') && !c.contains(' ') {
        return true;
    }

    // Assignment with an identifier-shaped left side, not a comparison.
    if let Some(eq_pos) = c.find('=') {
        if eq_pos > 0 && eq_pos < c.len() - 1 {
            let before = c.as_bytes()[eq_pos - 1];
            let after = c.as_bytes()[eq_pos + 1];
            if !matches!(before, b'=' | b'!' | b'<' | b'>') && after != b'=' {
                let left = c[..eq_pos].trim();
                if !left.is_empty()
                    && left
                        .chars()
                        .all(|ch| ch.is_alphanumeric() || ch == '_' || ch == '.')
                {
                    return true;
                }
            }
        }
    }

    const CODE_STARTS: &[&str] = &[
        "import ", "from ", "require(", "use ", "if ", "for ", "while ", "return ", "def ",
        "class ", "fn ", "func ", "function ",
    ];
    CODE_STARTS.iter().any(|s| c.starts_with(s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doc_comments_are_never_stripped() {
        assert_eq!(
            classify("/// Returns the sum.", &CommentStyle::SLASHES),
            CommentClass::Doc
        );
        assert!(!should_strip(CommentClass::Doc));
    }

    #[test]
    fn test_structural_dividers() {
        assert_eq!(
            classify("// ---------- setup ----------", &CommentStyle::SLASHES),
            CommentClass::Structural
        );
        assert_eq!(
            classify("## Parsing", &CommentStyle::HASH),
            CommentClass::Structural
        );
    }

    #[test]
    fn test_todo_family_kept() {
        assert_eq!(
            classify("# TODO: handle empty input", &CommentStyle::HASH),
            CommentClass::Todo
        );
        assert_eq!(
            classify("// FIXME broken on windows", &CommentStyle::SLASHES),
            CommentClass::Todo
        );
    }

    #[test]
    fn test_disabled_code_detected() {
        assert_eq!(
            classify("# print(x)", &CommentStyle::HASH),
            CommentClass::DisabledCode
        );
        assert_eq!(
            classify("// retries = 3", &CommentStyle::SLASHES),
            CommentClass::DisabledCode
        );
        assert!(should_strip(CommentClass::DisabledCode));
    }

    #[test]
    fn test_trivial_vs_explanatory() {
        assert_eq!(classify("// ok", &CommentStyle::SLASHES), CommentClass::Trivial);
        assert_eq!(
            classify(
                "// Falls back to the slow path when the cache is cold.",
                &CommentStyle::SLASHES
            ),
            CommentClass::Explanatory
        );
    }
}
