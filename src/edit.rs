//! Range-based text editing over an immutable source buffer.
//!
//! All edits reference byte spans of the *original* text; the whole edit list
//! is applied to the pristine buffer in one sweep. Overlap resolution is
//! deterministic: edits are sorted by start offset and the first edit wins,
//! later overlapping edits are rejected and counted, never merged.

use thiserror::Error;

/// Why a single edit is tagged, for metrics attribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    Removal,
    BodyTrim,
    LiteralTrim,
    CommentStrip,
    ImportSummary,
}

/// A half-open byte span `[start, end)` of the original text plus its
/// replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub start: usize,
    pub end: usize,
    pub replacement: String,
    pub kind: EditKind,
}

impl Edit {
    pub fn new(start: usize, end: usize, replacement: impl Into<String>, kind: EditKind) -> Self {
        Self {
            start,
            end,
            replacement: replacement.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("edit range {start}..{end} is inverted")]
    Inverted { start: usize, end: usize },
    #[error("edit range {start}..{end} exceeds the text length {len}")]
    OutOfBounds { start: usize, end: usize, len: usize },
    #[error("edit range {start}..{end} splits a UTF-8 character")]
    NotCharBoundary { start: usize, end: usize },
}

/// Why an edit did not make it into the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    Invalid(EditError),
    /// The edit starts before an earlier (lower-start) applied edit ends.
    Overlap,
}

#[derive(Debug)]
pub struct RejectedEdit {
    pub edit: Edit,
    pub reason: RejectReason,
}

/// Result of applying an edit list in one pass.
#[derive(Debug)]
pub struct Patched {
    pub text: String,
    pub applied: Vec<Edit>,
    pub rejected: Vec<RejectedEdit>,
    pub bytes_saved: i64,
    pub lines_saved: i64,
}

/// Accumulates edits against one immutable text and applies them at once.
#[derive(Debug, Default)]
pub struct RangeEditor {
    edits: Vec<Edit>,
}

impl RangeEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, edit: Edit) {
        self.edits.push(edit);
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    fn validate(edit: &Edit, text: &str) -> Result<(), EditError> {
        let (start, end) = (edit.start, edit.end);
        if start > end {
            return Err(EditError::Inverted { start, end });
        }
        if end > text.len() {
            return Err(EditError::OutOfBounds {
                start,
                end,
                len: text.len(),
            });
        }
        if !text.is_char_boundary(start) || !text.is_char_boundary(end) {
            return Err(EditError::NotCharBoundary { start, end });
        }
        Ok(())
    }

    /// Apply every accumulated edit to `text` in one sweep.
    ///
    /// Edits are sorted by start offset ascending (ties keep insertion order).
    /// Invalid edits and edits overlapping an earlier applied edit are
    /// rejected and reported; they never corrupt the output.
    pub fn apply(mut self, text: &str) -> Patched {
        self.edits.sort_by_key(|e| e.start);

        let mut out = String::with_capacity(text.len());
        let mut applied = Vec::new();
        let mut rejected = Vec::new();
        let mut cursor = 0usize;

        for edit in self.edits {
            if let Err(err) = Self::validate(&edit, text) {
                rejected.push(RejectedEdit {
                    edit,
                    reason: RejectReason::Invalid(err),
                });
                continue;
            }
            if edit.start < cursor {
                rejected.push(RejectedEdit {
                    edit,
                    reason: RejectReason::Overlap,
                });
                continue;
            }
            out.push_str(&text[cursor..edit.start]);
            out.push_str(&edit.replacement);
            cursor = edit.end;
            applied.push(edit);
        }
        out.push_str(&text[cursor..]);

        let bytes_saved = text.len() as i64 - out.len() as i64;
        let lines_saved = count_lines(text) as i64 - count_lines(&out) as i64;

        Patched {
            text: out,
            applied,
            rejected,
            bytes_saved,
            lines_saved,
        }
    }
}

fn count_lines(text: &str) -> usize {
    if text.is_empty() {
        return 0;
    }
    text.lines().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn removal(start: usize, end: usize, replacement: &str) -> Edit {
        Edit::new(start, end, replacement, EditKind::Removal)
    }

    #[test]
    fn test_non_overlapping_edits_apply_in_one_sweep() {
        let text = "alpha beta gamma";
        let mut editor = RangeEditor::new();
        editor.push(removal(6, 10, "B"));
        editor.push(removal(0, 5, "A"));

        let patched = editor.apply(text);
        assert_eq!(patched.text, "A B gamma");
        assert_eq!(patched.applied.len(), 2);
        assert!(patched.rejected.is_empty());
    }

    #[test]
    fn test_first_edit_wins_on_overlap() {
        // Spec scenario: [0,5) -> "A" and [3,8) -> "B" over an 8-char text.
        let text = "01234567";
        let mut editor = RangeEditor::new();
        editor.push(removal(3, 8, "B"));
        editor.push(removal(0, 5, "A"));

        let patched = editor.apply(text);
        assert_eq!(patched.text, "A567");
        assert_eq!(patched.applied.len(), 1);
        assert_eq!(patched.applied[0].start, 0);
        assert_eq!(patched.rejected.len(), 1);
        assert_eq!(patched.rejected[0].reason, RejectReason::Overlap);
    }

    #[test]
    fn test_overlap_resolution_ignores_insertion_order() {
        let text = "01234567";
        for order in [[0usize, 1], [1, 0]] {
            let edits = [removal(0, 5, "A"), removal(3, 8, "B")];
            let mut editor = RangeEditor::new();
            for &i in &order {
                editor.push(edits[i].clone());
            }
            let patched = editor.apply(text);
            assert_eq!(patched.text, "A567");
        }
    }

    #[test]
    fn test_out_of_bounds_edit_is_rejected_not_fatal() {
        let text = "short";
        let mut editor = RangeEditor::new();
        editor.push(removal(0, 2, "X"));
        editor.push(removal(3, 99, "Y"));

        let patched = editor.apply(text);
        assert_eq!(patched.text, "Xort");
        assert_eq!(patched.rejected.len(), 1);
        assert_eq!(
            patched.rejected[0].reason,
            RejectReason::Invalid(EditError::OutOfBounds {
                start: 3,
                end: 99,
                len: 5
            })
        );
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let text = "abcdef";
        let mut editor = RangeEditor::new();
        editor.push(removal(4, 2, ""));
        let patched = editor.apply(text);
        assert_eq!(patched.text, text);
        assert_eq!(
            patched.rejected[0].reason,
            RejectReason::Invalid(EditError::Inverted { start: 4, end: 2 })
        );
    }

    #[test]
    fn test_char_boundary_violation_is_rejected() {
        let text = "héllo";
        let mut editor = RangeEditor::new();
        editor.push(removal(1, 2, "_")); // inside the two-byte é
        let patched = editor.apply(text);
        assert_eq!(patched.text, text);
        assert!(matches!(
            patched.rejected[0].reason,
            RejectReason::Invalid(EditError::NotCharBoundary { .. })
        ));
    }

    #[test]
    fn test_savings_accounting() {
        let text = "line one\nline two\nline three\n";
        let mut editor = RangeEditor::new();
        editor.push(removal(9, 18, "")); // drop "line two\n"
        let patched = editor.apply(text);
        assert_eq!(patched.text, "line one\nline three\n");
        assert_eq!(patched.bytes_saved, 9);
        assert_eq!(patched.lines_saved, 1);
    }

    #[test]
    fn test_applied_edits_never_intersect() {
        let text = "0123456789abcdef";
        let mut editor = RangeEditor::new();
        editor.push(removal(0, 4, "w"));
        editor.push(removal(2, 6, "x"));
        editor.push(removal(4, 8, "y"));
        editor.push(removal(10, 12, "z"));

        let patched = editor.apply(text);
        let mut spans: Vec<(usize, usize)> =
            patched.applied.iter().map(|e| (e.start, e.end)).collect();
        spans.sort();
        for pair in spans.windows(2) {
            assert!(pair[0].1 <= pair[1].0, "applied edits overlap: {pair:?}");
        }
        // Every rejected overlap intersects some applied edit with a lower start.
        for rej in &patched.rejected {
            if rej.reason == RejectReason::Overlap {
                assert!(spans
                    .iter()
                    .any(|&(s, e)| s < rej.edit.start && rej.edit.start < e));
            }
        }
    }

    #[test]
    fn test_deterministic_for_identical_input() {
        let text = "fn main() {}\nfn helper() {}\n";
        let run = || {
            let mut editor = RangeEditor::new();
            editor.push(removal(13, 28, "// omitted\n"));
            editor.push(removal(0, 12, "// omitted"));
            editor.apply(text).text
        };
        assert_eq!(run(), run());
    }
}
