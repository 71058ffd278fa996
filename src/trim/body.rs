//! Function/method body trimming.
//!
//! The trimmed region is the body content after the leading documentation
//! node (which is always preserved untouched) up to the closing delimiter.
//! A binary search over token-truncation length finds the largest kept
//! prefix, and the cut always lands on a full line boundary.

use crate::placeholder::{self, CommentStyle};
use crate::tokenizer::MemoCounter;

/// Replacement for the trimmed region of one body.
#[derive(Debug, PartialEq, Eq)]
pub struct TrimmedBody {
    pub replacement: String,
    pub lines_trimmed: usize,
}

/// Trim `region` to `budget` tokens, or `None` when it already fits.
///
/// `region` is the body text between the end of the docstring (or the
/// opening delimiter) and the closing delimiter. `indent` is the indentation
/// for the placeholder line; `closer_indent` is appended when the grammar
/// has an explicit closing delimiter that follows the region.
pub fn trim_body(
    region: &str,
    budget: usize,
    tokens: &MemoCounter,
    style: &CommentStyle,
    indent: &str,
    closer_indent: Option<&str>,
) -> Option<TrimmedBody> {
    if tokens.count(region) <= budget {
        return None;
    }

    // Worst-case placeholder cost, so the budget covers the marker too.
    let marker_cost = tokens.count(&format!(
        "{}{}",
        indent,
        placeholder::trimmed_body(style, 99999)
    ));

    let candidate = |n: usize| -> String {
        let cut = tokens.truncate_to(region, n);
        whole_lines(region, cut)
    };

    let n = largest_fitting(budget, |n| {
        let kept = candidate(n);
        tokens.count(&kept) + marker_cost
    });
    let kept = candidate(n);

    let total_lines = region.lines().count();
    let kept_lines = if kept.trim().is_empty() {
        0
    } else {
        kept.lines().count()
    };
    let lines_trimmed = total_lines.saturating_sub(kept_lines);

    let mut replacement = String::new();
    if kept.trim().is_empty() {
        replacement.push('\n');
    } else {
        replacement.push_str(kept.trim_end_matches([' ', '\t']));
        if !replacement.ends_with('\n') {
            replacement.push('\n');
        }
    }
    replacement.push_str(indent);
    replacement.push_str(&placeholder::trimmed_body(style, lines_trimmed));
    if let Some(closer_indent) = closer_indent {
        replacement.push('\n');
        replacement.push_str(closer_indent);
    }

    Some(TrimmedBody {
        replacement,
        lines_trimmed,
    })
}

/// Binary search the largest truncation length `n <= budget` whose cost
/// stays within the budget. `cost` must be monotone in `n`.
fn largest_fitting(budget: usize, mut cost: impl FnMut(usize) -> usize) -> usize {
    let (mut lo, mut hi) = (0usize, budget);
    while lo < hi {
        let mid = (lo + hi + 1) / 2;
        if cost(mid) <= budget {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }
    lo
}

/// Discard a trailing incomplete line of `cut` unless the cut already covers
/// the whole region.
fn whole_lines(region: &str, cut: String) -> String {
    if cut.len() >= region.len() {
        return cut;
    }
    match cut.rfind('\n') {
        Some(pos) => cut[..=pos].to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::{CharEstimator, MemoCounter, TokenCounter};

    fn region() -> String {
        let mut body = String::from("\n");
        for i in 0..12 {
            body.push_str(&format!("    let step_{i} = compute(input, {i});\n"));
        }
        body
    }

    #[test]
    fn test_small_body_is_a_noop() {
        let raw = CharEstimator;
        let memo = MemoCounter::new(&raw);
        let out = trim_body(
            "\n    return 1;\n",
            50,
            &memo,
            &CommentStyle::SLASHES,
            "    ",
            Some(""),
        );
        assert!(out.is_none());
    }

    #[test]
    fn test_cut_lands_on_line_boundary() {
        let raw = CharEstimator;
        let memo = MemoCounter::new(&raw);
        let region = region();
        let trimmed = trim_body(
            &region,
            40,
            &memo,
            &CommentStyle::SLASHES,
            "    ",
            Some(""),
        )
        .unwrap();

        // Every kept line is a full line from the original region.
        for line in trimmed
            .replacement
            .lines()
            .filter(|l| l.contains("compute"))
        {
            assert!(region.contains(&format!("{line}\n")), "partial line: {line}");
        }
        assert!(trimmed.replacement.contains("// ... ("));
        assert!(trimmed.lines_trimmed > 0);
    }

    #[test]
    fn test_budget_is_respected_including_marker() {
        let raw = CharEstimator;
        let memo = MemoCounter::new(&raw);
        let region = region();
        let budget = 30;
        let trimmed = trim_body(
            &region,
            budget,
            &memo,
            &CommentStyle::SLASHES,
            "    ",
            Some(""),
        )
        .unwrap();
        assert!(raw.count(&trimmed.replacement) <= budget + crate::trim::TRIM_OVERHEAD_TOKENS);
    }

    #[test]
    fn test_zero_budget_keeps_only_placeholder() {
        let raw = CharEstimator;
        let memo = MemoCounter::new(&raw);
        let region = region();
        let trimmed = trim_body(
            &region,
            0,
            &memo,
            &CommentStyle::HASH,
            "    ",
            None,
        )
        .unwrap();
        assert!(trimmed.replacement.contains("# ... ("));
        assert!(!trimmed.replacement.contains("compute"));
        assert_eq!(trimmed.lines_trimmed, region.lines().count());
    }

    #[test]
    fn test_lines_trimmed_accounting() {
        let raw = CharEstimator;
        let memo = MemoCounter::new(&raw);
        let region = region();
        let trimmed = trim_body(
            &region,
            40,
            &memo,
            &CommentStyle::SLASHES,
            "    ",
            Some(""),
        )
        .unwrap();
        let kept_compute_lines = trimmed
            .replacement
            .lines()
            .filter(|l| l.contains("compute"))
            .count();
        assert_eq!(trimmed.lines_trimmed, 12 - kept_compute_lines);
    }
}
