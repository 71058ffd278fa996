//! Literal trimming: shrink oversized sequence, key/value, and quoted
//! literals to a token budget while keeping the syntax category closed.

use crate::placeholder::{self, CommentStyle};
use crate::tokenizer::MemoCounter;
use crate::trim::splitter::{
    balance_suffix, collapse_nested, detect_quote_at, split_elements, split_pair,
    strip_delimiters,
};
use crate::trim::LiteralKind;

/// Trim `original` to `budget` tokens, or `None` when it already fits.
///
/// The replacement keeps the original's single-line vs multi-line style. A
/// literal whose text does not carry the expected delimiters is left alone
/// rather than risking unbalanced output.
pub fn trim_literal(
    original: &str,
    kind: LiteralKind,
    budget: usize,
    tokens: &MemoCounter,
    style: &CommentStyle,
) -> Option<String> {
    let total = tokens.count(original);
    if total <= budget {
        return None;
    }

    match kind {
        LiteralKind::Quoted => trim_quoted(original, budget, tokens),
        LiteralKind::Sequence { open, close } => {
            trim_sequence(original, open, close, budget, tokens, style)
        }
        LiteralKind::KeyValue {
            open,
            close,
            require_all_keys,
        } => trim_pairs(original, open, close, require_all_keys, budget, tokens, style),
        LiteralKind::AtomicPair { open, close } => {
            trim_pairs(original, open, close, false, budget, tokens, style)
        }
    }
}

/// Layout facts shared by the sequence and pair renderers.
struct Layout<'a> {
    open: &'a str,
    close: &'a str,
    multiline: bool,
    item_indent: String,
    close_indent: String,
}

impl<'a> Layout<'a> {
    fn of(original: &str, open: &'a str, close: &'a str) -> Self {
        let multiline = original.contains('\n');
        let item_indent = original
            .lines()
            .skip(1)
            .find(|line| !line.trim().is_empty())
            .map(|line| {
                line.chars()
                    .take_while(|&c| c == ' ' || c == '\t')
                    .collect::<String>()
            })
            .unwrap_or_else(|| "    ".to_string());
        let close_indent = original
            .lines()
            .next_back()
            .map(|line| {
                line.chars()
                    .take_while(|&c| c == ' ' || c == '\t')
                    .collect::<String>()
            })
            .unwrap_or_default();
        Self {
            open,
            close,
            multiline,
            item_indent,
            close_indent,
        }
    }

    /// Render `items` back into the literal's shape, optionally with a
    /// marker comment line before the closing delimiter.
    fn render(&self, items: &[String], marker: Option<&str>) -> String {
        if !self.multiline {
            return format!("{}{}{}", self.open, items.join(", "), self.close);
        }
        let mut out = String::new();
        out.push_str(self.open);
        for item in items {
            out.push('\n');
            out.push_str(&self.item_indent);
            out.push_str(item);
            out.push(',');
        }
        if let Some(marker) = marker {
            out.push('\n');
            out.push_str(&self.item_indent);
            out.push_str(marker);
        }
        out.push('\n');
        out.push_str(&self.close_indent);
        out.push_str(self.close);
        out
    }
}

/// Largest `k <= n` with `cost(k) <= budget`, assuming `cost` is monotone.
fn max_fitting(n: usize, budget: usize, mut cost: impl FnMut(usize) -> usize) -> usize {
    let (mut lo, mut hi) = (0usize, n);
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

fn trim_sequence(
    original: &str,
    open: &str,
    close: &str,
    budget: usize,
    tokens: &MemoCounter,
    style: &CommentStyle,
) -> Option<String> {
    let (_, inner, _) = strip_delimiters(original, open, close)?;
    let elements = split_elements(inner);
    let layout = Layout::of(original, open, close);
    let total = tokens.count(original);

    let marker = placeholder::trimmed_literal(style, total.saturating_sub(budget));
    let render = |k: usize| -> String {
        let kept: Vec<String> = elements[..k].iter().map(|e| e.to_string()).collect();
        let marker_line = layout.multiline.then_some(marker.as_str());
        layout.render(&kept, marker_line)
    };

    let k = max_fitting(elements.len(), budget, |k| tokens.count(&render(k)));
    if k == 0 {
        // Nothing fits whole: keep a single truncated first element with its
        // nested content collapsed so syntax stays balanced.
        let first = elements.first()?;
        let collapsed = collapse_nested(first);
        let shrunk = if tokens.count(&collapsed) > budget {
            balance_suffix(&tokens.truncate_to(&collapsed, budget.max(1)))
        } else {
            collapsed
        };
        return Some(layout.render(
            &[shrunk],
            layout.multiline.then_some(marker.as_str()),
        ));
    }
    Some(render(k))
}

/// Shrink a key/value or atomic-pair literal at pair granularity.
///
/// With `require_all_keys`, every pair stays present and only the values of
/// the pairs past the kept prefix shrink to typed placeholders.
fn trim_pairs(
    original: &str,
    open: &str,
    close: &str,
    require_all_keys: bool,
    budget: usize,
    tokens: &MemoCounter,
    style: &CommentStyle,
) -> Option<String> {
    let (_, inner, _) = strip_delimiters(original, open, close)?;
    let pairs = split_elements(inner);
    let layout = Layout::of(original, open, close);
    let total = tokens.count(original);
    let marker = placeholder::trimmed_literal(style, total.saturating_sub(budget));

    let shrunk_pair = |pair: &str| -> String {
        match split_pair(pair) {
            Some((key, ':', value)) => {
                format!("{}: {}", key.trim(), typed_placeholder(value.trim()))
            }
            Some((key, sep, value)) => {
                format!("{} {} {}", key.trim(), sep, typed_placeholder(value.trim()))
            }
            None => collapse_nested(pair),
        }
    };

    let render = |k: usize| -> String {
        let mut kept: Vec<String> = pairs[..k].iter().map(|p| p.to_string()).collect();
        let marker_line = if require_all_keys {
            kept.extend(pairs[k..].iter().map(|p| shrunk_pair(p)));
            None
        } else {
            layout.multiline.then_some(marker.as_str())
        };
        layout.render(&kept, marker_line)
    };

    let k = max_fitting(pairs.len(), budget, |k| tokens.count(&render(k)));
    if k == 0 && !require_all_keys {
        let first = pairs.first()?;
        return Some(layout.render(
            &[shrunk_pair(first)],
            layout.multiline.then_some(marker.as_str()),
        ));
    }
    Some(render(k))
}

/// Short placeholder for an oversized value, typed by shape.
fn typed_placeholder(value: &str) -> String {
    let first = value.chars().next().unwrap_or('0');
    if value == "true" || value == "false" {
        return "false".to_string();
    }
    if first.is_ascii_digit() || (first == '-' && value.len() > 1) {
        return "0".to_string();
    }
    match first {
        '[' => "[]".to_string(),
        '{' => "{}".to_string(),
        '(' => "()".to_string(),
        _ => {
            if detect_quote_at(value, 0).is_some() {
                "\"...\"".to_string()
            } else {
                "0".to_string()
            }
        }
    }
}

/// Trim a quoted literal, preserving its opening marker and closer.
fn trim_quoted(original: &str, budget: usize, tokens: &MemoCounter) -> Option<String> {
    let shape = detect_quote_at(original, 0)?;
    let body_end = original.len().checked_sub(shape.closer.len())?;
    if body_end < shape.open_len || !original.ends_with(&shape.closer) {
        return None;
    }
    let inner = &original[shape.open_len..body_end];

    let avail = budget.saturating_sub(2).max(1);
    let mut kept = tokens.truncate_to(inner, avail);
    if shape.escapes {
        // Never end on a dangling escape.
        while kept.ends_with('\\') {
            let n = kept.len() - 1;
            if kept[..n].ends_with('\\') {
                break;
            }
            kept.truncate(n);
        }
    }
    // Template interpolation must not be cut open.
    if let Some(pos) = kept.rfind("${") {
        if !kept[pos..].contains('}') {
            kept.truncate(pos);
        }
    }

    Some(format!(
        "{}{}...{}",
        &original[..shape.open_len],
        kept,
        shape.closer
    ))
}
