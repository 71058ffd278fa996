//! Depth-tracking, string-aware splitting of literal bodies.
//!
//! The splitter understands multi-character quoting (triple quotes, raw
//! string hash fences, template backticks) by matching the actual opening
//! marker, so commas inside strings or inside nested brackets never split.

/// Shape of a string literal opening at some position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteShape {
    pub open_len: usize,
    pub closer: String,
    pub escapes: bool,
}

/// Detect a string opening at byte offset `at` in `text`.
///
/// Recognized: `"""`/`'''` triple quotes, backtick template strings, raw
/// strings `r"`/`r#"`/`br##"` (closer mirrors the hash count), and plain
/// single/double quotes with backslash escapes. Raw-string prefixes are only
/// taken when not preceded by an identifier character.
pub fn detect_quote_at(text: &str, at: usize) -> Option<QuoteShape> {
    let rest = &text[at..];
    let prev_is_ident = at > 0
        && text[..at]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_alphanumeric() || c == '_');

    if rest.starts_with("\"\"\"") {
        return Some(QuoteShape {
            open_len: 3,
            closer: "\"\"\"".to_string(),
            escapes: false,
        });
    }
    if rest.starts_with("'''") {
        return Some(QuoteShape {
            open_len: 3,
            closer: "'''".to_string(),
            escapes: false,
        });
    }
    if rest.starts_with('`') {
        return Some(QuoteShape {
            open_len: 1,
            closer: "`".to_string(),
            escapes: true,
        });
    }

    if !prev_is_ident {
        let prefix_len = rest
            .bytes()
            .take_while(|b| matches!(b, b'r' | b'R' | b'b' | b'B'))
            .count()
            .min(2);
        if prefix_len > 0 {
            let after_prefix = &rest[prefix_len..];
            let hashes = after_prefix.bytes().take_while(|&b| b == b'#').count();
            if after_prefix[hashes..].starts_with('"')
                && (hashes > 0 || rest[..prefix_len].contains(['r', 'R']))
            {
                return Some(QuoteShape {
                    open_len: prefix_len + hashes + 1,
                    closer: format!("\"{}", "#".repeat(hashes)),
                    escapes: false,
                });
            }
        }
    }

    if rest.starts_with('"') {
        return Some(QuoteShape {
            open_len: 1,
            closer: "\"".to_string(),
            escapes: true,
        });
    }
    if rest.starts_with('\'') && !prev_is_ident {
        return Some(QuoteShape {
            open_len: 1,
            closer: "'".to_string(),
            escapes: true,
        });
    }
    None
}

/// Byte offset of the next character boundary after `i`.
fn advance(text: &str, i: usize) -> usize {
    i + text[i..].chars().next().map_or(1, |c| c.len_utf8())
}

/// Byte offset just past the closing marker of a string starting at `at`.
/// An unterminated string runs to the end of the text.
fn skip_string(text: &str, at: usize, shape: &QuoteShape) -> usize {
    let mut i = at + shape.open_len;
    while i < text.len() {
        if shape.escapes && text.as_bytes()[i] == b'\\' {
            i += 1;
            i += text[i..].chars().next().map_or(0, |c| c.len_utf8());
            continue;
        }
        if text[i..].starts_with(&shape.closer) {
            return i + shape.closer.len();
        }
        i = advance(text, i);
    }
    text.len()
}

/// Split `text` at top-level commas, returning the byte spans of the pieces
/// (separators excluded, surrounding whitespace included).
pub fn split_top_level(text: &str) -> Vec<(usize, usize)> {
    let bytes = text.as_bytes();
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    let mut i = 0usize;

    while i < text.len() {
        if let Some(shape) = detect_quote_at(text, i) {
            i = skip_string(text, i, &shape);
            continue;
        }
        match bytes[i] {
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth = depth.saturating_sub(1),
            b',' if depth == 0 => {
                parts.push((start, i));
                start = i + 1;
            }
            _ => {}
        }
        i = advance(text, i);
    }
    parts.push((start, text.len()));
    parts
}

/// Top-level comma-separated element texts, trimmed, empty pieces dropped
/// (a trailing comma leaves an empty last piece).
pub fn split_elements(text: &str) -> Vec<&str> {
    split_top_level(text)
        .into_iter()
        .map(|(s, e)| text[s..e].trim())
        .filter(|piece| !piece.is_empty())
        .collect()
}

/// Strip the literal's delimiters: `(open, inner, close)` as sub-slices.
pub fn strip_delimiters<'a>(
    text: &'a str,
    open: &str,
    close: &str,
) -> Option<(&'a str, &'a str, &'a str)> {
    let trimmed = text.trim();
    if !trimmed.starts_with(open) || !trimmed.ends_with(close) {
        return None;
    }
    if trimmed.len() < open.len() + close.len() {
        return None;
    }
    let inner = &trimmed[open.len()..trimmed.len() - close.len()];
    Some((
        &trimmed[..open.len()],
        inner,
        &trimmed[trimmed.len() - close.len()..],
    ))
}

/// Split a pair at its top-level binding token (`:` or a single `=`),
/// returning `(key, separator, value)`. Comparison operators never bind.
pub fn split_pair(text: &str) -> Option<(&str, char, &str)> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut i = 0usize;

    while i < text.len() {
        if let Some(shape) = detect_quote_at(text, i) {
            i = skip_string(text, i, &shape);
            continue;
        }
        match bytes[i] {
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth = depth.saturating_sub(1),
            b':' if depth == 0 => {
                // `::` paths do not bind.
                if bytes.get(i + 1) == Some(&b':') {
                    i += 2;
                    continue;
                }
                return Some((&text[..i], ':', &text[i + 1..]));
            }
            b'=' if depth == 0 => {
                let prev = if i > 0 { bytes[i - 1] } else { 0 };
                let next = bytes.get(i + 1).copied().unwrap_or(0);
                if next != b'=' && next != b'>' && !matches!(prev, b'=' | b'!' | b'<' | b'>') {
                    return Some((&text[..i], '=', &text[i + 1..]));
                }
            }
            _ => {}
        }
        i = advance(text, i);
    }
    None
}

/// Replace every top-level bracketed group in `text` with its empty form, so
/// a truncated element keeps balanced syntax.
pub fn collapse_nested(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut i = 0usize;

    while i < text.len() {
        if let Some(shape) = detect_quote_at(text, i) {
            let end = skip_string(text, i, &shape);
            out.push_str(&text[i..end]);
            i = end;
            continue;
        }
        let b = bytes[i];
        if matches!(b, b'(' | b'[' | b'{') {
            let close = match b {
                b'(' => ')',
                b'[' => ']',
                _ => '}',
            };
            out.push(b as char);
            out.push(close);
            i = skip_group(text, i);
            continue;
        }
        let ch = text[i..].chars().next().unwrap_or(' ');
        out.push(ch);
        i += ch.len_utf8();
    }
    out
}

/// Byte offset just past the group opened at `at`; unclosed groups run to
/// the end of the text.
fn skip_group(text: &str, at: usize) -> usize {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut i = at;
    while i < text.len() {
        if let Some(shape) = detect_quote_at(text, i) {
            i = skip_string(text, i, &shape);
            continue;
        }
        match bytes[i] {
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => {
                depth -= 1;
                if depth == 0 {
                    return i + 1;
                }
            }
            _ => {}
        }
        i = advance(text, i);
    }
    text.len()
}

/// Repair a truncated fragment: cut an unterminated trailing string at its
/// opener and close any bracket groups left open.
pub fn balance_suffix(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut stack: Vec<char> = Vec::new();
    let mut i = 0usize;
    let mut cut = text.len();

    while i < text.len() {
        if let Some(shape) = detect_quote_at(text, i) {
            let end = skip_string(text, i, &shape);
            if end >= text.len() && !text[i..].ends_with(&shape.closer) {
                // Unterminated: drop the string entirely.
                cut = i;
                break;
            }
            i = end;
            continue;
        }
        match bytes[i] {
            b'(' => stack.push(')'),
            b'[' => stack.push(']'),
            b'{' => stack.push('}'),
            b')' | b']' | b'}' => {
                stack.pop();
            }
            _ => {}
        }
        i = advance(text, i);
    }

    let mut out = text[..cut].trim_end().trim_end_matches(',').to_string();
    while let Some(close) = stack.pop() {
        out.push(close);
    }
    out
}
