//! Token counting and truncation.
//!
//! The trimmers only ever see the `TokenCounter` trait: `count` must be
//! monotonic with `truncate_to` (`count(truncate_to(t, n)) <= n`) and
//! `truncate_to` must be the identity on already-short text. The default
//! implementation uses the cl100k BPE from tiktoken; `CharEstimator` is the
//! dependency-free fallback using the ~4-chars-per-token rule.

use std::cell::RefCell;
use std::collections::HashMap;

use once_cell::sync::Lazy;
use tiktoken_rs::CoreBPE;

/// External tokenizer collaborator. Pure and synchronous.
pub trait TokenCounter {
    fn count(&self, text: &str) -> usize;
    fn truncate_to(&self, text: &str, max_tokens: usize) -> String;
}

static CL100K: Lazy<Option<CoreBPE>> = Lazy::new(|| tiktoken_rs::cl100k_base().ok());

/// BPE-backed counter. Construction fails only when the embedded encoding
/// cannot be loaded, in which case callers fall back to `CharEstimator`.
pub struct TiktokenCounter {
    bpe: &'static CoreBPE,
}

impl TiktokenCounter {
    pub fn new() -> Option<Self> {
        CL100K.as_ref().map(|bpe| Self { bpe })
    }
}

impl TokenCounter for TiktokenCounter {
    fn count(&self, text: &str) -> usize {
        self.bpe.encode_with_special_tokens(text).len()
    }

    fn truncate_to(&self, text: &str, max_tokens: usize) -> String {
        let tokens = self.bpe.encode_with_special_tokens(text);
        if tokens.len() <= max_tokens {
            return text.to_string();
        }
        // A token prefix can end mid-character; back off until it decodes.
        let mut keep = max_tokens;
        while keep > 0 {
            if let Ok(decoded) = self.bpe.decode(tokens[..keep].to_vec()) {
                return decoded;
            }
            keep -= 1;
        }
        String::new()
    }
}

/// Heuristic counter: one token per four characters, rounded up.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharEstimator;

impl TokenCounter for CharEstimator {
    fn count(&self, text: &str) -> usize {
        text.chars().count().div_ceil(4)
    }

    fn truncate_to(&self, text: &str, max_tokens: usize) -> String {
        let max_chars = max_tokens.saturating_mul(4);
        if text.chars().count() <= max_chars {
            return text.to_string();
        }
        text.chars().take(max_chars).collect()
    }
}

/// Memoizes `count` per distinct text within one trimming operation, so the
/// binary searches in the trimmers pay for each candidate at most once.
pub struct MemoCounter<'a> {
    inner: &'a dyn TokenCounter,
    counts: RefCell<HashMap<String, usize>>,
}

impl<'a> MemoCounter<'a> {
    pub fn new(inner: &'a dyn TokenCounter) -> Self {
        Self {
            inner,
            counts: RefCell::new(HashMap::new()),
        }
    }

    pub fn count(&self, text: &str) -> usize {
        if let Some(&n) = self.counts.borrow().get(text) {
            return n;
        }
        let n = self.inner.count(text);
        self.counts.borrow_mut().insert(text.to_string(), n);
        n
    }

    pub fn truncate_to(&self, text: &str, max_tokens: usize) -> String {
        self.inner.truncate_to(text, max_tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_estimator_counts() {
        let est = CharEstimator;
        assert_eq!(est.count(""), 0);
        assert_eq!(est.count("abcd"), 1);
        assert_eq!(est.count("abcde"), 2);
    }

    #[test]
    fn test_char_estimator_truncation_is_monotonic() {
        let est = CharEstimator;
        let text = "let values = vec![1, 2, 3, 4, 5, 6, 7, 8];";
        for budget in [1, 3, 5, 8] {
            let cut = est.truncate_to(text, budget);
            assert!(est.count(&cut) <= budget, "budget {budget} violated");
        }
    }

    #[test]
    fn test_truncation_is_identity_on_short_text() {
        let est = CharEstimator;
        assert_eq!(est.truncate_to("tiny", 100), "tiny");
    }

    #[test]
    fn test_tiktoken_respects_budget_when_available() {
        let Some(counter) = TiktokenCounter::new() else {
            return;
        };
        let text = "The quick brown fox jumps over the lazy dog, repeatedly.";
        let cut = counter.truncate_to(text, 5);
        assert!(counter.count(&cut) <= 5);
        assert!(text.starts_with(&cut));
    }

    #[test]
    fn test_memo_counter_caches_per_text() {
        struct CountingCounter(RefCell<usize>);
        impl TokenCounter for CountingCounter {
            fn count(&self, text: &str) -> usize {
                *self.0.borrow_mut() += 1;
                text.len()
            }
            fn truncate_to(&self, text: &str, _max: usize) -> String {
                text.to_string()
            }
        }

        let raw = CountingCounter(RefCell::new(0));
        let memo = MemoCounter::new(&raw);
        assert_eq!(memo.count("abc"), 3);
        assert_eq!(memo.count("abc"), 3);
        assert_eq!(memo.count("defg"), 4);
        assert_eq!(*raw.0.borrow(), 2);
    }
}
