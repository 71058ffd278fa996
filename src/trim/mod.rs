//! Token-budget trimmers for literals and function bodies.
//!
//! Both trimmers answer the same question: given a node's text and a maximum
//! token count, either report "already fits" (`None`) or produce a smaller
//! replacement that stays structurally closed for its syntax category and
//! keeps the original's single-line/multi-line formatting.

pub mod body;
pub mod literal;
pub mod splitter;

pub use body::{trim_body, TrimmedBody};
pub use literal::trim_literal;

/// Fixed allowance on top of the budget for placeholder/ellipsis overhead.
/// The budget-closure property is `count(result) <= budget + TRIM_OVERHEAD_TOKENS`.
pub const TRIM_OVERHEAD_TOKENS: usize = 16;

/// Syntax category of a literal, routed by per-language configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    /// Array/list/tuple: comma-separated elements, a prefix may be kept.
    Sequence {
        open: &'static str,
        close: &'static str,
    },
    /// Object/map/struct literal: comma-separated `key: value` pairs.
    /// `require_all_keys` marks structural-literal initialization where every
    /// declared field must stay present and only values may shrink.
    KeyValue {
        open: &'static str,
        close: &'static str,
        require_all_keys: bool,
    },
    /// Pairs joined by a binding token rather than a colon (e.g. designated
    /// initializers); split at pair level, never inside a pair.
    AtomicPair {
        open: &'static str,
        close: &'static str,
    },
    /// String-like literal with language-specific quoting.
    Quoted,
}
