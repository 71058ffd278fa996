//! Structural source reduction for LLM context.
//!
//! This crate shrinks source files into smaller, still-syntactically-plausible
//! projections: private/unexported declarations are replaced by comment-shaped
//! placeholders, oversized literals and function bodies are trimmed to a token
//! budget, and byte/line savings are accounted per file.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── lib.rs         - Public API surface
//! ├── reduce.rs      - Per-file engine driver and batch entry points
//! ├── profile.rs     - Declarative element profiles and table builder
//! ├── collect.rs     - Query matches -> removal candidates
//! ├── edit.rs        - Range editor (sort, first-wins overlap, one sweep)
//! ├── trim/          - Token-budget trimmers (literals, bodies, splitter)
//! ├── placeholder.rs - Comment-shaped placeholder text
//! ├── comments.rs    - Comment classification for the stripping pass
//! ├── tokenizer.rs   - Token counting/truncation (tiktoken + fallback)
//! ├── metrics.rs     - Per-file counters, mergeable across a run
//! ├── ast.rs         - Thin helpers over tree-sitter nodes and queries
//! └── lang/          - Per-language profile tables and conventions
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use codetrim::{reduce_source, ReduceOptions};
//!
//! let options = ReduceOptions {
//!     literal_budget: Some(64),
//!     body_budget: Some(256),
//!     ..ReduceOptions::default()
//! };
//! let reduction = reduce_source(source, "rs", &options)?;
//! println!("{}", reduction.text);
//! ```

pub mod ast;
pub mod collect;
pub mod comments;
pub mod edit;
pub mod lang;
pub mod metrics;
pub mod placeholder;
pub mod profile;
pub mod reduce;
pub mod tokenizer;
pub mod trim;

pub use edit::{Edit, EditError, EditKind, RangeEditor};
pub use lang::SupportedLanguage;
pub use metrics::MetricsRecord;
pub use placeholder::CommentStyle;
pub use profile::{ElementProfile, ProfileSpec, ProfileTable, TableError};
pub use reduce::{
    aggregate_metrics, reduce_files, reduce_source, ReduceError, ReduceOptions, Reducer, Reduction,
};
pub use tokenizer::{CharEstimator, TiktokenCounter, TokenCounter};
pub use trim::LiteralKind;
