//! Per-language configuration: profile tables, syntax conventions, comment
//! styles, and literal routing. Each language contributes data into the
//! shared engine; none of them owns control flow.

pub mod c;
pub mod go;
pub mod python;
pub mod rust_lang;
pub mod typescript;

use tree_sitter::{Language, Node};

use crate::collect::SyntaxConventions;
use crate::placeholder::CommentStyle;
use crate::profile::{ProfileTable, TableError};
use crate::trim::LiteralKind;

/// Languages supported for structural reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupportedLanguage {
    Python,
    TypeScript,
    TypeScriptTsx,
    JavaScript,
    JavaScriptJsx,
    Rust,
    Go,
    C,
}

impl SupportedLanguage {
    /// Detect language from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "py" | "pyw" | "pyi" => Some(Self::Python),
            "ts" | "mts" | "cts" => Some(Self::TypeScript),
            "tsx" => Some(Self::TypeScriptTsx),
            "js" | "mjs" | "cjs" => Some(Self::JavaScript),
            "jsx" => Some(Self::JavaScriptJsx),
            "rs" => Some(Self::Rust),
            "go" => Some(Self::Go),
            "c" | "h" => Some(Self::C),
            _ => None,
        }
    }

    /// Get the tree-sitter language for this file type.
    pub fn tree_sitter_language(&self) -> Language {
        match self {
            Self::Python => tree_sitter_python::LANGUAGE.into(),
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::TypeScriptTsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            Self::JavaScript | Self::JavaScriptJsx => tree_sitter_javascript::LANGUAGE.into(),
            Self::Rust => tree_sitter_rust::LANGUAGE.into(),
            Self::Go => tree_sitter_go::LANGUAGE.into(),
            Self::C => tree_sitter_c::LANGUAGE.into(),
        }
    }
}

/// Routes a literal node to its trimming category, or `None` when the node
/// is not a trimmable literal.
pub type LiteralRouter = fn(Node<'_>, &[u8]) -> Option<LiteralKind>;

/// Everything the engine needs to know about one language, beyond its
/// profile table. Pure data.
pub struct LanguageSpec {
    pub comment: CommentStyle,
    pub conventions: SyntaxConventions,
    pub import_kinds: &'static [&'static str],
    pub literal_kind: LiteralRouter,
    /// Whether function bodies carry explicit block delimiters.
    pub body_delimited: bool,
    pub build_table: fn() -> Result<ProfileTable, TableError>,
}

/// Descriptor for `language`; the profile table itself is built on demand by
/// the engine's registry.
pub fn spec_for(language: SupportedLanguage) -> LanguageSpec {
    match language {
        SupportedLanguage::Python => python::spec(),
        SupportedLanguage::TypeScript | SupportedLanguage::TypeScriptTsx => typescript::spec(),
        SupportedLanguage::JavaScript | SupportedLanguage::JavaScriptJsx => {
            typescript::javascript_spec()
        }
        SupportedLanguage::Rust => rust_lang::spec(),
        SupportedLanguage::Go => go::spec(),
        SupportedLanguage::C => c::spec(),
    }
}
