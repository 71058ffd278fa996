//! Per-file reduction driver.
//!
//! One file is parsed once, analyzed once, and edited once: collect private
//! elements, synthesize removal edits, route oversized literals and bodies
//! through the token-budget trimmers, then let the range editor produce the
//! final text in a single sweep. A file either completes or fails atomically;
//! partial edits are never returned.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;
use tree_sitter::{Node, Parser, Query};

use crate::ast;
use crate::collect::{self, CodeElement};
use crate::comments;
use crate::edit::{Edit, EditKind, RangeEditor};
use crate::lang::{self, LanguageSpec, SupportedLanguage};
use crate::metrics::MetricsRecord;
use crate::placeholder::{self, pluralize};
use crate::profile::{ProfileTable, TableError};
use crate::tokenizer::{CharEstimator, MemoCounter, TiktokenCounter, TokenCounter};
use crate::trim::{trim_body, trim_literal};

/// Imports kept in full at the head of a summarized run.
const IMPORT_KEEP: usize = 3;
/// Runs of imports longer than this are summarized.
const IMPORT_RUN_THRESHOLD: usize = 5;

/// Knobs for one reduction run. Budgets are token counts; a `None` budget
/// disables that trimmer entirely.
#[derive(Debug, Clone, Serialize)]
pub struct ReduceOptions {
    pub strip_private: bool,
    pub literal_budget: Option<usize>,
    pub body_budget: Option<usize>,
    pub strip_comments: bool,
    pub summarize_imports: bool,
}

impl Default for ReduceOptions {
    fn default() -> Self {
        Self {
            strip_private: true,
            literal_budget: None,
            body_budget: None,
            strip_comments: false,
            summarize_imports: false,
        }
    }
}

/// Result of reducing one file.
#[derive(Debug, Serialize)]
pub struct Reduction {
    pub text: String,
    pub metrics: MetricsRecord,
    pub applied_edits: usize,
    pub rejected_edits: usize,
    pub original_lines: usize,
    pub reduced_lines: usize,
}

impl Reduction {
    /// Fraction of lines removed (0.0 to 1.0).
    pub fn compression_ratio(&self) -> f64 {
        if self.original_lines == 0 {
            return 0.0;
        }
        let diff = self.original_lines as f64 - self.reduced_lines as f64;
        (diff / self.original_lines as f64).max(0.0)
    }
}

#[derive(Debug, Error)]
pub enum ReduceError {
    #[error("unsupported language for extension `{0}`")]
    UnsupportedLanguage(String),
    #[error("failed to load grammar: {0}")]
    Grammar(String),
    #[error("parser produced no tree")]
    Parse,
    #[error(transparent)]
    Table(#[from] TableError),
    #[error("invalid query for profile `{profile}`: {message}")]
    Query { profile: String, message: String },
}

/// Compiled per-language state: descriptor, resolved profile table, and the
/// compiled queries, one per profile in table order.
struct LanguageRuntime {
    spec: LanguageSpec,
    table: ProfileTable,
    queries: Vec<Query>,
}

impl LanguageRuntime {
    fn build(language: SupportedLanguage) -> Result<Self, ReduceError> {
        let spec = lang::spec_for(language);
        let table = (spec.build_table)()?;
        let grammar = language.tree_sitter_language();
        let mut queries = Vec::with_capacity(table.len());
        for profile in table.profiles() {
            let query = Query::new(&grammar, profile.query).map_err(|e| ReduceError::Query {
                profile: profile.name.to_string(),
                message: e.to_string(),
            })?;
            queries.push(query);
        }
        Ok(Self {
            spec,
            table,
            queries,
        })
    }
}

/// The engine instance: owns the tokenizer and a registry of compiled
/// per-language runtimes, built on first use and reused across files.
pub struct Reducer {
    tokenizer: Arc<dyn TokenCounter + Send + Sync>,
    runtimes: HashMap<SupportedLanguage, LanguageRuntime>,
}

impl Default for Reducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer {
    pub fn new() -> Self {
        let tokenizer: Arc<dyn TokenCounter + Send + Sync> = match TiktokenCounter::new() {
            Some(counter) => Arc::new(counter),
            None => Arc::new(CharEstimator),
        };
        Self::with_tokenizer(tokenizer)
    }

    pub fn with_tokenizer(tokenizer: Arc<dyn TokenCounter + Send + Sync>) -> Self {
        Self {
            tokenizer,
            runtimes: HashMap::new(),
        }
    }

    fn runtime(&mut self, language: SupportedLanguage) -> Result<&LanguageRuntime, ReduceError> {
        match self.runtimes.entry(language) {
            Entry::Occupied(slot) => Ok(slot.into_mut()),
            Entry::Vacant(slot) => Ok(slot.insert(LanguageRuntime::build(language)?)),
        }
    }

    /// Reduce one file's content.
    pub fn reduce(
        &mut self,
        content: &str,
        extension: &str,
        options: &ReduceOptions,
    ) -> Result<Reduction, ReduceError> {
        let language = SupportedLanguage::from_extension(extension)
            .ok_or_else(|| ReduceError::UnsupportedLanguage(extension.to_string()))?;
        let tokenizer = Arc::clone(&self.tokenizer);
        let runtime = self.runtime(language)?;
        reduce_in(runtime, tokenizer.as_ref(), language, content, options)
    }
}

/// One-shot convenience entry point.
pub fn reduce_source(
    content: &str,
    extension: &str,
    options: &ReduceOptions,
) -> Result<Reduction, ReduceError> {
    Reducer::new().reduce(content, extension, options)
}

/// Batch entry point: files are independent, so reduction runs in parallel
/// with order-preserving results.
pub fn reduce_files(
    files: &[(String, String)],
    options: &ReduceOptions,
) -> Vec<Result<Reduction, ReduceError>> {
    files
        .par_iter()
        .map(|(content, extension)| reduce_source(content, extension, options))
        .collect()
}

/// Run-level metric aggregation over successful reductions.
pub fn aggregate_metrics<'a>(reductions: impl IntoIterator<Item = &'a Reduction>) -> MetricsRecord {
    let mut total = MetricsRecord::new();
    for reduction in reductions {
        total.merge(&reduction.metrics);
    }
    total
}

fn reduce_in(
    runtime: &LanguageRuntime,
    tokenizer: &dyn TokenCounter,
    language: SupportedLanguage,
    content: &str,
    options: &ReduceOptions,
) -> Result<Reduction, ReduceError> {
    let mut parser = Parser::new();
    parser
        .set_language(&language.tree_sitter_language())
        .map_err(|e| ReduceError::Grammar(e.to_string()))?;
    let tree = parser.parse(content, None).ok_or(ReduceError::Parse)?;
    let root = tree.root_node();
    let source = content.as_bytes();
    let spec = &runtime.spec;

    let mut metrics = MetricsRecord::new();
    let mut editor = RangeEditor::new();

    let collection = collect::collect_elements(
        &runtime.table,
        &runtime.queries,
        &spec.conventions,
        root,
        source,
    );
    if collection.unresolved > 0 {
        metrics.add("collector.unresolved", collection.unresolved as u64);
        tracing::warn!(
            unresolved = collection.unresolved,
            "profile matches without a definition node"
        );
    }

    let mut removed_spans: Vec<(usize, usize)> = Vec::new();
    if options.strip_private {
        let private = collect::private_candidates(&collection.elements);
        let regions = collect::coalesce_adjacent(private, content);
        for region in &regions {
            let span = &content[region.range.start..region.range.end];
            let lines = span.lines().count().max(1);
            let comment = placeholder::removed_elements(
                &spec.comment,
                region.category(),
                region.elements.len(),
                lines,
            );
            editor.push(Edit::new(
                region.range.start,
                region.range.end,
                comment,
                EditKind::Removal,
            ));
            for element in &region.elements {
                metrics.add(&format!("removed.{}", pluralize(element.profile.name)), 1);
            }
            metrics.add("placeholders_inserted", 1);
            removed_spans.push((region.range.start, region.range.end));
        }
        tracing::debug!(regions = removed_spans.len(), "private elements marked for removal");
    }

    let memo = MemoCounter::new(tokenizer);

    if let Some(budget) = options.literal_budget {
        scan_literals(
            root,
            spec,
            source,
            budget,
            &memo,
            &removed_spans,
            &mut editor,
            &mut metrics,
        );
    }

    if let Some(budget) = options.body_budget {
        for element in &collection.elements {
            if options.strip_private && !element.is_public {
                continue;
            }
            if inside_any(&removed_spans, element.range.start, element.range.end) {
                continue;
            }
            let Some((start, end, closer_indent)) =
                body_region(content, element, spec.body_delimited)
            else {
                continue;
            };
            let region = &content[start..end];
            let indent = region_indent(content, start);
            if let Some(trimmed) = trim_body(
                region,
                budget,
                &memo,
                &spec.comment,
                &indent,
                closer_indent.as_deref(),
            ) {
                editor.push(Edit::new(start, end, trimmed.replacement, EditKind::BodyTrim));
                metrics.add("trimmed.bodies", 1);
                metrics.add("placeholders_inserted", 1);
            }
        }
    }

    if options.strip_comments {
        strip_comments(root, spec, content, &mut editor, &mut metrics);
    }

    if options.summarize_imports {
        summarize_imports(root, spec, &mut editor, &mut metrics);
    }

    let patched = editor.apply(content);
    metrics.add("bytes_saved", patched.bytes_saved.max(0) as u64);
    metrics.add("lines_saved", patched.lines_saved.max(0) as u64);
    metrics.add("edits.rejected", patched.rejected.len() as u64);

    tracing::debug!(
        ?language,
        applied = patched.applied.len(),
        rejected = patched.rejected.len(),
        bytes_saved = patched.bytes_saved,
        "reduced file"
    );

    let reduced_lines = patched.text.lines().count();
    Ok(Reduction {
        original_lines: content.lines().count(),
        reduced_lines,
        applied_edits: patched.applied.len(),
        rejected_edits: patched.rejected.len(),
        metrics,
        text: patched.text,
    })
}

fn inside_any(spans: &[(usize, usize)], start: usize, end: usize) -> bool {
    spans.iter().any(|&(s, e)| s <= start && end <= e)
}

#[allow(clippy::too_many_arguments)]
fn scan_literals(
    node: Node,
    spec: &LanguageSpec,
    source: &[u8],
    budget: usize,
    memo: &MemoCounter,
    removed_spans: &[(usize, usize)],
    editor: &mut RangeEditor,
    metrics: &mut MetricsRecord,
) {
    if let Some(kind) = (spec.literal_kind)(node, source) {
        // The outermost literal decides; nested literals are covered by it.
        if !inside_any(removed_spans, node.start_byte(), node.end_byte()) {
            let text = ast::node_text(node, source);
            if let Some(replacement) = trim_literal(text, kind, budget, memo, &spec.comment) {
                editor.push(Edit::new(
                    node.start_byte(),
                    node.end_byte(),
                    replacement,
                    EditKind::LiteralTrim,
                ));
                metrics.add("trimmed.literals", 1);
                metrics.add("placeholders_inserted", 1);
            }
        }
        return;
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    for child in children {
        scan_literals(
            child,
            spec,
            source,
            budget,
            memo,
            removed_spans,
            editor,
            metrics,
        );
    }
}

/// Byte span of the trimmable body region and the closing delimiter's
/// indentation, when the grammar has explicit block delimiters.
fn body_region(
    content: &str,
    element: &CodeElement,
    delimited: bool,
) -> Option<(usize, usize, Option<String>)> {
    let body = element.body?;
    let (mut start, end, closer_indent) = if delimited {
        let count = body.child_count();
        let first = body.child(0)?;
        let last = body.child(count.checked_sub(1)?)?;
        if first.kind() == "{" && last.kind() == "}" {
            let closer = ast::line_indent_at(content, last.start_byte()).to_string();
            (first.end_byte(), last.start_byte(), Some(closer))
        } else {
            (body.start_byte(), body.end_byte(), None)
        }
    } else {
        (body.start_byte(), body.end_byte(), None)
    };

    if let Some(doc) = element.docstring {
        if doc.start_byte() >= start && doc.end_byte() <= end {
            start = doc.end_byte();
        }
    }
    (start < end).then_some((start, end, closer_indent))
}

/// Indentation for the body placeholder: the first full line inside the
/// region, or one level deeper than the region's own line.
fn region_indent(content: &str, start: usize) -> String {
    let region = &content[start..];
    match region.find('\n') {
        Some(pos) if start + pos + 1 < content.len() => {
            ast::line_indent_at(content, start + pos + 1).to_string()
        }
        _ => format!("{}    ", ast::line_indent_at(content, start)),
    }
}

fn strip_comments(
    node: Node,
    spec: &LanguageSpec,
    content: &str,
    editor: &mut RangeEditor,
    metrics: &mut MetricsRecord,
) {
    if spec.conventions.comment_kinds.contains(&node.kind()) {
        let text = ast::node_text(node, content.as_bytes());
        let class = comments::classify(text, &spec.comment);
        if comments::should_strip(class) {
            let (start, end) = whole_line_span(content, node.start_byte(), node.end_byte());
            editor.push(Edit::new(start, end, "", EditKind::CommentStrip));
            metrics.add("removed.comments", 1);
        }
        return;
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    for child in children {
        strip_comments(child, spec, content, editor, metrics);
    }
}

/// Widen a comment span to its whole line when the comment is alone on it,
/// so stripping leaves no blank line behind.
fn whole_line_span(content: &str, start: usize, end: usize) -> (usize, usize) {
    let line_start = content[..start].rfind('\n').map(|p| p + 1).unwrap_or(0);
    let leading_ws = content[line_start..start]
        .chars()
        .all(|c| c == ' ' || c == '\t');
    if !leading_ws {
        return (start, end);
    }
    let rest = &content[end..];
    match rest.find('\n') {
        Some(pos) if rest[..pos].chars().all(|c| c == ' ' || c == '\t') => {
            (line_start, end + pos + 1)
        }
        None if rest.chars().all(|c| c == ' ' || c == '\t') => (line_start, content.len()),
        _ => (start, end),
    }
}

fn summarize_imports(
    root: Node,
    spec: &LanguageSpec,
    editor: &mut RangeEditor,
    metrics: &mut MetricsRecord,
) {
    let mut cursor = root.walk();
    let children: Vec<Node> = root.children(&mut cursor).collect();

    let mut i = 0;
    while i < children.len() {
        if !spec.import_kinds.contains(&children[i].kind()) {
            i += 1;
            continue;
        }
        let mut j = i;
        while j + 1 < children.len() && spec.import_kinds.contains(&children[j + 1].kind()) {
            j += 1;
        }
        let run = j - i + 1;
        if run > IMPORT_RUN_THRESHOLD {
            let keep_end = children[i + IMPORT_KEEP - 1].end_byte();
            let last_end = children[j].end_byte();
            let omitted = run - IMPORT_KEEP;
            let comment = placeholder::omitted_imports(&spec.comment, omitted);
            editor.push(Edit::new(
                keep_end,
                last_end,
                format!("\n{comment}"),
                EditKind::ImportSummary,
            ));
            metrics.add("removed.imports", omitted as u64);
            metrics.add("placeholders_inserted", 1);
        }
        i = j + 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn char_reducer() -> Reducer {
        Reducer::with_tokenizer(Arc::new(CharEstimator))
    }

    fn strip_only() -> ReduceOptions {
        ReduceOptions::default()
    }

    #[test]
    fn test_c_static_declaration_removed() {
        // Spec scenario: `static` means private in a C-like profile.
        let source = "int x = 1; static int y = 2;\n";
        let reduction = char_reducer().reduce(source, "c", &strip_only()).unwrap();
        assert!(reduction.text.contains("int x = 1;"));
        assert!(!reduction.text.contains("static int y"));
        assert!(reduction.text.contains("// private variable omitted (1 line)"));
        assert_eq!(reduction.metrics.get("removed.variables"), 1);
        assert_eq!(reduction.metrics.get("placeholders_inserted"), 1);
    }

    #[test]
    fn test_adjacent_private_fields_collapse_to_one_placeholder() {
        let source = "pub struct Conn {\n    pub url: String,\n    retries: u32,\n    timeout: u32,\n}\n";
        let reduction = char_reducer().reduce(source, "rs", &strip_only()).unwrap();
        assert!(reduction.text.contains("pub url: String,"));
        assert!(!reduction.text.contains("retries"));
        assert!(!reduction.text.contains("timeout"));
        // One placeholder, no orphan comma between the removed fields.
        assert_eq!(reduction.text.matches("omitted").count(), 1);
        assert!(reduction.text.contains("// 2 private fields omitted (2 lines)"));
        assert_eq!(reduction.metrics.get("removed.fields"), 2);
    }

    #[test]
    fn test_private_class_subsumes_private_method() {
        let source = "class _Hidden:\n    def _secret(self):\n        pass\n\nclass Visible:\n    pass\n";
        let reduction = char_reducer().reduce(source, "py", &strip_only()).unwrap();
        assert!(!reduction.text.contains("_Hidden"));
        assert!(!reduction.text.contains("_secret"));
        assert!(reduction.text.contains("class Visible"));
        assert_eq!(reduction.metrics.get("removed.classes"), 1);
        // The method never got its own edit.
        assert_eq!(reduction.metrics.get("removed.methods"), 0);
        assert_eq!(reduction.rejected_edits, 0);
    }

    #[test]
    fn test_rust_private_function_removed_public_kept() {
        let source = "pub fn api() -> u32 {\n    helper()\n}\n\nfn helper() -> u32 {\n    42\n}\n";
        let reduction = char_reducer().reduce(source, "rs", &strip_only()).unwrap();
        assert!(reduction.text.contains("pub fn api"));
        assert!(!reduction.text.contains("fn helper"));
        assert!(reduction.text.contains("// private function omitted"));
    }

    #[test]
    fn test_go_unexported_symbols_removed() {
        let source = "package p\n\nfunc Public() int {\n\treturn helper()\n}\n\nfunc helper() int {\n\treturn 1\n}\n";
        let reduction = char_reducer().reduce(source, "go", &strip_only()).unwrap();
        assert!(reduction.text.contains("func Public"));
        assert!(!reduction.text.contains("func helper"));
        assert_eq!(reduction.metrics.get("removed.functions"), 1);
    }

    #[test]
    fn test_typescript_unexported_removed() {
        let source = "export function api(): number {\n    return helper();\n}\n\nfunction helper(): number {\n    return 1;\n}\n";
        let reduction = char_reducer().reduce(source, "ts", &strip_only()).unwrap();
        assert!(reduction.text.contains("export function api"));
        assert!(!reduction.text.contains("function helper"));
    }

    #[test]
    fn test_python_decorated_private_function_removed_with_decorator() {
        let source = "@cached\ndef _helper():\n    return 1\n\ndef main():\n    return _helper()\n";
        let reduction = char_reducer().reduce(source, "py", &strip_only()).unwrap();
        assert!(!reduction.text.contains("@cached"));
        assert!(!reduction.text.contains("_helper():"));
        assert!(reduction.text.contains("def main"));
    }

    #[test]
    fn test_literal_budget_trims_large_array() {
        let source = "pub const NAMES: [&str; 8] = [\"alpha\", \"beta\", \"gamma\", \"delta\", \"epsilon\", \"zeta\", \"eta\", \"theta\"];\n";
        let options = ReduceOptions {
            literal_budget: Some(8),
            ..ReduceOptions::default()
        };
        let reduction = char_reducer().reduce(source, "rs", &options).unwrap();
        assert!(reduction.text.contains("\"alpha\""));
        assert!(!reduction.text.contains("\"theta\""));
        assert!(reduction.text.contains(']'));
        assert_eq!(reduction.metrics.get("trimmed.literals"), 1);
    }

    #[test]
    fn test_body_budget_trims_long_function_keeps_docstring() {
        let mut source = String::from("def process(items):\n    \"\"\"Keep me.\"\"\"\n");
        for i in 0..15 {
            source.push_str(&format!("    step_{i} = transform(items, {i})\n"));
        }
        source.push_str("    return items\n");

        let options = ReduceOptions {
            body_budget: Some(25),
            ..ReduceOptions::default()
        };
        let reduction = char_reducer().reduce(&source, "py", &options).unwrap();
        assert!(reduction.text.contains("\"\"\"Keep me.\"\"\""));
        assert!(reduction.text.contains("# ... ("));
        assert!(reduction.text.contains("lines trimmed"));
        assert!(!reduction.text.contains("step_14"));
        assert_eq!(reduction.metrics.get("trimmed.bodies"), 1);
    }

    #[test]
    fn test_rust_body_trim_keeps_closing_brace() {
        let mut source = String::from("pub fn run() {\n");
        for i in 0..20 {
            source.push_str(&format!("    let v{i} = compute({i});\n"));
        }
        source.push_str("}\n");

        let options = ReduceOptions {
            body_budget: Some(20),
            ..ReduceOptions::default()
        };
        let reduction = char_reducer().reduce(&source, "rs", &options).unwrap();
        assert!(reduction.text.contains("pub fn run() {"));
        assert!(reduction.text.contains("// ... ("));
        assert!(reduction.text.trim_end().ends_with('}'));
        assert!(!reduction.text.contains("v19"));
    }

    #[test]
    fn test_comment_stripping_keeps_docs_and_todos() {
        let source = "/// Public docs.\npub fn api() {}\n\n// x = 5\n// TODO: revisit\nfn helper() {}\n";
        let options = ReduceOptions {
            strip_private: false,
            strip_comments: true,
            ..ReduceOptions::default()
        };
        let reduction = char_reducer().reduce(source, "rs", &options).unwrap();
        assert!(reduction.text.contains("/// Public docs."));
        assert!(reduction.text.contains("// TODO: revisit"));
        assert!(!reduction.text.contains("// x = 5"));
        assert_eq!(reduction.metrics.get("removed.comments"), 1);
    }

    #[test]
    fn test_import_run_summarized() {
        let source = "import a\nimport b\nimport c\nimport d\nimport e\nimport f\nimport g\n\ndef main():\n    pass\n";
        let options = ReduceOptions {
            strip_private: false,
            summarize_imports: true,
            ..ReduceOptions::default()
        };
        let reduction = char_reducer().reduce(source, "py", &options).unwrap();
        assert!(reduction.text.contains("import a"));
        assert!(reduction.text.contains("import c"));
        assert!(!reduction.text.contains("import g"));
        assert!(reduction.text.contains("# 4 imports omitted"));
        assert_eq!(reduction.metrics.get("removed.imports"), 4);
    }

    #[test]
    fn test_unsupported_extension_is_an_error() {
        let err = char_reducer()
            .reduce("select 1;", "sql", &strip_only())
            .unwrap_err();
        assert!(matches!(err, ReduceError::UnsupportedLanguage(ext) if ext == "sql"));
    }

    #[test]
    fn test_reduction_is_deterministic() {
        let source = "pub struct S {\n    a: u32,\n    b: u32,\n}\n\nfn private_one() {}\n\npub fn keep() {\n    private_one()\n}\n";
        let options = ReduceOptions {
            literal_budget: Some(10),
            body_budget: Some(30),
            strip_comments: true,
            summarize_imports: true,
            ..ReduceOptions::default()
        };
        let mut reducer = char_reducer();
        let first = reducer.reduce(source, "rs", &options).unwrap();
        let second = reducer.reduce(source, "rs", &options).unwrap();
        assert_eq!(first.text, second.text);
        assert_eq!(first.metrics, second.metrics);
    }

    #[test]
    fn test_savings_accounting_and_ratio() {
        let source = "fn alpha() {\n    do_alpha_work();\n    do_more_alpha_work();\n}\n\nfn beta() {\n    do_beta_work();\n}\n\npub fn keep() {}\n";
        let reduction = char_reducer().reduce(source, "rs", &strip_only()).unwrap();
        assert!(reduction.metrics.get("bytes_saved") > 0);
        assert!(reduction.metrics.get("lines_saved") > 0);
        assert!(reduction.applied_edits >= 1);
        assert!(reduction.compression_ratio() > 0.0);
        assert_eq!(reduction.original_lines, 10);
    }

    #[test]
    fn test_batch_reduction_and_metric_merge() {
        let files = vec![
            ("fn a() {}\npub fn keep() {}\n".to_string(), "rs".to_string()),
            ("def _b():\n    pass\n\ndef keep():\n    pass\n".to_string(), "py".to_string()),
        ];
        let results = reduce_files(&files, &ReduceOptions::default());
        assert_eq!(results.len(), 2);
        let reductions: Vec<&Reduction> =
            results.iter().filter_map(|r| r.as_ref().ok()).collect();
        assert_eq!(reductions.len(), 2);
        let total = aggregate_metrics(reductions.iter().copied());
        assert_eq!(total.get("removed.functions"), 2);
    }

    #[test]
    fn test_metrics_serialize_for_reporting() {
        let source = "fn a() {}\npub fn keep() {}\n";
        let reduction = char_reducer().reduce(source, "rs", &strip_only()).unwrap();
        let json = serde_json::to_string(&reduction).unwrap();
        assert!(json.contains("removed.functions"));
        assert!(json.contains("bytes_saved"));
    }
}
