//! Declarative element profiles.
//!
//! A profile describes one kind of removable construct for one language: the
//! tree query that finds it, how to decide whether it is public API, and how
//! to locate its body and docstring. Profiles are pure data (fn pointers and
//! static strings); every language contributes a table of them, never
//! control flow.

use thiserror::Error;
use tree_sitter::Node;

/// Predicate over a node and the source buffer.
pub type NodePredicate = fn(Node<'_>, &[u8]) -> bool;

/// Locates the body node of a definition.
pub type BodyLocator = for<'t> fn(Node<'t>) -> Option<Node<'t>>;

/// Locates the leading documentation node inside a body.
pub type DocLocator = for<'t> fn(Node<'t>, &[u8]) -> Option<Node<'t>>;

/// How a profile decides whether an element is public API. Exactly one rule
/// governs a profile; a profile with no rule defaults to public and is never
/// removed.
#[derive(Clone, Copy)]
pub enum Exposure {
    /// Language has a visibility notion; `true` means public.
    Visibility(NodePredicate),
    /// Language has an export notion; `true` means exported.
    Exported(NodePredicate),
}

impl Exposure {
    pub fn is_public(&self, node: Node, source: &[u8]) -> bool {
        match self {
            Exposure::Visibility(rule) | Exposure::Exported(rule) => rule(node, source),
        }
    }
}

impl std::fmt::Debug for Exposure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Exposure::Visibility(_) => f.write_str("Visibility(..)"),
            Exposure::Exported(_) => f.write_str("Exported(..)"),
        }
    }
}

/// Declarative input to the table builder. Unset fields inherit from the
/// parent profile when `inherits` is given.
#[derive(Debug, Default)]
pub struct ProfileSpec {
    pub name: &'static str,
    pub query: Option<&'static str>,
    pub inherits: Option<&'static str>,
    pub extra_filter: Option<NodePredicate>,
    pub visibility: Option<NodePredicate>,
    pub exported: Option<NodePredicate>,
    pub has_body: bool,
    pub body_locator: Option<BodyLocator>,
    pub docstring_locator: Option<DocLocator>,
}

impl ProfileSpec {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    pub fn query(mut self, query: &'static str) -> Self {
        self.query = Some(query);
        self
    }

    pub fn inherits(mut self, parent: &'static str) -> Self {
        self.inherits = Some(parent);
        self
    }

    pub fn filter(mut self, filter: NodePredicate) -> Self {
        self.extra_filter = Some(filter);
        self
    }

    /// Visibility rule: `true` means public.
    pub fn visibility(mut self, rule: NodePredicate) -> Self {
        self.visibility = Some(rule);
        self
    }

    /// Export rule: `true` means exported.
    pub fn exported(mut self, rule: NodePredicate) -> Self {
        self.exported = Some(rule);
        self
    }

    pub fn with_body(mut self, locator: BodyLocator) -> Self {
        self.has_body = true;
        self.body_locator = Some(locator);
        self
    }

    pub fn docstring(mut self, locator: DocLocator) -> Self {
        self.docstring_locator = Some(locator);
        self
    }
}

/// A fully resolved profile: inheritance applied, filters flattened.
#[derive(Debug)]
pub struct ElementProfile {
    pub name: &'static str,
    pub query: &'static str,
    pub filters: Vec<NodePredicate>,
    pub exposure: Option<Exposure>,
    pub has_body: bool,
    pub body_locator: Option<BodyLocator>,
    pub docstring_locator: Option<DocLocator>,
}

impl ElementProfile {
    /// All extra filters must accept the node.
    pub fn accepts(&self, node: Node, source: &[u8]) -> bool {
        self.filters.iter().all(|filter| filter(node, source))
    }

    /// Public verdict; profiles without a rule default to public so nothing
    /// the language rules say nothing about is silently removed.
    pub fn is_public(&self, node: Node, source: &[u8]) -> bool {
        match &self.exposure {
            Some(exposure) => exposure.is_public(node, source),
            None => true,
        }
    }
}

/// Configuration bugs surfaced at table-construction time, before any file
/// is processed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("duplicate profile name `{0}`")]
    DuplicateProfile(String),
    #[error("profile `{child}` inherits unknown parent `{parent}`")]
    UnknownParentProfile { child: String, parent: String },
    #[error("profile `{0}` has both a visibility rule and an export rule")]
    ConflictingRules(String),
    #[error("profile `{0}` has no query and no parent to inherit one from")]
    MissingQuery(String),
}

/// Ordered list of resolved profiles for one language. Declaration order is
/// significant: when two profiles match the same definition node, the first
/// one in table order claims it.
#[derive(Debug, Default)]
pub struct ProfileTable {
    profiles: Vec<ElementProfile>,
}

impl ProfileTable {
    pub fn builder() -> ProfileTableBuilder {
        ProfileTableBuilder::default()
    }

    pub fn profiles(&self) -> &[ElementProfile] {
        &self.profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[derive(Default)]
pub struct ProfileTableBuilder {
    specs: Vec<ProfileSpec>,
}

impl ProfileTableBuilder {
    pub fn profile(mut self, spec: ProfileSpec) -> Self {
        self.specs.push(spec);
        self
    }

    /// Validate and resolve inheritance.
    ///
    /// A child reuses the parent's query unless it supplies its own, the
    /// extra filters are AND-ed, and the child's visibility/export override
    /// applies only when explicitly supplied.
    pub fn build(self) -> Result<ProfileTable, TableError> {
        for (i, spec) in self.specs.iter().enumerate() {
            if self.specs[..i].iter().any(|s| s.name == spec.name) {
                return Err(TableError::DuplicateProfile(spec.name.to_string()));
            }
            if spec.visibility.is_some() && spec.exported.is_some() {
                return Err(TableError::ConflictingRules(spec.name.to_string()));
            }
        }

        let mut profiles = Vec::with_capacity(self.specs.len());
        for spec in &self.specs {
            let parent = match spec.inherits {
                Some(parent_name) => Some(
                    self.specs
                        .iter()
                        .find(|s| s.name == parent_name)
                        .ok_or_else(|| TableError::UnknownParentProfile {
                            child: spec.name.to_string(),
                            parent: parent_name.to_string(),
                        })?,
                ),
                None => None,
            };

            let query = spec
                .query
                .or(parent.and_then(|p| p.query))
                .ok_or_else(|| TableError::MissingQuery(spec.name.to_string()))?;

            let mut filters = Vec::new();
            if let Some(parent) = parent {
                filters.extend(parent.extra_filter);
            }
            filters.extend(spec.extra_filter);

            let exposure = if spec.visibility.is_some() || spec.exported.is_some() {
                spec.visibility
                    .map(Exposure::Visibility)
                    .or(spec.exported.map(Exposure::Exported))
            } else if let Some(parent) = parent {
                parent
                    .visibility
                    .map(Exposure::Visibility)
                    .or(parent.exported.map(Exposure::Exported))
            } else {
                None
            };

            let body_locator = spec.body_locator.or(parent.and_then(|p| p.body_locator));
            let docstring_locator = spec
                .docstring_locator
                .or(parent.and_then(|p| p.docstring_locator));

            profiles.push(ElementProfile {
                name: spec.name,
                query,
                filters,
                exposure,
                has_body: spec.has_body || parent.is_some_and(|p| p.has_body),
                body_locator,
                docstring_locator,
            });
        }

        Ok(ProfileTable { profiles })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn always(_node: Node, _source: &[u8]) -> bool {
        true
    }

    fn never(_node: Node, _source: &[u8]) -> bool {
        false
    }

    #[test]
    fn test_duplicate_profile_is_fatal() {
        let err = ProfileTable::builder()
            .profile(ProfileSpec::new("function").query("(function_item) @def"))
            .profile(ProfileSpec::new("function").query("(function_item) @def"))
            .build()
            .unwrap_err();
        assert_eq!(err, TableError::DuplicateProfile("function".into()));
    }

    #[test]
    fn test_unknown_parent_is_fatal() {
        let err = ProfileTable::builder()
            .profile(ProfileSpec::new("method").inherits("function"))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            TableError::UnknownParentProfile {
                child: "method".into(),
                parent: "function".into(),
            }
        );
    }

    #[test]
    fn test_conflicting_rules_are_fatal() {
        let err = ProfileTable::builder()
            .profile(
                ProfileSpec::new("function")
                    .query("(function_item) @def")
                    .visibility(always)
                    .exported(always),
            )
            .build()
            .unwrap_err();
        assert_eq!(err, TableError::ConflictingRules("function".into()));
    }

    #[test]
    fn test_child_inherits_query_and_ands_filters() {
        let table = ProfileTable::builder()
            .profile(
                ProfileSpec::new("function")
                    .query("(function_item) @def")
                    .filter(always)
                    .visibility(always),
            )
            .profile(ProfileSpec::new("method").inherits("function").filter(never))
            .build()
            .unwrap();

        let method = &table.profiles()[1];
        assert_eq!(method.query, "(function_item) @def");
        assert_eq!(method.filters.len(), 2);
        assert!(matches!(method.exposure, Some(Exposure::Visibility(_))));
    }

    #[test]
    fn test_child_rule_override_only_when_supplied() {
        let table = ProfileTable::builder()
            .profile(
                ProfileSpec::new("function")
                    .query("(function_item) @def")
                    .visibility(always),
            )
            .profile(
                ProfileSpec::new("method")
                    .inherits("function")
                    .exported(never),
            )
            .profile(ProfileSpec::new("getter").inherits("function"))
            .build()
            .unwrap();

        // Child with an explicit rule switches to it; child without one
        // inherits the parent's.
        assert!(matches!(
            table.profiles()[1].exposure,
            Some(Exposure::Exported(_))
        ));
        assert!(matches!(
            table.profiles()[2].exposure,
            Some(Exposure::Visibility(_))
        ));
    }

    #[test]
    fn test_profile_without_rule_defaults_to_public() {
        let table = ProfileTable::builder()
            .profile(ProfileSpec::new("function").query("(function_item) @def"))
            .build()
            .unwrap();
        // No rule set: is_public must hold for any node, checked structurally.
        assert!(table.profiles()[0].exposure.is_none());
    }

    #[test]
    fn test_missing_query_is_fatal() {
        let err = ProfileTable::builder()
            .profile(ProfileSpec::new("function"))
            .build()
            .unwrap_err();
        assert_eq!(err, TableError::MissingQuery("function".into()));
    }
}
