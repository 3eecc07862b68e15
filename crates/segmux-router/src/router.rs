//! Route registry: one trie per HTTP method

use crate::node::{Node, NodeKind};
use crate::params::Params;
use crate::path::{join_pattern, split};
use std::collections::HashMap;
use thiserror::Error;

/// Registration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// Pattern does not start with a method name (`/users`, ``)
    #[error("pattern {0:?} has no method")]
    EmptyMethod(String),
}

/// Why a lookup produced no handler.
///
/// Callers serving HTTP treat both the same way; the split exists for
/// diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("no routes registered for method {0}")]
    NoRouteForMethod(String),
    #[error("no pattern matches {method} {path}")]
    NoMatchingPattern { method: String, path: String },
}

/// Resolution order between a literal and a parameter at the same depth
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Precedence {
    /// The literal branch is explored first; the parameter branch is a
    /// fallback when the literal subtree cannot complete the match.
    #[default]
    StaticFirst,
    /// Single pass without backtracking. A literal only wins when it ends
    /// the path on a terminal node; in every other case an existing
    /// parameter child is taken instead.
    ParamFirst,
}

/// Route match result
#[derive(Debug, Clone, PartialEq)]
pub struct Match<'a, T> {
    /// Value bound to the matched pattern
    pub value: &'a T,
    /// Captured path parameters, left to right
    pub params: Params,
}

/// Segment trie HTTP router
///
/// Routes are organized by HTTP method (case-sensitive), then matched one
/// `/`-delimited segment at a time.
#[derive(Debug)]
pub struct Router<T> {
    /// Method -> Trie root
    methods: HashMap<String, Node<T>>,
    precedence: Precedence,
}

impl<T> Router<T> {
    /// Create a new router with [`Precedence::StaticFirst`]
    pub fn new() -> Self {
        Self::with_precedence(Precedence::default())
    }

    pub fn with_precedence(precedence: Precedence) -> Self {
        Self {
            methods: HashMap::new(),
            precedence,
        }
    }

    pub fn precedence(&self) -> Precedence {
        self.precedence
    }

    /// Insert a route from a `METHOD/path` pattern.
    ///
    /// Segments starting with `:` are parameters. Registering the same
    /// pattern twice replaces the value.
    ///
    /// ```
    /// use segmux_router::Router;
    ///
    /// let mut router = Router::new();
    /// router.insert("GET/users/:id", 1).unwrap();
    /// router.insert("GET", 0).unwrap();
    /// assert!(router.insert("/users", 2).is_err());
    /// ```
    pub fn insert(&mut self, pattern: &str, value: T) -> Result<(), PatternError> {
        // split() would eat the leading slash and promote the first path
        // segment to a method
        if pattern.is_empty() || pattern.starts_with('/') {
            return Err(PatternError::EmptyMethod(pattern.to_string()));
        }
        let segments = split(pattern);
        let Some((method, path)) = segments.split_first().filter(|(m, _)| !m.is_empty()) else {
            return Err(PatternError::EmptyMethod(pattern.to_string()));
        };

        let root = self
            .methods
            .entry(method.to_string())
            .or_insert_with(|| Node::new(method, NodeKind::Method));
        root.insert(path, value);
        Ok(())
    }

    /// Insert a route from a method and a separate path
    pub fn route(&mut self, method: &str, path: &str, value: T) -> Result<(), PatternError> {
        self.insert(&join_pattern(method, path), value)
    }

    /// Resolve a request path.
    ///
    /// ```
    /// use segmux_router::{MatchError, Router};
    ///
    /// let mut router = Router::new();
    /// router.insert("GET/authorizations/:id", "auth").unwrap();
    ///
    /// let m = router.lookup("GET", "/authorizations/1").unwrap();
    /// assert_eq!(*m.value, "auth");
    /// assert_eq!(m.params.get("id"), Some("1"));
    ///
    /// assert!(matches!(
    ///     router.lookup("HEAD", "/authorizations/1"),
    ///     Err(MatchError::NoRouteForMethod(_))
    /// ));
    /// ```
    pub fn lookup(&self, method: &str, path: &str) -> Result<Match<'_, T>, MatchError> {
        self.lookup_segments(method, &split(path))
    }

    /// Resolve an already tokenized path. An empty slice never matches.
    pub fn lookup_segments(
        &self,
        method: &str,
        segments: &[&str],
    ) -> Result<Match<'_, T>, MatchError> {
        let root = self
            .methods
            .get(method)
            .ok_or_else(|| MatchError::NoRouteForMethod(method.to_string()))?;

        let mut params = Params::new();
        let found = match self.precedence {
            _ if segments.is_empty() => None,
            Precedence::StaticFirst => root.find_static_first(segments, &mut params),
            Precedence::ParamFirst => root.find_param_first(segments, &mut params),
        };

        found
            .map(|value| Match { value, params })
            .ok_or_else(|| MatchError::NoMatchingPattern {
                method: method.to_string(),
                path: segments.join("/"),
            })
    }

    /// Resolve a request path, collapsing both miss reasons into `None`
    pub fn find(&self, method: &str, path: &str) -> Option<Match<'_, T>> {
        self.lookup(method, path).ok()
    }

    /// Check if a method has any routes registered
    pub fn has_method(&self, method: &str) -> bool {
        self.methods.contains_key(method)
    }

    /// Registered methods, sorted
    pub fn methods(&self) -> Vec<&str> {
        let mut methods: Vec<&str> = self.methods.keys().map(String::as_str).collect();
        methods.sort_unstable();
        methods
    }

    /// Number of terminal nodes across all methods
    pub fn len(&self) -> usize {
        fn count<T>(node: &Node<T>) -> usize {
            usize::from(node.is_terminal())
                + node.statics.values().map(count).sum::<usize>()
                + node.param.as_deref().map_or(0, count)
        }
        self.methods.values().map(count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn roots(&self) -> impl Iterator<Item = (&String, &Node<T>)> {
        self.methods.iter()
    }
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}
