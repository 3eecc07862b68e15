//! Trie nodes and the two traversal policies

use crate::params::Params;
use crate::path::{is_param, param_name};
use std::collections::HashMap;

/// Role of a node in a method trie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NodeKind {
    /// Trie root, keyed by method name
    Method,
    /// Literal segment
    Static,
    /// Holder for a pattern made of the method alone (root path)
    Complete,
    /// Named parameter segment
    NonStatic,
}

/// One segment position in a method trie
#[derive(Debug)]
pub(crate) struct Node<T> {
    /// Literal text, or the parameter name without its marker
    pub(crate) resource: String,
    pub(crate) kind: NodeKind,
    /// Bound value; a node is terminal iff this is set
    pub(crate) value: Option<T>,
    pub(crate) statics: HashMap<String, Node<T>>,
    pub(crate) param: Option<Box<Node<T>>>,
}

impl<T> Node<T> {
    pub(crate) fn new(resource: &str, kind: NodeKind) -> Self {
        Self {
            resource: param_name(resource).to_string(),
            kind,
            value: None,
            statics: HashMap::new(),
            param: None,
        }
    }

    #[inline]
    pub(crate) fn is_terminal(&self) -> bool {
        self.value.is_some()
    }

    /// Bind `value` at the position named by `segments`, creating the
    /// missing nodes on the way. An empty slice addresses the root path.
    pub(crate) fn insert(&mut self, segments: &[&str], value: T) {
        match segments.split_first() {
            Some((segment, rest)) => self.insert_segment(segment, rest, value),
            None => {
                let node = self
                    .statics
                    .entry(String::new())
                    .or_insert_with(|| Node::new("", NodeKind::Complete));
                node.value = Some(value);
            }
        }
    }

    fn insert_segment(&mut self, segment: &str, rest: &[&str], value: T) {
        let child = if is_param(segment) {
            let child = self
                .param
                .get_or_insert_with(|| Box::new(Node::new(segment, NodeKind::NonStatic)));
            let name = param_name(segment);
            if child.resource != name {
                // one parameter branch per node: the newest name wins
                tracing::warn!(
                    previous = %child.resource,
                    current = %name,
                    "parameter renamed on shared trie branch"
                );
                child.resource = name.to_string();
            }
            child.as_mut()
        } else {
            self.statics
                .entry(segment.to_string())
                .or_insert_with(|| Node::new(segment, NodeKind::Static))
        };

        match rest.split_first() {
            Some((next, rest)) => child.insert_segment(next, rest, value),
            None => child.value = Some(value),
        }
    }

    /// Static children are tried first; the parameter branch is a
    /// fallback, entered only when the static subtree cannot complete the
    /// match. Bindings from abandoned branches are rolled back.
    pub(crate) fn find_static_first<'a>(
        &'a self,
        segments: &[&str],
        params: &mut Params,
    ) -> Option<&'a T> {
        let Some((segment, rest)) = segments.split_first() else {
            return self.value.as_ref();
        };

        if let Some(child) = self.statics.get(*segment) {
            if let Some(value) = child.find_static_first(rest, params) {
                return Some(value);
            }
        }

        if let Some(child) = self.param.as_deref() {
            params.push(child.resource.as_str(), *segment);
            if let Some(value) = child.find_static_first(rest, params) {
                return Some(value);
            }
            params.pop();
        }

        None
    }

    /// Single pass, no backtracking. A static child only wins when it is
    /// terminal on the last segment; otherwise an existing parameter child
    /// replaces it as the next node.
    pub(crate) fn find_param_first<'a>(
        &'a self,
        segments: &[&str],
        params: &mut Params,
    ) -> Option<&'a T> {
        let last = segments.len().checked_sub(1)?;
        let mut node = self;

        for (idx, segment) in segments.iter().enumerate() {
            let mut next = None;

            if let Some((key, child)) = static_entry(node, segment) {
                if idx == last {
                    if let Some(value) = child.value.as_ref() {
                        if key == *segment {
                            return Some(value);
                        }
                        return None;
                    }
                }
                next = Some(child);
            }

            if let Some(child) = node.param.as_deref() {
                params.push(child.resource.as_str(), *segment);
                if idx == last {
                    if let Some(value) = child.value.as_ref() {
                        return Some(value);
                    }
                }
                next = Some(child);
            }

            node = next?;
        }

        None
    }
}

fn static_entry<'a, T>(node: &'a Node<T>, segment: &str) -> Option<(&'a str, &'a Node<T>)> {
    node.statics
        .get_key_value(segment)
        .map(|(key, child)| (key.as_str(), child))
}
