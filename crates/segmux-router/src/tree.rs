//! Read-only view of the trie for debugging and introspection
//!
//! The view borrows from the router and never exposes the stored values,
//! only whether one is bound.

use crate::node::{Node, NodeKind};
use crate::router::Router;
use std::collections::BTreeMap;

/// A single node as seen from outside the router
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NodeView<'a> {
    pub resource: &'a str,
    pub terminal: bool,
    pub kind: NodeKind,
    pub handler: bool,
    pub non_static: Option<Box<NodeView<'a>>>,
    #[cfg_attr(feature = "serde", serde(rename = "static"))]
    pub statics: BTreeMap<&'a str, NodeView<'a>>,
}

impl<'a> NodeView<'a> {
    fn of<T>(node: &'a Node<T>) -> Self {
        Self {
            resource: &node.resource,
            terminal: node.is_terminal(),
            kind: node.kind,
            handler: node.value.is_some(),
            non_static: node.param.as_deref().map(|n| Box::new(NodeView::of(n))),
            statics: node
                .statics
                .iter()
                .map(|(key, child)| (key.as_str(), NodeView::of(child)))
                .collect(),
        }
    }
}

/// Every method root, keyed by method name
pub type RouteTree<'a> = BTreeMap<&'a str, NodeView<'a>>;

impl<T> Router<T> {
    /// Snapshot the trie structure
    pub fn tree(&self) -> RouteTree<'_> {
        self.roots()
            .map(|(method, root)| (method.as_str(), NodeView::of(root)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_shape() {
        let mut router = Router::new();
        router.insert("GET/user/deactivate", ()).unwrap();
        router.insert("GET/user/:id", ()).unwrap();

        let tree = router.tree();
        let root = &tree["GET"];
        assert_eq!(root.kind, NodeKind::Method);
        assert_eq!(root.resource, "GET");
        assert!(!root.handler);

        let user = &root.statics["user"];
        assert!(!user.terminal);
        let id = user.non_static.as_deref().unwrap();
        assert_eq!(id.resource, "id");
        assert_eq!(id.kind, NodeKind::NonStatic);
        assert!(id.handler);
        assert!(user.statics["deactivate"].terminal);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_tree_json() {
        let mut router = Router::new();
        router.insert("GET/user/deactivate", 1).unwrap();

        let json = serde_json::to_value(router.tree()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "GET": {
                    "resource": "GET",
                    "terminal": false,
                    "kind": "method",
                    "handler": false,
                    "non_static": null,
                    "static": {
                        "user": {
                            "resource": "user",
                            "terminal": false,
                            "kind": "static",
                            "handler": false,
                            "non_static": null,
                            "static": {
                                "deactivate": {
                                    "resource": "deactivate",
                                    "terminal": true,
                                    "kind": "static",
                                    "handler": true,
                                    "non_static": null,
                                    "static": {}
                                }
                            }
                        }
                    }
                }
            })
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_root_path_kind() {
        let mut router = Router::new();
        router.insert("GET", 0).unwrap();

        let json = serde_json::to_value(router.tree()).unwrap();
        assert_eq!(json["GET"]["static"][""]["kind"], "complete");
        assert_eq!(json["GET"]["static"][""]["handler"], true);
    }
}
