//! segmux-router: per-method segment trie HTTP router
//!
//! Patterns combine a method and a path template, `GET/users/:id`.
//! Each method owns a trie; every `/`-delimited segment is one level.
//!
//! ## Path Syntax
//! - `users` - Literal segment, matched by exact text
//! - `:name` - Named parameter (captures one segment)
//!
//! ## Priority
//! With the default [`Precedence::StaticFirst`]:
//! 1. Literal segment, if its subtree completes the match
//! 2. Parameter segment (fallback)
//!
//! [`Precedence::ParamFirst`] keeps the single pass traversal where a
//! parameter child overrides any literal that does not end the path.
//!
//! ## Example
//! ```
//! use segmux_router::Router;
//!
//! let mut router = Router::new();
//! router.insert("GET/users", 0).unwrap();
//! router.insert("GET/users/:id", 1).unwrap();
//! router.insert("GET/users/cleanup", 2).unwrap();
//!
//! let m = router.find("GET", "/users/123").unwrap();
//! assert_eq!(*m.value, 1);
//! assert_eq!(m.params.get("id"), Some("123"));
//!
//! assert_eq!(*router.find("GET", "/users/cleanup").unwrap().value, 2);
//! assert!(router.find("GET", "/users/123/extra").is_none());
//! ```
//!
//! The router has no interior locking. Build it first, then share it
//! behind an `Arc` (or any other immutable borrow) for matching.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

mod node;
pub mod params;
pub mod path;
mod router;
pub mod tree;

pub use node::NodeKind;
pub use params::Params;
pub use router::{Match, MatchError, PatternError, Precedence, Router};
pub use tree::{NodeView, RouteTree};
