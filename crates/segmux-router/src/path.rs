//! Path tokenizer
//!
//! Patterns and request paths share one splitting rule so that a pattern
//! registered as `GET/users/` and a request for `/users` land on the same
//! trie position.

/// Prefix that turns a segment into a named parameter (`:id`)
pub const PARAM_MARKER: char = ':';

/// Split a path (or a `METHOD/path` pattern) into segment tokens.
///
/// One leading and one trailing `/` are stripped, the remainder is split
/// on `/`. An empty remainder produces a single empty token, which is how
/// the root path is addressed.
///
/// ```
/// use segmux_router::path::split;
///
/// assert_eq!(split("/users/42/"), vec!["users", "42"]);
/// assert_eq!(split("GET/users/:id"), vec!["GET", "users", ":id"]);
/// assert_eq!(split("/"), vec![""]);
/// assert_eq!(split(""), vec![""]);
/// ```
pub fn split(path: &str) -> Vec<&str> {
    let path = path.strip_prefix('/').unwrap_or(path);
    let path = path.strip_suffix('/').unwrap_or(path);
    path.split('/').collect()
}

/// Build a registration pattern from a method and a path.
///
/// The method is glued onto the path without a separator, so
/// `("GET", "/users")` becomes `GET/users` and `("GET", "")` becomes `GET`.
pub fn join_pattern(method: &str, path: &str) -> String {
    let mut pattern = String::with_capacity(method.len() + path.len() + 1);
    pattern.push_str(method);
    if !path.is_empty() && !path.starts_with('/') {
        pattern.push('/');
    }
    pattern.push_str(path);
    pattern
}

/// Whether a pattern segment binds a parameter
#[inline]
pub fn is_param(segment: &str) -> bool {
    segment.starts_with(PARAM_MARKER)
}

/// Parameter name of a segment, with every leading marker removed
#[inline]
pub(crate) fn param_name(segment: &str) -> &str {
    segment.trim_start_matches(PARAM_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_strips_single_slashes() {
        assert_eq!(split("/a/b"), vec!["a", "b"]);
        assert_eq!(split("a/b/"), vec!["a", "b"]);
        assert_eq!(split("/comments/"), vec!["comments"]);
    }

    #[test]
    fn test_split_keeps_inner_empty_segments() {
        assert_eq!(split("/a//b"), vec!["a", "", "b"]);
        // only one slash is stripped on each side
        assert_eq!(split("//a//"), vec!["", "a", ""]);
    }

    #[test]
    fn test_split_root() {
        assert_eq!(split(""), vec![""]);
        assert_eq!(split("/"), vec![""]);
        assert_eq!(split("//"), vec![""]);
    }

    #[test]
    fn test_split_no_decoding() {
        assert_eq!(split("/files/a%20b/:x"), vec!["files", "a%20b", ":x"]);
    }

    #[test]
    fn test_join_pattern() {
        assert_eq!(join_pattern("GET", "/users/:id"), "GET/users/:id");
        assert_eq!(join_pattern("POST", "users"), "POST/users");
        assert_eq!(join_pattern("GET", ""), "GET");
        assert_eq!(join_pattern("GET", "/"), "GET/");
    }

    #[test]
    fn test_param_classification() {
        assert!(is_param(":id"));
        assert!(!is_param("id"));
        assert!(!is_param(""));
        assert_eq!(param_name(":id"), "id");
        assert_eq!(param_name("::id"), "id");
    }
}
