//! Parameter lookup for handler code

use crate::request::Request;
use segmux_router::Params;

/// Path and query parameters of a request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Values {
    /// Bindings captured by the router; `None` when the matched pattern
    /// had no parameters or the request was never routed
    pub path: Option<Params>,
    /// Decoded query string pairs, in order of appearance
    pub query: Vec<(String, String)>,
}

impl Values {
    /// Last value bound to a path parameter
    pub fn path(&self, name: &str) -> Option<&str> {
        self.path.as_ref().and_then(|p| p.get(name))
    }

    /// Every value bound to a path parameter, in binding order.
    /// Empty when the request carries no parameters.
    pub fn path_all(&self, name: &str) -> Vec<&str> {
        self.path.as_ref().map(|p| p.get_all(name)).unwrap_or_default()
    }

    /// First query value for `name`
    pub fn query(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Collect the parameters of a request.
///
/// ```
/// use segmux_core::{params, Request};
///
/// let req = Request::new("GET", "something");
/// assert!(params(&req).path.is_none());
/// ```
pub fn params(req: &Request) -> Values {
    Values {
        path: req.path_params().cloned(),
        query: req.query_params(),
    }
}
