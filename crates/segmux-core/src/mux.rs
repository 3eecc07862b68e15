//! Request multiplexer
//!
//! [`ServeMux`] owns a [`Router`] of handlers. Registration needs `&mut
//! self`; once every route is in place the mux is shared (usually in an
//! `Arc`) and only read while dispatching.

use crate::context::Context;
use crate::error::Result;
use crate::handler::{BoxFuture, Handler, NotFound, SharedHandler};
use crate::request::Request;
use crate::response::Response;
use segmux_router::{path, Precedence, Router};
use std::fmt;
use std::sync::Arc;

/// Decorates every routed request: receives the request and the resolved
/// handler, and decides when (and whether) to run it
pub type Interceptor = Arc<dyn Fn(Request, Next) -> BoxFuture<Response> + Send + Sync>;

/// The resolved handler, handed to an [`Interceptor`]
#[derive(Clone)]
pub struct Next {
    handler: SharedHandler,
}

impl Next {
    pub fn run(self, req: Request) -> BoxFuture<Response> {
        self.handler.call(req)
    }
}

impl fmt::Debug for Next {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Next").finish_non_exhaustive()
    }
}

/// Multiplexer options
#[derive(Clone)]
pub struct MuxOptions {
    /// Runs when no route matches
    pub not_found: SharedHandler,
    /// Wraps every routed handler
    pub interceptor: Option<Interceptor>,
    /// Root of every request context
    pub context: Context,
    /// Literal vs parameter resolution order
    pub precedence: Precedence,
}

impl Default for MuxOptions {
    fn default() -> Self {
        Self {
            not_found: Arc::new(NotFound),
            interceptor: None,
            context: Context::background(),
            precedence: Precedence::default(),
        }
    }
}

impl MuxOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn not_found(mut self, handler: impl Handler) -> Self {
        let handler: SharedHandler = Arc::new(handler);
        self.not_found = handler;
        self
    }

    pub fn interceptor<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Response> + Send + 'static,
    {
        let interceptor: Interceptor =
            Arc::new(move |req: Request, next: Next| -> BoxFuture<Response> { Box::pin(f(req, next)) });
        self.interceptor = Some(interceptor);
        self
    }

    pub fn context(mut self, context: Context) -> Self {
        self.context = context;
        self
    }

    pub fn precedence(mut self, precedence: Precedence) -> Self {
        self.precedence = precedence;
        self
    }
}

/// HTTP request multiplexer.
///
/// Patterns are `METHOD/path`, segments starting with `:` bind a
/// parameter:
///
/// ```text
/// GET/users
/// GET/users/action
/// GET/users/:id
/// GET/users/:id/comments
/// GET/users/:id/comments/hide
/// ```
pub struct ServeMux {
    router: Router<SharedHandler>,
    not_found: SharedHandler,
    interceptor: Option<Interceptor>,
    context: Context,
}

impl ServeMux {
    pub fn new(opts: MuxOptions) -> Self {
        Self {
            router: Router::with_precedence(opts.precedence),
            not_found: opts.not_found,
            interceptor: opts.interceptor,
            context: opts.context,
        }
    }

    /// Register a handler for a `METHOD/path` pattern
    pub fn handle(&mut self, pattern: &str, handler: impl Handler) -> Result<()> {
        let handler: SharedHandler = Arc::new(handler);
        self.router.insert(pattern, handler)?;
        tracing::debug!(pattern, "route registered");
        Ok(())
    }

    fn handle_method(&mut self, method: &str, path: &str, handler: impl Handler) -> Result<()> {
        self.handle(&path::join_pattern(method, path), handler)
    }

    pub fn get(&mut self, path: &str, handler: impl Handler) -> Result<()> {
        self.handle_method("GET", path, handler)
    }

    pub fn post(&mut self, path: &str, handler: impl Handler) -> Result<()> {
        self.handle_method("POST", path, handler)
    }

    pub fn put(&mut self, path: &str, handler: impl Handler) -> Result<()> {
        self.handle_method("PUT", path, handler)
    }

    pub fn patch(&mut self, path: &str, handler: impl Handler) -> Result<()> {
        self.handle_method("PATCH", path, handler)
    }

    pub fn delete(&mut self, path: &str, handler: impl Handler) -> Result<()> {
        self.handle_method("DELETE", path, handler)
    }

    /// Route a request and run the handler (or the not-found handler).
    ///
    /// The request's context is replaced by the mux root context, extended
    /// with the captured [`Params`](segmux_router::Params) when the
    /// matched pattern bound at least one.
    pub async fn dispatch(&self, mut req: Request) -> Response {
        let found = self
            .router
            .lookup(&req.method, &req.path)
            .map(|m| (Arc::clone(m.value), m.params));

        let (handler, params) = match found {
            Ok(found) => found,
            Err(miss) => {
                tracing::debug!(reason = %miss, "route miss");
                req.context = self.context.clone();
                return self.not_found.call(req).await;
            }
        };

        req.context = if params.is_empty() {
            self.context.clone()
        } else {
            self.context.with_value(params)
        };

        match &self.interceptor {
            Some(interceptor) => interceptor(req, Next { handler }).await,
            None => handler.call(req).await,
        }
    }

    /// The underlying router
    pub fn router(&self) -> &Router<SharedHandler> {
        &self.router
    }

    /// Render the trie as indented JSON
    pub fn describe(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.router.tree())?)
    }
}

impl Default for ServeMux {
    fn default() -> Self {
        Self::new(MuxOptions::default())
    }
}

impl fmt::Debug for ServeMux {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServeMux")
            .field("methods", &self.router.methods())
            .field("routes", &self.router.len())
            .field("precedence", &self.router.precedence())
            .field("interceptor", &self.interceptor.is_some())
            .finish_non_exhaustive()
    }
}
