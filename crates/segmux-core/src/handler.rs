//! Request handler abstraction

use crate::request::Request;
use crate::response::Response;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed future returned by handlers
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

/// Anything that turns a request into a response
pub trait Handler: Send + Sync + 'static {
    fn call(&self, req: Request) -> BoxFuture<Response>;
}

/// Shared, type-erased handler as stored in the router
pub type SharedHandler = Arc<dyn Handler>;

impl<F, Fut> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture<Response> {
        Box::pin(self(req))
    }
}

/// Default fallback: `404 Not Found`, plain text
#[derive(Debug, Clone, Copy, Default)]
pub struct NotFound;

impl Handler for NotFound {
    fn call(&self, _req: Request) -> BoxFuture<Response> {
        Box::pin(async { Response::not_found() })
    }
}
