//! segmux-core: request dispatch on top of segmux-router
//!
//! Registers handlers under `METHOD/path` patterns, resolves each request
//! to the most specific one and hands captured path parameters to the
//! handler through the request context.
//!
//! ## Features
//! - `native` - hyper/tokio HTTP/1.1 server for a [`ServeMux`]
//! - `demo` - the `segmux-demo` binary (adds `tracing-subscriber`)
//!
//! ## Example
//! ```
//! use segmux_core::{params, MuxOptions, Request, Response, ServeMux};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut mux = ServeMux::new(MuxOptions::default());
//! mux.handle("GET/user/:id", |req: Request| async move {
//!     let id = params(&req).path("id").unwrap_or_default().to_string();
//!     Response::json(format!(r#"{{"id": {id}}}"#))
//! }).unwrap();
//!
//! let res = mux.dispatch(Request::new("GET", "/user/9000")).await;
//! assert_eq!(res.body_str(), Some(r#"{"id": 9000}"#));
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod context;
pub mod error;
pub mod handler;
pub mod mux;
pub mod params;
pub mod request;
pub mod response;

#[cfg(feature = "native")]
pub mod server;

// Re-exports
pub use context::{CancelHandle, Context};
pub use error::{Error, Result};
pub use handler::{BoxFuture, Handler, NotFound, SharedHandler};
pub use mux::{Interceptor, MuxOptions, Next, ServeMux};
pub use params::{params, Values};
pub use request::{Request, RequestBuilder};
pub use response::{Response, ResponseBuilder};

pub use http::StatusCode;
pub use segmux_router::{Params, Precedence};

#[cfg(feature = "native")]
pub use server::{bind, create_socket, from_hyper_request, run, serve, to_hyper_response, ServerConfig};
