//! Minimal server: two routes and an interceptor that logs timings.
//!
//! ```text
//! RUST_LOG=debug cargo run -p segmux-core --features demo
//! curl -i http://127.0.0.1:8080/me
//! ```

use segmux_core::{MuxOptions, Next, Request, Response, ServeMux, ServerConfig, StatusCode};
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> segmux_core::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let opts = MuxOptions::new().interceptor(|req: Request, next: Next| async move {
        let start = Instant::now();
        let path = req.path.clone();
        let res = next.run(req).await;
        tracing::info!(%path, status = res.status.as_u16(), elapsed = ?start.elapsed(), "request handled");
        res
    });

    let mut mux = ServeMux::new(opts);
    mux.handle("GET/me", |_req: Request| async {
        Response::json(r#"{"me": "some info"}"#)
    })?;
    mux.handle("GET/not-me", |_req: Request| async {
        Response::new(StatusCode::FORBIDDEN)
    })?;
    tracing::debug!(routes = %mux.describe()?, "route tree");

    let config = ServerConfig::new().hostname("127.0.0.1").port(8080);
    segmux_core::run(config, mux)
}
