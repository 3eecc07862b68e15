//! Native HTTP server implementation
//!
//! Serves a frozen [`ServeMux`] with hyper:
//! - Multi-threaded tokio runtime, one task per connection
//! - HTTP/1.1 with keep-alive
//! - SO_REUSEADDR and TCP_NODELAY on the listening socket

use crate::{Error, Request, Response, Result, ServeMux};
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use socket2::{Domain, Protocol, Socket, Type};
use std::convert::Infallible;
use std::future::Future;
use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub hostname: String,
    pub port: u16,
    /// Runtime worker threads used by [`run`]
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            hostname: "0.0.0.0".to_string(),
            port: 3000,
            workers: num_cpus::get(),
        }
    }
}

impl ServerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = hostname.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Resolve the listening address
    pub fn addr(&self) -> Result<SocketAddr> {
        (self.hostname.as_str(), self.port)
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| {
                Error::Io(std::io::Error::new(
                    std::io::ErrorKind::AddrNotAvailable,
                    format!("cannot resolve {}:{}", self.hostname, self.port),
                ))
            })
    }
}

/// Create a TCP socket with optimizations
pub fn create_socket(addr: &SocketAddr) -> std::io::Result<Socket> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_address(true)?;
    socket.set_nodelay(true)?;
    // tokio requires a non-blocking fd
    socket.set_nonblocking(true)?;
    socket.bind(&(*addr).into())?;
    socket.listen(1024)?;
    Ok(socket)
}

/// Bind a tokio listener on `addr`
pub fn bind(addr: &SocketAddr) -> Result<TcpListener> {
    let socket = create_socket(addr)?;
    Ok(TcpListener::from_std(socket.into())?)
}

/// Accept connections until `shutdown` resolves.
///
/// Connections already accepted keep running on their own tasks.
pub async fn serve<S>(listener: TcpListener, mux: Arc<ServeMux>, shutdown: S) -> Result<()>
where
    S: Future<Output = ()>,
{
    let local = listener.local_addr()?;
    tracing::info!(addr = %local, "listening");
    tokio::pin!(shutdown);

    loop {
        let (stream, peer) = tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok(conn) => conn,
                Err(e) => {
                    tracing::warn!(error = %e, "accept failed");
                    continue;
                }
            },
            _ = &mut shutdown => break,
        };

        let mux = Arc::clone(&mux);
        tokio::spawn(async move {
            let io = TokioIo::new(stream);
            let service = service_fn(move |req| {
                let mux = Arc::clone(&mux);
                async move { handle_request(&mux, req).await }
            });

            if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                if !e.is_incomplete_message() {
                    tracing::warn!(%peer, error = %e, "connection error");
                }
            }
        });
    }

    tracing::info!(addr = %local, "stopped accepting connections");
    Ok(())
}

/// Build a runtime from `config` and serve `mux` until Ctrl+C
pub fn run(config: ServerConfig, mux: ServeMux) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.workers)
        .enable_all()
        .build()?;

    let addr = config.addr()?;
    runtime.block_on(async move {
        let listener = bind(&addr)?;
        serve(listener, Arc::new(mux), async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!(error = %e, "failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("shutdown signal received");
        })
        .await
    })
}

async fn handle_request(
    mux: &ServeMux,
    req: hyper::Request<Incoming>,
) -> std::result::Result<hyper::Response<Full<Bytes>>, Infallible> {
    let res = match from_hyper_request(req).await {
        Ok(request) => mux.dispatch(request).await,
        Err(e) => {
            tracing::debug!(error = %e, "failed to read request body");
            Response::new(http::StatusCode::BAD_REQUEST)
        }
    };

    Ok(to_hyper_response(res).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "invalid response head");
        let mut fallback = hyper::Response::new(Full::new(Bytes::new()));
        *fallback.status_mut() = http::StatusCode::INTERNAL_SERVER_ERROR;
        fallback
    }))
}

/// Convert hyper request to our Request type, collecting the body
pub async fn from_hyper_request(req: hyper::Request<Incoming>) -> Result<Request> {
    let (parts, body) = req.into_parts();
    let body = body.collect().await?.to_bytes();

    let mut request = Request::new(parts.method.as_str(), parts.uri.path());
    request.query = parts.uri.query().map(str::to_string);
    request.body = body;
    request.headers.extend(header_pairs(&parts.headers));

    Ok(request)
}

/// Header values that are not valid UTF-8 are decoded lossily
fn header_pairs(headers: &http::HeaderMap) -> impl Iterator<Item = (String, String)> + '_ {
    headers.iter().map(|(name, value)| {
        let value = match value.to_str() {
            Ok(v) => v.to_string(),
            Err(_) => {
                tracing::debug!(header = %name, "non-utf8 header value decoded lossily");
                String::from_utf8_lossy(value.as_bytes()).into_owned()
            }
        };
        (name.to_string(), value)
    })
}

/// Convert our Response to hyper Response
pub fn to_hyper_response(res: Response) -> Result<hyper::Response<Full<Bytes>>> {
    let mut builder = hyper::Response::builder().status(res.status);
    for (name, value) in &res.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    Ok(builder.body(Full::new(res.body))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = ServerConfig::new().hostname("127.0.0.1").port(8080).workers(0);
        assert_eq!(config.hostname, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.workers, 1);
        assert!(ServerConfig::default().workers >= 1);
    }

    #[test]
    fn test_to_hyper_response() {
        let res = Response::text("hello");
        let hyper_res = to_hyper_response(res).unwrap();
        assert_eq!(hyper_res.status(), http::StatusCode::OK);
        assert_eq!(
            hyper_res.headers()["content-type"],
            "text/plain; charset=utf-8"
        );
    }

    #[test]
    fn test_to_hyper_response_rejects_bad_header() {
        let mut res = Response::ok();
        res.headers.push(("bad header".to_string(), "x".to_string()));
        assert!(matches!(to_hyper_response(res), Err(Error::Http(_))));
    }

    #[test]
    fn test_header_pairs_keep_non_utf8_values() {
        let mut headers = http::HeaderMap::new();
        headers.insert("x-plain", http::HeaderValue::from_static("abc"));
        headers.insert("x-latin1", http::HeaderValue::from_bytes(b"caf\xe9").unwrap());

        let pairs: Vec<_> = header_pairs(&headers).collect();
        assert_eq!(pairs.len(), 2);
        assert!(pairs.contains(&("x-plain".to_string(), "abc".to_string())));
        assert!(pairs.contains(&("x-latin1".to_string(), "caf\u{fffd}".to_string())));
    }

    #[test]
    fn test_addr_resolves_literal_ip() {
        let config = ServerConfig::new().hostname("127.0.0.1").port(0);
        let addr = config.addr().unwrap();
        assert!(addr.ip().is_loopback());
        assert_eq!(addr.port(), 0);
    }
}
