//! Shared fixtures for integration tests.

use std::net::SocketAddr;

use async_trait::async_trait;
use axum::extract::Request;
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Response};
use route_rest::config::ServerConfig;
use route_rest::{get_router, HttpServer, Middleware, Next, RestHandler, Route};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Value injected by [`contextual`] middleware.
#[derive(Clone, Copy)]
pub struct Contextual(pub bool);

/// Answers every verb with `<VERB><contextual>` and an `x-verb` header.
pub struct EmptyHandler;

fn reply(verb: &'static str, req: &Request) -> Response {
    let cv = req
        .extensions()
        .get::<Contextual>()
        .map(|c| c.0.to_string())
        .unwrap_or_else(|| "<nil>".to_string());
    let mut res = format!("{verb}{cv}").into_response();
    res.headers_mut()
        .insert("x-verb", HeaderValue::from_static(verb));
    res
}

#[async_trait]
impl RestHandler for EmptyHandler {
    async fn handle_get(&self, req: Request) -> Response {
        reply("GET", &req)
    }
    async fn handle_get_list(&self, req: Request) -> Response {
        reply("GET LIST", &req)
    }
    async fn handle_post(&self, req: Request) -> Response {
        reply("POST", &req)
    }
    async fn handle_put(&self, req: Request) -> Response {
        reply("PUT", &req)
    }
    async fn handle_patch(&self, req: Request) -> Response {
        reply("PATCH", &req)
    }
    async fn handle_delete(&self, req: Request) -> Response {
        reply("DELETE", &req)
    }
    async fn handle_copy(&self, req: Request) -> Response {
        reply("COPY", &req)
    }
    async fn handle_head(&self, req: Request) -> Response {
        reply("HEAD", &req)
    }
    async fn handle_options(&self, req: Request) -> Response {
        reply("OPTIONS", &req)
    }
}

/// Middleware that marks the request as `Contextual(true)`.
pub fn contextual() -> Middleware {
    Middleware::from_fn(|mut req: Request, next: Next| async move {
        req.extensions_mut().insert(Contextual(true));
        next.run(req).await
    })
}

/// A running server; dropping it stops the server.
pub struct TestServer {
    pub addr: SocketAddr,
    pub prefix: String,
    _shutdown: oneshot::Sender<()>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        let prefix = if self.prefix == "/" { "" } else { self.prefix.as_str() };
        format!("http://{}{}{}", self.addr, prefix, path)
    }
}

/// Bind `routes` and serve them on an ephemeral port under `prefix`.
pub async fn start_server(routes: Vec<Route>, prefix: &str) -> TestServer {
    let mux = get_router(&routes, &[""]).unwrap();

    let mut config = ServerConfig::default();
    config.api.prefix = prefix.to_string();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel::<()>();

    let server = HttpServer::new(config, mux);
    tokio::spawn(async move {
        let _ = server
            .run_until(listener, async {
                let _ = rx.await;
            })
            .await;
    });

    TestServer {
        addr,
        prefix: prefix.to_string(),
        _shutdown: tx,
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
