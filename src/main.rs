//! Example REST server.
//!
//! Binds the following tree under the configured API prefix (`/api`):
//!
//! ```text
//! /foo
//! /foo/{foo_id}
//! /foo/{foo_id}/bar
//! /foo/{foo_id}/bar/{bar_id}
//! /foo/{foo_id}/baz
//! /foo/{foo_id}/baz/{baz_id}
//! ```

use std::path::PathBuf;
use std::time::Instant;

use async_trait::async_trait;
use axum::extract::Request;
use axum::response::{IntoResponse, Response};
use clap::Parser;
use tokio::net::TcpListener;

use route_rest::config::load_or_default;
use route_rest::observability::logging;
use route_rest::{
    apply_routes, init_ctx, Context, CtxNext, HttpServer, Middleware, Mux, Next, PathParams,
    RestCtxHandler, Route,
};

#[derive(Parser)]
#[command(name = "route-rest")]
#[command(about = "Serve an example nested REST resource tree", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,
}

/// Start time of the request, set by `init`.
#[derive(Clone, Copy)]
struct Started(Instant);

/// Implements a few verbs and prints the path variables. The same type
/// backs every node; the prefix tells the instances apart.
struct SimpleHandler {
    response_prefix: &'static str,
}

impl SimpleHandler {
    fn reply(&self, verb: &str, req: &Request, ctx: &Context) -> Response {
        let vars: Vec<String> = req
            .extensions()
            .get::<PathParams>()
            .map(|params| params.iter().map(|(k, v)| format!("{k}={v}")).collect())
            .unwrap_or_default();
        let elapsed = ctx
            .get::<Started>()
            .map(|s| s.0.elapsed())
            .unwrap_or_default();
        format!(
            "{}:{}:[{}] ({:?})",
            self.response_prefix,
            verb,
            vars.join(" "),
            elapsed
        )
        .into_response()
    }
}

#[async_trait]
impl RestCtxHandler for SimpleHandler {
    async fn init(&self, req: Request, next: CtxNext<'_>) -> Response {
        next.run(req, Context::background().with_value(Started(Instant::now())))
            .await
    }

    /// GET /api/foo/1
    async fn handle_get(&self, req: Request, ctx: Context) -> Response {
        self.reply("GET", &req, &ctx)
    }

    /// GET /api/foo
    async fn handle_get_list(&self, req: Request, ctx: Context) -> Response {
        self.reply("GET LIST", &req, &ctx)
    }

    /// POST /api/foo
    async fn handle_post(&self, req: Request, ctx: Context) -> Response {
        self.reply("POST", &req, &ctx)
    }
}

async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let res = next.run(req).await;
    tracing::info!(method = %method, path = %path, status = %res.status(), "Handled foo request");
    res
}

fn resources() -> Vec<Route> {
    vec![Route::new(
        "foo",
        "{foo_id:[0-9]}",
        init_ctx(SimpleHandler { response_prefix: "foo" }),
        vec![
            Route::new(
                "bar",
                "{bar_id:[0-9]}",
                init_ctx(SimpleHandler { response_prefix: "bar" }),
                vec![],
            ),
            Route::new(
                "baz",
                "{baz_id:[0-9]}",
                init_ctx(SimpleHandler { response_prefix: "baz" }),
                vec![],
            ),
        ],
    )
    .middleware(Middleware::from_fn(log_request))]
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_or_default(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init(&config.observability)?;
    tracing::info!("route-rest v0.1.0 starting");

    let mut mux = Mux::new();
    apply_routes(&mut mux, &resources(), &[""])?;
    tracing::info!(bindings = mux.len(), "Routes bound");

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    HttpServer::new(config, mux).run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
