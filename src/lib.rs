//! REST resource routing conventions.
//!
//! Describe resources as a tree of [`Route`]s and bind them in one call:
//!
//! ```text
//! foo{foo_id}
//!  ├─ bar{bar_id}        GET /foo                  foo:cget
//!  └─ baz{baz_id}        GET /foo/{foo_id}          foo:get
//!                        GET /foo/{foo_id}/bar      bar:cget
//!                        GET /foo/{foo_id}/baz/{baz_id}  baz:get
//!                        ...
//! ```
//!
//! Each node gets nine bindings (GET list/item, POST, PUT, PATCH, DELETE,
//! COPY, HEAD, OPTIONS) dispatched to its [`RestHandler`].

pub mod config;
pub mod http;
pub mod observability;
pub mod rest;
pub mod routing;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use rest::{
    apply_routes, get_router, init_ctx, Context, CtxNext, DefaultRestHandler, Middleware, Next,
    RestCtxHandler, RestHandler, Route,
};
pub use routing::{Mux, MuxError, PathParams};
