//! Verb handler contract.
//!
//! A resource handler answers up to nine verbs. Every operation has a
//! default that responds `501 Not Implemented`, so a handler only writes
//! the verbs it supports.

use std::fmt;
use std::sync::LazyLock;

use async_trait::async_trait;
use axum::extract::Request;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};

static COPY: LazyLock<Method> =
    LazyLock::new(|| Method::from_bytes(b"COPY").expect("COPY is a valid method token"));

/// The response every unimplemented verb produces.
pub fn not_implemented() -> Response {
    (StatusCode::NOT_IMPLEMENTED, "Not Implemented").into_response()
}

/// Per-verb operations of a REST resource.
///
/// Member operations receive requests on `/<name>/<id>`, collection
/// operations on `/<name>`. Path variables are available as
/// [`PathParams`](crate::routing::PathParams) in the request extensions.
#[async_trait]
pub trait RestHandler: Send + Sync + 'static {
    /// `GET` on a member path.
    async fn handle_get(&self, _req: Request) -> Response {
        not_implemented()
    }

    /// `GET` on a collection path.
    async fn handle_get_list(&self, _req: Request) -> Response {
        not_implemented()
    }

    /// `POST` on a collection path.
    async fn handle_post(&self, _req: Request) -> Response {
        not_implemented()
    }

    async fn handle_put(&self, _req: Request) -> Response {
        not_implemented()
    }

    async fn handle_patch(&self, _req: Request) -> Response {
        not_implemented()
    }

    async fn handle_delete(&self, _req: Request) -> Response {
        not_implemented()
    }

    async fn handle_copy(&self, _req: Request) -> Response {
        not_implemented()
    }

    async fn handle_head(&self, _req: Request) -> Response {
        not_implemented()
    }

    async fn handle_options(&self, _req: Request) -> Response {
        not_implemented()
    }
}

/// A handler with no verbs implemented.
///
/// Useful as a placeholder node or as a delegate for verbs a wrapping
/// handler does not want to answer itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRestHandler;

#[async_trait]
impl RestHandler for DefaultRestHandler {}

/// Which of a resource's two paths a verb is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// `/<name>`
    Collection,
    /// `/<name>/<id>`
    Member,
}

/// One row of the verb table: tag, HTTP method, path scope and operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    GetList,
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Copy,
    Head,
    Options,
}

impl Verb {
    /// All verbs in binding order.
    pub const ALL: [Verb; 9] = [
        Verb::GetList,
        Verb::Get,
        Verb::Post,
        Verb::Put,
        Verb::Patch,
        Verb::Delete,
        Verb::Copy,
        Verb::Head,
        Verb::Options,
    ];

    /// Suffix used in binding names (`<resource>:<tag>`).
    pub fn tag(self) -> &'static str {
        match self {
            Verb::GetList => "cget",
            Verb::Get => "get",
            Verb::Post => "post",
            Verb::Put => "put",
            Verb::Patch => "patch",
            Verb::Delete => "delete",
            Verb::Copy => "copy",
            Verb::Head => "head",
            Verb::Options => "options",
        }
    }

    pub fn method(self) -> Method {
        match self {
            Verb::GetList | Verb::Get => Method::GET,
            Verb::Post => Method::POST,
            Verb::Put => Method::PUT,
            Verb::Patch => Method::PATCH,
            Verb::Delete => Method::DELETE,
            Verb::Copy => COPY.clone(),
            Verb::Head => Method::HEAD,
            Verb::Options => Method::OPTIONS,
        }
    }

    pub fn scope(self) -> Scope {
        match self {
            Verb::GetList | Verb::Post | Verb::Head | Verb::Options => Scope::Collection,
            Verb::Get | Verb::Put | Verb::Patch | Verb::Delete | Verb::Copy => Scope::Member,
        }
    }

    /// Invoke the handler operation this verb maps to.
    pub async fn dispatch(self, handler: &dyn RestHandler, req: Request) -> Response {
        match self {
            Verb::GetList => handler.handle_get_list(req).await,
            Verb::Get => handler.handle_get(req).await,
            Verb::Post => handler.handle_post(req).await,
            Verb::Put => handler.handle_put(req).await,
            Verb::Patch => handler.handle_patch(req).await,
            Verb::Delete => handler.handle_delete(req).await,
            Verb::Copy => handler.handle_copy(req).await,
            Verb::Head => handler.handle_head(req).await,
            Verb::Options => handler.handle_options(req).await,
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
