//! Named route table and dispatch.
//!
//! # Responsibilities
//! - Store compiled bindings (method + path template + name + handler)
//! - Reverse lookup of a binding's template by name
//! - Dispatch a request to the first matching binding
//! - Expose the table as a `tower::Service` for axum
//!
//! # Design Decisions
//! - Immutable once shared (thread-safe without locks)
//! - O(n) scan in registration order, first match wins
//! - No match of method + path is always 404, never 405
//! - A repeated name silently points at the most recent binding

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::extract::Request;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use futures_util::future::BoxFuture;
use tower::Service;

use crate::routing::matcher::PathTemplate;
use crate::routing::MuxError;

/// Future returned by a bound handler.
pub type BoxResponseFuture = BoxFuture<'static, Response>;

/// A plain request handler as stored in the mux.
pub type HandlerFn = Arc<dyn Fn(Request) -> BoxResponseFuture + Send + Sync>;

/// Variables captured from the request path, in template order.
///
/// Inserted into the request extensions before the bound handler runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(Vec<(String, String)>);

impl PathParams {
    /// Value of the first variable with the given name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn push(&mut self, name: String, value: &str) {
        self.0.push((name, value.to_string()));
    }
}

struct Binding {
    method: Method,
    template: PathTemplate,
    name: String,
    handler: HandlerFn,
}

/// First-match router with named bindings.
#[derive(Default)]
pub struct Mux {
    bindings: Vec<Binding>,
    names: HashMap<String, usize>,
}

impl Mux {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for an exact method and path template.
    ///
    /// The template is compiled here; a malformed template is returned as
    /// an error and nothing is registered.
    pub fn handle(
        &mut self,
        method: Method,
        template: &str,
        name: impl Into<String>,
        handler: HandlerFn,
    ) -> Result<&mut Self, MuxError> {
        let template = PathTemplate::parse(template)?;
        let name = name.into();

        if self.names.insert(name.clone(), self.bindings.len()).is_some() {
            tracing::debug!(name = %name, "Route name re-registered, previous binding shadowed");
        }
        self.bindings.push(Binding {
            method,
            template,
            name,
            handler,
        });
        Ok(self)
    }

    /// Path template of the binding registered under `name`.
    pub fn url_template(&self, name: &str) -> Option<&str> {
        self.names
            .get(name)
            .map(|&index| self.bindings[index].template.as_str())
    }

    /// Build a concrete path for the binding registered under `name`.
    pub fn url_for(&self, name: &str, values: &[(&str, &str)]) -> Result<String, MuxError> {
        let index = self
            .names
            .get(name)
            .ok_or_else(|| MuxError::UnknownRoute(name.to_string()))?;
        self.bindings[*index].template.expand(values)
    }

    /// `(method, template, name)` of every binding in registration order.
    pub fn bindings(&self) -> impl Iterator<Item = (&Method, &str, &str)> {
        self.bindings
            .iter()
            .map(|b| (&b.method, b.template.as_str(), b.name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Dispatch a request to the first binding matching its method and path.
    pub async fn serve(&self, mut req: Request) -> Response {
        let path = req.uri().path().to_string();

        for binding in &self.bindings {
            if binding.method != *req.method() {
                continue;
            }
            if let Some(params) = binding.template.captures(&path) {
                tracing::trace!(route = %binding.name, path = %path, "Route matched");
                req.extensions_mut().insert(params);
                return (binding.handler)(req).await;
            }
        }

        tracing::debug!(method = %req.method(), path = %path, "No route matched");
        (StatusCode::NOT_FOUND, "404 page not found").into_response()
    }

    /// Freeze the table into a cloneable service.
    pub fn into_service(self) -> MuxService {
        MuxService {
            mux: Arc::new(self),
        }
    }
}

impl std::fmt::Debug for Mux {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.bindings().map(|(method, template, name)| {
                format!("{method} {template} ({name})")
            }))
            .finish()
    }
}

/// Shared, immutable mux usable with `axum::Router::nest_service`.
#[derive(Clone)]
pub struct MuxService {
    mux: Arc<Mux>,
}

impl MuxService {
    pub fn mux(&self) -> &Mux {
        &self.mux
    }
}

impl Service<Request> for MuxService {
    type Response = Response;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Response, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let mux = Arc::clone(&self.mux);
        Box::pin(async move { Ok(mux.serve(req).await) })
    }
}
