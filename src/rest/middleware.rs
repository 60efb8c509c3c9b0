//! Per-route middleware.
//!
//! A [`Middleware`] takes the handler a binding would run and returns a
//! wrapped one. [`Middleware::from_fn`] accepts an async function in the
//! same shape as `axum::middleware::from_fn`:
//!
//! ```ignore
//! async fn mark(mut req: Request, next: Next) -> Response {
//!     req.extensions_mut().insert(Marked(true));
//!     next.run(req).await
//! }
//!
//! Route::new("baz", "{baz_id:[0-9]}", handler, vec![])
//!     .middleware(Middleware::from_fn(mark));
//! ```

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use axum::extract::Request;
use axum::response::Response;

use crate::routing::{BoxResponseFuture, HandlerFn};

/// Wraps a plain handler with before/after behaviour.
#[derive(Clone)]
pub struct Middleware {
    wrap: Arc<dyn Fn(HandlerFn) -> HandlerFn + Send + Sync>,
}

impl Middleware {
    /// Middleware from a raw wrapping function.
    pub fn new<F>(wrap: F) -> Self
    where
        F: Fn(HandlerFn) -> HandlerFn + Send + Sync + 'static,
    {
        Self {
            wrap: Arc::new(wrap),
        }
    }

    /// Passes requests straight through.
    pub fn noop() -> Self {
        Self::new(|next| next)
    }

    /// Middleware from an async function taking the request and a [`Next`].
    pub fn from_fn<F, Fut>(f: F) -> Self
    where
        F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        let f = Arc::new(f);
        Self::new(move |inner: HandlerFn| -> HandlerFn {
            let f = Arc::clone(&f);
            Arc::new(move |req: Request| -> BoxResponseFuture {
                let next = Next {
                    inner: Arc::clone(&inner),
                };
                Box::pin(f(req, next))
            })
        })
    }

    /// Nest `inner` inside `self`; `self` sees the request first.
    pub fn and_then(self, inner: Middleware) -> Self {
        Self::new(move |handler| self.wrap(inner.wrap(handler)))
    }

    pub fn wrap(&self, handler: HandlerFn) -> HandlerFn {
        (self.wrap)(handler)
    }
}

impl Default for Middleware {
    fn default() -> Self {
        Self::noop()
    }
}

impl fmt::Debug for Middleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Middleware").finish_non_exhaustive()
    }
}

/// The rest of the chain, handed to a [`Middleware::from_fn`] function.
pub struct Next {
    inner: HandlerFn,
}

impl Next {
    pub async fn run(self, req: Request) -> Response {
        (self.inner)(req).await
    }
}
