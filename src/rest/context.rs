//! Context-init contract.
//!
//! A [`RestCtxHandler`] gets one `init` call per request before the verb
//! operation runs. `init` builds a [`Context`] and hands it to the verb
//! through a [`CtxNext`] continuation. [`InitCtx`] adapts such a handler
//! into a plain [`RestHandler`] so it can be placed on a route.

use async_trait::async_trait;
use axum::extract::Request;
use axum::http::Extensions;
use axum::response::Response;

use crate::rest::handler::{not_implemented, RestHandler, Verb};

/// Request-scoped value bag, keyed by type.
///
/// Owned by a single request's call chain.
#[derive(Debug, Clone, Default)]
pub struct Context {
    values: Extensions,
}

impl Context {
    /// An empty context.
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_value<T>(mut self, value: T) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        self.values.insert(value);
        self
    }

    /// Insert a value, returning the one it replaced.
    pub fn insert<T>(&mut self, value: T) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        self.values.insert(value)
    }

    pub fn get<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.values.get::<T>()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Continuation handed to [`RestCtxHandler::init`].
///
/// `run` consumes it, so the verb operation runs at most once per request.
pub struct CtxNext<'a> {
    handler: &'a dyn RestCtxHandler,
    verb: Verb,
}

impl<'a> CtxNext<'a> {
    pub fn new(handler: &'a dyn RestCtxHandler, verb: Verb) -> Self {
        Self { handler, verb }
    }

    /// The verb this continuation will invoke.
    pub fn verb(&self) -> Verb {
        self.verb
    }

    pub async fn run(self, req: Request, ctx: Context) -> Response {
        let handler = self.handler;
        match self.verb {
            Verb::GetList => handler.handle_get_list(req, ctx).await,
            Verb::Get => handler.handle_get(req, ctx).await,
            Verb::Post => handler.handle_post(req, ctx).await,
            Verb::Put => handler.handle_put(req, ctx).await,
            Verb::Patch => handler.handle_patch(req, ctx).await,
            Verb::Delete => handler.handle_delete(req, ctx).await,
            Verb::Copy => handler.handle_copy(req, ctx).await,
            Verb::Head => handler.handle_head(req, ctx).await,
            Verb::Options => handler.handle_options(req, ctx).await,
        }
    }
}

/// Verb handler whose operations receive a [`Context`] built by `init`.
#[async_trait]
pub trait RestCtxHandler: Send + Sync + 'static {
    /// Runs before every verb. Must call `next.run` exactly once.
    ///
    /// Overriding this populates the context for all verbs.
    async fn init(&self, req: Request, next: CtxNext<'_>) -> Response {
        next.run(req, Context::background()).await
    }

    async fn handle_get(&self, _req: Request, _ctx: Context) -> Response {
        not_implemented()
    }

    async fn handle_get_list(&self, _req: Request, _ctx: Context) -> Response {
        not_implemented()
    }

    async fn handle_post(&self, _req: Request, _ctx: Context) -> Response {
        not_implemented()
    }

    async fn handle_put(&self, _req: Request, _ctx: Context) -> Response {
        not_implemented()
    }

    async fn handle_patch(&self, _req: Request, _ctx: Context) -> Response {
        not_implemented()
    }

    async fn handle_delete(&self, _req: Request, _ctx: Context) -> Response {
        not_implemented()
    }

    async fn handle_copy(&self, _req: Request, _ctx: Context) -> Response {
        not_implemented()
    }

    async fn handle_head(&self, _req: Request, _ctx: Context) -> Response {
        not_implemented()
    }

    async fn handle_options(&self, _req: Request, _ctx: Context) -> Response {
        not_implemented()
    }
}

/// Converts a [`RestCtxHandler`] into a [`RestHandler`].
#[derive(Debug, Clone, Default)]
pub struct InitCtx<H> {
    inner: H,
}

/// Wrap `handler` so that `init` runs ahead of each verb.
pub fn init_ctx<H: RestCtxHandler>(handler: H) -> InitCtx<H> {
    InitCtx::new(handler)
}

impl<H: RestCtxHandler> InitCtx<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }

    async fn call(&self, verb: Verb, req: Request) -> Response {
        self.inner.init(req, CtxNext::new(&self.inner, verb)).await
    }
}

#[async_trait]
impl<H: RestCtxHandler> RestHandler for InitCtx<H> {
    async fn handle_get(&self, req: Request) -> Response {
        self.call(Verb::Get, req).await
    }

    async fn handle_get_list(&self, req: Request) -> Response {
        self.call(Verb::GetList, req).await
    }

    async fn handle_post(&self, req: Request) -> Response {
        self.call(Verb::Post, req).await
    }

    async fn handle_put(&self, req: Request) -> Response {
        self.call(Verb::Put, req).await
    }

    async fn handle_patch(&self, req: Request) -> Response {
        self.call(Verb::Patch, req).await
    }

    async fn handle_delete(&self, req: Request) -> Response {
        self.call(Verb::Delete, req).await
    }

    async fn handle_copy(&self, req: Request) -> Response {
        self.call(Verb::Copy, req).await
    }

    async fn handle_head(&self, req: Request) -> Response {
        self.call(Verb::Head, req).await
    }

    async fn handle_options(&self, req: Request) -> Response {
        self.call(Verb::Options, req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Clone)]
    struct Tenant(&'static str);

    #[derive(Default)]
    struct TenantHandler {
        inits: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl RestCtxHandler for TenantHandler {
        async fn init(&self, req: Request, next: CtxNext<'_>) -> Response {
            self.inits.fetch_add(1, Ordering::SeqCst);
            next.run(req, Context::background().with_value(Tenant("acme")))
                .await
        }

        async fn handle_get(&self, _req: Request, ctx: Context) -> Response {
            let tenant = ctx.get::<Tenant>().map(|t| t.0).unwrap_or("none");
            format!("GET {tenant}").into_response()
        }
    }

    struct Plain;

    #[async_trait]
    impl RestCtxHandler for Plain {
        async fn handle_get_list(&self, _req: Request, ctx: Context) -> Response {
            format!("empty={}", ctx.is_empty()).into_response()
        }
    }

    fn request() -> Request {
        axum::http::Request::builder()
            .uri("/foo/1")
            .body(Body::empty())
            .unwrap()
    }

    async fn body_string(res: Response) -> String {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_init_populates_context() {
        let handler = TenantHandler::default();
        let inits = Arc::clone(&handler.inits);
        let adapted = init_ctx(handler);

        let res = adapted.handle_get(request()).await;
        assert_eq!(body_string(res).await, "GET acme");
        assert_eq!(inits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_init_runs_for_unimplemented_verbs() {
        let handler = TenantHandler::default();
        let inits = Arc::clone(&handler.inits);
        let adapted = init_ctx(handler);

        for verb in Verb::ALL {
            let res = verb.dispatch(&adapted, request()).await;
            if verb != Verb::Get {
                assert_eq!(res.status(), StatusCode::NOT_IMPLEMENTED, "{verb}");
            }
        }
        assert_eq!(inits.load(Ordering::SeqCst), Verb::ALL.len());
    }

    #[tokio::test]
    async fn test_default_init_passes_background() {
        let adapted = init_ctx(Plain);
        let res = adapted.handle_get_list(request()).await;
        assert_eq!(body_string(res).await, "empty=true");
    }

    #[test]
    fn test_context_values() {
        let mut ctx = Context::background().with_value(7u32);
        assert_eq!(ctx.get::<u32>(), Some(&7));
        assert_eq!(ctx.insert(8u32), Some(7));
        assert!(ctx.get::<i64>().is_none());
    }
}
