//! Route nodes: one REST resource and its sub-resources.

use std::fmt;
use std::sync::Arc;

use crate::rest::handler::RestHandler;
use crate::rest::middleware::Middleware;

/// A resource in the route tree.
///
/// Built once before the server starts; the binder only reads it.
#[derive(Clone)]
pub struct Route {
    name: String,
    id_pattern: String,
    handler: Arc<dyn RestHandler>,
    children: Vec<Route>,
    middleware: Option<Middleware>,
}

impl Route {
    /// Create a resource named `name` whose members are matched by
    /// `id_pattern` (e.g. `{foo_id:[0-9]+}`).
    pub fn new<H: RestHandler>(
        name: impl Into<String>,
        id_pattern: impl Into<String>,
        handler: H,
        children: Vec<Route>,
    ) -> Self {
        Self::shared(name, id_pattern, Arc::new(handler), children)
    }

    /// Like [`Route::new`] but reuses an existing handler instance.
    pub fn shared(
        name: impl Into<String>,
        id_pattern: impl Into<String>,
        handler: Arc<dyn RestHandler>,
        children: Vec<Route>,
    ) -> Self {
        Self {
            name: name.into(),
            id_pattern: id_pattern.into(),
            handler,
            children,
            middleware: None,
        }
    }

    /// Wrap this resource's bindings (not its children's) in `mw`.
    pub fn middleware(mut self, mw: Middleware) -> Self {
        self.middleware = Some(mw);
        self
    }

    /// Append a sub-resource.
    pub fn child(mut self, route: Route) -> Self {
        self.children.push(route);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id_pattern(&self) -> &str {
        &self.id_pattern
    }

    pub fn handler(&self) -> &Arc<dyn RestHandler> {
        &self.handler
    }

    pub fn children(&self) -> &[Route] {
        &self.children
    }

    /// The configured middleware, or a pass-through.
    pub fn effective_middleware(&self) -> Middleware {
        self.middleware.clone().unwrap_or_default()
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("name", &self.name)
            .field("id_pattern", &self.id_pattern)
            .field("children", &self.children)
            .field("middleware", &self.middleware.is_some())
            .finish()
    }
}
