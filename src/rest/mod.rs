//! REST resource conventions on top of the mux.
//!
//! # Data Flow
//! ```text
//! Route tree (route.rs)
//!     → binder.rs (derive collection/member paths, name bindings)
//!     → middleware.rs (wrap each verb handler)
//!     → Mux::handle (one binding per verb)
//!
//! Request:
//!     Mux → middleware → handler.rs (verb operation)
//!                          └─ context.rs (init → verb, when adapted)
//! ```
//!
//! # Design Decisions
//! - Handlers are traits with 501 defaults; override only supported verbs
//! - Middleware and context-init are independent and both optional
//! - Route trees are plain values, never mutated by binding

pub mod binder;
pub mod context;
pub mod handler;
pub mod middleware;
pub mod route;

pub use binder::{apply_routes, get_router};
pub use context::{init_ctx, Context, CtxNext, InitCtx, RestCtxHandler};
pub use handler::{not_implemented, DefaultRestHandler, RestHandler, Scope, Verb};
pub use middleware::{Middleware, Next};
pub use route::Route;
