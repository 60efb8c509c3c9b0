//! Routing subsystem: the mux that REST bindings are registered on.
//!
//! # Data Flow
//! ```text
//! Bind time:
//!     handle(method, template, name, handler)
//!     → matcher.rs (compile template into anchored regex)
//!     → router.rs (append binding, index name)
//!
//! Request time:
//!     Request (method, path)
//!     → router.rs (scan bindings in order)
//!     → matcher.rs (capture path variables)
//!     → bound handler, or 404
//! ```
//!
//! # Design Decisions
//! - Templates compiled at bind time, immutable at runtime
//! - Deterministic: same input always matches same binding
//! - First match wins (registration order)

pub mod error;
pub mod matcher;
pub mod router;

pub use error::MuxError;
pub use matcher::PathTemplate;
pub use router::{BoxResponseFuture, HandlerFn, Mux, MuxService, PathParams};
