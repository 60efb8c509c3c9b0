//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! rest::binder → "Binding route" (debug, one per binding)
//! routing::router → "No route matched" (debug)
//! http::server → lifecycle events (info), TraceLayer spans per request
//!     → logging.rs subscriber (stdout, pretty or JSON)
//! ```

pub mod logging;
