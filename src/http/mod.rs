//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum, TraceLayer, TimeoutLayer)
//!     → nest_service(api prefix) strips the prefix
//!     → routing::MuxService (first-match dispatch)
//!     → REST handler
//! ```

pub mod server;

pub use server::HttpServer;
