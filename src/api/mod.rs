//! API Module
//!
//! HTTP handler and routing for the proxy.
//!
//! # Endpoints
//! - `GET /<key>` - Retrieve a value by key

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
