//! Read-Through Module
//!
//! Cache-aside coordination between the in-memory cache and the backing store.

mod coordinator;

pub use coordinator::Proxy;
