//! Inbound adapters translating external requests into domain service calls.
//!
//! HTTP is the only transport; framework details stay inside [`http`].

pub mod http;
