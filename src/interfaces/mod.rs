//! Inbound interfaces. The only one is the HTTP API.

pub mod http;
