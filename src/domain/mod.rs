//! Domain types and the trait seams the application layer depends on.

pub mod order;
pub mod payment;
pub mod ports;
pub mod user;
