//! Application layer orchestrating the order lifecycle.
//!
//! The [`checkout::CheckoutEngine`] drives the end-to-end transition from
//! "items selected" to "order recorded as paid", delegating payment capture,
//! persistence and notification to the ports it owns.

pub mod checkout;
