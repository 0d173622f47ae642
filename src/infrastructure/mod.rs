//! Adapters for external collaborators: stores, the payment provider and
//! the confirmation-email service.

pub mod email;
pub mod in_memory;
pub mod paypal;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
