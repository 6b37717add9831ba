//! Core business logic - framework-agnostic catalog, cart, delivery and
//! checkout operations.

/// Admin allow-list checks
pub mod admin;
/// Transient shopping cart model
pub mod cart;
/// Catalog mutation and query operations
pub mod catalog;
/// Order submission flow
pub mod checkout;
/// Delivery pricing and geofencing
pub mod delivery;
