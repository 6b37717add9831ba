//! Unified error types and result handling.
//!
//! All fallible operations in the crate return [`Result`]. I/O-adjacent
//! variants wrap their sources via `#[from]`; domain variants carry just
//! enough context to produce a short, user-facing message at the boundary.

use thiserror::Error;

/// The crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration is missing or malformed.
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong while loading configuration
        message: String,
    },

    /// A checkout or command input failed validation.
    #[error("{message}")]
    Validation {
        /// User-facing description of the violated rule
        message: String,
    },

    /// Checkout was attempted with an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// A price or amount was negative or not a finite number.
    #[error("Invalid price: {value}")]
    InvalidPrice {
        /// The offending value
        value: f64,
    },

    /// The requested delivery address lies outside the delivery zone.
    #[error("Address is outside the delivery zone ({distance_m:.0} m)")]
    OutsideDeliveryZone {
        /// Measured distance from the pickup origin
        distance_m: f64,
    },

    /// No active category with the given name.
    #[error("Category '{name}' not found")]
    CategoryNotFound {
        /// The name that failed to resolve
        name: String,
    },

    /// No tag with the given name.
    #[error("Tag '{name}' not found")]
    TagNotFound {
        /// The name that failed to resolve
        name: String,
    },

    /// No active product with the given name or id.
    #[error("Product '{name}' not found")]
    ProductNotFound {
        /// The name or id that failed to resolve
        name: String,
    },

    /// The outbound notification quota is exhausted.
    #[error("Notification rate limit exceeded, try again later")]
    RateLimited,

    /// The messaging platform rejected a send.
    #[error("Telegram API error: {description}")]
    Telegram {
        /// Description reported by the platform, or a transport summary
        description: String,
    },

    /// Record store failure.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Outbound HTTP transport failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Filesystem failure (config files).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Required environment variable missing or unreadable.
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

/// Convenience `Result` type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
