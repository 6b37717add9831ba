//! Telegram integration - the order-notification pipeline and the remote
//! command interpreter.
//!
//! Outbound traffic goes through [`notifier::Notifier`], which owns the
//! rate limiter and talks to the Bot API over HTTP. Inbound traffic
//! arrives as [`api::Update`] payloads on the webhook endpoint and is
//! routed through [`command`] parsing and [`dispatch`] execution.

/// Bot API wire types
pub mod api;
/// Typed operator command grammar and parser
pub mod command;
/// Command execution against the catalog
pub mod dispatch;
/// Order message formatting
pub mod format;
/// Outbound message sending
pub mod notifier;
/// Sliding-window send quota
pub mod rate_limit;
