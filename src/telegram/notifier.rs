//! Outbound message sending.
//!
//! The [`Notifier`] relays text to one fixed operator chat through the
//! Bot API's `sendMessage` endpoint. Every send first takes a slot from
//! the process-wide rate limiter; a refused slot fails the call without
//! touching the network. Sends are never retried here, callers decide.

use crate::errors::{Error, Result};
use crate::telegram::api::{BotApiResponse, SendMessageRequest};
use crate::telegram::rate_limit::RateLimiter;
use async_trait::async_trait;
use std::sync::{Mutex, PoisonError};
use tracing::{info, warn};

/// Production endpoint of the Bot API.
pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// The outbound-notification seam. Checkout and the webhook handler talk
/// to this trait so tests can observe sends without a network.
#[async_trait]
pub trait Notify: Send + Sync {
    /// Sends `text` to the fixed operator chat.
    ///
    /// # Errors
    /// Returns [`Error::RateLimited`] when the send quota is exhausted
    /// and [`Error::Telegram`] when the platform refuses the message.
    async fn send(&self, text: &str) -> Result<()>;
}

/// Sends messages to one fixed chat via the Telegram Bot API.
pub struct Notifier {
    http: reqwest::Client,
    api_base: String,
    token: String,
    chat_id: i64,
    limiter: Mutex<RateLimiter>,
}

impl Notifier {
    /// Creates a notifier for the given bot token and destination chat,
    /// owning the process-wide rate limiter.
    #[must_use]
    pub fn new(token: impl Into<String>, chat_id: i64, limiter: RateLimiter) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: TELEGRAM_API_BASE.to_string(),
            token: token.into(),
            chat_id,
            limiter: Mutex::new(limiter),
        }
    }

    /// Overrides the API base URL. Used by tests to point the notifier
    /// at a local stub.
    #[must_use]
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{method}", self.api_base, self.token)
    }

    fn send_url(&self) -> String {
        self.method_url("sendMessage")
    }

    fn take_slot(&self) -> bool {
        self.limiter
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .allow()
    }

    /// Registers `<public_base_url>/telegram-webhook` as this bot's
    /// webhook. Administrative call, does not consume a rate-limit slot.
    ///
    /// # Errors
    /// Returns an error if the platform refuses the registration.
    pub async fn register_webhook(&self, public_base_url: &str) -> Result<()> {
        let url = format!(
            "{}/telegram-webhook",
            public_base_url.trim_end_matches('/')
        );

        let response = self
            .http
            .post(self.method_url("setWebhook"))
            .json(&serde_json::json!({ "url": url }))
            .send()
            .await?;
        let status = response.status();

        let body: BotApiResponse = match response.json().await {
            Ok(body) => body,
            Err(e) => BotApiResponse {
                ok: false,
                description: Some(format!("unreadable response (status {status}): {e}")),
            },
        };

        if !status.is_success() || !body.ok {
            let description = body
                .description
                .unwrap_or_else(|| format!("status {status}"));
            return Err(Error::Telegram { description });
        }

        info!("Webhook registered at {url}");
        Ok(())
    }
}

#[async_trait]
impl Notify for Notifier {
    async fn send(&self, text: &str) -> Result<()> {
        // The slot is consumed here, not at confirmed success
        if !self.take_slot() {
            return Err(Error::RateLimited);
        }

        let request = SendMessageRequest {
            chat_id: self.chat_id,
            text: text.to_string(),
            parse_mode: Some("HTML".to_string()),
        };

        let response = self.http.post(self.send_url()).json(&request).send().await?;
        let status = response.status();

        let body: BotApiResponse = match response.json().await {
            Ok(body) => body,
            Err(e) => BotApiResponse {
                ok: false,
                description: Some(format!("unreadable response (status {status}): {e}")),
            },
        };

        if !status.is_success() || !body.ok {
            let description = body
                .description
                .unwrap_or_else(|| format!("status {status}"));
            warn!("Telegram send failed: {description}");
            return Err(Error::Telegram { description });
        }

        Ok(())
    }
}
