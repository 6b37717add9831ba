//! Shared test utilities.
//!
//! Common helpers for setting up in-memory test databases, building
//! fixture models and observing outbound notifications without a
//! network.

#![allow(clippy::unwrap_used)]

use crate::config::AppConfig;
use crate::config::settings::{RateLimitSettings, SeedData};
use crate::core::checkout::{CheckoutForm, ContactMethod, DeliverySelection};
use crate::core::delivery::DeliveryPricing;
use crate::entities::{OrderModel, ProductModel, admin};
use crate::errors::{Error, Result};
use crate::server::{AppState, router};
use crate::telegram::notifier::Notify;
use async_trait::async_trait;
use axum::Router;
use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use std::sync::{Arc, Mutex, PoisonError};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// An `AppConfig` with dummy credentials and default tunables.
#[must_use]
pub fn test_app_config() -> AppConfig {
    AppConfig {
        bind_addr: "127.0.0.1:0".to_string(),
        database_url: "sqlite::memory:".to_string(),
        bot_token: "test-token".to_string(),
        chat_id: 1,
        public_base_url: None,
        delivery: DeliveryPricing::default(),
        rate_limit: RateLimitSettings::default(),
        seed: SeedData::default(),
    }
}

/// Inserts an allow-list entry directly.
pub async fn seed_admin(db: &DatabaseConnection, telegram_id: i64, is_active: bool) -> Result<()> {
    admin::ActiveModel {
        telegram_id: Set(telegram_id),
        display_name: Set(None),
        is_active: Set(is_active),
        created_at: Set(fixed_time()),
    }
    .insert(db)
    .await?;
    Ok(())
}

fn fixed_time() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 8, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

/// A product model fixture that never touched the database.
#[must_use]
pub fn product_model(id: i64, name: &str, price: f64, weight_kg: Option<f64>) -> ProductModel {
    ProductModel {
        id,
        name: name.to_string(),
        description: String::new(),
        composition: String::new(),
        price,
        image_url: None,
        category_id: None,
        weight_kg,
        is_custom_order: false,
        is_deleted: false,
        created_at: fixed_time(),
        updated_at: fixed_time(),
    }
}

/// An order model fixture with a phone contact and fixed timestamps.
#[must_use]
pub fn order_model(id: i64, delivery_method: &str, delivery_cost: f64) -> OrderModel {
    OrderModel {
        id,
        customer_name: "Anna".to_string(),
        contact_method: "phone".to_string(),
        phone: Some("+358 40 123 4567".to_string()),
        telegram: None,
        whatsapp: None,
        instagram: None,
        comments: None,
        delivery_method: delivery_method.to_string(),
        delivery_address: None,
        delivery_distance_m: None,
        delivery_cost,
        status: "pending".to_string(),
        created_at: fixed_time(),
        updated_at: fixed_time(),
    }
}

/// A valid pickup checkout form.
#[must_use]
pub fn pickup_form() -> CheckoutForm {
    CheckoutForm {
        customer_name: "Anna".to_string(),
        contact_method: ContactMethod::Phone,
        contact_value: "+358 40 123 4567".to_string(),
        comments: None,
        delivery: DeliverySelection::Pickup,
    }
}

/// What a [`RecordingNotifier`] returns after recording a send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// Pretend the platform accepted the message
    Succeed,
    /// Pretend the rate limiter refused the slot
    RateLimited,
    /// Pretend the platform rejected the message
    Transport,
}

/// A [`Notify`] implementation that records every attempted send.
pub struct RecordingNotifier {
    sent: Mutex<Vec<String>>,
    outcome: NotifyOutcome,
}

impl RecordingNotifier {
    /// A notifier whose sends all succeed.
    #[must_use]
    pub fn new() -> Arc<Self> {
        Self::with_outcome(NotifyOutcome::Succeed)
    }

    /// A notifier whose sends all finish with `outcome`.
    #[must_use]
    pub fn with_outcome(outcome: NotifyOutcome) -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            outcome,
        })
    }

    /// Every message passed to [`Notify::send`] so far, in order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Notify for RecordingNotifier {
    async fn send(&self, text: &str) -> Result<()> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(text.to_string());

        match self.outcome {
            NotifyOutcome::Succeed => Ok(()),
            NotifyOutcome::RateLimited => Err(Error::RateLimited),
            NotifyOutcome::Transport => Err(Error::Telegram {
                description: "stubbed send failure".to_string(),
            }),
        }
    }
}

/// Builds the application router around a recording notifier and the
/// test configuration. Returns the notifier for assertions.
#[must_use]
pub fn test_router(db: impl Into<Arc<DatabaseConnection>>) -> (Router, Arc<RecordingNotifier>) {
    let notifier = RecordingNotifier::new();
    let state = AppState {
        db: db.into(),
        notifier: notifier.clone(),
        config: Arc::new(test_app_config()),
    };
    (router(state), notifier)
}
