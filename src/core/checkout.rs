//! Order submission flow.
//!
//! The flow is strictly sequential: validate, price the delivery,
//! persist the order, persist its lines, notify the operator, clear the
//! cart. Validation happens before any store call. A failed store write
//! aborts the whole submission and leaves the cart untouched so the
//! customer can resubmit; a failed notification is logged and swallowed,
//! the order stands either way.

use crate::core::cart::Cart;
use crate::core::delivery::DeliveryPricing;
use crate::entities::{order, order_item};
use crate::errors::{Error, Result};
use crate::telegram::format::{self, OrderLine};
use crate::telegram::notifier::Notify;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// How the customer wants to be reached about the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactMethod {
    /// Reach by phone call or SMS
    Phone,
    /// Reach via a Telegram handle
    Telegram,
    /// Reach via a WhatsApp number
    Whatsapp,
    /// Reach via an Instagram handle
    Instagram,
}

impl ContactMethod {
    /// Column discriminator stored on the order.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Phone => "phone",
            Self::Telegram => "telegram",
            Self::Whatsapp => "whatsapp",
            Self::Instagram => "instagram",
        }
    }

    /// Human-readable field name for validation messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Phone => "phone number",
            Self::Telegram => "Telegram handle",
            Self::Whatsapp => "WhatsApp number",
            Self::Instagram => "Instagram handle",
        }
    }
}

/// Lifecycle state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    /// Submitted, not yet picked up by the operator
    Pending,
    /// Being prepared
    Processing,
    /// Handed over to the customer
    Completed,
    /// Called off
    Cancelled,
}

impl OrderStatus {
    /// String form stored on the order row.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

/// The customer's delivery choice.
#[derive(Debug, Clone, PartialEq)]
pub enum DeliverySelection {
    /// Collect from the bakery, free of charge
    Pickup,
    /// Deliver to an address at a measured distance from the origin
    Delivery {
        /// Confirmed delivery address
        address: String,
        /// Distance from the pickup origin in metres, as measured by the
        /// geocoding collaborator
        distance_m: f64,
    },
}

/// Everything the customer enters at checkout, minus the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutForm {
    /// Customer's name
    pub customer_name: String,
    /// Chosen contact channel
    pub contact_method: ContactMethod,
    /// Value for the chosen channel (number or handle)
    pub contact_value: String,
    /// Optional free-text comments
    pub comments: Option<String>,
    /// Pickup or delivery
    pub delivery: DeliverySelection,
}

/// Submits an order: validates, persists the order and its lines,
/// notifies the operator and clears the cart.
///
/// A notification failure does not fail the submission; the customer
/// still sees success and the cart is cleared.
///
/// # Errors
/// Returns a validation error before any store call when the input is
/// incomplete, and a store error when persisting the order or its lines
/// fails (the cart is left untouched in both cases).
pub async fn submit_order(
    db: &DatabaseConnection,
    notifier: &dyn Notify,
    pricing: &DeliveryPricing,
    cart: &mut Cart,
    form: &CheckoutForm,
) -> Result<order::Model> {
    validate(cart, form, pricing)?;

    let delivery_cost = match &form.delivery {
        DeliverySelection::Pickup => 0.0,
        DeliverySelection::Delivery { distance_m, .. } => {
            pricing.cost(*distance_m, cart.total_weight_kg())
        }
    };

    let order = insert_order(db, form, delivery_cost).await?;
    insert_order_items(db, order.id, cart).await?;

    let lines: Vec<OrderLine> = cart.items().iter().map(OrderLine::from_cart_item).collect();
    let message = format::format_order_message(&order, &lines);
    match notifier.send(&message).await {
        Ok(()) => {}
        Err(Error::RateLimited) => {
            warn!(
                "Order {} placed but notification was rate limited",
                order.id
            );
        }
        Err(e) => {
            warn!("Order {} placed but notification failed: {e}", order.id);
        }
    }

    cart.clear();
    Ok(order)
}

fn validate(cart: &Cart, form: &CheckoutForm, pricing: &DeliveryPricing) -> Result<()> {
    if cart.is_empty() {
        return Err(Error::EmptyCart);
    }

    if cart.items().iter().any(|i| i.quantity == 0) {
        return Err(Error::Validation {
            message: "Quantity must be at least 1".to_string(),
        });
    }

    if form.customer_name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Please enter your name".to_string(),
        });
    }

    if form.contact_value.trim().is_empty() {
        return Err(Error::Validation {
            message: format!("Please enter your {}", form.contact_method.label()),
        });
    }

    if let DeliverySelection::Delivery {
        address,
        distance_m,
    } = &form.delivery
    {
        if address.trim().is_empty() {
            return Err(Error::Validation {
                message: "Please confirm your delivery address".to_string(),
            });
        }
        if !pricing.within_zone(*distance_m) {
            return Err(Error::OutsideDeliveryZone {
                distance_m: *distance_m,
            });
        }
    }

    Ok(())
}

async fn insert_order(
    db: &DatabaseConnection,
    form: &CheckoutForm,
    delivery_cost: f64,
) -> Result<order::Model> {
    let now = chrono::Utc::now().naive_utc();
    let contact_value = form.contact_value.trim().to_string();

    let (delivery_method, delivery_address, delivery_distance_m) = match &form.delivery {
        DeliverySelection::Pickup => ("pickup", None, None),
        DeliverySelection::Delivery {
            address,
            distance_m,
        } => ("delivery", Some(address.trim().to_string()), Some(*distance_m)),
    };

    // Exactly one contact column is populated, the one the customer chose
    let order = order::ActiveModel {
        customer_name: Set(form.customer_name.trim().to_string()),
        contact_method: Set(form.contact_method.as_str().to_string()),
        phone: Set((form.contact_method == ContactMethod::Phone).then(|| contact_value.clone())),
        telegram: Set(
            (form.contact_method == ContactMethod::Telegram).then(|| contact_value.clone())
        ),
        whatsapp: Set(
            (form.contact_method == ContactMethod::Whatsapp).then(|| contact_value.clone())
        ),
        instagram: Set(
            (form.contact_method == ContactMethod::Instagram).then(|| contact_value.clone())
        ),
        comments: Set(form
            .comments
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(ToString::to_string)),
        delivery_method: Set(delivery_method.to_string()),
        delivery_address: Set(delivery_address),
        delivery_distance_m: Set(delivery_distance_m),
        delivery_cost: Set(delivery_cost),
        status: Set(OrderStatus::Pending.as_str().to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    order.insert(db).await.map_err(Into::into)
}

async fn insert_order_items(db: &DatabaseConnection, order_id: i64, cart: &Cart) -> Result<()> {
    let now = chrono::Utc::now().naive_utc();

    for item in cart.items() {
        let line = order_item::ActiveModel {
            order_id: Set(order_id),
            product_id: Set(item.product.id),
            // Quantities are user input far below i32::MAX
            quantity: Set(i32::try_from(item.quantity).unwrap_or(i32::MAX)),
            unit_price: Set(item.product.price),
            note: Set(item.note.clone()),
            created_at: Set(now),
            ..Default::default()
        };
        line.insert(db).await?;
    }

    Ok(())
}
