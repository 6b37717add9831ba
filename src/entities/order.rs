//! Order entity - A customer's submitted purchase intent.
//!
//! Orders are created at checkout with status `pending` and are only
//! mutated by status transitions afterwards, never deleted. Exactly one
//! contact column is populated, the one named by `contact_method`; the
//! delivery columns are empty and `delivery_cost` is zero for pickup
//! orders.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Customer's name as entered at checkout
    pub customer_name: String,
    /// Which contact field the customer chose (`phone`, `telegram`, `whatsapp`, `instagram`)
    pub contact_method: String,
    /// Phone number, when the contact method is `phone`
    pub phone: Option<String>,
    /// Telegram handle, when the contact method is `telegram`
    pub telegram: Option<String>,
    /// WhatsApp number, when the contact method is `whatsapp`
    pub whatsapp: Option<String>,
    /// Instagram handle, when the contact method is `instagram`
    pub instagram: Option<String>,
    /// Free-text comments from the customer
    pub comments: Option<String>,
    /// `pickup` or `delivery`
    pub delivery_method: String,
    /// Delivery address, present only for delivery orders
    pub delivery_address: Option<String>,
    /// Measured distance from the pickup origin in metres, delivery only
    pub delivery_distance_m: Option<f64>,
    /// Delivery cost in whole euros, zero for pickup
    pub delivery_cost: f64,
    /// `pending`, `processing`, `completed` or `cancelled`
    pub status: String,
    /// When the order was placed
    pub created_at: DateTime,
    /// When the order was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Order and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The line items making up this order
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItem,
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
