//! Product entity - Catalog items offered by the bakery.
//!
//! Products carry a display price and an optional weight used by the
//! delivery-cost calculator. Custom-order products (made to order) also
//! surface their composition text in operator notifications. Deletion is
//! soft so historical order items keep a valid product reference.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name (e.g. "Chocolate Dream")
    pub name: String,
    /// Short storefront description
    pub description: String,
    /// Ingredient/composition text, one component per line
    pub composition: String,
    /// Unit price in euros
    pub price: f64,
    /// Primary image reference, if any
    pub image_url: Option<String>,
    /// Category this product belongs to, if assigned
    pub category_id: Option<i64>,
    /// Approximate weight in kilograms, used for delivery surcharges
    pub weight_kg: Option<f64>,
    /// Whether this item is made to order (composition shown to the operator)
    pub is_custom_order: bool,
    /// Soft delete flag - if true, product is hidden but data is preserved
    pub is_deleted: bool,
    /// When the product was created
    pub created_at: DateTime,
    /// When the product was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each product belongs to at most one category
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
    /// Tag associations live in the join table
    #[sea_orm(has_many = "super::product_tag::Entity")]
    ProductTag,
    /// Order lines referencing this product
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItem,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::product_tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductTag.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
