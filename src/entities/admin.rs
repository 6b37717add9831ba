//! Admin allow-list entity.
//!
//! Maps a Telegram user id to an active flag. Only active entries may
//! issue catalog-management commands through the webhook.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Allow-list database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "admin_allowlist")]
pub struct Model {
    /// Telegram user id of the operator
    #[sea_orm(primary_key, auto_increment = false)]
    pub telegram_id: i64,
    /// Optional human-readable label for the entry
    pub display_name: Option<String>,
    /// Whether this operator may currently issue commands
    pub is_active: bool,
    /// When the entry was created
    pub created_at: DateTime,
}

/// Admins have no outgoing relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
