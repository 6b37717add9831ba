//! Admin allow-list checks.

use crate::{entities::Admin, errors::Result};
use sea_orm::{DatabaseConnection, EntityTrait};

/// Whether the given Telegram user id belongs to an active allow-list
/// entry. Unknown ids are not authorized.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn is_authorized(db: &DatabaseConnection, telegram_id: i64) -> Result<bool> {
    let entry = Admin::find_by_id(telegram_id).one(db).await?;
    Ok(entry.is_some_and(|a| a.is_active))
}
