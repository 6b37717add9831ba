//! Startup seeding of catalog rows and the admin allow-list.
//!
//! Seeding is idempotent: every entry is inserted only when no row with
//! the same identity exists, so repeated startups leave the store
//! unchanged.

use crate::config::AppConfig;
use crate::entities::{Admin, Category, Tag, admin, category, tag};
use crate::errors::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use tracing::info;

/// Applies the seed lists from the configuration to the record store.
///
/// # Errors
/// Returns an error if any lookup or insert fails.
pub async fn seed_initial_data(db: &DatabaseConnection, config: &AppConfig) -> Result<()> {
    let now = chrono::Utc::now().naive_utc();
    let mut created = 0_usize;

    for entry in &config.seed.categories {
        let existing = Category::find()
            .filter(category::Column::Name.eq(&entry.name))
            .one(db)
            .await?;
        if existing.is_none() {
            category::ActiveModel {
                name: Set(entry.name.clone()),
                description: Set(entry.description.clone()),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(db)
            .await?;
            created += 1;
        }
    }

    for entry in &config.seed.tags {
        let existing = Tag::find()
            .filter(tag::Column::Name.eq(&entry.name))
            .one(db)
            .await?;
        if existing.is_none() {
            tag::ActiveModel {
                name: Set(entry.name.clone()),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(db)
            .await?;
            created += 1;
        }
    }

    for entry in &config.seed.admins {
        let existing = Admin::find_by_id(entry.telegram_id).one(db).await?;
        if existing.is_none() {
            admin::ActiveModel {
                telegram_id: Set(entry.telegram_id),
                display_name: Set(entry.display_name.clone()),
                is_active: Set(entry.is_active),
                created_at: Set(now),
            }
            .insert(db)
            .await?;
            created += 1;
        }
    }

    if created > 0 {
        info!("Seeded {created} missing rows");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::config::settings::{AdminSeed, CategorySeed, TagSeed};
    use crate::test_utils::{setup_test_db, test_app_config};

    fn seeded_config() -> AppConfig {
        let mut config = test_app_config();
        config.seed.categories = vec![CategorySeed {
            name: "Classic cakes".to_string(),
            description: "Always on the counter".to_string(),
        }];
        config.seed.tags = vec![TagSeed {
            name: "chocolate".to_string(),
        }];
        config.seed.admins = vec![AdminSeed {
            telegram_id: 537_190_136,
            display_name: Some("owner".to_string()),
            is_active: true,
        }];
        config
    }

    #[tokio::test]
    async fn test_seed_creates_missing_rows() -> Result<()> {
        let db = setup_test_db().await?;
        let config = seeded_config();

        seed_initial_data(&db, &config).await?;

        let categories = Category::find().all(&db).await?;
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name, "Classic cakes");

        let tags = Tag::find().all(&db).await?;
        assert_eq!(tags.len(), 1);

        let admin = Admin::find_by_id(537_190_136).one(&db).await?.unwrap();
        assert!(admin.is_active);
        assert_eq!(admin.display_name.as_deref(), Some("owner"));

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        let config = seeded_config();

        seed_initial_data(&db, &config).await?;
        seed_initial_data(&db, &config).await?;

        assert_eq!(Category::find().all(&db).await?.len(), 1);
        assert_eq!(Tag::find().all(&db).await?.len(), 1);
        assert_eq!(Admin::find().all(&db).await?.len(), 1);

        Ok(())
    }
}
