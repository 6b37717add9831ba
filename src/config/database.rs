//! Database connection and table creation using `SeaORM`.
//!
//! The schema is generated straight from the entity definitions with
//! `Schema::create_table_from_entity`, so the database layout always
//! matches the Rust structs without hand-written SQL.

use crate::entities::{Admin, Category, Order, OrderItem, Product, ProductTag, Tag};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Establishes a connection to the database at the given URL.
///
/// # Errors
/// Returns an error if the connection cannot be established.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates any missing tables from the entity definitions.
///
/// Idempotent: every statement carries `IF NOT EXISTS`, so this runs
/// safely on every startup.
///
/// # Errors
/// Returns an error if any of the table-creation statements fail.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut statements = vec![
        schema.create_table_from_entity(Category),
        schema.create_table_from_entity(Tag),
        schema.create_table_from_entity(Product),
        schema.create_table_from_entity(ProductTag),
        schema.create_table_from_entity(Order),
        schema.create_table_from_entity(OrderItem),
        schema.create_table_from_entity(Admin),
    ];

    for statement in &mut statements {
        db.execute(builder.build(statement.if_not_exists())).await?;
    }

    Ok(())
}
