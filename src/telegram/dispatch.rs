//! Command execution.
//!
//! [`handle`] is the single entry point for inbound operator text. It
//! never fails: parse problems become usage replies, unknown commands
//! become the help text, and execution errors are folded into short
//! user-facing strings while the underlying cause is logged.

use crate::core::catalog;
use crate::errors::{Error, Result};
use crate::telegram::command::{self, Command, CommandError, HELP_TEXT};
use sea_orm::DatabaseConnection;
use tracing::error;

/// Handles one inbound message and returns the reply to send back.
pub async fn handle(db: &DatabaseConnection, text: &str) -> String {
    let parsed = match command::parse(text) {
        Ok(parsed) => parsed,
        Err(CommandError::Usage { usage }) => return format!("❌ {usage}"),
        Err(CommandError::Unknown { .. } | CommandError::NotACommand) => {
            return HELP_TEXT.to_string();
        }
    };

    match execute(db, parsed).await {
        Ok(reply) => reply,
        Err(e) => user_message(&e),
    }
}

async fn execute(db: &DatabaseConnection, command: Command) -> Result<String> {
    match command {
        Command::AddCategory { name, description } => {
            let category = catalog::create_category(db, &name, &description).await?;
            Ok(format!("✅ Category '{}' added.", category.name))
        }
        Command::ListCategories => {
            let categories = catalog::get_all_categories(db).await?;
            if categories.is_empty() {
                return Ok("No categories yet. Use /addcategory to create one.".to_string());
            }
            let lines: Vec<String> = categories
                .iter()
                .map(|c| {
                    if c.description.is_empty() {
                        format!("• {}", c.name)
                    } else {
                        format!("• {} — {}", c.name, c.description)
                    }
                })
                .collect();
            Ok(format!("Categories:\n{}", lines.join("\n")))
        }
        Command::DeleteCategory { name } => {
            let category = catalog::get_category_by_name(db, &name)
                .await?
                .ok_or(Error::CategoryNotFound { name })?;
            catalog::delete_category(db, category.id).await?;
            Ok(format!("✅ Category '{}' deleted.", category.name))
        }
        Command::AddTag { name } => {
            let tag = catalog::create_tag(db, &name).await?;
            Ok(format!("✅ Tag '{}' added.", tag.name))
        }
        Command::ListTags => {
            let tags = catalog::get_all_tags(db).await?;
            if tags.is_empty() {
                return Ok("No tags yet. Use /addtag to create one.".to_string());
            }
            let lines: Vec<String> = tags.iter().map(|t| format!("• {}", t.name)).collect();
            Ok(format!("Tags:\n{}", lines.join("\n")))
        }
        Command::DeleteTag { name } => {
            let tag = catalog::get_tag_by_name(db, &name)
                .await?
                .ok_or(Error::TagNotFound { name })?;
            catalog::delete_tag(db, tag.id).await?;
            Ok(format!("✅ Tag '{}' deleted.", tag.name))
        }
        Command::AddProduct {
            name,
            price,
            description,
        } => {
            let product = catalog::create_product(db, &name, price, &description).await?;
            Ok(format!(
                "✅ Product '{}' added at €{:.2}.",
                product.name, product.price
            ))
        }
        Command::ListProducts => {
            let products = catalog::get_all_active_products(db).await?;
            if products.is_empty() {
                return Ok("No products yet. Use /addproduct to create one.".to_string());
            }
            let lines: Vec<String> = products
                .iter()
                .map(|p| format!("• {} — €{:.2}", p.name, p.price))
                .collect();
            Ok(format!("Products:\n{}", lines.join("\n")))
        }
        Command::DeleteProduct { name } => {
            let product = catalog::get_product_by_name(db, &name)
                .await?
                .ok_or(Error::ProductNotFound { name })?;
            catalog::delete_product(db, product.id).await?;
            Ok(format!("✅ Product '{}' deleted.", product.name))
        }
        Command::SetCategory { product, category } => {
            let product_row = catalog::get_product_by_name(db, &product)
                .await?
                .ok_or(Error::ProductNotFound { name: product })?;
            let category_row = catalog::get_category_by_name(db, &category)
                .await?
                .ok_or(Error::CategoryNotFound { name: category })?;
            catalog::set_product_category(db, product_row.id, category_row.id).await?;
            Ok(format!(
                "✅ Product '{}' is now in category '{}'.",
                product_row.name, category_row.name
            ))
        }
        Command::TagProduct { product, tag } => {
            let product_row = catalog::get_product_by_name(db, &product)
                .await?
                .ok_or(Error::ProductNotFound { name: product })?;
            let tag_row = catalog::get_tag_by_name(db, &tag)
                .await?
                .ok_or(Error::TagNotFound { name: tag })?;
            catalog::tag_product(db, product_row.id, tag_row.id).await?;
            Ok(format!(
                "✅ Product '{}' tagged '{}'.",
                product_row.name, tag_row.name
            ))
        }
        Command::Help => Ok(HELP_TEXT.to_string()),
    }
}

/// Folds an execution error into a reply the operator can act on.
/// Store and transport details are logged, never echoed back.
fn user_message(e: &Error) -> String {
    match e {
        Error::Validation { .. }
        | Error::InvalidPrice { .. }
        | Error::CategoryNotFound { .. }
        | Error::TagNotFound { .. }
        | Error::ProductNotFound { .. } => format!("❌ {e}"),
        Error::Database(db_err) => {
            let raw = format!("{db_err:?}");
            if raw.contains("UNIQUE") || raw.contains("unique") {
                return "❌ That name is already taken. Names must be unique.".to_string();
            }
            error!("Command execution failed: {db_err}");
            "❌ Something went wrong, please try again later.".to_string()
        }
        _ => {
            error!("Command execution failed: {e}");
            "❌ Something went wrong, please try again later.".to_string()
        }
    }
}
