//! Catalog business logic - categories, tags and products.
//!
//! These functions back both the remote bot commands and the storefront
//! read API. All inputs are validated before any store call; products
//! are soft-deleted so historical order lines keep a valid reference,
//! while categories and tags are removed outright with their
//! associations detached first.

use crate::{
    entities::{
        Category, Product, ProductTag, Tag, category, product, product_tag, tag,
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, Value, prelude::*, sea_query::Expr};

/// Retrieves all categories ordered alphabetically by name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_all_categories(db: &DatabaseConnection) -> Result<Vec<category::Model>> {
    Category::find()
        .order_by_asc(category::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a category by name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_category_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<category::Model>> {
    Category::find()
        .filter(category::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new category.
///
/// # Errors
/// Returns an error if the name is empty or the insert fails.
pub async fn create_category(
    db: &DatabaseConnection,
    name: &str,
    description: &str,
) -> Result<category::Model> {
    if name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Category name cannot be empty".to_string(),
        });
    }

    let now = chrono::Utc::now().naive_utc();

    let category = category::ActiveModel {
        name: Set(name.trim().to_string()),
        description: Set(description.trim().to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    category.insert(db).await.map_err(Into::into)
}

/// Deletes a category, detaching any products that referenced it.
///
/// # Errors
/// Returns an error if the category does not exist or a store call fails.
pub async fn delete_category(db: &DatabaseConnection, category_id: i64) -> Result<category::Model> {
    let category = Category::find_by_id(category_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::CategoryNotFound {
            name: category_id.to_string(),
        })?;

    // Detach products before removing the row
    Product::update_many()
        .col_expr(product::Column::CategoryId, Expr::value(Value::BigInt(None)))
        .filter(product::Column::CategoryId.eq(category_id))
        .exec(db)
        .await?;

    Category::delete_by_id(category_id).exec(db).await?;
    Ok(category)
}

/// Retrieves all tags ordered alphabetically by name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_all_tags(db: &DatabaseConnection) -> Result<Vec<tag::Model>> {
    Tag::find()
        .order_by_asc(tag::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a tag by name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_tag_by_name(db: &DatabaseConnection, name: &str) -> Result<Option<tag::Model>> {
    Tag::find()
        .filter(tag::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new tag.
///
/// # Errors
/// Returns an error if the name is empty or the insert fails.
pub async fn create_tag(db: &DatabaseConnection, name: &str) -> Result<tag::Model> {
    if name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Tag name cannot be empty".to_string(),
        });
    }

    let now = chrono::Utc::now().naive_utc();

    let tag = tag::ActiveModel {
        name: Set(name.trim().to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    tag.insert(db).await.map_err(Into::into)
}

/// Deletes a tag together with its product associations.
///
/// # Errors
/// Returns an error if the tag does not exist or a store call fails.
pub async fn delete_tag(db: &DatabaseConnection, tag_id: i64) -> Result<tag::Model> {
    let tag = Tag::find_by_id(tag_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::TagNotFound {
            name: tag_id.to_string(),
        })?;

    ProductTag::delete_many()
        .filter(product_tag::Column::TagId.eq(tag_id))
        .exec(db)
        .await?;

    Tag::delete_by_id(tag_id).exec(db).await?;
    Ok(tag)
}

/// Retrieves all active (non-deleted) products, ordered alphabetically
/// by name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_all_active_products(db: &DatabaseConnection) -> Result<Vec<product::Model>> {
    Product::find()
        .filter(product::Column::IsDeleted.eq(false))
        .order_by_asc(product::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds an active product by name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_product_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<product::Model>> {
    Product::find()
        .filter(product::Column::Name.eq(name))
        .filter(product::Column::IsDeleted.eq(false))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a product by id, deleted or not.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_product_by_id(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Option<product::Model>> {
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new product with the given name, price and description.
///
/// # Errors
/// Returns an error if:
/// - The product name is empty or whitespace-only
/// - The price is negative or not finite (NaN, infinity)
/// - The database insert operation fails
pub async fn create_product(
    db: &DatabaseConnection,
    name: &str,
    price: f64,
    description: &str,
) -> Result<product::Model> {
    if name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Product name cannot be empty".to_string(),
        });
    }

    if price < 0.0 || !price.is_finite() {
        return Err(Error::InvalidPrice { value: price });
    }

    let now = chrono::Utc::now().naive_utc();

    let product = product::ActiveModel {
        name: Set(name.trim().to_string()),
        description: Set(description.trim().to_string()),
        composition: Set(String::new()),
        price: Set(price),
        image_url: Set(None),
        category_id: Set(None),
        weight_kg: Set(None),
        is_custom_order: Set(false),
        is_deleted: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    product.insert(db).await.map_err(Into::into)
}

/// Soft deletes a product, preserving order history.
///
/// # Errors
/// Returns an error if the product does not exist, is already deleted,
/// or the update fails.
pub async fn delete_product(db: &DatabaseConnection, product_id: i64) -> Result<product::Model> {
    let mut product: product::ActiveModel = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::ProductNotFound {
            name: product_id.to_string(),
        })?
        .into();

    if *product.is_deleted.as_ref() {
        return Err(Error::ProductNotFound {
            name: product_id.to_string(),
        });
    }

    product.is_deleted = Set(true);
    product.updated_at = Set(chrono::Utc::now().naive_utc());

    product.update(db).await.map_err(Into::into)
}

/// Assigns a product to a category.
///
/// # Errors
/// Returns an error if the product or category does not exist or the
/// update fails.
pub async fn set_product_category(
    db: &DatabaseConnection,
    product_id: i64,
    category_id: i64,
) -> Result<product::Model> {
    let category = Category::find_by_id(category_id).one(db).await?;
    if category.is_none() {
        return Err(Error::CategoryNotFound {
            name: category_id.to_string(),
        });
    }

    let mut product: product::ActiveModel = Product::find_by_id(product_id)
        .one(db)
        .await?
        .filter(|p| !p.is_deleted)
        .ok_or_else(|| Error::ProductNotFound {
            name: product_id.to_string(),
        })?
        .into();

    product.category_id = Set(Some(category_id));
    product.updated_at = Set(chrono::Utc::now().naive_utc());

    product.update(db).await.map_err(Into::into)
}

/// Attaches a tag to a product. Attaching an already-attached tag is a
/// no-op.
///
/// # Errors
/// Returns an error if the product or tag does not exist or a store
/// call fails.
pub async fn tag_product(db: &DatabaseConnection, product_id: i64, tag_id: i64) -> Result<()> {
    let product = Product::find_by_id(product_id)
        .one(db)
        .await?
        .filter(|p| !p.is_deleted);
    if product.is_none() {
        return Err(Error::ProductNotFound {
            name: product_id.to_string(),
        });
    }

    if Tag::find_by_id(tag_id).one(db).await?.is_none() {
        return Err(Error::TagNotFound {
            name: tag_id.to_string(),
        });
    }

    let existing = ProductTag::find_by_id((product_id, tag_id)).one(db).await?;
    if existing.is_some() {
        return Ok(());
    }

    product_tag::ActiveModel {
        product_id: Set(product_id),
        tag_id: Set(tag_id),
    }
    .insert(db)
    .await?;

    Ok(())
}

/// Retrieves the tags attached to a product, ordered by name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_tags_for_product(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Vec<tag::Model>> {
    let tag_ids: Vec<i64> = ProductTag::find()
        .filter(product_tag::Column::ProductId.eq(product_id))
        .all(db)
        .await?
        .into_iter()
        .map(|pt| pt.tag_id)
        .collect();

    if tag_ids.is_empty() {
        return Ok(Vec::new());
    }

    Tag::find()
        .filter(tag::Column::Id.is_in(tag_ids))
        .order_by_asc(tag::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}
