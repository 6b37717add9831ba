//! Storefront catalog read endpoints.

use crate::core::catalog;
use crate::server::AppState;
use crate::server::response::{ApiResponse, failed, success};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::error;

/// `GET /products` - all active products.
pub async fn list_products(State(state): State<AppState>) -> (StatusCode, Json<ApiResponse>) {
    match catalog::get_all_active_products(&state.db).await {
        Ok(products) => success(products),
        Err(e) => {
            error!("Failed to load products: {e}");
            failed("failed to load products")
        }
    }
}

/// `GET /categories` - all categories.
pub async fn list_categories(State(state): State<AppState>) -> (StatusCode, Json<ApiResponse>) {
    match catalog::get_all_categories(&state.db).await {
        Ok(categories) => success(categories),
        Err(e) => {
            error!("Failed to load categories: {e}");
            failed("failed to load categories")
        }
    }
}

/// `GET /tags` - all tags.
pub async fn list_tags(State(state): State<AppState>) -> (StatusCode, Json<ApiResponse>) {
    match catalog::get_all_tags(&state.db).await {
        Ok(tags) => success(tags),
        Err(e) => {
            error!("Failed to load tags: {e}");
            failed("failed to load tags")
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use crate::core::catalog;
    use crate::server::response::ApiResponse;
    use crate::test_utils::{setup_test_db, test_router};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn get_json(router: axum::Router, uri: &str) -> (StatusCode, ApiResponse) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_list_products_returns_active_only() {
        let db = setup_test_db().await.unwrap();
        catalog::create_product(&db, "Chocolate Dream", 179.0, "")
            .await
            .unwrap();
        let hidden = catalog::create_product(&db, "Old Cake", 10.0, "")
            .await
            .unwrap();
        catalog::delete_product(&db, hidden.id).await.unwrap();

        let (router, _notifier) = test_router(db);
        let (status, body) = get_json(router, "/products").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.ok);
        let products = body.result.unwrap();
        let names: Vec<&str> = products
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Chocolate Dream"]);
    }

    #[tokio::test]
    async fn test_list_categories_and_tags() {
        let db = std::sync::Arc::new(setup_test_db().await.unwrap());
        catalog::create_category(&db, "Wedding", "Elegant cakes")
            .await
            .unwrap();
        catalog::create_tag(&db, "chocolate").await.unwrap();

        let (router, _notifier) = test_router(db.clone());
        let (status, body) = get_json(router, "/categories").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.result.unwrap().as_array().unwrap().len(), 1);

        let (router, _notifier) = test_router(db);
        let (status, body) = get_json(router, "/tags").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.result.unwrap().as_array().unwrap().len(), 1);
    }
}
