//! The checkout endpoint.
//!
//! Maps the storefront's order payload onto a [`Cart`] and a
//! [`CheckoutForm`], then runs the submission flow. Unit prices come
//! from the catalog at submission time, never from the client.

use crate::core::cart::Cart;
use crate::core::catalog;
use crate::core::checkout::{self, CheckoutForm, ContactMethod, DeliverySelection};
use crate::errors::Error;
use crate::server::AppState;
use crate::server::response::{ApiResponse, failed, rejected, success};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::json;
use tracing::error;

/// One line of the checkout payload.
#[derive(Debug, Deserialize)]
pub struct OrderRequestItem {
    /// Catalog id of the product
    pub product_id: i64,
    /// Units ordered
    pub quantity: u32,
    /// Optional note for the line
    #[serde(default)]
    pub note: Option<String>,
}

/// The checkout payload.
#[derive(Debug, Deserialize)]
pub struct OrderRequest {
    /// Customer's name
    pub customer_name: String,
    /// Chosen contact channel
    pub contact_method: ContactMethod,
    /// Value for the chosen channel
    pub contact_value: String,
    /// Optional free-text comments
    #[serde(default)]
    pub comments: Option<String>,
    /// `pickup` or `delivery`
    pub delivery_method: DeliveryMethodField,
    /// Confirmed address, required for delivery
    #[serde(default)]
    pub delivery_address: Option<String>,
    /// Measured distance from the origin in metres, required for delivery
    #[serde(default)]
    pub delivery_distance_m: Option<f64>,
    /// The cart lines
    pub items: Vec<OrderRequestItem>,
}

/// Wire form of the delivery method.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMethodField {
    /// Collect from the bakery
    Pickup,
    /// Deliver to an address
    Delivery,
}

/// `POST /orders` - submits an order.
pub async fn submit(
    State(state): State<AppState>,
    Json(request): Json<OrderRequest>,
) -> (StatusCode, Json<ApiResponse>) {
    let delivery = match request.delivery_method {
        DeliveryMethodField::Pickup => DeliverySelection::Pickup,
        DeliveryMethodField::Delivery => {
            let (Some(address), Some(distance_m)) = (
                request.delivery_address.clone(),
                request.delivery_distance_m,
            ) else {
                return rejected("Delivery orders need a confirmed address and distance");
            };
            DeliverySelection::Delivery {
                address,
                distance_m,
            }
        }
    };

    // Resolve every line against the catalog before touching the cart
    let mut cart = Cart::new();
    for item in &request.items {
        let product = match catalog::get_product_by_id(&state.db, item.product_id).await {
            Ok(Some(product)) if !product.is_deleted => product,
            Ok(_) => {
                return rejected(format!("Unknown product {}", item.product_id));
            }
            Err(e) => {
                error!("Product lookup failed: {e}");
                return failed("please try again later");
            }
        };
        cart.add_line(product, item.quantity, item.note.clone());
    }

    let form = CheckoutForm {
        customer_name: request.customer_name,
        contact_method: request.contact_method,
        contact_value: request.contact_value,
        comments: request.comments,
        delivery,
    };

    match checkout::submit_order(
        &state.db,
        state.notifier.as_ref(),
        &state.config.delivery,
        &mut cart,
        &form,
    )
    .await
    {
        Ok(order) => success(json!({
            "order_id": order.id,
            "status": order.status,
            "delivery_cost": order.delivery_cost,
        })),
        Err(
            e @ (Error::EmptyCart
            | Error::Validation { .. }
            | Error::OutsideDeliveryZone { .. }
            | Error::InvalidPrice { .. }),
        ) => rejected(e.to_string()),
        Err(e) => {
            error!("Order submission failed: {e}");
            failed("please try again later")
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use crate::core::catalog;
    use crate::entities::{Order, OrderItem};
    use crate::server::response::ApiResponse;
    use crate::test_utils::{setup_test_db, test_router};
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use sea_orm::EntityTrait;
    use tower::ServiceExt;

    fn order_request(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/orders")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> ApiResponse {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_pickup_order_end_to_end() {
        let db = std::sync::Arc::new(setup_test_db().await.unwrap());
        let product = catalog::create_product(&db, "Chocolate Dream", 179.0, "")
            .await
            .unwrap();
        let (router, notifier) = test_router(db.clone());

        let payload = serde_json::json!({
            "customer_name": "Anna",
            "contact_method": "phone",
            "contact_value": "+358 40 123 4567",
            "delivery_method": "pickup",
            "items": [{"product_id": product.id, "quantity": 1}]
        });

        let response = router.oneshot(order_request(payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body.ok, "unexpected failure: {:?}", body.error);

        let result = body.result.unwrap();
        assert_eq!(result["status"], "pending");
        assert_eq!(result["delivery_cost"], 0.0);

        assert_eq!(Order::find().all(db.as_ref()).await.unwrap().len(), 1);
        assert_eq!(OrderItem::find().all(db.as_ref()).await.unwrap().len(), 1);

        let messages = notifier.messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("Total: €179.00"));
    }

    #[tokio::test]
    async fn test_unknown_product_is_rejected() {
        let db = std::sync::Arc::new(setup_test_db().await.unwrap());
        let (router, _notifier) = test_router(db.clone());

        let payload = serde_json::json!({
            "customer_name": "Anna",
            "contact_method": "phone",
            "contact_value": "+358 40 123 4567",
            "delivery_method": "pickup",
            "items": [{"product_id": 12345, "quantity": 1}]
        });

        let response = router.oneshot(order_request(payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(!body.ok);
        assert!(body.error.unwrap().contains("Unknown product"));
        assert!(Order::find().all(db.as_ref()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_cart_is_rejected() {
        let db = std::sync::Arc::new(setup_test_db().await.unwrap());
        let (router, _notifier) = test_router(db.clone());

        let payload = serde_json::json!({
            "customer_name": "Anna",
            "contact_method": "phone",
            "contact_value": "+358 40 123 4567",
            "delivery_method": "pickup",
            "items": []
        });

        let response = router.oneshot(order_request(payload)).await.unwrap();
        let body = body_json(response).await;
        assert!(!body.ok);
        assert_eq!(body.error.as_deref(), Some("Cart is empty"));
    }

    #[tokio::test]
    async fn test_delivery_without_address_is_rejected() {
        let db = setup_test_db().await.unwrap();
        let product = catalog::create_product(&db, "Chocolate Dream", 179.0, "")
            .await
            .unwrap();
        let (router, _notifier) = test_router(db);

        let payload = serde_json::json!({
            "customer_name": "Anna",
            "contact_method": "phone",
            "contact_value": "+358 40 123 4567",
            "delivery_method": "delivery",
            "items": [{"product_id": product.id, "quantity": 1}]
        });

        let response = router.oneshot(order_request(payload)).await.unwrap();
        let body = body_json(response).await;
        assert!(!body.ok);
        assert!(body.error.unwrap().contains("address"));
    }

    #[tokio::test]
    async fn test_delivery_order_prices_server_side() {
        let db = std::sync::Arc::new(setup_test_db().await.unwrap());
        let product = catalog::create_product(&db, "Chocolate Dream", 179.0, "")
            .await
            .unwrap();
        let (router, _notifier) = test_router(db.clone());

        let payload = serde_json::json!({
            "customer_name": "Anna",
            "contact_method": "telegram",
            "contact_value": "@anna",
            "delivery_method": "delivery",
            "delivery_address": "Hämeenkatu 1, Turku",
            "delivery_distance_m": 12_000.0,
            "items": [{"product_id": product.id, "quantity": 1}]
        });

        let response = router.oneshot(order_request(payload)).await.unwrap();
        let body = body_json(response).await;
        assert!(body.ok, "unexpected failure: {:?}", body.error);
        // No weight on the product: ceil(max(5, 12 * 2)) = 24
        assert_eq!(body.result.unwrap()["delivery_cost"], 24.0);
    }

    #[tokio::test]
    async fn test_delivery_outside_zone_is_rejected() {
        let db = setup_test_db().await.unwrap();
        let product = catalog::create_product(&db, "Chocolate Dream", 179.0, "")
            .await
            .unwrap();
        let (router, _notifier) = test_router(db);

        let payload = serde_json::json!({
            "customer_name": "Anna",
            "contact_method": "phone",
            "contact_value": "+358 40 123 4567",
            "delivery_method": "delivery",
            "delivery_address": "Helsinki city centre",
            "delivery_distance_m": 165_000.0,
            "items": [{"product_id": product.id, "quantity": 1}]
        });

        let response = router.oneshot(order_request(payload)).await.unwrap();
        let body = body_json(response).await;
        assert!(!body.ok);
        assert!(body.error.unwrap().contains("outside the delivery zone"));
    }
}
