//! HTTP layer - The JSON API over the storefront core.
//!
//! This module wires the core operations into an Axum router: the public
//! storefront routes (catalog, cart, checkout) and the admin routes
//! (dashboard, product creation, uploads, order inspection). The admin
//! routes carry no authentication. Handlers stay thin; every business rule
//! lives in [`crate::core`].

/// Request handlers for storefront and admin routes
pub mod handlers;
/// Session cookie extraction
pub mod session;

use crate::{
    config::settings::AppConfig,
    errors::{Error, Result},
    session::SessionStore,
    storage::ImageStore,
};
use axum::{
    Router,
    http::{Method, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use sea_orm::DatabaseConnection;
use std::{sync::Arc, time::Duration};
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;
use tracing::info;

/// Shared state available to all request handlers.
pub struct AppState {
    /// Database connection for all storage operations
    pub db: DatabaseConnection,
    /// Per-client cart state
    pub sessions: SessionStore,
    /// Upload collaborator for product images
    pub uploads: ImageStore,
}

impl AppState {
    /// Creates the shared state with an empty session store.
    #[must_use]
    pub fn new(db: DatabaseConnection, uploads: ImageStore) -> Self {
        Self {
            db,
            sessions: SessionStore::new(),
            uploads,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::ProductNotFound { .. } | Error::OrderNotFound { .. } => StatusCode::NOT_FOUND,
            Error::Validation { .. }
            | Error::InvalidQuantity { .. }
            | Error::InvalidAmount { .. } => StatusCode::BAD_REQUEST,
            Error::Config { .. } | Error::Database(_) | Error::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, self.to_string()).into_response()
    }
}

/// Builds the application router with all routes and middleware attached.
#[must_use]
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/products", get(handlers::catalog::list_products))
        .route("/products/:id", get(handlers::catalog::view_product))
        .route("/cart", get(handlers::cart::view_cart))
        .route("/cart/items", post(handlers::cart::add_to_cart))
        .route(
            "/cart/items/:index",
            delete(handlers::cart::remove_from_cart),
        )
        .route("/cart/quick-add/:id", post(handlers::cart::quick_add))
        .route(
            "/checkout",
            get(handlers::checkout::review_checkout).post(handlers::checkout::submit_checkout),
        )
        .route("/admin", get(handlers::admin::dashboard))
        .route("/admin/products", post(handlers::admin::add_product))
        .route("/admin/uploads", post(handlers::admin::upload_image))
        .route("/admin/orders/:id", get(handlers::admin::view_order))
        .layer(cors)
        .with_state(state)
}

/// Binds the listener and serves the router until a shutdown signal arrives.
///
/// # Errors
/// Returns an error if binding or serving fails.
pub async fn serve(config: &AppConfig, state: Arc<AppState>) -> Result<()> {
    let app = router(state);

    let address = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, header},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn test_state() -> Result<(Arc<AppState>, tempfile::TempDir)> {
        let db = setup_test_db().await?;
        let dir = tempfile::tempdir()?;
        let state = Arc::new(AppState::new(db, ImageStore::new(dir.path())));
        Ok((state, dir))
    }

    fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, cookie: Option<&str>, body: &Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    /// Pulls the `sid=...` pair out of the response's Set-Cookie header.
    fn session_cookie(response: &Response) -> String {
        response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .split(';')
            .next()
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn test_catalog_routes() -> Result<()> {
        let (state, _dir) = test_state().await?;
        let mug = create_custom_product(&state.db, "Mug", 350, 3).await?;
        let app = router(Arc::clone(&state));

        let response = app.clone().oneshot(get("/products", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body.as_array().unwrap().len(), 1);

        let response = app
            .clone()
            .oneshot(get(&format!("/products/{}", mug.id), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["name"], "Mug");
        assert_eq!(body["price"], 350);

        let response = app.oneshot(get("/products/999", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        Ok(())
    }

    #[tokio::test]
    async fn test_cart_flow_keeps_session() -> Result<()> {
        let (state, _dir) = test_state().await?;
        let mug = create_custom_product(&state.db, "Mug", 100, 10).await?;
        let apron = create_custom_product(&state.db, "Apron", 50, 10).await?;
        let app = router(Arc::clone(&state));

        // First request has no cookie; the response hands one out
        let response = app
            .clone()
            .oneshot(post_json(
                "/cart/items",
                None,
                &json!({"product_id": mug.id, "quantity": 2}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let cookie = session_cookie(&response);

        let response = app
            .clone()
            .oneshot(post_json(
                &format!("/cart/quick-add/{}", apron.id),
                Some(&cookie),
                &json!({}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(get("/cart", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["items"].as_array().unwrap().len(), 2);
        assert_eq!(body["items_subtotal"], 250);
        assert_eq!(body["total_with_shipping"], 260);
        assert_eq!(body["total_quantity"], 3);

        // Remove the first entry; the apron shifts to position 0
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::DELETE)
                    .uri("/cart/items/0")
                    .header(header::COOKIE, &cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.oneshot(get("/cart", Some(&cookie))).await.unwrap();
        let body = body_json(response).await;
        assert_eq!(body["items"].as_array().unwrap().len(), 1);
        assert_eq!(body["items"][0]["name"], "Apron");
        assert_eq!(body["items"][0]["index"], 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_add_to_cart_rejects_bad_quantity() -> Result<()> {
        let (state, _dir) = test_state().await?;
        let app = router(state);

        let response = app
            .oneshot(post_json(
                "/cart/items",
                None,
                &json!({"product_id": 1, "quantity": 0}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_clears_cart_and_materializes() -> Result<()> {
        let (state, _dir) = test_state().await?;
        let mug = create_custom_product(&state.db, "Mug", 100, 10).await?;
        let app = router(Arc::clone(&state));

        let response = app
            .clone()
            .oneshot(post_json(
                "/cart/items",
                None,
                &json!({"product_id": mug.id, "quantity": 2}),
            ))
            .await
            .unwrap();
        let cookie = session_cookie(&response);

        // Submitting with a blank field fails and leaves the cart alone
        let response = app
            .clone()
            .oneshot(post_json(
                "/checkout",
                Some(&cookie),
                &json!({
                    "first_name": "", "last_name": "Doe",
                    "phone_number": "0700000000", "email": "jane@example.com",
                    "address": "1 Main St", "city": "Nairobi",
                    "country": "Kenya", "payment_type": "POD"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app.clone().oneshot(get("/cart", Some(&cookie))).await.unwrap();
        let body = body_json(response).await;
        assert_eq!(body["items"].as_array().unwrap().len(), 1);

        // A complete submission materializes the order
        let response = app
            .clone()
            .oneshot(post_json(
                "/checkout",
                Some(&cookie),
                &json!({
                    "first_name": "Jane", "last_name": "Doe",
                    "phone_number": "0700000000", "email": "jane@example.com",
                    "address": "1 Main St", "city": "Nairobi",
                    "country": "Kenya", "payment_type": "POD"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let receipt = body_json(response).await;
        assert_eq!(receipt["status"], "PENDING");
        assert_eq!(receipt["reference"].as_str().unwrap().len(), 10);

        // Cart is empty afterwards and stock went down
        let response = app
            .clone()
            .oneshot(get("/cart", Some(&cookie)))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert!(body["items"].as_array().unwrap().is_empty());

        let order_id = receipt["id"].as_i64().unwrap();
        let response = app
            .oneshot(get(&format!("/admin/orders/{order_id}"), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let detail = body_json(response).await;
        assert_eq!(detail["order_total"], 210);
        assert_eq!(detail["quantity_total"], 2);

        let mug = crate::core::product::get_product_by_id(&state.db, mug.id)
            .await?
            .unwrap();
        assert_eq!(mug.stock, 8);

        Ok(())
    }

    #[tokio::test]
    async fn test_admin_upload_then_create_product() -> Result<()> {
        let (state, _dir) = test_state().await?;
        let app = router(Arc::clone(&state));

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/admin/uploads?filename=mug.png")
                    .body(Body::from(&b"not-really-a-png"[..]))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let upload = body_json(response).await;
        let image = upload["image"].as_str().unwrap().to_string();
        assert!(image.starts_with("/images/"));

        let response = app
            .clone()
            .oneshot(post_json(
                "/admin/products",
                None,
                &json!({
                    "name": "Ceramic Mug",
                    "price": 350,
                    "stock": 12,
                    "description": "A mug",
                    "image": image,
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app.oneshot(get("/admin", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let dashboard = body_json(response).await;
        assert_eq!(dashboard["products"].as_array().unwrap().len(), 1);
        assert_eq!(dashboard["products_in_stock"], 1);
        assert!(dashboard["orders"].as_array().unwrap().is_empty());

        Ok(())
    }
}
