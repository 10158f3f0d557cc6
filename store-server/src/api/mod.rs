//! API routes
//!
//! - [`auth`] - login and registration
//! - [`products`] - catalog CRUD (storefront reads are public, mutations admin-only)
//! - [`orders`] - checkout, listing, detail, status updates
//! - [`health`] - health check

pub mod auth;
pub mod health;
pub mod orders;
pub mod products;

use axum::routing::{get, patch, post, put};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::state::AppState;

pub type ApiResult<T> = Result<axum::Json<T>, shared::error::AppError>;

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/register", post(auth::register))
        .route("/api/products", get(products::list).post(products::create))
        .route("/api/products/admin/all", get(products::list_all))
        .route("/api/products/admin/{id}", get(products::get_by_id_admin))
        .route("/api/products/enable/{id}", patch(products::enable))
        .route(
            "/api/products/{id}",
            get(products::get_by_id)
                .put(products::update)
                .patch(products::disable),
        )
        .route("/api/orders", get(orders::list).post(orders::create))
        .route("/api/orders/{id}", get(orders::get_by_id))
        .route("/api/orders/{id}/status", put(orders::update_status))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
