//! Product catalog endpoints
//!
//! Storefront reads are public and see active products only; the admin
//! variants see the whole catalog. All mutations are admin-gated. Deletion
//! is a soft `is_active` flip so historical order snapshots stay valid.

use axum::extract::{Path, State};
use axum::{Json, http::StatusCode};
use rust_decimal::Decimal;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Product, ProductCreate, ProductUpdate};
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::db;
use crate::state::AppState;

use super::ApiResult;

fn db_error(e: sqlx::Error) -> AppError {
    tracing::error!("product store error: {e}");
    AppError::new(ErrorCode::DatabaseError)
}

/// Shared field validation for create and update
fn validate_payload(
    sku: &str,
    name: &str,
    current_unit_price: Decimal,
    stock_quantity: i32,
) -> AppResult<()> {
    if sku.trim().is_empty() {
        return Err(AppError::validation("sku is required"));
    }
    if name.trim().is_empty() {
        return Err(AppError::validation("name is required"));
    }
    if current_unit_price <= Decimal::ZERO {
        return Err(AppError::new(ErrorCode::PriceNotPositive));
    }
    if stock_quantity < 0 {
        return Err(AppError::new(ErrorCode::StockNegative));
    }
    Ok(())
}

/// POST /api/products  (admin)
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<ProductCreate>,
) -> ApiResult<Product> {
    user.require_admin()?;
    validate_payload(&req.sku, &req.name, req.current_unit_price, req.stock_quantity)?;

    if db::products::sku_exists(&state.pool, &req.sku, None)
        .await
        .map_err(db_error)?
    {
        return Err(AppError::new(ErrorCode::SkuAlreadyExists));
    }

    let product = Product {
        id: Uuid::new_v4(),
        sku: req.sku,
        internal_code: req.internal_code,
        name: req.name,
        description: req.description,
        current_unit_price: req.current_unit_price,
        stock_quantity: req.stock_quantity,
        is_active: true,
    };
    db::products::insert(&state.pool, &product)
        .await
        .map_err(db_error)?;

    tracing::info!(product_id = %product.id, sku = %product.sku, "product created");

    Ok(Json(product))
}

/// GET /api/products - active catalog, public
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Product>> {
    let products = db::products::list_active(&state.pool)
        .await
        .map_err(db_error)?;
    Ok(Json(products))
}

/// GET /api/products/admin/all - full catalog including inactive (admin)
pub async fn list_all(State(state): State<AppState>, user: CurrentUser) -> ApiResult<Vec<Product>> {
    user.require_admin()?;
    let products = db::products::list_all(&state.pool).await.map_err(db_error)?;
    Ok(Json(products))
}

/// GET /api/products/:id - public, active products only
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Product> {
    let product = db::products::find_active_by_id(&state.pool, id)
        .await
        .map_err(db_error)?
        .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound))?;
    Ok(Json(product))
}

/// GET /api/products/admin/:id - any product (admin)
pub async fn get_by_id_admin(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Product> {
    user.require_admin()?;
    let product = db::products::find_by_id(&state.pool, id)
        .await
        .map_err(db_error)?
        .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound))?;
    Ok(Json(product))
}

/// PUT /api/products/:id  (admin)
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<ProductUpdate>,
) -> ApiResult<Product> {
    user.require_admin()?;
    validate_payload(&req.sku, &req.name, req.current_unit_price, req.stock_quantity)?;

    if db::products::sku_exists(&state.pool, &req.sku, Some(id))
        .await
        .map_err(db_error)?
    {
        return Err(AppError::new(ErrorCode::SkuAlreadyExists));
    }

    let existing = db::products::find_by_id(&state.pool, id)
        .await
        .map_err(db_error)?
        .filter(|p| p.is_active)
        .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound))?;

    let product = Product {
        id: existing.id,
        sku: req.sku,
        internal_code: req.internal_code,
        name: req.name,
        description: req.description,
        current_unit_price: req.current_unit_price,
        stock_quantity: req.stock_quantity,
        is_active: existing.is_active,
    };
    db::products::update(&state.pool, &product)
        .await
        .map_err(db_error)?;

    Ok(Json(product))
}

/// PATCH /api/products/:id - soft delete (admin)
pub async fn disable(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    user.require_admin()?;
    let found = db::products::set_active(&state.pool, id, false)
        .await
        .map_err(db_error)?;
    if !found {
        return Err(AppError::new(ErrorCode::ProductNotFound));
    }
    tracing::info!(product_id = %id, "product disabled");
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/products/enable/:id - restore (admin)
pub async fn enable(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    user.require_admin()?;
    let found = db::products::set_active(&state.pool, id, true)
        .await
        .map_err(db_error)?;
    if !found {
        return Err(AppError::new(ErrorCode::ProductNotFound));
    }
    tracing::info!(product_id = %id, "product enabled");
    Ok(StatusCode::NO_CONTENT)
}
