//! Order endpoints: checkout, listing, detail, status updates

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{OrderCreate, OrderPage, OrderSummary, UpdateOrderStatus};
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::db;
use crate::orders::{self, OrderFilter};
use crate::state::AppState;

use super::ApiResult;

/// POST /api/orders - storefront checkout, no auth required
///
/// The purchaser arrives either as a resolved `customer_id` or as a
/// `customer_name` that is looked up and lazily created here, before the
/// order engine runs.
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<OrderCreate>,
) -> ApiResult<OrderSummary> {
    if req.shipping_address.trim().is_empty() {
        return Err(AppError::validation("shipping address is required"));
    }
    if req.billing_address.trim().is_empty() {
        return Err(AppError::validation("billing address is required"));
    }

    let customer_id = match (req.customer_id, req.customer_name.as_deref()) {
        (Some(id), _) => id,
        (None, Some(name)) if !name.trim().is_empty() => {
            db::customers::resolve_or_create(&state.pool, name.trim())
                .await
                .map_err(|e| {
                    tracing::error!("customer resolution error: {e}");
                    AppError::new(ErrorCode::DatabaseError)
                })?
                .id
        }
        _ => {
            return Err(AppError::validation(
                "customer_id or customer_name is required",
            ));
        }
    };

    let summary = orders::create_order(
        &state.pool,
        customer_id,
        req.shipping_address.trim(),
        req.billing_address.trim(),
        &req.items,
    )
    .await?;

    Ok(Json(summary))
}

/// GET /api/orders
#[derive(Deserialize)]
pub struct OrdersQuery {
    pub status: Option<String>,
    pub customer_id: Option<Uuid>,
    #[serde(default = "default_page_number")]
    pub page_number: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

fn default_page_number() -> i64 {
    1
}

fn default_page_size() -> i64 {
    10
}

pub async fn list(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(query): Query<OrdersQuery>,
) -> ApiResult<OrderPage> {
    let filter = OrderFilter {
        status: query.status,
        customer_id: query.customer_id,
        page_number: query.page_number,
        page_size: query.page_size,
    };
    let page = orders::list_orders(&state.pool, &filter).await?;
    Ok(Json(page))
}

/// GET /api/orders/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<OrderSummary> {
    let summary = orders::get_order(&state.pool, id).await?;
    Ok(Json(summary))
}

/// PUT /api/orders/:id/status  (admin)
pub async fn update_status(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateOrderStatus>,
) -> ApiResult<OrderSummary> {
    user.require_admin()?;
    let summary =
        orders::update_status(&state.pool, id, &req.new_status, state.restock_on_cancel).await?;
    Ok(Json(summary))
}
