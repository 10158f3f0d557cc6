//! Authentication endpoints: login, register

use axum::{Json, extract::State};
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use uuid::Uuid;

use crate::auth::jwt;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::store::User;
use crate::auth::{ROLE_ADMIN, ROLE_CUSTOMER};
use crate::state::AppState;

use super::ApiResult;

const MIN_PASSWORD_LEN: usize = 8;

/// POST /api/auth/login
#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(serde::Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub role: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let user = state
        .users
        .find_by_username(req.username.trim())
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    if !verify_password(&req.password, &user.hashed_password) {
        return Err(AppError::invalid_credentials());
    }

    let token = jwt::create_token(user.id, &user.username, &user.role, &state.jwt_secret)
        .map_err(|e| {
            tracing::error!("JWT creation failed: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;

    tracing::info!(username = %user.username, role = %user.role, "login");

    Ok(Json(LoginResponse {
        token,
        role: user.role,
    }))
}

/// POST /api/auth/register
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<LoginResponse> {
    let username = req.username.trim().to_string();
    let email = req.email.trim().to_lowercase();

    if req.role != ROLE_ADMIN && req.role != ROLE_CUSTOMER {
        return Err(AppError::new(ErrorCode::InvalidRole));
    }
    if username.is_empty() {
        return Err(AppError::validation("username is required"));
    }
    if email.is_empty() {
        return Err(AppError::validation("email is required"));
    }
    if req.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    if state.users.find_by_username(&username).await?.is_some() {
        return Err(AppError::new(ErrorCode::UsernameTaken));
    }
    if state.users.find_by_email(&email).await?.is_some() {
        return Err(AppError::new(ErrorCode::EmailTaken));
    }

    let hashed_password = hash_password(&req.password).map_err(|e| {
        tracing::error!("password hashing failed: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    let user = User {
        id: Uuid::new_v4(),
        username,
        email,
        hashed_password,
        role: req.role,
    };
    state.users.insert(user.clone()).await?;

    let token = jwt::create_token(user.id, &user.username, &user.role, &state.jwt_secret)
        .map_err(|e| {
            tracing::error!("JWT creation failed: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;

    tracing::info!(username = %user.username, role = %user.role, "user registered");

    Ok(Json(LoginResponse {
        token,
        role: user.role,
    }))
}
