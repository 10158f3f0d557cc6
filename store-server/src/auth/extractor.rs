//! Axum extractor for [`CurrentUser`]
//!
//! Protected handlers take `user: CurrentUser` as an argument; the value is
//! normally placed in request extensions by the auth middleware. As a
//! fallback the extractor validates the bearer header itself, so handlers
//! stay correct even if mounted outside the middleware stack.

use axum::{extract::FromRequestParts, http::request::Parts};
use jsonwebtoken::errors::ErrorKind;
use shared::error::AppError;

use crate::auth::jwt;
use crate::auth::middleware::CurrentUser;
use crate::state::AppState;

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Already extracted by the middleware
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let auth_header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(AppError::not_authenticated)?;

        let token = jwt::extract_bearer(auth_header)
            .ok_or_else(|| AppError::invalid_token("invalid authorization header"))?;

        let claims = jwt::decode_token(token, &state.jwt_secret).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AppError::token_expired(),
            _ => AppError::invalid_token("invalid or expired token"),
        })?;

        let user = CurrentUser::try_from(claims)?;
        parts.extensions.insert(user.clone());

        Ok(user)
    }
}
