//! Bearer token authentication for the `/api` routes

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use common::token::TokenService;
use tracing::warn;
use uuid::Uuid;

use crate::{error::ApiError, state::AppState};

/// Authenticated user information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
    pub username: String,
}

/// Resolve the caller from a bearer token
pub fn authenticate(tokens: &TokenService, token: Option<&str>) -> Result<AuthUser, ApiError> {
    let token = token.ok_or(ApiError::Unauthorized)?;

    let claims = tokens.verify(token).map_err(|e| {
        warn!("Rejected access token: {}", e);
        ApiError::Unauthorized
    })?;

    Ok(AuthUser {
        id: claims.sub,
        username: claims.username,
    })
}

/// Authentication middleware; stores the [`AuthUser`] as a request extension
pub async fn auth_middleware(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer.as_ref().map(|TypedHeader(auth)| auth.token());
    let user = authenticate(&state.tokens, token)?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
