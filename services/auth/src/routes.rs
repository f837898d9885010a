//! Authentication service routes

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use crate::{
    AppState,
    error::AuthError,
    models::{LoginCredentials, NewUser},
    password::{hash_password, verify_password},
    validation::{validate_password, validate_username},
};

/// Response for token generation
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Create the router for the authentication service
pub fn create_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "auth-service"
    }))
}

/// Unwrap a JSON body, turning malformed or incomplete payloads into a 400
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AuthError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AuthError::BadRequest(rejection.body_text()))
}

/// User registration endpoint
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> Result<(StatusCode, Json<serde_json::Value>), AuthError> {
    let new_user = json_body(payload)?;

    validate_username(&new_user.username).map_err(AuthError::BadRequest)?;
    validate_password(&new_user.password).map_err(AuthError::BadRequest)?;

    if state
        .user_repository
        .find_by_username(&new_user.username)
        .await
        .inspect_err(|e| error!("Failed to look up user: {}", e))?
        .is_some()
    {
        return Err(AuthError::BadRequest("Username already exists".to_string()));
    }

    let password_hash = hash_password(&new_user.password).map_err(|e| {
        error!("{}", e);
        AuthError::InternalServerError
    })?;

    match state
        .user_repository
        .create(&new_user.username, &password_hash)
        .await
    {
        Ok(user) => {
            info!("Registered user {} ({})", user.username, user.id);
            Ok((
                StatusCode::CREATED,
                Json(serde_json::json!({"message": "User created successfully"})),
            ))
        }
        // Lost a race with a concurrent registration of the same name
        Err(e) if e.is_unique_violation() => {
            Err(AuthError::BadRequest("Username already exists".to_string()))
        }
        Err(e) => {
            error!("Failed to create user: {}", e);
            Err(e.into())
        }
    }
}

/// User login endpoint
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginCredentials>, JsonRejection>,
) -> Result<Json<TokenResponse>, AuthError> {
    let credentials = json_body(payload)?;

    if credentials.username.is_empty() || credentials.password.is_empty() {
        return Err(AuthError::BadRequest(
            "Username and password are required".to_string(),
        ));
    }

    info!("Login attempt for user: {}", credentials.username);

    if !state.rate_limiter.is_allowed(&credentials.username).await {
        return Err(AuthError::TooManyRequests);
    }

    let user = state
        .user_repository
        .find_by_username(&credentials.username)
        .await
        .inspect_err(|e| error!("Failed to look up user: {}", e))?
        .ok_or(AuthError::Unauthorized)?;

    let valid = verify_password(&user.password_hash, &credentials.password).map_err(|e| {
        error!("Stored hash for {} is unusable: {}", user.username, e);
        AuthError::InternalServerError
    })?;

    if !valid {
        warn!("Wrong password for user: {}", user.username);
        return Err(AuthError::Unauthorized);
    }

    state.rate_limiter.reset(&credentials.username).await;

    let access_token = state.tokens.issue(user.id, &user.username).map_err(|e| {
        error!("Failed to generate access token: {}", e);
        AuthError::InternalServerError
    })?;

    Ok(Json(TokenResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: state.tokens.access_token_expiry(),
    }))
}
