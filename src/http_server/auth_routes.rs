//! Auth HTTP Routes
//!
//! Registration, login and token verification.

use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::{HeaderMap, StatusCode},
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};

use super::errors::{bearer_token, ErrorResponse};
use crate::app::App;
use crate::auth::{LoginRequest, LoginResponse, RegisterRequest, TokenClaims};

/// Auth routes with shared state
pub fn auth_routes(state: Arc<App>) -> Router {
    Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .route("/verify", post(verify_handler))
        .with_state(state)
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    #[serde(rename = "userName")]
    pub user_name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct VerifyRequest {
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub valid: bool,
    pub user: TokenClaims,
}

// ==================
// Handlers
// ==================

async fn register_handler(
    State(state): State<Arc<App>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ErrorResponse> {
    let user = state.auth.register(request)?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user_name: user.user_name,
        }),
    ))
}

async fn login_handler(
    State(state): State<Arc<App>>,
    Json(request): Json<LoginRequest>,
) -> Result<(StatusCode, Json<LoginResponse>), ErrorResponse> {
    let response = state.auth.login(request)?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Token from the JSON body, or the Authorization header when the body has none
async fn verify_handler(
    State(state): State<Arc<App>>,
    headers: HeaderMap,
    body: Option<Json<VerifyRequest>>,
) -> Result<Json<VerifyResponse>, ErrorResponse> {
    let from_body = body.and_then(|Json(req)| req.token).filter(|t| !t.is_empty());
    let token = match &from_body {
        Some(t) => t.as_str(),
        None => bearer_token(&headers)?,
    };

    let claims = state.auth.verify(token)?;
    Ok(Json(VerifyResponse {
        valid: true,
        user: claims,
    }))
}
