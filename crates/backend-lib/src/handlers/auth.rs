// ============================
// crates/backend-lib/src/handlers/auth.rs
// ============================
//! Authentication HTTP handlers.
use axum::{extract::State, Json};
use std::sync::Arc;

use hrdesk_common::{
    LoginRequest, LoginResponse, RegisterRequest, TokenResponse, VerifyOtpRequest,
};

use crate::{error::AppError, AppState};

/// `POST /api/auth/register`
///
/// Creates the account and signs it straight in: the one-time code gate only
/// applies to subsequent logins.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let response = state
        .auth
        .register(&req.username, &req.email, req.password)
        .await?;
    Ok(Json(response))
}

/// `POST /api/auth/login`
///
/// Verifies credentials and issues a one-time code, delivered out-of-band.
/// The response tells the client to proceed to `verify-otp`; no token yet.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = state.auth.login(&req.email, &req.password).await?;
    Ok(Json(response))
}

/// `POST /api/auth/verify-otp`
///
/// Redeems the pending one-time code and mints the session token.
pub async fn verify_otp(
    State(state): State<Arc<AppState>>,
    Json(req): Json<VerifyOtpRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let response = state.auth.redeem(req.account_id, &req.code).await?;
    Ok(Json(response))
}

/// `GET /health`
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
