//! Authentication handlers.

use axum::{extract::State, response::Json, routing::post, Router};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::api::AppState;
use crate::errors::AppResult;
use crate::services::TokenResponse;

/// Login request.
///
/// Emptiness (after trimming) is checked by the service so the same
/// generic message covers every malformed-credentials case.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Username
    #[schema(example = "admin")]
    pub username: String,
    /// Password
    #[schema(example = "password")]
    pub password: String,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Login and get a signed bearer token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Missing or invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let token = state
        .auth_service
        .login(payload.username, payload.password)
        .await?;

    Ok(Json(token))
}
