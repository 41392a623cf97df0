//! User management handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::UserResponse;
use crate::errors::{AppError, AppResult};
use crate::services::UserUpdate;
use crate::types::{Created, NoContent};

/// User creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    /// Unique username (3-50 characters)
    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    #[schema(example = "bookkeeper")]
    pub username: String,
    /// Password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
    /// Role (e.g. "Admin")
    #[validate(length(min = 1, max = 20, message = "Role must be 1-20 characters"))]
    #[schema(example = "User")]
    pub role: String,
}

/// User replacement request; the id must match the path
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    /// User id, must equal the path id
    #[schema(example = 1)]
    pub id: i32,
    /// Unique username (3-50 characters)
    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    #[schema(example = "bookkeeper")]
    pub username: String,
    /// Role (e.g. "Admin")
    #[validate(length(min = 1, max = 20, message = "Role must be 1-20 characters"))]
    #[schema(example = "User")]
    pub role: String,
    /// New password; omitted to keep the current one
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "NewSecurePass123!")]
    pub password: Option<String>,
}

/// Create user management routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

/// List all users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses((status = 200, description = "All users", body = [UserResponse])),
    security(("bearer_auth" = []))
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.user_service.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Get a single user
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "The user", body = UserResponse),
        (status = 404, description = "Unknown user id")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.get_user(id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username already exists")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<Created<UserResponse>> {
    let user = state
        .user_service
        .create_user(payload.username, payload.password, payload.role)
        .await?;

    Ok(Created(UserResponse::from(user)))
}

/// Replace a user
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 204, description = "User updated"),
        (status = 400, description = "Validation error or id mismatch"),
        (status = 404, description = "Unknown user id"),
        (status = 409, description = "Username already exists")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<NoContent> {
    if id != payload.id {
        return Err(AppError::bad_request("Mismatched user id"));
    }

    state
        .user_service
        .update_user(
            id,
            UserUpdate {
                username: payload.username,
                role: payload.role,
                password: payload.password,
            },
        )
        .await?;

    Ok(NoContent)
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "Unknown user id")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state.user_service.delete_user(id).await?;
    Ok(NoContent)
}
