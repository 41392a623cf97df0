//! User domain entity and related types.

use serde::Serialize;
use utoipa::ToSchema;

/// User domain entity.
///
/// The role is a free-form string (e.g. "Admin") carried into the token
/// as a claim; it is not interpreted beyond that. Only ever built from
/// stored records, never deserialized from input.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
}

impl User {
    pub fn new(id: i32, username: String, password_hash: String, role: String) -> Self {
        Self {
            id,
            username,
            password_hash,
            role,
        }
    }
}

/// User response (safe to return to client; never carries the hash)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = 1)]
    pub id: i32,
    /// Unique username
    #[schema(example = "admin")]
    pub username: String,
    /// User role
    #[schema(example = "Admin")]
    pub role: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
        }
    }
}
