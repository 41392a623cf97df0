//! User service - administrative credential management.
//!
//! Username uniqueness is enforced here on both create and update;
//! plaintext passwords never travel past this layer.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Password, User};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UserRepository;

/// Fields accepted when replacing a user.
#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub username: String,
    pub role: String,
    /// When set, the password is re-hashed and replaced
    pub password: Option<String>,
}

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get user by ID
    async fn get_user(&self, id: i32) -> AppResult<User>;

    /// List all users
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Create a user with a hashed password
    async fn create_user(&self, username: String, password: String, role: String)
        -> AppResult<User>;

    /// Replace user details
    async fn update_user(&self, id: i32, update: UserUpdate) -> AppResult<User>;

    /// Delete user by ID
    async fn delete_user(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of UserService over the credential store.
pub struct UserManager {
    users: Arc<dyn UserRepository>,
}

impl UserManager {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn get_user(&self, id: i32) -> AppResult<User> {
        self.users.find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.users.list().await
    }

    async fn create_user(
        &self,
        username: String,
        password: String,
        role: String,
    ) -> AppResult<User> {
        if self.users.username_taken(&username, None).await? {
            return Err(AppError::conflict("Username"));
        }

        let password_hash = Password::new(&password)?.into_string();
        self.users.create(username, password_hash, role).await
    }

    async fn update_user(&self, id: i32, update: UserUpdate) -> AppResult<User> {
        // Existence first so a stale update reads as 404, not 409
        if self.users.find_by_id(id).await?.is_none() {
            return Err(AppError::NotFound);
        }

        if self.users.username_taken(&update.username, Some(id)).await? {
            return Err(AppError::conflict("Username"));
        }

        let password_hash = match update.password {
            Some(password) => Some(Password::new(&password)?.into_string()),
            None => None,
        };

        self.users
            .update(id, update.username, update.role, password_hash)
            .await
    }

    async fn delete_user(&self, id: i32) -> AppResult<()> {
        self.users.delete(id).await
    }
}
