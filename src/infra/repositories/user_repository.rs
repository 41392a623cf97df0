//! User repository - Credential store access.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

use super::entities::user::{self, Entity as UserEntity};
use crate::domain::User;
use crate::errors::{AppError, AppResult};

/// Credential store interface.
///
/// `find_by_username` is the login path; the rest backs administrative
/// user CRUD. Username uniqueness is checked through `username_taken`
/// before any write.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>>;

    /// Find user by exact username match
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Check whether a username is already taken, optionally ignoring
    /// one user id (for updates)
    async fn username_taken(&self, username: &str, exclude_id: Option<i32>) -> AppResult<bool>;

    /// List all users
    async fn list(&self) -> AppResult<Vec<User>>;

    /// Count all users
    async fn count(&self) -> AppResult<u64>;

    /// Create a new user
    async fn create(&self, username: String, password_hash: String, role: String)
        -> AppResult<User>;

    /// Replace username/role and optionally the password hash
    async fn update(
        &self,
        id: i32,
        username: String,
        role: String,
        password_hash: Option<String>,
    ) -> AppResult<User>;

    /// Persist a new password hash only (rehash-on-verify path)
    async fn update_password_hash(&self, id: i32, password_hash: String) -> AppResult<()>;

    /// Delete user by ID
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// SeaORM-backed credential store.
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?;
        Ok(result.map(User::from))
    }

    async fn username_taken(&self, username: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let mut query = UserEntity::find().filter(user::Column::Username.eq(username));
        if let Some(id) = exclude_id {
            query = query.filter(user::Column::Id.ne(id));
        }
        Ok(query.count(&self.db).await? > 0)
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find().all(&self.db).await?;
        Ok(models.into_iter().map(User::from).collect())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(UserEntity::find().count(&self.db).await?)
    }

    async fn create(
        &self,
        username: String,
        password_hash: String,
        role: String,
    ) -> AppResult<User> {
        let active_model = user::ActiveModel {
            username: Set(username),
            password_hash: Set(password_hash),
            role: Set(role),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await?;
        Ok(User::from(model))
    }

    async fn update(
        &self,
        id: i32,
        username: String,
        role: String,
        password_hash: Option<String>,
    ) -> AppResult<User> {
        let model = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: user::ActiveModel = model.into();
        active.username = Set(username);
        active.role = Set(role);
        if let Some(hash) = password_hash {
            active.password_hash = Set(hash);
        }

        let model = active.update(&self.db).await?;
        Ok(User::from(model))
    }

    async fn update_password_hash(&self, id: i32, password_hash: String) -> AppResult<()> {
        let model = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: user::ActiveModel = model.into();
        active.password_hash = Set(password_hash);
        active.update(&self.db).await?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
