//! Startup seeding.
//!
//! Mirrors the deployment expectation that a fresh database comes up
//! with one admin account so the API is immediately usable.

use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set};

use crate::config::{ROLE_ADMIN, SEED_ADMIN_PASSWORD, SEED_ADMIN_USERNAME};
use crate::domain::Password;
use crate::errors::AppResult;
use crate::infra::repositories::entities::user;

/// Seed the default admin user if the users table is empty.
///
/// Runs once at startup after migrations. Idempotent: any existing user
/// (admin or otherwise) suppresses the seed.
pub async fn seed_admin_user(db: &DatabaseConnection) -> AppResult<()> {
    let count = user::Entity::find().count(db).await?;
    if count > 0 {
        return Ok(());
    }

    let password_hash = Password::new(SEED_ADMIN_PASSWORD)?.into_string();
    let admin = user::ActiveModel {
        username: Set(SEED_ADMIN_USERNAME.to_string()),
        password_hash: Set(password_hash),
        role: Set(ROLE_ADMIN.to_string()),
        ..Default::default()
    };
    admin.insert(db).await?;

    tracing::info!(
        username = SEED_ADMIN_USERNAME,
        "Seeded default admin user; change its password after first login"
    );
    Ok(())
}
