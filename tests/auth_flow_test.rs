//! Authentication flow tests.
//!
//! Exercise the authenticator against a stateful in-memory credential
//! store, in particular the transparent hash upgrade on login.

use std::sync::{Arc, Mutex};

use argon2::password_hash::{rand_core::OsRng, PasswordHasher, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use async_trait::async_trait;

use accounting_api::config::Config;
use accounting_api::domain::{Password, PasswordVerdict, User};
use accounting_api::errors::{AppError, AppResult};
use accounting_api::infra::UserRepository;
use accounting_api::services::{AuthService, Authenticator};

const TEST_SECRET: &str = "test-secret-key-for-testing-only-32chars";

/// Single-user store that records every hash replacement
struct RecordingStore {
    user: Mutex<User>,
    rehash_count: Mutex<u32>,
}

impl RecordingStore {
    fn new(user: User) -> Self {
        Self {
            user: Mutex::new(user),
            rehash_count: Mutex::new(0),
        }
    }

    fn current_hash(&self) -> String {
        self.user.lock().unwrap().password_hash.clone()
    }

    fn rehashes(&self) -> u32 {
        *self.rehash_count.lock().unwrap()
    }
}

#[async_trait]
impl UserRepository for RecordingStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let user = self.user.lock().unwrap().clone();
        Ok((user.id == id).then_some(user))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let user = self.user.lock().unwrap().clone();
        Ok((user.username == username).then_some(user))
    }

    async fn username_taken(&self, username: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let user = self.user.lock().unwrap();
        Ok(user.username == username && Some(user.id) != exclude_id)
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        Ok(vec![self.user.lock().unwrap().clone()])
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(1)
    }

    async fn create(
        &self,
        _username: String,
        _password_hash: String,
        _role: String,
    ) -> AppResult<User> {
        Err(AppError::internal("not supported"))
    }

    async fn update(
        &self,
        _id: i32,
        _username: String,
        _role: String,
        _password_hash: Option<String>,
    ) -> AppResult<User> {
        Err(AppError::internal("not supported"))
    }

    async fn update_password_hash(&self, id: i32, password_hash: String) -> AppResult<()> {
        let mut user = self.user.lock().unwrap();
        if user.id != id {
            return Err(AppError::NotFound);
        }
        user.password_hash = password_hash;
        *self.rehash_count.lock().unwrap() += 1;
        Ok(())
    }

    async fn delete(&self, _id: i32) -> AppResult<()> {
        Err(AppError::internal("not supported"))
    }
}

/// Hash a password with deliberately low-cost legacy parameters
fn legacy_hash(password: &str) -> String {
    let weak = Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(4096, 1, 1, None).unwrap(),
    );
    let salt = SaltString::generate(&mut OsRng);
    weak.hash_password(password.as_bytes(), &salt)
        .unwrap()
        .to_string()
}

fn test_config() -> Config {
    Config::with_values("postgres://unused", TEST_SECRET)
}

#[tokio::test]
async fn login_upgrades_a_legacy_hash_exactly_once() {
    let store = Arc::new(RecordingStore::new(User::new(
        1,
        "admin".to_string(),
        legacy_hash("password"),
        "Admin".to_string(),
    )));
    let old_hash = store.current_hash();
    let auth = Authenticator::new(store.clone(), test_config());

    // First login matches against the legacy hash and replaces it
    auth.login("admin".to_string(), "password".to_string())
        .await
        .unwrap();
    assert_eq!(store.rehashes(), 1);
    let new_hash = store.current_hash();
    assert_ne!(new_hash, old_hash);

    // The stored hash now verifies cleanly under current parameters
    assert_eq!(
        Password::from_hash(new_hash).verify("password"),
        PasswordVerdict::Match
    );

    // A second login leaves the hash alone
    auth.login("admin".to_string(), "password".to_string())
        .await
        .unwrap();
    assert_eq!(store.rehashes(), 1);
}

#[tokio::test]
async fn failed_login_never_touches_the_stored_hash() {
    let store = Arc::new(RecordingStore::new(User::new(
        1,
        "admin".to_string(),
        legacy_hash("password"),
        "Admin".to_string(),
    )));
    let auth = Authenticator::new(store.clone(), test_config());

    let result = auth.login("admin".to_string(), "wrong".to_string()).await;
    assert!(matches!(result.unwrap_err(), AppError::InvalidCredentials));
    assert_eq!(store.rehashes(), 0);
}

#[tokio::test]
async fn issued_token_carries_the_user_identity() {
    let hash = Password::new("password").unwrap().into_string();
    let store = Arc::new(RecordingStore::new(User::new(
        7,
        "bookkeeper".to_string(),
        hash,
        "User".to_string(),
    )));
    let auth = Authenticator::new(store, test_config());

    let response = auth
        .login("bookkeeper".to_string(), "password".to_string())
        .await
        .unwrap();
    let claims = auth.verify_token(&response.token).unwrap();

    assert_eq!(claims.sub, "bookkeeper");
    assert_eq!(claims.role, "User");
    assert_eq!(claims.exp - claims.iat, 3600);
}
