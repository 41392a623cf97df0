//! Authentication service - login orchestration and token handling.
//!
//! Single pass per login attempt: validate input, look up the user,
//! verify the password, opportunistically upgrade outdated hashes, mint
//! a token. No state is kept between attempts.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{Password, PasswordVerdict, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;

/// Syntactically valid Argon2id hash that matches no password.
///
/// Verified against when the username does not exist so a miss costs
/// roughly the same as a wrong password and usernames cannot be
/// enumerated by timing.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$gZiV3M1gPc22ElAH3Jh1Hw$CWOrkoo7oJBQ1iyh7uJ0LO2aLEfrHwTWllSAxT0zRno";

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the authenticated username
    pub sub: String,
    /// Role claim carried verbatim from the user record
    pub role: String,
    /// Absolute expiry (unix seconds); fixed at issuance
    pub exp: i64,
    /// Issued-at (unix seconds)
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    /// Signed JWT bearer token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token lifetime in seconds
    #[schema(example = 3600)]
    pub expires_in: i64,
    /// Echoed username
    #[schema(example = "admin")]
    pub username: String,
    /// Echoed role
    #[schema(example = "Admin")]
    pub role: String,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Verify credentials and return a signed token
    async fn login(&self, username: String, password: String) -> AppResult<TokenResponse>;

    /// Verify a JWT and extract its claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Generate a JWT for a user (shared helper to avoid duplication)
fn generate_token(user: &User, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: user.username.clone(),
        role: user.role.clone(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
        username: user.username.clone(),
        role: user.role.clone(),
    })
}

/// Verify a JWT and extract claims (shared helper)
fn verify_token_internal(token: &str, config: &Config) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

/// Concrete implementation of AuthService over the credential store.
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    config: Config,
}

impl Authenticator {
    /// Create new auth service instance
    pub fn new(users: Arc<dyn UserRepository>, config: Config) -> Self {
        Self { users, config }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn login(&self, username: String, password: String) -> AppResult<TokenResponse> {
        let username = username.trim();
        if username.is_empty() || password.trim().is_empty() {
            return Err(AppError::validation("Username and password are required"));
        }

        let user = self.users.find_by_username(username).await?;

        // Verify against a dummy hash when the user does not exist so
        // both failure paths take comparable time.
        let stored = match &user {
            Some(user) => Password::from_hash(user.password_hash.clone()),
            None => Password::from_hash(DUMMY_HASH.to_string()),
        };

        let verdict = stored.verify(&password);

        let user = match user {
            Some(user) if verdict.is_match() => user,
            // One generic error for unknown user and wrong password
            _ => return Err(AppError::InvalidCredentials),
        };

        if verdict == PasswordVerdict::MatchNeedsRehash {
            // Upgrade the stored hash to current parameters. Failure is
            // logged but must not fail an otherwise valid login.
            match Password::rehash(&password) {
                Ok(upgraded) => {
                    if let Err(e) = self
                        .users
                        .update_password_hash(user.id, upgraded.into_string())
                        .await
                    {
                        tracing::warn!(user_id = user.id, "Failed to persist rehashed password: {}", e);
                    } else {
                        tracing::debug!(user_id = user.id, "Upgraded password hash parameters");
                    }
                }
                Err(e) => {
                    tracing::warn!(user_id = user.id, "Password rehash failed: {}", e);
                }
            }
        }

        generate_token(&user, &self.config)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        verify_token_internal(token, &self.config)
    }
}
