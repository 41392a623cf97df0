//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Authentication & Security
// =============================================================================

/// Default JWT token expiration in hours
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 1;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Seconds per hour (for token expiration calculation)
pub const SECONDS_PER_HOUR: i64 = 3600;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// JWT token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

// =============================================================================
// User Roles
// =============================================================================

/// Administrator role with elevated privileges
pub const ROLE_ADMIN: &str = "Admin";

// =============================================================================
// Seed Data
// =============================================================================

/// Username of the user seeded into an empty database
pub const SEED_ADMIN_USERNAME: &str = "admin";

/// Default password of the seeded admin user (change after first login)
pub const SEED_ADMIN_PASSWORD: &str = "password";

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement for stored users
pub const MIN_PASSWORD_LENGTH: u64 = 8;
