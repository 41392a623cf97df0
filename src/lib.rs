//! Accounting API - vendors, ledger entries and token-based authentication.
//!
//! A REST API for a small accounting ledger built with Axum and SeaORM.
//! Users authenticate with username/password and receive a signed JWT;
//! all ledger data is managed through standard CRUD endpoints.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and logic
//! - **services**: Application use cases and business logic
//! - **infra**: Infrastructure concerns (database, repositories)
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared response types
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server (runs migrations and seeds the admin user)
//! cargo run -- serve
//!
//! # Run migrations manually
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Password, PasswordVerdict, User};
pub use errors::{AppError, AppResult};
