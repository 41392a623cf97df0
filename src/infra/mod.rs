//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and migrations
//! - Repositories over the SeaORM entities
//! - Startup seeding

pub mod db;
pub mod repositories;

pub use db::{seed_admin_user, Database, Migrator};
pub use repositories::{
    LedgerEntryFilter, LedgerEntryRepository, LedgerEntryStore, UserRepository, UserStore,
    VendorRepository, VendorStore,
};
