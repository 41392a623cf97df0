//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod ledger_entry;
pub mod user;
pub mod vendor;
