//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod ledger;
pub mod password;
pub mod user;
pub mod vendor;

pub use ledger::{EntryType, LedgerEntry, LedgerEntryData};
pub use password::{Password, PasswordVerdict};
pub use user::{User, UserResponse};
pub use vendor::{Vendor, VendorData};
