//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

pub(crate) mod entities;
mod ledger_repository;
mod user_repository;
mod vendor_repository;

pub use ledger_repository::{LedgerEntryFilter, LedgerEntryRepository, LedgerEntryStore};
pub use user_repository::{UserRepository, UserStore};
pub use vendor_repository::{VendorRepository, VendorStore};

// Export mocks for unit tests
#[cfg(test)]
pub use ledger_repository::MockLedgerEntryRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
#[cfg(test)]
pub use vendor_repository::MockVendorRepository;
