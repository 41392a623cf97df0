//! Ledger entry service - entry CRUD with referential checks.
//!
//! Entries must always reference an existing vendor; the check happens
//! here so the failure surfaces as a documented 400 rather than a raw
//! foreign-key error.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{LedgerEntry, LedgerEntryData};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{LedgerEntryFilter, LedgerEntryRepository, VendorRepository};

/// Ledger entry service trait for dependency injection.
#[async_trait]
pub trait LedgerEntryService: Send + Sync {
    /// Get entry by ID
    async fn get_entry(&self, id: i32) -> AppResult<LedgerEntry>;

    /// List entries matching the filter
    async fn list_entries(&self, filter: LedgerEntryFilter) -> AppResult<Vec<LedgerEntry>>;

    /// Create a new entry; the vendor must exist
    async fn create_entry(&self, data: LedgerEntryData) -> AppResult<LedgerEntry>;

    /// Replace all entry fields; the vendor must exist
    async fn update_entry(&self, id: i32, data: LedgerEntryData) -> AppResult<LedgerEntry>;

    /// Delete entry by ID
    async fn delete_entry(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of LedgerEntryService.
pub struct LedgerManager {
    entries: Arc<dyn LedgerEntryRepository>,
    vendors: Arc<dyn VendorRepository>,
}

impl LedgerManager {
    pub fn new(entries: Arc<dyn LedgerEntryRepository>, vendors: Arc<dyn VendorRepository>) -> Self {
        Self { entries, vendors }
    }

    async fn ensure_vendor_exists(&self, vendor_id: i32) -> AppResult<()> {
        if !self.vendors.exists(vendor_id).await? {
            return Err(AppError::bad_request("Vendor does not exist"));
        }
        Ok(())
    }
}

#[async_trait]
impl LedgerEntryService for LedgerManager {
    async fn get_entry(&self, id: i32) -> AppResult<LedgerEntry> {
        self.entries.find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_entries(&self, filter: LedgerEntryFilter) -> AppResult<Vec<LedgerEntry>> {
        self.entries.list(filter).await
    }

    async fn create_entry(&self, data: LedgerEntryData) -> AppResult<LedgerEntry> {
        self.ensure_vendor_exists(data.vendor_id).await?;
        self.entries.create(data).await
    }

    async fn update_entry(&self, id: i32, data: LedgerEntryData) -> AppResult<LedgerEntry> {
        self.ensure_vendor_exists(data.vendor_id).await?;
        self.entries.update(id, data).await
    }

    async fn delete_entry(&self, id: i32) -> AppResult<()> {
        self.entries.delete(id).await
    }
}
