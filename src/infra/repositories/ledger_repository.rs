//! Ledger entry repository.

use async_trait::async_trait;
use chrono::{Days, NaiveDate, NaiveTime};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::ledger_entry::{self, Entity as LedgerEntryEntity};
use super::entities::vendor;
use crate::domain::{LedgerEntry, LedgerEntryData};
use crate::errors::{AppError, AppResult};

/// Optional list filters. Dates are inclusive calendar days.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerEntryFilter {
    pub vendor_id: Option<i32>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Ledger entry persistence interface.
///
/// Returned entries embed their owning vendor.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LedgerEntryRepository: Send + Sync {
    /// Find entry by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<LedgerEntry>>;

    /// List entries matching the filter
    async fn list(&self, filter: LedgerEntryFilter) -> AppResult<Vec<LedgerEntry>>;

    /// Create a new entry
    async fn create(&self, data: LedgerEntryData) -> AppResult<LedgerEntry>;

    /// Replace all entry fields
    async fn update(&self, id: i32, data: LedgerEntryData) -> AppResult<LedgerEntry>;

    /// Delete entry by ID
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// SeaORM-backed ledger entry store.
pub struct LedgerEntryStore {
    db: DatabaseConnection,
}

impl LedgerEntryStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LedgerEntryRepository for LedgerEntryStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<LedgerEntry>> {
        let result = LedgerEntryEntity::find_by_id(id)
            .find_also_related(vendor::Entity)
            .one(&self.db)
            .await?;

        Ok(result.map(|(entry, vendor)| entry.into_domain(vendor)))
    }

    async fn list(&self, filter: LedgerEntryFilter) -> AppResult<Vec<LedgerEntry>> {
        let mut query = LedgerEntryEntity::find().find_also_related(vendor::Entity);

        if let Some(vendor_id) = filter.vendor_id {
            query = query.filter(ledger_entry::Column::VendorId.eq(vendor_id));
        }
        if let Some(from) = filter.from {
            let start = from.and_time(NaiveTime::MIN).and_utc();
            query = query.filter(ledger_entry::Column::Date.gte(start));
        }
        if let Some(to) = filter.to {
            // Inclusive upper bound: anything before the following midnight
            let end = to
                .checked_add_days(Days::new(1))
                .unwrap_or(to)
                .and_time(NaiveTime::MIN)
                .and_utc();
            query = query.filter(ledger_entry::Column::Date.lt(end));
        }

        let models = query
            .order_by_asc(ledger_entry::Column::Date)
            .all(&self.db)
            .await?;

        Ok(models
            .into_iter()
            .map(|(entry, vendor)| entry.into_domain(vendor))
            .collect())
    }

    async fn create(&self, data: LedgerEntryData) -> AppResult<LedgerEntry> {
        let active_model = ledger_entry::ActiveModel {
            vendor_id: Set(data.vendor_id),
            amount: Set(data.amount),
            entry_type: Set(data.entry_type.into()),
            date: Set(data.date),
            description: Set(data.description),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await?;

        // Load the vendor navigation so the response embeds it
        let vendor = vendor::Entity::find_by_id(model.vendor_id)
            .one(&self.db)
            .await?;

        Ok(model.into_domain(vendor))
    }

    async fn update(&self, id: i32, data: LedgerEntryData) -> AppResult<LedgerEntry> {
        let model = LedgerEntryEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ledger_entry::ActiveModel = model.into();
        active.vendor_id = Set(data.vendor_id);
        active.amount = Set(data.amount);
        active.entry_type = Set(data.entry_type.into());
        active.date = Set(data.date);
        active.description = Set(data.description);

        let model = active.update(&self.db).await?;
        let vendor = vendor::Entity::find_by_id(model.vendor_id)
            .one(&self.db)
            .await?;

        Ok(model.into_domain(vendor))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = LedgerEntryEntity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
