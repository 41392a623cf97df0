//! Vendor repository.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set};

use super::entities::vendor::{self, Entity as VendorEntity};
use crate::domain::{Vendor, VendorData};
use crate::errors::{AppError, AppResult};

/// Vendor persistence interface.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VendorRepository: Send + Sync {
    /// Find vendor by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Vendor>>;

    /// Check whether a vendor exists (referential check for entries)
    async fn exists(&self, id: i32) -> AppResult<bool>;

    /// List all vendors
    async fn list(&self) -> AppResult<Vec<Vendor>>;

    /// Create a new vendor
    async fn create(&self, data: VendorData) -> AppResult<Vendor>;

    /// Replace all vendor fields
    async fn update(&self, id: i32, data: VendorData) -> AppResult<Vendor>;

    /// Delete vendor by ID (cascades to its ledger entries)
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// SeaORM-backed vendor store.
pub struct VendorStore {
    db: DatabaseConnection,
}

impl VendorStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl VendorRepository for VendorStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Vendor>> {
        let result = VendorEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Vendor::from))
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        Ok(VendorEntity::find_by_id(id).count(&self.db).await? > 0)
    }

    async fn list(&self) -> AppResult<Vec<Vendor>> {
        let models = VendorEntity::find().all(&self.db).await?;
        Ok(models.into_iter().map(Vendor::from).collect())
    }

    async fn create(&self, data: VendorData) -> AppResult<Vendor> {
        let active_model = vendor::ActiveModel {
            name: Set(data.name),
            address: Set(data.address),
            phone: Set(data.phone),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await?;
        Ok(Vendor::from(model))
    }

    async fn update(&self, id: i32, data: VendorData) -> AppResult<Vendor> {
        // Re-check existence so a concurrent delete surfaces as 404
        // rather than a bare database error.
        let model = VendorEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: vendor::ActiveModel = model.into();
        active.name = Set(data.name);
        active.address = Set(data.address);
        active.phone = Set(data.phone);

        let model = active.update(&self.db).await?;
        Ok(Vendor::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = VendorEntity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
