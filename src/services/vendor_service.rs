//! Vendor service - vendor CRUD use cases.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Vendor, VendorData};
use crate::errors::{AppResult, OptionExt};
use crate::infra::VendorRepository;

/// Vendor service trait for dependency injection.
#[async_trait]
pub trait VendorService: Send + Sync {
    /// Get vendor by ID
    async fn get_vendor(&self, id: i32) -> AppResult<Vendor>;

    /// List all vendors
    async fn list_vendors(&self) -> AppResult<Vec<Vendor>>;

    /// Create a new vendor
    async fn create_vendor(&self, data: VendorData) -> AppResult<Vendor>;

    /// Replace all vendor fields
    async fn update_vendor(&self, id: i32, data: VendorData) -> AppResult<Vendor>;

    /// Delete vendor and its entries
    async fn delete_vendor(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of VendorService.
pub struct VendorManager {
    vendors: Arc<dyn VendorRepository>,
}

impl VendorManager {
    pub fn new(vendors: Arc<dyn VendorRepository>) -> Self {
        Self { vendors }
    }
}

#[async_trait]
impl VendorService for VendorManager {
    async fn get_vendor(&self, id: i32) -> AppResult<Vendor> {
        self.vendors.find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_vendors(&self) -> AppResult<Vec<Vendor>> {
        self.vendors.list().await
    }

    async fn create_vendor(&self, data: VendorData) -> AppResult<Vendor> {
        self.vendors.create(data).await
    }

    async fn update_vendor(&self, id: i32, data: VendorData) -> AppResult<Vendor> {
        self.vendors.update(id, data).await
    }

    async fn delete_vendor(&self, id: i32) -> AppResult<()> {
        self.vendors.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::infra::repositories::MockVendorRepository;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn get_missing_vendor_is_not_found() {
        let mut repo = MockVendorRepository::new();
        repo.expect_find_by_id().with(eq(7)).returning(|_| Ok(None));

        let service = VendorManager::new(Arc::new(repo));
        let result = service.get_vendor(7).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound));
    }

    #[tokio::test]
    async fn create_passes_fields_through() {
        let mut repo = MockVendorRepository::new();
        repo.expect_create().returning(|data| {
            Ok(Vendor {
                id: 1,
                name: data.name,
                address: data.address,
                phone: data.phone,
            })
        });

        let service = VendorManager::new(Arc::new(repo));
        let vendor = service
            .create_vendor(VendorData {
                name: "Acme Supplies".to_string(),
                address: "1 Main St".to_string(),
                phone: "555-0100".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(vendor.id, 1);
        assert_eq!(vendor.name, "Acme Supplies");
    }
}
