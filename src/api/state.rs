//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Database, LedgerEntryStore, UserStore, VendorStore};
use crate::services::{
    AuthService, Authenticator, LedgerEntryService, LedgerManager, UserManager, UserService,
    VendorManager, VendorService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Vendor service
    pub vendor_service: Arc<dyn VendorService>,
    /// Ledger entry service
    pub ledger_service: Arc<dyn LedgerEntryService>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let connection = database.get_connection();
        let users = Arc::new(UserStore::new(connection.clone()));
        let vendors = Arc::new(VendorStore::new(connection.clone()));
        let entries = Arc::new(LedgerEntryStore::new(connection));

        Self {
            auth_service: Arc::new(Authenticator::new(users.clone(), config)),
            user_service: Arc::new(UserManager::new(users)),
            vendor_service: Arc::new(VendorManager::new(vendors.clone())),
            ledger_service: Arc::new(LedgerManager::new(entries, vendors)),
            database,
        }
    }

    /// Create application state with manually injected services (tests).
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        vendor_service: Arc<dyn VendorService>,
        ledger_service: Arc<dyn LedgerEntryService>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            vendor_service,
            ledger_service,
            database,
        }
    }
}
