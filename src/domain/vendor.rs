//! Vendor domain entity.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A vendor that ledger entries are attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    /// Unique vendor identifier
    #[schema(example = 1)]
    pub id: i32,
    /// Vendor display name
    #[schema(example = "Acme Supplies")]
    pub name: String,
    /// Postal address
    #[schema(example = "1 Main St")]
    pub address: String,
    /// Contact phone number
    #[schema(example = "555-0100")]
    pub phone: String,
}

/// Vendor fields without an identity, used for create and full update.
#[derive(Debug, Clone)]
pub struct VendorData {
    pub name: String,
    pub address: String,
    pub phone: String,
}
