//! Ledger entry domain entity.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::vendor::Vendor;

/// Whether an entry credits or debits the vendor's balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum EntryType {
    Credit,
    Debit,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Credit => "Credit",
            EntryType::Debit => "Debit",
        }
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Credit" => Ok(EntryType::Credit),
            "Debit" => Ok(EntryType::Debit),
            other => Err(format!("Unknown entry type: {}", other)),
        }
    }
}

/// A single credit/debit record attributed to a vendor.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    /// Unique entry identifier
    #[schema(example = 1)]
    pub id: i32,
    /// Owning vendor id
    #[schema(example = 1)]
    pub vendor_id: i32,
    /// Positive monetary amount
    #[schema(value_type = f64, example = 199.95)]
    pub amount: Decimal,
    /// Credit or Debit
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    /// Entry timestamp
    pub date: DateTime<Utc>,
    /// Free-form description
    #[schema(example = "Office chairs")]
    pub description: String,
    /// Owning vendor, embedded when loaded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<Vendor>,
}

/// Entry fields without an identity, used for create and full update.
#[derive(Debug, Clone)]
pub struct LedgerEntryData {
    pub vendor_id: i32,
    pub amount: Decimal,
    pub entry_type: EntryType,
    pub date: DateTime<Utc>,
    pub description: String,
}
