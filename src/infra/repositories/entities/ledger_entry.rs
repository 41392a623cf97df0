//! Ledger entry table entity.

use sea_orm::entity::prelude::*;

/// Entry type stored as its display string ("Credit" / "Debit").
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum EntryType {
    #[sea_orm(string_value = "Credit")]
    Credit,
    #[sea_orm(string_value = "Debit")]
    Debit,
}

impl From<crate::domain::EntryType> for EntryType {
    fn from(value: crate::domain::EntryType) -> Self {
        match value {
            crate::domain::EntryType::Credit => EntryType::Credit,
            crate::domain::EntryType::Debit => EntryType::Debit,
        }
    }
}

impl From<EntryType> for crate::domain::EntryType {
    fn from(value: EntryType) -> Self {
        match value {
            EntryType::Credit => crate::domain::EntryType::Credit,
            EntryType::Debit => crate::domain::EntryType::Debit,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "ledger_entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub vendor_id: i32,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub amount: Decimal,
    pub entry_type: EntryType,
    pub date: DateTimeUtc,
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::vendor::Entity",
        from = "Column::VendorId",
        to = "super::vendor::Column::Id",
        on_delete = "Cascade"
    )]
    Vendor,
}

impl Related<super::vendor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vendor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert to the domain entity, optionally embedding the vendor.
    pub fn into_domain(
        self,
        vendor: Option<super::vendor::Model>,
    ) -> crate::domain::LedgerEntry {
        crate::domain::LedgerEntry {
            id: self.id,
            vendor_id: self.vendor_id,
            amount: self.amount,
            entry_type: self.entry_type.into(),
            date: self.date,
            description: self.description,
            vendor: vendor.map(Into::into),
        }
    }
}
