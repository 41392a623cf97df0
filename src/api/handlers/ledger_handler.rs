//! Ledger entry handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{EntryType, LedgerEntry, LedgerEntryData};
use crate::errors::{AppError, AppResult};
use crate::infra::LedgerEntryFilter;
use crate::types::{Created, NoContent};

/// Ledger entry creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntryRequest {
    /// Owning vendor id; must reference an existing vendor
    #[schema(example = 1)]
    pub vendor_id: i32,
    /// Positive monetary amount
    #[validate(custom(function = validate_amount, message = "Amount must be greater than zero"))]
    #[schema(value_type = f64, example = 199.95)]
    pub amount: Decimal,
    /// Credit or Debit
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    /// Entry timestamp
    pub date: DateTime<Utc>,
    /// Free-form description (max 200 characters)
    #[serde(default)]
    #[validate(length(max = 200, message = "Description must be at most 200 characters"))]
    #[schema(example = "Office chairs")]
    pub description: String,
}

/// Ledger entry replacement request; the id must match the path
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEntryRequest {
    /// Entry id, must equal the path id
    #[schema(example = 1)]
    pub id: i32,
    /// Owning vendor id; must reference an existing vendor
    #[schema(example = 1)]
    pub vendor_id: i32,
    /// Positive monetary amount
    #[validate(custom(function = validate_amount, message = "Amount must be greater than zero"))]
    #[schema(value_type = f64, example = 199.95)]
    pub amount: Decimal,
    /// Credit or Debit
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    /// Entry timestamp
    pub date: DateTime<Utc>,
    /// Free-form description (max 200 characters)
    #[serde(default)]
    #[validate(length(max = 200, message = "Description must be at most 200 characters"))]
    pub description: String,
}

/// Optional list filters; dates cover whole calendar days inclusively
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListEntriesQuery {
    /// Restrict to one vendor
    pub vendor_id: Option<i32>,
    /// Earliest date (inclusive)
    pub from: Option<NaiveDate>,
    /// Latest date (inclusive)
    pub to: Option<NaiveDate>,
}

fn validate_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if *amount > Decimal::ZERO {
        Ok(())
    } else {
        Err(ValidationError::new("amount_positive"))
    }
}

/// Create ledger entry routes
pub fn ledger_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_entries).post(create_entry))
        .route("/:id", get(get_entry).put(update_entry).delete(delete_entry))
}

/// List ledger entries, optionally filtered
#[utoipa::path(
    get,
    path = "/api/ledgerentries",
    tag = "Ledger Entries",
    params(ListEntriesQuery),
    responses((status = 200, description = "Matching entries", body = [LedgerEntry])),
    security(("bearer_auth" = []))
)]
pub async fn list_entries(
    State(state): State<AppState>,
    Query(query): Query<ListEntriesQuery>,
) -> AppResult<Json<Vec<LedgerEntry>>> {
    let entries = state
        .ledger_service
        .list_entries(LedgerEntryFilter {
            vendor_id: query.vendor_id,
            from: query.from,
            to: query.to,
        })
        .await?;

    Ok(Json(entries))
}

/// Get a single ledger entry
#[utoipa::path(
    get,
    path = "/api/ledgerentries/{id}",
    tag = "Ledger Entries",
    params(("id" = i32, Path, description = "Entry id")),
    responses(
        (status = 200, description = "The entry", body = LedgerEntry),
        (status = 404, description = "Unknown entry id")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_entry(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<LedgerEntry>> {
    let entry = state.ledger_service.get_entry(id).await?;
    Ok(Json(entry))
}

/// Create a new ledger entry
#[utoipa::path(
    post,
    path = "/api/ledgerentries",
    tag = "Ledger Entries",
    request_body = CreateEntryRequest,
    responses(
        (status = 201, description = "Entry created", body = LedgerEntry),
        (status = 400, description = "Validation error or unknown vendor")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_entry(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateEntryRequest>,
) -> AppResult<Created<LedgerEntry>> {
    let entry = state
        .ledger_service
        .create_entry(LedgerEntryData {
            vendor_id: payload.vendor_id,
            amount: payload.amount,
            entry_type: payload.entry_type,
            date: payload.date,
            description: payload.description,
        })
        .await?;

    Ok(Created(entry))
}

/// Replace a ledger entry
#[utoipa::path(
    put,
    path = "/api/ledgerentries/{id}",
    tag = "Ledger Entries",
    params(("id" = i32, Path, description = "Entry id")),
    request_body = UpdateEntryRequest,
    responses(
        (status = 204, description = "Entry updated"),
        (status = 400, description = "Validation error, id mismatch or unknown vendor"),
        (status = 404, description = "Unknown entry id")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_entry(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateEntryRequest>,
) -> AppResult<NoContent> {
    if id != payload.id {
        return Err(AppError::bad_request("Mismatched entry id"));
    }

    state
        .ledger_service
        .update_entry(
            id,
            LedgerEntryData {
                vendor_id: payload.vendor_id,
                amount: payload.amount,
                entry_type: payload.entry_type,
                date: payload.date,
                description: payload.description,
            },
        )
        .await?;

    Ok(NoContent)
}

/// Delete a ledger entry
#[utoipa::path(
    delete,
    path = "/api/ledgerentries/{id}",
    tag = "Ledger Entries",
    params(("id" = i32, Path, description = "Entry id")),
    responses(
        (status = 204, description = "Entry deleted"),
        (status = 404, description = "Unknown entry id")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state.ledger_service.delete_entry(id).await?;
    Ok(NoContent)
}
