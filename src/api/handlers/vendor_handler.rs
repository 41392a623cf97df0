//! Vendor handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{Vendor, VendorData};
use crate::errors::{AppError, AppResult};
use crate::types::{Created, NoContent};

/// Vendor creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateVendorRequest {
    /// Vendor display name
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    #[schema(example = "Acme Supplies")]
    pub name: String,
    /// Postal address
    #[serde(default)]
    #[schema(example = "1 Main St")]
    pub address: String,
    /// Contact phone number
    #[serde(default)]
    #[schema(example = "555-0100")]
    pub phone: String,
}

/// Vendor replacement request; the id must match the path
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVendorRequest {
    /// Vendor id, must equal the path id
    #[schema(example = 1)]
    pub id: i32,
    /// Vendor display name
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    #[schema(example = "Acme Supplies")]
    pub name: String,
    /// Postal address
    #[serde(default)]
    pub address: String,
    /// Contact phone number
    #[serde(default)]
    pub phone: String,
}

/// Create vendor routes
pub fn vendor_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vendors).post(create_vendor))
        .route(
            "/:id",
            get(get_vendor).put(update_vendor).delete(delete_vendor),
        )
}

/// List all vendors
#[utoipa::path(
    get,
    path = "/api/vendors",
    tag = "Vendors",
    responses((status = 200, description = "All vendors", body = [Vendor])),
    security(("bearer_auth" = []))
)]
pub async fn list_vendors(State(state): State<AppState>) -> AppResult<Json<Vec<Vendor>>> {
    let vendors = state.vendor_service.list_vendors().await?;
    Ok(Json(vendors))
}

/// Get a single vendor
#[utoipa::path(
    get,
    path = "/api/vendors/{id}",
    tag = "Vendors",
    params(("id" = i32, Path, description = "Vendor id")),
    responses(
        (status = 200, description = "The vendor", body = Vendor),
        (status = 404, description = "Unknown vendor id")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_vendor(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vendor>> {
    let vendor = state.vendor_service.get_vendor(id).await?;
    Ok(Json(vendor))
}

/// Create a new vendor
#[utoipa::path(
    post,
    path = "/api/vendors",
    tag = "Vendors",
    request_body = CreateVendorRequest,
    responses(
        (status = 201, description = "Vendor created", body = Vendor),
        (status = 400, description = "Validation error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_vendor(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateVendorRequest>,
) -> AppResult<Created<Vendor>> {
    let vendor = state
        .vendor_service
        .create_vendor(VendorData {
            name: payload.name,
            address: payload.address,
            phone: payload.phone,
        })
        .await?;

    Ok(Created(vendor))
}

/// Replace a vendor
#[utoipa::path(
    put,
    path = "/api/vendors/{id}",
    tag = "Vendors",
    params(("id" = i32, Path, description = "Vendor id")),
    request_body = UpdateVendorRequest,
    responses(
        (status = 204, description = "Vendor updated"),
        (status = 400, description = "Validation error or id mismatch"),
        (status = 404, description = "Unknown vendor id")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_vendor(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateVendorRequest>,
) -> AppResult<NoContent> {
    if id != payload.id {
        return Err(AppError::bad_request("Mismatched vendor id"));
    }

    state
        .vendor_service
        .update_vendor(
            id,
            VendorData {
                name: payload.name,
                address: payload.address,
                phone: payload.phone,
            },
        )
        .await?;

    Ok(NoContent)
}

/// Delete a vendor (cascades to its ledger entries)
#[utoipa::path(
    delete,
    path = "/api/vendors/{id}",
    tag = "Vendors",
    params(("id" = i32, Path, description = "Vendor id")),
    responses(
        (status = 204, description = "Vendor deleted"),
        (status = 404, description = "Unknown vendor id")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_vendor(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state.vendor_service.delete_vendor(id).await?;
    Ok(NoContent)
}
