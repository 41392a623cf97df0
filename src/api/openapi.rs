//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, ledger_handler, user_handler, vendor_handler};
use crate::domain::{EntryType, LedgerEntry, UserResponse, Vendor};
use crate::services::TokenResponse;

/// OpenAPI documentation for the Accounting API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Accounting API",
        version = "0.1.0",
        description = "Vendors, ledger entries and token-based authentication"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::login,
        // Vendor endpoints
        vendor_handler::list_vendors,
        vendor_handler::get_vendor,
        vendor_handler::create_vendor,
        vendor_handler::update_vendor,
        vendor_handler::delete_vendor,
        // Ledger entry endpoints
        ledger_handler::list_entries,
        ledger_handler::get_entry,
        ledger_handler::create_entry,
        ledger_handler::update_entry,
        ledger_handler::delete_entry,
        // User endpoints
        user_handler::list_users,
        user_handler::get_user,
        user_handler::create_user,
        user_handler::update_user,
        user_handler::delete_user,
    ),
    components(
        schemas(
            // Domain types
            Vendor,
            LedgerEntry,
            EntryType,
            UserResponse,
            // Auth types
            auth_handler::LoginRequest,
            TokenResponse,
            // Vendor handler types
            vendor_handler::CreateVendorRequest,
            vendor_handler::UpdateVendorRequest,
            // Ledger handler types
            ledger_handler::CreateEntryRequest,
            ledger_handler::UpdateEntryRequest,
            // User handler types
            user_handler::CreateUserRequest,
            user_handler::UpdateUserRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Username/password login"),
        (name = "Vendors", description = "Vendor management"),
        (name = "Ledger Entries", description = "Credit and debit entries against vendors"),
        (name = "Users", description = "API user management")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /api/auth/login"))
                        .build(),
                ),
            );
        }
    }
}
