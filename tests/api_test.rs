//! Integration tests for API endpoints.
//!
//! These tests run the full router against in-memory repositories, so
//! every request exercises the real handlers, middleware and services
//! without a database connection.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use tower::ServiceExt;

use accounting_api::api::{create_router, AppState};
use accounting_api::config::Config;
use accounting_api::domain::{LedgerEntry, LedgerEntryData, Password, User, Vendor, VendorData};
use accounting_api::errors::{AppError, AppResult};
use accounting_api::infra::{
    Database, LedgerEntryFilter, LedgerEntryRepository, UserRepository, VendorRepository,
};
use accounting_api::services::{Authenticator, LedgerManager, UserManager, VendorManager};

const TEST_SECRET: &str = "test-secret-key-for-testing-only-32chars";

// =============================================================================
// In-memory repositories
// =============================================================================

struct InMemoryUsers {
    users: Mutex<Vec<User>>,
    next_id: AtomicI32,
}

impl InMemoryUsers {
    fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            next_id: AtomicI32::new(1),
        }
    }

    fn with_admin() -> Self {
        let store = Self::new();
        let hash = Password::new("password").unwrap().into_string();
        store.users.lock().unwrap().push(User::new(
            1,
            "admin".to_string(),
            hash,
            "Admin".to_string(),
        ));
        store.next_id.store(2, Ordering::SeqCst);
        store
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn username_taken(&self, username: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .any(|u| u.username == username && Some(u.id) != exclude_id))
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.users.lock().unwrap().len() as u64)
    }

    async fn create(
        &self,
        username: String,
        password_hash: String,
        role: String,
    ) -> AppResult<User> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let user = User::new(id, username, password_hash, role);
        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn update(
        &self,
        id: i32,
        username: String,
        role: String,
        password_hash: Option<String>,
    ) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(AppError::NotFound)?;
        user.username = username;
        user.role = role;
        if let Some(hash) = password_hash {
            user.password_hash = hash;
        }
        Ok(user.clone())
    }

    async fn update_password_hash(&self, id: i32, password_hash: String) -> AppResult<()> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(AppError::NotFound)?;
        user.password_hash = password_hash;
        Ok(())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

struct InMemoryVendors {
    vendors: Mutex<Vec<Vendor>>,
    next_id: AtomicI32,
}

impl InMemoryVendors {
    fn new() -> Self {
        Self {
            vendors: Mutex::new(Vec::new()),
            next_id: AtomicI32::new(1),
        }
    }
}

#[async_trait]
impl VendorRepository for InMemoryVendors {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Vendor>> {
        Ok(self
            .vendors
            .lock()
            .unwrap()
            .iter()
            .find(|v| v.id == id)
            .cloned())
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        Ok(self.vendors.lock().unwrap().iter().any(|v| v.id == id))
    }

    async fn list(&self) -> AppResult<Vec<Vendor>> {
        Ok(self.vendors.lock().unwrap().clone())
    }

    async fn create(&self, data: VendorData) -> AppResult<Vendor> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let vendor = Vendor {
            id,
            name: data.name,
            address: data.address,
            phone: data.phone,
        };
        self.vendors.lock().unwrap().push(vendor.clone());
        Ok(vendor)
    }

    async fn update(&self, id: i32, data: VendorData) -> AppResult<Vendor> {
        let mut vendors = self.vendors.lock().unwrap();
        let vendor = vendors
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or(AppError::NotFound)?;
        vendor.name = data.name;
        vendor.address = data.address;
        vendor.phone = data.phone;
        Ok(vendor.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut vendors = self.vendors.lock().unwrap();
        let before = vendors.len();
        vendors.retain(|v| v.id != id);
        if vendors.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

struct InMemoryEntries {
    entries: Mutex<Vec<LedgerEntry>>,
    next_id: AtomicI32,
    vendors: Arc<InMemoryVendors>,
}

impl InMemoryEntries {
    fn new(vendors: Arc<InMemoryVendors>) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            next_id: AtomicI32::new(1),
            vendors,
        }
    }

    fn vendor(&self, id: i32) -> Option<Vendor> {
        self.vendors
            .vendors
            .lock()
            .unwrap()
            .iter()
            .find(|v| v.id == id)
            .cloned()
    }
}

#[async_trait]
impl LedgerEntryRepository for InMemoryEntries {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<LedgerEntry>> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == id)
            .cloned())
    }

    async fn list(&self, filter: LedgerEntryFilter) -> AppResult<Vec<LedgerEntry>> {
        let mut entries: Vec<LedgerEntry> = self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| filter.vendor_id.map_or(true, |id| e.vendor_id == id))
            .filter(|e| filter.from.map_or(true, |from| e.date.date_naive() >= from))
            .filter(|e| filter.to.map_or(true, |to| e.date.date_naive() <= to))
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.date);
        Ok(entries)
    }

    async fn create(&self, data: LedgerEntryData) -> AppResult<LedgerEntry> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let entry = LedgerEntry {
            id,
            vendor_id: data.vendor_id,
            amount: data.amount,
            entry_type: data.entry_type,
            date: data.date,
            description: data.description,
            vendor: self.vendor(data.vendor_id),
        };
        self.entries.lock().unwrap().push(entry.clone());
        Ok(entry)
    }

    async fn update(&self, id: i32, data: LedgerEntryData) -> AppResult<LedgerEntry> {
        let vendor = self.vendor(data.vendor_id);
        let mut entries = self.entries.lock().unwrap();
        let entry = entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(AppError::NotFound)?;
        entry.vendor_id = data.vendor_id;
        entry.amount = data.amount;
        entry.entry_type = data.entry_type;
        entry.date = data.date;
        entry.description = data.description;
        entry.vendor = vendor;
        Ok(entry.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

// =============================================================================
// Test helpers
// =============================================================================

/// Build the full router over in-memory stores with a seeded admin user
fn app() -> Router {
    let config = Config::with_values("postgres://unused", TEST_SECRET);
    let users = Arc::new(InMemoryUsers::with_admin());
    let vendors = Arc::new(InMemoryVendors::new());
    let entries = Arc::new(InMemoryEntries::new(vendors.clone()));

    let state = AppState::new(
        Arc::new(Authenticator::new(users.clone(), config)),
        Arc::new(UserManager::new(users)),
        Arc::new(VendorManager::new(vendors.clone())),
        Arc::new(LedgerManager::new(entries, vendors)),
        Arc::new(Database::from_connection(DatabaseConnection::default())),
    );

    create_router(state)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn authed_request(method: &str, uri: &str, token: &str, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token));
    if body.is_some() {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
    }
    builder
        .body(match body {
            Some(value) => Body::from(value.to_string()),
            None => Body::empty(),
        })
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Log in as the seeded admin and return a bearer token
async fn login(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            json!({"username": "admin", "password": "password"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    body["token"].as_str().unwrap().to_string()
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn login_with_seeded_admin_returns_a_token() {
    let app = app();
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            json!({"username": "admin", "password": "password"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert_eq!(body["tokenType"], "Bearer");
    assert_eq!(body["expiresIn"], 3600);
    assert_eq!(body["username"], "admin");
    assert_eq!(body["role"], "Admin");
}

#[tokio::test]
async fn login_failures_share_one_generic_response() {
    let app = app();

    let wrong_password = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            json!({"username": "admin", "password": "nope"}),
        ))
        .await
        .unwrap();
    let unknown_user = app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            json!({"username": "ghost", "password": "nope"}),
        ))
        .await
        .unwrap();

    assert_eq!(wrong_password.status(), StatusCode::BAD_REQUEST);
    assert_eq!(unknown_user.status(), StatusCode::BAD_REQUEST);

    let body_a = response_json(wrong_password).await;
    let body_b = response_json(unknown_user).await;
    assert_eq!(body_a, body_b);
    assert_eq!(body_a["message"], "Invalid username or password");
}

#[tokio::test]
async fn login_rejects_blank_credentials() {
    let app = app();
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            json!({"username": "  ", "password": ""}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn protected_routes_require_a_bearer_token() {
    let app = app();

    let missing = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/vendors")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

    let garbage = app
        .oneshot(authed_request("GET", "/api/vendors", "not-a-jwt", None))
        .await
        .unwrap();
    assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Vendors
// =============================================================================

#[tokio::test]
async fn vendor_crud_round_trip() {
    let app = app();
    let token = login(&app).await;

    // Create
    let response = app
        .clone()
        .oneshot(authed_request(
            "POST",
            "/api/vendors",
            &token,
            Some(json!({"name": "Acme Supplies", "address": "1 Main St", "phone": "555-0100"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let vendor = response_json(response).await;
    let id = vendor["id"].as_i64().unwrap();
    assert_eq!(vendor["name"], "Acme Supplies");

    // Update (full replacement)
    let response = app
        .clone()
        .oneshot(authed_request(
            "PUT",
            &format!("/api/vendors/{}", id),
            &token,
            Some(json!({"id": id, "name": "Acme Ltd", "address": "2 Side St", "phone": ""})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Read back
    let response = app
        .clone()
        .oneshot(authed_request(
            "GET",
            &format!("/api/vendors/{}", id),
            &token,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let vendor = response_json(response).await;
    assert_eq!(vendor["name"], "Acme Ltd");
    assert_eq!(vendor["phone"], "");

    // Delete
    let response = app
        .clone()
        .oneshot(authed_request(
            "DELETE",
            &format!("/api/vendors/{}", id),
            &token,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Gone
    let response = app
        .oneshot(authed_request(
            "GET",
            &format!("/api/vendors/{}", id),
            &token,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn vendor_update_rejects_a_mismatched_id() {
    let app = app();
    let token = login(&app).await;

    let response = app
        .clone()
        .oneshot(authed_request(
            "POST",
            "/api/vendors",
            &token,
            Some(json!({"name": "Acme"})),
        ))
        .await
        .unwrap();
    let vendor = response_json(response).await;
    let id = vendor["id"].as_i64().unwrap();

    let response = app
        .oneshot(authed_request(
            "PUT",
            &format!("/api/vendors/{}", id),
            &token,
            Some(json!({"id": id + 1, "name": "Acme"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn vendor_name_is_required() {
    let app = app();
    let token = login(&app).await;

    let response = app
        .oneshot(authed_request(
            "POST",
            "/api/vendors",
            &token,
            Some(json!({"name": ""})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Ledger entries
// =============================================================================

async fn create_vendor(app: &Router, token: &str, name: &str) -> i64 {
    let response = app
        .clone()
        .oneshot(authed_request(
            "POST",
            "/api/vendors",
            token,
            Some(json!({"name": name})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    response_json(response).await["id"].as_i64().unwrap()
}

#[tokio::test]
async fn entry_requires_an_existing_vendor() {
    let app = app();
    let token = login(&app).await;

    let response = app
        .oneshot(authed_request(
            "POST",
            "/api/ledgerentries",
            &token,
            Some(json!({
                "vendorId": 999,
                "amount": 10.0,
                "type": "Credit",
                "date": "2026-01-15T12:00:00Z",
                "description": "test"
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Vendor does not exist");
}

#[tokio::test]
async fn entry_create_embeds_the_vendor() {
    let app = app();
    let token = login(&app).await;
    let vendor_id = create_vendor(&app, &token, "Acme").await;

    let response = app
        .oneshot(authed_request(
            "POST",
            "/api/ledgerentries",
            &token,
            Some(json!({
                "vendorId": vendor_id,
                "amount": 199.95,
                "type": "Debit",
                "date": "2026-01-15T12:00:00Z",
                "description": "Office chairs"
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let entry = response_json(response).await;
    assert_eq!(entry["vendorId"], vendor_id);
    assert_eq!(entry["type"], "Debit");
    assert_eq!(entry["vendor"]["name"], "Acme");
}

#[tokio::test]
async fn entry_amount_must_be_positive() {
    let app = app();
    let token = login(&app).await;
    let vendor_id = create_vendor(&app, &token, "Acme").await;

    let response = app
        .oneshot(authed_request(
            "POST",
            "/api/ledgerentries",
            &token,
            Some(json!({
                "vendorId": vendor_id,
                "amount": -5.0,
                "type": "Credit",
                "date": "2026-01-15T12:00:00Z"
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn entry_list_filters_by_vendor_and_date() {
    let app = app();
    let token = login(&app).await;
    let acme = create_vendor(&app, &token, "Acme").await;
    let globex = create_vendor(&app, &token, "Globex").await;

    for (vendor_id, date) in [
        (acme, "2026-01-10T09:00:00Z"),
        (acme, "2026-02-20T09:00:00Z"),
        (globex, "2026-01-12T09:00:00Z"),
    ] {
        let response = app
            .clone()
            .oneshot(authed_request(
                "POST",
                "/api/ledgerentries",
                &token,
                Some(json!({
                    "vendorId": vendor_id,
                    "amount": 10.0,
                    "type": "Credit",
                    "date": date
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    // Vendor filter
    let response = app
        .clone()
        .oneshot(authed_request(
            "GET",
            &format!("/api/ledgerentries?vendorId={}", acme),
            &token,
            None,
        ))
        .await
        .unwrap();
    let entries = response_json(response).await;
    assert_eq!(entries.as_array().unwrap().len(), 2);

    // Inclusive date window covering January only
    let response = app
        .oneshot(authed_request(
            "GET",
            "/api/ledgerentries?from=2026-01-01&to=2026-01-31",
            &token,
            None,
        ))
        .await
        .unwrap();
    let entries = response_json(response).await;
    assert_eq!(entries.as_array().unwrap().len(), 2);
}

// =============================================================================
// Users
// =============================================================================

#[tokio::test]
async fn duplicate_usernames_conflict() {
    let app = app();
    let token = login(&app).await;

    let response = app
        .oneshot(authed_request(
            "POST",
            "/api/users",
            &token,
            Some(json!({"username": "admin", "password": "password123", "role": "User"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Username already exists");
}

#[tokio::test]
async fn user_creation_rejects_a_short_password() {
    let app = app();
    let token = login(&app).await;

    let response = app
        .oneshot(authed_request(
            "POST",
            "/api/users",
            &token,
            Some(json!({"username": "bob", "password": "short", "role": "User"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn user_listing_never_returns_password_hashes() {
    let app = app();
    let token = login(&app).await;

    let response = app
        .oneshot(authed_request("GET", "/api/users", &token, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let users = response_json(response).await;
    let admin = &users.as_array().unwrap()[0];
    assert_eq!(admin["username"], "admin");
    assert_eq!(admin["role"], "Admin");
    assert!(admin.get("passwordHash").is_none());
    assert!(admin.get("password_hash").is_none());
}

#[tokio::test]
async fn created_user_can_log_in() {
    let app = app();
    let token = login(&app).await;

    let response = app
        .clone()
        .oneshot(authed_request(
            "POST",
            "/api/users",
            &token,
            Some(json!({"username": "bob", "password": "password123", "role": "User"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            json!({"username": "bob", "password": "password123"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["role"], "User");
}
