//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on repository traits for
//! dependency inversion.

mod auth_service;
mod ledger_service;
mod user_service;
mod vendor_service;

pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use ledger_service::{LedgerEntryService, LedgerManager};
pub use user_service::{UserManager, UserService, UserUpdate};
pub use vendor_service::{VendorManager, VendorService};
