//! HTTP request handlers.

pub mod auth_handler;
pub mod ledger_handler;
pub mod user_handler;
pub mod vendor_handler;

pub use auth_handler::auth_routes;
pub use ledger_handler::ledger_routes;
pub use user_handler::user_routes;
pub use vendor_handler::vendor_routes;
