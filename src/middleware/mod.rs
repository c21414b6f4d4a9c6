//! Middleware for the Quotewall API

mod auth;
mod json;
mod security;
mod tracing;

pub use self::auth::AuthenticatedUser;
pub use self::json::ApiJson;
pub use self::security::security_headers;
pub use self::tracing::request_tracing;
