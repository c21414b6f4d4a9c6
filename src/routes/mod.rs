//! Route definitions for the Quotewall API

mod auth;
mod quote;

pub use auth::auth_routes;
pub use quote::quote_routes;
