//! HTTP handlers for the Quotewall API

pub mod auth;
pub mod quote;
