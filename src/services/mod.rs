//! Application services

mod quotes;

pub use quotes::{QuoteError, QuoteService};
