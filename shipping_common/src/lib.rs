//!
//! Common types and utilities shared by the shipping quote server and client.
//!
//! This crate aggregates:
//! - `error` — unified error type `ShippingError` and the calculator's `QuoteError`.
//! - `result` — handy `Result<T, ShippingError>` alias.
//! - `cart` — cart line items and the cart file parser.
//! - `quote` — the `Quote` value type and decimal-to-quote conversion.
//! - `calculator` — shipping rates and the quote calculator operations.
//! - `observer` — the observability seam the calculator reports to.
//! - `request` — JSON request/response payloads exchanged over TCP.
//! - `net` — networking constants and small helpers.
#![warn(missing_docs)]
pub mod calculator;
pub mod cart;
pub mod error;
pub mod net;
pub mod observer;
pub mod quote;
pub mod request;
pub mod result;

pub use calculator::{
    QuoteCalculator, ShippingRates, quote_from_amount, quote_from_items, try_quote_from_amount,
    try_quote_from_items,
};
pub use cart::{CartItem, LineItem};
pub use error::{QuoteError, ShippingError};
pub use quote::Quote;
pub use result::Result;
