//! Error types shared between client and server.
//!
//! `QuoteError` is the calculator's rejection reason. `ShippingError` unifies the
//! wider workspace failure cases (I/O, serialization, channel communication, cart
//! file parsing) so crates can propagate a single error type.
use std::io;

use thiserror::Error;

/// Reason a quote request was rejected by the calculator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuoteError {
    /// A line item carried a quantity below one.
    #[error("Invalid quantity {quantity} for item at position {index}")]
    InvalidQuantity {
        /// Position of the offending item in the request.
        index: usize,
        /// The quantity that was supplied.
        quantity: i32,
    },

    /// The amount to convert was negative.
    #[error("Negative amount: {0}")]
    NegativeAmount(f64),

    /// The amount to convert was NaN or infinite.
    #[error("Non-finite amount: {0}")]
    NonFiniteAmount(f64),

    /// The amount does not fit the quote representation.
    #[error("Amount out of range: {0}")]
    AmountOutOfRange(String),
}

/// Unified error type shared by client and server.
#[derive(Error, Debug)]
pub enum ShippingError {
    /// I/O error originating from the standard library or sockets/files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic formatting/validation error with a human-readable message.
    #[error("Format error: {0}")]
    Format(String),

    /// Error while parsing a cart file into `CartItem` values.
    #[error("Parse cart file error: {0}")]
    ParseCartFile(String),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Channel send failed (e.g., receiver dropped); contains a short context string.
    #[error("Channel send failed: {0}")]
    ChannelSend(String),

    /// Channel receive failed (e.g., sender closed); contains a short context string.
    #[error("Channel receive failed: {0}")]
    ChannelRecv(String),

    /// The calculator rejected the input.
    #[error("Quote rejected: {0}")]
    Quote(#[from] QuoteError),
}
