//! Shared protocol payloads used by client and server.
//!
//! Requests and responses travel as one JSON document per line over TCP. A
//! `QuoteRequest` is tagged by its `method` field (`from_items` or `from_amount`).
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::cart::CartItem;
use crate::error::{QuoteError, ShippingError};
use crate::quote::Quote;

/// Request payload sent from client to server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum QuoteRequest {
    /// Price a list of cart items.
    FromItems {
        /// Items in the cart.
        items: Vec<CartItem>,
    },
    /// Convert a raw currency amount into a quote.
    FromAmount {
        /// Amount in currency units.
        amount: f64,
    },
}

impl QuoteRequest {
    /// Encode the request as a newline-terminated JSON line.
    pub fn to_json_line(&self) -> Result<Vec<u8>, ShippingError> {
        let mut line = serde_json::to_vec(self)?;
        line.push(b'\n');
        Ok(line)
    }
}

/// Outcome reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ResponseStatus {
    /// The quote was computed.
    Ok,
    /// The calculator rejected the input; the quote is zero.
    Rejected,
    /// The request line could not be decoded.
    Invalid,
}

/// Response payload sent from server to client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteResponse {
    /// Outcome of the request.
    pub status: ResponseStatus,
    /// Whole currency units.
    pub units: u32,
    /// Sub-units, below 100.
    pub subunits: u32,
    /// Human-readable rendering such as `$11.50`.
    pub display: String,
    /// Why the request was rejected or invalid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// UTC timestamp in milliseconds since Unix epoch.
    pub timestamp: u64,
}

impl QuoteResponse {
    /// Successful response carrying `quote`.
    pub fn ok(quote: Quote, timestamp: u64) -> Self {
        Self::build(ResponseStatus::Ok, quote, None, timestamp)
    }

    /// Response for input the calculator refused.
    pub fn rejected(error: &QuoteError, timestamp: u64) -> Self {
        Self::build(
            ResponseStatus::Rejected,
            Quote::ZERO,
            Some(error.to_string()),
            timestamp,
        )
    }

    /// Response for a request line that could not be decoded.
    pub fn invalid(reason: &str, timestamp: u64) -> Self {
        Self::build(
            ResponseStatus::Invalid,
            Quote::ZERO,
            Some(String::from(reason)),
            timestamp,
        )
    }

    fn build(status: ResponseStatus, quote: Quote, reason: Option<String>, timestamp: u64) -> Self {
        QuoteResponse {
            status,
            units: quote.units(),
            subunits: quote.subunits(),
            display: quote.to_string(),
            reason,
            timestamp,
        }
    }

    /// Rebuild the quote, validating the sub-unit range.
    pub fn quote(&self) -> Result<Quote, ShippingError> {
        Ok(Quote::new(self.units, self.subunits)?)
    }

    /// Encode the response as a newline-terminated JSON line.
    pub fn to_json_line(&self) -> Result<Vec<u8>, ShippingError> {
        let mut line = serde_json::to_vec(self)?;
        line.push(b'\n');
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_method_tag() {
        let request = QuoteRequest::FromItems {
            items: vec![CartItem::new("OLJCESPC7Z", 3)],
        };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(
            json,
            r#"{"method":"from_items","items":[{"product_id":"OLJCESPC7Z","quantity":3}]}"#
        );

        let amount: QuoteRequest =
            serde_json::from_str(r#"{"method":"from_amount","amount":10.555}"#).unwrap();
        assert_eq!(amount, QuoteRequest::FromAmount { amount: 10.555 });
    }

    #[test]
    fn unknown_method_fails_to_decode() {
        assert!(serde_json::from_str::<QuoteRequest>(r#"{"method":"ship_order"}"#).is_err());
    }

    #[test]
    fn json_line_is_newline_terminated() {
        let line = QuoteRequest::FromAmount { amount: 1.0 }.to_json_line().unwrap();
        assert_eq!(line.last(), Some(&b'\n'));
    }

    #[test]
    fn ok_response_renders_quote() {
        let response = QuoteResponse::ok(Quote::new(11, 50).unwrap(), 42);
        assert_eq!(response.display, "$11.50");
        assert_eq!(response.reason, None);
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""status":"ok""#));
        assert!(!json.contains("reason"));
    }

    #[test]
    fn rejected_response_is_zero_with_reason() {
        let response = QuoteResponse::rejected(&QuoteError::NegativeAmount(-5.0), 7);
        assert_eq!(response.status, ResponseStatus::Rejected);
        assert_eq!(response.quote().unwrap(), Quote::ZERO);
        assert_eq!(response.reason.as_deref(), Some("Negative amount: -5"));
        assert_eq!(response.status.to_string(), "rejected");
    }

    #[test]
    fn quote_rejects_out_of_range_subunits() {
        let mut response = QuoteResponse::ok(Quote::ZERO, 0);
        response.subunits = 150;
        assert!(response.quote().is_err());
    }
}
