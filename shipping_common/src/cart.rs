//! Cart line items and helpers shared between client and server.

use serde::{Deserialize, Serialize};
use std::io::BufRead;
use std::str::FromStr;

use crate::error::ShippingError;

/// Anything that can be priced by the quote calculator.
///
/// Only the quantity matters for shipping; other fields of a cart record are ignored.
pub trait LineItem {
    /// Number of units of this item in the cart.
    fn quantity(&self) -> i32;
}

/// Returns the default quantity (1) for cart items.
fn default_quantity() -> i32 {
    1
}

/// A single cart entry as carried on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CartItem {
    /// Product identifier.
    pub product_id: String,
    /// Quantity of this item (defaults to 1).
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

impl CartItem {
    /// Creates a new cart item.
    pub fn new(product_id: &str, quantity: i32) -> Self {
        CartItem {
            product_id: String::from(product_id),
            quantity,
        }
    }
}

impl LineItem for CartItem {
    fn quantity(&self) -> i32 {
        self.quantity
    }
}

impl<T: LineItem + ?Sized> LineItem for &T {
    fn quantity(&self) -> i32 {
        (**self).quantity()
    }
}

impl FromStr for CartItem {
    type Err = ShippingError;

    /// Parses `product_id`, `product_id:qty`, `product_id,qty` or `product_id qty`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (product_id, quantity) =
            match trimmed.split_once(|c: char| c == ':' || c == ',' || c.is_whitespace()) {
                Some((id, qty)) => (id.trim(), Some(qty.trim())),
                None => (trimmed, None),
            };

        if product_id.is_empty() {
            return Err(ShippingError::ParseCartFile(format!(
                "missing product id in '{}'",
                trimmed
            )));
        }

        let quantity = match quantity {
            Some(qty) if !qty.is_empty() => qty.parse::<i32>().map_err(|e| {
                ShippingError::ParseCartFile(format!("bad quantity '{}' for {}: {}", qty, product_id, e))
            })?,
            _ => default_quantity(),
        };

        Ok(CartItem::new(product_id, quantity))
    }
}

/// Trait providing file parsing for cart items.
pub trait CartParser {
    /// Parses cart items from a buffered reader.
    ///
    /// Each non-empty line that does not start with `#` is parsed as a single
    /// `CartItem` using `FromStr`. Returns an error if any line cannot be parsed.
    fn parse_from_reader<R: BufRead>(reader: R) -> Result<Vec<CartItem>, ShippingError>;
}

impl CartParser for CartItem {
    fn parse_from_reader<R: BufRead>(reader: R) -> Result<Vec<Self>, ShippingError> {
        let mut items = Vec::new();

        for line_result in reader.lines() {
            let line = line_result.map_err(ShippingError::Io)?;
            let trimmed_line = line.trim();
            if trimmed_line.is_empty() || trimmed_line.starts_with('#') {
                continue;
            }
            items.push(trimmed_line.parse::<Self>()?);
        }
        Ok(items)
    }
}
