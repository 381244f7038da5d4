//! Shipping quote calculator.
//!
//! Prices a cart as a flat base fee plus a per-item increment (`$10.00 + $0.50` per
//! item by default). Every operation has two forms:
//! - `try_*` returns `Err(QuoteError)` for rejected input, so a caller can tell a
//!   legitimately free cart from an invalid one.
//! - the plain form clamps any rejection to `Quote::ZERO`.
//!
//! The calculator is stateless apart from its rates and observer and can be shared
//! across threads behind an `Arc`.

use rust_decimal::Decimal;

use crate::cart::LineItem;
use crate::error::QuoteError;
use crate::observer::{NoOpObserver, Operation, QuoteEvent, QuoteObserver};
use crate::quote::Quote;

/// Fee schedule applied to non-empty carts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShippingRates {
    /// Flat fee charged once per non-empty cart.
    pub base_fee: Decimal,
    /// Fee charged for every unit in the cart.
    pub per_item: Decimal,
}

impl ShippingRates {
    /// Creates a fee schedule.
    pub fn new(base_fee: Decimal, per_item: Decimal) -> Self {
        ShippingRates { base_fee, per_item }
    }

    /// Total cost for `total_items` units; an empty cart costs nothing.
    pub fn cost_for(&self, total_items: i64) -> Result<Decimal, QuoteError> {
        if total_items <= 0 {
            return Ok(Decimal::ZERO);
        }
        self.per_item
            .checked_mul(Decimal::from(total_items))
            .and_then(|variable| variable.checked_add(self.base_fee))
            .ok_or_else(|| QuoteError::AmountOutOfRange(format!("{} items", total_items)))
    }
}

impl Default for ShippingRates {
    fn default() -> Self {
        ShippingRates::new(Decimal::TEN, Decimal::new(5, 1))
    }
}

/// Quote calculator with its fee schedule and an injected observer.
#[derive(Debug, Clone)]
pub struct QuoteCalculator<O = NoOpObserver> {
    rates: ShippingRates,
    observer: O,
}

impl QuoteCalculator<NoOpObserver> {
    /// Calculator with default rates that reports nothing.
    pub fn silent() -> Self {
        QuoteCalculator::new(ShippingRates::default(), NoOpObserver)
    }
}

impl Default for QuoteCalculator<NoOpObserver> {
    fn default() -> Self {
        QuoteCalculator::silent()
    }
}

impl<O: QuoteObserver> QuoteCalculator<O> {
    /// Creates a calculator reporting to `observer`.
    pub fn new(rates: ShippingRates, observer: O) -> Self {
        QuoteCalculator { rates, observer }
    }

    /// Prices `items`, rejecting any quantity below one.
    pub fn try_quote_from_items<I: LineItem>(&self, items: &[I]) -> Result<Quote, QuoteError> {
        let operation = Operation::CreateQuoteFromItems;
        self.observer.on_event(QuoteEvent::Received { operation });
        let result = self.price_items(items);
        self.report(operation, &result);
        result
    }

    /// Prices `items`; invalid input yields `Quote::ZERO`.
    pub fn quote_from_items<I: LineItem>(&self, items: &[I]) -> Quote {
        self.try_quote_from_items(items).unwrap_or(Quote::ZERO)
    }

    /// Converts a currency amount, rejecting negative and non-finite values.
    pub fn try_quote_from_amount(&self, value: f64) -> Result<Quote, QuoteError> {
        let operation = Operation::CreateQuoteFromAmount;
        self.observer.on_event(QuoteEvent::Received { operation });
        let result = Quote::from_f64(value);
        self.report(operation, &result);
        result
    }

    /// Converts a currency amount; invalid input yields `Quote::ZERO`.
    pub fn quote_from_amount(&self, value: f64) -> Quote {
        self.try_quote_from_amount(value).unwrap_or(Quote::ZERO)
    }

    fn price_items<I: LineItem>(&self, items: &[I]) -> Result<Quote, QuoteError> {
        if let Some((index, item)) = items.iter().enumerate().find(|(_, item)| item.quantity() < 1) {
            return Err(QuoteError::InvalidQuantity {
                index,
                quantity: item.quantity(),
            });
        }

        let total_items: i64 = items.iter().map(|item| i64::from(item.quantity())).sum();
        let cost = self.rates.cost_for(total_items)?;
        Quote::from_decimal(cost)
    }

    fn report(&self, operation: Operation, result: &Result<Quote, QuoteError>) {
        let event = match result {
            Ok(quote) => QuoteEvent::Completed {
                operation,
                quote: *quote,
            },
            Err(e) => QuoteEvent::Rejected {
                operation,
                reason: e.to_string(),
            },
        };
        self.observer.on_event(event);
    }
}

/// Prices `items` with the default rates; invalid input yields `Quote::ZERO`.
pub fn quote_from_items<I: LineItem>(items: &[I]) -> Quote {
    QuoteCalculator::silent().quote_from_items(items)
}

/// Prices `items` with the default rates.
pub fn try_quote_from_items<I: LineItem>(items: &[I]) -> Result<Quote, QuoteError> {
    QuoteCalculator::silent().try_quote_from_items(items)
}

/// Converts a currency amount; invalid input yields `Quote::ZERO`.
pub fn quote_from_amount(value: f64) -> Quote {
    QuoteCalculator::silent().quote_from_amount(value)
}

/// Converts a currency amount.
pub fn try_quote_from_amount(value: f64) -> Result<Quote, QuoteError> {
    QuoteCalculator::silent().try_quote_from_amount(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartItem;
    use proptest::prelude::*;
    use std::sync::{Arc, Mutex};

    struct Qty(i32);

    impl LineItem for Qty {
        fn quantity(&self) -> i32 {
            self.0
        }
    }

    #[derive(Default)]
    struct RecordingObserver {
        events: Mutex<Vec<QuoteEvent>>,
    }

    impl QuoteObserver for RecordingObserver {
        fn on_event(&self, event: QuoteEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    fn quote(units: u32, subunits: u32) -> Quote {
        Quote::new(units, subunits).unwrap()
    }

    #[test]
    fn three_items_cost_eleven_fifty() {
        assert_eq!(quote_from_items(&[Qty(3)]), quote(11, 50));
        assert_eq!(quote_from_items(&[Qty(3)]).to_string(), "$11.50");
    }

    #[test]
    fn quantities_are_summed_across_items() {
        let items = vec![CartItem::new("OLJCESPC7Z", 2), CartItem::new("66VCHSJNUP", 5)];
        assert_eq!(quote_from_items(&items), quote(13, 50));
    }

    #[test]
    fn zero_quantity_clamps_to_zero() {
        assert_eq!(quote_from_items(&[Qty(0)]), Quote::ZERO);
        assert_eq!(quote_from_items(&[Qty(4), Qty(-1)]), Quote::ZERO);
    }

    #[test]
    fn zero_quantity_is_reported_by_try_form() {
        assert_eq!(
            try_quote_from_items(&[Qty(4), Qty(0), Qty(-2)]),
            Err(QuoteError::InvalidQuantity {
                index: 1,
                quantity: 0
            })
        );
    }

    #[test]
    fn empty_cart_is_free() {
        let empty: [CartItem; 0] = [];
        assert_eq!(quote_from_items(&empty), Quote::ZERO);
        assert_eq!(try_quote_from_items(&empty), Ok(Quote::ZERO));
    }

    #[test]
    fn amount_conversion() {
        assert_eq!(quote_from_amount(0.0), Quote::ZERO);
        assert_eq!(quote_from_amount(10.555), quote(10, 56));
        assert_eq!(quote_from_amount(-5.0), Quote::ZERO);
        assert_eq!(try_quote_from_amount(-5.0), Err(QuoteError::NegativeAmount(-5.0)));
    }

    #[test]
    fn custom_rates_are_applied() {
        let rates = ShippingRates::new(Decimal::new(499, 2), Decimal::new(125, 2));
        let calculator = QuoteCalculator::new(rates, NoOpObserver);
        // 4.99 + 1.25 * 3
        assert_eq!(calculator.quote_from_items(&[Qty(3)]), quote(8, 74));
    }

    #[test]
    fn large_carts_overflow_to_rejection() {
        let items: Vec<Qty> = (0..5).map(|_| Qty(i32::MAX)).collect();
        assert!(matches!(
            try_quote_from_items(&items),
            Err(QuoteError::AmountOutOfRange(_))
        ));
        assert_eq!(quote_from_items(&items), Quote::ZERO);
    }

    #[test]
    fn observer_sees_received_then_outcome() {
        let observer = Arc::new(RecordingObserver::default());
        let calculator = QuoteCalculator::new(ShippingRates::default(), Arc::clone(&observer));

        calculator.quote_from_items(&[Qty(1)]);
        calculator.quote_from_amount(-1.0);

        let events = observer.events.lock().unwrap();
        assert_eq!(events.len(), 4);
        assert_eq!(
            events[0],
            QuoteEvent::Received {
                operation: Operation::CreateQuoteFromItems
            }
        );
        assert_eq!(
            events[1],
            QuoteEvent::Completed {
                operation: Operation::CreateQuoteFromItems,
                quote: quote(10, 50)
            }
        );
        assert!(matches!(
            events[3],
            QuoteEvent::Rejected {
                operation: Operation::CreateQuoteFromAmount,
                ..
            }
        ));
    }

    proptest! {
        #[test]
        fn cost_never_decreases_with_more_items(
            quantities in prop::collection::vec(1i32..1_000, 0..20),
            extra in 1i32..1_000,
        ) {
            let base: Vec<Qty> = quantities.iter().map(|q| Qty(*q)).collect();
            let mut more: Vec<Qty> = quantities.iter().map(|q| Qty(*q)).collect();
            more.push(Qty(extra));
            prop_assert!(quote_from_items(&more) >= quote_from_items(&base));
        }

        #[test]
        fn matches_flat_fee_formula(quantity in 1i32..100_000) {
            let expected = 1_000 + 50 * u64::from(quantity as u32);
            prop_assert_eq!(quote_from_items(&[Qty(quantity)]).total_subunits(), expected);
        }
    }
}
