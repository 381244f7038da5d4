//! Observability seam for the quote calculator.
//!
//! The calculator never logs on its own; it reports `QuoteEvent`s to an injected
//! `QuoteObserver`. `LogObserver` forwards them to the `log` facade, `NoOpObserver`
//! drops them.

use log::{info, warn};
use strum::{Display, EnumString};

use crate::quote::Quote;

/// Calculator operation an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum Operation {
    /// Quote computed from cart line items.
    CreateQuoteFromItems,
    /// Quote computed from a raw currency amount.
    CreateQuoteFromAmount,
}

/// Events emitted by the quote calculator.
#[derive(Debug, Clone, PartialEq)]
pub enum QuoteEvent {
    /// A computation started.
    Received {
        /// Operation that was invoked.
        operation: Operation,
    },

    /// A computation finished with a quote.
    Completed {
        /// Operation that was invoked.
        operation: Operation,
        /// Resulting quote.
        quote: Quote,
    },

    /// The input was rejected.
    Rejected {
        /// Operation that was invoked.
        operation: Operation,
        /// Human-readable rejection reason.
        reason: String,
    },
}

/// Receiver of calculator events.
/// Implementations can handle logging, metrics, auditing, etc.
pub trait QuoteObserver: Send + Sync {
    /// Handle a calculator event.
    fn on_event(&self, event: QuoteEvent);
}

impl<T: QuoteObserver + ?Sized> QuoteObserver for std::sync::Arc<T> {
    fn on_event(&self, event: QuoteEvent) {
        (**self).on_event(event);
    }
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpObserver;

impl QuoteObserver for NoOpObserver {
    fn on_event(&self, _event: QuoteEvent) {}
}

/// Observer that writes events through the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl QuoteObserver for LogObserver {
    fn on_event(&self, event: QuoteEvent) {
        match event {
            QuoteEvent::Received { operation } => info!("[{}] received request", operation),
            QuoteEvent::Completed { operation, quote } => {
                info!("[{}] completed request: {}", operation, quote)
            }
            QuoteEvent::Rejected { operation, reason } => {
                warn!("[{}] rejected request: {}", operation, reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_names_match_log_labels() {
        assert_eq!(Operation::CreateQuoteFromItems.to_string(), "CreateQuoteFromItems");
        assert_eq!(
            "CreateQuoteFromAmount".parse::<Operation>().unwrap(),
            Operation::CreateQuoteFromAmount
        );
    }

    #[derive(Default)]
    struct RecordingObserver {
        events: std::sync::Mutex<Vec<QuoteEvent>>,
    }

    impl QuoteObserver for RecordingObserver {
        fn on_event(&self, event: QuoteEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    #[test]
    fn shared_observer_receives_forwarded_events() {
        let recorder = std::sync::Arc::new(RecordingObserver::default());
        let shared: Box<dyn QuoteObserver> = Box::new(std::sync::Arc::clone(&recorder));
        let event = QuoteEvent::Rejected {
            operation: Operation::CreateQuoteFromAmount,
            reason: String::from("Negative amount: -5"),
        };

        shared.on_event(event.clone());
        NoOpObserver.on_event(event.clone());
        LogObserver.on_event(event.clone());

        assert_eq!(*recorder.events.lock().unwrap(), vec![event]);
    }
}
