//! Page-level event bus.
//!
//! In-process analog of the dashboard's page-scoped custom events: components
//! that learn a token's market cap or last transaction price publish here, and
//! any component on the "page" (datafeed, header, ticker) picks it up without
//! a direct reference to the publisher.

use crate::shared::TokenAddress;
use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 64;

/// Cross-component notifications.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// A component derived a fresh market cap for a token.
    MarketCapUpdate {
        token_address: TokenAddress,
        market_cap: f64,
    },
    /// The price of the most recent transaction changed.
    LastTransactionPriceUpdate {
        token_address: TokenAddress,
        price: f64,
    },
}

/// Clone-able broadcast handle. Subscribers created after an event was
/// published do not see it; slow subscribers may drop old events.
#[derive(Clone)]
pub struct PageBus {
    tx: broadcast::Sender<PageEvent>,
}

impl PageBus {
    pub fn new() -> Self {
        Self {
            tx: broadcast::channel(CHANNEL_CAPACITY).0,
        }
    }

    /// Subscribe to all page events.
    pub fn subscribe(&self) -> broadcast::Receiver<PageEvent> {
        self.tx.subscribe()
    }

    /// Publish an event and return the receiver count.
    /// Returns 0 when nothing is listening.
    pub fn publish(&self, event: PageEvent) -> usize {
        self.tx.send(event).unwrap_or(0)
    }
}

impl Default for PageBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_reaches_subscriber() {
        let bus = PageBus::new();
        let mut rx = bus.subscribe();

        let event = PageEvent::MarketCapUpdate {
            token_address: TokenAddress::from("tok1"),
            market_cap: 500.0,
        };
        assert_eq!(bus.publish(event.clone()), 1);
        assert_eq!(rx.recv().await.unwrap(), event);
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_lossy() {
        let bus = PageBus::new();
        let event = PageEvent::LastTransactionPriceUpdate {
            token_address: TokenAddress::from("tok1"),
            price: 0.002,
        };
        assert_eq!(bus.publish(event), 0);
    }
}
