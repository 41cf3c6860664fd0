//! Order book: per-product bid and offer stacks, best-price extraction,
//! and depth aggregation.

use super::bond::Bond;
use super::side::PricingSide;
use crate::error::PipelineError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single market order. Immutable value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub price: f64,
    pub quantity: i64,
    pub side: PricingSide,
}

impl Order {
    pub fn new(price: f64, quantity: i64, side: PricingSide) -> Self {
        Self {
            price,
            quantity,
            side,
        }
    }
}

/// Best bid / best offer snapshot. No identity beyond its two orders.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BidOffer {
    pub bid: Order,
    pub offer: Order,
}

impl BidOffer {
    pub fn spread(&self) -> f64 {
        self.offer.price - self.bid.price
    }
}

/// Bid and offer stacks for one product. Insertion order of the stacks is
/// irrelevant: price is the sole key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBook {
    pub product: Bond,
    pub bid_stack: Vec<Order>,
    pub offer_stack: Vec<Order>,
}

impl OrderBook {
    pub fn new(product: Bond, bid_stack: Vec<Order>, offer_stack: Vec<Order>) -> Self {
        Self {
            product,
            bid_stack,
            offer_stack,
        }
    }

    /// An empty book for a product that has not yet received depth.
    pub fn empty(product: Bond) -> Self {
        Self::new(product, Vec::new(), Vec::new())
    }

    /// Best bid (maximum price) and best offer (minimum price). The first
    /// extremal order encountered wins ties.
    pub fn best_bid_offer(&self) -> Result<BidOffer, PipelineError> {
        let bid = self
            .bid_stack
            .iter()
            .copied()
            .reduce(|best, o| if o.price > best.price { o } else { best })
            .ok_or(PipelineError::EmptyBook(PricingSide::Bid))?;
        let offer = self
            .offer_stack
            .iter()
            .copied()
            .reduce(|best, o| if o.price < best.price { o } else { best })
            .ok_or(PipelineError::EmptyBook(PricingSide::Offer))?;
        Ok(BidOffer { bid, offer })
    }

    /// Collapse each stack to one synthetic order per price level, summing
    /// quantity. Idempotent: aggregating an aggregated book is a no-op
    /// (levels are already unique).
    pub fn aggregate(self) -> OrderBook {
        OrderBook {
            bid_stack: aggregate_stack(self.bid_stack, PricingSide::Bid),
            offer_stack: aggregate_stack(self.offer_stack, PricingSide::Offer),
            product: self.product,
        }
    }
}

fn aggregate_stack(stack: Vec<Order>, side: PricingSide) -> Vec<Order> {
    // Keyed on the price's bit pattern: exact equality grouping, and for
    // the positive prices in this domain the bit order is the numeric
    // order, so the output is deterministic.
    let mut levels: BTreeMap<u64, i64> = BTreeMap::new();
    for order in stack {
        *levels.entry(order.price.to_bits()).or_insert(0) += order.quantity;
    }
    levels
        .into_iter()
        .map(|(bits, quantity)| Order::new(f64::from_bits(bits), quantity, side))
        .collect()
}
