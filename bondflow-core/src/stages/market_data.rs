//! Market data stage: per-product order books with depth aggregation.

use crate::domain::{BidOffer, Order, OrderBook};
use crate::error::PipelineError;
use crate::refdata::ReferenceData;
use crate::service::{KeyedStore, ListenerSet, SharedListener};
use std::rc::Rc;

/// Number of price levels per side in the depth feed.
pub const BOOK_DEPTH: usize = 5;

/// One parsed depth record: raw levels for both sides of one product.
#[derive(Debug, Clone)]
pub struct DepthUpdate {
    pub cusip: String,
    pub bids: Vec<Order>,
    pub offers: Vec<Order>,
}

/// Maintains the aggregated order book per CUSIP.
///
/// Each depth record is layered onto the previous aggregated book and the
/// result re-aggregated, so re-ingesting a price level that already exists
/// accumulates quantity at that level rather than replacing it.
pub struct MarketDataService {
    store: KeyedStore<OrderBook>,
    listeners: ListenerSet<OrderBook>,
    refdata: Rc<ReferenceData>,
}

impl MarketDataService {
    pub fn new(refdata: Rc<ReferenceData>) -> Self {
        Self {
            store: KeyedStore::new(),
            listeners: ListenerSet::new(),
            refdata,
        }
    }

    pub fn get(&self, cusip: &str) -> Result<&OrderBook, PipelineError> {
        self.store.get(cusip)
    }

    pub fn subscribe(&mut self, listener: SharedListener<OrderBook>) {
        self.listeners.subscribe(listener);
    }

    /// Best bid/offer of the stored book for a product.
    pub fn best_bid_offer(&self, cusip: &str) -> Result<BidOffer, PipelineError> {
        self.store.get(cusip)?.best_bid_offer()
    }

    /// Layer a depth update onto the product's book, re-aggregate, store,
    /// and notify. The first update for an unknown CUSIP is an
    /// `UnknownProduct` failure.
    pub fn on_depth(&mut self, update: DepthUpdate) -> Result<(), PipelineError> {
        let mut book = match self.store.remove(&update.cusip) {
            Some(book) => book,
            None => OrderBook::empty(self.refdata.bond(&update.cusip)?.clone()),
        };
        book.bid_stack.extend(update.bids);
        book.offer_stack.extend(update.offers);
        self.on_message(book.aggregate())
    }

    /// Replace the stored book wholesale and notify subscribers.
    pub fn on_message(&mut self, book: OrderBook) -> Result<(), PipelineError> {
        self.store.insert(book.product.cusip.clone(), book.clone());
        self.listeners.notify(&book)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PricingSide;

    fn service() -> MarketDataService {
        MarketDataService::new(Rc::new(ReferenceData::us_treasuries()))
    }

    fn update(cusip: &str, bid: f64, offer: f64, qty: i64) -> DepthUpdate {
        DepthUpdate {
            cusip: cusip.into(),
            bids: vec![Order::new(bid, qty, PricingSide::Bid)],
            offers: vec![Order::new(offer, qty, PricingSide::Offer)],
        }
    }

    #[test]
    fn first_depth_builds_an_aggregated_book() {
        let mut md = service();
        md.on_depth(update("91282CAV3", 99.0, 100.0, 1_000_000)).unwrap();
        let best = md.best_bid_offer("91282CAV3").unwrap();
        assert_eq!(best.bid.price, 99.0);
        assert_eq!(best.offer.price, 100.0);
    }

    #[test]
    fn reingesting_a_level_accumulates_quantity() {
        // Layering semantics: a repeated price level adds to the stored
        // aggregate instead of replacing it.
        let mut md = service();
        md.on_depth(update("91282CAV3", 99.0, 100.0, 1_000_000)).unwrap();
        md.on_depth(update("91282CAV3", 99.0, 100.0, 2_000_000)).unwrap();
        let best = md.best_bid_offer("91282CAV3").unwrap();
        assert_eq!(best.bid.quantity, 3_000_000);
        assert_eq!(md.get("91282CAV3").unwrap().bid_stack.len(), 1);
    }

    #[test]
    fn unknown_cusip_fails_hard() {
        let mut md = service();
        assert!(matches!(
            md.on_depth(update("BADCUSIP0", 99.0, 100.0, 1)),
            Err(PipelineError::UnknownProduct(_))
        ));
    }
}
