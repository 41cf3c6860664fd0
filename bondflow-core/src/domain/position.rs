//! Per-book signed positions for a product.

use super::bond::Bond;
use super::trade::Trade;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Signed net quantity per book for a single product. Mutated only by
/// applying trades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub product: Bond,
    books: BTreeMap<String, i64>,
}

impl Position {
    pub fn new(product: Bond) -> Self {
        Self {
            product,
            books: BTreeMap::new(),
        }
    }

    /// Net quantity in one book; zero if the book has never traded.
    pub fn position(&self, book: &str) -> i64 {
        self.books.get(book).copied().unwrap_or(0)
    }

    /// Sum across all books.
    pub fn aggregate_position(&self) -> i64 {
        self.books.values().sum()
    }

    /// Apply a trade: buys add, sells subtract.
    pub fn apply(&mut self, trade: &Trade) {
        *self.books.entry(trade.book.clone()).or_insert(0) +=
            trade.side.sign() * trade.quantity;
    }

    pub fn books(&self) -> impl Iterator<Item = (&str, i64)> {
        self.books.iter().map(|(book, qty)| (book.as_str(), *qty))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.product.cusip)?;
        for (book, quantity) in &self.books {
            write!(f, ",{book},{quantity}")?;
        }
        Ok(())
    }
}
