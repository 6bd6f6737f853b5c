//! Bid selection engine — picks the most profitable set of bids that can
//! all be honoured with one car.
//!
//! Pure and synchronous: no I/O, no logging, no shared state. The service
//! layer is responsible for reporting what the engine decided.

pub mod profit;
pub mod schedule;

pub use schedule::{ConflictSearch, Recommendation};

use crate::error::ValidationError;
use crate::types::Bid;

/// Recommends bids for a single car using a fixed conflict search.
#[derive(Debug, Clone, Copy, Default)]
pub struct BidRecommender {
    search: ConflictSearch,
}

impl BidRecommender {
    pub fn new(search: ConflictSearch) -> Self {
        Self { search }
    }

    pub fn search(&self) -> ConflictSearch {
        self.search
    }

    /// Maximum-profit non-overlapping subset of `bids`.
    ///
    /// All bids are assumed to reference the same car. Input order does not
    /// matter except to break ties between equal schedules.
    pub fn recommend<'a>(&self, bids: &'a [Bid]) -> Result<Recommendation<'a>, ValidationError> {
        schedule::select_bids(bids, self.search)
    }
}

/// Recommend bids with the default (end-sorted) conflict search.
pub fn recommend_bids(bids: &[Bid]) -> Result<Recommendation<'_>, ValidationError> {
    BidRecommender::default().recommend(bids)
}
