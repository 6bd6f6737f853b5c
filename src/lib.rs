//! BIDWISE — bid recommendation and billing engine for peer-to-peer car rentals.
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod billing;
pub mod config;
pub mod engine;
pub mod error;
pub mod server;
pub mod types;
pub mod validation;

pub use engine::{recommend_bids, BidRecommender, ConflictSearch, Recommendation};
pub use error::{BillingError, ValidationError};
pub use types::{Bid, BidStatus, Booking, CarRates, TripType};
