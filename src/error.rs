//! Domain errors.
//!
//! Every variant names the offending record so a caller can point the
//! owner at the exact bid or booking that needs fixing.

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// A bid that cannot take part in a recommendation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("bid {bid_id}: end date {end} is before start date {start}")]
    EndBeforeStart {
        bid_id: String,
        start: NaiveDate,
        end: NaiveDate,
    },
    #[error("bid {bid_id}: bid amount must be positive, got {amount}")]
    NonPositiveAmount { bid_id: String, amount: Decimal },
    #[error("bid {bid_id}: out-station charges cannot be negative, got {charges}")]
    NegativeSurcharge { bid_id: String, charges: Decimal },
    #[error("bid {bid_id}: identifier appears more than once")]
    DuplicateId { bid_id: String },
    #[error("bid {bid_id}: profit is too large to represent")]
    ProfitOverflow { bid_id: String },
}

impl ValidationError {
    /// Identifier of the bid that failed validation.
    pub fn bid_id(&self) -> &str {
        match self {
            ValidationError::EndBeforeStart { bid_id, .. }
            | ValidationError::NonPositiveAmount { bid_id, .. }
            | ValidationError::NegativeSurcharge { bid_id, .. }
            | ValidationError::DuplicateId { bid_id }
            | ValidationError::ProfitOverflow { bid_id } => bid_id,
        }
    }
}

/// A booking whose invoice cannot be computed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BillingError {
    #[error("booking {booking_id}: end date {end} is before start date {start}")]
    EndBeforeStart {
        booking_id: String,
        start: NaiveDate,
        end: NaiveDate,
    },
    #[error("booking {booking_id}: end odometer {end} is below start odometer {start}")]
    OdometerRollback {
        booking_id: String,
        start: u64,
        end: u64,
    },
    #[error("booking {booking_id}: {field} cannot be negative, got {value}")]
    NegativeRate {
        booking_id: String,
        field: &'static str,
        value: Decimal,
    },
    #[error("booking {booking_id}: invoice amount is too large to represent")]
    AmountOverflow { booking_id: String },
}
