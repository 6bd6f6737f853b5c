//! Day-count and profit arithmetic.
//!
//! Day counts are inclusive: a rental that starts and ends on the same
//! calendar day is billed as one day. Billing reuses these helpers so an
//! invoice always agrees with the profit the recommendation promised.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::types::{Bid, TripType};

/// Inclusive number of days from `start` to `end`.
///
/// Returns zero or a negative number when `end` precedes `start`; callers
/// validate ranges before relying on the result.
pub fn duration_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

/// Out-station surcharge for a trip of `days` days.
/// In-city trips and cars without configured charges pay nothing.
///
/// `None` when the product does not fit in a `Decimal`.
pub fn out_station_surcharge(
    trip_type: TripType,
    charges: Option<Decimal>,
    days: i64,
) -> Option<Decimal> {
    match trip_type {
        TripType::OutStation => charges
            .unwrap_or(Decimal::ZERO)
            .checked_mul(Decimal::from(days)),
        TripType::InCity => Some(Decimal::ZERO),
    }
}

/// Revenue estimate for a bid: daily amount over the inclusive range,
/// plus the per-day surcharge for out-station trips.
pub fn profit(bid: &Bid) -> Result<Decimal, ValidationError> {
    let days = bid.duration_days();
    bid.bid_amount
        .checked_mul(Decimal::from(days))
        .zip(out_station_surcharge(bid.trip_type, bid.car.out_station_charges, days))
        .and_then(|(base, surcharge)| base.checked_add(surcharge))
        .ok_or_else(|| ValidationError::ProfitOverflow {
            bid_id: bid.id.clone(),
        })
}

/// Reject a bid whose arithmetic would be meaningless.
pub fn check_bid(bid: &Bid) -> Result<(), ValidationError> {
    if bid.end_date < bid.start_date {
        return Err(ValidationError::EndBeforeStart {
            bid_id: bid.id.clone(),
            start: bid.start_date,
            end: bid.end_date,
        });
    }
    if bid.bid_amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount {
            bid_id: bid.id.clone(),
            amount: bid.bid_amount,
        });
    }
    if let Some(charges) = bid.car.out_station_charges {
        if charges < Decimal::ZERO {
            return Err(ValidationError::NegativeSurcharge {
                bid_id: bid.id.clone(),
                charges,
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
