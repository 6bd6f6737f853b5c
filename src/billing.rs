//! Booking invoices.
//!
//! Turns a finished booking into its bill: the accepted bid over the
//! inclusive rental days, distance from the odometer readings, the
//! out-station surcharge, and late-return fees.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::engine::profit::{duration_days, out_station_surcharge};
use crate::error::BillingError;
use crate::types::Booking;

/// Fine applied per late day when the car does not configure one.
pub const DEFAULT_FINE_PERCENTAGE: Decimal = dec!(50);

/// Itemised bill for one booking.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub booking_id: String,
    pub duration_days: i64,
    pub bid_total: Decimal,
    pub distance_travelled: u64,
    pub distance_charge: Decimal,
    pub out_station_charge: Decimal,
    pub late_days: u32,
    pub fine_percentage: Decimal,
    pub late_fee: Decimal,
    pub total_amount: Decimal,
}

/// Billing rules that are not carried on the booking itself.
#[derive(Debug, Clone)]
pub struct BillingPolicy {
    pub default_fine_percentage: Decimal,
}

impl Default for BillingPolicy {
    fn default() -> Self {
        Self {
            default_fine_percentage: DEFAULT_FINE_PERCENTAGE,
        }
    }
}

impl BillingPolicy {
    pub fn new(default_fine_percentage: Decimal) -> Self {
        Self {
            default_fine_percentage,
        }
    }

    /// Compute the invoice for a booking.
    pub fn invoice(&self, booking: &Booking) -> Result<Invoice, BillingError> {
        if booking.end_date < booking.start_date {
            return Err(BillingError::EndBeforeStart {
                booking_id: booking.id.clone(),
                start: booking.start_date,
                end: booking.end_date,
            });
        }

        // A zero fine on the car means "not configured".
        let fine_percentage = booking
            .car
            .fine_percentage
            .filter(|p| !p.is_zero())
            .unwrap_or(self.default_fine_percentage);

        let rates = [
            ("bid amount", Some(booking.bid_amount)),
            ("price per km", Some(booking.car.price_per_km)),
            ("out-station charges", booking.car.out_station_charges),
            ("fine percentage", Some(fine_percentage)),
        ];
        for (field, value) in rates {
            if let Some(value) = value.filter(|v| *v < Decimal::ZERO) {
                return Err(BillingError::NegativeRate {
                    booking_id: booking.id.clone(),
                    field,
                    value,
                });
            }
        }

        let distance_travelled = match (booking.start_odometer, booking.end_odometer) {
            (Some(start), Some(end)) if end < start => {
                return Err(BillingError::OdometerRollback {
                    booking_id: booking.id.clone(),
                    start,
                    end,
                });
            }
            (Some(start), Some(end)) => end - start,
            // Trip not closed out yet.
            _ => 0,
        };

        let overflow = || BillingError::AmountOverflow {
            booking_id: booking.id.clone(),
        };

        let days = duration_days(booking.start_date, booking.end_date);
        let bid_total = booking
            .bid_amount
            .checked_mul(Decimal::from(days))
            .ok_or_else(overflow)?;
        let distance_charge = Decimal::from(distance_travelled)
            .checked_mul(booking.car.price_per_km)
            .ok_or_else(overflow)?;
        let out_station_charge =
            out_station_surcharge(booking.trip_type, booking.car.out_station_charges, days)
                .ok_or_else(overflow)?;

        let late_fee = booking
            .bid_amount
            .checked_mul(fine_percentage)
            .and_then(|fine| fine.checked_div(dec!(100)))
            .and_then(|fine| booking.bid_amount.checked_add(fine))
            .and_then(|daily| daily.checked_mul(Decimal::from(booking.late_days)))
            .ok_or_else(overflow)?;

        let total_amount = [distance_charge, out_station_charge, late_fee]
            .into_iter()
            .try_fold(bid_total, |acc, charge| acc.checked_add(charge))
            .ok_or_else(overflow)?;

        Ok(Invoice {
            booking_id: booking.id.clone(),
            duration_days: days,
            bid_total,
            distance_travelled,
            distance_charge,
            out_station_charge,
            late_days: booking.late_days,
            fine_percentage,
            late_fee,
            total_amount,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
