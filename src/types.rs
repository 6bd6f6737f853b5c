//! Shared types for the BIDWISE engine.
//!
//! These types form the data model used across the engine, billing and
//! service modules. Field names follow the marketplace's JSON (camelCase)
//! so records fetched from the bid store deserialize without remapping.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Bid
// ---------------------------------------------------------------------------

/// A renter's proposed per-day price and inclusive date range for one car.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bid {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(with = "calendar_date")]
    pub start_date: NaiveDate,
    #[serde(with = "calendar_date")]
    pub end_date: NaiveDate,
    /// Proposed price per day.
    pub bid_amount: Decimal,
    pub trip_type: TripType,
    /// Informational only; selection never filters on it.
    #[serde(default)]
    pub status: BidStatus,
    #[serde(default)]
    pub car: CarRates,
}

impl Bid {
    /// Inclusive day count of the bid's date range.
    pub fn duration_days(&self) -> i64 {
        crate::engine::profit::duration_days(self.start_date, self.end_date)
    }

    /// Whether this bid's range ends strictly before `other` starts.
    pub fn ends_before(&self, other: &Bid) -> bool {
        self.end_date < other.start_date
    }

    /// Helper to build a test bid for the same car.
    #[cfg(test)]
    pub fn sample(id: &str, start: &str, end: &str, amount: Decimal, trip_type: TripType) -> Self {
        Bid {
            id: id.to_string(),
            start_date: parse_calendar_date(start).expect("valid test date"),
            end_date: parse_calendar_date(end).expect("valid test date"),
            bid_amount: amount,
            trip_type,
            status: BidStatus::Pending,
            car: CarRates::default(),
        }
    }
}

/// The car a bid references. Only the surcharge matters to profit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarRates {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Per-day surcharge for out-station trips. Missing means no surcharge.
    #[serde(default)]
    pub out_station_charges: Option<Decimal>,
}

impl CarRates {
    pub fn with_out_station_charges(charges: Decimal) -> Self {
        Self {
            id: None,
            out_station_charges: Some(charges),
        }
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Local use or inter-city travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TripType {
    InCity,
    OutStation,
}

impl TripType {
    pub const ALL: &'static [TripType] = &[TripType::InCity, TripType::OutStation];

    /// Wire name, as used in the marketplace JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            TripType::InCity => "inCity",
            TripType::OutStation => "outStation",
        }
    }
}

impl fmt::Display for TripType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attempt to parse a wire name into a TripType (exact match).
impl std::str::FromStr for TripType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inCity" => Ok(TripType::InCity),
            "outStation" => Ok(TripType::OutStation),
            _ => Err(anyhow::anyhow!("Unknown trip type: {s}")),
        }
    }
}

/// Owner decision on a bid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BidStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

// ---------------------------------------------------------------------------
// Booking
// ---------------------------------------------------------------------------

/// An accepted bid turned into a rental, with odometer readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(with = "calendar_date")]
    pub start_date: NaiveDate,
    #[serde(with = "calendar_date")]
    pub end_date: NaiveDate,
    pub bid_amount: Decimal,
    pub trip_type: TripType,
    pub car: BookingCar,
    #[serde(default)]
    pub start_odometer: Option<u64>,
    #[serde(default)]
    pub end_odometer: Option<u64>,
    #[serde(default)]
    pub late_days: u32,
}

/// Car rates relevant to billing a booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingCar {
    pub price_per_km: Decimal,
    #[serde(default)]
    pub out_station_charges: Option<Decimal>,
    /// Late-return fine as a percentage of the daily bid amount.
    #[serde(default)]
    pub fine_percentage: Option<Decimal>,
}

// ---------------------------------------------------------------------------
// Calendar dates
// ---------------------------------------------------------------------------

/// Parse a calendar date from `YYYY-MM-DD` or an RFC 3339 timestamp.
///
/// Timestamps are reduced to their calendar date in UTC, which is how the
/// bid store serialises date-only fields.
pub fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc).date_naive())
    })
}

/// Serde adapter for [`parse_calendar_date`]; serialises as `YYYY-MM-DD`.
pub mod calendar_date {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format("%Y-%m-%d"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_calendar_date(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid calendar date: {raw}")))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
