//! Bid draft validation.
//!
//! Checks a bid a renter is about to place and reports every problem at
//! once, so a form can highlight all offending fields in one round trip.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{parse_calendar_date, TripType};

/// Raw bid form input. Everything is optional because reporting what is
/// missing is part of the job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidDraft {
    #[serde(default)]
    pub car_id: Option<String>,
    #[serde(default)]
    pub bid_amount: Option<Decimal>,
    /// The car's base price; a bid must beat it when known.
    #[serde(default)]
    pub base_price: Option<Decimal>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub trip_type: Option<String>,
}

/// Form field a validation message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    CarId,
    BidAmount,
    StartDate,
    EndDate,
    TripType,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::CarId => write!(f, "carId"),
            Field::BidAmount => write!(f, "bidAmount"),
            Field::StartDate => write!(f, "startDate"),
            Field::EndDate => write!(f, "endDate"),
            Field::TripType => write!(f, "tripType"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

/// Outcome of validating a draft: success, or every field error found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<FieldError>,
    pub message: String,
}

impl ValidationReport {
    fn from_errors(errors: Vec<FieldError>) -> Self {
        let message = if errors.is_empty() {
            "Bid data is valid".to_string()
        } else {
            errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join(". ")
        };
        Self {
            is_valid: errors.is_empty(),
            errors,
            message,
        }
    }

    /// Messages reported for one field.
    pub fn messages_for(&self, field: Field) -> Vec<&str> {
        self.errors
            .iter()
            .filter(|e| e.field == field)
            .map(|e| e.message.as_str())
            .collect()
    }
}

impl BidDraft {
    /// Validate the draft. `today` is the earliest acceptable start date.
    pub fn validate(&self, today: NaiveDate) -> ValidationReport {
        let mut errors = Vec::new();
        let mut push = |field: Field, message: String| errors.push(FieldError { field, message });

        match self.car_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => {}
            _ => push(Field::CarId, "Car ID is required".into()),
        }

        match self.bid_amount {
            None => push(Field::BidAmount, "Bid amount is required".into()),
            Some(amount) if amount <= Decimal::ZERO => {
                push(Field::BidAmount, "Bid amount must be positive".into())
            }
            Some(amount) => {
                if let Some(base) = self.base_price {
                    if amount <= base {
                        push(
                            Field::BidAmount,
                            format!("Bid amount must be greater than the base price of {base}"),
                        );
                    }
                }
            }
        }

        let start = match self.start_date.as_deref() {
            None => {
                push(Field::StartDate, "Start date is required".into());
                None
            }
            Some(raw) => match parse_calendar_date(raw) {
                None => {
                    push(Field::StartDate, "Start date is invalid".into());
                    None
                }
                Some(date) => {
                    if date < today {
                        push(Field::StartDate, "Start date cannot be in the past".into());
                    }
                    Some(date)
                }
            },
        };

        match self.end_date.as_deref() {
            None => push(Field::EndDate, "End date is required".into()),
            Some(raw) => match parse_calendar_date(raw) {
                None => push(Field::EndDate, "End date is invalid".into()),
                Some(end) => {
                    if start.is_some_and(|start| end < start) {
                        push(Field::EndDate, "End date must be after start date".into());
                    }
                }
            },
        }

        if self.trip_type.as_deref().and_then(|t| t.parse::<TripType>().ok()).is_none() {
            let names: Vec<&str> = TripType::ALL.iter().map(TripType::as_str).collect();
            push(
                Field::TripType,
                format!("Invalid trip type. Must be one of: {}", names.join(", ")),
            );
        }

        ValidationReport::from_errors(errors)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
