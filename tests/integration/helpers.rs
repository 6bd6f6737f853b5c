//! Builders and a brute-force oracle shared by the integration tests.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;

use bidwise::engine::profit::profit;
use bidwise::{Bid, BidStatus, CarRates, TripType};

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn bid(id: &str, start: &str, end: &str, amount: Decimal, trip_type: TripType) -> Bid {
    Bid {
        id: id.to_string(),
        start_date: date(start),
        end_date: date(end),
        bid_amount: amount,
        trip_type,
        status: BidStatus::Pending,
        car: CarRates::default(),
    }
}

/// Bid starting `offset` days after 2024-01-01 and lasting `len + 1` days.
pub fn bid_at(id: usize, offset: i64, len: i64, amount: Decimal, trip_type: TripType, car: &CarRates) -> Bid {
    let start = date("2024-01-01") + Duration::days(offset);
    Bid {
        id: format!("b{id}"),
        start_date: start,
        end_date: start + Duration::days(len),
        bid_amount: amount,
        trip_type,
        status: BidStatus::Pending,
        car: car.clone(),
    }
}

pub fn overlaps(a: &Bid, b: &Bid) -> bool {
    !(a.end_date < b.start_date || b.end_date < a.start_date)
}

/// Best total profit over every non-overlapping subset.
pub fn brute_force_max(bids: &[Bid]) -> Decimal {
    let n = bids.len();
    let mut best = Decimal::ZERO;
    for mask in 0u32..(1 << n) {
        let chosen: Vec<&Bid> = (0..n).filter(|i| mask & (1 << i) != 0).map(|i| &bids[i]).collect();
        let compatible = chosen
            .iter()
            .enumerate()
            .all(|(i, a)| chosen[i + 1..].iter().all(|b| !overlaps(a, b)));
        if compatible {
            let total: Decimal = chosen.iter().map(|b| profit(b).unwrap()).sum();
            best = best.max(total);
        }
    }
    best
}
