//! Properties checked over seeded random inputs against brute force.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use bidwise::engine::profit::{duration_days, profit};
use bidwise::{recommend_bids, Bid, CarRates, TripType};

use crate::helpers::{bid, bid_at, brute_force_max, date};

const CASES: u64 = 500;

fn random_bids(rng: &mut StdRng) -> Vec<Bid> {
    let n = rng.gen_range(0..=6);
    let car = CarRates::with_out_station_charges(Decimal::from(rng.gen_range(0..50u32)));
    (0..n)
        .map(|i| {
            let trip_type = if rng.gen_bool(0.3) {
                TripType::OutStation
            } else {
                TripType::InCity
            };
            bid_at(
                i,
                rng.gen_range(0..15),
                rng.gen_range(0..6),
                Decimal::from(rng.gen_range(1..200u32)),
                trip_type,
                &car,
            )
        })
        .collect()
}

#[test]
fn test_selection_never_overlaps() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..CASES {
        let bids = random_bids(&mut rng);
        let rec = recommend_bids(&bids).unwrap();
        for pair in rec.selected_bids.windows(2) {
            assert!(pair[0].end_date < pair[1].start_date, "overlap in {:?}", rec.selected_ids());
        }
    }
}

#[test]
fn test_max_profit_matches_brute_force() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..CASES {
        let bids = random_bids(&mut rng);
        let rec = recommend_bids(&bids).unwrap();
        assert_eq!(rec.max_profit, brute_force_max(&bids), "bids: {bids:?}");
    }
}

#[test]
fn test_max_profit_is_sum_of_selection() {
    let mut rng = StdRng::seed_from_u64(1234);
    for _ in 0..CASES {
        let bids = random_bids(&mut rng);
        let rec = recommend_bids(&bids).unwrap();
        let total: Decimal = rec.selected_bids.iter().map(|b| profit(b).unwrap()).sum();
        assert_eq!(rec.max_profit, total);
    }
}

#[test]
fn test_nested_ranges_match_brute_force() {
    // Long outer bid containing short inner bids: the shape that trips up
    // a start-ordered search.
    let car = CarRates::default();
    let bids = vec![
        bid_at(0, 0, 9, dec!(1000), TripType::InCity, &car),
        bid_at(1, 1, 0, dec!(100), TripType::InCity, &car),
        bid_at(2, 2, 0, dec!(100), TripType::InCity, &car),
        bid_at(3, 4, 1, dec!(100), TripType::InCity, &car),
        bid_at(4, 1, 1, dec!(4000), TripType::InCity, &car),
        bid_at(5, 5, 3, dec!(3000), TripType::InCity, &car),
    ];
    let rec = recommend_bids(&bids).unwrap();
    assert_eq!(rec.max_profit, brute_force_max(&bids));
    // b4 (2 days × 4000) + b5 (4 days × 3000)
    assert_eq!(rec.max_profit, dec!(20000));
}

#[test]
fn test_singleton_always_selected() {
    let mut rng = StdRng::seed_from_u64(99);
    for i in 0..50 {
        let car = CarRates::with_out_station_charges(dec!(30));
        let b = bid_at(i, rng.gen_range(0..30), rng.gen_range(0..10), dec!(80), TripType::OutStation, &car);
        let bids = vec![b];
        let rec = recommend_bids(&bids).unwrap();
        assert_eq!(rec.max_profit, profit(&bids[0]).unwrap());
        assert_eq!(rec.selected_bids, vec![&bids[0]]);
    }
}

#[test]
fn test_same_day_is_one_day() {
    assert_eq!(duration_days(date("2024-07-15"), date("2024-07-15")), 1);
    let b = bid("d", "2024-07-15", "2024-07-15", dec!(640), TripType::InCity);
    assert_eq!(b.duration_days(), 1);
    assert_eq!(profit(&b).unwrap(), dec!(640));
}

#[test]
fn test_out_station_premium_is_charges_times_days() {
    let car = CarRates::with_out_station_charges(dec!(125));
    for len in 0..7 {
        let local = bid_at(0, 3, len, dec!(900), TripType::InCity, &car);
        let away = bid_at(0, 3, len, dec!(900), TripType::OutStation, &car);
        let days = Decimal::from(local.duration_days());
        assert_eq!(profit(&away).unwrap() - profit(&local).unwrap(), dec!(125) * days);
    }
}
