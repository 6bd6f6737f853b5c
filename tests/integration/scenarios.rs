//! Concrete owner-facing scenarios.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use bidwise::engine::profit::profit;
use bidwise::{recommend_bids, BidRecommender, CarRates, ConflictSearch, TripType, ValidationError};

use crate::helpers::bid;

#[test]
fn test_two_disjoint_bids_both_selected() {
    let bids = vec![
        bid("A", "2024-01-01", "2024-01-05", dec!(1000), TripType::InCity),
        bid("B", "2024-01-06", "2024-01-10", dec!(1200), TripType::InCity),
    ];
    let rec = recommend_bids(&bids).unwrap();
    assert_eq!(rec.max_profit, dec!(11000));
    assert_eq!(rec.selected_ids(), vec!["A", "B"]);
}

#[test]
fn test_overlap_prefers_more_profitable_bid() {
    let bids = vec![
        bid("A", "2024-01-01", "2024-01-10", dec!(1000), TripType::InCity),
        bid("B", "2024-01-05", "2024-01-08", dec!(5000), TripType::InCity),
    ];
    assert_eq!(profit(&bids[0]).unwrap(), dec!(10000));
    assert_eq!(profit(&bids[1]).unwrap(), dec!(20000));

    let rec = recommend_bids(&bids).unwrap();
    assert_eq!(rec.max_profit, dec!(20000));
    assert_eq!(rec.selected_ids(), vec!["B"]);
}

#[test]
fn test_skipping_largest_bid_wins() {
    // "peak" is the single most valuable bid, but it blocks both others,
    // which together are worth more.
    let bids = vec![
        bid("peak", "2024-01-03", "2024-01-08", dec!(2000), TripType::InCity),
        bid("early", "2024-01-01", "2024-01-04", dec!(1500), TripType::InCity),
        bid("late", "2024-01-05", "2024-01-10", dec!(1500), TripType::InCity),
    ];
    assert!(profit(&bids[0]).unwrap() > profit(&bids[1]).unwrap());
    assert!(profit(&bids[0]).unwrap() > profit(&bids[2]).unwrap());

    for search in [ConflictSearch::EndSorted, ConflictSearch::Legacy] {
        let rec = BidRecommender::new(search).recommend(&bids).unwrap();
        assert_eq!(rec.max_profit, dec!(15000), "search={search}");
        assert_eq!(rec.selected_ids(), vec!["early", "late"], "search={search}");
    }
}

#[test]
fn test_out_station_surcharge_profit() {
    let mut b = bid("trip", "2024-03-01", "2024-03-03", dec!(500), TripType::OutStation);
    b.car = CarRates::with_out_station_charges(dec!(100));
    let bids = vec![b];

    let rec = recommend_bids(&bids).unwrap();
    assert_eq!(rec.max_profit, dec!(1800));
    assert_eq!(rec.selected_ids(), vec!["trip"]);
}

#[test]
fn test_empty_input() {
    let rec = recommend_bids(&[]).unwrap();
    assert_eq!(rec.max_profit, Decimal::ZERO);
    assert!(rec.selected_bids.is_empty());
}

#[test]
fn test_unsorted_input_same_result() {
    let forward = vec![
        bid("a", "2024-02-01", "2024-02-03", dec!(300), TripType::InCity),
        bid("b", "2024-02-02", "2024-02-06", dec!(400), TripType::InCity),
        bid("c", "2024-02-04", "2024-02-05", dec!(900), TripType::InCity),
        bid("d", "2024-02-07", "2024-02-07", dec!(250), TripType::InCity),
    ];
    let mut backward = forward.clone();
    backward.reverse();

    let a = recommend_bids(&forward).unwrap();
    let b = recommend_bids(&backward).unwrap();
    assert_eq!(a.max_profit, b.max_profit);
    assert_eq!(a.selected_ids(), b.selected_ids());
    // a (900) + c (1800) + d (250)
    assert_eq!(a.max_profit, dec!(2950));
}

#[test]
fn test_store_payload_round_trip() {
    let payload = r#"{"bids": [
        {"_id": "x1", "startDate": "2024-05-01T00:00:00.000Z", "endDate": "2024-05-02T00:00:00.000Z",
         "bidAmount": 1100, "tripType": "outStation", "status": "pending",
         "car": {"_id": "c9", "outStationCharges": 200}},
        {"_id": "x2", "startDate": "2024-05-02T00:00:00.000Z", "endDate": "2024-05-04T00:00:00.000Z",
         "bidAmount": 900, "tripType": "inCity", "status": "pending",
         "car": {"_id": "c9", "outStationCharges": 200}}
    ]}"#;
    let body: serde_json::Value = serde_json::from_str(payload).unwrap();
    let bids = bidwise::server::routes::parse_bids(body).unwrap();

    let rec = recommend_bids(&bids).unwrap();
    // x1: 2 days × (1100 + 200) = 2600; x2: 3 days × 900 = 2700; they share 05-02.
    assert_eq!(rec.max_profit, dec!(2700));
    assert_eq!(rec.selected_ids(), vec!["x2"]);

    let json = serde_json::to_value(&rec).unwrap();
    assert_eq!(json["selectedBids"][0]["startDate"], "2024-05-02");
}

#[test]
fn test_century_long_huge_bid_is_rejected() {
    let body = serde_json::json!([
        {"id": "fine", "startDate": "2024-01-01", "endDate": "2024-01-03", "bidAmount": 100, "tripType": "inCity"},
        {"id": "huge", "startDate": "2024-01-01", "endDate": "2124-01-01", "bidAmount": 5e24, "tripType": "inCity"}
    ]);
    let bids = bidwise::server::routes::parse_bids(body).unwrap();

    for search in [ConflictSearch::EndSorted, ConflictSearch::Legacy] {
        let err = BidRecommender::new(search).recommend(&bids).unwrap_err();
        assert_eq!(err, ValidationError::ProfitOverflow { bid_id: "huge".into() });
    }
}
