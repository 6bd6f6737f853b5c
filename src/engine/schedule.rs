//! Weighted interval scheduling over a car's bids.
//!
//! `dp[i]` holds the best profit reachable with the first `i + 1` bids of
//! the ordered schedule, and `path[i]` the schedule indices achieving it.
//! A bid may follow another only when the earlier one ends strictly before
//! the later one starts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::profit::{check_bid, profit};
use crate::error::ValidationError;
use crate::types::Bid;

// ---------------------------------------------------------------------------
// Conflict search
// ---------------------------------------------------------------------------

/// How the schedule is ordered and how the latest compatible predecessor
/// of a bid is located.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictSearch {
    /// Order by end date and binary-search the end dates. Always yields a
    /// non-overlapping, maximum-profit selection.
    #[default]
    EndSorted,
    /// Order by start date and use the marketplace's historical probing
    /// search. Matches historical recommendations, but on nested date
    /// ranges it can miss compatible bids or pair overlapping ones.
    Legacy,
}

impl fmt::Display for ConflictSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictSearch::EndSorted => write!(f, "end_sorted"),
            ConflictSearch::Legacy => write!(f, "legacy"),
        }
    }
}

impl ConflictSearch {
    fn order(self, bids: &mut [&Bid]) {
        // Both sorts are stable, so equal keys keep the caller's order.
        match self {
            ConflictSearch::EndSorted => {
                bids.sort_by(|a, b| a.end_date.cmp(&b.end_date).then(a.start_date.cmp(&b.start_date)))
            }
            ConflictSearch::Legacy => bids.sort_by_key(|b| b.start_date),
        }
    }

    fn latest_non_conflict(self, schedule: &[&Bid], i: usize) -> Option<usize> {
        match self {
            ConflictSearch::EndSorted => latest_non_conflict(schedule, i),
            ConflictSearch::Legacy => legacy_latest_non_conflict(schedule, i),
        }
    }
}

/// Largest `k < i` whose bid ends before `schedule[i]` starts, assuming the
/// schedule is ordered by end date.
fn latest_non_conflict(schedule: &[&Bid], i: usize) -> Option<usize> {
    let compatible = schedule[..i].partition_point(|b| b.ends_before(schedule[i]));
    compatible.checked_sub(1)
}

/// The historical start-ordered probe: step right while the neighbour is
/// still compatible, otherwise settle on `mid`.
fn legacy_latest_non_conflict(schedule: &[&Bid], i: usize) -> Option<usize> {
    let bid = schedule[i];
    let mut low: isize = 0;
    let mut high: isize = i as isize - 1;

    while low <= high {
        let mid = (low + high) / 2;
        if schedule[mid as usize].ends_before(bid) {
            if mid < high && schedule[(mid + 1) as usize].ends_before(bid) {
                low = mid + 1;
            } else {
                return Some(mid as usize);
            }
        } else {
            high = mid - 1;
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Recommendation
// ---------------------------------------------------------------------------

/// The best non-overlapping subset of a car's bids.
///
/// `selected_bids` borrows the caller's records, in schedule order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation<'a> {
    pub max_profit: Decimal,
    pub selected_bids: Vec<&'a Bid>,
}

impl<'a> Recommendation<'a> {
    pub fn empty() -> Self {
        Self {
            max_profit: Decimal::ZERO,
            selected_bids: Vec::new(),
        }
    }

    /// Identifiers of the selected bids, in schedule order.
    pub fn selected_ids(&self) -> Vec<&'a str> {
        self.selected_bids.iter().map(|b| b.id.as_str()).collect()
    }
}

/// Validate every bid, then run the DP. Fails atomically: either all bids
/// are usable and a recommendation is returned, or nothing is computed.
pub fn select_bids(bids: &[Bid], search: ConflictSearch) -> Result<Recommendation<'_>, ValidationError> {
    let mut seen = HashSet::with_capacity(bids.len());
    for bid in bids {
        check_bid(bid)?;
        if !seen.insert(bid.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                bid_id: bid.id.clone(),
            });
        }
    }

    if bids.is_empty() {
        return Ok(Recommendation::empty());
    }

    let mut schedule: Vec<&Bid> = bids.iter().collect();
    search.order(&mut schedule);

    let profits = schedule
        .iter()
        .map(|bid| profit(bid))
        .collect::<Result<Vec<_>, _>>()?;

    let n = schedule.len();
    let mut dp: Vec<Decimal> = Vec::with_capacity(n);
    let mut path: Vec<Vec<usize>> = Vec::with_capacity(n);

    dp.push(profits[0]);
    path.push(vec![0]);

    for i in 1..n {
        let prev = search.latest_non_conflict(&schedule, i);
        let incl = profits[i]
            .checked_add(prev.map_or(Decimal::ZERO, |k| dp[k]))
            .ok_or_else(|| ValidationError::ProfitOverflow {
                bid_id: schedule[i].id.clone(),
            })?;

        // Strictly greater: on a tie the schedule without bid `i` is kept.
        if incl > dp[i - 1] {
            let mut chosen = prev.map_or_else(Vec::new, |k| path[k].clone());
            chosen.push(i);
            dp.push(incl);
            path.push(chosen);
        } else {
            dp.push(dp[i - 1]);
            path.push(path[i - 1].clone());
        }
    }

    Ok(Recommendation {
        max_profit: dp[n - 1],
        selected_bids: path[n - 1].iter().map(|&i| schedule[i]).collect(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
