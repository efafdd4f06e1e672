//! Method of equal proportions (Huntington–Hill) over the region table.
//!
//! Contract:
//! - Every region with population > 0 starts at `minimum_seats`; population-0
//!   regions get 0 seats and take no further part.
//! - Capacity = `total_seats` + `bonus_seats_per_region` per populated growing
//!   region + (`bonus_seats_per_region` + `fixed_region_extra`) when the fixed
//!   region is populated. The fixed region never grows past `minimum_seats`.
//! - Remaining seats go one at a time to the growing region with the largest
//!   priority `p / sqrt(n * (n - 1))`, where `n = seats - minimum_seats + 2`.
//! - Ties resolve to the lower canonical region index.
//! - Floors are always granted. When they alone exceed capacity, nothing is
//!   contested and the excess is reported as `overallocated`.
//! - Priorities are compared exactly as `p_a² · n_b(n_b−1)` vs `p_b² · n_a(n_a−1)`
//!   in u128; only on overflow does the comparison fall back to `f64`.
//!
//! The whole allocation is recomputed on every call: seat counts are globally
//! coupled, so there is no valid incremental update.

use core::cmp::Ordering;
use core::fmt;
use std::collections::BinaryHeap;

use rd_core::{ApportionParams, CoreError, RegionKey};

use crate::{Populations, SeatMap};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocError {
    /// Parameter domain violation (e.g. `minimum_seats == 0`).
    InvalidParams(CoreError),
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocError::InvalidParams(e) => write!(f, "invalid apportionment params: {e}"),
        }
    }
}

impl std::error::Error for AllocError {}

/// Result of one full apportionment pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Apportionment {
    /// Seats for every region present in the input (0 for unpopulated ones).
    pub seats: SeatMap,
    /// Seat target the loop filled towards.
    pub capacity: u32,
    /// Region that received the last contested seat, if any seat was contested.
    pub last_seat: Option<RegionKey>,
    /// Region that would receive the next seat beyond capacity.
    pub next_in_line: Option<RegionKey>,
    /// Capacity left unfilled because no growing region exists.
    pub unfilled: u32,
    /// Floor seats handed out beyond capacity; no seat was contested.
    pub overallocated: u32,
}

impl Apportionment {
    pub fn total(&self) -> u32 {
        self.seats.values().sum()
    }

    pub fn seats_of(&self, region: RegionKey) -> u32 {
        self.seats.get(&region).copied().unwrap_or(0)
    }
}

/// Allocate seats for `populations` under `params`.
///
/// Regions absent from `populations` are treated as population 0 and do not
/// appear in the output.
pub fn allocate_equal_proportions(
    populations: &Populations,
    params: &ApportionParams,
) -> Result<Apportionment, AllocError> {
    params.validate().map_err(AllocError::InvalidParams)?;

    let min = params.minimum_seats;
    let mut seats = SeatMap::new();
    let mut allocated: u32 = 0;
    let mut capacity: u32 = params.total_seats;
    let mut heap: BinaryHeap<Priority> = BinaryHeap::new();

    // 1) Floors and capacity.
    for (&region, &pop) in populations.iter() {
        if pop == 0 {
            seats.insert(region, 0);
            continue;
        }
        seats.insert(region, min);
        allocated = allocated.saturating_add(min);
        if Some(region) == params.fixed_region {
            capacity = capacity
                .saturating_add(params.bonus_seats_per_region)
                .saturating_add(params.fixed_region_extra);
        } else {
            capacity = capacity.saturating_add(params.bonus_seats_per_region);
            heap.push(Priority { region, population: pop, next_n: 2 });
        }
    }

    // 2) Contested seats, one at a time.
    let mut last_seat = None;
    while allocated < capacity {
        let Some(mut top) = heap.pop() else { break };
        if let Some(s) = seats.get_mut(&top.region) {
            *s += 1;
        }
        allocated += 1;
        last_seat = Some(top.region);
        top.next_n += 1;
        heap.push(top);
    }

    Ok(Apportionment {
        seats,
        capacity,
        last_seat,
        next_in_line: heap.peek().map(|p| p.region),
        unfilled: capacity.saturating_sub(allocated),
        overallocated: allocated.saturating_sub(capacity),
    })
}

/// Priority value `population / sqrt(n * (n - 1))` as a float, for display.
/// `n < 2` yields `f64::INFINITY` (the floor seat is never contested).
pub fn priority_value(population: u64, n: u64) -> f64 {
    if n < 2 {
        return f64::INFINITY;
    }
    (population as f64) / ((n as f64) * ((n - 1) as f64)).sqrt()
}

/// Heap entry: the priority a region would claim its `next_n`-th growth seat with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Priority {
    region: RegionKey,
    population: u64,
    next_n: u64,
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_priorities(self.population, self.next_n, other.population, other.next_n)
            // lower canonical index ranks higher
            .then_with(|| other.region.cmp(&self.region))
    }
}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compare `p_a / sqrt(n_a(n_a-1))` with `p_b / sqrt(n_b(n_b-1))` (both sides squared).
fn cmp_priorities(p_a: u64, n_a: u64, p_b: u64, n_b: u64) -> Ordering {
    let da = (n_a as u128) * (n_a.saturating_sub(1) as u128);
    let db = (n_b as u128) * (n_b.saturating_sub(1) as u128);
    let pa2 = (p_a as u128) * (p_a as u128);
    let pb2 = (p_b as u128) * (p_b as u128);

    if let (Some(l), Some(r)) = (pa2.checked_mul(db), pb2.checked_mul(da)) {
        l.cmp(&r)
    } else {
        // Deterministic but lossy; only reachable for populations beyond ~1e15.
        priority_value(p_a, n_a)
            .partial_cmp(&priority_value(p_b, n_b))
            .unwrap_or(Ordering::Equal)
    }
}
