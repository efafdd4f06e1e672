//! Region aggregate table.
//!
//! One row per known region. After `rebuild_from_units`, every row's population
//! and category totals equal the sums over the units assigned to that region.
//! The only other mutation is `apply_delta`, which the reassignment transaction
//! calls in debit/credit pairs. Seats are attached after each apportionment and
//! are not part of the sum invariant.

use rd_algo::{Apportionment, Populations};
use rd_core::entities::CATEGORY_COUNT;
use rd_core::{Category, RegionKey, Unit, REGION_COUNT};
use serde::Serialize;

use crate::{parse_region, EngineError, EngineResult};

/// Aggregate field addressed by a delta.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Population,
    Category(Category),
}

/// Signed so that deltas never need a separate sign channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RegionAggregate {
    pub population: i64,
    /// Indexed by `Category::index()`.
    pub totals: [i64; CATEGORY_COUNT],
    pub seats: u32,
}

impl RegionAggregate {
    #[inline]
    pub fn total(&self, c: Category) -> i64 {
        self.totals[c.index()]
    }

    /// Sum of all category totals.
    pub fn votes(&self) -> i64 {
        self.totals.iter().sum()
    }

    fn field_mut(&mut self, field: Field) -> &mut i64 {
        match field {
            Field::Population => &mut self.population,
            Field::Category(c) => &mut self.totals[c.index()],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AggregateTable {
    rows: [RegionAggregate; REGION_COUNT],
}

impl Default for AggregateTable {
    fn default() -> Self {
        AggregateTable { rows: [RegionAggregate::default(); REGION_COUNT] }
    }
}

impl AggregateTable {
    /// Zeroed table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` (may be negative) to one field of `region`.
    #[inline]
    pub fn apply_delta(&mut self, region: RegionKey, field: Field, amount: i64) {
        *self.rows[region.index()].field_mut(field) += amount;
    }

    /// `apply_delta` for a region named by abbreviation.
    pub fn apply_delta_named(&mut self, region: &str, field: Field, amount: i64) -> EngineResult<()> {
        let key = parse_region(region)?;
        self.apply_delta(key, field, amount);
        Ok(())
    }

    /// Discard every row and recompute from `units` in one pass.
    pub fn rebuild_from_units(&mut self, units: &[Unit]) {
        *self = Self::default();
        for u in units {
            let Some(region) = u.region else { continue };
            self.apply_delta(region, Field::Population, u.population as i64);
            for (c, v) in u.counts.iter() {
                self.apply_delta(region, Field::Category(c), v as i64);
            }
        }
    }

    pub fn get(&self, region: RegionKey) -> &RegionAggregate {
        &self.rows[region.index()]
    }

    /// Rows in canonical region order.
    pub fn iter(&self) -> impl Iterator<Item = (RegionKey, &RegionAggregate)> + '_ {
        RegionKey::all().map(move |r| (r, &self.rows[r.index()]))
    }

    /// Populations for the apportionment engine. Negative rows are rejected.
    pub fn populations(&self) -> EngineResult<Populations> {
        self.iter()
            .map(|(region, row)| {
                u64::try_from(row.population)
                    .map(|p| (region, p))
                    .map_err(|_| EngineError::NegativePopulation { region, population: row.population })
            })
            .collect()
    }

    /// Attach a fresh seat allocation (regions absent from it get 0).
    pub(crate) fn set_seats(&mut self, alloc: &Apportionment) {
        for r in RegionKey::all() {
            self.rows[r.index()].seats = alloc.seats_of(r);
        }
    }
}
