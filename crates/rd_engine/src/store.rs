//! Unit record store, kept sorted by id.
//!
//! Position in the store is the share codec's coordinate: the `i`-th unit here
//! is the `i`-th symbol of an expanded payload.

use rd_core::determinism::{is_sorted_by_id, sort_units_by_id};
use rd_core::{RegionKey, Unit, UnitId};
use rd_io::codec::Assignment;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UnitStore {
    units: Vec<Unit>,
}

impl UnitStore {
    /// Take ownership of `units`, sorting them by id. Later duplicates of an id are dropped.
    pub fn new(mut units: Vec<Unit>) -> Self {
        sort_units_by_id(&mut units);
        units.dedup_by_key(|u| u.id);
        debug_assert!(is_sorted_by_id(&units));
        UnitStore { units }
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn position(&self, id: UnitId) -> Option<usize> {
        self.units.binary_search_by_key(&id, |u| u.id).ok()
    }

    pub fn get(&self, id: UnitId) -> Option<&Unit> {
        self.position(id).map(|i| &self.units[i])
    }

    /// `(id, region)` pairs in ascending id order.
    pub fn snapshot(&self) -> Vec<Assignment> {
        self.units.iter().map(|u| (u.id, u.region)).collect()
    }

    /// Regions in ascending id order.
    pub fn regions(&self) -> impl Iterator<Item = Option<RegionKey>> + '_ {
        self.units.iter().map(|u| u.region)
    }

    /// Bulk overwrite from a decoded payload: `regions[i]` goes to the `i`-th unit.
    /// Units past the end of `regions` keep their assignment.
    pub(crate) fn overwrite_regions(&mut self, regions: &[Option<RegionKey>]) {
        for (unit, region) in self.units.iter_mut().zip(regions) {
            unit.region = *region;
        }
    }

    pub(crate) fn set_region(&mut self, pos: usize, region: Option<RegionKey>) {
        self.units[pos].region = region;
    }
}
