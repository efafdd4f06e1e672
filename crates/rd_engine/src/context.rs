//! MapContext: one independent map instance.
//!
//! Load order: units are sorted into the store, an optional share payload
//! overwrites assignments, the aggregate table is rebuilt in one pass, and seats
//! are apportioned. A context value only exists once all of that has finished.

use std::path::Path;

use rd_algo::{allocate_equal_proportions, Apportionment};
use rd_core::{ApportionParams, RegionKey, Unit, UnitId};
use rd_io::catalog::{self, DatasetEntry};
use rd_io::codec::{self, Assignment, DecodeWarning};
use rd_io::dataset::{load_dataset, LoadWarning};
use tracing::{debug, warn};

use crate::aggregate::{AggregateTable, RegionAggregate};
use crate::outcome::ElectoralSummary;
use crate::selection::PendingSelection;
use crate::store::UnitStore;
use crate::transaction::{self, ReassignReport};
use crate::{parse_region, EngineResult};

#[derive(Debug, Clone)]
pub struct MapContext {
    entry: &'static DatasetEntry,
    params: ApportionParams,
    store: UnitStore,
    table: AggregateTable,
    apportionment: Apportionment,
    load_warnings: Vec<LoadWarning>,
    decode_warnings: Vec<DecodeWarning>,
}

impl MapContext {
    /// Build a context from already-loaded units.
    pub fn load(
        entry: &'static DatasetEntry,
        units: Vec<Unit>,
        share: Option<&str>,
        params: ApportionParams,
    ) -> EngineResult<Self> {
        let mut store = UnitStore::new(units);
        let mut decode_warnings = Vec::new();
        if let Some(payload) = share {
            let decoded = codec::decode(payload, store.len());
            store.overwrite_regions(&decoded.regions);
            decode_warnings = decoded.warnings;
        }

        let mut table = AggregateTable::new();
        table.rebuild_from_units(store.units());

        let apportionment = allocate_equal_proportions(&table.populations()?, &params)?;
        table.set_seats(&apportionment);

        Ok(MapContext {
            entry,
            params,
            store,
            table,
            apportionment,
            load_warnings: Vec::new(),
            decode_warnings,
        })
    }

    /// Read a dataset file and build a context for it.
    pub fn open(
        entry: &'static DatasetEntry,
        path: &Path,
        share: Option<&str>,
        params: ApportionParams,
    ) -> EngineResult<Self> {
        let ds = load_dataset(path)?;
        let mut ctx = Self::load(entry, ds.units, share, params)?;
        ctx.load_warnings = ds.warnings;
        Ok(ctx)
    }

    /// Resolve `year` in the catalog and open its file under `data_dir`.
    pub fn open_year(
        data_dir: &Path,
        year: &str,
        share: Option<&str>,
        params: ApportionParams,
    ) -> EngineResult<Self> {
        let entry = catalog::lookup(year);
        Self::open(entry, &data_dir.join(entry.file), share, params)
    }

    /// Recompute every region's seats from current populations.
    pub fn apportion(&mut self) -> EngineResult<&Apportionment> {
        let populations = self.table.populations()?;
        self.apportionment = allocate_equal_proportions(&populations, &self.params)?;
        self.table.set_seats(&self.apportionment);
        if self.apportionment.overallocated > 0 {
            warn!(
                capacity = self.apportionment.capacity,
                overallocated = self.apportionment.overallocated,
                "floor seats exceed capacity; no seats contested"
            );
        }
        debug!(
            total = self.apportionment.total(),
            last_seat = ?self.apportionment.last_seat,
            "apportioned"
        );
        Ok(&self.apportionment)
    }

    /// Move units to `target`. Seats are left stale until `apportion`.
    pub fn reassign<I>(&mut self, ids: I, target: RegionKey) -> ReassignReport
    where
        I: IntoIterator<Item = UnitId>,
    {
        transaction::reassign(&mut self.store, &mut self.table, ids, target)
    }

    /// `reassign` for a region named by abbreviation. Nothing moves on an unknown name.
    pub fn reassign_named<I>(&mut self, ids: I, target: &str) -> EngineResult<ReassignReport>
    where
        I: IntoIterator<Item = UnitId>,
    {
        let target = parse_region(target)?;
        Ok(self.reassign(ids, target))
    }

    /// Commit a pending selection: one reassignment, clear, re-apportion.
    pub fn commit(&mut self, selection: &mut PendingSelection, target: RegionKey) -> EngineResult<ReassignReport> {
        let report = self.reassign(selection.iter().collect::<Vec<_>>(), target);
        selection.clear();
        self.apportion()?;
        Ok(report)
    }

    pub fn entry(&self) -> &'static DatasetEntry {
        self.entry
    }

    pub fn params(&self) -> &ApportionParams {
        &self.params
    }

    pub fn units(&self) -> &[Unit] {
        self.store.units()
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.store.get(id)
    }

    pub fn aggregate(&self, region: RegionKey) -> &RegionAggregate {
        self.table.get(region)
    }

    pub fn aggregates(&self) -> impl Iterator<Item = (RegionKey, &RegionAggregate)> + '_ {
        self.table.iter()
    }

    pub fn apportionment(&self) -> &Apportionment {
        &self.apportionment
    }

    pub fn summary(&self) -> ElectoralSummary {
        ElectoralSummary::from_table(&self.table)
    }

    pub fn load_warnings(&self) -> &[LoadWarning] {
        &self.load_warnings
    }

    pub fn decode_warnings(&self) -> &[DecodeWarning] {
        &self.decode_warnings
    }

    pub fn snapshot(&self) -> Vec<Assignment> {
        self.store.snapshot()
    }

    /// Encoded assignment of every unit.
    pub fn share_payload(&self) -> String {
        codec::encode_ordered(self.store.regions())
    }

    /// Share URL on `base`; the year is omitted when it equals `default_year`.
    pub fn share_url(&self, base: &str, default_year: &str) -> EngineResult<String> {
        Ok(rd_io::share::share_url(base, self.entry.year, default_year, &self.share_payload())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rd_core::{Category, CategoryCounts};

    fn key(s: &str) -> RegionKey {
        s.parse().unwrap()
    }

    fn units() -> Vec<Unit> {
        let row = |id: u32, r: &str, pop: u64, dem: u64, gop: u64| {
            Unit::new(UnitId::new(id), Some(key(r)), pop, CategoryCounts { dem, gop, ..Default::default() })
        };
        vec![
            row(1001, "AL", 100, 10, 90),
            row(1003, "AL", 200, 20, 180),
            row(2001, "AK", 50, 30, 20),
            row(11001, "DC", 10, 9, 1),
            Unit::new(UnitId::new(72001), None, 5, CategoryCounts::default()),
        ]
    }

    fn small() -> ApportionParams {
        ApportionParams { total_seats: 10, ..ApportionParams::default() }
    }

    #[test]
    fn load_rebuilds_and_apportions() {
        let ctx = MapContext::load(catalog::lookup("2020"), units(), None, small()).unwrap();
        assert_eq!(ctx.aggregate(key("AL")).population, 300);
        assert_eq!(ctx.aggregate(key("DC")).seats, 3);
        // 10 contested + 2 per growing region + 3 for DC
        assert_eq!(ctx.apportionment().total(), 10 + 2 * 2 + 3);
    }

    #[test]
    fn share_payload_overrides_assignment() {
        let base = MapContext::load(catalog::lookup("2020"), units(), None, small()).unwrap();
        let payload = base.share_payload();
        assert_eq!(payload, "2abiZ");

        let moved = MapContext::load(catalog::lookup("2020"), units(), Some("3aiZ"), small()).unwrap();
        assert!(moved.decode_warnings().is_empty());
        assert_eq!(moved.aggregate(key("AK")).population, 0);
        assert_eq!(moved.aggregate(key("AK")).seats, 0);
        assert_eq!(moved.aggregate(key("AL")).population, 350);
        assert_eq!(moved.share_payload(), "3aiZ");
    }

    #[test]
    fn malformed_share_unassigns_everything() {
        let ctx = MapContext::load(catalog::lookup("2020"), units(), Some("4"), small()).unwrap();
        assert_eq!(ctx.decode_warnings().len(), 1);
        assert!(ctx.aggregates().all(|(_, r)| r.population == 0 && r.seats == 0));
        assert_eq!(ctx.apportionment().unfilled, 10);
    }

    #[test]
    fn floors_over_capacity_keep_floor_seats() {
        let params = ApportionParams { total_seats: 0, ..ApportionParams::default() };
        let ctx = MapContext::load(catalog::lookup("2020"), units(), None, params).unwrap();
        // capacity 0 + 2 * 2 + 3 = 7 against floors 3 * 3 = 9
        assert_eq!(ctx.apportionment().capacity, 7);
        assert_eq!(ctx.apportionment().overallocated, 2);
        assert_eq!(ctx.aggregate(key("AL")).seats, 3);
        assert_eq!(ctx.summary().total_seats, 9);
    }

    #[test]
    fn commit_moves_clears_and_reapportions() {
        let mut ctx = MapContext::load(catalog::lookup("2020"), units(), None, small()).unwrap();
        let mut sel: PendingSelection = [1001, 1003].map(UnitId::new).into_iter().collect();
        let report = ctx.commit(&mut sel, key("AK")).unwrap();
        assert_eq!(report.moved.len(), 2);
        assert!(sel.is_empty());
        assert_eq!(ctx.aggregate(key("AL")).seats, 0);
        // AK is the only growing region: 10 contested + its 2 bonus
        assert_eq!(ctx.aggregate(key("AK")).seats, 10 + 2);
        assert_eq!(ctx.aggregate(key("AK")).total(Category::Gop), 290);

        assert!(ctx.reassign_named([UnitId::new(2001)], "ZZ").is_err());
        assert_eq!(ctx.unit(UnitId::new(2001)).and_then(|u| u.region), Some(key("AK")));
    }

    #[test]
    fn share_url_uses_entry_year() {
        let ctx = MapContext::load(catalog::lookup("2008"), units(), None, small()).unwrap();
        let url = ctx.share_url("https://example.org/", "2020").unwrap();
        assert_eq!(url, "https://example.org/?year=2008&share=2abiZ");
    }
}
