//! Reassignment transaction: move a set of units to one target region.
//!
//! For each unit whose region changes, population and every category are
//! debited from the old region (when it had one) and credited to the target,
//! then the unit is reparented. Unknown ids are skipped with a warning. No seat
//! recomputation happens here.

use std::collections::BTreeSet;

use rd_core::{RegionKey, UnitId};
use tracing::{debug, warn};

use crate::aggregate::{AggregateTable, Field};
use crate::store::UnitStore;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReassignWarning {
    MissingUnit(UnitId),
}

/// What one `reassign` call did. Id lists are ascending.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReassignReport {
    pub target: RegionKey,
    pub moved: Vec<UnitId>,
    /// Already in the target region.
    pub unchanged: Vec<UnitId>,
    pub warnings: Vec<ReassignWarning>,
}

/// Apply one batch move. Duplicate ids in `ids` count once.
pub fn reassign<I>(
    store: &mut UnitStore,
    table: &mut AggregateTable,
    ids: I,
    target: RegionKey,
) -> ReassignReport
where
    I: IntoIterator<Item = UnitId>,
{
    let ids: BTreeSet<UnitId> = ids.into_iter().collect();
    let mut report = ReassignReport {
        target,
        moved: Vec::with_capacity(ids.len()),
        unchanged: Vec::new(),
        warnings: Vec::new(),
    };

    for id in ids {
        let Some(pos) = store.position(id) else {
            warn!(%id, "reassign: unit not found; skipped");
            report.warnings.push(ReassignWarning::MissingUnit(id));
            continue;
        };
        let unit = &store.units()[pos];
        if unit.region == Some(target) {
            report.unchanged.push(id);
            continue;
        }

        let pop = unit.population as i64;
        if let Some(old) = unit.region {
            table.apply_delta(old, Field::Population, -pop);
            for (c, v) in unit.counts.iter() {
                table.apply_delta(old, Field::Category(c), -(v as i64));
            }
        }
        table.apply_delta(target, Field::Population, pop);
        for (c, v) in unit.counts.iter() {
            table.apply_delta(target, Field::Category(c), v as i64);
        }
        store.set_region(pos, Some(target));
        report.moved.push(id);
    }

    debug!(
        target = %target,
        moved = report.moved.len(),
        unchanged = report.unchanged.len(),
        missing = report.warnings.len(),
        "reassign committed"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rd_core::{Category, CategoryCounts, Unit, REGION_COUNT};

    fn key(s: &str) -> RegionKey {
        s.parse().unwrap()
    }

    fn setup(units: Vec<Unit>) -> (UnitStore, AggregateTable) {
        let store = UnitStore::new(units);
        let mut table = AggregateTable::new();
        table.rebuild_from_units(store.units());
        (store, table)
    }

    #[test]
    fn three_units_shift_population_and_dem() {
        let x = key("NV");
        let y = key("UT");
        let dem = [5, 0, 0];
        let mut units: Vec<Unit> = [10u64, 20, 30]
            .iter()
            .zip(dem)
            .enumerate()
            .map(|(i, (&pop, d))| {
                let counts = CategoryCounts { dem: d, gop: 1, ..CategoryCounts::default() };
                Unit::new(UnitId::new(i as u32 + 1), Some(x), pop, counts)
            })
            .collect();
        units.push(Unit::new(UnitId::new(99), Some(x), 1000, CategoryCounts { dem: 7, ..Default::default() }));
        let (mut store, mut table) = setup(units);

        let x_before = *table.get(x);
        let y_before = *table.get(y);
        let r = reassign(&mut store, &mut table, [1, 2, 3].map(UnitId::new), y);

        assert_eq!(r.moved.len(), 3);
        assert_eq!(table.get(x).population, x_before.population - 60);
        assert_eq!(table.get(y).population, y_before.population + 60);
        assert_eq!(table.get(x).total(Category::Dem), x_before.total(Category::Dem) - 5);
        assert_eq!(table.get(y).total(Category::Dem), y_before.total(Category::Dem) + 5);
        assert_eq!(table.get(y).total(Category::Gop), 3);
    }

    #[test]
    fn same_region_missing_and_unassigned() {
        let wy = key("WY");
        let (mut store, mut table) = setup(vec![
            Unit::new(UnitId::new(1), Some(wy), 5, CategoryCounts::default()),
            Unit::new(UnitId::new(2), None, 8, CategoryCounts { oth: 2, ..Default::default() }),
        ]);
        let r = reassign(&mut store, &mut table, [1, 2, 3, 2].map(UnitId::new), wy);
        assert_eq!(r.unchanged, vec![UnitId::new(1)]);
        assert_eq!(r.moved, vec![UnitId::new(2)]);
        assert_eq!(r.warnings, vec![ReassignWarning::MissingUnit(UnitId::new(3))]);
        assert_eq!(table.get(wy).population, 13);
        assert_eq!(table.get(wy).total(Category::Oth), 2);
        assert_eq!(store.get(UnitId::new(2)).and_then(|u| u.region), Some(wy));
    }

    fn arb_units() -> impl Strategy<Value = Vec<Unit>> {
        proptest::collection::vec(
            (proptest::option::of(0..REGION_COUNT), 0u64..10_000, 0u64..500, 0u64..500, 0u64..50),
            1..60,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (r, pop, dem, gop, oth))| {
                    let counts = CategoryCounts { dem, gop, oth, ..Default::default() };
                    Unit::new(UnitId::new(i as u32), r.and_then(RegionKey::from_index), pop, counts)
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn aggregates_track_assignments(
            units in arb_units(),
            moves in proptest::collection::vec(
                (proptest::collection::vec(0u32..70, 0..10), 0..REGION_COUNT),
                0..20,
            ),
        ) {
            let (mut store, mut table) = setup(units);
            for (ids, target) in moves {
                let target = RegionKey::from_index(target).unwrap();
                reassign(&mut store, &mut table, ids.into_iter().map(UnitId::new), target);
            }
            let mut fresh = AggregateTable::new();
            fresh.rebuild_from_units(store.units());
            prop_assert_eq!(table, fresh);
        }
    }
}
