//! Electoral summary: who leads each region and how the seats split.
//!
//! A region is led by `dem` only when its dem total is strictly larger than its
//! gop total; everything else (including empty regions) counts for `gop`.

use rd_core::format::lean_bucket;
use rd_core::{Category, RegionKey};
use serde::Serialize;

use crate::aggregate::AggregateTable;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegionOutcome {
    pub region: RegionKey,
    pub leader: Category,
    pub seats: u32,
    /// Dem share of the two-party vote in steps of 5; `None` without votes.
    pub lean: Option<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ElectoralSummary {
    pub regions: Vec<RegionOutcome>,
    pub dem_seats: u32,
    pub gop_seats: u32,
    pub total_seats: u32,
}

impl ElectoralSummary {
    pub fn from_table(table: &AggregateTable) -> Self {
        let mut out = ElectoralSummary { regions: Vec::new(), dem_seats: 0, gop_seats: 0, total_seats: 0 };
        for (region, row) in table.iter() {
            let dem = row.total(Category::Dem).max(0) as u64;
            let gop = row.total(Category::Gop).max(0) as u64;
            let leader = if dem > gop { Category::Dem } else { Category::Gop };
            match leader {
                Category::Dem => out.dem_seats += row.seats,
                _ => out.gop_seats += row.seats,
            }
            out.total_seats += row.seats;
            out.regions.push(RegionOutcome { region, leader, seats: row.seats, lean: lean_bucket(dem, gop) });
        }
        out
    }

    /// Dem share of all seats in percent, for the bar split.
    pub fn dem_share_pct(&self) -> f64 {
        if self.total_seats == 0 {
            return 0.0;
        }
        f64::from(self.dem_seats) / f64::from(self.total_seats) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::Field;
    use rd_algo::{allocate_equal_proportions, ApportionParams};

    #[test]
    fn leaders_and_seat_split() {
        let mut t = AggregateTable::new();
        let (ca, tx, vt) = ("CA".parse().unwrap(), "TX".parse().unwrap(), "VT".parse().unwrap());
        for (r, pop, dem, gop) in [(ca, 300, 60, 40), (tx, 200, 40, 60), (vt, 100, 50, 50)] {
            t.apply_delta(r, Field::Population, pop);
            t.apply_delta(r, Field::Category(Category::Dem), dem);
            t.apply_delta(r, Field::Category(Category::Gop), gop);
        }
        let params = ApportionParams { total_seats: 20, fixed_region: None, ..Default::default() };
        let alloc = allocate_equal_proportions(&t.populations().unwrap(), &params).unwrap();
        t.set_seats(&alloc);

        let s = ElectoralSummary::from_table(&t);
        assert_eq!(s.total_seats, 26);
        assert_eq!(s.dem_seats, t.get(ca).seats);
        assert_eq!(s.gop_seats, t.get(tx).seats + t.get(vt).seats);
        let vt_row = s.regions.iter().find(|o| o.region == vt).unwrap();
        assert_eq!(vt_row.leader, Category::Gop);
        assert_eq!(vt_row.lean, Some(50));
        let empty = s.regions.iter().find(|o| o.region.abbrev() == "WY").unwrap();
        assert_eq!((empty.seats, empty.lean), (0, None));
    }

    #[test]
    fn outcome_serializes_with_string_keys() {
        let o = RegionOutcome { region: "NV".parse().unwrap(), leader: Category::Dem, seats: 6, lean: Some(50) };
        let v = serde_json::to_value(&o).unwrap();
        assert_eq!(v, serde_json::json!({ "region": "NV", "leader": "dem", "seats": 6, "lean": 50 }));
    }

    #[test]
    fn empty_summary_share() {
        let s = ElectoralSummary::from_table(&AggregateTable::new());
        assert_eq!(s.total_seats, 0);
        assert_eq!(s.dem_share_pct(), 0.0);
    }
}
