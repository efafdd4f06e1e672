//! Report model built from a `MapContext`.
//!
//! Everything here is presentation data: strings are already formatted
//! (thousands separators, two-decimal percents) so renderers only lay them out.

use rd_core::format::{int_with_commas, lean_bucket, percent_2dp};
use rd_core::{Category, DisplayMode, RegionKey, Unit, UnitId};
use rd_engine::MapContext;
use serde::Serialize;

/// Region table columns after the region key.
pub const TABLE_HEADERS: [&str; 8] = ["population", "seats", "dem", "gop", "grn", "lib", "una", "oth"];

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegionRow {
    pub region: RegionKey,
    pub leader: Category,
    pub population: String,
    pub seats: String,
    /// One cell per category, `Category::ALL` order.
    pub cells: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CandidateRow {
    pub candidate: String,
    pub votes: String,
    pub pct: String,
}

/// Hover detail for one unit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UnitDetail {
    pub id: UnitId,
    pub name: Option<String>,
    pub region: Option<RegionKey>,
    pub rows: Vec<CandidateRow>,
}

/// Fill class of a unit, relative to the leader of its region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitShade {
    /// Lean bucket on the leader's side of 50.
    Lean(u8),
    /// Unit leans against a dem-led region.
    BelowHalf,
    /// Unit leans against a gop-led region.
    AboveHalf,
    NoVotes,
    Unassigned,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SummaryBlock {
    pub dem_seats: u32,
    pub gop_seats: u32,
    pub total_seats: u32,
    pub dem_share: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReportModel {
    pub headline: String,
    pub year: String,
    pub display: DisplayMode,
    pub rows: Vec<RegionRow>,
    pub summary: SummaryBlock,
    pub share_payload: String,
    pub share_url: Option<String>,
    pub warnings: Vec<String>,
}

fn non_negative(v: i64) -> u64 {
    v.max(0) as u64
}

/// One row per known region, canonical order.
pub fn build_region_rows(ctx: &MapContext, mode: DisplayMode) -> Vec<RegionRow> {
    ctx.aggregates()
        .map(|(region, agg)| {
            let dem = agg.total(Category::Dem);
            let gop = agg.total(Category::Gop);
            let votes = non_negative(agg.votes());
            let cells = Category::ALL
                .iter()
                .map(|&c| match mode {
                    DisplayMode::Raw => int_with_commas(agg.total(c)),
                    DisplayMode::Percent => percent_2dp(non_negative(agg.total(c)), votes),
                })
                .collect();
            RegionRow {
                region,
                leader: if dem > gop { Category::Dem } else { Category::Gop },
                population: int_with_commas(agg.population),
                seats: int_with_commas(i64::from(agg.seats)),
                cells,
            }
        })
        .collect()
}

/// Candidate rows for categories with votes; `None` for an unknown id.
pub fn unit_detail(ctx: &MapContext, id: UnitId) -> Option<UnitDetail> {
    let unit = ctx.unit(id)?;
    let entry = ctx.entry();
    let total: u64 = unit.counts.iter().map(|(_, v)| v).sum();
    let rows = unit
        .counts
        .iter()
        .filter(|&(_, v)| v > 0)
        .map(|(c, v)| CandidateRow {
            candidate: entry.candidate(c).to_string(),
            votes: int_with_commas(v as i64),
            pct: percent_2dp(v, total),
        })
        .collect();
    Some(UnitDetail { id, name: unit.name.clone(), region: unit.region, rows })
}

pub fn unit_shade(ctx: &MapContext, unit: &Unit) -> UnitShade {
    let Some(region) = unit.region else {
        return UnitShade::Unassigned;
    };
    let Some(bucket) = lean_bucket(unit.counts.dem, unit.counts.gop) else {
        return UnitShade::NoVotes;
    };
    let agg = ctx.aggregate(region);
    let dem_led = agg.total(Category::Dem) > agg.total(Category::Gop);
    match (dem_led, bucket < 50) {
        (true, true) => UnitShade::BelowHalf,
        (false, false) => UnitShade::AboveHalf,
        _ => UnitShade::Lean(bucket),
    }
}

pub fn build_model(ctx: &MapContext, mode: DisplayMode, share_url: Option<String>) -> ReportModel {
    let s = ctx.summary();
    let mut warnings: Vec<String> = ctx.load_warnings().iter().map(ToString::to_string).collect();
    warnings.extend(ctx.decode_warnings().iter().map(ToString::to_string));
    if ctx.apportionment().unfilled > 0 {
        warnings.push(format!("unfilled seats: {}", ctx.apportionment().unfilled));
    }
    if ctx.apportionment().overallocated > 0 {
        warnings.push(format!(
            "floor seats exceed capacity {} by {}",
            ctx.apportionment().capacity,
            ctx.apportionment().overallocated
        ));
    }

    ReportModel {
        headline: ctx.entry().headline(),
        year: ctx.entry().year.to_string(),
        display: mode,
        rows: build_region_rows(ctx, mode),
        summary: SummaryBlock {
            dem_seats: s.dem_seats,
            gop_seats: s.gop_seats,
            total_seats: s.total_seats,
            dem_share: percent_2dp(u64::from(s.dem_seats), u64::from(s.total_seats)),
        },
        share_payload: ctx.share_payload(),
        share_url,
        warnings,
    }
}

#[cfg(test)]
pub(crate) mod fixture {
    use rd_core::{ApportionParams, CategoryCounts, Unit, UnitId};
    use rd_engine::MapContext;

    pub fn context() -> MapContext {
        context_with(ApportionParams { total_seats: 10, ..ApportionParams::default() })
    }

    pub fn context_with(params: ApportionParams) -> MapContext {
        let unit = |id: u32, r: Option<&str>, name: &str, pop: u64, counts: CategoryCounts| {
            let mut u = Unit::new(UnitId::new(id), r.and_then(|s| s.parse().ok()), pop, counts);
            u.name = Some(name.to_string());
            u
        };
        let units = vec![
            unit(
                1001,
                Some("AL"),
                "Autauga",
                58_805,
                CategoryCounts { dem: 5_936, gop: 19_838, lib: 350, ..Default::default() },
            ),
            unit(2013, Some("AK"), "Aleutians East", 3_420, CategoryCounts { dem: 600, gop: 400, ..Default::default() }),
            unit(2016, Some("AK"), "Aleutians West", 5_232, CategoryCounts { dem: 100, gop: 300, ..Default::default() }),
            unit(72001, None, "Adjuntas", 18_000, CategoryCounts::default()),
        ];
        match MapContext::load(rd_io::catalog::lookup("2020"), units, None, params) {
            Ok(ctx) => ctx,
            Err(e) => panic!("fixture: {e}"),
        }
    }
}
