//! JSON renderer. Object keys are inserted in display order
//! (headline → year → display → summary → regions → share → warnings).

use serde_json::{Map as JsonMap, Value};

use crate::structure::{RegionRow, ReportModel, SummaryBlock, UnitDetail, TABLE_HEADERS};
use crate::ReportError;

pub fn render_report_json(m: &ReportModel) -> Value {
    let mut root = obj();
    root.insert("headline".into(), Value::String(m.headline.clone()));
    root.insert("year".into(), Value::String(m.year.clone()));
    root.insert("display".into(), Value::String(m.display.to_string()));
    root.insert("summary".into(), summary_json(&m.summary));
    root.insert("regions".into(), Value::Array(m.rows.iter().map(row_json).collect()));

    let mut share = obj();
    share.insert("payload".into(), Value::String(m.share_payload.clone()));
    if let Some(url) = &m.share_url {
        share.insert("url".into(), Value::String(url.clone()));
    }
    root.insert("share".into(), Value::Object(share));

    if !m.warnings.is_empty() {
        root.insert(
            "warnings".into(),
            Value::Array(m.warnings.iter().cloned().map(Value::String).collect()),
        );
    }
    Value::Object(root)
}

pub fn render_report_json_string(m: &ReportModel) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(&render_report_json(m))?)
}

pub fn render_unit_json(d: &UnitDetail) -> Value {
    let mut o = obj();
    o.insert("id".into(), Value::from(d.id.get()));
    if let Some(name) = &d.name {
        o.insert("name".into(), Value::String(name.clone()));
    }
    o.insert(
        "region".into(),
        d.region.map_or(Value::Null, |r| Value::String(r.abbrev().to_string())),
    );
    let rows = d
        .rows
        .iter()
        .map(|r| {
            let mut row = obj();
            row.insert("candidate".into(), Value::String(r.candidate.clone()));
            row.insert("votes".into(), Value::String(r.votes.clone()));
            row.insert("pct".into(), Value::String(r.pct.clone()));
            Value::Object(row)
        })
        .collect();
    o.insert("rows".into(), Value::Array(rows));
    Value::Object(o)
}

fn summary_json(s: &SummaryBlock) -> Value {
    let mut o = obj();
    o.insert("dem_seats".into(), Value::from(s.dem_seats));
    o.insert("gop_seats".into(), Value::from(s.gop_seats));
    o.insert("total_seats".into(), Value::from(s.total_seats));
    o.insert("dem_share".into(), Value::String(s.dem_share.clone()));
    Value::Object(o)
}

fn row_json(r: &RegionRow) -> Value {
    let mut o = obj();
    o.insert("region".into(), Value::String(r.region.abbrev().to_string()));
    o.insert("leader".into(), Value::String(r.leader.key().to_string()));
    let values = [&r.population, &r.seats].into_iter().chain(r.cells.iter());
    for (h, v) in TABLE_HEADERS.iter().zip(values) {
        o.insert((*h).to_string(), Value::String(v.clone()));
    }
    Value::Object(o)
}

#[inline]
fn obj() -> JsonMap<String, Value> {
    JsonMap::new()
}
