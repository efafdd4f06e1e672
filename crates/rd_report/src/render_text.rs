//! Plain-text renderer: headline, aligned region table, seat line, share line.

use std::fmt::Write;

use crate::structure::{ReportModel, UnitDetail, TABLE_HEADERS};

/// Column-aligned table builder. First column left-aligned, the rest right-aligned.
pub struct TextTable {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TextTable {
    pub fn new<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TextTable { header: header.into_iter().map(Into::into).collect(), rows: Vec::new() }
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn render(&self, out: &mut String) {
        let cols = self.header.len();
        let mut widths: Vec<usize> = self.header.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.chars().count());
            }
        }
        let line = |out: &mut String, cells: &[String]| {
            for (i, cell) in cells.iter().take(cols).enumerate() {
                if i > 0 {
                    out.push_str("  ");
                }
                let _ = if i == 0 {
                    write!(out, "{:<w$}", cell, w = widths[i])
                } else {
                    write!(out, "{:>w$}", cell, w = widths[i])
                };
            }
            // no trailing padding on the last column
            let trimmed = out.trim_end_matches(' ').len();
            out.truncate(trimmed);
            out.push('\n');
        };
        line(out, &self.header);
        for row in &self.rows {
            line(out, row);
        }
    }
}

pub fn render_report_text(m: &ReportModel) -> String {
    let mut out = String::with_capacity(8 * 1024);
    let _ = writeln!(out, "{}", m.headline);
    let _ = writeln!(out, "dataset {} ({})", m.year, m.display);
    out.push('\n');

    let mut t = TextTable::new(std::iter::once("region").chain(TABLE_HEADERS));
    for r in &m.rows {
        let mut cells = vec![r.region.abbrev().to_string(), r.population.clone(), r.seats.clone()];
        cells.extend(r.cells.iter().cloned());
        t.push(cells);
    }
    t.render(&mut out);
    out.push('\n');

    let s = &m.summary;
    let _ = writeln!(
        out,
        "seats: dem {} / gop {} of {} (dem {})",
        s.dem_seats, s.gop_seats, s.total_seats, s.dem_share
    );
    match &m.share_url {
        Some(url) => {
            let _ = writeln!(out, "share: {url}");
        }
        None => {
            let _ = writeln!(out, "share: {}", m.share_payload);
        }
    }
    for w in &m.warnings {
        let _ = writeln!(out, "warning: {w}");
    }
    out
}

pub fn render_unit_text(d: &UnitDetail) -> String {
    let mut out = String::new();
    let region = d.region.map_or("--", |r| r.abbrev());
    let _ = writeln!(out, "{} ({region})", d.name.as_deref().unwrap_or("unnamed"));
    let mut t = TextTable::new(["Candidate", "Votes", "Pct."]);
    for r in &d.rows {
        t.push(vec![r.candidate.clone(), r.votes.clone(), r.pct.clone()]);
    }
    t.render(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::{build_model, fixture, unit_detail};
    use rd_core::{DisplayMode, UnitId};

    #[test]
    fn table_is_aligned() {
        let mut t = TextTable::new(["k", "value"]);
        t.push(vec!["long-key".into(), "1".into()]);
        t.push(vec!["x".into(), "1,000".into()]);
        let mut out = String::new();
        t.render(&mut out);
        assert_eq!(out, "k         value\nlong-key      1\nx         1,000\n");
    }

    #[test]
    fn report_text_sections() {
        let ctx = fixture::context();
        let text = render_report_text(&build_model(&ctx, DisplayMode::Raw, None));
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("How few counties"));
        assert_eq!(lines[1], "dataset 2020 (raw)");
        assert!(lines[3].starts_with("region"));
        assert!(lines[4].starts_with("AL"));
        assert!(lines[4].contains("58,805"));
        assert!(text.contains("seats: dem 0 / gop 14 of 14 (dem 0.00%)"));
        assert!(text.ends_with("share: a2bZ\n"));
    }

    #[test]
    fn unit_text() {
        let ctx = fixture::context();
        let text = render_unit_text(&unit_detail(&ctx, UnitId::new(1001)).unwrap());
        assert!(text.starts_with("Autauga (AL)\n"));
        assert!(text.contains("Jo Jorgensen"));
        assert!(text.contains("1.34%"));
    }
}
