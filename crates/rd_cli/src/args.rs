// crates/rd_cli/src/args.rs
//
// CLI surface. Rules:
// - Dataset is either a catalog year (resolved under --data-dir) or an explicit --dataset file.
// - Share input is either a bare payload (--share) or a full share URL (--url), never both.
// - Every --move is `IDS:REGION` with comma-separated unit ids; each one is committed
//   as its own selection, in order.
// - File paths must be local (no URL scheme).

use std::path::{Path, PathBuf};

use clap::Parser;
use rd_core::{DisplayMode, RegionKey, UnitId};

#[derive(Debug, Parser, Clone)]
#[command(
    name = "redraw",
    disable_help_subcommand = true,
    about = "Move counties between states and recompute electoral outcomes"
)]
pub struct Args {
    /// Engine params JSON (apportionment, default dataset, data dir).
    #[arg(long)]
    pub params: Option<PathBuf>,

    /// Directory holding the catalog dataset files.
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Catalog year (2004, 2008, 2012, 2016, 2016i, 2020).
    #[arg(long)]
    pub year: Option<String>,

    /// Explicit dataset file instead of a catalog entry.
    #[arg(long)]
    pub dataset: Option<PathBuf>,

    /// Share payload to apply after loading.
    #[arg(long, conflicts_with = "url")]
    pub share: Option<String>,

    /// Share URL; its `share` and `year` parameters are used.
    #[arg(long)]
    pub url: Option<String>,

    /// Move units: `ID[,ID...]:REGION`. Repeatable.
    #[arg(long = "move", value_name = "IDS:REGION", value_parser = parse_move)]
    pub moves: Vec<Move>,

    /// Region table values: raw counts or percent of region votes.
    #[arg(long, default_value = "raw")]
    pub display: DisplayMode,

    /// Output format.
    #[arg(long, value_parser = ["text", "json"], default_value = "text")]
    pub render: String,

    /// Base URL for the printed share link (payload only when absent).
    #[arg(long)]
    pub base_url: Option<String>,

    /// Errors only on stderr.
    #[arg(long)]
    pub quiet: bool,
}

/// One committed move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub ids: Vec<UnitId>,
    pub region: RegionKey,
}

#[derive(Debug)]
pub enum CliError {
    NonLocalPath(String),
    NotFound(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::NonLocalPath(p) => write!(f, "path must be local file (no scheme): {p}"),
            CliError::NotFound(p) => write!(f, "file not found: {p}"),
        }
    }
}
impl std::error::Error for CliError {}

/// `"1001,1003:CA"` → ids [1001, 1003], region CA.
pub fn parse_move(s: &str) -> Result<Move, String> {
    let (ids, region) = s.rsplit_once(':').ok_or_else(|| format!("expected IDS:REGION, got {s:?}"))?;
    let region: RegionKey = region.trim().parse().map_err(|e| format!("{e}"))?;
    let ids = ids
        .split(',')
        .map(|id| id.parse::<UnitId>().map_err(|e| format!("unit id {id:?}: {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Move { ids, region })
}

#[inline]
fn has_scheme(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    lower.contains("://") || lower.starts_with("http:") || lower.starts_with("https:") || lower.starts_with("file:")
}

fn ensure_local(p: &Path) -> Result<(), CliError> {
    match p.to_str() {
        Some(s) if has_scheme(s) => Err(CliError::NonLocalPath(s.to_string())),
        _ => Ok(()),
    }
}

/// Entry point used by main.rs.
pub fn parse_and_validate() -> Result<Args, CliError> {
    validate(Args::parse())
}

pub fn validate(args: Args) -> Result<Args, CliError> {
    let paths = [args.params.as_deref(), args.data_dir.as_deref(), args.dataset.as_deref()];
    for p in paths.into_iter().flatten() {
        ensure_local(p)?;
    }
    // Input files must exist; data_dir is only needed when a catalog file is read.
    for p in [args.params.as_deref(), args.dataset.as_deref()].into_iter().flatten() {
        if !p.is_file() {
            return Err(CliError::NotFound(p.display().to_string()));
        }
    }
    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_parse() {
        let m = parse_move("1001, 01003:CA").unwrap();
        assert_eq!(m.ids, vec![UnitId::new(1001), UnitId::new(1003)]);
        assert_eq!(m.region.abbrev(), "CA");
        assert!(parse_move("1001").is_err());
        assert!(parse_move("1001:XX").is_err());
        assert!(parse_move("abc:CA").is_err());
    }

    #[test]
    fn flags_parse() {
        let a = Args::try_parse_from([
            "redraw", "--year", "2008", "--move", "1:AL", "--move", "2,3:DC", "--display", "percent",
        ])
        .unwrap();
        assert_eq!(a.moves.len(), 2);
        assert_eq!(a.display, DisplayMode::Percent);
        assert_eq!(a.render, "text");
        assert!(Args::try_parse_from(["redraw", "--share", "a", "--url", "http://x/?share=a"]).is_err());
        assert!(Args::try_parse_from(["redraw", "--render", "html"]).is_err());
    }

    #[test]
    fn remote_and_missing_paths_rejected() {
        let a = Args::try_parse_from(["redraw", "--dataset", "https://example.org/us.json"]).unwrap();
        assert!(matches!(validate(a), Err(CliError::NonLocalPath(_))));
        let a = Args::try_parse_from(["redraw", "--params", "/no/such/params.json"]).unwrap();
        assert!(matches!(validate(a), Err(CliError::NotFound(_))));
    }
}
