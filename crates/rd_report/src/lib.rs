//! rd_report: report model + renderers (JSON / plain text) for a map context.
//!
//! No I/O here. Callers hand in a loaded `MapContext`; numbers are formatted
//! once in `structure` and renderers only arrange them.

#![deny(unsafe_code)]

use thiserror::Error;

pub mod structure;
#[cfg(feature = "render_json")]
pub mod render_json;
#[cfg(feature = "render_text")]
pub mod render_text;

pub use structure::{
    build_model, build_region_rows, unit_detail, unit_shade, CandidateRow, RegionRow, ReportModel,
    SummaryBlock, UnitDetail, UnitShade, TABLE_HEADERS,
};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("json serialize: {0}")]
    Json(#[from] serde_json::Error),
}
