//! rd_engine: the owned map context (unit store → region aggregates → seats).
//!
//! Stays I/O-light: file reading and the share codec live in `rd_io`, seat math
//! in `rd_algo`. Everything here is single-threaded and runs to completion; a
//! `MapContext` is only observable after its load has finished.

#![forbid(unsafe_code)]

use rd_core::RegionKey;
use thiserror::Error;

pub mod aggregate;
pub mod context;
pub mod outcome;
pub mod selection;
pub mod store;
pub mod transaction;

pub use aggregate::{AggregateTable, Field, RegionAggregate};
pub use context::MapContext;
pub use outcome::{ElectoralSummary, RegionOutcome};
pub use selection::PendingSelection;
pub use store::UnitStore;
pub use transaction::{ReassignReport, ReassignWarning};

/// Single error surface for engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// An operation named a region outside the fixed region table.
    #[error("unknown region: {0}")]
    UnknownRegion(String),

    /// A region aggregate went negative; apportionment is refused.
    #[error("negative population {population} in region {region}")]
    NegativePopulation { region: RegionKey, population: i64 },

    #[error(transparent)]
    Io(#[from] rd_io::IoError),

    #[error(transparent)]
    Alloc(#[from] rd_algo::AllocError),
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Parse a region abbreviation at the API boundary.
pub fn parse_region(s: &str) -> EngineResult<RegionKey> {
    s.parse().map_err(|_| EngineError::UnknownRegion(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_boundary() {
        assert_eq!(parse_region("DC").unwrap().index(), 8);
        let err = parse_region("PR").unwrap_err();
        assert!(matches!(err, EngineError::UnknownRegion(ref s) if s == "PR"));
        assert_eq!(err.to_string(), "unknown region: PR");
    }
}
