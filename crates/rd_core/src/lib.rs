//! rd_core: Core types shared by every redraw crate.
//!
//! This crate is **I/O-free**. It defines the stable vocabulary used across
//! the workspace (`rd_algo`, `rd_io`, `rd_engine`, `rd_report`, `rd_cli`):
//!
//! - Unit ids (`UnitId`, integer ordinal) and the fixed region table (`RegionKey`)
//! - Unit records with a fixed category record (`Unit`, `CategoryCounts`)
//! - Engine parameters (`ApportionParams`, `EngineParams`)
//! - Integer-first number formatting for tables
//!
//! Serialization derives are gated behind the `serde` feature (on by default).

#![forbid(unsafe_code)]

pub mod errors {
    use core::fmt;

    /// Minimal error set for core-domain validation.
    #[derive(Clone, Debug, Eq, PartialEq)]
    pub enum CoreError {
        DomainOutOfRange(&'static str),
    }

    impl fmt::Display for CoreError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                CoreError::DomainOutOfRange(k) => write!(f, "domain out of range: {k}"),
            }
        }
    }

    impl std::error::Error for CoreError {}
}

pub mod entities;
pub mod format;
pub mod ids;
pub mod regions;
pub mod variables;

pub use entities::{Category, CategoryCounts, Unit};
pub use errors::CoreError;
pub use ids::{IdError, UnitId};
pub use regions::{RegionKey, REGION_ABBREVS, REGION_COUNT};
pub use variables::{ApportionParams, DisplayMode, EngineParams};

pub mod determinism {
    //! Stable ordering helpers.

    use crate::entities::Unit;

    /// Sort units ascending by id. This is the coordinate system of the share codec.
    pub fn sort_units_by_id(units: &mut [Unit]) {
        units.sort_by_key(|u| u.id);
    }

    /// True iff `units` is strictly ascending by id (sorted and duplicate-free).
    pub fn is_sorted_by_id(units: &[Unit]) -> bool {
        units.windows(2).all(|w| w[0].id < w[1].id)
    }
}
