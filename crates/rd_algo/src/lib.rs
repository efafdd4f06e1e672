// crates/rd_algo/src/lib.rs
#![forbid(unsafe_code)]

use std::collections::BTreeMap;

pub use rd_core::{ApportionParams, RegionKey};

/// Region populations keyed in canonical region order.
pub type Populations = BTreeMap<RegionKey, u64>;

/// Seat counts keyed in canonical region order.
pub type SeatMap = BTreeMap<RegionKey, u32>;

// ----------------------------- Apportionment (public surface) ------------------------

pub mod apportionment {
    pub mod equal_proportions;

    pub use equal_proportions::{
        allocate_equal_proportions, priority_value, AllocError, Apportionment,
    };
}

pub use apportionment::{allocate_equal_proportions, AllocError, Apportionment};
