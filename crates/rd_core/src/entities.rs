//! Unit records and the fixed category record.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ids::{IdError, UnitId};
use crate::regions::RegionKey;

pub const CATEGORY_COUNT: usize = 6;

/// Vote category (party label) carried by every unit.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Category {
    Dem,
    Gop,
    Grn,
    Lib,
    Una,
    Oth,
}

impl Category {
    /// Table/column order.
    pub const ALL: [Category; CATEGORY_COUNT] = [
        Category::Dem,
        Category::Gop,
        Category::Grn,
        Category::Lib,
        Category::Una,
        Category::Oth,
    ];

    /// Position in `ALL`.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn key(self) -> &'static str {
        match self {
            Category::Dem => "dem",
            Category::Gop => "gop",
            Category::Grn => "grn",
            Category::Lib => "lib",
            Category::Una => "una",
            Category::Oth => "oth",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = IdError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL.into_iter().find(|c| c.key() == s).ok_or(IdError::UnknownCategory)
    }
}

/// Per-category counts. Every category is always present; absent source fields are 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CategoryCounts {
    pub dem: u64,
    pub gop: u64,
    pub grn: u64,
    pub lib: u64,
    pub una: u64,
    pub oth: u64,
}

impl CategoryCounts {
    #[inline]
    pub fn get(&self, c: Category) -> u64 {
        match c {
            Category::Dem => self.dem,
            Category::Gop => self.gop,
            Category::Grn => self.grn,
            Category::Lib => self.lib,
            Category::Una => self.una,
            Category::Oth => self.oth,
        }
    }

    #[inline]
    pub fn set(&mut self, c: Category, v: u64) {
        match c {
            Category::Dem => self.dem = v,
            Category::Gop => self.gop = v,
            Category::Grn => self.grn = v,
            Category::Lib => self.lib = v,
            Category::Una => self.una = v,
            Category::Oth => self.oth = v,
        }
    }

    /// Sum over all categories.
    pub fn total(&self) -> u64 {
        Category::ALL.iter().map(|&c| self.get(c)).sum()
    }

    /// `(category, count)` in table order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, u64)> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

/// One sub-unit (county). `region` is the only field mutated after load.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Unit {
    pub id: UnitId,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub name: Option<String>,
    /// `None` = unassigned (not part of any tracked region).
    pub region: Option<RegionKey>,
    pub population: u64,
    pub counts: CategoryCounts,
}

impl Unit {
    pub fn new(id: UnitId, region: Option<RegionKey>, population: u64, counts: CategoryCounts) -> Self {
        Unit { id, name: None, region, population, counts }
    }
}
