//! Fixed catalog of election datasets.
//!
//! Each entry names the data file, the candidate behind every category, and the
//! trailing candidate used in the challenge headline. Unknown years resolve to
//! the 2016 entry.

use rd_core::entities::CATEGORY_COUNT;
use rd_core::Category;

/// One catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetEntry {
    pub year: &'static str,
    pub file: &'static str,
    /// Candidate names in `Category::ALL` order.
    pub candidates: [&'static str; CATEGORY_COUNT],
    pub trailing: &'static str,
}

impl DatasetEntry {
    pub fn candidate(&self, c: Category) -> &'static str {
        self.candidates[c.index()]
    }

    /// Challenge line shown above the map.
    pub fn headline(&self) -> String {
        format!(
            "How few counties can you move to make {} win the {} election?",
            self.trailing, self.year
        )
    }
}

// dem, gop, grn, lib, una, oth
pub const DATASETS: &[DatasetEntry] = &[
    DatasetEntry {
        year: "2004",
        file: "us2004.json",
        candidates: ["John Kerry", "George W. Bush", "Green Party", "Libertarian Party", "Unaffiliated", "Other"],
        trailing: "John Kerry",
    },
    DatasetEntry {
        year: "2008",
        file: "us2008.json",
        candidates: ["Barack Obama", "John McCain", "Green Party", "Libertarian Party", "Unaffiliated", "Other"],
        trailing: "John McCain",
    },
    DatasetEntry {
        year: "2012",
        file: "us2012.json",
        candidates: ["Barack Obama", "Mitt Romney", "Green Party", "Gary Johnson", "Unaffiliated", "Other"],
        trailing: "Mitt Romney",
    },
    DatasetEntry {
        year: "2016",
        file: "us.json",
        candidates: ["Hillary Clinton", "Donald Trump", "Jill Stein", "Gary Johnson", "Evan McMullin", "Other"],
        trailing: "Hillary Clinton",
    },
    DatasetEntry {
        year: "2016i",
        file: "us2016income.json",
        candidates: ["Hillary Clinton", "Donald Trump", "Jill Stein", "Gary Johnson", "Evan McMullin", "Other"],
        trailing: "Hillary Clinton",
    },
    DatasetEntry {
        year: "2020",
        file: "us2020.json",
        candidates: ["Joe Biden", "Donald Trump", "Green", "Jo Jorgensen", "Unaffiliated", "Other"],
        trailing: "Donald Trump",
    },
];

const FALLBACK_YEAR: &str = "2016";

/// Exact lookup.
pub fn find(year: &str) -> Option<&'static DatasetEntry> {
    DATASETS.iter().find(|e| e.year == year)
}

/// Lookup with the 2016 fallback for unknown years.
pub fn lookup(year: &str) -> &'static DatasetEntry {
    match find(year) {
        Some(e) => e,
        None => {
            tracing::debug!(year, "unknown dataset year; using {FALLBACK_YEAR}");
            &DATASETS[3]
        }
    }
}
