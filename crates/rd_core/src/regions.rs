//! The fixed, enumerable region table (50 states + DC).
//!
//! Region index = position in `REGION_ABBREVS`. The index is the codec symbol
//! index and the canonical tie-break order for apportionment (lower wins).

use core::fmt;
use core::str::FromStr;

use crate::ids::IdError;

#[cfg(feature = "serde")]
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

pub const REGION_COUNT: usize = 51;

pub const REGION_ABBREVS: [&str; REGION_COUNT] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL",
    "GA", "HI", "ID", "IL", "IN", "IA", "KS", "KY", "LA", "ME",
    "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH",
    "NJ", "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI",
    "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA", "WV", "WI",
    "WY",
];

/// Key of a known region. Only constructible for indices inside the table.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct RegionKey(u8);

impl RegionKey {
    /// `None` when `i` is outside the region table.
    #[inline]
    pub fn from_index(i: usize) -> Option<Self> {
        (i < REGION_COUNT).then(|| RegionKey(i as u8))
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn abbrev(self) -> &'static str {
        REGION_ABBREVS[self.index()]
    }

    /// All known regions in canonical order.
    pub fn all() -> impl Iterator<Item = RegionKey> {
        (0..REGION_COUNT).map(|i| RegionKey(i as u8))
    }
}

impl fmt::Display for RegionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbrev())
    }
}

impl FromStr for RegionKey {
    type Err = IdError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        REGION_ABBREVS
            .iter()
            .position(|a| *a == s)
            .map(|i| RegionKey(i as u8))
            .ok_or(IdError::UnknownRegion)
    }
}

#[cfg(feature = "serde")]
impl Serialize for RegionKey {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.abbrev())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for RegionKey {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        s.parse()
            .map_err(|_| D::Error::custom(format!("unknown region: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_canonical() {
        assert_eq!(RegionKey::all().count(), REGION_COUNT);
        let dc: RegionKey = "DC".parse().unwrap();
        assert_eq!(dc.index(), 8);
        assert_eq!(RegionKey::from_index(50).unwrap().abbrev(), "WY");
        assert!(RegionKey::from_index(51).is_none());
    }

    #[test]
    fn unknown_abbrev_is_rejected() {
        assert_eq!("PR".parse::<RegionKey>(), Err(IdError::UnknownRegion));
        assert_eq!("tx".parse::<RegionKey>(), Err(IdError::UnknownRegion));
    }

    #[test]
    fn serde_uses_abbrev() {
        let tx: RegionKey = "TX".parse().unwrap();
        assert_eq!(serde_json::to_string(&tx).unwrap(), "\"TX\"");
        let back: RegionKey = serde_json::from_str("\"TX\"").unwrap();
        assert_eq!(back, tx);
        assert!(serde_json::from_str::<RegionKey>("\"XX\"").is_err());
    }
}
