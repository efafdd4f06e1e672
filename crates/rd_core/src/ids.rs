//! crates/rd_core/src/ids.rs
//! Unit identifiers. Deterministic, ASCII-only, strict shapes; no I/O.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors returned when validating or parsing ids and region keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdError {
    Empty,
    NonDigit,
    Overflow,
    UnknownRegion,
    UnknownCategory,
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdError::Empty => f.write_str("empty id"),
            IdError::NonDigit => f.write_str("id must be decimal digits"),
            IdError::Overflow => f.write_str("id out of range"),
            IdError::UnknownRegion => f.write_str("unknown region"),
            IdError::UnknownCategory => f.write_str("unknown category"),
        }
    }
}

impl std::error::Error for IdError {}

/// Stable ordinal identifier of a unit (a county FIPS code read as an integer).
///
/// Source data carries ids as zero-padded strings ("01001"); ordering is numeric,
/// so "01001" and "1001" name the same unit.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct UnitId(u32);

impl UnitId {
    #[inline]
    pub const fn new(v: u32) -> Self {
        UnitId(v)
    }
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for UnitId {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for UnitId {
    #[inline]
    fn from(v: u32) -> Self {
        UnitId(v)
    }
}

impl FromStr for UnitId {
    type Err = IdError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(IdError::Empty);
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(IdError::NonDigit);
        }
        s.parse::<u32>().map(UnitId).map_err(|_| IdError::Overflow)
    }
}

#[cfg(feature = "serde")]
impl Serialize for UnitId {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u32(self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for UnitId {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        u32::deserialize(d).map(UnitId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_padded_fips_parse_numerically() {
        let a: UnitId = "01001".parse().unwrap();
        let b: UnitId = "1001".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.get(), 1001);
        assert!(a < "02000".parse::<UnitId>().unwrap());
    }

    #[test]
    fn rejects_bad_shapes() {
        assert_eq!("".parse::<UnitId>(), Err(IdError::Empty));
        assert_eq!("12a".parse::<UnitId>(), Err(IdError::NonDigit));
        assert_eq!("-1".parse::<UnitId>(), Err(IdError::NonDigit));
        assert_eq!("99999999999".parse::<UnitId>(), Err(IdError::Overflow));
    }
}
