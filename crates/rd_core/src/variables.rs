//! variables.rs: Engine parameters with safe defaults.
//!
//! Defaults reproduce the U.S. Electoral College: 435 contested seats, a floor
//! of 3 per populated region, 2 bonus seats per populated region, and DC held
//! at exactly 3 (2 bonus + 1 extra, never competing).

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::regions::RegionKey;

pub const DEFAULT_TOTAL_SEATS: u32 = 435;
pub const DEFAULT_MINIMUM_SEATS: u32 = 3;
pub const DEFAULT_BONUS_SEATS: u32 = 2;
pub const DEFAULT_FIXED_REGION_EXTRA: u32 = 1;
pub const DEFAULT_YEAR: &str = "2020";

/// Apportionment inputs that do not depend on populations.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ApportionParams {
    /// Contested seats distributed by priority (the House size).
    pub total_seats: u32,
    /// Starting seats for every region with population > 0.
    pub minimum_seats: u32,
    /// Non-competed seats added to the capacity per populated region.
    pub bonus_seats_per_region: u32,
    /// Region held at `minimum_seats`, excluded from the priority competition.
    pub fixed_region: Option<RegionKey>,
    /// Capacity added by the fixed region on top of its bonus seats.
    pub fixed_region_extra: u32,
}

impl Default for ApportionParams {
    fn default() -> Self {
        ApportionParams {
            total_seats: DEFAULT_TOTAL_SEATS,
            minimum_seats: DEFAULT_MINIMUM_SEATS,
            bonus_seats_per_region: DEFAULT_BONUS_SEATS,
            fixed_region: "DC".parse().ok(),
            fixed_region_extra: DEFAULT_FIXED_REGION_EXTRA,
        }
    }
}

impl ApportionParams {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.minimum_seats == 0 {
            return Err(CoreError::DomainOutOfRange("minimum_seats"));
        }
        Ok(())
    }
}

/// Top-level parameter file.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct EngineParams {
    pub apportion: ApportionParams,
    /// Dataset year used when none is requested (and omitted from share URLs).
    pub default_dataset: String,
    /// Directory holding the dataset JSON files named by the catalog.
    pub data_dir: String,
}

impl Default for EngineParams {
    fn default() -> Self {
        EngineParams {
            apportion: ApportionParams::default(),
            default_dataset: DEFAULT_YEAR.to_string(),
            data_dir: "data".to_string(),
        }
    }
}

impl EngineParams {
    pub fn validate(&self) -> Result<(), CoreError> {
        self.apportion.validate()?;
        if self.default_dataset.trim().is_empty() {
            return Err(CoreError::DomainOutOfRange("default_dataset"));
        }
        Ok(())
    }
}

/// How category totals are shown in region tables.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DisplayMode {
    #[default]
    Raw,
    Percent,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Raw => DisplayMode::Percent,
            DisplayMode::Percent => DisplayMode::Raw,
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DisplayMode::Raw => "raw",
            DisplayMode::Percent => "percent",
        })
    }
}

impl FromStr for DisplayMode {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "raw" => Ok(DisplayMode::Raw),
            "percent" => Ok(DisplayMode::Percent),
            _ => Err(CoreError::DomainOutOfRange("display_mode")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_electoral_college() {
        let p = ApportionParams::default();
        assert_eq!(p.total_seats, 435);
        assert_eq!(p.fixed_region.map(|r| r.abbrev()), Some("DC"));
        assert!(p.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let p: EngineParams =
            serde_json::from_str(r#"{"apportion": {"total_seats": 10, "fixed_region": null}}"#).unwrap();
        assert_eq!(p.apportion.total_seats, 10);
        assert_eq!(p.apportion.minimum_seats, 3);
        assert_eq!(p.apportion.fixed_region, None);
        assert_eq!(p.default_dataset, "2020");
    }

    #[test]
    fn unknown_fields_and_zero_floor_rejected() {
        assert!(serde_json::from_str::<ApportionParams>(r#"{"seats": 1}"#).is_err());
        let p = ApportionParams { minimum_seats: 0, ..ApportionParams::default() };
        assert_eq!(p.validate(), Err(CoreError::DomainOutOfRange("minimum_seats")));
    }

    #[test]
    fn display_mode_toggles() {
        assert_eq!(DisplayMode::Raw.toggled(), DisplayMode::Percent);
        assert_eq!("percent".parse::<DisplayMode>().unwrap(), DisplayMode::Percent);
    }
}
