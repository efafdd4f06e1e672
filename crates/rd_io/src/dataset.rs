//! Dataset loader: read a TopoJSON-shaped dataset and return unit records.
//!
//! Units live at `objects.counties.geometries[]`. Each geometry may carry an
//! `id` and a `properties` object `{ id, name, state, population, dem, gop,
//! grn, lib, una, oth }`. Arcs and geometry are ignored here; rendering reads
//! them elsewhere, keyed by the same id.
//!
//! Output units are sorted ascending by id (the share codec's coordinate system).

use std::collections::BTreeSet;
use std::path::Path;

use rd_core::{determinism::sort_units_by_id, CategoryCounts, RegionKey, Unit, UnitId};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::IoError;

/// Non-fatal findings while reading a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadWarning {
    /// Geometry at `index` had no parseable id and was skipped.
    #[error("geometry {index} has no id; skipped")]
    MissingId { index: usize },
    /// A second geometry with the same id was skipped.
    #[error("duplicate unit {id}; later copy skipped")]
    DuplicateId { id: UnitId },
    /// `properties.state` was not a known region; the unit is unassigned.
    #[error("unit {id} has unknown state {value:?}; left unassigned")]
    UnknownRegion { id: UnitId, value: String },
}

/// Loaded dataset, units sorted by id.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub units: Vec<Unit>,
    pub warnings: Vec<LoadWarning>,
}

#[derive(Deserialize)]
struct RawTopology {
    objects: RawObjects,
}

#[derive(Deserialize)]
struct RawObjects {
    counties: RawCollection,
}

#[derive(Deserialize)]
struct RawCollection {
    #[serde(default)]
    geometries: Vec<RawGeometry>,
}

#[derive(Deserialize)]
struct RawGeometry {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    properties: Option<RawProperties>,
}

#[derive(Deserialize)]
struct RawProperties {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    population: u64,
    #[serde(flatten)]
    counts: CategoryCounts,
}

/// Read and parse a dataset file.
pub fn load_dataset(path: &Path) -> Result<Dataset, IoError> {
    let bytes = std::fs::read(path)
        .map_err(|e| IoError::Path(format!("{}: {e}", path.display())))?;
    let ds = parse_dataset(&bytes)?;
    info!(
        path = %path.display(),
        units = ds.units.len(),
        warnings = ds.warnings.len(),
        "dataset loaded"
    );
    Ok(ds)
}

/// Parse dataset bytes.
pub fn parse_dataset(bytes: &[u8]) -> Result<Dataset, IoError> {
    let raw: RawTopology = serde_json::from_slice(bytes).map_err(|e| IoError::Json {
        pointer: "/objects/counties".into(),
        msg: e.to_string(),
    })?;

    let mut units = Vec::with_capacity(raw.objects.counties.geometries.len());
    let mut warnings = Vec::new();
    let mut seen = BTreeSet::new();

    for (index, geom) in raw.objects.counties.geometries.into_iter().enumerate() {
        let id = geom
            .properties
            .as_ref()
            .and_then(|p| p.id.as_ref())
            .or(geom.id.as_ref())
            .and_then(parse_unit_id);
        let Some(id) = id else {
            warn!(index, "geometry without a usable id skipped");
            warnings.push(LoadWarning::MissingId { index });
            continue;
        };
        if !seen.insert(id) {
            warn!(%id, "duplicate unit id skipped");
            warnings.push(LoadWarning::DuplicateId { id });
            continue;
        }

        let unit = match geom.properties {
            // No properties: the unit exists (it still takes a codec slot) but holds nothing.
            None => Unit::new(id, None, 0, CategoryCounts::default()),
            Some(p) => {
                let region = match p.state.as_deref() {
                    None => None,
                    Some(s) => match s.parse::<RegionKey>() {
                        Ok(r) => Some(r),
                        Err(_) => {
                            warn!(%id, state = s, "unit names an unknown region; left unassigned");
                            warnings.push(LoadWarning::UnknownRegion { id, value: s.to_string() });
                            None
                        }
                    },
                };
                Unit { id, name: p.name, region, population: p.population, counts: p.counts }
            }
        };
        units.push(unit);
    }

    sort_units_by_id(&mut units);
    Ok(Dataset { units, warnings })
}

/// Ids arrive as zero-padded strings ("01001") or as numbers.
fn parse_unit_id(v: &Value) -> Option<UnitId> {
    match v {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => n.as_u64().and_then(|x| u32::try_from(x).ok()).map(UnitId::new),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rd_core::Category;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "type": "Topology",
        "arcs": [],
        "objects": { "counties": { "type": "GeometryCollection", "geometries": [
            { "id": "01003", "type": "Polygon", "arcs": [],
              "properties": { "id": "01003", "name": "Baldwin", "state": "AL",
                              "population": 231767, "dem": 24578, "gop": 83544 } },
            { "id": "01001", "properties": { "id": "01001", "name": "Autauga", "state": "AL",
                              "population": 58805, "dem": 5936, "gop": 19838, "lib": 350 } },
            { "id": 72001 },
            { "properties": { "name": "nameless" } },
            { "id": "01001", "properties": { "state": "AL", "population": 1 } },
            { "id": "99001", "properties": { "state": "PR", "population": 5, "dem": 1 } }
        ] } }
    }"#;

    #[test]
    fn parses_sorts_and_warns() {
        let ds = parse_dataset(SAMPLE.as_bytes()).unwrap();
        let ids: Vec<u32> = ds.units.iter().map(|u| u.id.get()).collect();
        assert_eq!(ids, vec![1001, 1003, 72001, 99001]);

        let autauga = &ds.units[0];
        assert_eq!(autauga.name.as_deref(), Some("Autauga"));
        assert_eq!(autauga.region.map(|r| r.abbrev()), Some("AL"));
        assert_eq!(autauga.counts.get(Category::Lib), 350);
        assert_eq!(autauga.counts.get(Category::Grn), 0);

        // property-less geometry: present, unassigned, empty
        assert_eq!(ds.units[2].region, None);
        assert_eq!(ds.units[2].population, 0);
        // unknown region: unassigned but counts kept
        assert_eq!(ds.units[3].region, None);
        assert_eq!(ds.units[3].counts.dem, 1);

        assert_eq!(
            ds.warnings,
            vec![
                LoadWarning::MissingId { index: 3 },
                LoadWarning::DuplicateId { id: UnitId::new(1001) },
                LoadWarning::UnknownRegion { id: UnitId::new(99001), value: "PR".into() },
            ]
        );
    }

    #[test]
    fn rejects_wrong_shape() {
        let err = parse_dataset(br#"{"objects": {}}"#).unwrap_err();
        assert!(matches!(err, IoError::Json { .. }));
    }

    #[test]
    fn loads_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(SAMPLE.as_bytes()).unwrap();
        let ds = load_dataset(f.path()).unwrap();
        assert_eq!(ds.units.len(), 4);
        assert!(load_dataset(Path::new("/definitely/not/here.json")).is_err());
    }
}
