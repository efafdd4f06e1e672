// crates/rd_io/src/params.rs
//
// Parameter files are JSON objects matching `EngineParams`. Every field is
// optional (defaults fill the rest) but unknown fields are rejected. Paths
// must be local: anything carrying a URL scheme is refused before touching disk.

use std::path::Path;

use rd_core::EngineParams;

use crate::IoError;

/// Load and validate engine params. `None` yields the defaults.
pub fn load_params(path: Option<&Path>) -> Result<EngineParams, IoError> {
    let Some(path) = path else {
        return Ok(EngineParams::default());
    };
    reject_scheme(path)?;
    let text = std::fs::read_to_string(path)
        .map_err(|e| IoError::Path(format!("{}: {e}", path.display())))?;
    let params = parse_params(&text)?;
    tracing::debug!(path = %path.display(), "params loaded");
    Ok(params)
}

pub fn parse_params(text: &str) -> Result<EngineParams, IoError> {
    let params: EngineParams = serde_json::from_str(text)?;
    params.validate()?;
    Ok(params)
}

fn reject_scheme(path: &Path) -> Result<(), IoError> {
    let s = path.to_string_lossy();
    if s.contains("://") || s.starts_with("http:") || s.starts_with("https:") {
        return Err(IoError::Invalid(format!("params path must be local: {s}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn none_is_default() {
        assert_eq!(load_params(None).unwrap(), EngineParams::default());
    }

    #[test]
    fn file_overrides_and_validates() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{"apportion": {{"total_seats": 100}}, "default_dataset": "2016"}}"#).unwrap();
        let p = load_params(Some(f.path())).unwrap();
        assert_eq!(p.apportion.total_seats, 100);
        assert_eq!(p.apportion.minimum_seats, 3);
        assert_eq!(p.default_dataset, "2016");

        assert!(matches!(
            parse_params(r#"{"apportion": {"minimum_seats": 0}}"#),
            Err(IoError::Invalid(_))
        ));
        assert!(matches!(parse_params(r#"{"bogus": 1}"#), Err(IoError::Json { .. })));
    }

    #[test]
    fn remote_and_missing_paths_fail() {
        assert!(matches!(
            load_params(Some(Path::new("https://example.org/p.json"))),
            Err(IoError::Invalid(_))
        ));
        assert!(matches!(load_params(Some(Path::new("/no/such/params.json"))), Err(IoError::Path(_))));
    }
}
