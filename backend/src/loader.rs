use std::{fs, path::Path};

use serde_json::Value;

use crate::error::LoadError;
use crate::models::ParsedTrip;
use crate::parser::parse_trip;

/// Decode a JSON trip document and validate it.
pub fn parse_trip_slice(bytes: &[u8]) -> Result<ParsedTrip, LoadError> {
    let document: Value = serde_json::from_slice(bytes)?;
    Ok(parse_trip(&document)?)
}

pub fn parse_trip_str(text: &str) -> Result<ParsedTrip, LoadError> {
    parse_trip_slice(text.as_bytes())
}

/// Read and validate a trip file. Only `.json` files are accepted.
pub fn load_trip(path: impl AsRef<Path>) -> Result<ParsedTrip, LoadError> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if !is_json {
        return Err(LoadError::NotJson(path.to_path_buf()));
    }

    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        source,
        path: path.to_path_buf(),
    })?;
    let trip = parse_trip_slice(&bytes)?;
    tracing::info!("loaded trip {:?} from {}", trip.title(), path.display());
    Ok(trip)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TripError;

    #[test]
    fn test_invalid_json_is_a_decode_error() {
        let err = parse_trip_str("{\"title\": ").unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }

    #[test]
    fn test_validation_errors_pass_through() {
        let err = parse_trip_str("{\"segments\": []}").unwrap_err();
        assert!(matches!(err, LoadError::Trip(TripError::InvalidTitle)));
        assert_eq!(err.to_string(), TripError::InvalidTitle.to_string());
    }

    #[test]
    fn test_rejects_non_json_extension() {
        let err = load_trip("itinerary.txt").unwrap_err();
        assert!(matches!(err, LoadError::NotJson(_)));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_trip("does/not/exist/trip.json").unwrap_err();
        match err {
            LoadError::Io { path, .. } => assert!(path.ends_with("trip.json")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
