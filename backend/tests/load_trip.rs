use std::fs;

use globeteller::{
    error::{LoadError, TripError},
    loader::load_trip,
    models::ParsedTrip,
    parse_trip,
    route::trip_path,
};
use tempfile::tempdir;

const SAMPLE_TRIP: &str = include_str!("../data/sample_trip.json");

#[test]
fn loads_trip_from_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("trip.json");
    fs::write(&path, SAMPLE_TRIP).unwrap();

    let trip = load_trip(&path).unwrap();
    assert_eq!(trip.title(), "Around the Pacific");
    assert_eq!(trip.segments().len(), 4);
    assert!(trip.segments().windows(2).all(|w| w[0].timestamp() <= w[1].timestamp()));
}

#[test]
fn uppercase_extension_is_accepted() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("TRIP.JSON");
    fs::write(&path, SAMPLE_TRIP).unwrap();
    assert!(load_trip(&path).is_ok());
}

#[test]
fn other_extensions_are_rejected_before_reading() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("trip.gpx");
    fs::write(&path, SAMPLE_TRIP).unwrap();
    assert!(matches!(load_trip(&path), Err(LoadError::NotJson(_))));
}

#[test]
fn invalid_trip_file_reports_validation_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(
        &path,
        r#"{"title": "Broken", "segments": [{"coordinates": [[0, 0]], "time": "soon"}]}"#,
    )
    .unwrap();

    match load_trip(&path) {
        Err(LoadError::Trip(TripError::UnparseableTime { segment, value })) => {
            assert_eq!(segment, 0);
            assert_eq!(value, "soon");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn reparsed_document_builds_identical_path() {
    let trip = load_trip_from_str(SAMPLE_TRIP);
    let reparsed = parse_trip(&trip.to_document()).unwrap();

    assert_eq!(reparsed, trip);
    assert_eq!(trip_path(&reparsed), trip_path(&trip));
}

#[test]
fn reserialized_text_keeps_order_and_times() {
    let trip = load_trip_from_str(SAMPLE_TRIP);
    let text = serde_json::to_string_pretty(&trip.to_document()).unwrap();
    let reparsed = load_trip_from_str(&text);

    let times = |t: &ParsedTrip| -> Vec<String> {
        t.segments().iter().map(|s| s.time().to_string()).collect()
    };
    assert_eq!(times(&reparsed), times(&trip));
    assert_eq!(reparsed.start_time(), trip.start_time());
    assert_eq!(reparsed.end_time(), trip.end_time());
    assert_eq!(reparsed.total_duration_ms(), trip.total_duration_ms());
}

fn load_trip_from_str(text: &str) -> ParsedTrip {
    let document: serde_json::Value = serde_json::from_str(text).unwrap();
    parse_trip(&document).unwrap()
}
