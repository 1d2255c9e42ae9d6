use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use crate::error::TripError;
use crate::models::{Coordinate, ParsedTrip, Segment, Transport};

/// Offset-less date-time layouts, read as UTC.
const LOCAL_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Validate a decoded trip document and normalize it into a [`ParsedTrip`].
///
/// Checks run in document order and the first failure aborts the whole
/// document. On success segments are stably sorted by timestamp.
pub fn parse_trip(document: &Value) -> Result<ParsedTrip, TripError> {
    let root = document.as_object().ok_or(TripError::InvalidDocument)?;

    let title = match root.get("title") {
        Some(Value::String(title)) if !title.is_empty() => title.clone(),
        _ => return Err(TripError::InvalidTitle),
    };
    let language = optional_string(root.get("language"), || TripError::InvalidLanguage)?;

    let raw_segments = match root.get("segments") {
        Some(Value::Array(items)) if !items.is_empty() => items,
        _ => return Err(TripError::InvalidSegments),
    };

    let mut segments = raw_segments
        .iter()
        .enumerate()
        .map(|(index, raw)| parse_segment(index, raw))
        .collect::<Result<Vec<_>, _>>()?;
    segments.sort_by_key(|segment| segment.timestamp());

    let trip = ParsedTrip::from_sorted(title, language, segments).ok_or(TripError::InvalidSegments)?;
    tracing::debug!(
        "parsed trip {:?}: {} segments, {} coordinates",
        trip.title(),
        trip.segments().len(),
        trip.coordinate_count()
    );
    Ok(trip)
}

/// Parse a point in time: RFC 3339 (seconds optional), an offset-less ISO
/// date-time (UTC), or a bare `YYYY-MM-DD`, `YYYY-MM` or `YYYY` date (UTC
/// midnight on the first day).
pub fn parse_time(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(time) = DateTime::parse_from_rfc3339(text) {
        return Some(time.with_timezone(&Utc));
    }
    if let Ok(time) = DateTime::parse_from_str(&zulu_as_offset(text), "%Y-%m-%dT%H:%M%:z") {
        return Some(time.with_timezone(&Utc));
    }
    for format in LOCAL_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }
    parse_date(text)?.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc())
}

fn zulu_as_offset(text: &str) -> String {
    match text.strip_suffix(['Z', 'z']) {
        Some(rest) => format!("{rest}+00:00"),
        None => text.to_string(),
    }
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    let is_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    match text.len() {
        4 if is_digits(text) => NaiveDate::from_ymd_opt(text.parse().ok()?, 1, 1),
        7 => NaiveDate::parse_from_str(&format!("{text}-01"), "%Y-%m-%d").ok(),
        _ => NaiveDate::parse_from_str(text, "%Y-%m-%d").ok(),
    }
}

fn parse_segment(segment: usize, raw: &Value) -> Result<Segment, TripError> {
    let object = raw
        .as_object()
        .ok_or(TripError::InvalidSegment { segment })?;

    let raw_coordinates = match object.get("coordinates") {
        Some(Value::Array(items)) if !items.is_empty() => items,
        _ => return Err(TripError::InvalidCoordinates { segment }),
    };
    let time = match object.get("time") {
        Some(Value::String(time)) if !time.is_empty() => time,
        _ => return Err(TripError::InvalidTime { segment }),
    };
    let coordinates = raw_coordinates
        .iter()
        .enumerate()
        .map(|(coordinate, value)| parse_coordinate(segment, coordinate, value))
        .collect::<Result<Vec<_>, _>>()?;

    let timestamp = parse_time(time).ok_or_else(|| TripError::UnparseableTime {
        segment,
        value: time.clone(),
    })?;

    let field_error = move |field: &'static str| move || TripError::InvalidField { segment, field };
    let transport =
        optional_string(object.get("transport"), field_error("transport"))?.map(Transport::from);
    let photo = optional_string(object.get("photo"), field_error("photo"))?;
    let note = optional_string(object.get("note"), field_error("note"))?;

    Ok(Segment::new(
        coordinates,
        time.clone(),
        timestamp,
        transport,
        photo,
        note,
    ))
}

fn parse_coordinate(segment: usize, coordinate: usize, value: &Value) -> Result<Coordinate, TripError> {
    let pair = match value {
        Value::Array(pair) if pair.len() == 2 => pair,
        _ => return Err(TripError::MalformedCoordinate { segment, coordinate }),
    };
    let (Some(lon), Some(lat)) = (pair[0].as_f64(), pair[1].as_f64()) else {
        return Err(TripError::NonNumericCoordinate { segment, coordinate });
    };

    if !(-180.0..=180.0).contains(&lon) {
        return Err(TripError::LongitudeOutOfRange {
            segment,
            coordinate,
            value: lon,
        });
    }
    if !(-90.0..=90.0).contains(&lat) {
        return Err(TripError::LatitudeOutOfRange {
            segment,
            coordinate,
            value: lat,
        });
    }
    Ok(Coordinate::new(lon, lat))
}

/// `null` and a missing key both mean "absent".
fn optional_string(
    value: Option<&Value>,
    error: impl FnOnce() -> TripError,
) -> Result<Option<String>, TripError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(_) => Err(error()),
    }
}
