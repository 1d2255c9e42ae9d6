use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use serde_json::{Map, Value, json};

pub use shared::{ApiError, Coordinate, Point3D, Transport};

/// One leg of a trip. Built only by the validator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    coordinates: Vec<Coordinate>,
    time: String,
    timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    transport: Option<Transport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    photo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}

impl Segment {
    pub(crate) fn new(
        coordinates: Vec<Coordinate>,
        time: String,
        timestamp: DateTime<Utc>,
        transport: Option<Transport>,
        photo: Option<String>,
        note: Option<String>,
    ) -> Self {
        Self {
            coordinates,
            time,
            timestamp,
            transport,
            photo,
            note,
        }
    }

    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    /// The `time` text exactly as it appeared in the document.
    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn transport(&self) -> Option<&Transport> {
        self.transport.as_ref()
    }

    pub fn photo(&self) -> Option<&str> {
        self.photo.as_deref()
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    fn to_document(&self) -> Value {
        let mut object = Map::new();
        object.insert(
            "coordinates".into(),
            Value::Array(
                self.coordinates
                    .iter()
                    .map(|c| json!([c.lon, c.lat]))
                    .collect(),
            ),
        );
        object.insert("time".into(), Value::String(self.time.clone()));
        if let Some(transport) = &self.transport {
            object.insert("transport".into(), Value::String(transport.to_string()));
        }
        if let Some(photo) = &self.photo {
            object.insert("photo".into(), Value::String(photo.clone()));
        }
        if let Some(note) = &self.note {
            object.insert("note".into(), Value::String(note.clone()));
        }
        Value::Object(object)
    }
}

/// A validated itinerary.
///
/// Segments are non-empty and sorted by timestamp, with equal timestamps kept
/// in document order. `start_time <= end_time` always holds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTrip {
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<String>,
    segments: Vec<Segment>,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    /// Milliseconds between `start_time` and `end_time`.
    #[serde(rename = "totalDuration")]
    total_duration_ms: i64,
}

impl ParsedTrip {
    /// `segments` must already be non-empty and sorted.
    pub(crate) fn from_sorted(
        title: String,
        language: Option<String>,
        segments: Vec<Segment>,
    ) -> Option<Self> {
        let start_time = segments.first()?.timestamp;
        let end_time = segments.last()?.timestamp;
        let total_duration_ms = (end_time - start_time).num_milliseconds();
        Some(Self {
            title,
            language,
            segments,
            start_time,
            end_time,
            total_duration_ms,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn end_time(&self) -> DateTime<Utc> {
        self.end_time
    }

    pub fn total_duration(&self) -> Duration {
        self.end_time - self.start_time
    }

    pub fn total_duration_ms(&self) -> i64 {
        self.total_duration_ms
    }

    pub fn coordinate_count(&self) -> usize {
        self.segments.iter().map(|s| s.coordinates.len()).sum()
    }

    /// The trip's logical fields in the input document format.
    pub fn to_document(&self) -> Value {
        let mut object = Map::new();
        object.insert("title".into(), Value::String(self.title.clone()));
        if let Some(language) = &self.language {
            object.insert("language".into(), Value::String(language.clone()));
        }
        object.insert(
            "segments".into(),
            Value::Array(self.segments.iter().map(Segment::to_document).collect()),
        );
        Value::Object(object)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripSummary {
    pub segment_count: usize,
    pub coordinate_count: usize,
    pub distance_km: f64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub total_duration_ms: i64,
}

/// Everything the globe view needs to draw a freshly loaded trip.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripView {
    pub trip: ParsedTrip,
    pub path: Vec<Point3D>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera: Option<Point3D>,
    pub summary: TripSummary,
    pub gpx_base64: String,
}
