use std::path::PathBuf;

use thiserror::Error;

/// Broad class of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required field is missing or has the wrong shape.
    Structural,
    /// A value is outside its valid domain.
    Range,
    /// A value has the right shape but cannot be parsed.
    Format,
}

/// Why a trip document was rejected. Indices are zero-based.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TripError {
    #[error("invalid document: expected a JSON object")]
    InvalidDocument,
    #[error("missing or invalid `title`: expected a non-empty string")]
    InvalidTitle,
    #[error("invalid `language`: expected a string")]
    InvalidLanguage,
    #[error("missing or invalid `segments`: expected a non-empty array")]
    InvalidSegments,
    #[error("segment {segment}: expected an object")]
    InvalidSegment { segment: usize },
    #[error("segment {segment}: missing or invalid `coordinates`: expected a non-empty array")]
    InvalidCoordinates { segment: usize },
    #[error("segment {segment}, coordinate {coordinate}: expected a [longitude, latitude] pair")]
    MalformedCoordinate { segment: usize, coordinate: usize },
    #[error("segment {segment}, coordinate {coordinate}: longitude and latitude must be numbers")]
    NonNumericCoordinate { segment: usize, coordinate: usize },
    #[error("segment {segment}, coordinate {coordinate}: longitude {value} outside [-180, 180]")]
    LongitudeOutOfRange {
        segment: usize,
        coordinate: usize,
        value: f64,
    },
    #[error("segment {segment}, coordinate {coordinate}: latitude {value} outside [-90, 90]")]
    LatitudeOutOfRange {
        segment: usize,
        coordinate: usize,
        value: f64,
    },
    #[error("segment {segment}: missing or invalid `time`: expected a string")]
    InvalidTime { segment: usize },
    #[error("segment {segment}: unparseable `time` {value:?}")]
    UnparseableTime { segment: usize, value: String },
    #[error("segment {segment}: invalid `{field}`: expected a string")]
    InvalidField { segment: usize, field: &'static str },
}

impl TripError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TripError::LongitudeOutOfRange { .. } | TripError::LatitudeOutOfRange { .. } => {
                ErrorKind::Range
            }
            TripError::UnparseableTime { .. } => ErrorKind::Format,
            _ => ErrorKind::Structural,
        }
    }

    /// Index of the offending segment, when the failure is segment-scoped.
    pub fn segment(&self) -> Option<usize> {
        match *self {
            TripError::InvalidSegment { segment }
            | TripError::InvalidCoordinates { segment }
            | TripError::MalformedCoordinate { segment, .. }
            | TripError::NonNumericCoordinate { segment, .. }
            | TripError::LongitudeOutOfRange { segment, .. }
            | TripError::LatitudeOutOfRange { segment, .. }
            | TripError::InvalidTime { segment }
            | TripError::UnparseableTime { segment, .. }
            | TripError::InvalidField { segment, .. } => Some(segment),
            _ => None,
        }
    }

    /// Index of the offending coordinate within its segment.
    pub fn coordinate(&self) -> Option<usize> {
        match *self {
            TripError::MalformedCoordinate { coordinate, .. }
            | TripError::NonNumericCoordinate { coordinate, .. }
            | TripError::LongitudeOutOfRange { coordinate, .. }
            | TripError::LatitudeOutOfRange { coordinate, .. } => Some(coordinate),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("expected a .json file, got {0:?}")]
    NotJson(PathBuf),
    #[error("failed to read trip file {path:?}: {source}")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("trip document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Trip(#[from] TripError),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to build GPX document: {0}")]
    Gpx(#[from] gpx::errors::GpxError),
}
