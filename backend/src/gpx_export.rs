use std::io::Write;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use geo_types::Point;
use gpx::{Gpx, GpxVersion, Track, TrackSegment, Waypoint};

use crate::error::ExportError;
use crate::models::{Coordinate, ParsedTrip};

const CREATOR: &str = "globeteller";

/// One track named after the trip, one track segment per trip segment.
pub fn trip_to_gpx(trip: &ParsedTrip) -> Gpx {
    let mut gpx = Gpx {
        version: GpxVersion::Gpx11,
        creator: Some(CREATOR.into()),
        ..Default::default()
    };
    let mut track = Track {
        name: Some(trip.title().to_string()),
        ..Default::default()
    };

    for trip_segment in trip.segments() {
        let mut segment = TrackSegment::new();
        segment
            .points
            .extend(trip_segment.coordinates().iter().map(to_waypoint));
        track.segments.push(segment);
    }
    gpx.tracks.push(track);
    gpx
}

pub fn write_trip_gpx(trip: &ParsedTrip, writer: impl Write) -> Result<(), ExportError> {
    gpx::write(&trip_to_gpx(trip), writer)?;
    Ok(())
}

pub fn encode_trip_as_gpx(trip: &ParsedTrip) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_trip_gpx(trip, &mut buffer)?;
    Ok(BASE64.encode(buffer))
}

fn to_waypoint(coord: &Coordinate) -> Waypoint {
    Waypoint::new(Point::new(coord.lon, coord.lat))
}
