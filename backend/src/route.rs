use crate::arc::{GLOBE_RADIUS, interpolate_arc, project};
use crate::models::{Coordinate, ParsedTrip, Point3D, TripSummary};

const EARTH_RADIUS_KM: f64 = 6_371.0;
/// Radius the start marker is projected at before aiming the camera.
const CAMERA_TARGET_RADIUS: f64 = 1.1;
pub const CAMERA_DISTANCE: f64 = 3.0;

/// The whole trip as one line strip: every arc of every segment, in order.
///
/// Single-coordinate segments add nothing. Arc boundary points are repeated.
pub fn trip_path(trip: &ParsedTrip) -> Vec<Point3D> {
    let mut path = Vec::new();
    for segment in trip.segments() {
        for pair in segment.coordinates().windows(2) {
            path.extend(interpolate_arc(pair[0], pair[1]));
        }
    }
    tracing::debug!(
        "built path of {} points for trip {:?}",
        path.len(),
        trip.title()
    );
    path
}

/// Where the camera sits so the globe centre is on screen and the departure
/// point faces the viewer.
pub fn camera_position(trip: &ParsedTrip) -> Option<Point3D> {
    let start = *trip.segments().first()?.coordinates().first()?;
    Some(
        project(start, CAMERA_TARGET_RADIUS)
            .normalize()
            .scale(CAMERA_DISTANCE * GLOBE_RADIUS),
    )
}

pub fn summarize(trip: &ParsedTrip) -> TripSummary {
    let distance_km = trip
        .segments()
        .iter()
        .map(|segment| approximate_distance_km(segment.coordinates()))
        .sum();
    TripSummary {
        segment_count: trip.segments().len(),
        coordinate_count: trip.coordinate_count(),
        distance_km,
        start_time: trip.start_time(),
        end_time: trip.end_time(),
        total_duration_ms: trip.total_duration_ms(),
    }
}

pub fn approximate_distance_km(path: &[Coordinate]) -> f64 {
    path.windows(2).map(|w| haversine_km(w[0], w[1])).sum()
}

pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let sin_dlat = (dlat / 2.0).sin();
    let sin_dlon = (dlon / 2.0).sin();

    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arc::arc_steps;
    use crate::parser::parse_trip;
    use serde_json::json;

    fn two_segment_trip() -> ParsedTrip {
        parse_trip(&json!({
            "title": "Trip",
            "segments": [
                {"coordinates": [[0, 0], [10, 10], [20, 0]], "time": "2024-01-02T00:00:00Z"},
                {"coordinates": [[10, 10]], "time": "2024-01-01T00:00:00Z"},
                {"coordinates": [[20, 0], [90, 0]], "time": "2024-01-03T00:00:00Z"}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_path_chains_every_pair_in_order() {
        let trip = two_segment_trip();
        let path = trip_path(&trip);

        let expected: usize = trip
            .segments()
            .iter()
            .flat_map(|s| s.coordinates().windows(2))
            .map(|w| arc_steps(project(w[0], 1.0), project(w[1], 1.0)) + 1)
            .sum();
        assert_eq!(path.len(), expected);

        let first = project(Coordinate::new(0.0, 0.0), 1.0);
        let last = project(Coordinate::new(90.0, 0.0), 1.0);
        assert!(path[0].distance_to(first) < 1e-9);
        assert!(path[path.len() - 1].distance_to(last) < 1e-9);
    }

    #[test]
    fn test_boundary_points_are_repeated() {
        let trip = parse_trip(&json!({
            "title": "Hop",
            "segments": [{"coordinates": [[0, 0], [5, 5], [10, 0]], "time": "2024-01-01"}]
        }))
        .unwrap();
        let path = trip_path(&trip);
        let first_arc = interpolate_arc(Coordinate::new(0.0, 0.0), Coordinate::new(5.0, 5.0)).len();
        assert!(path[first_arc - 1].distance_to(path[first_arc]) < 1e-9);
    }

    #[test]
    fn test_single_point_trip_has_empty_path() {
        let trip = parse_trip(&json!({
            "title": "Stay",
            "segments": [{"coordinates": [[116.4, 39.9]], "time": "2024-01-01"}]
        }))
        .unwrap();
        assert!(trip_path(&trip).is_empty());
    }

    #[test]
    fn test_camera_faces_departure() {
        let trip = two_segment_trip();
        let camera = camera_position(&trip).unwrap();
        assert!((camera.length() - CAMERA_DISTANCE).abs() < 1e-9);

        // Earliest segment departs from [10, 10].
        let departure = project(Coordinate::new(10.0, 10.0), 1.0);
        assert!(camera.normalize().distance_to(departure) < 1e-9);
    }

    #[test]
    fn test_summary_totals() {
        let trip = two_segment_trip();
        let summary = summarize(&trip);
        assert_eq!(summary.segment_count, 3);
        assert_eq!(summary.coordinate_count, 6);
        assert_eq!(summary.total_duration_ms, 2 * 86_400_000);

        let expected = haversine_km(Coordinate::new(0.0, 0.0), Coordinate::new(10.0, 10.0))
            + haversine_km(Coordinate::new(10.0, 10.0), Coordinate::new(20.0, 0.0))
            + haversine_km(Coordinate::new(20.0, 0.0), Coordinate::new(90.0, 0.0));
        assert!((summary.distance_km - expected).abs() < 1e-9);
    }

    #[test]
    fn test_haversine_quarter_equator() {
        let d = haversine_km(Coordinate::new(0.0, 0.0), Coordinate::new(90.0, 0.0));
        let quarter = std::f64::consts::PI * EARTH_RADIUS_KM / 2.0;
        assert!((d - quarter).abs() < 1e-6);
    }

    #[test]
    fn test_approximate_distance_single_point() {
        assert_eq!(approximate_distance_km(&[Coordinate::new(5.0, 45.0)]), 0.0);
        assert_eq!(approximate_distance_km(&[]), 0.0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn valid_coord() -> impl Strategy<Value = Coordinate> {
            (-180.0..=180.0, -90.0..=90.0).prop_map(|(lon, lat)| Coordinate::new(lon, lat))
        }

        proptest! {
            #[test]
            fn prop_haversine_symmetric(a in valid_coord(), b in valid_coord()) {
                prop_assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-9);
            }

            #[test]
            fn prop_haversine_bounded_by_half_circumference(a in valid_coord(), b in valid_coord()) {
                let dist = haversine_km(a, b);
                prop_assert!(dist >= 0.0);
                prop_assert!(dist <= std::f64::consts::PI * EARTH_RADIUS_KM + 1e-6);
            }
        }
    }
}
