use std::f64::consts::PI;
use std::iter::FusedIterator;

use crate::models::{Coordinate, Point3D};

pub const GLOBE_RADIUS: f64 = 1.0;
/// Extra radius at the middle of an arc, as a fraction of the globe radius.
pub const ARC_HEIGHT: f64 = 0.05;
pub const MIN_ARC_STEPS: usize = 15;
const STEPS_PER_UNIT_DISTANCE: f64 = 30.0;
/// Below this angle (radians) slerp is unstable and arcs fall back to a chord.
const LINEAR_FALLBACK_ANGLE: f64 = 1e-4;

/// Map a coordinate onto a sphere of `radius`.
///
/// The globe texture has its seam at ±180° longitude, hence the `+ 180` shift
/// and the negated x axis.
pub fn project(coord: Coordinate, radius: f64) -> Point3D {
    let phi = (90.0 - coord.lat).to_radians();
    let theta = (coord.lon + 180.0).to_radians();
    Point3D::new(
        -(radius * phi.sin() * theta.cos()),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}

/// Number of subdivisions between two projected points.
pub fn arc_steps(start: Point3D, end: Point3D) -> usize {
    let by_distance = (start.distance_to(end) * STEPS_PER_UNIT_DISTANCE).floor() as usize;
    by_distance.max(MIN_ARC_STEPS)
}

/// Points of the raised arc from `start` to `end`, both endpoints included.
///
/// Consecutive arcs share their boundary point; callers chaining arcs keep
/// the duplicate so the line strip stays continuous. Antipodal pairs, where
/// slerp is undefined, swing through a fixed perpendicular axis instead.
pub fn interpolate_arc(start: Coordinate, end: Coordinate) -> ArcPoints {
    ArcPoints::new(
        project(start, GLOBE_RADIUS),
        project(end, GLOBE_RADIUS),
    )
}

#[derive(Debug, Clone, Copy)]
enum ArcShape {
    Chord,
    Slerp { angle: f64, sin_angle: f64 },
    /// Endpoints are (nearly) opposite; swing through `pole` instead.
    HalfTurn { pole: Point3D },
}

#[derive(Debug, Clone)]
pub struct ArcPoints {
    start: Point3D,
    end: Point3D,
    start_unit: Point3D,
    end_unit: Point3D,
    shape: ArcShape,
    steps: usize,
    next: usize,
}

impl ArcPoints {
    fn new(start: Point3D, end: Point3D) -> Self {
        let start_unit = start.normalize();
        let end_unit = end.normalize();
        let angle = start_unit.dot(end_unit).clamp(-1.0, 1.0).acos();
        let sin_angle = angle.sin();

        let shape = if angle <= LINEAR_FALLBACK_ANGLE {
            ArcShape::Chord
        } else if sin_angle <= LINEAR_FALLBACK_ANGLE {
            ArcShape::HalfTurn {
                pole: perpendicular_unit(start_unit),
            }
        } else {
            ArcShape::Slerp { angle, sin_angle }
        };

        Self {
            start,
            end,
            start_unit,
            end_unit,
            shape,
            steps: arc_steps(start, end),
            next: 0,
        }
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    fn point_at(&self, t: f64) -> Point3D {
        let lift = GLOBE_RADIUS * (1.0 + ARC_HEIGHT * (t * PI).sin());
        match self.shape {
            ArcShape::Chord => self.start.lerp(self.end, t),
            ArcShape::Slerp { angle, sin_angle } => {
                let w_start = ((1.0 - t) * angle).sin() / sin_angle;
                let w_end = (t * angle).sin() / sin_angle;
                (self.start_unit.scale(w_start) + self.end_unit.scale(w_end))
                    .normalize()
                    .scale(lift)
            }
            ArcShape::HalfTurn { pole } => {
                if t >= 1.0 {
                    return self.end_unit.scale(lift);
                }
                (self.start_unit.scale((t * PI).cos()) + pole.scale((t * PI).sin()))
                    .normalize()
                    .scale(lift)
            }
        }
    }
}

impl Iterator for ArcPoints {
    type Item = Point3D;

    fn next(&mut self) -> Option<Point3D> {
        if self.next > self.steps {
            return None;
        }
        let t = self.next as f64 / self.steps as f64;
        self.next += 1;
        Some(self.point_at(t))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.steps + 1).saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ArcPoints {}

impl FusedIterator for ArcPoints {}

fn perpendicular_unit(v: Point3D) -> Point3D {
    let axis = if v.y.abs() < 0.9 {
        Point3D::new(0.0, 1.0, 0.0)
    } else {
        Point3D::new(1.0, 0.0, 0.0)
    };
    v.cross(axis).normalize()
}
