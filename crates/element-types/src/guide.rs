use serde::{Deserialize, Serialize};

use crate::point::Point3d;

/// A geometric guide as handed over by the host environment.
///
/// Generators coerce a guide into the shape they need (a polyline path, a
/// sampled curve, a closed boundary). Not every variant is usable by every
/// generator: a `Point` is not a curve at all, and an `Arc` has no
/// straight-segment representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Guide {
    /// Ordered vertices joined by straight segments.
    Polyline { points: Vec<Point3d> },
    /// A single straight segment.
    Line { start: Point3d, end: Point3d },
    /// A NURBS curve given by its control polygon. Degree 1 is a polyline.
    Nurbs {
        degree: u32,
        control_points: Vec<Point3d>,
    },
    /// A circular arc in the horizontal plane through `center`.
    /// Angles are measured counter-clockwise from world +X. Equal angles
    /// describe no curve; angles a whole turn apart describe a full circle.
    Arc {
        center: Point3d,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
    /// A bare point.
    Point { location: Point3d },
}

impl Guide {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Guide::Polyline { .. } => "polyline",
            Guide::Line { .. } => "line",
            Guide::Nurbs { .. } => "nurbs",
            Guide::Arc { .. } => "arc",
            Guide::Point { .. } => "point",
        }
    }

    /// Convenience constructor for a polyline guide.
    pub fn polyline<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Point3d>,
    {
        Guide::Polyline {
            points: points.into_iter().collect(),
        }
    }
}
