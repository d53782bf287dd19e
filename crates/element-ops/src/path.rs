use std::f64::consts::TAU;

use element_types::{Guide, Point3d, Tolerance, Vec3};

use crate::errors::ElementError;

/// An ordered polyline of at least two waypoints.
///
/// Consecutive waypoints define the straight segments ("flights" for a
/// stair). Duplicate waypoints are kept; consumers deal with zero-length
/// segments themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    points: Vec<Point3d>,
}

impl Path {
    /// Normalize a host guide into a polyline path.
    ///
    /// Fails with `InvalidGuide` when the guide is not a curve (or carries
    /// non-finite coordinates), and with `NonPolylineGuide` when the curve has
    /// no straight-segment representation or fewer than two points.
    pub fn from_guide(guide: &Guide) -> Result<Self, ElementError> {
        let points = match guide {
            Guide::Polyline { points } => points.clone(),
            Guide::Line { start, end } => vec![*start, *end],
            Guide::Nurbs {
                degree: 1,
                control_points,
            } => control_points.clone(),
            Guide::Nurbs { degree, .. } => {
                return Err(ElementError::NonPolylineGuide {
                    reason: format!("degree {degree} NURBS curve"),
                })
            }
            Guide::Arc { .. } => {
                return Err(ElementError::NonPolylineGuide {
                    reason: "arc has no straight segments".to_string(),
                })
            }
            Guide::Point { .. } => {
                return Err(ElementError::InvalidGuide {
                    reason: "a point is not a curve".to_string(),
                })
            }
        };
        Self::from_points(points)
    }

    pub fn from_points(points: Vec<Point3d>) -> Result<Self, ElementError> {
        if points.iter().any(|p| !p.is_finite()) {
            return Err(ElementError::InvalidGuide {
                reason: "non-finite coordinate".to_string(),
            });
        }
        if points.len() < 2 {
            return Err(ElementError::NonPolylineGuide {
                reason: format!("{} point(s), need at least 2", points.len()),
            });
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point3d] {
        &self.points
    }

    /// Segments as `(start, end)` pairs, in path order.
    pub fn flights(&self) -> impl ExactSizeIterator<Item = (Point3d, Point3d)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    pub fn flight_count(&self) -> usize {
        self.points.len() - 1
    }

    pub fn length(&self) -> f64 {
        self.flights().map(|(a, b)| a.distance_to(&b)).sum()
    }

    /// True when the last waypoint returns to the first one.
    pub fn is_closed(&self, tol: &Tolerance) -> bool {
        let (first, last) = (self.points[0], self.points[self.points.len() - 1]);
        self.points.len() >= 4 && tol.is_zero_length(first.distance_to(&last))
    }

    /// Waypoints of a closed path without the repeated closing point.
    pub fn ring(&self, tol: &Tolerance) -> &[Point3d] {
        if self.is_closed(tol) {
            &self.points[..self.points.len() - 1]
        } else {
            &self.points
        }
    }

    /// Point at fraction `t` of the total arc length. `t` is clamped to `[0, 1]`.
    pub fn point_at_normalized_length(&self, t: f64) -> Point3d {
        self.locate(t).0
    }

    /// Point at fraction `t` of the total arc length together with the index
    /// of the segment it lies on. Zero-length segments are never reported
    /// unless the whole path has zero length.
    pub fn locate(&self, t: f64) -> (Point3d, usize) {
        let total = self.length();
        if total <= 0.0 {
            return (self.points[0], 0);
        }
        let mut remaining = t.clamp(0.0, 1.0) * total;
        for (i, (a, b)) in self.flights().enumerate() {
            let len = a.distance_to(&b);
            if remaining <= len && len > 0.0 {
                return (a.lerp(&b, remaining / len), i);
            }
            remaining -= len;
        }
        let last = self
            .points
            .windows(2)
            .rposition(|w| w[0].distance_to(&w[1]) > 0.0)
            .unwrap_or(0);
        (self.points[self.points.len() - 1], last)
    }
}

/// A guide that can be sampled by arc length: a polyline or a horizontal arc.
#[derive(Debug, Clone, PartialEq)]
pub enum GuideCurve {
    Polyline(Path),
    Arc {
        center: Point3d,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
}

impl GuideCurve {
    pub fn from_guide(guide: &Guide) -> Result<Self, ElementError> {
        match guide {
            Guide::Arc {
                center,
                radius,
                start_angle,
                end_angle,
            } => {
                let finite = center.is_finite()
                    && radius.is_finite()
                    && start_angle.is_finite()
                    && end_angle.is_finite();
                if !finite || *radius <= 0.0 {
                    return Err(ElementError::InvalidGuide {
                        reason: format!("arc with radius {radius} is not a valid curve"),
                    });
                }
                if start_angle == end_angle {
                    return Err(ElementError::InvalidGuide {
                        reason: format!("arc starts and ends at angle {start_angle}"),
                    });
                }
                Ok(GuideCurve::Arc {
                    center: *center,
                    radius: *radius,
                    start_angle: *start_angle,
                    end_angle: *end_angle,
                })
            }
            other => Path::from_guide(other).map(GuideCurve::Polyline),
        }
    }

    pub fn length(&self) -> f64 {
        match self {
            GuideCurve::Polyline(path) => path.length(),
            GuideCurve::Arc {
                radius,
                start_angle,
                end_angle,
                ..
            } => radius * sweep(*start_angle, *end_angle),
        }
    }

    /// Point at fraction `t` of the arc length. `t` is clamped to `[0, 1]`.
    pub fn point_at_normalized_length(&self, t: f64) -> Point3d {
        match self {
            GuideCurve::Polyline(path) => path.point_at_normalized_length(t),
            GuideCurve::Arc {
                center,
                radius,
                start_angle,
                end_angle,
            } => {
                let angle = start_angle + t.clamp(0.0, 1.0) * sweep(*start_angle, *end_angle);
                *center + Vec3::new(angle.cos(), angle.sin(), 0.0) * *radius
            }
        }
    }
}

/// Counter-clockwise sweep from `start` to `end`, in `(0, 2π]`. Distinct
/// angles a whole number of turns apart sweep a full circle.
fn sweep(start: f64, end: f64) -> f64 {
    let s = (end - start).rem_euclid(TAU);
    if s == 0.0 {
        TAU
    } else {
        s
    }
}
