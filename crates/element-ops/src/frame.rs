use element_types::{Point3d, Side, Tolerance, Vec3};

/// Lateral distance from a guide to the footprint origin, measured along the
/// frame's `left` direction.
pub fn alignment_offset(width: f64, side: Side) -> f64 {
    match side {
        Side::Center => -width * 0.5,
        Side::Left => 0.0,
        Side::Right => -width,
    }
}

/// Local coordinate frame of one straight flight.
///
/// `forward` points along the segment, `left` is horizontal and perpendicular
/// to both `forward` and world up, and `origin` is the segment start shifted
/// sideways by the alignment offset. All treads and landings of a flight
/// share one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightFrame {
    pub origin: Point3d,
    pub forward: Vec3,
    pub left: Vec3,
    /// Length of the segment the frame was built from.
    pub length: f64,
    /// Set when the segment is shorter than the coincidence tolerance and
    /// `forward` is the fallback direction rather than a measured one.
    pub degenerate: bool,
}

impl FlightFrame {
    /// Build the frame for the segment `start -> end`, shifted sideways so a
    /// footprint of `width` sits on `side` of the segment.
    pub fn new(start: Point3d, end: Point3d, width: f64, side: Side, tol: &Tolerance) -> Self {
        let mut frame = Self::unaligned(start, end, tol);
        frame.origin = start + frame.left * alignment_offset(width, side);
        frame
    }

    /// Frame for the segment `start -> end` with its origin at `start`.
    ///
    /// Never fails. A segment shorter than `tol.coincidence` gets
    /// `forward = +X`; a segment parallel to world up gets `left = +Y`.
    pub fn unaligned(start: Point3d, end: Point3d, tol: &Tolerance) -> Self {
        let segment = end - start;
        let length = segment.length();

        let (forward, degenerate) = match segment.normalized_or_none(tol.coincidence) {
            Some(dir) => (dir, false),
            None => (Vec3::X, true),
        };
        let left = Vec3::Z
            .cross(&forward)
            .normalized_or_none(tol.angular)
            .unwrap_or(Vec3::Y);

        Self {
            origin: start,
            forward,
            left,
            length,
            degenerate,
        }
    }

    /// `origin + forward * along + up * elevation`.
    pub fn point_at(&self, along: f64, elevation: f64) -> Point3d {
        self.origin + self.forward * along + Vec3::Z * elevation
    }
}
