use element_types::{Point3d, Vec3};

use crate::types::*;

/// Solid-construction contract of the geometry kernel.
///
/// Generators only describe solids; a `Kernel` turns those descriptions into
/// kernel-owned solids. Implementations may keep internal state, so every
/// operation takes `&mut self` and calls are serialized by the caller.
pub trait Kernel {
    /// Create a closed rectangular boundary spanning `[0, extent_x] x [0, extent_y]`
    /// in the plane through `origin` spanned by `x_axis` and `y_axis`.
    fn make_planar_profile(
        &mut self,
        origin: Point3d,
        x_axis: Vec3,
        y_axis: Vec3,
        extent_x: f64,
        extent_y: f64,
    ) -> Result<ProfileId, KernelError>;

    /// Create a closed planar boundary through `points`. The closing edge is implied.
    fn make_polygon_profile(&mut self, points: &[Point3d]) -> Result<ProfileId, KernelError>;

    /// Extrude a profile along world up by `height` and cap both ends.
    /// The profile is consumed.
    fn extrude(
        &mut self,
        profile: ProfileId,
        height: f64,
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Boolean difference: `a` minus `b`. Neither input is modified.
    fn boolean_difference(
        &mut self,
        a: &KernelSolidHandle,
        b: &KernelSolidHandle,
    ) -> Result<KernelSolidHandle, KernelError>;
}

/// Read-only queries on solids owned by a kernel.
pub trait KernelIntrospect {
    /// Axis-aligned bounds of a solid.
    fn bounding_box(&self, solid: &KernelSolidHandle) -> Option<BoundingBox>;

    /// Enclosed volume of a solid, in cubic millimetres.
    fn volume(&self, solid: &KernelSolidHandle) -> Option<f64>;

    /// Number of solids currently alive in the kernel session.
    fn solid_count(&self) -> usize;
}
