//! Deterministic test double implementing Kernel + KernelIntrospect.
//!
//! Keeps profiles as corner lists and solids as prisms (bottom ring, top ring,
//! volume). Boolean difference is approximated by subtracting the overlap of
//! the two bounding boxes, which is exact for axis-aligned prisms.

use element_types::{solid::vector_area, Point3d, Vec3};
use slotmap::SlotMap;
use tracing::debug;

use crate::traits::{Kernel, KernelIntrospect};
use crate::types::*;

/// A closed planar boundary waiting to be extruded.
#[derive(Debug, Clone)]
struct MockProfile {
    corners: Vec<Point3d>,
}

/// A synthetic solid with known bounds and volume.
#[derive(Debug, Clone)]
struct MockSolid {
    bounds: BoundingBox,
    volume: f64,
}

/// Deterministic test double for the geometry kernel.
#[derive(Debug, Default)]
pub struct MockKernel {
    profiles: SlotMap<ProfileId, MockProfile>,
    solids: SlotMap<SolidId, MockSolid>,
    /// Number of successful kernel operations, in call order.
    operations: usize,
}

impl MockKernel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful operations performed so far.
    pub fn operation_count(&self) -> usize {
        self.operations
    }

    /// Profiles created but not yet extruded.
    pub fn pending_profiles(&self) -> usize {
        self.profiles.len()
    }

    fn insert_profile(&mut self, corners: Vec<Point3d>) -> Result<ProfileId, KernelError> {
        if corners.len() < 3 {
            return Err(KernelError::DegenerateProfile {
                reason: format!("{} corners, need at least 3", corners.len()),
            });
        }
        if corners.iter().any(|p| !p.is_finite()) {
            return Err(KernelError::DegenerateProfile {
                reason: "non-finite corner".to_string(),
            });
        }
        let area = vector_area(&corners).length();
        if area < 1e-12 {
            return Err(KernelError::DegenerateProfile {
                reason: "zero enclosed area".to_string(),
            });
        }
        self.operations += 1;
        Ok(self.profiles.insert(MockProfile { corners }))
    }

    fn solid(&self, handle: &KernelSolidHandle) -> Result<&MockSolid, KernelError> {
        self.solids
            .get(handle.id())
            .ok_or(KernelError::SolidNotFound { id: handle.id() })
    }
}

impl Kernel for MockKernel {
    fn make_planar_profile(
        &mut self,
        origin: Point3d,
        x_axis: Vec3,
        y_axis: Vec3,
        extent_x: f64,
        extent_y: f64,
    ) -> Result<ProfileId, KernelError> {
        let ex = x_axis * extent_x;
        let ey = y_axis * extent_y;
        self.insert_profile(vec![origin, origin + ex, origin + ex + ey, origin + ey])
    }

    fn make_polygon_profile(&mut self, points: &[Point3d]) -> Result<ProfileId, KernelError> {
        self.insert_profile(points.to_vec())
    }

    fn extrude(
        &mut self,
        profile: ProfileId,
        height: f64,
    ) -> Result<KernelSolidHandle, KernelError> {
        if !height.is_finite() || height == 0.0 {
            return Err(KernelError::ExtrusionFailed {
                reason: format!("height {height} is not a finite non-zero length"),
            });
        }
        let profile = self
            .profiles
            .remove(profile)
            .ok_or(KernelError::ProfileNotFound { id: profile })?;

        let lift = Vec3::Z * height;
        let mut bounds = BoundingBox::from_points(&profile.corners);
        for corner in &profile.corners {
            bounds.expand_to_include(&(*corner + lift));
        }
        // Only the vertical component of the profile area contributes to a
        // prism extruded along world up.
        let normal = vector_area(&profile.corners);
        let volume = normal.z.abs() * height.abs();

        let id = self.solids.insert(MockSolid { bounds, volume });
        self.operations += 1;
        debug!(?id, volume, "mock extrusion");
        Ok(KernelSolidHandle(id))
    }

    fn boolean_difference(
        &mut self,
        a: &KernelSolidHandle,
        b: &KernelSolidHandle,
    ) -> Result<KernelSolidHandle, KernelError> {
        let solid_a = self.solid(a)?.clone();
        let solid_b = self.solid(b)?;

        let overlap = solid_a
            .bounds
            .intersection(&solid_b.bounds)
            .ok_or_else(|| KernelError::BooleanFailed {
                reason: "solids do not intersect".to_string(),
            })?;

        let result = MockSolid {
            bounds: solid_a.bounds,
            volume: (solid_a.volume - overlap.volume()).max(0.0),
        };
        let id = self.solids.insert(result);
        self.operations += 1;
        Ok(KernelSolidHandle(id))
    }
}

impl KernelIntrospect for MockKernel {
    fn bounding_box(&self, solid: &KernelSolidHandle) -> Option<BoundingBox> {
        self.solids.get(solid.id()).map(|s| s.bounds)
    }

    fn volume(&self, solid: &KernelSolidHandle) -> Option<f64> {
        self.solids.get(solid.id()).map(|s| s.volume)
    }

    fn solid_count(&self) -> usize {
        self.solids.len()
    }
}
