use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

use element_types::Point3d;

new_key_type! {
    /// Transient identifier of a planar profile awaiting extrusion.
    pub struct ProfileId;
    /// Transient identifier of a solid inside a kernel session.
    pub struct SolidId;
}

/// Opaque handle to a solid in the geometry kernel.
/// NEVER persisted. Valid only for the current kernel session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KernelSolidHandle(pub(crate) SolidId);

impl KernelSolidHandle {
    pub(crate) fn id(&self) -> SolidId {
        self.0
    }
}

/// Errors from kernel operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KernelError {
    #[error("profile is degenerate: {reason}")]
    DegenerateProfile { reason: String },

    #[error("extrusion failed: {reason}")]
    ExtrusionFailed { reason: String },

    #[error("boolean operation failed: {reason}")]
    BooleanFailed { reason: String },

    #[error("profile not found: {id:?}")]
    ProfileNotFound { id: ProfileId },

    #[error("solid not found: {id:?}")]
    SolidNotFound { id: SolidId },
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point3d,
    pub max: Point3d,
}

impl BoundingBox {
    pub fn new(min: Point3d, max: Point3d) -> Self {
        Self { min, max }
    }

    pub fn empty() -> Self {
        Self {
            min: Point3d::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3d::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn from_points(points: &[Point3d]) -> Self {
        let mut bb = Self::empty();
        for p in points {
            bb.expand_to_include(p);
        }
        bb
    }

    pub fn expand_to_include(&mut self, p: &Point3d) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    /// Overlap of two boxes, or `None` when they do not share interior volume.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let min = Point3d::new(
            self.min.x.max(other.min.x),
            self.min.y.max(other.min.y),
            self.min.z.max(other.min.z),
        );
        let max = Point3d::new(
            self.max.x.min(other.max.x),
            self.max.y.min(other.max.y),
            self.max.z.min(other.max.z),
        );
        if min.x < max.x && min.y < max.y && min.z < max.z {
            Some(Self { min, max })
        } else {
            None
        }
    }

    pub fn volume(&self) -> f64 {
        let d = self.max - self.min;
        (d.x * d.y * d.z).max(0.0)
    }
}
