//! JSON-facing element requests.
//!
//! A host serializes one [`ElementRequest`] per element it wants generated.
//! Requests are tagged by `element`:
//!
//! ```json
//! { "element": "stair",
//!   "guide": { "type": "Line", "start": {...}, "end": {...} },
//!   "params": { "total_height": 3000.0 } }
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use element_types::{Guide, SolidSpec, VolumeKind};
use geom_kernel::{Kernel, KernelSolidHandle};

use crate::errors::ElementError;
use crate::fence::{layout_fence, FenceParams};
use crate::floor_plate::{layout_floor_plate, FloorPlateParams};
use crate::louvers::{layout_louvers, LouverParams};
use crate::materialize::materialize_solid;
use crate::stair::{layout_stair, StairParams};

/// One element to generate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "element", rename_all = "snake_case")]
pub enum ElementRequest {
    Stair {
        guide: Guide,
        params: StairParams,
    },
    Louvers {
        guide: Guide,
        params: LouverParams,
    },
    Fence {
        guide: Guide,
        #[serde(default)]
        params: FenceParams,
    },
    FloorPlate {
        boundary: Guide,
        #[serde(default)]
        voids: Vec<Guide>,
        params: FloorPlateParams,
    },
}

/// A solid built in the kernel, tagged with the element part it represents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuiltSolid {
    pub kind: VolumeKind,
    pub handle: KernelSolidHandle,
}

impl ElementRequest {
    pub fn from_json(json: &str) -> Result<Self, ElementError> {
        serde_json::from_str(json).map_err(|e| ElementError::Config(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, ElementError> {
        serde_json::to_string_pretty(self).map_err(|e| ElementError::Config(e.to_string()))
    }

    pub fn element_name(&self) -> &'static str {
        match self {
            ElementRequest::Stair { .. } => "stair",
            ElementRequest::Louvers { .. } => "louvers",
            ElementRequest::Fence { .. } => "fence",
            ElementRequest::FloorPlate { .. } => "floor_plate",
        }
    }

    /// Lay out the element without touching a kernel.
    ///
    /// Floor plates list each layer's slab followed by its voids.
    pub fn generate(&self) -> Result<Vec<SolidSpec>, ElementError> {
        match self {
            ElementRequest::Stair { guide, params } => Ok(layout_stair(guide, params)?.volumes),
            ElementRequest::Louvers { guide, params } => layout_louvers(guide, params),
            ElementRequest::Fence { guide, params } => layout_fence(guide, params),
            ElementRequest::FloorPlate {
                boundary,
                voids,
                params,
            } => Ok(layout_floor_plate(boundary, voids, params)?.volumes()),
        }
    }

    /// Lay out the element and build it in `kernel`.
    ///
    /// Floor plates yield one solid per layer with the voids already cut.
    #[instrument(skip_all, fields(element = self.element_name()))]
    pub fn build(&self, kernel: &mut dyn Kernel) -> Result<Vec<BuiltSolid>, ElementError> {
        let built = match self {
            ElementRequest::FloorPlate {
                boundary,
                voids,
                params,
            } => layout_floor_plate(boundary, voids, params)?
                .materialize(kernel)?
                .into_iter()
                .map(|(layer, handle)| BuiltSolid {
                    kind: VolumeKind::FloorLayer { layer },
                    handle,
                })
                .collect(),
            _ => self
                .generate()?
                .iter()
                .map(|spec| {
                    materialize_solid(kernel, spec).map(|handle| BuiltSolid {
                        kind: spec.kind,
                        handle,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
        };
        debug!(solids = built.len(), "built element");
        Ok(built)
    }
}
