//! Multi-layer floor build-up with optional voids.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use element_types::{
    FloorLayerKind, Guide, Point3d, ProfileSpec, SolidSpec, Tolerance, Vec3, VolumeKind,
};
use geom_kernel::{Kernel, KernelSolidHandle};

use crate::errors::{require_finite, require_positive, ElementError};
use crate::materialize::materialize_solid;
use crate::path::Path;

fn default_finish() -> f64 {
    15.0
}

fn default_screed() -> f64 {
    70.0
}

fn default_insulation() -> f64 {
    30.0
}

fn default_structural() -> f64 {
    250.0
}

/// Floor build-up, in millimetres. Layers are stacked downward from `elevation`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloorPlateParams {
    /// Top of the finish layer, relative to the boundary curve.
    pub elevation: f64,
    #[serde(default = "default_finish")]
    pub finish_thickness: f64,
    #[serde(default = "default_screed")]
    pub screed_thickness: f64,
    #[serde(default = "default_insulation")]
    pub insulation_thickness: f64,
    #[serde(default = "default_structural")]
    pub structural_thickness: f64,
}

impl FloorPlateParams {
    pub fn new(elevation: f64) -> Self {
        Self {
            elevation,
            finish_thickness: default_finish(),
            screed_thickness: default_screed(),
            insulation_thickness: default_insulation(),
            structural_thickness: default_structural(),
        }
    }

    pub fn thickness(&self, layer: FloorLayerKind) -> f64 {
        match layer {
            FloorLayerKind::Finish => self.finish_thickness,
            FloorLayerKind::Screed => self.screed_thickness,
            FloorLayerKind::Insulation => self.insulation_thickness,
            FloorLayerKind::Structural => self.structural_thickness,
        }
    }

    fn validate(&self) -> Result<(), ElementError> {
        require_finite("elevation", self.elevation)?;
        require_positive("finish_thickness", self.finish_thickness)?;
        require_positive("screed_thickness", self.screed_thickness)?;
        require_positive("insulation_thickness", self.insulation_thickness)?;
        require_positive("structural_thickness", self.structural_thickness)?;
        Ok(())
    }
}

/// One layer of the build-up, with the void volumes to cut from it.
#[derive(Debug, Clone, PartialEq)]
pub struct FloorLayer {
    pub kind: FloorLayerKind,
    /// Top of the layer, relative to the boundary curve.
    pub top: f64,
    pub bottom: f64,
    pub slab: SolidSpec,
    pub voids: Vec<SolidSpec>,
}

/// The full build-up, top layer first.
#[derive(Debug, Clone, PartialEq)]
pub struct FloorPlateLayout {
    pub layers: Vec<FloorLayer>,
}

impl FloorPlateLayout {
    pub fn layer(&self, kind: FloorLayerKind) -> Option<&FloorLayer> {
        self.layers.iter().find(|l| l.kind == kind)
    }

    /// Every slab and void, layer by layer.
    pub fn volumes(&self) -> Vec<SolidSpec> {
        self.layers
            .iter()
            .flat_map(|l| std::iter::once(&l.slab).chain(l.voids.iter()))
            .cloned()
            .collect()
    }

    /// Build each layer in the kernel and cut its voids.
    ///
    /// A void that fails to build or to subtract is skipped and the layer
    /// keeps its previous shape.
    pub fn materialize(
        &self,
        kernel: &mut dyn Kernel,
    ) -> Result<Vec<(FloorLayerKind, KernelSolidHandle)>, ElementError> {
        let mut built = Vec::with_capacity(self.layers.len());
        for layer in &self.layers {
            let mut slab = materialize_solid(kernel, &layer.slab)?;
            for void in &layer.voids {
                let cut = materialize_solid(kernel, void)
                    .and_then(|v| kernel.boolean_difference(&slab, &v).map_err(ElementError::from));
                match cut {
                    Ok(result) => slab = result,
                    Err(e) => warn!(layer = layer.kind.name(), error = %e, "void not subtracted"),
                }
            }
            built.push((layer.kind, slab));
        }
        Ok(built)
    }
}

/// Closed outline of `guide` as a polygon ring.
fn closed_ring(guide: &Guide, what: impl Into<String>) -> Result<Vec<Point3d>, ElementError> {
    let tol = Tolerance::default();
    let path = Path::from_guide(guide)?;
    if !path.is_closed(&tol) {
        return Err(ElementError::OpenBoundary { what: what.into() });
    }
    Ok(path.ring(&tol).to_vec())
}

fn prism(kind: VolumeKind, ring: &[Point3d], bottom: f64, thickness: f64) -> SolidSpec {
    let lift = Vec3::Z * bottom;
    SolidSpec {
        kind,
        profile: ProfileSpec::Polygon {
            points: ring.iter().map(|p| *p + lift).collect(),
        },
        height: thickness,
    }
}

/// Lay out a four-layer floor plate inside `boundary`, cutting `voids` from
/// every layer.
///
/// The boundary and every void must be closed polylines. Each layer spans
/// `[z - thickness, z]` starting from `z = elevation` and moving down.
#[instrument(skip(boundary, voids), fields(voids = voids.len()))]
pub fn layout_floor_plate(
    boundary: &Guide,
    voids: &[Guide],
    params: &FloorPlateParams,
) -> Result<FloorPlateLayout, ElementError> {
    let outline = closed_ring(boundary, "boundary")?;
    let void_rings = voids
        .iter()
        .enumerate()
        .map(|(i, v)| closed_ring(v, format!("void {i}")))
        .collect::<Result<Vec<_>, _>>()?;
    params.validate()?;

    let mut z = params.elevation;
    let mut layers = Vec::with_capacity(FloorLayerKind::TOP_DOWN.len());
    for kind in FloorLayerKind::TOP_DOWN {
        let thickness = params.thickness(kind);
        let bottom = z - thickness;
        layers.push(FloorLayer {
            kind,
            top: z,
            bottom,
            slab: prism(VolumeKind::FloorLayer { layer: kind }, &outline, bottom, thickness),
            voids: void_rings
                .iter()
                .enumerate()
                .map(|(index, ring)| {
                    let void = VolumeKind::Void { layer: kind, index };
                    prism(void, ring, bottom, thickness)
                })
                .collect(),
        });
        z = bottom;
    }

    info!(
        top = params.elevation,
        bottom = z,
        "laid out floor plate"
    );
    Ok(FloorPlateLayout { layers })
}
