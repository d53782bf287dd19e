use element_types::{ProfileSpec, SolidSpec};
use geom_kernel::{Kernel, KernelSolidHandle};
use tracing::debug;

use crate::errors::ElementError;

/// Build one solid: create its profile, then extrude it by its height.
pub fn materialize_solid(
    kernel: &mut dyn Kernel,
    spec: &SolidSpec,
) -> Result<KernelSolidHandle, ElementError> {
    let profile = match &spec.profile {
        ProfileSpec::Rectangle {
            origin,
            x_axis,
            y_axis,
            extent_x,
            extent_y,
        } => kernel.make_planar_profile(*origin, *x_axis, *y_axis, *extent_x, *extent_y)?,
        ProfileSpec::Polygon { points } => kernel.make_polygon_profile(points)?,
    };
    Ok(kernel.extrude(profile, spec.height)?)
}

/// Build every solid in order. Stops at the first kernel failure.
pub fn materialize(
    kernel: &mut dyn Kernel,
    specs: &[SolidSpec],
) -> Result<Vec<KernelSolidHandle>, ElementError> {
    let handles = specs
        .iter()
        .map(|spec| materialize_solid(kernel, spec))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(count = handles.len(), "materialized solids");
    Ok(handles)
}
