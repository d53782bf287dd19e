//! Fence posts and straight rails along a polyline guide.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use element_types::{Guide, Point3d, ProfileSpec, SolidSpec, Tolerance, Vec3, VolumeKind};

use crate::errors::{require_finite, require_positive, rounded_count, within_budget, ElementError};
use crate::frame::FlightFrame;
use crate::path::Path;

/// Guides shorter than this produce no fence.
const MIN_GUIDE_LENGTH: f64 = 1e-6;

/// Fence parameters, in millimetres. Every field has a default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FenceParams {
    /// Top of the posts and of the top rail, above the guide.
    pub height: f64,
    /// Target distance between posts along the guide.
    pub post_spacing: f64,
    /// Post size across the guide.
    pub post_width: f64,
    /// Post size along the guide.
    pub post_depth: f64,
    pub bottom_rail: bool,
    pub top_rail: bool,
    /// Rails spread evenly between the guide and `height`.
    pub middle_rail_count: u32,
    pub rail_height: f64,
    /// Rail size across the guide.
    pub rail_depth: f64,
    /// Sideways shift of the whole fence, along the left of the first segment.
    pub offset: f64,
    /// How far posts and the bottom rail reach below the guide. Negative
    /// values count as zero.
    pub embed_depth: f64,
}

impl Default for FenceParams {
    fn default() -> Self {
        Self {
            height: 1200.0,
            post_spacing: 2000.0,
            post_width: 80.0,
            post_depth: 80.0,
            bottom_rail: true,
            top_rail: true,
            middle_rail_count: 1,
            rail_height: 40.0,
            rail_depth: 60.0,
            offset: 0.0,
            embed_depth: 0.0,
        }
    }
}

impl FenceParams {
    fn validate(&self) -> Result<(), ElementError> {
        require_positive("height", self.height)?;
        require_positive("post_spacing", self.post_spacing)?;
        require_positive("post_width", self.post_width)?;
        require_positive("post_depth", self.post_depth)?;
        require_positive("rail_height", self.rail_height)?;
        require_positive("rail_depth", self.rail_depth)?;
        require_finite("offset", self.offset)?;
        require_finite("embed_depth", self.embed_depth)?;
        Ok(())
    }

    fn embed(&self) -> f64 {
        self.embed_depth.max(0.0)
    }

    fn rail_count(&self) -> Option<usize> {
        (self.middle_rail_count as usize)
            .checked_add(usize::from(self.bottom_rail) + usize::from(self.top_rail))
    }

    /// Centre heights of the rails: bottom, then middle rails upward, then top.
    pub fn rail_levels(&self) -> Vec<f64> {
        let mut levels = Vec::new();
        if self.bottom_rail {
            levels.push(self.rail_height * 0.5 - self.embed());
        }
        let gaps = self.middle_rail_count as f64 + 1.0;
        levels.extend((1..=self.middle_rail_count).map(|i| i as f64 * self.height / gaps));
        if self.top_rail {
            levels.push(self.height - self.rail_height * 0.5);
        }
        levels
    }
}

/// Rectangle of `extent_x` by `extent_y` centred on `center`.
fn centered_rectangle(
    center: Point3d,
    x_axis: Vec3,
    y_axis: Vec3,
    extent_x: f64,
    extent_y: f64,
) -> ProfileSpec {
    ProfileSpec::Rectangle {
        origin: center + x_axis * (-extent_x * 0.5) + y_axis * (-extent_y * 0.5),
        x_axis,
        y_axis,
        extent_x,
        extent_y,
    }
}

fn segment_frame(path: &Path, segment: usize, tol: &Tolerance) -> FlightFrame {
    let points = path.points();
    FlightFrame::unaligned(points[segment], points[segment + 1], tol)
}

/// Lay out a fence along a polyline guide.
///
/// `max(2, round(length / post_spacing))` posts are spread evenly by arc
/// length, so both guide ends get one. Posts stand from `-embed_depth` to
/// `height`. Every rail runs along each non-degenerate guide segment as a
/// straight bar of `rail_depth` by `rail_height`, centred on the guide.
#[instrument(skip(guide), fields(guide = guide.kind_name()))]
pub fn layout_fence(guide: &Guide, params: &FenceParams) -> Result<Vec<SolidSpec>, ElementError> {
    let path = Path::from_guide(guide)?;
    params.validate()?;

    let length = path.length();
    if length <= MIN_GUIDE_LENGTH {
        debug!(length, "guide too short for a fence");
        return Ok(Vec::new());
    }

    let tol = Tolerance::default();
    let post_count = rounded_count("post_spacing", length, params.post_spacing)?.max(2);
    let total = params
        .rail_count()
        .and_then(|rails| rails.checked_mul(path.flight_count()))
        .and_then(|rails| rails.checked_add(post_count));
    let mut volumes = Vec::with_capacity(within_budget("middle_rail_count", total)?);

    let shift = segment_frame(&path, path.locate(0.0).1, &tol).left * params.offset;
    let z_bottom = -params.embed();

    for index in 0..post_count {
        let t = index as f64 / (post_count - 1) as f64;
        let (at, segment) = path.locate(t);
        let frame = segment_frame(&path, segment, &tol);
        // Posts stand upright even where the guide slopes.
        let along = frame.left.cross(&Vec3::Z);
        volumes.push(SolidSpec {
            kind: VolumeKind::Post { index },
            profile: centered_rectangle(
                at + shift + Vec3::Z * z_bottom,
                along,
                frame.left,
                params.post_depth,
                params.post_width,
            ),
            height: params.height - z_bottom,
        });
    }

    for (level, z) in params.rail_levels().into_iter().enumerate() {
        let lift = Vec3::Z * (z - params.rail_height * 0.5);
        for (segment, (start, end)) in path.flights().enumerate() {
            let frame = FlightFrame::unaligned(start, end, &tol);
            if frame.degenerate {
                continue;
            }
            volumes.push(SolidSpec {
                kind: VolumeKind::Rail { level, segment },
                profile: ProfileSpec::Rectangle {
                    origin: start + shift + lift + frame.left * (-params.rail_depth * 0.5),
                    x_axis: frame.forward,
                    y_axis: frame.left,
                    extent_x: frame.length,
                    extent_y: params.rail_depth,
                },
                height: params.rail_height,
            });
        }
    }

    debug!(posts = post_count, count = volumes.len(), "laid out fence");
    Ok(volumes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rails_are_bottom_middle_top() {
        let levels = FenceParams::default().rail_levels();
        assert_eq!(levels, vec![20.0, 600.0, 1180.0]);
    }

    #[test]
    fn embedding_lowers_only_the_bottom_rail() {
        let params = FenceParams {
            embed_depth: 100.0,
            middle_rail_count: 0,
            ..FenceParams::default()
        };
        assert_eq!(params.rail_levels(), vec![-80.0, 1180.0]);
    }

    #[test]
    fn empty_json_uses_defaults() {
        let params: FenceParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params, FenceParams::default());
    }
}
