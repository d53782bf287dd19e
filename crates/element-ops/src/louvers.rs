//! Louver blades along a facade guide.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use element_types::{Guide, ProfileSpec, SolidSpec, Vec3, VolumeKind};

use crate::errors::{require_finite, require_positive, rounded_count, within_budget, ElementError};
use crate::path::GuideCurve;

/// Guides shorter than this produce no louvers.
const MIN_GUIDE_LENGTH: f64 = 1e-6;

/// Blade rotation as a function of the normalized position `t` along the guide.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AngleProfile {
    Constant { angle: f64 },
    /// Linear blend from `start` at `t = 0` to `end` at `t = 1`.
    Linear { start: f64, end: f64 },
    /// `base + amplitude * sin(2π * cycles * t)`.
    Sine { base: f64, amplitude: f64, cycles: f64 },
}

impl Default for AngleProfile {
    fn default() -> Self {
        AngleProfile::Constant { angle: 0.0 }
    }
}

impl AngleProfile {
    pub fn angle_at(&self, t: f64) -> f64 {
        match *self {
            AngleProfile::Constant { angle } => angle,
            AngleProfile::Linear { start, end } => start + (end - start) * t,
            AngleProfile::Sine {
                base,
                amplitude,
                cycles,
            } => base + amplitude * (TAU * cycles * t).sin(),
        }
    }
}

fn default_thickness() -> f64 {
    20.0
}

fn default_height() -> f64 {
    2000.0
}

fn default_story_height() -> f64 {
    3200.0
}

fn default_stories() -> u32 {
    1
}

fn default_wave_amplitude() -> f64 {
    80.0
}

fn default_wave_frequency() -> f64 {
    1.0
}

fn default_twist_amplitude() -> f64 {
    0.2
}

/// Louver parameters, in millimetres and radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LouverParams {
    /// Target distance between blades along the guide.
    pub spacing: f64,
    /// Base blade depth.
    pub depth: f64,
    #[serde(default = "default_thickness")]
    pub thickness: f64,
    /// Blade height (extrusion length).
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default = "default_story_height")]
    pub story_height: f64,
    #[serde(default = "default_stories")]
    pub stories: u32,
    /// Amplitude of the depth modulation. Thickness is modulated by 40% of it.
    #[serde(default = "default_wave_amplitude")]
    pub wave_amplitude: f64,
    /// Number of modulation waves along the guide.
    #[serde(default = "default_wave_frequency")]
    pub wave_frequency: f64,
    /// Extra per-blade twist at the wave crest, in radians.
    #[serde(default = "default_twist_amplitude")]
    pub twist_amplitude: f64,
    #[serde(default)]
    pub angle: AngleProfile,
}

impl LouverParams {
    pub fn new(spacing: f64, depth: f64) -> Self {
        Self {
            spacing,
            depth,
            thickness: default_thickness(),
            height: default_height(),
            story_height: default_story_height(),
            stories: default_stories(),
            wave_amplitude: default_wave_amplitude(),
            wave_frequency: default_wave_frequency(),
            twist_amplitude: default_twist_amplitude(),
            angle: AngleProfile::default(),
        }
    }

    /// Flat, untwisted blades.
    pub fn without_modulation(mut self) -> Self {
        self.wave_amplitude = 0.0;
        self.twist_amplitude = 0.0;
        self
    }

    fn validate(&self) -> Result<(), ElementError> {
        require_positive("spacing", self.spacing)?;
        require_positive("depth", self.depth)?;
        require_positive("thickness", self.thickness)?;
        require_positive("height", self.height)?;
        require_positive("story_height", self.story_height)?;
        require_finite("wave_amplitude", self.wave_amplitude)?;
        require_finite("wave_frequency", self.wave_frequency)?;
        require_finite("twist_amplitude", self.twist_amplitude)?;
        Ok(())
    }
}

/// Lay out louvers using the angle profile from `params`.
pub fn layout_louvers(
    guide: &Guide,
    params: &LouverParams,
) -> Result<Vec<SolidSpec>, ElementError> {
    let profile = params.angle;
    layout_louvers_with(guide, params, |t| profile.angle_at(t))
}

/// Lay out louvers with a caller-supplied angle function `t ∈ [0, 1] -> radians`.
///
/// Blades are placed at `count + 1` evenly spaced arc-length positions, where
/// `count = max(1, round(length / spacing))`, and the row is repeated for
/// every storey.
#[instrument(skip(guide, angle_fn), fields(guide = guide.kind_name()))]
pub fn layout_louvers_with<F>(
    guide: &Guide,
    params: &LouverParams,
    angle_fn: F,
) -> Result<Vec<SolidSpec>, ElementError>
where
    F: Fn(f64) -> f64,
{
    let curve = GuideCurve::from_guide(guide)?;
    params.validate()?;

    let length = curve.length();
    if length <= MIN_GUIDE_LENGTH {
        debug!(length, "guide too short for louvers");
        return Ok(Vec::new());
    }

    let count = rounded_count("spacing", length, params.spacing)?.max(1);
    let total = (count + 1).checked_mul(params.stories as usize);
    let mut blades = Vec::with_capacity(within_budget("stories", total)?);

    for story in 0..params.stories as usize {
        let lift = Vec3::Z * (story as f64 * params.story_height);

        for index in 0..=count {
            let t = index as f64 / count as f64;
            let wave = (TAU * t * params.wave_frequency).sin();
            let angle = angle_fn(t) + wave * params.twist_amplitude;
            let depth = params.depth + wave * params.wave_amplitude;
            let thickness = params.thickness + wave * params.wave_amplitude * 0.4;

            if !angle.is_finite() {
                return Err(ElementError::InvalidParameter {
                    name: "angle",
                    reason: format!("angle function returned {angle} at t = {t}"),
                });
            }
            if depth <= 0.0 || thickness <= 0.0 {
                return Err(ElementError::InvalidParameter {
                    name: "wave_amplitude",
                    reason: format!(
                        "modulated blade at t = {t} is {depth} x {thickness}, must stay positive"
                    ),
                });
            }

            blades.push(SolidSpec {
                kind: VolumeKind::Louver { story, index },
                profile: ProfileSpec::Rectangle {
                    origin: curve.point_at_normalized_length(t) + lift,
                    x_axis: Vec3::X.rotated_about_z(angle),
                    y_axis: Vec3::Y.rotated_about_z(angle),
                    extent_x: depth,
                    extent_y: thickness,
                },
                height: params.height,
            });
        }
    }

    debug!(count = blades.len(), "laid out louvers");
    Ok(blades)
}
