//! Stair layout along a polyline guide.
//!
//! The requested total rise is split into equal risers ([`RiserPlan`]). The
//! guide's segments are walked in order as flights; each flight places as
//! many treads as fit its length, and an interior flight ends in a landing
//! while treads remain. One [`WalkState`] is threaded through all flights so
//! tread numbering and elevation continue across landings, and the tread
//! budget is never exceeded.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use element_types::{Guide, Point3d, ProfileSpec, Side, SolidSpec, Tolerance, VolumeKind};

use crate::errors::{require_positive, ElementError};
use crate::frame::FlightFrame;
use crate::path::Path;
use crate::riser::RiserPlan;

fn default_riser_height() -> f64 {
    170.0
}

fn default_tread_depth() -> f64 {
    270.0
}

fn default_width() -> f64 {
    1200.0
}

fn default_tread_thickness() -> f64 {
    150.0
}

fn default_landing_depth() -> f64 {
    270.0
}

/// Dimensional parameters of a stair, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StairParams {
    /// Vertical distance from the bottom to the top floor.
    pub total_height: f64,
    /// Nominal riser height; the actual one is derived by [`RiserPlan`].
    #[serde(default = "default_riser_height")]
    pub riser_height: f64,
    #[serde(default = "default_tread_depth")]
    pub tread_depth: f64,
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default)]
    pub side: Side,
    #[serde(default = "default_tread_thickness")]
    pub tread_thickness: f64,
    #[serde(default = "default_landing_depth")]
    pub landing_depth: f64,
}

impl StairParams {
    /// Parameters with every optional field at its default.
    pub fn new(total_height: f64) -> Self {
        Self {
            total_height,
            riser_height: default_riser_height(),
            tread_depth: default_tread_depth(),
            width: default_width(),
            side: Side::default(),
            tread_thickness: default_tread_thickness(),
            landing_depth: default_landing_depth(),
        }
    }

    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    pub fn with_tread_depth(mut self, tread_depth: f64) -> Self {
        self.tread_depth = tread_depth;
        self
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// Check every dimension and derive the riser plan.
    pub fn plan(&self) -> Result<RiserPlan, ElementError> {
        require_positive("tread_depth", self.tread_depth)?;
        require_positive("width", self.width)?;
        require_positive("tread_thickness", self.tread_thickness)?;
        require_positive("landing_depth", self.landing_depth)?;
        RiserPlan::new(self.total_height, self.riser_height)
    }
}

/// Progress of a walk along the flights.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WalkState {
    /// Treads placed so far, across all flights.
    pub current_step: usize,
    /// Elevation of the next tread.
    pub current_elevation: f64,
}

impl WalkState {
    /// Treads still allowed by the plan.
    pub fn remaining(&self, plan: &RiserPlan) -> usize {
        plan.tread_count.saturating_sub(self.current_step)
    }

    pub fn is_exhausted(&self, plan: &RiserPlan) -> bool {
        self.current_step >= plan.tread_count
    }

    fn after_tread(self, plan: &RiserPlan) -> Self {
        Self {
            current_step: self.current_step + 1,
            current_elevation: self.current_elevation + plan.riser_height,
        }
    }
}

/// Places treads and landings flight by flight.
///
/// Holds only validated, immutable inputs. The walk state is passed in and
/// returned by [`FlightWalker::walk_flight`], so a single flight can be
/// walked from any state.
#[derive(Debug, Clone, Copy)]
pub struct FlightWalker {
    params: StairParams,
    plan: RiserPlan,
    tolerance: Tolerance,
}

impl FlightWalker {
    pub fn new(params: StairParams) -> Result<Self, ElementError> {
        let plan = params.plan()?;
        Ok(Self {
            params,
            plan,
            tolerance: Tolerance::default(),
        })
    }

    pub fn plan(&self) -> &RiserPlan {
        &self.plan
    }

    pub fn frame(&self, start: Point3d, end: Point3d) -> FlightFrame {
        FlightFrame::new(start, end, self.params.width, self.params.side, &self.tolerance)
    }

    /// Walk one flight starting from `state`.
    ///
    /// Returns the state after the flight and the volumes it placed, treads
    /// first, then the landing if one was placed. `is_last` suppresses the
    /// landing at the end of the final flight.
    pub fn walk_flight(
        &self,
        mut state: WalkState,
        flight: usize,
        frame: &FlightFrame,
        is_last: bool,
    ) -> (WalkState, Vec<SolidSpec>) {
        if frame.degenerate {
            debug!(flight, "skipping zero-length flight");
            return (state, Vec::new());
        }

        let depth = self.params.tread_depth;
        let steps_here = (frame.length / depth).floor() as usize;

        let mut volumes = Vec::new();
        for s in (0..steps_here).take(state.remaining(&self.plan)) {
            volumes.push(self.tread(frame, flight, s, &state));
            state = state.after_tread(&self.plan);
        }

        if !is_last && !state.is_exhausted(&self.plan) {
            let along = steps_here as f64 * depth;
            volumes.push(SolidSpec {
                kind: VolumeKind::Landing { flight },
                profile: self.footprint(
                    frame,
                    along,
                    state.current_elevation,
                    self.params.landing_depth,
                ),
                height: self.params.tread_thickness,
            });
        }

        debug!(
            flight,
            steps_here,
            placed = volumes.len(),
            step = state.current_step,
            "walked flight"
        );
        (state, volumes)
    }

    /// Walk every flight of `path` in order.
    pub fn walk(&self, path: &Path) -> StairLayout {
        let last = path.flight_count() - 1;
        let plan = self.plan;

        let (final_state, volumes) = path.flights().enumerate().fold(
            (WalkState::default(), Vec::new()),
            |(state, mut volumes), (i, (start, end))| {
                if state.is_exhausted(&plan) {
                    return (state, volumes);
                }
                let frame = self.frame(start, end);
                let (next, placed) = self.walk_flight(state, i, &frame, i == last);
                volumes.extend(placed);
                (next, volumes)
            },
        );

        StairLayout {
            plan,
            volumes,
            final_state,
        }
    }

    fn tread(&self, frame: &FlightFrame, flight: usize, s: usize, state: &WalkState) -> SolidSpec {
        let along = s as f64 * self.params.tread_depth;
        SolidSpec {
            kind: VolumeKind::Tread {
                index: state.current_step,
                flight,
            },
            profile: self.footprint(frame, along, state.current_elevation, self.params.tread_depth),
            height: self.params.tread_thickness,
        }
    }

    fn footprint(
        &self,
        frame: &FlightFrame,
        along: f64,
        elevation: f64,
        depth: f64,
    ) -> ProfileSpec {
        ProfileSpec::Rectangle {
            origin: frame.point_at(along, elevation),
            x_axis: frame.forward,
            y_axis: frame.left,
            extent_x: depth,
            extent_y: self.params.width,
        }
    }
}

/// Result of a stair layout.
#[derive(Debug, Clone, PartialEq)]
pub struct StairLayout {
    pub plan: RiserPlan,
    /// Treads and landings in placement order.
    pub volumes: Vec<SolidSpec>,
    /// Walk state after the last flight.
    pub final_state: WalkState,
}

impl StairLayout {
    pub fn treads(&self) -> impl Iterator<Item = &SolidSpec> {
        self.volumes
            .iter()
            .filter(|v| matches!(v.kind, VolumeKind::Tread { .. }))
    }

    pub fn landings(&self) -> impl Iterator<Item = &SolidSpec> {
        self.volumes
            .iter()
            .filter(|v| matches!(v.kind, VolumeKind::Landing { .. }))
    }

    /// True when every tread of the plan was placed.
    pub fn is_complete(&self) -> bool {
        self.missing_treads() == 0
    }

    /// Treads the guide had no room for.
    pub fn missing_treads(&self) -> usize {
        self.final_state.remaining(&self.plan)
    }
}

/// Lay out a stair along `guide`.
///
/// The guide is normalized first; guide and parameter errors are reported
/// before any volume is produced. Running out of guide before the tread
/// budget is used up is not an error: see [`StairLayout::is_complete`].
#[instrument(skip(guide), fields(guide = guide.kind_name()))]
pub fn layout_stair(guide: &Guide, params: &StairParams) -> Result<StairLayout, ElementError> {
    let path = Path::from_guide(guide)?;
    layout_stair_on_path(&path, params)
}

/// Lay out a stair along an already normalized path.
pub fn layout_stair_on_path(
    path: &Path,
    params: &StairParams,
) -> Result<StairLayout, ElementError> {
    let walker = FlightWalker::new(*params)?;
    let plan = walker.plan();
    info!(
        risers = plan.riser_count,
        riser_height = plan.riser_height,
        treads = plan.tread_count,
        flights = path.flight_count(),
        "planned stair"
    );

    let layout = walker.walk(path);
    if !layout.is_complete() {
        warn!(
            missing = layout.missing_treads(),
            placed = layout.final_state.current_step,
            "guide too short for the requested rise"
        );
    }
    Ok(layout)
}
