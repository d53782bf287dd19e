//! Parametric building-element generators.
//!
//! Each generator turns a guide plus dimensional parameters into an ordered
//! list of [`SolidSpec`]s. Nothing here talks to a geometry kernel except
//! [`materialize`] and [`ElementRequest::build`], which hand the specs to a
//! [`geom_kernel::Kernel`].

pub mod errors;
pub mod fence;
pub mod floor_plate;
pub mod frame;
pub mod louvers;
pub mod materialize;
pub mod path;
pub mod request;
pub mod riser;
pub mod stair;

pub use element_types::SolidSpec;
pub use errors::ElementError;
pub use fence::{layout_fence, FenceParams};
pub use floor_plate::{layout_floor_plate, FloorLayer, FloorPlateLayout, FloorPlateParams};
pub use frame::{alignment_offset, FlightFrame};
pub use louvers::{layout_louvers, layout_louvers_with, AngleProfile, LouverParams};
pub use materialize::{materialize, materialize_solid};
pub use path::{GuideCurve, Path};
pub use request::{BuiltSolid, ElementRequest};
pub use riser::RiserPlan;
pub use stair::{
    layout_stair, layout_stair_on_path, FlightWalker, StairLayout, StairParams, WalkState,
};
