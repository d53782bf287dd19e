use serde::{Deserialize, Serialize};

use crate::point::Point3d;
use crate::vector::Vec3;

/// Lateral placement of an element footprint relative to its guide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// The guide is the left edge of the footprint.
    Left,
    /// The guide is the right edge of the footprint.
    Right,
    /// The guide bisects the footprint.
    #[default]
    Center,
}

/// Layers of a floor build-up, listed top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FloorLayerKind {
    Finish,
    Screed,
    Insulation,
    Structural,
}

impl FloorLayerKind {
    /// All layers in build-up order, top first.
    pub const TOP_DOWN: [FloorLayerKind; 4] = [
        FloorLayerKind::Finish,
        FloorLayerKind::Screed,
        FloorLayerKind::Insulation,
        FloorLayerKind::Structural,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FloorLayerKind::Finish => "finish",
            FloorLayerKind::Screed => "screed",
            FloorLayerKind::Insulation => "insulation",
            FloorLayerKind::Structural => "structural",
        }
    }
}

/// What part of an element a solid volume represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VolumeKind {
    /// One stair tread. `index` counts treads across the whole stair.
    Tread { index: usize, flight: usize },
    /// A landing placed at the end of `flight`.
    Landing { flight: usize },
    /// One louver blade.
    Louver { story: usize, index: usize },
    /// One layer of a floor plate, before voids are cut.
    FloorLayer { layer: FloorLayerKind },
    /// A volume subtracted from a floor layer.
    Void { layer: FloorLayerKind, index: usize },
    /// One fence post, in order along the guide.
    Post { index: usize },
    /// The part of a rail running along one guide segment. `level` indexes
    /// the rails bottom rail first, top rail last.
    Rail { level: usize, segment: usize },
}

/// A closed planar boundary, described in a form the geometry kernel can build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProfileSpec {
    /// Rectangle spanning `[0, extent_x] x [0, extent_y]` in the plane
    /// through `origin` spanned by the unit vectors `x_axis` and `y_axis`.
    Rectangle {
        origin: Point3d,
        x_axis: Vec3,
        y_axis: Vec3,
        extent_x: f64,
        extent_y: f64,
    },
    /// Closed polygon. The closing edge back to the first point is implied.
    Polygon { points: Vec<Point3d> },
}

impl ProfileSpec {
    /// Boundary vertices in order.
    pub fn corners(&self) -> Vec<Point3d> {
        match self {
            ProfileSpec::Rectangle {
                origin,
                x_axis,
                y_axis,
                extent_x,
                extent_y,
            } => {
                let ex = *x_axis * *extent_x;
                let ey = *y_axis * *extent_y;
                vec![*origin, *origin + ex, *origin + ex + ey, *origin + ey]
            }
            ProfileSpec::Polygon { points } => points.clone(),
        }
    }

    /// First boundary vertex.
    pub fn anchor(&self) -> Point3d {
        match self {
            ProfileSpec::Rectangle { origin, .. } => *origin,
            ProfileSpec::Polygon { points } => points.first().copied().unwrap_or(Point3d::ORIGIN),
        }
    }

    /// Enclosed area, from the vector area of the boundary.
    pub fn area(&self) -> f64 {
        match self {
            ProfileSpec::Rectangle {
                extent_x, extent_y, ..
            } => (extent_x * extent_y).abs(),
            ProfileSpec::Polygon { points } => vector_area(points).length(),
        }
    }
}

/// Newell's vector area of a closed polygon. Its length is the enclosed area
/// and its direction the polygon normal.
pub fn vector_area(points: &[Point3d]) -> Vec3 {
    let n = points.len();
    if n < 3 {
        return Vec3::ZERO;
    }
    let mut acc = Vec3::ZERO;
    for i in 0..n {
        let a = points[i].to_vec3();
        let b = points[(i + 1) % n].to_vec3();
        acc = acc + a.cross(&b);
    }
    acc * 0.5
}

/// A solid described as a planar profile extruded along world up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolidSpec {
    pub kind: VolumeKind,
    pub profile: ProfileSpec,
    /// Extrusion height along world up.
    pub height: f64,
}

impl SolidSpec {
    /// Elevation of the profile plane (the underside of the solid).
    pub fn elevation(&self) -> f64 {
        self.profile.anchor().z
    }

    pub fn volume(&self) -> f64 {
        self.profile.area() * self.height
    }
}
