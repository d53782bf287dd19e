pub mod guide;
pub mod point;
pub mod solid;
pub mod tolerance;
pub mod vector;

pub use guide::*;
pub use point::Point3d;
pub use solid::*;
pub use tolerance::Tolerance;
pub use vector::Vec3;
