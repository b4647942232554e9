pub mod basis;
pub mod intersect;
pub mod line;
pub mod plane;

pub use glam::{DVec2, DVec3};
pub use basis::Basis2;
pub use intersect::{intersect_for_map, intersect_for_section, AnchorAxis, PlaneIntersection};
pub use line::{Line2, Line3};
pub use plane::PlaneEquation;

pub type Point2 = DVec2;
pub type Point3 = DVec3;
pub type Vector2 = DVec2;
pub type Vector3 = DVec3;
