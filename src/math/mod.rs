mod vector2;
mod vector3;

pub use vector2::{Point2, Vector2};
pub use vector3::{Point3, Vector3};

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;
