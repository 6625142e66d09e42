mod matrix3;
mod matrix4;
mod quaternion;

pub use matrix3::Matrix3;
pub use matrix4::Matrix4;
pub use quaternion::Quaternion;

/// Determinant magnitude below which a matrix is treated as singular.
///
/// `inverse` returns the identity instead of failing below this
/// threshold; callers that need to detect singularity check
/// `determinant` themselves.
pub const SINGULAR_EPS: f64 = 1e-3;
