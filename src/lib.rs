pub mod error;
pub mod math;
pub mod query;
pub mod shape;
pub mod transform;

pub use error::{EuklidError, Result};
