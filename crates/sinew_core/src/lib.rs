//! Foundational types for the Sinew animation engine.
//!
//! - [`Transform`]: rigid TRS value type with hierarchical composition
//! - [`math`]: degenerate-safe quaternion and matrix helpers
//! - [`errors`]: the shared [`SinewError`] type

pub mod errors;
pub mod math;
pub mod transform;

pub use errors::{Result, SinewError};
pub use transform::Transform;

pub use glam;
