//! Error Types
//!
//! This module defines the error type shared by every Sinew crate.
//!
//! # Overview
//!
//! [`SinewError`] covers the failure modes of loading and validating
//! animation data:
//! - Joint indices that fall outside a pose or palette
//! - Parent arrays that do not form a forest
//! - Parallel attribute arrays whose lengths disagree
//! - Raw keyframe channels with a malformed layout
//!
//! Evaluation itself (sampling, hierarchy resolution of a validated pose,
//! skinning) never fails: degenerate numeric input resolves to identity or
//! base values instead.
//!
//! # Usage
//!
//! Fallible APIs return [`Result<T>`], an alias for
//! `std::result::Result<T, SinewError>`.
//!
//! ```rust,ignore
//! use sinew_core::errors::{Result, SinewError};
//!
//! fn check(index: usize, len: usize) -> Result<()> {
//!     if index >= len {
//!         return Err(SinewError::JointOutOfBounds { index, len });
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for the Sinew engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SinewError {
    // ========================================================================
    // Hierarchy Errors
    // ========================================================================
    /// A joint index is outside the pose, skeleton or palette it refers to.
    #[error("Joint index out of bounds: {index} (joint count: {len})")]
    JointOutOfBounds {
        /// The offending index
        index: usize,
        /// Number of joints available
        len: usize,
    },

    /// A parent index points outside the pose or at the joint itself.
    #[error("Joint {joint} has invalid parent {parent} (joint count: {len})")]
    InvalidParent {
        /// Joint whose parent is invalid
        joint: usize,
        /// The parent index that was rejected
        parent: usize,
        /// Number of joints in the pose
        len: usize,
    },

    /// Following the parent chain from `joint` never reaches a root.
    #[error("Joint hierarchy contains a cycle through joint {joint}")]
    HierarchyCycle {
        /// A joint that lies on the cycle
        joint: usize,
    },

    /// A triangle index refers to a vertex the mesh does not have.
    #[error("Vertex index out of bounds: {index} (vertex count: {len})")]
    VertexOutOfBounds {
        /// The offending index
        index: usize,
        /// Number of vertices available
        len: usize,
    },

    // ========================================================================
    // Data Layout Errors
    // ========================================================================
    /// Two arrays that must be index-parallel have different lengths.
    #[error("Length mismatch in {context}: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Description of what was being compared
        context: &'static str,
        /// Required length
        expected: usize,
        /// Length actually supplied
        actual: usize,
    },

    /// A raw keyframe channel could not be decoded.
    #[error("Malformed keyframe channel: {0}")]
    MalformedChannel(String),
}

/// Alias for `Result<T, SinewError>`.
pub type Result<T> = std::result::Result<T, SinewError>;
