//! Sampling Settings
//!
//! Knobs that change how keyframe tracks are evaluated. Settings are plain
//! values: a clip stores one [`SamplingSettings`] and hands it to every track
//! it samples.
//!
//! ```rust,ignore
//! use sinew_animation::{AnimationClip, CubicTangents, SamplingSettings};
//!
//! let mut clip = AnimationClip::new("walk");
//! clip.settings = SamplingSettings {
//!     cubic_tangents: CubicTangents::NextValue,
//! };
//! ```

/// Selects the second tangent fed to the cubic Hermite curve between two
/// keyframes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CubicTangents {
    /// Use the next keyframe's incoming tangent.
    #[default]
    Incoming,
    /// Use the next keyframe's value as its tangent.
    ///
    /// Reproduces curves authored against evaluators that read the value
    /// slot instead of the tangent slot.
    NextValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SamplingSettings {
    pub cubic_tangents: CubicTangents,
}
