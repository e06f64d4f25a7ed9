//! Keyframe animation evaluation.
//!
//! - [`KeyframeTrack`]: time-keyed values with constant, linear or cubic
//!   interpolation and loop/clamp time remapping
//! - [`Pose`]: flat joint hierarchy with global transform resolution
//! - [`AnimationClip`]: per-joint transform tracks sampled into a pose
//! - [`AnimationInstance`] / [`AnimationPlayer`]: playback cursors over
//!   shared clips

pub mod clip;
pub mod instance;
pub mod player;
pub mod pose;
pub mod settings;
pub mod tracks;
pub mod values;

pub use clip::{AnimationClip, Channel, TransformTrack};
pub use instance::AnimationInstance;
pub use player::{AnimationPlayer, InstanceKey};
pub use pose::Pose;
pub use settings::{CubicTangents, SamplingSettings};
pub use tracks::{InterpolationMode, Keyframe, KeyframeTrack};
pub use values::Interpolatable;
