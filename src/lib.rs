//! Sinew: skeletal animation evaluation.
//!
//! Given a skeleton, a set of keyframed clips and a playback time, Sinew
//! computes the resulting joint pose, the matrix palette for GPU skinning,
//! and CPU-skinned vertex positions and normals.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use sinew::{AnimationInstance, SkinnedMesh};
//!
//! let mut instance = AnimationInstance::new(Arc::clone(&clips[0]), skeleton.rest_pose().clone());
//!
//! // Per frame
//! instance.update(dt);
//! mesh.cpu_skin(&skeleton, instance.pose());
//! mesh.flush(&mut renderer);
//! ```

pub use sinew_animation as animation;
pub use sinew_core::{errors, math};
pub use sinew_skinning as skinning;

pub use glam;

pub use sinew_animation::{
    AnimationClip, AnimationInstance, AnimationPlayer, Channel, CubicTangents, InstanceKey,
    Interpolatable, InterpolationMode, Keyframe, KeyframeTrack, Pose, SamplingSettings,
    TransformTrack,
};
pub use sinew_core::{Result, SinewError, Transform};
pub use sinew_skinning::{
    AttributeBuffer, Skeleton, SkinnedMesh, SkinningMethod, SkinningSettings, VertexAttribute,
    VertexSink,
};
