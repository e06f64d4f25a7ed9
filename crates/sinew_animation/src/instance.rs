use std::sync::Arc;

use glam::Mat4;

use crate::clip::AnimationClip;
use crate::pose::Pose;

/// One playing clip: its own pose copy plus a playback cursor.
///
/// Instances share clips read-only through `Arc`, so any number of them can
/// run on the same frame without interfering.
#[derive(Debug, Clone)]
pub struct AnimationInstance {
    clip: Arc<AnimationClip>,
    pose: Pose,

    pub time: f32,
    pub time_scale: f32,
    pub paused: bool,
}

impl AnimationInstance {
    /// Starts `clip` at time 0 from `rest_pose`.
    #[must_use]
    pub fn new(clip: Arc<AnimationClip>, rest_pose: Pose) -> Self {
        Self {
            clip,
            pose: rest_pose,
            time: 0.0,
            time_scale: 1.0,
            paused: false,
        }
    }

    #[must_use]
    pub fn clip(&self) -> &Arc<AnimationClip> {
        &self.clip
    }

    #[must_use]
    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    pub fn pose_mut(&mut self) -> &mut Pose {
        &mut self.pose
    }

    /// Switches to another clip, restarting from `rest_pose` at the clip's
    /// start time.
    pub fn set_clip(&mut self, clip: Arc<AnimationClip>, rest_pose: Pose) {
        log::debug!("Switching animation '{}' -> '{}'", self.clip.name, clip.name);
        self.time = clip.start_time();
        self.clip = clip;
        self.pose = rest_pose;
    }

    /// Advances playback by `dt` seconds and samples the clip into the pose.
    ///
    /// The clip's adjusted time becomes the new cursor, so a looping clip
    /// wraps and a one-shot clip holds its last frame.
    pub fn update(&mut self, dt: f32) {
        if self.paused {
            return;
        }
        self.time = self.clip.sample(&mut self.pose, self.time + dt * self.time_scale);
    }

    /// Model-space joint matrices of the current pose.
    #[must_use]
    pub fn matrix_palette(&self) -> Vec<Mat4> {
        self.pose.matrix_palette()
    }
}
