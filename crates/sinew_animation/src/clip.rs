use glam::{Quat, Vec3};
use rustc_hash::FxHashMap;
use sinew_core::Transform;

use crate::pose::Pose;
use crate::settings::SamplingSettings;
use crate::tracks::{KeyframeTrack, fit_time_to_range};

/// Position, rotation and scale tracks driving one joint.
///
/// A component whose track has fewer than two frames is left at whatever
/// value the pose already holds, so partial animation of a joint is allowed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransformTrack {
    pub joint_id: u32,
    pub position: KeyframeTrack<Vec3>,
    pub rotation: KeyframeTrack<Quat>,
    pub scale: KeyframeTrack<Vec3>,
}

impl TransformTrack {
    #[must_use]
    pub fn new(joint_id: u32) -> Self {
        Self {
            joint_id,
            ..Self::default()
        }
    }

    /// Whether at least one component can be sampled.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.position.is_animated() || self.rotation.is_animated() || self.scale.is_animated()
    }

    /// Earliest and latest frame time over the animated components.
    #[must_use]
    pub fn time_bounds(&self) -> Option<(f32, f32)> {
        [
            self.position
                .is_animated()
                .then(|| self.position.time_bounds())
                .flatten(),
            self.rotation
                .is_animated()
                .then(|| self.rotation.time_bounds())
                .flatten(),
            self.scale
                .is_animated()
                .then(|| self.scale.time_bounds())
                .flatten(),
        ]
        .into_iter()
        .flatten()
        .reduce(|(lo, hi), (l, h)| (lo.min(l), hi.max(h)))
    }

    /// Samples every animated component on top of `base`.
    #[must_use]
    pub fn sample(
        &self,
        base: &Transform,
        time: f32,
        looping: bool,
        settings: &SamplingSettings,
    ) -> Transform {
        let mut result = *base;
        if self.position.is_animated() {
            result.position = self.position.sample_with(time, looping, settings);
        }
        if self.rotation.is_animated() {
            result.rotation = self.rotation.sample_with(time, looping, settings);
        }
        if self.scale.is_animated() {
            result.scale = self.scale.sample_with(time, looping, settings);
        }
        result
    }
}

/// A named animation: per-joint transform tracks over a time range.
///
/// The time range is derived from the tracks by
/// [`AnimationClip::recalculate_duration`]; call it after editing tracks.
#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub name: String,
    pub looping: bool,
    pub settings: SamplingSettings,

    tracks: Vec<TransformTrack>,
    // joint_id -> index into `tracks`
    lookup: FxHashMap<u32, usize>,
    start_time: f32,
    end_time: f32,
}

impl AnimationClip {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            looping: false,
            settings: SamplingSettings::default(),
            tracks: Vec::new(),
            lookup: FxHashMap::default(),
            start_time: 0.0,
            end_time: 0.0,
        }
    }

    /// Builds a clip from tracks and derives its time range. A later track
    /// replaces an earlier one with the same joint id.
    #[must_use]
    pub fn from_tracks(name: impl Into<String>, tracks: Vec<TransformTrack>, looping: bool) -> Self {
        let mut clip = Self::new(name);
        clip.looping = looping;
        for track in tracks {
            clip.push_track(track);
        }
        clip.recalculate_duration();
        clip
    }

    // ========================================================================
    // Tracks
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn tracks(&self) -> &[TransformTrack] {
        &self.tracks
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    #[must_use]
    pub fn joint_id_at(&self, index: usize) -> Option<u32> {
        self.tracks.get(index).map(|t| t.joint_id)
    }

    #[must_use]
    pub fn track(&self, joint_id: u32) -> Option<&TransformTrack> {
        self.lookup.get(&joint_id).map(|&i| &self.tracks[i])
    }

    /// Track for `joint_id`, inserting an empty one if the clip has none.
    pub fn track_mut(&mut self, joint_id: u32) -> &mut TransformTrack {
        let len = self.tracks.len();
        let index = *self.lookup.entry(joint_id).or_insert(len);
        if index == len {
            self.tracks.push(TransformTrack::new(joint_id));
        }
        &mut self.tracks[index]
    }

    /// Adds a track, replacing any existing track for the same joint.
    pub fn push_track(&mut self, track: TransformTrack) {
        if let Some(&index) = self.lookup.get(&track.joint_id) {
            self.tracks[index] = track;
        } else {
            self.lookup.insert(track.joint_id, self.tracks.len());
            self.tracks.push(track);
        }
    }

    /// Sets one component track of a joint from a raw loader channel.
    pub fn set_channel(&mut self, joint_id: u32, channel: Channel) {
        let track = self.track_mut(joint_id);
        match channel {
            Channel::Position(t) => track.position = t,
            Channel::Rotation(t) => track.rotation = t,
            Channel::Scale(t) => track.scale = t,
        }
    }

    // ========================================================================
    // Time range
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn start_time(&self) -> f32 {
        self.start_time
    }

    #[inline]
    #[must_use]
    pub fn end_time(&self) -> f32 {
        self.end_time
    }

    #[inline]
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.end_time - self.start_time
    }

    /// Derives the clip's time range from the earliest and latest frame of
    /// every valid track.
    pub fn recalculate_duration(&mut self) {
        let bounds = self
            .tracks
            .iter()
            .filter(|t| t.is_valid())
            .filter_map(TransformTrack::time_bounds)
            .reduce(|(lo, hi), (l, h)| (lo.min(l), hi.max(h)));

        (self.start_time, self.end_time) = bounds.unwrap_or((0.0, 0.0));
    }

    /// Wraps (looping) or clamps playback time into the clip's range. An
    /// empty range maps every time to 0.
    #[must_use]
    pub fn adjust_time_to_fit_range(&self, time: f32) -> f32 {
        fit_time_to_range(time, self.start_time, self.end_time, self.looping).unwrap_or(0.0)
    }

    // ========================================================================
    // Sampling
    // ========================================================================

    /// Writes the clip's state at `time` into `pose` and returns the adjusted
    /// time.
    ///
    /// Callers feed the returned time back in as the next playback cursor,
    /// which is how a looping clip wraps the caller's clock. A clip with zero
    /// duration leaves the pose untouched and returns 0.
    pub fn sample(&self, pose: &mut Pose, time: f32) -> f32 {
        if self.duration() <= 0.0 {
            return 0.0;
        }

        let time = self.adjust_time_to_fit_range(time);
        for track in &self.tracks {
            let joint = track.joint_id as usize;
            let Some(local) = pose.local_transform_mut(joint) else {
                log::warn!(
                    "Clip '{}' animates joint {} but the pose only has {} joints",
                    self.name,
                    joint,
                    pose.len()
                );
                continue;
            };
            *local = track.sample(local, time, self.looping, &self.settings);
        }
        time
    }
}

/// One decoded loader channel, tagged with the joint property it drives.
#[derive(Debug, Clone, PartialEq)]
pub enum Channel {
    Position(KeyframeTrack<Vec3>),
    Rotation(KeyframeTrack<Quat>),
    Scale(KeyframeTrack<Vec3>),
}
