use sinew_core::{Result, SinewError};

use crate::settings::{CubicTangents, SamplingSettings};
use crate::values::Interpolatable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationMode {
    /// Holds each keyframe's value until the next keyframe.
    Constant,
    #[default]
    Linear,
    /// Cubic Hermite spline using the keyframe tangents.
    Cubic,
}

/// A single key: a value at a point in time, plus the tangents used by
/// [`InterpolationMode::Cubic`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe<T> {
    pub time: f32,
    pub value: T,
    pub in_tangent: T,
    pub out_tangent: T,
}

impl<T: Interpolatable> Keyframe<T> {
    /// Keyframe with zero tangents.
    #[must_use]
    pub fn new(time: f32, value: T) -> Self {
        Self {
            time,
            value,
            in_tangent: T::ZERO_TANGENT,
            out_tangent: T::ZERO_TANGENT,
        }
    }

    #[must_use]
    pub fn with_tangents(time: f32, value: T, in_tangent: T, out_tangent: T) -> Self {
        Self {
            time,
            value,
            in_tangent,
            out_tangent,
        }
    }
}

/// Remaps `time` into `[start, end]`.
///
/// Looping wraps with a floored modulo so the result lands in `[start, end)`
/// for any input, including negative times. Non-looping clamps. Returns
/// `None` when the range is empty.
pub(crate) fn fit_time_to_range(time: f32, start: f32, end: f32, looping: bool) -> Option<f32> {
    let duration = end - start;
    if duration <= 0.0 {
        return None;
    }

    if looping {
        let mut wrapped = (time - start) % duration;
        if wrapped < 0.0 {
            wrapped += duration;
        }
        // Tiny negative remainders can round up to exactly one period.
        if wrapped >= duration {
            wrapped -= duration;
        }
        Some(wrapped + start)
    } else {
        Some(time.clamp(start, end))
    }
}

/// Time-ordered keyframes of one animated property.
///
/// Frames must be sorted ascending by time; that ordering is the loader's
/// responsibility. A track with fewer than two frames is never sampled and
/// yields `T::default()`.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeTrack<T: Interpolatable> {
    pub frames: Vec<Keyframe<T>>,
    pub interpolation: InterpolationMode,
}

impl<T: Interpolatable> Default for KeyframeTrack<T> {
    fn default() -> Self {
        Self::new(InterpolationMode::default())
    }
}

impl<T: Interpolatable> KeyframeTrack<T> {
    /// Empty track.
    #[must_use]
    pub fn new(interpolation: InterpolationMode) -> Self {
        Self {
            frames: Vec::new(),
            interpolation,
        }
    }

    #[must_use]
    pub fn from_frames(frames: Vec<Keyframe<T>>, interpolation: InterpolationMode) -> Self {
        Self {
            frames,
            interpolation,
        }
    }

    /// Builds a track from `(time, value)` pairs with zero tangents.
    #[must_use]
    pub fn from_keys(keys: &[(f32, T)], interpolation: InterpolationMode) -> Self {
        let frames = keys
            .iter()
            .map(|&(time, value)| Keyframe::new(time, value))
            .collect();
        Self::from_frames(frames, interpolation)
    }

    /// Decodes a raw sampler channel as exported by glTF.
    ///
    /// `values` holds `T::COMPONENTS` floats per keyframe, or three values
    /// per keyframe (in-tangent, value, out-tangent) for cubic channels.
    pub fn from_channel(
        times: &[f32],
        values: &[f32],
        interpolation: InterpolationMode,
    ) -> Result<Self> {
        let values_per_key = match interpolation {
            InterpolationMode::Cubic => 3,
            _ => 1,
        };
        let stride = T::COMPONENTS * values_per_key;
        let expected = times.len() * stride;
        if values.len() != expected {
            return Err(SinewError::MalformedChannel(format!(
                "{} keyframes need {expected} floats, got {}",
                times.len(),
                values.len()
            )));
        }

        if let Some(i) = times.windows(2).position(|w| w[1] < w[0]) {
            return Err(SinewError::MalformedChannel(format!(
                "keyframe times decrease at index {}: {} -> {}",
                i + 1,
                times[i],
                times[i + 1]
            )));
        }

        let c = T::COMPONENTS;
        let frames = times
            .iter()
            .zip(values.chunks_exact(stride))
            .map(|(&time, chunk)| match interpolation {
                InterpolationMode::Cubic => Keyframe::with_tangents(
                    time,
                    T::from_components(&chunk[c..2 * c]),
                    T::from_components(&chunk[..c]),
                    T::from_components(&chunk[2 * c..]),
                ),
                _ => Keyframe::new(time, T::from_components(chunk)),
            })
            .collect();

        Ok(Self::from_frames(frames, interpolation))
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Whether the track has enough frames to be sampled.
    #[inline]
    #[must_use]
    pub fn is_animated(&self) -> bool {
        self.frames.len() > 1
    }

    /// Time of the first frame, or 0 for an empty track.
    #[inline]
    #[must_use]
    pub fn start_time(&self) -> f32 {
        self.frames.first().map_or(0.0, |f| f.time)
    }

    /// Time of the last frame, or 0 for an empty track.
    #[inline]
    #[must_use]
    pub fn end_time(&self) -> f32 {
        self.frames.last().map_or(0.0, |f| f.time)
    }

    /// Smallest and largest frame time, independent of frame order.
    #[must_use]
    pub fn time_bounds(&self) -> Option<(f32, f32)> {
        self.frames.iter().map(|f| f.time).fold(None, |acc, t| match acc {
            None => Some((t, t)),
            Some((lo, hi)) => Some((lo.min(t), hi.max(t))),
        })
    }

    /// Remaps playback time into the track's own time range.
    ///
    /// Returns 0 for a track that cannot be sampled and the start time for a
    /// track whose frames all share one time.
    #[must_use]
    pub fn adjust_time_to_fit_track(&self, time: f32, looping: bool) -> f32 {
        if !self.is_animated() {
            return 0.0;
        }
        let start = self.start_time();
        fit_time_to_range(time, start, self.end_time(), looping).unwrap_or(start)
    }

    /// Index of the frame that starts the interval containing `time`.
    ///
    /// The result is at most `len - 2`, so `index + 1` is always a valid
    /// next frame.
    #[must_use]
    pub fn frame_index(&self, time: f32, looping: bool) -> Option<usize> {
        let len = self.frames.len();
        if len < 2 {
            return None;
        }

        let time = if looping {
            self.adjust_time_to_fit_track(time, true)
        } else {
            if time <= self.start_time() {
                return Some(0);
            }
            if time >= self.frames[len - 2].time {
                return Some(len - 2);
            }
            time
        };

        // partition_point finds the first frame with t > time, i.e. the next frame.
        let next = self.frames.partition_point(|f| f.time <= time);
        Some(next.saturating_sub(1).min(len - 2))
    }

    /// Samples with the track's own interpolation mode and default settings.
    #[must_use]
    pub fn sample(&self, time: f32, looping: bool) -> T {
        self.sample_inner(time, looping, self.interpolation, &SamplingSettings::default())
    }

    #[must_use]
    pub fn sample_with(&self, time: f32, looping: bool, settings: &SamplingSettings) -> T {
        self.sample_inner(time, looping, self.interpolation, settings)
    }

    /// Samples with an explicit interpolation mode, ignoring the track's.
    #[must_use]
    pub fn sample_as(&self, time: f32, looping: bool, interpolation: InterpolationMode) -> T {
        self.sample_inner(time, looping, interpolation, &SamplingSettings::default())
    }

    fn sample_inner(
        &self,
        time: f32,
        looping: bool,
        interpolation: InterpolationMode,
        settings: &SamplingSettings,
    ) -> T {
        let Some(index) = self.frame_index(time, looping) else {
            return T::default();
        };

        let current = &self.frames[index];
        if interpolation == InterpolationMode::Constant {
            return current.value;
        }

        let next = &self.frames[index + 1];
        let delta = next.time - current.time;
        if delta <= 0.0 {
            return current.value;
        }

        let track_time = self.adjust_time_to_fit_track(time, looping);
        let t = ((track_time - current.time) / delta).clamp(0.0, 1.0);

        match interpolation {
            InterpolationMode::Cubic => {
                let s2 = match settings.cubic_tangents {
                    CubicTangents::Incoming => next.in_tangent,
                    CubicTangents::NextValue => next.value,
                };
                T::hermite(t, current.value, current.out_tangent, next.value, s2)
            }
            _ => T::interpolate_linear(current.value, next.value, t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};

    #[test]
    fn fit_time_wraps_negative_input() {
        let t = fit_time_to_range(-0.25, 0.0, 1.0, true).unwrap();
        assert!((t - 0.75).abs() < 1e-6);
        assert_eq!(fit_time_to_range(3.0, 0.0, 1.0, false), Some(1.0));
        assert_eq!(fit_time_to_range(3.0, 1.0, 1.0, true), None);
    }

    #[test]
    fn channel_decodes_cubic_triplets() {
        let times = [0.0, 1.0];
        #[rustfmt::skip]
        let values = [
            0.1, 0.2, 0.3,   1.0, 2.0, 3.0,   4.0, 5.0, 6.0,
            0.0, 0.0, 0.0,   7.0, 8.0, 9.0,   0.0, 0.0, 0.0,
        ];
        let track = KeyframeTrack::<Vec3>::from_channel(&times, &values, InterpolationMode::Cubic)
            .unwrap();
        assert_eq!(track.frames[0].in_tangent, Vec3::new(0.1, 0.2, 0.3));
        assert_eq!(track.frames[0].value, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(track.frames[0].out_tangent, Vec3::new(4.0, 5.0, 6.0));
        assert_eq!(track.frames[1].value, Vec3::new(7.0, 8.0, 9.0));
    }

    #[test]
    fn channel_rejects_wrong_component_count() {
        let err = KeyframeTrack::<Quat>::from_channel(&[0.0, 1.0], &[0.0; 7], InterpolationMode::Linear);
        assert!(matches!(err, Err(SinewError::MalformedChannel(_))));
    }

    #[test]
    fn channel_rejects_decreasing_times() {
        let err = KeyframeTrack::<f32>::from_channel(&[1.0, 0.5], &[0.0, 1.0], InterpolationMode::Linear);
        assert!(matches!(err, Err(SinewError::MalformedChannel(_))));
    }
}
