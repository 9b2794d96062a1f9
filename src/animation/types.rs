// Animation data types

use super::interpolation::{lerp_values, slerp_values};

/// Keyframe interpolation mode of a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpolation {
    Step,
    Linear,
    /// Sampled as linear on the value component of each key.
    CubicSpline,
}

/// Joint property animated by a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackProperty {
    Translation, // 3 components
    Rotation,    // 4 components, quaternion xyzw
    Scale,       // 3 components
}

impl TrackProperty {
    pub fn stride(self) -> usize {
        match self {
            TrackProperty::Translation | TrackProperty::Scale => 3,
            TrackProperty::Rotation => 4,
        }
    }
}

/// Keyframes for a single property of a single joint.
#[derive(Debug, Clone)]
pub struct Track {
    pub joint: String,
    pub property: TrackProperty,
    pub interpolation: Interpolation,
    pub times: Vec<f32>,  // seconds, ascending
    pub values: Vec<f32>, // times.len() * property.stride()
}

impl Track {
    pub fn new(
        joint: impl Into<String>,
        property: TrackProperty,
        interpolation: Interpolation,
        times: Vec<f32>,
        values: Vec<f32>,
    ) -> Self {
        Self {
            joint: joint.into(),
            property,
            interpolation,
            times,
            values,
        }
    }

    pub fn key_count(&self) -> usize {
        self.times
            .len()
            .min(self.values.len() / self.property.stride())
    }

    pub fn end_time(&self) -> f32 {
        self.times[..self.key_count()]
            .last()
            .copied()
            .unwrap_or(0.0)
    }

    fn key(&self, index: usize) -> &[f32] {
        let stride = self.property.stride();
        &self.values[index * stride..(index + 1) * stride]
    }

    /// Sample the track at `time` seconds.
    pub fn sample(&self, time: f32) -> Option<Vec<f32>> {
        let count = self.key_count();
        if count == 0 {
            return None;
        }

        // Find surrounding keyframes
        let after_idx = self.times[..count].partition_point(|&t| t < time);

        if after_idx == 0 {
            // Before first key - hold the first pose
            return Some(self.key(0).to_vec());
        }
        if after_idx >= count {
            return Some(self.key(count - 1).to_vec());
        }

        let before_idx = after_idx - 1;
        let before_time = self.times[before_idx];
        let after_time = self.times[after_idx];
        if after_time <= before_time {
            return Some(self.key(after_idx).to_vec());
        }

        let t = (time - before_time) / (after_time - before_time);
        let before = self.key(before_idx);
        let after = self.key(after_idx);

        let value = match (self.interpolation, self.property) {
            (Interpolation::Step, _) => before.to_vec(),
            (_, TrackProperty::Rotation) => slerp_values(before, after, t),
            _ => lerp_values(before, after, t),
        };
        Some(value)
    }
}

/// Longest clip the player will wait on, in seconds.
pub const MAX_CLIP_DURATION: f32 = 3600.0;

/// A named animation: a set of tracks and its playing length.
#[derive(Debug, Clone)]
pub struct Clip {
    pub name: String,
    pub duration: f32,
    pub tracks: Vec<Track>,
}

impl Clip {
    /// Build a clip whose duration is the latest key over all tracks.
    pub fn new(name: impl Into<String>, tracks: Vec<Track>) -> Self {
        let duration = tracks.iter().map(Track::end_time).fold(0.0, f32::max);
        Self::with_duration(name, duration, tracks)
    }

    /// Build a clip with an explicit duration. Non-finite or negative
    /// durations are treated as zero and anything past
    /// [`MAX_CLIP_DURATION`] is clamped to it.
    pub fn with_duration(name: impl Into<String>, duration: f32, tracks: Vec<Track>) -> Self {
        let duration = if duration.is_finite() && duration > 0.0 {
            duration.min(MAX_CLIP_DURATION)
        } else {
            0.0
        };
        Self {
            name: name.into(),
            duration,
            tracks,
        }
    }
}
