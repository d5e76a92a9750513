use serde::{Deserialize, Serialize};

/// Static properties of a loaded clip.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClipInfo {
    pub sample_rate: u32,
    pub total_samples: u64,
    pub channels: u16,
}

impl ClipInfo {
    pub fn new(sample_rate: u32, total_samples: u64, channels: u16) -> Self {
        Self {
            sample_rate,
            total_samples,
            channels,
        }
    }

    /// Builds a clip lasting `seconds` at `sample_rate`, rounded to the nearest frame.
    pub fn from_duration(seconds: f64, sample_rate: u32, channels: u16) -> Self {
        let total_samples = (seconds.max(0.0) * sample_rate as f64).round() as u64;
        Self::new(sample_rate, total_samples, channels)
    }

    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.total_samples as f64 / self.sample_rate as f64
    }
}

/// One read of an audio clock. Only valid for the operation that took it.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct AudioClockSnapshot {
    pub current_sample_index: u64,
    pub total_samples: u64,
    pub total_duration_seconds: f64,
    pub current_time_seconds: f64,
}

impl AudioClockSnapshot {
    /// Playback point as a fraction of the clip.
    pub fn normalized_position(&self) -> f64 {
        if self.total_samples == 0 {
            return 0.0;
        }
        self.current_sample_index as f64 / self.total_samples as f64
    }

    /// Sample index nearest to the normalized `position`.
    pub fn sample_at(&self, position: f64) -> u64 {
        lerp(0.0, self.total_samples as f64, position).round() as u64
    }
}

/// Unclamped linear interpolation; `t` is expected in `[0, 1]`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Inverse of [`lerp`], clamped to `[0, 1]`. A zero-width range maps to 0.
pub fn inverse_lerp(a: f64, b: f64, value: f64) -> f64 {
    if a == b {
        return 0.0;
    }
    ((value - a) / (b - a)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn clip_duration() {
        let clip = ClipInfo::from_duration(10.0, 44_100, 2);
        assert_eq!(clip.total_samples, 441_000);
        assert_relative_eq!(clip.duration_seconds(), 10.0);
        assert_eq!(ClipInfo::new(0, 100, 1).duration_seconds(), 0.0);
    }

    #[test]
    fn snapshot_conversions() {
        let snapshot = AudioClockSnapshot {
            current_sample_index: 22_050,
            total_samples: 441_000,
            total_duration_seconds: 10.0,
            current_time_seconds: 0.5,
        };
        assert_relative_eq!(snapshot.normalized_position(), 0.05);
        assert_eq!(snapshot.sample_at(snapshot.normalized_position()), 22_050);
        assert_eq!(snapshot.sample_at(1.0), 441_000);
    }

    #[test]
    fn inverse_lerp_clamps() {
        assert_eq!(inverse_lerp(0.0, 100.0, -5.0), 0.0);
        assert_eq!(inverse_lerp(0.0, 100.0, 150.0), 1.0);
        assert_relative_eq!(inverse_lerp(0.0, 100.0, 25.0), 0.25);
        assert_eq!(inverse_lerp(3.0, 3.0, 3.0), 0.0);
    }
}
