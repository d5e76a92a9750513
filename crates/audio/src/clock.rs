use std::time::Duration;

use practice_domain::{AudioClockSnapshot, ClipInfo};
use tracing::debug;

/// The playback clock of whatever is playing the song.
pub trait AudioClock {
    fn current_sample_index(&self) -> u64;
    /// Zero when no clip is loaded.
    fn total_samples(&self) -> u64;
    fn total_duration_seconds(&self) -> f64;
    fn current_time_seconds(&self) -> f64;
    fn set_sample_index(&mut self, index: u64);
    fn set_current_time_seconds(&mut self, seconds: f64);

    fn is_loaded(&self) -> bool {
        self.total_samples() > 0
    }

    fn snapshot(&self) -> Option<AudioClockSnapshot> {
        if !self.is_loaded() {
            return None;
        }
        Some(AudioClockSnapshot {
            current_sample_index: self.current_sample_index(),
            total_samples: self.total_samples(),
            total_duration_seconds: self.total_duration_seconds(),
            current_time_seconds: self.current_time_seconds(),
        })
    }
}

/// Sample-accurate clock that only moves when [`SimulatedClock::advance`] is called.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulatedClock {
    clip: Option<ClipInfo>,
    sample_index: u64,
    speed: f64,
    carry: f64,
}

impl SimulatedClock {
    pub fn new() -> Self {
        Self {
            clip: None,
            sample_index: 0,
            speed: 1.0,
            carry: 0.0,
        }
    }

    pub fn with_clip(clip: ClipInfo) -> Self {
        let mut clock = Self::new();
        clock.load(clip);
        clock
    }

    pub fn load(&mut self, clip: ClipInfo) {
        debug!(?clip, "loading clip into simulated clock");
        self.clip = Some(clip);
        self.sample_index = 0;
        self.carry = 0.0;
    }

    pub fn unload(&mut self) {
        self.clip = None;
        self.sample_index = 0;
        self.carry = 0.0;
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed.max(0.0);
    }

    pub fn is_finished(&self) -> bool {
        self.clip
            .map(|clip| self.sample_index >= clip.total_samples)
            .unwrap_or(true)
    }

    /// Moves the playhead by `elapsed` wall time scaled by the playback speed.
    pub fn advance(&mut self, elapsed: Duration) {
        let Some(clip) = self.clip else {
            return;
        };
        let exact = elapsed.as_secs_f64() * self.speed * clip.sample_rate as f64 + self.carry;
        let whole = exact.floor();
        self.carry = exact - whole;
        self.sample_index = self
            .sample_index
            .saturating_add(whole as u64)
            .min(clip.total_samples);
    }
}

impl Default for SimulatedClock {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioClock for SimulatedClock {
    fn current_sample_index(&self) -> u64 {
        self.sample_index
    }

    fn total_samples(&self) -> u64 {
        self.clip.map(|clip| clip.total_samples).unwrap_or(0)
    }

    fn total_duration_seconds(&self) -> f64 {
        self.clip.map(|clip| clip.duration_seconds()).unwrap_or(0.0)
    }

    fn current_time_seconds(&self) -> f64 {
        match self.clip {
            Some(clip) if clip.sample_rate > 0 => self.sample_index as f64 / clip.sample_rate as f64,
            _ => 0.0,
        }
    }

    fn set_sample_index(&mut self, index: u64) {
        self.sample_index = index.min(self.total_samples());
        self.carry = 0.0;
    }

    fn set_current_time_seconds(&mut self, seconds: f64) {
        let Some(clip) = self.clip else {
            return;
        };
        let index = (seconds.max(0.0) * clip.sample_rate as f64).round() as u64;
        self.set_sample_index(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn unloaded_clock_has_no_snapshot() {
        let mut clock = SimulatedClock::new();
        assert!(clock.snapshot().is_none());
        clock.advance(Duration::from_secs(1));
        clock.set_current_time_seconds(3.0);
        assert_eq!(clock.current_sample_index(), 0);
        assert!(clock.is_finished());
    }

    #[test]
    fn advance_saturates_at_clip_end() {
        let mut clock = SimulatedClock::with_clip(ClipInfo::from_duration(2.0, 1_000, 2));
        clock.advance(Duration::from_millis(500));
        assert_eq!(clock.current_sample_index(), 500);
        clock.advance(Duration::from_secs(5));
        assert_eq!(clock.current_sample_index(), 2_000);
        assert!(clock.is_finished());
    }

    #[test]
    fn unload_drops_the_clip() {
        let mut clock = SimulatedClock::with_clip(ClipInfo::from_duration(2.0, 1_000, 1));
        clock.advance(Duration::from_secs(1));
        clock.unload();
        assert!(!clock.is_loaded());
        assert!(clock.snapshot().is_none());
        assert_eq!(clock.current_sample_index(), 0);
    }

    #[test]
    fn speed_scales_advance() {
        let mut clock = SimulatedClock::with_clip(ClipInfo::from_duration(10.0, 1_000, 2));
        clock.set_speed(1.5);
        clock.advance(Duration::from_secs(2));
        assert_relative_eq!(clock.current_time_seconds(), 3.0);
    }

    #[test]
    fn setters_clamp_into_clip() {
        let mut clock = SimulatedClock::with_clip(ClipInfo::from_duration(4.0, 1_000, 1));
        clock.set_sample_index(10_000);
        assert_eq!(clock.current_sample_index(), 4_000);
        clock.set_current_time_seconds(-1.0);
        assert_eq!(clock.current_sample_index(), 0);
        clock.set_current_time_seconds(1.25);
        let snapshot = clock.snapshot().unwrap();
        assert_eq!(snapshot.current_sample_index, 1_250);
        assert_relative_eq!(snapshot.total_duration_seconds, 4.0);
    }
}
