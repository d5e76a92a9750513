use practice_audio::AudioClock;
use practice_domain::{format_time_label, lerp, SeekerConfig};
use tracing::{debug, info};

use crate::display::{DisplayFrame, DisplaySink};
use crate::hooks::SongTimeChangedHook;
use crate::input::PointerEvent;
use crate::looper::LoopRegionProvider;

/// Keeps a normalized seek position in step with an audio clock and a loop region.
pub struct PlaybackPositionController<C, L> {
    config: SeekerConfig,
    clock: C,
    looper: L,
    display: Option<Box<dyn DisplaySink>>,
    song_time_hooks: Vec<Box<dyn SongTimeChangedHook>>,
    position: f64,
    last_applied_sample_index: u64,
    visible: bool,
    reapply_pending: bool,
    current_time_label: String,
    total_time_label: String,
}

impl<C, L> PlaybackPositionController<C, L>
where
    C: AudioClock,
    L: LoopRegionProvider,
{
    pub fn new(config: SeekerConfig, clock: C, looper: L) -> Self {
        Self {
            config,
            clock,
            looper,
            display: None,
            song_time_hooks: Vec::new(),
            position: 0.0,
            last_applied_sample_index: 0,
            visible: false,
            reapply_pending: false,
            current_time_label: format_time_label(0.0),
            total_time_label: format_time_label(0.0),
        }
    }

    pub fn set_display_sink(&mut self, sink: impl DisplaySink + 'static) {
        self.display = Some(Box::new(sink));
    }

    pub fn add_song_time_hook(&mut self, hook: impl SongTimeChangedHook + 'static) {
        self.song_time_hooks.push(Box::new(hook));
    }

    pub fn config(&self) -> &SeekerConfig {
        &self.config
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn current_time_label(&self) -> &str {
        &self.current_time_label
    }

    pub fn total_time_label(&self) -> &str {
        &self.total_time_label
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Starts a session at the loop start when the loop does not begin at zero.
    /// The seek is repeated once on the next [`tick`](Self::tick), since players
    /// may rewind the clock while the song is starting up.
    pub fn seed_from_loop_start(&mut self) {
        let start = self.looper.start();
        if start == 0.0 || !self.clock.is_loaded() {
            return;
        }
        self.position = start;
        self.apply_playback_position();
        self.reapply_pending = true;
    }

    pub fn activate(&mut self) {
        self.visible = true;
        let Some(snapshot) = self.clock.snapshot() else {
            return;
        };
        self.position = snapshot.normalized_position();
        self.last_applied_sample_index = snapshot.current_sample_index;
        self.total_time_label = format_time_label(snapshot.total_duration_seconds);
        self.refresh_current_time_label(self.position);
        debug!(
            position = self.position,
            sample = snapshot.current_sample_index,
            "seek bar activated"
        );
    }

    pub fn deactivate(&mut self) {
        self.visible = false;
        let Some(snapshot) = self.clock.snapshot() else {
            return;
        };
        let target = snapshot.sample_at(self.position);
        if target == self.last_applied_sample_index {
            debug!(target, "seek bar hidden without a position change");
            return;
        }
        self.apply_playback_position();
    }

    /// Seeks the clock to the current position, rewound by the pre-roll.
    pub fn apply_playback_position(&mut self) {
        let Some(snapshot) = self.clock.snapshot() else {
            return;
        };
        self.reapply_pending = false;
        let target = snapshot.sample_at(self.position);
        self.clock.set_sample_index(target);
        self.last_applied_sample_index = target;

        let landed = self.clock.current_time_seconds();
        let pre_roll = self.config.ahead_time.min(landed);
        self.clock.set_current_time_seconds(landed - pre_roll);
        let new_time = self.clock.current_time_seconds();
        info!(target, new_time, pre_roll, "applied playback position");

        for hook in &mut self.song_time_hooks {
            hook.song_time_changed(new_time, pre_roll);
        }
    }

    /// Handles a press. Returns `false` when the press lies outside the bar's band
    /// and should fall through to whatever is underneath.
    pub fn on_pointer_down(&mut self, event: PointerEvent) -> bool {
        if !event.within_band(&self.config) {
            return false;
        }
        self.move_to_pointer(event);
        true
    }

    pub fn on_drag(&mut self, event: PointerEvent) {
        self.move_to_pointer(event);
    }

    fn move_to_pointer(&mut self, event: PointerEvent) {
        if !self.clock.is_loaded() {
            return;
        }
        self.reapply_pending = false;
        self.position = event.normalized_x(&self.config);
        self.check_looper_cursor_stick();
        self.refresh_current_time_label(self.position);
    }

    /// Snaps onto a loop bound within the stick distance, then clamps into the loop.
    pub fn check_looper_cursor_stick(&mut self) {
        let region = self.looper.region();
        if (self.position - region.start()).abs() <= self.config.stick_epsilon {
            self.position = region.start();
        } else if (self.position - region.end()).abs() <= self.config.stick_epsilon {
            self.position = region.end();
        }
        self.position = region.clamp(self.position);
    }

    /// Call after the loop editor finishes moving a bound.
    pub fn on_loop_region_changed(&mut self) {
        self.position = self.looper.region().clamp(self.position);
        debug!(position = self.position, "position clamped to new loop region");
    }

    /// Loop-back polling while the bar is hidden. Returns whether playback was
    /// sent back to the loop start.
    pub fn tick(&mut self) -> bool {
        if self.reapply_pending && self.clock.is_loaded() {
            debug!(position = self.position, "repeating seeded seek");
            self.apply_playback_position();
            return false;
        }
        if self.visible {
            return false;
        }
        let Some(snapshot) = self.clock.snapshot() else {
            return false;
        };
        if snapshot.total_duration_seconds <= 0.0 {
            return false;
        }
        let region = self.looper.region();
        let upcoming = (snapshot.current_time_seconds + self.config.loopback_lookahead)
            / snapshot.total_duration_seconds;
        if upcoming < region.end() {
            return false;
        }
        info!(
            time = snapshot.current_time_seconds,
            loop_start = region.start(),
            "loop end reached"
        );
        self.position = region.start();
        self.apply_playback_position();
        true
    }

    /// Pushes the loop-clamped position to the display. The stored position is
    /// left as is.
    pub fn render_tick(&mut self) {
        if !self.clock.is_loaded() {
            return;
        }
        let clamped = self.looper.region().clamp(self.position);
        self.refresh_current_time_label(clamped);
        let frame = DisplayFrame {
            fill_ratio: clamped,
            cursor_offset: lerp(0.0, self.config.bar_width, clamped),
            current_time_label: self.current_time_label.clone(),
            total_time_label: self.total_time_label.clone(),
        };
        if let Some(display) = self.display.as_mut() {
            display.present(&frame);
        }
    }

    fn refresh_current_time_label(&mut self, position: f64) {
        let seconds = lerp(0.0, self.clock.total_duration_seconds(), position);
        self.current_time_label = format_time_label(seconds);
    }
}
