/// Notified whenever the seek bar moves the song clock.
///
/// `pre_roll_seconds` is how far the clock was rewound ahead of the target,
/// which is less than the configured pre-roll near the start of the clip.
pub trait SongTimeChangedHook {
    fn song_time_changed(&mut self, new_time_seconds: f64, pre_roll_seconds: f64);
}

impl<F> SongTimeChangedHook for F
where
    F: FnMut(f64, f64),
{
    fn song_time_changed(&mut self, new_time_seconds: f64, pre_roll_seconds: f64) {
        self(new_time_seconds, pre_roll_seconds)
    }
}
