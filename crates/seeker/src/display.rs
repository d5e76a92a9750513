use serde::{Deserialize, Serialize};

/// What the seek bar should show for one frame.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct DisplayFrame {
    /// Filled fraction of the bar.
    pub fill_ratio: f64,
    /// Cursor offset from the bar's left edge, in local units.
    pub cursor_offset: f64,
    pub current_time_label: String,
    pub total_time_label: String,
}

pub trait DisplaySink {
    fn present(&mut self, frame: &DisplayFrame);
}

impl<F> DisplaySink for F
where
    F: FnMut(&DisplayFrame),
{
    fn present(&mut self, frame: &DisplayFrame) {
        self(frame)
    }
}
