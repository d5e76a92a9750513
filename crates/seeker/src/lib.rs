pub mod controller;
pub mod display;
pub mod hooks;
pub mod input;
pub mod looper;
pub mod speed;

pub use controller::PlaybackPositionController;
pub use display::{DisplayFrame, DisplaySink};
pub use hooks::SongTimeChangedHook;
pub use input::PointerEvent;
pub use looper::{LoopRegionProvider, SharedLoopRegion};
pub use speed::SpeedStepper;
