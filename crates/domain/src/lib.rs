pub mod clock;
pub mod config;
pub mod error;
pub mod region;
pub mod timefmt;

pub use crate::clock::{inverse_lerp, lerp, AudioClockSnapshot, ClipInfo};
pub use crate::config::{PracticeConfig, SeekerConfig, SpeedConfig};
pub use crate::error::DomainError;
pub use crate::region::LoopRegion;
pub use crate::timefmt::format_time_label;
