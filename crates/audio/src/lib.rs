pub mod clock;
pub mod io;

pub use clock::{AudioClock, SimulatedClock};
pub use io::ClipProbe;
