use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Normalized `[start, end]` sub-range of a clip that practice playback repeats.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct LoopRegion {
    start: f64,
    end: f64,
}

impl LoopRegion {
    pub fn new(start: f64, end: f64) -> Result<Self, DomainError> {
        if !(0.0..=1.0).contains(&start) || !(0.0..=1.0).contains(&end) {
            return Err(DomainError::validation(
                "loop bounds must lie within [0, 1]",
            ));
        }
        if start > end {
            return Err(DomainError::validation(
                "loop start must not be after loop end",
            ));
        }
        Ok(Self { start, end })
    }

    pub fn full() -> Self {
        Self {
            start: 0.0,
            end: 1.0,
        }
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn clamp(&self, position: f64) -> f64 {
        position.clamp(self.start, self.end)
    }
}

impl Default for LoopRegion {
    fn default() -> Self {
        Self::full()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_validation() {
        assert!(LoopRegion::new(0.6, 0.4).is_err());
        assert!(LoopRegion::new(-0.1, 0.4).is_err());
        assert!(LoopRegion::new(0.2, 1.5).is_err());
        assert_eq!(LoopRegion::new(0.5, 0.5).unwrap().start(), 0.5);
        assert!(LoopRegion::new(0.2, 0.8).is_ok());
    }

    #[test]
    fn region_clamps_positions() {
        let region = LoopRegion::new(0.25, 0.75).unwrap();
        assert_eq!(region.clamp(0.1), 0.25);
        assert_eq!(region.clamp(0.9), 0.75);
        assert_eq!(region.clamp(0.5), 0.5);
    }
}
