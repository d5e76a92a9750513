use practice_domain::{inverse_lerp, SeekerConfig};
use serde::{Deserialize, Serialize};

/// Pointer position already mapped into the bar's local space.
///
/// The bar is center-anchored horizontally, so `local_x` runs from
/// `-width / 2` to `width / 2`. `local_y` is measured from the bar's bottom edge.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct PointerEvent {
    pub local_x: f64,
    pub local_y: f64,
}

impl PointerEvent {
    pub fn new(local_x: f64, local_y: f64) -> Self {
        Self { local_x, local_y }
    }

    /// Event whose horizontal position lands on the normalized `position`.
    pub fn at_position(config: &SeekerConfig, position: f64, local_y: f64) -> Self {
        Self::new(position * config.bar_width - config.half_width(), local_y)
    }

    pub fn normalized_x(&self, config: &SeekerConfig) -> f64 {
        inverse_lerp(0.0, config.bar_width, self.local_x + config.half_width())
    }

    pub fn within_band(&self, config: &SeekerConfig) -> bool {
        (0.0..=config.bar_height).contains(&self.local_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn normalizes_against_center_anchor() {
        let config = SeekerConfig::default();
        assert_eq!(PointerEvent::new(-50.0, 1.0).normalized_x(&config), 0.0);
        assert_eq!(PointerEvent::new(0.0, 1.0).normalized_x(&config), 0.5);
        assert_eq!(PointerEvent::new(80.0, 1.0).normalized_x(&config), 1.0);
        assert_relative_eq!(
            PointerEvent::at_position(&config, 0.3, 1.0).normalized_x(&config),
            0.3
        );
    }

    #[test]
    fn band_check() {
        let config = SeekerConfig::default();
        assert!(PointerEvent::new(0.0, 0.0).within_band(&config));
        assert!(PointerEvent::new(0.0, 2.0).within_band(&config));
        assert!(!PointerEvent::new(0.0, 2.5).within_band(&config));
        assert!(!PointerEvent::new(0.0, -0.1).within_band(&config));
    }
}
