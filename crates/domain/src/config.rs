use serde::{Deserialize, Serialize};

use crate::DomainError;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SeekerConfig {
    /// Seconds rewound before every applied seek.
    pub ahead_time: f64,
    pub stick_epsilon: f64,
    pub loopback_lookahead: f64,
    pub bar_width: f64,
    pub bar_height: f64,
}

impl Default for SeekerConfig {
    fn default() -> Self {
        Self {
            ahead_time: 1.0,
            stick_epsilon: 0.02,
            loopback_lookahead: 0.1,
            bar_width: 100.0,
            bar_height: 2.0,
        }
    }
}

impl SeekerConfig {
    pub fn half_width(&self) -> f64 {
        self.bar_width / 2.0
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let values = [
            self.ahead_time,
            self.stick_epsilon,
            self.loopback_lookahead,
            self.bar_width,
            self.bar_height,
        ];
        if values.iter().any(|value| !value.is_finite()) {
            return Err(DomainError::config("seeker values must be finite"));
        }
        if self.ahead_time < 0.0 {
            return Err(DomainError::config("ahead_time cannot be negative"));
        }
        if !(0.0..0.5).contains(&self.stick_epsilon) {
            return Err(DomainError::config(
                "stick_epsilon must be in [0, 0.5)",
            ));
        }
        if self.loopback_lookahead < 0.0 {
            return Err(DomainError::config(
                "loopback_lookahead cannot be negative",
            ));
        }
        if self.bar_width <= 0.0 || self.bar_height <= 0.0 {
            return Err(DomainError::config("bar dimensions must be positive"));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpeedConfig {
    pub step_size: f64,
    pub max_speed: f64,
    /// Unlocks speeds below 1.0x, down to a single step.
    pub no_fail: bool,
    pub initial_speed: f64,
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            step_size: 0.05,
            max_speed: 2.0,
            no_fail: false,
            initial_speed: 1.0,
        }
    }
}

impl SpeedConfig {
    /// Index of the slowest selectable speed, in steps from zero.
    pub fn index_offset(&self) -> i64 {
        if self.no_fail {
            1
        } else {
            20
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if ![self.step_size, self.max_speed, self.initial_speed]
            .iter()
            .all(|value| value.is_finite())
        {
            return Err(DomainError::config("speed values must be finite"));
        }
        if self.step_size <= 0.0 {
            return Err(DomainError::config("speed step_size must be positive"));
        }
        let steps = (self.max_speed / self.step_size).round() as i64;
        if steps <= self.index_offset() {
            return Err(DomainError::config(
                "max_speed leaves no selectable speeds",
            ));
        }
        if self.initial_speed <= 0.0 {
            return Err(DomainError::config("initial_speed must be positive"));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PracticeConfig {
    pub seeker: SeekerConfig,
    pub speed: SpeedConfig,
}

impl PracticeConfig {
    pub fn from_yaml_str(source: &str) -> Result<Self, DomainError> {
        let config: Self =
            serde_yaml::from_str(source).map_err(|err| DomainError::config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(source: &str) -> Result<Self, DomainError> {
        let config: Self =
            serde_json::from_str(source).map_err(|err| DomainError::config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String, DomainError> {
        serde_yaml::to_string(self).map_err(|err| DomainError::config(err.to_string()))
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        self.seeker.validate()?;
        self.speed.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = PracticeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.seeker.half_width(), 50.0);
        assert_eq!(config.speed.index_offset(), 20);
    }

    #[test]
    fn yaml_fills_missing_fields() {
        let config = PracticeConfig::from_yaml_str("seeker:\n  ahead_time: 0.5\nspeed:\n  no_fail: true\n")
            .unwrap();
        assert_eq!(config.seeker.ahead_time, 0.5);
        assert_eq!(config.seeker.stick_epsilon, 0.02);
        assert!(config.speed.no_fail);
        assert_eq!(config.speed.step_size, 0.05);
    }

    #[test]
    fn json_is_accepted() {
        let config = PracticeConfig::from_json_str(r#"{"seeker": {"bar_width": 200.0}}"#).unwrap();
        assert_eq!(config.seeker.bar_width, 200.0);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(PracticeConfig::from_yaml_str("seeker:\n  bar_width: 0\n").is_err());
        assert!(PracticeConfig::from_yaml_str("speed:\n  step_size: -1\n").is_err());
        assert!(PracticeConfig::from_yaml_str("speed:\n  max_speed: 1.0\n").is_err());
        assert!(PracticeConfig::from_yaml_str("seeker: [").is_err());
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let mut config = PracticeConfig::default();
        config.seeker.bar_width = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = PracticeConfig::default();
        config.seeker.ahead_time = f64::INFINITY;
        assert!(config.validate().is_err());

        let mut config = PracticeConfig::default();
        config.speed.max_speed = f64::NAN;
        assert!(config.validate().is_err());

        assert!(PracticeConfig::from_yaml_str("seeker:\n  bar_height: .nan\n").is_err());
    }

    #[test]
    fn yaml_round_trip_keeps_values() {
        let mut config = PracticeConfig::default();
        config.speed.max_speed = 3.0;
        let text = config.to_yaml_string().unwrap();
        assert_eq!(PracticeConfig::from_yaml_str(&text).unwrap(), config);
    }
}
