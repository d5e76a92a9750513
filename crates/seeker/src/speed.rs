use practice_domain::{DomainError, SpeedConfig};
use tracing::debug;

type SpeedObserver = Box<dyn FnMut(f64)>;

/// Index-addressed list of playback speeds, as shown by a settings stepper.
pub struct SpeedStepper {
    config: SpeedConfig,
    index_offset: i64,
    len: usize,
    index: usize,
    observers: Vec<SpeedObserver>,
}

impl SpeedStepper {
    pub fn new(config: SpeedConfig) -> Result<Self, DomainError> {
        config.validate()?;
        let index_offset = config.index_offset();
        let len = ((config.max_speed / config.step_size).round() as i64 - index_offset) as usize;
        let initial = (config.initial_speed / config.step_size).round() as i64 - index_offset;
        let index = initial.clamp(0, len as i64 - 1) as usize;
        Ok(Self {
            config,
            index_offset,
            len,
            index,
            observers: Vec::new(),
        })
    }

    pub fn on_value_changed(&mut self, observer: impl FnMut(f64) + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn speed(&self) -> f64 {
        self.speed_for(self.index)
    }

    pub fn label(&self) -> String {
        self.label_for(self.index)
    }

    pub fn speed_for(&self, index: usize) -> f64 {
        self.config.step_size * self.steps(index)
    }

    pub fn label_for(&self, index: usize) -> String {
        let percent = self.config.step_size * 100.0 * self.steps(index);
        // trims float noise like 105.00000000000001
        let percent = (percent * 1_000.0).round() / 1_000.0;
        format!("{}%", percent)
    }

    pub fn increment(&mut self) -> bool {
        if self.index + 1 >= self.len {
            return false;
        }
        self.select(self.index + 1)
    }

    pub fn decrement(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.select(self.index - 1)
    }

    /// Moves to `index` and notifies observers. Out-of-range indices are refused.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        self.index = index;
        let speed = self.speed();
        debug!(index, speed, "playback speed selected");
        for observer in &mut self.observers {
            observer(speed);
        }
        true
    }

    fn steps(&self, index: usize) -> f64 {
        (index as i64 + self.index_offset) as f64
    }
}
