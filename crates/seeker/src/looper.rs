use std::cell::Cell;
use std::rc::Rc;

use practice_domain::{DomainError, LoopRegion};
use tracing::debug;

/// Read side of the loop editor.
pub trait LoopRegionProvider {
    fn region(&self) -> LoopRegion;

    fn start(&self) -> f64 {
        self.region().start()
    }

    fn end(&self) -> f64 {
        self.region().end()
    }
}

impl LoopRegionProvider for LoopRegion {
    fn region(&self) -> LoopRegion {
        *self
    }
}

/// Loop bounds shared between the loop editor and the seek bar on one thread.
#[derive(Clone, Debug, Default)]
pub struct SharedLoopRegion {
    inner: Rc<Cell<LoopRegion>>,
}

impl SharedLoopRegion {
    pub fn new(region: LoopRegion) -> Self {
        Self {
            inner: Rc::new(Cell::new(region)),
        }
    }

    pub fn set(&self, region: LoopRegion) -> LoopRegion {
        debug!(start = region.start(), end = region.end(), "loop region updated");
        self.inner.set(region);
        region
    }

    /// Moves the start bound; fails if it would pass the end.
    pub fn set_start(&self, start: f64) -> Result<LoopRegion, DomainError> {
        let region = LoopRegion::new(start, self.inner.get().end())?;
        Ok(self.set(region))
    }

    /// Moves the end bound; fails if it would pass the start.
    pub fn set_end(&self, end: f64) -> Result<LoopRegion, DomainError> {
        let region = LoopRegion::new(self.inner.get().start(), end)?;
        Ok(self.set(region))
    }
}

impl LoopRegionProvider for SharedLoopRegion {
    fn region(&self) -> LoopRegion {
        self.inner.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_observe_edits() {
        let editor = SharedLoopRegion::new(LoopRegion::full());
        let reader = editor.clone();
        editor.set_start(0.25).unwrap();
        editor.set_end(0.5).unwrap();
        assert_eq!(reader.start(), 0.25);
        assert_eq!(reader.end(), 0.5);
    }

    #[test]
    fn crossing_bounds_is_rejected() {
        let editor = SharedLoopRegion::new(LoopRegion::new(0.3, 0.6).unwrap());
        assert!(editor.set_start(0.7).is_err());
        assert!(editor.set_end(0.2).is_err());
        assert_eq!(editor.region(), LoopRegion::new(0.3, 0.6).unwrap());
    }
}
