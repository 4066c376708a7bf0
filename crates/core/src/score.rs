//! Score tracker - running total of points for the current game.

/// Accumulates points; reset at every game (re)start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreTracker {
    value: u32,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self { value: 0 }
    }

    /// Add `delta` points.
    pub fn update(&mut self, delta: u32) {
        self.value = self.value.saturating_add(delta);
    }

    pub fn restart(&mut self) {
        self.value = 0;
    }

    pub fn value(&self) -> u32 {
        self.value
    }
}
