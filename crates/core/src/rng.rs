//! RNG module - shape and color selection.
//!
//! A small LCG keeps games reproducible: the same seed spawns the same
//! sequence of shapes and colors, which the tests and benchmarks rely on.

use crate::types::{BlockColor, ShapeKind};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // A zero state would only ever yield the increment.
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        (self.next_u32() >> 16) % max.max(1)
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Picks the next shape template and color, each uniformly at random.
#[derive(Debug, Clone)]
pub struct ShapeGenerator {
    rng: SimpleRng,
    seed: u32,
}

impl ShapeGenerator {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            seed,
        }
    }

    /// Draw a `(shape, color)` pair. The color is drawn first.
    pub fn draw(&mut self) -> (ShapeKind, BlockColor) {
        let color = BlockColor::from_index(self.rng.next_range(BlockColor::COUNT as u32) as usize)
            .unwrap_or(BlockColor::Red);
        let shape = ShapeKind::from_index(self.rng.next_range(ShapeKind::COUNT as u32) as usize)
            .unwrap_or(ShapeKind::Tee);
        (shape, color)
    }

    /// Seed this generator was created with.
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for ShapeGenerator {
    fn default() -> Self {
        Self::new(1)
    }
}
