//! Ambient visual timers.
//!
//! The background cycles through a dark palette while a game is running and
//! every block blinks white once per period. Both are purely cosmetic: they
//! never read or change the simulation beyond the `playing` flag passed in.

use crate::core::SimpleRng;
use crate::fb::Rgb;
use crate::types::{BACKGROUND_CHANGE_INTERVAL_MS, BLINK_INTERVAL_MS};

/// Background palette: darkred, darkgoldenrod, darkkhaki, darkgreen,
/// lightskyblue, midnightblue, rebeccapurple.
pub const BACKGROUND_PALETTE: [Rgb; 7] = [
    Rgb::new(139, 0, 0),
    Rgb::new(184, 134, 11),
    Rgb::new(189, 183, 107),
    Rgb::new(0, 100, 0),
    Rgb::new(135, 206, 250),
    Rgb::new(25, 25, 112),
    Rgb::new(102, 51, 153),
];

#[derive(Debug, Clone)]
pub struct Ambient {
    rng: SimpleRng,
    background: Option<usize>,
    background_timer_ms: u32,
    blink_timer_ms: u32,
    blink_on: bool,
}

impl Ambient {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            background: None,
            background_timer_ms: 0,
            blink_timer_ms: 0,
            blink_on: false,
        }
    }

    /// Advance both timers. Outside of play the background resets to black.
    pub fn update(&mut self, elapsed_ms: u32, playing: bool) {
        if playing {
            self.background_timer_ms += elapsed_ms;
            while self.background_timer_ms >= BACKGROUND_CHANGE_INTERVAL_MS {
                self.background_timer_ms -= BACKGROUND_CHANGE_INTERVAL_MS;
                let pick = self.rng.next_range(BACKGROUND_PALETTE.len() as u32) as usize;
                self.background = Some(pick);
            }
        } else {
            self.background = None;
            self.background_timer_ms = 0;
        }

        self.blink_timer_ms += elapsed_ms;
        while self.blink_timer_ms >= BLINK_INTERVAL_MS {
            self.blink_timer_ms -= BLINK_INTERVAL_MS;
            self.blink_on = !self.blink_on;
        }
    }

    pub fn background(&self) -> Rgb {
        self.background
            .map(|i| BACKGROUND_PALETTE[i])
            .unwrap_or(Rgb::BLACK)
    }

    /// Whether blocks are currently drawn white.
    pub fn blink_on(&self) -> bool {
        self.blink_on
    }
}

impl Default for Ambient {
    fn default() -> Self {
        Self::new(1)
    }
}
