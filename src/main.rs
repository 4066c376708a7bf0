//! Terminal runner (default binary).
//!
//! Drives one `GameState` at a fixed `TICK_MS` step: render, poll keys,
//! advance the auto-drop timer and the ambient visuals, then log the
//! controller's events.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info};

use blockfall::cli::{init_logging, parse_args};
use blockfall::core::{GameSnapshot, GameState};
use blockfall::input::{handle_key_event, should_quit};
use blockfall::term::{Ambient, GameView, TerminalRenderer, Viewport};
use blockfall::types::{GameEvent, TICK_MS};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = parse_args(&args)?;
    if let Some(path) = &config.log {
        init_logging(path)?;
    }
    let seed = config.seed_or_clock();
    info!(seed, "blockfall starting");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, seed);

    // Restore the terminal even when the loop failed.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, seed: u32) -> Result<()> {
    let mut game = GameState::new(seed);
    let mut ambient = Ambient::new(seed.rotate_left(16));
    let view = GameView::default();
    let mut snap = GameSnapshot::default();

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snap);
        term.draw(view.render(&snap, &ambient, Viewport::new(w, h)))?;

        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        info!(score = game.score(), "quit");
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        debug!(action = action.as_str(), "input");
                        game.apply_action(action)?;
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            game.tick(TICK_MS)?;
            ambient.update(TICK_MS, game.playable());
        }

        for ev in game.take_events() {
            match ev {
                GameEvent::Spawned { shape, color } => {
                    debug!(shape = shape.as_str(), color = color.as_str(), "spawned")
                }
                GameEvent::BlockFrozen => debug!("block frozen"),
                GameEvent::RowsCleared { count } => {
                    info!(count, score = game.score(), "rows cleared")
                }
                GameEvent::GameOver { score } => info!(score, "game over"),
            }
        }
    }
}
