//! Game state module - the single controller of a game.
//!
//! `GameState` owns the settled registry, the active group, the score, the
//! pause flag and the shape generator. The surrounding layer feeds it elapsed
//! time through [`GameState::tick`] and input through
//! [`GameState::apply_action`], reads [`GameState::snapshot`] to draw, and
//! drains [`GameState::take_events`] for the freeze / row-clear / game-over
//! signals.
//!
//! Freeze sequence: the frozen group joins the registry, the game-over check
//! runs, then rows are cleared (cascades included) with the game paused, and
//! only then is the next group spawned.

use tracing::{debug, info};

use crate::error::Result;
use crate::group::{BlockGroup, DropOutcome, RotateOutcome};
use crate::line_clear::{self, ClearedRows};
use crate::registry::SettledRegistry;
use crate::rng::ShapeGenerator;
use crate::score::ScoreTracker;
use crate::snapshot::{color_code, CellSnapshot, GameSnapshot};
use crate::types::{
    BlockColor, GameAction, GameEvent, ShapeKind, DROP_INTERVAL_MS, FIELD_HEIGHT, FIELD_WIDTH,
};

#[derive(Debug, Clone)]
pub struct GameState {
    registry: SettledRegistry,
    active: Option<BlockGroup>,
    score: ScoreTracker,
    generator: ShapeGenerator,
    events: Vec<GameEvent>,
    /// Rows cleared in the current game.
    rows_cleared: u32,
    /// Monotonic game counter (increments on every restart).
    episode_id: u32,
    drop_timer_ms: u32,
    paused: bool,
    game_over: bool,
    started: bool,
}

impl GameState {
    /// Create an idle game; nothing spawns until [`start`](Self::start).
    pub fn new(seed: u32) -> Self {
        Self {
            registry: SettledRegistry::new(),
            active: None,
            score: ScoreTracker::new(),
            generator: ShapeGenerator::new(seed),
            events: Vec::new(),
            rows_cleared: 0,
            episode_id: 0,
            drop_timer_ms: 0,
            paused: false,
            game_over: false,
            started: false,
        }
    }

    /// Start a fresh game, discarding any previous board.
    pub fn start(&mut self) -> Result<()> {
        if self.started {
            self.episode_id = self.episode_id.wrapping_add(1);
        }
        self.registry.clear();
        self.active = None;
        self.score.restart();
        self.rows_cleared = 0;
        self.drop_timer_ms = 0;
        self.paused = false;
        self.game_over = false;
        self.started = true;

        info!(episode = self.episode_id, "game started");
        self.spawn_random()?;
        Ok(())
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn score(&self) -> u32 {
        self.score.value()
    }

    pub fn rows_cleared(&self) -> u32 {
        self.rows_cleared
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn active(&self) -> Option<&BlockGroup> {
        self.active.as_ref()
    }

    pub fn registry(&self) -> &SettledRegistry {
        &self.registry
    }

    /// Mutable registry access for scripted setups (tests, replays).
    pub fn registry_mut(&mut self) -> &mut SettledRegistry {
        &mut self.registry
    }

    /// Whether movement input and auto-drop currently have any effect.
    pub fn playable(&self) -> bool {
        self.started && !self.paused && !self.game_over
    }

    /// Drain pending signals, oldest first.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Spawn a random shape in a random color.
    pub fn spawn_random(&mut self) -> Result<bool> {
        let (shape, color) = self.generator.draw();
        Ok(self.spawn_next(shape, color)?.is_some())
    }

    /// Spawn `shape` at its template coordinates.
    ///
    /// If any template cell is already settled the game ends instead and no
    /// group is created.
    pub fn spawn_next(&mut self, shape: ShapeKind, color: BlockColor) -> Result<Option<&BlockGroup>> {
        if self.game_over {
            return Ok(None);
        }

        let blocked = shape
            .offsets()
            .iter()
            .any(|&(x, y)| self.registry.is_occupied(x, y));
        if blocked {
            debug!(shape = shape.as_str(), "spawn area occupied");
            self.finish_game();
            return Ok(None);
        }

        let group = BlockGroup::spawn(shape, color)?;
        debug!(shape = shape.as_str(), color = color.as_str(), "spawned block group");
        self.drop_timer_ms = 0;
        self.events.push(GameEvent::Spawned { shape, color });
        self.active = Some(group);
        Ok(self.active.as_ref())
    }

    /// Advance the auto-drop timer by `elapsed_ms`.
    ///
    /// One gravity step is taken per elapsed `DROP_INTERVAL_MS`; leftover time
    /// carries over to the next call. Returns `true` when at least one step
    /// was taken. While paused the timer keeps running and the intervals that
    /// fire are skipped.
    pub fn tick(&mut self, elapsed_ms: u32) -> Result<bool> {
        if !self.started || self.game_over || self.active.is_none() {
            return Ok(false);
        }

        self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
        let mut stepped = false;
        while self.drop_timer_ms >= DROP_INTERVAL_MS {
            self.drop_timer_ms -= DROP_INTERVAL_MS;
            if self.paused {
                continue;
            }
            stepped = true;
            // A freeze settles the group and restarts the timer for the next one.
            if !self.move_down()? {
                break;
            }
        }
        Ok(stepped)
    }

    /// Apply a command from the input layer.
    pub fn apply_action(&mut self, action: GameAction) -> Result<bool> {
        match action {
            GameAction::MoveLeft => Ok(self.move_left()),
            GameAction::MoveRight => Ok(self.move_right()),
            GameAction::MoveDown => self.move_down(),
            GameAction::Rotate => self.rotate(),
            GameAction::Pause => {
                if !self.started || self.game_over {
                    return Ok(false);
                }
                self.paused = !self.paused;
                debug!(paused = self.paused, "pause toggled");
                Ok(true)
            }
            GameAction::Start => {
                self.start()?;
                Ok(true)
            }
        }
    }

    pub fn move_left(&mut self) -> bool {
        if !self.playable() {
            return false;
        }
        match self.active.as_mut() {
            Some(group) => group.move_left(&self.registry),
            None => false,
        }
    }

    pub fn move_right(&mut self) -> bool {
        if !self.playable() {
            return false;
        }
        match self.active.as_mut() {
            Some(group) => group.move_right(&self.registry),
            None => false,
        }
    }

    /// Step the active group down; a blocked step freezes and settles it.
    pub fn move_down(&mut self) -> Result<bool> {
        if !self.playable() {
            return Ok(false);
        }
        let Some(group) = self.active.as_mut() else {
            return Ok(false);
        };

        match group.move_down(&self.registry)? {
            DropOutcome::Moved => Ok(true),
            DropOutcome::Frozen => {
                self.settle_active()?;
                Ok(false)
            }
            DropOutcome::Inactive => Ok(false),
        }
    }

    pub fn rotate(&mut self) -> Result<bool> {
        if !self.playable() {
            return Ok(false);
        }
        let Some(group) = self.active.as_mut() else {
            return Ok(false);
        };

        match group.rotate(&self.registry)? {
            RotateOutcome::Rotated => Ok(true),
            RotateOutcome::Frozen => {
                self.settle_active()?;
                Ok(false)
            }
            RotateOutcome::Rejected | RotateOutcome::Inactive => Ok(false),
        }
    }

    /// Run the freeze sequence for the (already frozen) active group.
    fn settle_active(&mut self) -> Result<()> {
        let Some(group) = self.active.take() else {
            return Ok(());
        };
        self.drop_timer_ms = 0;
        self.registry.push(group)?;

        if self.registry.is_overwhelmed() {
            self.finish_game();
            return Ok(());
        }

        self.events.push(GameEvent::BlockFrozen);

        let cleared = self.clear_rows();
        if !cleared.is_empty() {
            let count = cleared.len() as u32;
            self.rows_cleared = self.rows_cleared.saturating_add(count);
            self.events.push(GameEvent::RowsCleared { count });
        }

        self.spawn_random()?;
        Ok(())
    }

    /// Clear complete rows with input and auto-drop suspended.
    fn clear_rows(&mut self) -> ClearedRows {
        let was_paused = std::mem::replace(&mut self.paused, true);
        let cleared = line_clear::clear_full_rows(&mut self.registry, &mut self.score);
        self.paused = was_paused;
        cleared
    }

    fn finish_game(&mut self) {
        self.game_over = true;
        self.active = None;
        self.drop_timer_ms = 0;
        info!(
            score = self.score.value(),
            rows = self.rows_cleared,
            "game over"
        );
        self.events.push(GameEvent::GameOver {
            score: self.score.value(),
        });
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        for row in out.board.iter_mut() {
            row.fill(0);
        }
        for cell in self.registry.cells() {
            let (x, y) = cell.position();
            if (0..FIELD_WIDTH).contains(&x) && (0..FIELD_HEIGHT).contains(&y) {
                out.board[y as usize][x as usize] = color_code(cell.color());
            }
        }

        out.active.clear();
        if let Some(group) = &self.active {
            out.active.extend(group.cells().iter().map(CellSnapshot::from));
        }

        out.score = self.score.value();
        out.rows_cleared = self.rows_cleared;
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.started = self.started;
        out.episode_id = self.episode_id;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ROW_CLEAR_SCORE;

    const BOTTOM: i32 = FIELD_HEIGHT - 1;

    /// Started game with an empty field and no active group.
    fn empty_game() -> GameState {
        let mut state = GameState::new(12345);
        state.start().unwrap();
        state.active = None;
        state.events.clear();
        state
    }

    fn drop_to_floor(state: &mut GameState) {
        while state.move_down().unwrap() {}
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert!(!state.started);
        assert!(!state.paused);
        assert!(!state.game_over);
        assert_eq!(state.score(), 0);
        assert!(state.active.is_none());
        assert!(state.registry.is_empty());
    }

    #[test]
    fn test_start_spawns_group() {
        let mut state = GameState::new(12345);
        state.start().unwrap();

        assert!(state.started);
        assert!(state.active.is_some());
        assert!(matches!(
            state.take_events().as_slice(),
            [GameEvent::Spawned { .. }]
        ));
    }

    #[test]
    fn test_restart_increments_episode_and_clears_board() {
        let mut state = GameState::new(12345);
        state.start().unwrap();
        state.registry.insert(&[(4, 10)], BlockColor::Red).unwrap();
        state.score.update(30);

        assert!(state.apply_action(GameAction::Start).unwrap());
        assert_eq!(state.episode_id, 1);
        assert_eq!(state.score(), 0);
        assert!(state.registry.is_empty());
    }

    #[test]
    fn test_tick_drops_after_interval() {
        let mut state = empty_game();
        state.spawn_next(ShapeKind::Square, BlockColor::Red).unwrap();

        assert!(!state.tick(DROP_INTERVAL_MS - 1).unwrap());
        assert_eq!(state.active.as_ref().unwrap().min_y(), 0);

        assert!(state.tick(1).unwrap());
        assert_eq!(state.active.as_ref().unwrap().min_y(), 1);
        assert_eq!(state.drop_timer_ms, 0);
    }

    #[test]
    fn test_tick_steps_once_per_elapsed_interval() {
        let mut state = empty_game();
        state.spawn_next(ShapeKind::Square, BlockColor::Red).unwrap();

        assert!(state.tick(2 * DROP_INTERVAL_MS).unwrap());
        assert_eq!(state.active.as_ref().unwrap().min_y(), 2);
        assert_eq!(state.drop_timer_ms, 0);
    }

    #[test]
    fn test_tick_carries_leftover_time() {
        let mut state = empty_game();
        state.spawn_next(ShapeKind::Square, BlockColor::Red).unwrap();

        // 44 frames of 16 ms cross the interval once with 4 ms to spare.
        let mut steps = 0;
        for _ in 0..44 {
            if state.tick(16).unwrap() {
                steps += 1;
            }
        }
        assert_eq!(steps, 1);
        assert_eq!(state.drop_timer_ms, 44 * 16 - DROP_INTERVAL_MS);

        // The second interval completes after 1400 ms in total, not 1404.
        for _ in 0..43 {
            state.tick(16).unwrap();
        }
        assert_eq!(state.active.as_ref().unwrap().min_y(), 1);
        state.tick(8).unwrap();
        assert_eq!(state.active.as_ref().unwrap().min_y(), 2);
    }

    #[test]
    fn test_long_tick_stops_at_freeze() {
        let mut state = empty_game();
        state.spawn_next(ShapeKind::Square, BlockColor::Red).unwrap();

        // Far more intervals than rows: the square lands once and the
        // freshly spawned group stays at the top.
        assert!(state.tick(DROP_INTERVAL_MS * 40).unwrap());
        assert_eq!(state.registry.cell_count(), 4);
        assert!(state.registry.is_occupied(0, BOTTOM));
        assert_eq!(state.active.as_ref().unwrap().min_y(), 0);
        assert_eq!(state.drop_timer_ms, 0);
    }

    #[test]
    fn test_drop_timer_runs_through_pause() {
        let mut state = empty_game();
        state.spawn_next(ShapeKind::Square, BlockColor::Red).unwrap();

        assert!(!state.tick(600).unwrap());
        state.apply_action(GameAction::Pause).unwrap();
        // The interval firing at 700 ms is skipped.
        assert!(!state.tick(600).unwrap());
        state.apply_action(GameAction::Pause).unwrap();

        assert!(!state.tick(100).unwrap());
        assert_eq!(state.active.as_ref().unwrap().min_y(), 0);
        assert!(state.tick(100).unwrap());
        assert_eq!(state.active.as_ref().unwrap().min_y(), 1);
    }

    #[test]
    fn test_pause_suspends_input_and_gravity() {
        let mut state = empty_game();
        state.spawn_next(ShapeKind::Square, BlockColor::Red).unwrap();
        let before = state.active.as_ref().unwrap().positions();

        assert!(state.apply_action(GameAction::Pause).unwrap());
        assert!(!state.apply_action(GameAction::MoveRight).unwrap());
        assert!(!state.apply_action(GameAction::MoveDown).unwrap());
        assert!(!state.apply_action(GameAction::Rotate).unwrap());
        assert!(!state.tick(DROP_INTERVAL_MS * 3).unwrap());
        assert_eq!(state.active.as_ref().unwrap().positions(), before);

        assert!(state.apply_action(GameAction::Pause).unwrap());
        assert!(state.apply_action(GameAction::MoveRight).unwrap());
    }

    #[test]
    fn test_freeze_spawns_next_group() {
        let mut state = empty_game();
        state.spawn_next(ShapeKind::Square, BlockColor::Red).unwrap();
        drop_to_floor(&mut state);

        assert_eq!(state.registry.groups().len(), 1);
        assert!(state.registry.groups()[0].is_frozen());
        assert!(state.active.is_some());

        let events = state.take_events();
        assert_eq!(events[1], GameEvent::BlockFrozen);
        assert!(matches!(events[2], GameEvent::Spawned { .. }));
    }

    #[test]
    fn test_freeze_clears_completed_row() {
        let mut state = empty_game();
        let row: Vec<(i32, i32)> = (2..FIELD_WIDTH).map(|x| (x, BOTTOM)).collect();
        state.registry.insert(&row, BlockColor::Blue).unwrap();

        // Square fills columns 0-1 on the two bottom rows.
        state.spawn_next(ShapeKind::Square, BlockColor::Red).unwrap();
        drop_to_floor(&mut state);

        assert_eq!(state.score(), ROW_CLEAR_SCORE);
        assert_eq!(state.rows_cleared(), 1);
        assert!(state.registry.is_occupied(0, BOTTOM));
        assert!(state.registry.is_occupied(1, BOTTOM));
        assert_eq!(state.registry.cell_count(), 2);
        assert!(!state.paused);
        assert!(state
            .take_events()
            .contains(&GameEvent::RowsCleared { count: 1 }));
    }

    #[test]
    fn test_overwhelmed_freeze_ends_game_without_clearing() {
        let mut state = empty_game();
        // Column stack reaching row 2 under the spawn area.
        let column: Vec<(i32, i32)> = (2..FIELD_HEIGHT).map(|y| (0, y)).collect();
        state.registry.insert(&column, BlockColor::Blue).unwrap();

        state.spawn_next(ShapeKind::Square, BlockColor::Red).unwrap();
        assert!(!state.move_down().unwrap());

        assert!(state.game_over);
        assert!(state.active.is_none());
        assert!(state
            .take_events()
            .contains(&GameEvent::GameOver { score: 0 }));
        assert!(!state.apply_action(GameAction::MoveLeft).unwrap());
        assert!(!state.tick(DROP_INTERVAL_MS).unwrap());
    }

    #[test]
    fn test_spawn_blocked_ends_game() {
        let mut state = empty_game();
        state.registry.insert(&[(1, 1)], BlockColor::Blue).unwrap();

        let spawned = state.spawn_next(ShapeKind::Tee, BlockColor::Red).unwrap();
        assert!(spawned.is_none());
        assert!(state.game_over);
        assert_eq!(state.take_events(), vec![GameEvent::GameOver { score: 0 }]);
    }

    #[test]
    fn test_rotation_landing_runs_freeze_sequence() {
        let mut state = empty_game();
        state.spawn_next(ShapeKind::Tee, BlockColor::Red).unwrap();
        // Rest the flat tee on the floor, then rotate it into three rows.
        for _ in 0..(BOTTOM - 1) {
            assert!(state.move_down().unwrap());
        }
        assert!(!state.rotate().unwrap());

        assert_eq!(state.registry.groups().len(), 1);
        assert_eq!(state.registry.groups()[0].max_y(), BOTTOM);
        assert!(state.active.is_some());
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = empty_game();
        state.registry.insert(&[(9, BOTTOM)], BlockColor::Purple).unwrap();
        state.spawn_next(ShapeKind::Skew, BlockColor::Green).unwrap();

        let snap = state.snapshot();
        assert_eq!(snap.settled_at(9, BOTTOM), Some(BlockColor::Purple));
        assert_eq!(snap.active.len(), 4);
        assert_eq!(snap.active_at(1, 2), Some(BlockColor::Green));
        assert!(snap.playable());
    }
}
