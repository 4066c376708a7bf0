//! Shared types and constants for blockfall.
//!
//! Everything here is plain data with no external dependencies, so the same
//! definitions can be used by the simulation core, the terminal front-end and
//! any other renderer that consumes game snapshots.
//!
//! # Field
//!
//! The playfield is a fixed 10 x 15 grid. Coordinates are `(x, y)` with `x`
//! growing to the right and `y` growing downwards; row `0` is the top row.
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DROP_INTERVAL_MS` | 700 | Auto-drop interval of the active group |
//! | `TICK_MS` | 16 | Frame step used by the terminal runner |
//! | `BLINK_INTERVAL_MS` | 1000 | Block blink period (rendering only) |
//! | `BACKGROUND_CHANGE_INTERVAL_MS` | 5000 | Background color cycle (rendering only) |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, ShapeKind, FIELD_HEIGHT, FIELD_WIDTH};
//!
//! assert_eq!(FIELD_WIDTH, 10);
//! assert_eq!(FIELD_HEIGHT, 15);
//!
//! assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
//! assert_eq!(ShapeKind::Square.offsets().len(), 4);
//! ```

/// Field width in cells.
pub const FIELD_WIDTH: i32 = 10;

/// Field height in cells.
pub const FIELD_HEIGHT: i32 = 15;

/// Interval between two automatic `move_down` calls on the active group.
pub const DROP_INTERVAL_MS: u32 = 700;

/// Points awarded per cleared row.
pub const ROW_CLEAR_SCORE: u32 = 10;

/// Fixed frame step of the terminal runner (~60 FPS).
pub const TICK_MS: u32 = 16;

/// Period of the block blink animation.
pub const BLINK_INTERVAL_MS: u32 = 1000;

/// Period of the background color cycle.
pub const BACKGROUND_CHANGE_INTERVAL_MS: u32 = 5000;

/// Block colors, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockColor {
    Red,
    Orange,
    Yellow,
    Green,
    LightSkyBlue,
    Blue,
    Purple,
}

impl BlockColor {
    /// Number of colors in the catalog.
    pub const COUNT: usize = 7;

    /// All colors, indexed by [`BlockColor::index`].
    pub const ALL: [BlockColor; Self::COUNT] = [
        BlockColor::Red,
        BlockColor::Orange,
        BlockColor::Yellow,
        BlockColor::Green,
        BlockColor::LightSkyBlue,
        BlockColor::Blue,
        BlockColor::Purple,
    ];

    /// Look up a color by catalog index.
    ///
    /// ```
    /// use blockfall_types::BlockColor;
    ///
    /// assert_eq!(BlockColor::from_index(0), Some(BlockColor::Red));
    /// assert_eq!(BlockColor::from_index(7), None);
    /// ```
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(&self) -> usize {
        match self {
            BlockColor::Red => 0,
            BlockColor::Orange => 1,
            BlockColor::Yellow => 2,
            BlockColor::Green => 3,
            BlockColor::LightSkyBlue => 4,
            BlockColor::Blue => 5,
            BlockColor::Purple => 6,
        }
    }

    /// CSS-style color name.
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockColor::Red => "red",
            BlockColor::Orange => "orange",
            BlockColor::Yellow => "yellow",
            BlockColor::Green => "green",
            BlockColor::LightSkyBlue => "lightskyblue",
            BlockColor::Blue => "blue",
            BlockColor::Purple => "purple",
        }
    }
}

/// The fixed shape catalog.
///
/// Offsets are absolute spawn coordinates, listed in definition order. That
/// order is the cell order of every group spawned from the template.
///
/// - **Tee**: three across with one hanging from the middle
/// - **Square**: 2x2 block
/// - **Ell**: three across with one hanging from the right end
/// - **Slab**: 3x2 rectangle (six cells)
/// - **Skew**: vertical S
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Tee,
    Square,
    Ell,
    Slab,
    Skew,
}

const TEE: [(i32, i32); 4] = [(0, 0), (1, 0), (2, 0), (1, 1)];
const SQUARE: [(i32, i32); 4] = [(0, 0), (0, 1), (1, 0), (1, 1)];
const ELL: [(i32, i32); 4] = [(0, 0), (1, 0), (2, 0), (2, 1)];
const SLAB: [(i32, i32); 6] = [(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)];
const SKEW: [(i32, i32); 4] = [(0, 0), (0, 1), (1, 1), (1, 2)];

impl ShapeKind {
    /// Number of templates in the catalog.
    pub const COUNT: usize = 5;

    pub const ALL: [ShapeKind; Self::COUNT] = [
        ShapeKind::Tee,
        ShapeKind::Square,
        ShapeKind::Ell,
        ShapeKind::Slab,
        ShapeKind::Skew,
    ];

    /// Spawn coordinates of the template's cells.
    pub fn offsets(&self) -> &'static [(i32, i32)] {
        match self {
            ShapeKind::Tee => &TEE,
            ShapeKind::Square => &SQUARE,
            ShapeKind::Ell => &ELL,
            ShapeKind::Slab => &SLAB,
            ShapeKind::Skew => &SKEW,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parse a shape name (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "tee" => Some(ShapeKind::Tee),
            "square" => Some(ShapeKind::Square),
            "ell" => Some(ShapeKind::Ell),
            "slab" => Some(ShapeKind::Slab),
            "skew" => Some(ShapeKind::Skew),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Tee => "tee",
            ShapeKind::Square => "square",
            ShapeKind::Ell => "ell",
            ShapeKind::Slab => "slab",
            ShapeKind::Skew => "skew",
        }
    }
}

/// Commands accepted by the game controller.
///
/// Movement commands are idempotent no-ops while the game is paused, over,
/// or has no active group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move the active group one cell left
    MoveLeft,
    /// Move the active group one cell right
    MoveRight,
    /// Move the active group one cell down (freezes it when blocked)
    MoveDown,
    /// Rotate the active group by 90 degrees
    Rotate,
    /// Toggle pause
    Pause,
    /// Start a new game (also restarts after game over)
    Start,
}

impl GameAction {
    /// Parse an action name (case-insensitive).
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("movedown"), Some(GameAction::MoveDown));
    /// assert_eq!(GameAction::from_str("start"), Some(GameAction::Start));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "movedown" => Some(GameAction::MoveDown),
            "rotate" => Some(GameAction::Rotate),
            "pause" => Some(GameAction::Pause),
            "start" => Some(GameAction::Start),
            _ => None,
        }
    }

    /// camelCase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::MoveDown => "moveDown",
            GameAction::Rotate => "rotate",
            GameAction::Pause => "pause",
            GameAction::Start => "start",
        }
    }
}

/// Signals emitted by the controller, drained by the surrounding layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A new active group entered the field.
    Spawned { shape: ShapeKind, color: BlockColor },
    /// The active group froze without overwhelming the field.
    BlockFrozen,
    /// Rows were cleared after a freeze (cascades included).
    RowsCleared { count: u32 },
    /// The game ended, either overwhelmed or blocked at spawn.
    GameOver { score: u32 },
}
