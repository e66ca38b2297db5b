//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no game logic, making them usable in any
//! context (catalog generation, the session state machine, host binaries).
//!
//! # Piece sizes
//!
//! A piece of size `N` is a one-sided polyomino made of `N` cells. Sizes
//! range over `1..=30`; [`ONE_SIDED_POLYOMINO_COUNTS`] holds the number of
//! distinct shapes per size (OEIS A000988) and is the termination target of
//! catalog generation.
//!
//! | N | Shapes |
//! |---|--------|
//! | 1 | 1 |
//! | 2 | 1 |
//! | 3 | 2 |
//! | 4 | 7 |
//! | 5 | 18 |
//! | 6 | 60 |
//! | 7 | 196 |
//! | 8 | 704 |
//!
//! # Examples
//!
//! ```
//! use polyominomania_types::{
//!     one_sided_count, ColorScheme, GameAction, PieceName, SupplyStrategy,
//! };
//!
//! // The seven tetrominoes
//! assert_eq!(one_sided_count(4), Some(7));
//! assert_eq!(one_sided_count(31), None);
//!
//! // Parse from string (case-insensitive)
//! assert_eq!(PieceName::from_str("T"), Some(PieceName::T));
//! assert_eq!(ColorScheme::from_str("retro"), Some(ColorScheme::Retro));
//! assert_eq!(SupplyStrategy::from_str("jit"), Some(SupplyStrategy::JustInTime));
//!
//! // Parse a game action
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//! ```

pub mod config;

pub use config::{GameConfig, PolyominoConfig, ScoringConfig};

use serde::{Deserialize, Serialize};

/// Largest supported piece size.
pub const MAX_PIECE_SIZE: u8 = 30;

/// Maximum number of upcoming pieces kept in the preview queue.
pub const MAX_LOOKAHEAD: usize = 4;

/// Alpha applied to ghost-piece cells.
pub const GHOST_ALPHA: u8 = 100;

/// A piece that locks with any cell in rows `0..TOP_OUT_MARGIN` ends the
/// session instead of joining the stack.
pub const TOP_OUT_MARGIN: i16 = 3;

/// Number of one-sided polyominoes with n cells (https://oeis.org/A000988).
///
/// Index 0 is unused. Values past ~12 are far beyond what random generation
/// can enumerate in bounded time.
pub const ONE_SIDED_POLYOMINO_COUNTS: [u64; 31] = [
    0,
    1,
    1,
    2,
    7,
    18,
    60,
    196,
    704,
    2500,
    9189,
    33896,
    126759,
    476270,
    1802312,
    6849777,
    26152418,
    100203194,
    385221143,
    1485200848,
    5741256764,
    22245940545,
    86383382827,
    336093325058,
    1309998125640,
    5114451441106,
    19998172734786,
    78306011677182,
    307022182222506,
    1205243866707468,
    4736694001644862,
];

/// Target shape count for a piece size, or `None` outside `1..=30`.
pub fn one_sided_count(size: u8) -> Option<u64> {
    if size == 0 || size > MAX_PIECE_SIZE {
        return None;
    }
    Some(ONE_SIDED_POLYOMINO_COUNTS[size as usize])
}


/// Canonical names of the seven classical size-4 pieces.
///
/// Every piece is coloured through one of these letters; shapes of other
/// sizes borrow a random letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceName {
    O,
    I,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceName {
    /// All names in palette order.
    pub const ALL: [PieceName; 7] = [
        PieceName::O,
        PieceName::I,
        PieceName::T,
        PieceName::S,
        PieceName::Z,
        PieceName::J,
        PieceName::L,
    ];

    /// Parse piece name from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use polyominomania_types::PieceName;
    ///
    /// assert_eq!(PieceName::from_str("i"), Some(PieceName::I));
    /// assert_eq!(PieceName::from_str("O"), Some(PieceName::O));
    /// assert_eq!(PieceName::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "o" => Some(PieceName::O),
            "i" => Some(PieceName::I),
            "t" => Some(PieceName::T),
            "s" => Some(PieceName::S),
            "z" => Some(PieceName::Z),
            "j" => Some(PieceName::J),
            "l" => Some(PieceName::L),
            _ => None,
        }
    }

    /// Lowercase one-letter identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceName::O => "o",
            PieceName::I => "i",
            PieceName::T => "t",
            PieceName::S => "s",
            PieceName::Z => "z",
            PieceName::J => "j",
            PieceName::L => "l",
        }
    }
}

/// A four-channel colour (red, green, blue, alpha).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    /// Build a colour from a `0xRRGGBB` triplet with the given alpha.
    pub const fn from_rgb_hex(hex: u32, alpha: u8) -> Self {
        Self([(hex >> 16) as u8, (hex >> 8) as u8, hex as u8, alpha])
    }

    pub fn alpha(&self) -> u8 {
        self.0[3]
    }

    /// Same colour with a different alpha channel.
    pub fn with_alpha(self, alpha: u8) -> Self {
        let [r, g, b, _] = self.0;
        Self([r, g, b, alpha])
    }
}

/// Named colour palettes.
///
/// | Name | o | i | t | s | z | j | l |
/// |------|---|---|---|---|---|---|---|
/// | original | ffff00 | 00ffff | aa00ff | 00ff00 | ff0000 | 0000ff | ffa500 |
/// | retro | ff906b | 666547 | 6fcb9f | ffe28a | fffeb3 | f9402f | 96d5ff |
/// | bootstrap | f0ad41 | 5cb85c | d9534f | fff7f4 | 5bc0de | 6c5196 | 428bca |
/// | gray | 444444 | 666666 | 888888 | aaaaaa | cccccc | e8e8e8 | ffffff |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    Original,
    Retro,
    Bootstrap,
    Gray,
}

impl ColorScheme {
    pub const ALL: [ColorScheme; 4] = [
        ColorScheme::Original,
        ColorScheme::Retro,
        ColorScheme::Bootstrap,
        ColorScheme::Gray,
    ];

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "original" => Some(ColorScheme::Original),
            "retro" => Some(ColorScheme::Retro),
            "bootstrap" => Some(ColorScheme::Bootstrap),
            "gray" => Some(ColorScheme::Gray),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorScheme::Original => "original",
            ColorScheme::Retro => "retro",
            ColorScheme::Bootstrap => "bootstrap",
            ColorScheme::Gray => "gray",
        }
    }

    /// RGB triplets indexed in [`PieceName::ALL`] order.
    fn palette(&self) -> [u32; 7] {
        match self {
            ColorScheme::Original => [
                0xffff00, 0x00ffff, 0xaa00ff, 0x00ff00, 0xff0000, 0x0000ff, 0xffa500,
            ],
            ColorScheme::Retro => [
                0xff906b, 0x666547, 0x6fcb9f, 0xffe28a, 0xfffeb3, 0xf9402f, 0x96d5ff,
            ],
            ColorScheme::Bootstrap => [
                0xf0ad41, 0x5cb85c, 0xd9534f, 0xfff7f4, 0x5bc0de, 0x6c5196, 0x428bca,
            ],
            ColorScheme::Gray => [
                0x444444, 0x666666, 0x888888, 0xaaaaaa, 0xcccccc, 0xe8e8e8, 0xffffff,
            ],
        }
    }

    /// Fully opaque colour of a piece name in this palette.
    pub fn color_of(&self, name: PieceName) -> Rgba {
        let index = PieceName::ALL
            .iter()
            .position(|&n| n == name)
            .unwrap_or_default();
        Rgba::from_rgb_hex(self.palette()[index], 0xff)
    }
}

/// Names of every palette, in declaration order.
pub fn supported_color_schemes() -> [&'static str; 4] {
    ColorScheme::ALL.map(|scheme| scheme.as_str())
}

/// How the next piece of a given size is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SupplyStrategy {
    /// Uniform draw from the full catalog, with replacement.
    #[serde(rename = "random")]
    Random,
    /// Each catalog shape exactly once per shuffled cycle.
    #[serde(rename = "bag")]
    Bag,
    /// Generate on demand; no catalog and no uniqueness guarantee.
    #[serde(rename = "jit")]
    JustInTime,
}

impl SupplyStrategy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "random" => Some(SupplyStrategy::Random),
            "bag" => Some(SupplyStrategy::Bag),
            "jit" => Some(SupplyStrategy::JustInTime),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SupplyStrategy::Random => "random",
            SupplyStrategy::Bag => "bag",
            SupplyStrategy::JustInTime => "jit",
        }
    }

    /// Whether this strategy draws from a pre-built catalog.
    pub fn needs_catalog(&self) -> bool {
        !matches!(self, SupplyStrategy::JustInTime)
    }
}

/// Discrete requests accepted by a session.
///
/// These are used by human input, scripted play and the gravity timer alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Move one row down with the soft-drop bonus, locking if blocked
    SoftDrop,
    /// Drop to the resting position and lock
    HardDrop,
    /// Gravity step: one row down without bonus, locking if blocked
    Tick,
    /// Toggle pause state
    Pause,
}

impl GameAction {
    /// Parse action from string (camelCase, case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use polyominomania_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotateCcw"), Some(GameAction::RotateCcw));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "tick" => Some(GameAction::Tick),
            "pause" => Some(GameAction::Pause),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Tick => "tick",
            GameAction::Pause => "pause",
        }
    }
}

/// Result of applying a [`GameAction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ActionOutcome {
    /// The request changed the session.
    Applied,
    /// Out of bounds, colliding, paused or already over; nothing changed.
    Rejected,
    /// The active piece locked and the next one spawned.
    Locked { lines_cleared: u32 },
    /// The active piece locked and the next spawn collided; the session ended.
    ToppedOut,
}

impl ActionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionOutcome::Applied => "applied",
            ActionOutcome::Rejected => "rejected",
            ActionOutcome::Locked { .. } => "locked",
            ActionOutcome::ToppedOut => "topped_out",
        }
    }

    /// Whether the request had any effect.
    pub fn is_applied(&self) -> bool {
        !matches!(self, ActionOutcome::Rejected)
    }
}

/// Core-side event recorded after a piece locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LockEvent {
    /// Rows removed by this lock's cascade.
    pub lines_cleared: u32,
    /// Points awarded for those rows.
    pub line_clear_score: u64,
    /// Level increments triggered by this lock.
    pub levels_gained: u32,
    pub topped_out: bool,
}

/// A cell on the grid
///
/// - `None`: Empty cell
/// - `Some(Rgba)`: Locked block of the given colour
pub type Cell = Option<Rgba>;
