//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! The types are plain data with no behaviour beyond small conversions and
//! geometry helpers, so they can be shared by the core session logic, the
//! host engine, the input layer and the terminal renderer.
//!
//! # World Dimensions
//!
//! Everything is laid out in a fixed 360x640 world (portrait phone size).
//! World units are independent of the terminal size; the renderer scales.
//!
//! # Game Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed host timestep (~60 FPS) |
//! | `DROP_INTERVAL_MS` | 1000 | One waste item released per interval |
//! | `COUNTDOWN_INTERVAL_MS` | 1000 | Level clock resolution |
//! | `FEEDBACK_MS` | 1000 | Lifetime of a "Correct!"/"Wrong bin!" message |
//!
//! # Level Table
//!
//! | Level | Target | Time budget |
//! |-------|--------|-------------|
//! | 1 | 250 | 60s |
//! | 2 | 300 | 55s |
//! | 3 | 400 | 50s |
//! | 4 | 500 | 45s |
//! | 5 | 550 | 40s |
//!
//! The time budget is `max(30, 60 - (level - 1) * 5)`.
//!
//! # Examples
//!
//! ```
//! use waste_drop_types::{Category, Rect, LEVEL_TARGETS};
//!
//! assert_eq!(Category::ALL[1], Category::Organic);
//!
//! let a = Rect::new(0.0, 0.0, 10.0, 10.0);
//! let b = Rect::new(5.0, 5.0, 10.0, 10.0);
//! assert!(a.intersects(&b));
//!
//! assert_eq!(LEVEL_TARGETS[0], 250);
//! ```

use serde::{Deserialize, Serialize};

/// World width in world units.
pub const WORLD_WIDTH: f32 = 360.0;

/// World height in world units.
pub const WORLD_HEIGHT: f32 = 640.0;

/// Fixed host timestep in milliseconds.
pub const TICK_MS: u32 = 16;

/// Interval between two waste item releases.
pub const DROP_INTERVAL_MS: u32 = 1000;

/// Interval of the level countdown.
pub const COUNTDOWN_INTERVAL_MS: u32 = 1000;

/// Points for dropping an item into the matching bin.
pub const CORRECT_REWARD: u32 = 10;

/// Points taken for dropping an item into the wrong bin (score floors at 0).
pub const WRONG_PENALTY: u32 = 5;

/// Fall speed of released items at level 1 (units per second).
pub const BASE_DROP_SPEED: f32 = 150.0;

/// Fall speed added per level.
pub const DROP_SPEED_STEP: f32 = 50.0;

/// Target score per level, index 0 = level 1.
pub const LEVEL_TARGETS: [u32; 5] = [250, 300, 400, 500, 550];

/// Last playable level.
pub const MAX_LEVEL: u32 = LEVEL_TARGETS.len() as u32;

/// Time budget of level 1 in seconds.
pub const BASE_TIME_SECS: u32 = 60;

/// Seconds removed from the time budget per level.
pub const TIME_STEP_SECS: u32 = 5;

/// Time budget floor in seconds.
pub const MIN_TIME_SECS: u32 = 30;

/// Display size (square) of a waste item.
pub const ITEM_SIZE: f32 = 80.0;

/// Items spawn with their center at least this far from the side walls.
pub const SPAWN_MARGIN: f32 = 50.0;

/// Sprite variants available per category.
pub const VARIANTS_PER_CATEGORY: u8 = 3;

/// Bin display width.
pub const BIN_WIDTH: f32 = 100.0;

/// Bin display height.
pub const BIN_HEIGHT: f32 = 250.0;

/// Bin centers sit this far above the bottom of the world.
pub const BIN_BOTTOM_OFFSET: f32 = 50.0;

/// Horizontal bin centers as fractions of the world width.
pub const BIN_COLUMNS: [f32; 3] = [0.2, 0.5, 0.8];

/// Arcade gravity (units per second squared).
pub const GRAVITY_Y: f32 = 200.0;

/// Restitution when an item hits a world wall.
pub const BOUNCE: f32 = 0.2;

/// Releasing a dragged item with its center this close to the floor lands it.
pub const GROUND_BAND: f32 = 50.0;

/// Items touching the floor with their center this close to it are removed.
pub const FLOOR_REMOVE_BAND: f32 = 100.0;

/// Lifetime of a feedback message.
pub const FEEDBACK_MS: u32 = 1000;

/// Distance a feedback message rises while fading.
pub const FEEDBACK_RISE: f32 = 50.0;

/// Background music volume at startup (0.0..=1.0).
pub const DEFAULT_MUSIC_VOLUME: f32 = 0.1;

/// Volume slider step in percent.
pub const VOLUME_STEP_PERCENT: u8 = 5;

/// Pause button region (center x, center y, size).
pub const PAUSE_BUTTON: (f32, f32, f32) = (330.0, 25.0, 40.0);


/// The fixed waste classifications.
///
/// Each item and each bin carries exactly one category. The canonical order
/// (recyclable, organic, hazardous) is also the left-to-right bin order and
/// the tie-break order of the classification judge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Recyclable,
    Organic,
    Hazardous,
}

impl Category {
    /// All categories in canonical order.
    pub const ALL: [Category; 3] = [Category::Recyclable, Category::Organic, Category::Hazardous];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Recyclable => "recyclable",
            Category::Organic => "organic",
            Category::Hazardous => "hazardous",
        }
    }

    /// Position in [`Category::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Category::Recyclable => 0,
            Category::Organic => 1,
            Category::Hazardous => 2,
        }
    }
}

/// Identity of a waste item within one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u32);

/// Placement status of a waste item.
///
/// `Pending -> Falling -> (Classified | Landed | Removed)`, and
/// `Landed -> Removed` once the item reaches the floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemStatus {
    /// Queued, not yet released into the playfield.
    Pending,
    /// Released and in play; can be dragged and classified.
    Falling,
    /// Dropped into the ground band; no longer draggable.
    Landed,
    /// Scored against a bin and taken out of play.
    Classified,
    /// Taken out of play without scoring.
    Removed,
}

impl ItemStatus {
    pub fn in_play(&self) -> bool {
        matches!(self, ItemStatus::Falling)
    }
}

/// Phase of the level/scoring state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LevelPhase {
    /// Gameplay running: timers fire, items fall, placements score.
    Active,
    /// Target reached; transient while the level is torn down.
    Won,
    /// Level-complete summary is showing, waiting for "continue".
    Transitioning,
    /// Clock hit zero before the target; transient.
    TimeExpired,
    /// Terminal: time ran out.
    GameOver,
    /// Terminal: every level cleared.
    Completed,
}

impl LevelPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, LevelPhase::GameOver | LevelPhase::Completed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LevelPhase::Active => "active",
            LevelPhase::Won => "won",
            LevelPhase::Transitioning => "transitioning",
            LevelPhase::TimeExpired => "time_expired",
            LevelPhase::GameOver => "game_over",
            LevelPhase::Completed => "completed",
        }
    }
}

/// Axis-aligned rectangle in world units (top-left origin).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Build a rectangle from its center point.
    pub fn from_center(cx: f32, cy: f32, w: f32, h: f32) -> Self {
        Self {
            x: cx - w / 2.0,
            y: cy - h / 2.0,
            w,
            h,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }

    /// Rectangle-to-rectangle overlap test.
    ///
    /// Degenerate rectangles (non-positive width or height) never intersect;
    /// shared edges count as overlap.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.w <= 0.0 || self.h <= 0.0 || other.w <= 0.0 || other.h <= 0.0 {
            return false;
        }
        !(self.right() < other.x
            || self.bottom() < other.y
            || self.x > other.right()
            || self.y > other.bottom())
    }

    /// Area of the intersection (0.0 when disjoint or only touching).
    pub fn overlap_area(&self, other: &Rect) -> f32 {
        let w = self.right().min(other.right()) - self.x.max(other.x);
        let h = self.bottom().min(other.bottom()) - self.y.max(other.y);
        if w <= 0.0 || h <= 0.0 {
            0.0
        } else {
            w * h
        }
    }
}

/// Immutable `(level, score)` snapshot handed to non-gameplay screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ScoreCard {
    pub level: u32,
    pub score: u32,
}

/// Payload used to start the gameplay screen.
///
/// Missing or out-of-range values fall back to level 1 and score 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LevelInit {
    pub level: Option<u32>,
    pub score: Option<u32>,
}

impl LevelInit {
    pub fn at_level(level: u32) -> Self {
        Self {
            level: Some(level),
            score: None,
        }
    }

    /// Resolve to a concrete `(level, score)` pair.
    ///
    /// An invalid level resets both fields to their defaults.
    pub fn resolve(&self, max_level: u32) -> (u32, u32) {
        match self.level {
            Some(level) if (1..=max_level).contains(&level) => (level, self.score.unwrap_or(0)),
            _ => (1, 0),
        }
    }

    /// Whether [`LevelInit::resolve`] had to substitute defaults.
    pub fn is_defaulted(&self, max_level: u32) -> bool {
        !matches!(self.level, Some(level) if (1..=max_level).contains(&level))
    }
}

/// UI-level actions produced by the input layer.
///
/// Menus use navigation actions; gameplay uses `Grab`, `Pause` and the
/// directional actions to move a held item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    Up,
    Down,
    Left,
    Right,
    Confirm,
    Back,
    /// Grab the lowest falling item, or release the held one.
    Grab,
    Pause,
    /// Menu shortcut by 1-based index.
    Select(u8),
    Quit,
}

/// Phase of a pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Drag,
    Up,
}

/// Pointer event in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub x: f32,
    pub y: f32,
}

impl PointerEvent {
    pub fn new(phase: PointerPhase, x: f32, y: f32) -> Self {
        Self { phase, x, y }
    }
}
