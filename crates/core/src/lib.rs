//! Core game logic module - pure, deterministic, and testable
//!
//! This crate holds the level/scoring session of the waste sorting game.
//! It has **zero dependencies** on rendering, physics, audio or terminal I/O:
//!
//! - **Deterministic**: the same seed produces the same item sequence
//! - **Testable**: every rule is a plain function over [`SessionState`]
//! - **Host-agnostic**: outward consequences are returned as [`Effect`]s
//!
//! # Module Structure
//!
//! - [`config`]: level table, clocks, speeds and score deltas
//! - [`item`]: waste items, bins and the standard bin layout
//! - [`session`]: session state, effects and item lifecycle helpers
//! - [`scheduler`]: level queue and per-tick item release
//! - [`judge`]: bin selection and scoring of dropped items
//! - [`progression`]: level entry, level completion and clock expiry
//! - [`game_state`]: [`GameSession`], the single dispatch entry point
//! - [`rng`]: seeded item source and a scripted source for tests
//!
//! # Game Rules
//!
//! - Items fall one per second; the player drags each into a bin
//! - Matching bin: +10. Wrong bin: -5, never below zero
//! - Reaching the level target wins the level; the clock reaching zero first
//!   ends the game
//! - Five levels with targets 250/300/400/500/550; clearing level 5
//!   completes the game
//!
//! # Example
//!
//! ```
//! use waste_drop_core::{BinSet, GameConfig, GameSession, SessionEvent, SimpleRng};
//! use waste_drop_core::types::{LevelInit, LevelPhase};
//!
//! let mut effects = Vec::new();
//! let mut game = GameSession::begin(
//!     GameConfig::default(),
//!     BinSet::default(),
//!     SimpleRng::new(12345),
//!     LevelInit::default(),
//!     &mut effects,
//! );
//!
//! let epoch = game.state().timer_epoch();
//! game.dispatch(SessionEvent::DropTick { epoch }, &mut effects);
//! game.dispatch(SessionEvent::CountdownTick { epoch }, &mut effects);
//!
//! assert_eq!(game.state().phase(), LevelPhase::Active);
//! assert_eq!(game.state().time_remaining(), 59);
//! ```
//!
//! # Timing
//!
//! The core has no clock of its own. The host registers two periodic
//! timers when it sees [`Effect::StartTimers`] and reports them back as
//! `CountdownTick` / `DropTick` events carrying the timer epoch. The two
//! handlers commute, so their relative order within a frame does not matter.

pub mod config;
pub mod game_state;
pub mod item;
pub mod judge;
pub mod progression;
pub mod rng;
pub mod scheduler;
pub mod session;
pub mod snapshot;

pub use waste_drop_types as types;

// Re-export commonly used types for convenience
pub use config::{ConfigError, GameConfig};
pub use game_state::{GameSession, Response, SessionEvent};
pub use item::{Bin, BinSet, WasteItem};
pub use judge::{select_bin, Verdict};
pub use rng::{ScriptedSource, SimpleRng, WasteSource};
pub use session::{Effect, Feedback, FeedbackTone, Release, SessionOutcome, SessionState};
pub use snapshot::SessionSnapshot;
