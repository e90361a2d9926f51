//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::UiAction`] and mouse
//! events into cell-space pointer gestures. Converting cells to world
//! coordinates is the renderer's job, since only it knows the layout.

pub mod map;
pub mod repeat;

pub use waste_drop_types as types;

pub use map::{handle_key_event, handle_mouse_event, should_quit, CellPointer};
pub use repeat::RepeatHandler;
