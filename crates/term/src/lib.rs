//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: screens are drawn into a plain
//! framebuffer which is then diffed and flushed to the terminal. No widget
//! toolkit is involved, so the world-to-cell mapping stays under our control
//! and mouse cells can be mapped back to world points exactly.

pub mod fb;
pub mod game_view;
pub mod layout;
pub mod render_throttle;
pub mod renderer;

pub use waste_drop_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::GameView;
pub use layout::{PlayfieldLayout, Viewport};
pub use render_throttle::RenderThrottle;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
