//! Application layer: screens, gameplay wiring and runtime configuration.
//!
//! [`App`] owns the scene stack, the background music, asset loading and
//! the running [`Gameplay`]. A host feeds it UI actions, world-space pointer
//! events and fixed time steps, then draws whatever [`App::screen`] reports.

pub mod app;
pub mod config;
pub mod gameplay;
pub mod screen;

pub use waste_drop_types as types;

pub use app::{pause_button, App, DEV_MODE_LEVEL};
pub use config::{load_game_config, parse_game_config, AppConfig};
pub use gameplay::{GameTimer, Gameplay, HostSignal, NUDGE_STEP};
pub use screen::{button_at, button_rect, MenuItem, Screen, ScreenData};
