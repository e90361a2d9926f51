//! Screens and their menus.
//!
//! Menu buttons are laid out in world coordinates so that the renderer and
//! pointer hit-testing agree on where each button is.

use crate::types::{Rect, ScoreCard, WORLD_HEIGHT, WORLD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Loading,
    LoadError,
    MainMenu,
    Gameplay,
    Pause,
    Options,
    LevelTransition,
    GameOver,
    GameComplete,
}

/// Per-screen payload: the menu cursor and, for summary screens, the card
/// they were started with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenData {
    pub cursor: usize,
    pub card: Option<ScoreCard>,
}

impl ScreenData {
    pub fn with_card(card: ScoreCard) -> Self {
        Self {
            cursor: 0,
            card: Some(card),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Play,
    DevMode,
    Exit,
    Resume,
    Options,
    ExitToMenu,
    Volume,
    Back,
    Continue,
    Restart,
    MainMenu,
}

impl MenuItem {
    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::Play => "Play",
            MenuItem::DevMode => "Dev Mode: Level 5",
            MenuItem::Exit | MenuItem::ExitToMenu => "Exit",
            MenuItem::Resume => "Resume",
            MenuItem::Options => "Options",
            MenuItem::Volume => "Music Volume",
            MenuItem::Back => "Back",
            MenuItem::Continue => "Continue",
            MenuItem::Restart => "Restart Game",
            MenuItem::MainMenu => "Main Menu",
        }
    }
}

const MAIN_MENU: &[MenuItem] = &[MenuItem::Play, MenuItem::DevMode, MenuItem::Exit];
const PAUSE_MENU: &[MenuItem] = &[MenuItem::Resume, MenuItem::Options, MenuItem::ExitToMenu];
const OPTIONS_MENU: &[MenuItem] = &[MenuItem::Volume, MenuItem::Back];
const TRANSITION_MENU: &[MenuItem] = &[MenuItem::Continue];
const GAME_OVER_MENU: &[MenuItem] = &[MenuItem::Restart, MenuItem::MainMenu];
const COMPLETE_MENU: &[MenuItem] = &[MenuItem::MainMenu];

impl Screen {
    pub fn menu(&self) -> &'static [MenuItem] {
        match self {
            Screen::MainMenu => MAIN_MENU,
            Screen::Pause => PAUSE_MENU,
            Screen::Options => OPTIONS_MENU,
            Screen::LevelTransition => TRANSITION_MENU,
            Screen::GameOver => GAME_OVER_MENU,
            Screen::GameComplete => COMPLETE_MENU,
            Screen::Loading | Screen::LoadError | Screen::Gameplay => &[],
        }
    }

    /// Screens drawn over a paused gameplay screen.
    pub fn is_overlay(&self) -> bool {
        matches!(
            self,
            Screen::Pause | Screen::Options | Screen::LevelTransition
        )
    }
}

pub const BUTTON_WIDTH: f32 = 240.0;
pub const BUTTON_HEIGHT: f32 = 50.0;
const BUTTON_GAP: f32 = 70.0;

/// World rectangle of the `index`-th menu button.
pub fn button_rect(index: usize) -> Rect {
    let cy = WORLD_HEIGHT / 2.0 + 50.0 + index as f32 * BUTTON_GAP;
    Rect::from_center(WORLD_WIDTH / 2.0, cy, BUTTON_WIDTH, BUTTON_HEIGHT)
}

/// Index of the button of `screen` under a world point.
pub fn button_at(screen: Screen, x: f32, y: f32) -> Option<usize> {
    (0..screen.menu().len()).find(|&i| button_rect(i).contains(x, y))
}
