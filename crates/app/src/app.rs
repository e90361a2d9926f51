//! Screen flow.
//!
//! ```text
//! Loading --ok--> MainMenu --Play/Dev--> Gameplay
//!    \--err--> LoadError                  |  pause button / p
//!                                         v
//!                          Pause (over paused Gameplay) --Options--> Options
//! Gameplay --target--> LevelTransition --Continue--> Gameplay (next level)
//! Gameplay --last level--> GameComplete --> MainMenu
//! Gameplay --clock--> GameOver --Restart--> Gameplay | --Main Menu--> MainMenu
//! ```
//!
//! Input reaches only the topmost running screen.

use waste_drop_core::{GameConfig, SessionOutcome};
use waste_drop_engine::{AssetLoader, Assets, BackgroundMusic, SceneManager};

use crate::config::AppConfig;
use crate::gameplay::{Gameplay, HostSignal, NUDGE_STEP};
use crate::screen::{button_at, MenuItem, Screen, ScreenData};
use crate::types::{
    LevelInit, PointerEvent, PointerPhase, Rect, UiAction, PAUSE_BUTTON, VOLUME_STEP_PERCENT,
};

/// Level started by the main menu's developer shortcut.
pub const DEV_MODE_LEVEL: u32 = 5;

pub struct App {
    config: AppConfig,
    game_config: GameConfig,
    scenes: SceneManager<Screen, ScreenData>,
    loader: Option<AssetLoader>,
    load_progress: f32,
    load_error: Option<String>,
    assets: Assets,
    music: BackgroundMusic,
    gameplay: Option<Gameplay>,
    signals: Vec<HostSignal>,
    games_started: u32,
    quit: bool,
}

impl App {
    pub fn new(config: AppConfig, game_config: GameConfig, mut music: BackgroundMusic) -> Self {
        music.set_volume(config.music_volume);
        let loader = AssetLoader::standard(config.theme_path.clone());
        let mut scenes = SceneManager::new();
        scenes.start(Screen::Loading, ScreenData::default());
        Self {
            config,
            game_config,
            scenes,
            loader: Some(loader),
            load_progress: 0.0,
            load_error: None,
            assets: Assets::default(),
            music,
            gameplay: None,
            signals: Vec::new(),
            games_started: 0,
            quit: false,
        }
    }

    pub fn screen(&self) -> Option<Screen> {
        self.scenes.top_key()
    }

    pub fn scenes(&self) -> &SceneManager<Screen, ScreenData> {
        &self.scenes
    }

    /// Payload of the topmost screen.
    pub fn screen_data(&self) -> ScreenData {
        self.scenes.top().map(|e| e.payload).unwrap_or_default()
    }

    pub fn gameplay(&self) -> Option<&Gameplay> {
        self.gameplay.as_ref()
    }

    pub fn assets(&self) -> &Assets {
        &self.assets
    }

    pub fn load_progress(&self) -> f32 {
        self.load_progress
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn music(&self) -> &BackgroundMusic {
        &self.music
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    /// Whether anything on screen moves without input.
    pub fn is_animating(&self) -> bool {
        match self.screen() {
            Some(Screen::Loading) => true,
            Some(Screen::Gameplay) => true,
            _ => false,
        }
    }

    /// Cheap hash of what the current frame shows, for render throttling.
    pub fn fingerprint(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325;
        let mut mix = |v: u64| {
            h ^= v;
            h = h.wrapping_mul(0x0100_0000_01b3);
        };
        for entry in self.scenes.iter() {
            mix(entry.key as u64);
            mix(entry.status as u64);
            mix(entry.payload.cursor as u64);
        }
        mix(u64::from(self.music.volume_percent()));
        mix((self.load_progress * 100.0) as u64);
        if let Some(g) = &self.gameplay {
            let snap = g.snapshot();
            mix(u64::from(snap.score));
            mix(u64::from(snap.time_remaining));
            mix(u64::from(snap.level));
            for body in g.world().bodies() {
                mix(u64::from(body.id.0));
                mix(body.x as u64);
                mix(body.y as u64);
            }
            mix(g.fader().labels().len() as u64);
        }
        h
    }

    /// Advance the app by one host step.
    pub fn tick(&mut self, dt_ms: u32) {
        match self.screen() {
            Some(Screen::Loading) => self.step_loading(),
            Some(Screen::Gameplay) => {
                let mut signals = std::mem::take(&mut self.signals);
                if let Some(gameplay) = self.gameplay.as_mut() {
                    gameplay.tick(dt_ms, &mut signals);
                }
                self.handle_signals(&mut signals);
                self.signals = signals;
            }
            _ => {}
        }
    }

    fn step_loading(&mut self) {
        let Some(loader) = self.loader.as_mut() else {
            return;
        };
        match loader.step() {
            Ok(progress) => {
                self.load_progress = progress;
                if loader.is_complete() {
                    if let Some(loader) = self.loader.take() {
                        self.assets = loader.into_assets();
                    }
                    log::info!("assets loaded");
                    self.after_loading();
                }
            }
            Err(e) => {
                log::error!("failed to load game assets: {:#}", e);
                self.loader = None;
                self.load_error = Some(format!("{:#}", e));
                self.scenes.start(Screen::LoadError, ScreenData::default());
            }
        }
    }

    fn after_loading(&mut self) {
        match self.config.start_level {
            Some(level) => self.start_game(LevelInit {
                level: Some(level),
                score: Some(0),
            }),
            None => self.scenes.start(Screen::MainMenu, ScreenData::default()),
        }
    }

    pub fn start_game(&mut self, init: LevelInit) {
        let seed = self.config.seed.wrapping_add(self.games_started);
        self.games_started = self.games_started.wrapping_add(1);
        log::info!("starting game at {:?} with seed {}", init, seed);

        self.music.stop();
        self.scenes.start(Screen::Gameplay, ScreenData::default());
        let mut signals = std::mem::take(&mut self.signals);
        self.gameplay = Some(Gameplay::start(
            self.game_config.clone(),
            seed,
            init,
            &mut signals,
        ));
        self.handle_signals(&mut signals);
        self.signals = signals;
    }

    fn handle_signals(&mut self, signals: &mut Vec<HostSignal>) {
        for signal in signals.drain(..) {
            match signal {
                HostSignal::PlayMusic => self.music.play(),
                HostSignal::StopMusic => self.music.stop(),
                HostSignal::Transition(card) => {
                    self.scenes.pause(Screen::Gameplay);
                    self.scenes
                        .launch(Screen::LevelTransition, ScreenData::with_card(card));
                }
                HostSignal::Finished(outcome) => {
                    self.gameplay = None;
                    let screen = match outcome {
                        SessionOutcome::GameOver(_) => Screen::GameOver,
                        SessionOutcome::Completed(_) => Screen::GameComplete,
                    };
                    self.scenes.start(screen, ScreenData::with_card(outcome.card()));
                }
            }
        }
    }

    fn pause_game(&mut self) {
        if !self.scenes.is_running(Screen::Gameplay) {
            return;
        }
        if let Some(gameplay) = self.gameplay.as_mut() {
            gameplay.cancel_drag();
        }
        self.scenes.pause(Screen::Gameplay);
        self.scenes.launch(Screen::Pause, ScreenData::default());
        log::debug!("game paused");
    }

    fn resume_game(&mut self) {
        self.scenes.stop(Screen::Options);
        self.scenes.stop(Screen::Pause);
        self.scenes.resume(Screen::Gameplay);
        log::debug!("game resumed");
    }

    fn exit_to_menu(&mut self) {
        self.music.stop();
        self.gameplay = None;
        self.scenes.start(Screen::MainMenu, ScreenData::default());
    }

    fn continue_level(&mut self) {
        self.scenes.stop(Screen::LevelTransition);
        self.scenes.resume(Screen::Gameplay);
        let mut signals = std::mem::take(&mut self.signals);
        if let Some(gameplay) = self.gameplay.as_mut() {
            gameplay.continue_level(&mut signals);
        }
        self.handle_signals(&mut signals);
        self.signals = signals;
    }

    fn activate(&mut self, item: MenuItem) {
        log::debug!("menu: {:?}", item);
        match item {
            MenuItem::Play => self.start_game(LevelInit {
                level: Some(1),
                score: Some(0),
            }),
            MenuItem::DevMode => self.start_game(LevelInit {
                level: Some(DEV_MODE_LEVEL),
                score: Some(0),
            }),
            MenuItem::Exit => self.quit = true,
            MenuItem::Resume => self.resume_game(),
            MenuItem::Options => self.scenes.launch(Screen::Options, ScreenData::default()),
            MenuItem::ExitToMenu | MenuItem::MainMenu => self.exit_to_menu(),
            MenuItem::Volume => {}
            MenuItem::Back => {
                self.scenes.stop(Screen::Options);
            }
            MenuItem::Continue => self.continue_level(),
            MenuItem::Restart => self.start_game(LevelInit {
                level: Some(1),
                score: Some(0),
            }),
        }
    }

    fn adjust_volume(&mut self, steps: i32) {
        let percent = i32::from(self.music.volume_percent()) + steps * i32::from(VOLUME_STEP_PERCENT);
        self.music.set_volume_percent(percent);
        log::debug!("music volume {}%", self.music.volume_percent());
    }

    fn move_cursor(&mut self, screen: Screen, delta: isize) {
        let len = screen.menu().len() as isize;
        if len == 0 {
            return;
        }
        if let Some(data) = self.scenes.payload_mut(screen) {
            data.cursor = (data.cursor as isize + delta).rem_euclid(len) as usize;
        }
    }

    fn activate_index(&mut self, screen: Screen, index: usize) {
        let Some(&item) = screen.menu().get(index) else {
            return;
        };
        if let Some(data) = self.scenes.payload_mut(screen) {
            data.cursor = index;
        }
        self.activate(item);
    }

    pub fn handle_action(&mut self, action: UiAction) {
        if action == UiAction::Quit {
            self.quit = true;
            return;
        }
        let Some(screen) = self.screen() else {
            return;
        };
        match screen {
            Screen::Loading | Screen::LoadError => {}
            Screen::Gameplay => self.gameplay_action(action),
            _ => self.menu_action(screen, action),
        }
    }

    fn gameplay_action(&mut self, action: UiAction) {
        let mut signals = std::mem::take(&mut self.signals);
        match action {
            UiAction::Pause | UiAction::Back => self.pause_game(),
            UiAction::Grab | UiAction::Confirm => {
                if let Some(gameplay) = self.gameplay.as_mut() {
                    gameplay.toggle_grab(&mut signals);
                }
            }
            UiAction::Up | UiAction::Down | UiAction::Left | UiAction::Right => {
                let (dx, dy) = match action {
                    UiAction::Up => (0.0, -NUDGE_STEP),
                    UiAction::Down => (0.0, NUDGE_STEP),
                    UiAction::Left => (-NUDGE_STEP, 0.0),
                    _ => (NUDGE_STEP, 0.0),
                };
                if let Some(gameplay) = self.gameplay.as_mut() {
                    gameplay.nudge(dx, dy);
                }
            }
            UiAction::Select(_) | UiAction::Quit => {}
        }
        self.handle_signals(&mut signals);
        self.signals = signals;
    }

    fn menu_action(&mut self, screen: Screen, action: UiAction) {
        let cursor = self.scenes.entry(screen).map_or(0, |e| e.payload.cursor);
        let on_volume = screen.menu().get(cursor) == Some(&MenuItem::Volume);
        match action {
            UiAction::Up => self.move_cursor(screen, -1),
            UiAction::Down => self.move_cursor(screen, 1),
            UiAction::Left if on_volume => self.adjust_volume(-1),
            UiAction::Right if on_volume => self.adjust_volume(1),
            UiAction::Confirm | UiAction::Grab => self.activate_index(screen, cursor),
            UiAction::Select(n) => self.activate_index(screen, usize::from(n).wrapping_sub(1)),
            UiAction::Back | UiAction::Pause => match screen {
                Screen::Options => self.activate(MenuItem::Back),
                Screen::Pause => self.resume_game(),
                _ => {}
            },
            _ => {}
        }
    }

    /// Pointer input in world coordinates.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        let Some(screen) = self.screen() else {
            return;
        };
        match screen {
            Screen::Gameplay => {
                if event.phase == PointerPhase::Down && pause_button().contains(event.x, event.y) {
                    self.pause_game();
                    return;
                }
                let mut signals = std::mem::take(&mut self.signals);
                if let Some(gameplay) = self.gameplay.as_mut() {
                    gameplay.pointer(event, &mut signals);
                }
                self.handle_signals(&mut signals);
                self.signals = signals;
            }
            Screen::Loading | Screen::LoadError => {}
            _ => {
                if event.phase == PointerPhase::Down {
                    if let Some(index) = button_at(screen, event.x, event.y) {
                        self.activate_index(screen, index);
                    }
                }
            }
        }
    }
}

/// World rectangle of the in-game pause button.
pub fn pause_button() -> Rect {
    let (x, y, size) = PAUSE_BUTTON;
    Rect::from_center(x, y, size, size)
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("screen", &self.screen())
            .field("music", &self.music)
            .field("quit", &self.quit)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LevelPhase, TICK_MS};

    fn loaded_app() -> App {
        let mut app = App::new(
            AppConfig::default(),
            GameConfig::default(),
            BackgroundMusic::silent(),
        );
        for _ in 0..4 {
            app.tick(TICK_MS);
        }
        app
    }

    #[test]
    fn test_loading_reaches_main_menu() {
        let mut app = App::new(
            AppConfig::default(),
            GameConfig::default(),
            BackgroundMusic::silent(),
        );
        assert_eq!(app.screen(), Some(Screen::Loading));
        app.tick(TICK_MS);
        assert_eq!(app.load_progress(), 0.5);
        app.tick(TICK_MS);
        assert_eq!(app.screen(), Some(Screen::MainMenu));
    }

    #[test]
    fn test_bad_theme_shows_load_error() {
        let config = AppConfig {
            theme_path: Some("/nonexistent/theme.json".into()),
            ..AppConfig::default()
        };
        let mut app = App::new(config, GameConfig::default(), BackgroundMusic::silent());
        app.tick(TICK_MS);
        assert_eq!(app.screen(), Some(Screen::LoadError));
        assert!(app.load_error().is_some());

        app.handle_action(UiAction::Confirm);
        assert_eq!(app.screen(), Some(Screen::LoadError));
        app.handle_action(UiAction::Quit);
        assert!(app.should_quit());
    }

    #[test]
    fn test_play_starts_level_one_with_music() {
        let mut app = loaded_app();
        app.handle_action(UiAction::Confirm);
        assert_eq!(app.screen(), Some(Screen::Gameplay));
        assert!(app.music().is_playing());
        assert_eq!(app.gameplay().unwrap().snapshot().level, 1);
    }

    #[test]
    fn test_dev_mode_shortcut() {
        let mut app = loaded_app();
        app.handle_action(UiAction::Select(2));
        let snap = app.gameplay().unwrap().snapshot();
        assert_eq!((snap.level, snap.score, snap.time_remaining), (5, 0, 40));
    }

    #[test]
    fn test_pause_freezes_clock() {
        let mut app = loaded_app();
        app.handle_action(UiAction::Confirm);
        app.handle_action(UiAction::Pause);
        assert_eq!(app.screen(), Some(Screen::Pause));
        assert!(app.scenes().is_paused(Screen::Gameplay));

        for _ in 0..200 {
            app.tick(TICK_MS);
        }
        assert_eq!(app.gameplay().unwrap().snapshot().time_remaining, 60);

        app.handle_action(UiAction::Confirm);
        assert_eq!(app.screen(), Some(Screen::Gameplay));
        for _ in 0..63 {
            app.tick(TICK_MS);
        }
        assert_eq!(app.gameplay().unwrap().snapshot().time_remaining, 59);
    }

    #[test]
    fn test_pause_button_click() {
        let mut app = loaded_app();
        app.handle_action(UiAction::Confirm);
        let (x, y) = pause_button().center();
        app.handle_pointer(PointerEvent::new(PointerPhase::Down, x, y));
        assert_eq!(app.screen(), Some(Screen::Pause));
    }

    #[test]
    fn test_options_volume() {
        let mut app = loaded_app();
        app.handle_action(UiAction::Confirm);
        app.handle_action(UiAction::Pause);
        app.handle_action(UiAction::Select(2));
        assert_eq!(app.screen(), Some(Screen::Options));

        app.handle_action(UiAction::Right);
        app.handle_action(UiAction::Right);
        assert_eq!(app.music().volume_percent(), 20);
        for _ in 0..30 {
            app.handle_action(UiAction::Left);
        }
        assert_eq!(app.music().volume_percent(), 0);

        app.handle_action(UiAction::Back);
        assert_eq!(app.screen(), Some(Screen::Pause));
        app.handle_action(UiAction::Back);
        assert_eq!(app.screen(), Some(Screen::Gameplay));
    }

    #[test]
    fn test_exit_to_menu_stops_music() {
        let mut app = loaded_app();
        app.handle_action(UiAction::Confirm);
        app.handle_action(UiAction::Pause);
        app.handle_action(UiAction::Select(3));
        assert_eq!(app.screen(), Some(Screen::MainMenu));
        assert!(!app.music().is_playing());
        assert!(app.gameplay().is_none());
        assert_eq!(app.scenes().len(), 1);
    }

    #[test]
    fn test_game_over_and_restart() {
        let mut app = loaded_app();
        app.handle_action(UiAction::Select(2));
        for _ in 0..(40_000 / TICK_MS + 2) {
            app.tick(TICK_MS);
        }
        assert_eq!(app.screen(), Some(Screen::GameOver));
        let card = app.screen_data().card.unwrap();
        assert_eq!(card.level, 5);
        assert!(!app.music().is_playing());

        app.handle_action(UiAction::Confirm);
        assert_eq!(app.screen(), Some(Screen::Gameplay));
        let snap = app.gameplay().unwrap().snapshot();
        assert_eq!((snap.level, snap.score, snap.phase), (1, 0, LevelPhase::Active));
    }

    #[test]
    fn test_start_level_skips_menu() {
        let config = AppConfig {
            start_level: Some(3),
            ..AppConfig::default()
        };
        let mut app = App::new(config, GameConfig::default(), BackgroundMusic::silent());
        app.tick(TICK_MS);
        app.tick(TICK_MS);
        assert_eq!(app.screen(), Some(Screen::Gameplay));
        assert_eq!(app.gameplay().unwrap().snapshot().level, 3);
    }

    #[test]
    fn test_menu_cursor_wraps_and_exit_quits() {
        let mut app = loaded_app();
        app.handle_action(UiAction::Up);
        assert_eq!(app.screen_data().cursor, 2);
        app.handle_action(UiAction::Confirm);
        assert!(app.should_quit());
    }
}
