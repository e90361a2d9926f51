//! End-to-end screen flow: menus, dragging with the pointer, level
//! transitions and the final summary.

use waste_drop::app::{button_rect, pause_button, App, AppConfig, Screen};
use waste_drop::core::GameConfig;
use waste_drop::engine::BackgroundMusic;
use waste_drop::types::{LevelPhase, PointerEvent, PointerPhase, UiAction, TICK_MS};

fn boot(game_config: GameConfig) -> App {
    let mut app = App::new(AppConfig::default(), game_config, BackgroundMusic::silent());
    for _ in 0..4 {
        app.tick(TICK_MS);
    }
    assert_eq!(app.screen(), Some(Screen::MainMenu));
    app
}

fn short_game() -> GameConfig {
    GameConfig {
        level_targets: vec![10, 20],
        ..GameConfig::default()
    }
}

fn click(app: &mut App, (x, y): (f32, f32)) {
    app.handle_pointer(PointerEvent::new(PointerPhase::Down, x, y));
    app.handle_pointer(PointerEvent::new(PointerPhase::Up, x, y));
}

/// Wait for an item to fall, then drag it into its own bin.
fn drag_into_matching_bin(app: &mut App) {
    let mut guard = 0;
    while app.gameplay().map_or(true, |g| g.world().bodies().is_empty()) {
        app.tick(TICK_MS);
        guard += 1;
        assert!(guard < 200, "no item was released");
    }
    let gameplay = app.gameplay().unwrap();
    let first = gameplay.world().bodies()[0];
    let state = gameplay.session().state();
    let id = gameplay
        .world()
        .hit_test(first.x, first.y, |id| state.can_drag(id))
        .unwrap();
    let item = gameplay.session().state().item(id).copied().unwrap();
    let (bx, by) = gameplay
        .session()
        .bins()
        .get(item.category)
        .unwrap()
        .region
        .center();
    // Bins reach into the ground band; aim at their upper part.
    let (tx, ty) = (bx, by - 60.0);

    app.handle_pointer(PointerEvent::new(PointerPhase::Down, first.x, first.y));
    assert_eq!(app.gameplay().unwrap().held(), Some(id));
    app.handle_pointer(PointerEvent::new(PointerPhase::Drag, tx, ty - 40.0));
    app.handle_pointer(PointerEvent::new(PointerPhase::Up, tx, ty));
}

#[test]
fn play_through_short_game_with_pointer() {
    let mut app = boot(short_game());
    click(&mut app, button_rect(0).center());
    assert_eq!(app.screen(), Some(Screen::Gameplay));
    assert!(app.music().is_playing());

    drag_into_matching_bin(&mut app);
    assert_eq!(app.screen(), Some(Screen::LevelTransition));
    assert!(!app.music().is_playing());
    let card = app.screen_data().card.unwrap();
    assert_eq!((card.level, card.score), (1, 10));
    assert!(app.scenes().is_paused(Screen::Gameplay));

    click(&mut app, button_rect(0).center());
    assert_eq!(app.screen(), Some(Screen::Gameplay));
    let snap = app.gameplay().unwrap().snapshot();
    assert_eq!((snap.level, snap.score, snap.target_score), (2, 0, 20));
    assert!(app.music().is_playing());

    drag_into_matching_bin(&mut app);
    assert_eq!(app.screen(), Some(Screen::Gameplay));
    drag_into_matching_bin(&mut app);

    assert_eq!(app.screen(), Some(Screen::GameComplete));
    let card = app.screen_data().card.unwrap();
    assert_eq!((card.level, card.score), (2, 20));
    assert!(app.gameplay().is_none());

    app.handle_action(UiAction::Confirm);
    assert_eq!(app.screen(), Some(Screen::MainMenu));
}

#[test]
fn pause_options_and_back() {
    let mut app = boot(GameConfig::default());
    app.handle_action(UiAction::Confirm);

    click(&mut app, pause_button().center());
    assert_eq!(app.screen(), Some(Screen::Pause));

    app.handle_action(UiAction::Down);
    app.handle_action(UiAction::Confirm);
    assert_eq!(app.screen(), Some(Screen::Options));

    let before = app.music().volume_percent();
    app.handle_action(UiAction::Right);
    app.handle_action(UiAction::Right);
    assert_eq!(app.music().volume_percent(), before + 10);
    for _ in 0..40 {
        app.handle_action(UiAction::Left);
    }
    assert_eq!(app.music().volume_percent(), 0);

    app.handle_action(UiAction::Back);
    assert_eq!(app.screen(), Some(Screen::Pause));
    app.handle_action(UiAction::Back);
    assert_eq!(app.screen(), Some(Screen::Gameplay));
    assert_eq!(
        app.gameplay().unwrap().snapshot().phase,
        LevelPhase::Active
    );
}

#[test]
fn clock_runs_out_then_restart() {
    let mut app = boot(GameConfig::default());
    app.handle_action(UiAction::Select(1));
    for _ in 0..(61_000 / TICK_MS) {
        app.tick(TICK_MS);
    }
    assert_eq!(app.screen(), Some(Screen::GameOver));
    let card = app.screen_data().card.unwrap();
    assert_eq!((card.level, card.score), (1, 0));

    click(&mut app, button_rect(0).center());
    assert_eq!(app.screen(), Some(Screen::Gameplay));
    let snap = app.gameplay().unwrap().snapshot();
    assert_eq!((snap.level, snap.time_remaining), (1, 60));
}

#[test]
fn paused_drag_goes_back_to_origin() {
    let mut app = boot(GameConfig::default());
    app.handle_action(UiAction::Confirm);
    while app.gameplay().unwrap().world().bodies().is_empty() {
        app.tick(TICK_MS);
    }
    app.handle_action(UiAction::Grab);
    let id = app.gameplay().unwrap().held().unwrap();
    let origin = app.gameplay().unwrap().world().body(id).map(|b| (b.x, b.y));

    app.handle_action(UiAction::Right);
    app.handle_action(UiAction::Pause);
    assert_eq!(app.screen(), Some(Screen::Pause));
    let gameplay = app.gameplay().unwrap();
    assert_eq!(gameplay.held(), None);
    assert_eq!(gameplay.world().body(id).map(|b| (b.x, b.y)), origin);
}

#[test]
fn json_config_drives_the_level_table() {
    let text = serde_json::json!({
        "level_targets": [10],
        "base_time_secs": 20,
        "min_time_secs": 5
    })
    .to_string();
    let config = waste_drop::app::parse_game_config(&text).unwrap();
    assert_eq!(config.max_level(), 1);

    let mut app = boot(config);
    app.handle_action(UiAction::Confirm);
    let snap = app.gameplay().unwrap().snapshot();
    assert_eq!((snap.target_score, snap.time_remaining), (10, 20));

    drag_into_matching_bin(&mut app);
    assert_eq!(app.screen(), Some(Screen::GameComplete));

    let bad = serde_json::json!({ "level_targets": [] }).to_string();
    assert!(waste_drop::app::parse_game_config(&bad).is_err());
}
