//! Terminal waste sorting runner (default binary).
//!
//! Uses crossterm for keyboard and mouse input and the framebuffer renderer
//! from `waste_drop::term`. Logs go to a file since the terminal is taken by
//! the alternate screen.

use std::fs::OpenOptions;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use waste_drop::app::{App, AppConfig};
use waste_drop::engine::BackgroundMusic;
use waste_drop::input::{handle_key_event, handle_mouse_event, RepeatHandler};
use waste_drop::term::{
    FrameBuffer, GameView, PlayfieldLayout, RenderThrottle, TerminalRenderer, Viewport,
};
use waste_drop::types::{PointerEvent, PointerPhase, TICK_MS};

/// Redraw interval for screens with nothing moving.
const STATIC_REDRAW_MS: u64 = 250;

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    init_logging(&config.log_path)?;

    let game_config = config
        .load_game_config()
        .context("failed to load game configuration")?;
    log::info!("config: {:?}", config);

    let app = App::new(config, game_config, BackgroundMusic::silent());

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, app);

    // Always try to restore terminal state.
    if let Err(e) = term.exit() {
        log::warn!("failed to restore terminal: {:#}", e);
    }
    if let Err(e) = &result {
        log::error!("exiting with error: {:#}", e);
    }
    result
}

fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("failed to install logger")?;
    Ok(())
}

fn run(term: &mut TerminalRenderer, mut app: App) -> Result<()> {
    let view = GameView::default();
    let mut repeat = RepeatHandler::new();
    let mut throttle = RenderThrottle::new(STATIC_REDRAW_MS);
    let mut fb = FrameBuffer::new(0, 0);

    let started = Instant::now();
    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(u64::from(TICK_MS));

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);

        let now_ms = started.elapsed().as_millis() as u64;
        if throttle.should_render(now_ms, app.fingerprint(), app.is_animating()) {
            view.render_into(&app, viewport, &mut fb);
            term.draw_swap(&mut fb)?;
        }

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if let Some(action) = handle_key_event(key).and_then(|a| repeat.press(a)) {
                            app.handle_action(action);
                        }
                    }
                    KeyEventKind::Repeat => {
                        // Terminal auto-repeat is ignored; RepeatHandler repeats held keys.
                    }
                    KeyEventKind::Release => {
                        if let Some(action) = handle_key_event(key) {
                            repeat.release(action);
                        }
                    }
                },
                Event::Mouse(mouse) => {
                    if let (Some(cell), Some(layout)) =
                        (handle_mouse_event(mouse), PlayfieldLayout::fit(viewport))
                    {
                        let outside = !layout.contains_screen(cell.column, cell.row);
                        if !(cell.phase == PointerPhase::Down && outside) {
                            let (x, y) = layout.screen_to_world(cell.column, cell.row);
                            app.handle_pointer(PointerEvent::new(cell.phase, x, y));
                        }
                    }
                }
                Event::Resize(..) => {
                    term.invalidate();
                    throttle.reset();
                }
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            for action in repeat.update(TICK_MS) {
                app.handle_action(action);
            }
            app.tick(TICK_MS);
        }

        if app.should_quit() {
            log::info!("quit requested");
            return Ok(());
        }
    }
}
