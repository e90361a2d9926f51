//! GameView: maps the [`App`] screens into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Everything on the playfield is placed in world coordinates and mapped
//! through [`PlayfieldLayout`], the same mapping the host uses to turn mouse
//! cells back into world points. Menu buttons therefore land exactly where
//! clicks hit them.

use waste_drop_app::{button_rect, pause_button, App, Gameplay, MenuItem, Screen, ScreenData};
use waste_drop_core::FeedbackTone;
use waste_drop_engine::Theme;

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::layout::{PlayfieldLayout, Viewport};
use crate::types::{Rect, ScoreCard, WORLD_WIDTH};

const TEXT: Rgb = Rgb::new(230, 230, 230);
const MUTED: Rgb = Rgb::new(150, 150, 160);
const GOOD: Rgb = Rgb::new(90, 220, 110);
const BAD: Rgb = Rgb::new(240, 80, 70);
const FRAME: Rgb = Rgb::new(200, 200, 200);
const BUTTON: Rgb = Rgb::new(45, 55, 70);
const BUTTON_HOT: Rgb = Rgb::new(70, 110, 160);

/// A lightweight terminal renderer for the sorting game.
pub struct GameView {
    /// Darkening applied to gameplay under the pause and transition overlays.
    overlay_shade: f32,
}

impl Default for GameView {
    fn default() -> Self {
        Self { overlay_shade: 0.6 }
    }
}

impl GameView {
    pub fn new(overlay_shade: f32) -> Self {
        Self {
            overlay_shade: overlay_shade.clamp(0.0, 1.0),
        }
    }

    /// Render the current screen into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when
    /// the terminal size changes.
    pub fn render_into(&self, app: &App, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let Some(layout) = PlayfieldLayout::fit(viewport) else {
            let style = CellStyle::new(TEXT, Rgb::default()).bold();
            let mid = viewport.height / 2;
            fb.put_str_centered(
                viewport.width / 2,
                mid,
                "Terminal too small",
                0,
                viewport.width,
                style,
            );
            return;
        };

        let theme = &app.assets().theme;
        let bg = Rgb::from_array(theme.background);
        fb.fill_rect(
            layout.x,
            layout.y,
            layout.cols,
            layout.rows,
            ' ',
            CellStyle::new(MUTED, bg),
        );
        draw_border(
            fb,
            layout.x - 1,
            layout.y - 1,
            layout.cols + 2,
            layout.rows + 2,
            CellStyle::new(FRAME, Rgb::default()),
        );

        let Some(screen) = app.screen() else {
            return;
        };
        let data = app.screen_data();
        let painter = Painter { layout, bg };

        match screen {
            Screen::Loading => painter.loading(fb, app.load_progress(), theme),
            Screen::LoadError => painter.load_error(fb, app.load_error()),
            Screen::MainMenu => {
                painter.title(fb, &app.assets().title);
                painter.menu(fb, app, screen, data);
            }
            Screen::Gameplay => {
                if let Some(gameplay) = app.gameplay() {
                    painter.gameplay(fb, gameplay, theme);
                    self.draw_hud(fb, &layout, viewport, gameplay, bg);
                }
            }
            Screen::Pause | Screen::Options | Screen::LevelTransition => {
                if let Some(gameplay) = app.gameplay() {
                    painter.gameplay(fb, gameplay, theme);
                    self.draw_hud(fb, &layout, viewport, gameplay, bg);
                }
                fb.shade_rect(
                    layout.x,
                    layout.y,
                    layout.cols,
                    layout.rows,
                    self.overlay_shade,
                );
                painter.heading(fb, screen, data.card);
                painter.menu(fb, app, screen, data);
            }
            Screen::GameOver | Screen::GameComplete => {
                painter.heading(fb, screen, data.card);
                painter.menu(fb, app, screen, data);
            }
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, app: &App, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(app, viewport, &mut fb);
        fb
    }

    fn draw_hud(
        &self,
        fb: &mut FrameBuffer,
        layout: &PlayfieldLayout,
        viewport: Viewport,
        gameplay: &Gameplay,
        bg: Rgb,
    ) {
        let snap = gameplay.snapshot();
        let rows = [
            ("Time: ", snap.time_remaining),
            ("Score: ", snap.score),
            ("Level: ", snap.level),
            ("Target: ", snap.target_score),
        ];

        if layout.side_panel {
            let label = CellStyle::new(TEXT, Rgb::default()).bold();
            let value = CellStyle::new(TEXT, Rgb::default());
            let x = layout.right() + 2;
            let mut y = layout.y;
            for (name, v) in rows {
                if y >= viewport.height {
                    break;
                }
                fb.put_str(x, y, name, label);
                fb.put_u32(x + name.len() as u16, y, v, value);
                y = y.saturating_add(2);
            }
            draw_progress(fb, x, y, 16, snap.progress(), GOOD, value);
            return;
        }

        // Narrow terminals: two lines inside the playfield, left of the
        // pause button.
        let style = CellStyle::new(TEXT, bg);
        for (line, pair) in rows.chunks(2).enumerate() {
            let mut x = layout.x + 1;
            let y = layout.y + line as u16;
            for &(name, v) in pair {
                fb.put_str(x, y, name, style.bold());
                x += name.len() as u16;
                fb.put_u32(x, y, v, style);
                x += digits(v) + 2;
            }
        }
    }
}

/// Draw routines that share the playfield mapping.
struct Painter {
    layout: PlayfieldLayout,
    bg: Rgb,
}

impl Painter {
    /// Centered text on the playfield at a world y.
    fn text(&self, fb: &mut FrameBuffer, world_y: f32, text: &str, style: CellStyle) {
        let row = self.layout.row_of(world_y);
        if row < 0 || row >= self.layout.rows as i32 {
            return;
        }
        fb.put_str_centered(
            self.layout.center_col(),
            self.layout.y + row as u16,
            text,
            self.layout.x,
            self.layout.right(),
            style,
        );
    }

    fn fill_world(
        &self,
        fb: &mut FrameBuffer,
        rect: &Rect,
        ch: char,
        style: CellStyle,
    ) -> Option<(u16, u16, u16, u16)> {
        let cells = self.layout.rect_cells(rect)?;
        let (x, y, w, h) = cells;
        fb.fill_rect(x, y, w, h, ch, style);
        Some(cells)
    }

    fn loading(&self, fb: &mut FrameBuffer, progress: f32, theme: &Theme) {
        let text = CellStyle::new(TEXT, self.bg);
        self.text(fb, 280.0, "Loading...", text.bold());

        let row = self.layout.row_of(320.0).max(0) as u16;
        let width = self.layout.cols.saturating_sub(4);
        draw_progress(
            fb,
            self.layout.x + 2,
            self.layout.y + row,
            width,
            progress,
            Rgb::from_array(theme.accent),
            text,
        );

        let percent = (progress.clamp(0.0, 1.0) * 100.0).round() as u32;
        self.text(fb, 360.0, &format!("{}%", percent), text);
    }

    fn load_error(&self, fb: &mut FrameBuffer, detail: Option<&str>) {
        let style = CellStyle::new(BAD, self.bg).bold();
        self.text(fb, 300.0, "Error loading game assets", style);
        if let Some(detail) = detail {
            self.text(fb, 340.0, detail, CellStyle::new(MUTED, self.bg));
        }
        self.text(fb, 400.0, "Press q to quit", CellStyle::new(MUTED, self.bg));
    }

    fn title(&self, fb: &mut FrameBuffer, banner: &[String]) {
        let style = CellStyle::new(GOOD, self.bg).bold();
        let widest = banner.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        if banner.is_empty() || widest > self.layout.cols as usize {
            self.text(fb, 120.0, "Waste Drop", style);
            return;
        }
        let left = self.layout.x + (self.layout.cols - widest as u16) / 2;
        let top = self.layout.y + self.layout.row_of(80.0).max(0) as u16;
        for (i, line) in banner.iter().enumerate() {
            let y = top + i as u16;
            if y >= self.layout.y + self.layout.rows {
                break;
            }
            fb.put_str(left, y, line, style);
        }
    }

    fn heading(&self, fb: &mut FrameBuffer, screen: Screen, card: Option<ScoreCard>) {
        let title = CellStyle::new(TEXT, Rgb::default()).bold();
        let body = CellStyle::new(TEXT, Rgb::default());
        let card = card.unwrap_or(ScoreCard { level: 1, score: 0 });
        match screen {
            Screen::Pause => self.text(fb, 200.0, "Paused", title),
            Screen::Options => self.text(fb, 200.0, "Options", title),
            Screen::LevelTransition => {
                self.text(fb, 200.0, &format!("Level {} Complete!", card.level), title);
                self.text(fb, 260.0, &format!("Score: {}", card.score), body);
            }
            Screen::GameOver => {
                self.text(fb, 180.0, "Game Over!", CellStyle::new(BAD, self.bg).bold());
                let body = CellStyle::new(TEXT, self.bg);
                self.text(fb, 240.0, &format!("You reached Level {}", card.level), body);
                self.text(fb, 280.0, &format!("Final Score: {}", card.score), body);
            }
            Screen::GameComplete => {
                self.text(fb, 200.0, "Game Completed!", CellStyle::new(GOOD, self.bg).bold());
                let body = CellStyle::new(TEXT, self.bg);
                self.text(fb, 260.0, &format!("Your Final Score: {}", card.score), body);
            }
            _ => {}
        }
    }

    fn menu(&self, fb: &mut FrameBuffer, app: &App, screen: Screen, data: ScreenData) {
        for (i, item) in screen.menu().iter().enumerate() {
            let hot = i == data.cursor;
            let style = if hot {
                CellStyle::new(TEXT, BUTTON_HOT).bold()
            } else {
                CellStyle::new(TEXT, BUTTON)
            };
            let rect = button_rect(i);
            if self.fill_world(fb, &rect, ' ', style).is_none() {
                continue;
            }
            let label = match item {
                MenuItem::Continue => {
                    let next = data.card.map_or(2, |c| c.level + 1);
                    format!("Continue to Level {}", next)
                }
                MenuItem::Volume => {
                    format!("< {} {}% >", item.label(), app.music().volume_percent())
                }
                _ => item.label().to_string(),
            };
            let (_, cy) = rect.center();
            let row = self.layout.row_of(cy).clamp(0, self.layout.rows as i32 - 1) as u16;
            let (bx, _, bw, _) = self.layout.rect_cells(&rect).unwrap_or_default();
            fb.put_str_centered(
                bx + bw / 2,
                self.layout.y + row,
                &label,
                bx,
                bx + bw,
                style,
            );
        }
    }

    fn gameplay(&self, fb: &mut FrameBuffer, gameplay: &Gameplay, theme: &Theme) {
        let session = gameplay.session();

        for bin in session.bins().iter() {
            let cat = theme.style(bin.category);
            let color = Rgb::from_array(cat.color);
            let style = CellStyle::new(TEXT, color.mix(self.bg, 0.55));
            if let Some((x, y, w, _)) = self.fill_world(fb, &bin.region, ' ', style) {
                fb.put_str_centered(x + w / 2, y, &cat.label, x, x + w, style.bold());
            }
        }

        for body in gameplay.world().bodies() {
            let Some(item) = session.state().item(body.id) else {
                continue;
            };
            let cat = theme.style(item.category);
            let color = Rgb::from_array(cat.color);
            let mut style = CellStyle::new(Rgb::new(255, 255, 255), color);
            if gameplay.held() == Some(body.id) {
                style.bg = color.mix(Rgb::new(255, 255, 255), 0.35);
                style = style.bold();
            }
            self.fill_world(fb, &body.bounds(), cat.glyph(item.variant), style);
        }

        let button = pause_button();
        let style = CellStyle::new(TEXT, BUTTON).bold();
        if let Some((x, y, w, h)) = self.fill_world(fb, &button, ' ', style) {
            fb.put_str_centered(x + w / 2, y + h / 2, "II", x, x + w, style);
        }

        for label in gameplay.fader().labels() {
            let (x, y) = label.position();
            let x = x.clamp(0.0, WORLD_WIDTH - 1.0);
            let Some((col, row)) = self.layout.world_to_screen(x, y) else {
                continue;
            };
            let fg = match label.value.tone {
                FeedbackTone::Positive => GOOD,
                FeedbackTone::Negative => BAD,
            };
            let mut style = CellStyle::new(fg, self.bg).bold();
            style.dim = label.alpha() < 0.5;
            fb.put_str_centered(
                col,
                row,
                &label.value.text(),
                self.layout.x,
                self.layout.right(),
                style,
            );
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_progress(
    fb: &mut FrameBuffer,
    x: u16,
    y: u16,
    width: u16,
    progress: f32,
    fill: Rgb,
    base: CellStyle,
) {
    let filled = (progress.clamp(0.0, 1.0) * width as f32).round() as u16;
    for i in 0..width {
        if i < filled {
            fb.put_char(x + i, y, '█', CellStyle { fg: fill, ..base });
        } else {
            fb.put_char(x + i, y, '░', CellStyle { dim: true, ..base });
        }
    }
}

fn digits(v: u32) -> u16 {
    let mut n = v;
    let mut len = 1;
    while n >= 10 {
        n /= 10;
        len += 1;
    }
    len
}
