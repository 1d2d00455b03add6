use serpent_engine::coords::{Rect, Vec2};
use serpent_engine::core::{App, AppControl, FrameCtx};
use serpent_engine::input::Key;
use serpent_engine::paint::Color;
use serpent_engine::post::Compositor;
use serpent_engine::render::shapes::{RectRenderer, TextRenderer};
use serpent_engine::render::{RenderCtx, RenderTarget};
use serpent_engine::scene::{DrawList, ZIndex};
use serpent_engine::text::FontStore;
use serpent_engine::time::FixedStep;

use crate::effects::EffectState;
use crate::settings::Settings;
use crate::snake::Snake;
use crate::theme::{theme, Theme};

/// Playfield size in cells.
const GRID: u32 = 24;

/// Gap around each cell as a fraction of the cell size.
const CELL_PADDING: f32 = 0.05;

/// Seconds per game tick.
const TICK: f32 = 0.16;

/// Background behind the playfield.
const CLEAR_COLOR: Color = Color::new(0.02, 0.02, 0.03, 1.0);

/// Vignette strength on the menu screens.
const MENU_VIGNETTE: f32 = 0.9;

const MENU_ITEMS: [&str; 3] = ["Start Game", "Settings", "Quit"];

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum GameState {
    Menu,
    Settings,
    Playing,
    Paused,
    GameOver,
    Win,
}

/// Settings screen rows, in display order.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum SettingsRow {
    Vsync,
    Bloom,
    BlurKind,
    BloomStrength,
    BloomRadius,
    Exposure,
    Chroma,
    ChromaAmount,
    ChromaBias,
    Vignette,
    Shake,
    Theme,
    Back,
}

const SETTINGS_ROWS: [SettingsRow; 13] = [
    SettingsRow::Vsync,
    SettingsRow::Bloom,
    SettingsRow::BlurKind,
    SettingsRow::BloomStrength,
    SettingsRow::BloomRadius,
    SettingsRow::Exposure,
    SettingsRow::Chroma,
    SettingsRow::ChromaAmount,
    SettingsRow::ChromaBias,
    SettingsRow::Vignette,
    SettingsRow::Shake,
    SettingsRow::Theme,
    SettingsRow::Back,
];

/// The snake game: state machine, fixed-step simulation and scene recording.
pub struct Game {
    fonts: FontStore,
    settings: Settings,
    state: GameState,
    snake: Snake,
    /// Self-playing snake shown behind the menu screens.
    preview: Snake,
    effects: EffectState,
    step: FixedStep,
    preview_step: FixedStep,
    menu_cursor: usize,
    settings_cursor: usize,
    draw_list: DrawList,
    rects: RectRenderer,
    texts: TextRenderer,
    compositor: Option<Compositor>,
    /// Smoothed frames-per-second estimate for the HUD.
    fps: f32,
}

impl Game {
    pub fn new(fonts: FontStore, settings: Settings) -> Self {
        Self {
            fonts,
            settings,
            state: GameState::Menu,
            snake: Snake::new(GRID, GRID),
            preview: Snake::new(GRID, GRID),
            effects: EffectState::default(),
            step: FixedStep::new(TICK),
            preview_step: FixedStep::new(TICK),
            menu_cursor: 0,
            settings_cursor: 0,
            draw_list: DrawList::new(),
            rects: RectRenderer::new(),
            texts: TextRenderer::new(),
            compositor: None,
            fps: 0.0,
        }
    }

    fn start_game(&mut self) {
        self.snake.reset();
        self.effects.reset();
        self.step.reset();
        self.state = GameState::Playing;
    }

    fn end_game(&mut self, won: bool) {
        let score = self.snake.score();
        if score > self.settings.high_score {
            self.settings.high_score = score;
        }
        if won {
            self.state = GameState::Win;
        } else {
            self.state = GameState::GameOver;
            self.effects.on_death(self.settings.shake_on_death);
        }
    }

    fn theme(&self) -> &'static Theme {
        theme(self.settings.theme_index)
    }

    // ── update ────────────────────────────────────────────────────────────

    fn steer_from_input(&mut self, ctx: &FrameCtx<'_, '_>) {
        let bindings = [
            (Key::ArrowUp, (0, -1)),
            (Key::W, (0, -1)),
            (Key::ArrowDown, (0, 1)),
            (Key::S, (0, 1)),
            (Key::ArrowLeft, (-1, 0)),
            (Key::A, (-1, 0)),
            (Key::ArrowRight, (1, 0)),
            (Key::D, (1, 0)),
        ];
        for (key, dir) in bindings {
            if ctx.input_frame.pressed(key) {
                self.snake.change_dir(dir);
            }
        }
    }

    /// Advances the menu-screen snake, chasing the apple one axis at a time.
    fn tick_preview(&mut self, dt: f32) {
        let ticks = self.preview_step.advance(dt);
        for _ in 0..ticks {
            let head = self.preview.head();
            let apple = self.preview.apple;
            let dx = apple.0 - head.0;
            let dy = apple.1 - head.1;
            if dx != 0 {
                self.preview.change_dir((dx.signum(), 0));
            } else if dy != 0 {
                self.preview.change_dir((0, dy.signum()));
            }
            let out = self.preview.step();
            if out.died || out.won {
                self.preview.reset();
            }
        }
    }

    fn menu_nav(ctx: &FrameCtx<'_, '_>) -> i32 {
        let mut delta = 0;
        if ctx.input_frame.pressed(Key::ArrowUp) || ctx.input_frame.pressed(Key::W) {
            delta -= 1;
        }
        if ctx.input_frame.pressed(Key::ArrowDown) || ctx.input_frame.pressed(Key::S) {
            delta += 1;
        }
        delta
    }

    fn update_menu(&mut self, ctx: &FrameCtx<'_, '_>, dt: f32) -> AppControl {
        self.tick_preview(dt);

        let n = MENU_ITEMS.len();
        let delta = Self::menu_nav(ctx);
        self.menu_cursor = (self.menu_cursor as i32 + delta).rem_euclid(n as i32) as usize;

        if ctx.input_frame.pressed(Key::Enter) || ctx.input_frame.pressed(Key::Space) {
            match self.menu_cursor {
                0 => self.start_game(),
                1 => {
                    self.settings_cursor = 0;
                    self.state = GameState::Settings;
                }
                _ => return AppControl::Exit,
            }
        }
        if ctx.input_frame.pressed(Key::Escape) {
            return AppControl::Exit;
        }
        AppControl::Continue
    }

    fn update_settings(&mut self, ctx: &mut FrameCtx<'_, '_>, dt: f32) -> AppControl {
        self.tick_preview(dt);

        let n = SETTINGS_ROWS.len();
        let delta = Self::menu_nav(ctx);
        self.settings_cursor = (self.settings_cursor as i32 + delta).rem_euclid(n as i32) as usize;

        let mut adjust = 0;
        if ctx.input_frame.pressed(Key::ArrowLeft) || ctx.input_frame.pressed(Key::A) {
            adjust -= 1;
        }
        if ctx.input_frame.pressed(Key::ArrowRight) || ctx.input_frame.pressed(Key::D) {
            adjust += 1;
        }
        let activate = ctx.input_frame.pressed(Key::Enter) || ctx.input_frame.pressed(Key::Space);

        if adjust != 0 || activate {
            self.apply_settings_row(ctx, SETTINGS_ROWS[self.settings_cursor], adjust, activate);
        }

        if ctx.input_frame.pressed(Key::Escape) {
            self.state = GameState::Menu;
        }
        AppControl::Continue
    }

    fn apply_settings_row(
        &mut self,
        ctx: &mut FrameCtx<'_, '_>,
        row: SettingsRow,
        adjust: i32,
        activate: bool,
    ) {
        let s = &mut self.settings;
        match row {
            SettingsRow::Vsync => {
                s.vsync = !s.vsync;
                ctx.gpu.set_vsync(s.vsync);
            }
            SettingsRow::Bloom => s.bloom = !s.bloom,
            SettingsRow::BlurKind => s.use_kawase = !s.use_kawase,
            SettingsRow::Chroma => s.chroma_enabled = !s.chroma_enabled,
            SettingsRow::Shake => s.shake_on_death = !s.shake_on_death,
            SettingsRow::BloomStrength => {
                s.bloom_strength = (s.bloom_strength + adjust as f32 * 0.1).clamp(0.0, 3.0);
            }
            SettingsRow::BloomRadius => {
                s.bloom_radius = (s.bloom_radius + adjust as f32 * 0.25).clamp(0.5, 6.0);
            }
            SettingsRow::Exposure => {
                s.exposure = (s.exposure + adjust as f32 * 0.1).clamp(0.1, 3.0);
            }
            SettingsRow::ChromaAmount => {
                s.chroma_amount = (s.chroma_amount + adjust as f32 * 0.005).clamp(0.0, 0.1);
            }
            SettingsRow::ChromaBias => {
                s.chroma_bias = (s.chroma_bias + adjust as f32 * 0.25).clamp(0.0, 4.0);
            }
            SettingsRow::Vignette => {
                s.vignette = (s.vignette + adjust as f32 * 0.05).clamp(0.0, 1.0);
            }
            SettingsRow::Theme => s.cycle_theme(adjust >= 0),
            SettingsRow::Back => {
                if activate {
                    self.state = GameState::Menu;
                }
            }
        }
    }

    fn update_playing(&mut self, ctx: &FrameCtx<'_, '_>, dt: f32) {
        self.steer_from_input(ctx);

        if ctx.input_frame.pressed(Key::Escape) || ctx.input_frame.pressed(Key::P) {
            self.state = GameState::Paused;
            return;
        }

        let ticks = self.step.advance(dt);
        for _ in 0..ticks {
            let out = self.snake.step();
            if out.won {
                self.end_game(true);
                break;
            }
            if out.died {
                self.end_game(false);
                break;
            }
        }
    }

    fn update_paused(&mut self, ctx: &FrameCtx<'_, '_>) {
        if ctx.input_frame.pressed(Key::Escape)
            || ctx.input_frame.pressed(Key::Enter)
            || ctx.input_frame.pressed(Key::P)
        {
            self.step.reset();
            self.state = GameState::Playing;
        } else if ctx.input_frame.pressed(Key::M) {
            self.state = GameState::Menu;
        }
    }

    fn update_ended(&mut self, ctx: &FrameCtx<'_, '_>) {
        if ctx.input_frame.pressed(Key::R) || ctx.input_frame.pressed(Key::Enter) {
            self.start_game();
        } else if ctx.input_frame.pressed(Key::M) {
            self.state = GameState::Menu;
        }
    }

    // ── scene ─────────────────────────────────────────────────────────────

    /// Playfield geometry for a window of logical size `(w, h)`: the board is
    /// the largest centered square, split into `GRID` cells.
    fn board_rect(w: f32, h: f32) -> (f32, f32, f32, f32) {
        let board = w.min(h) * 0.92;
        let cell = board / GRID as f32;
        let ox = (w - board) * 0.5;
        let oy = (h - board) * 0.5;
        (ox, oy, board, cell)
    }

    fn push_frame(&mut self, rect: Rect, thickness: f32, z: ZIndex, color: Color) {
        let Rect { origin, size } = rect;
        let t = thickness;
        self.draw_list
            .push_solid_rect(z, Rect::new(origin.x - t, origin.y - t, size.x + 2.0 * t, t), color);
        self.draw_list
            .push_solid_rect(z, Rect::new(origin.x - t, origin.y + size.y, size.x + 2.0 * t, t), color);
        self.draw_list
            .push_solid_rect(z, Rect::new(origin.x - t, origin.y, t, size.y), color);
        self.draw_list
            .push_solid_rect(z, Rect::new(origin.x + size.x, origin.y, t, size.y), color);
    }

    fn push_playfield(&mut self, w: f32, h: f32, preview: bool) {
        let theme = self.theme();
        let (mut ox, mut oy, board, cell) = Self::board_rect(w, h);

        // Screen shake only runs on the game-over screen.
        if self.state == GameState::GameOver {
            let amount = self.effects.shake_amount() * cell;
            let t = self.effects.menu_anim;
            ox += (t * 37.0).sin() * amount;
            oy += (t * 53.0).cos() * amount;
        }

        let board_rect = Rect::new(ox, oy, board, board);
        self.draw_list
            .push_solid_rect(ZIndex::new(0), board_rect, Color::new(0.05, 0.05, 0.06, 1.0));
        self.push_frame(board_rect, 3.0, ZIndex::new(1), Color::new(0.08, 0.08, 0.08, 1.0));
        self.push_frame(board_rect, 1.0, ZIndex::new(1), theme.border);

        let snake = if preview { &self.preview } else { &self.snake };
        let cells: Vec<(i32, i32)> = snake.positions().collect();
        let apple = snake.apple;

        let pad = cell * CELL_PADDING;
        let inner = cell - 2.0 * pad;
        let cell_rect = |c: i32, r: i32| {
            Rect::new(ox + c as f32 * cell + pad, oy + r as f32 * cell + pad, inner, inner)
        };

        for (c, r) in cells {
            self.draw_list
                .push_rect(ZIndex::new(2), cell_rect(c, r), inner * 0.2, theme.snake);
        }
        self.draw_list
            .push_rect(ZIndex::new(2), cell_rect(apple.0, apple.1), inner * 0.45, theme.apple);
    }

    fn push_centered_text(&mut self, text: &str, y: f32, size: f32, w: f32, z: i32, color: Color) {
        let tw = self.fonts.measure_text(text, size).x;
        self.draw_list
            .push_text(ZIndex::new(z), text, Vec2::new((w - tw) * 0.5, y), size, color);
    }

    fn push_menu(&mut self, w: f32, h: f32) {
        let theme = self.theme();
        self.push_centered_text("Snake Shader", h * 0.16, 82.0, w, 9, theme.title);

        let high = format!("HIGH SCORE: {}", self.settings.high_score);
        self.push_centered_text(&high, h * 0.16 + 104.0, 36.0, w, 9, theme.menu_text);

        let base_y = h * 0.48;
        let spacing = 56.0;
        let size = 40.0;
        for (i, item) in MENU_ITEMS.iter().enumerate() {
            let y = base_y + i as f32 * spacing;
            let selected = i == self.menu_cursor;
            if selected {
                let tw = self.fonts.measure_text(item, size).x;
                let pulse = 0.75 + 0.25 * self.effects.menu_anim.sin();
                let hl = theme.menu_highlight.with_alpha(theme.menu_highlight.a * pulse);
                self.draw_list.push_rect(
                    ZIndex::new(8),
                    Rect::new((w - tw) * 0.5 - 24.0, y - 8.0, tw + 48.0, size + 16.0),
                    12.0,
                    hl,
                );
            }
            let color = if selected { theme.menu_text_selected } else { theme.menu_text };
            self.push_centered_text(item, y, size, w, 9, color);
        }
    }

    fn settings_row_label(&self, row: SettingsRow) -> (&'static str, String) {
        let s = &self.settings;
        let on_off = |v: bool| if v { "On" } else { "Off" }.to_string();
        match row {
            SettingsRow::Vsync => ("VSync", on_off(s.vsync)),
            SettingsRow::Bloom => ("Bloom", on_off(s.bloom)),
            SettingsRow::BlurKind => (
                "Blur",
                if s.use_kawase { "Kawase" } else { "Gaussian" }.to_string(),
            ),
            SettingsRow::BloomStrength => ("Bloom Strength", format!("{:.2}", s.bloom_strength)),
            SettingsRow::BloomRadius => ("Bloom Radius", format!("{:.2}", s.bloom_radius)),
            SettingsRow::Exposure => ("Exposure", format!("{:.2}", s.exposure)),
            SettingsRow::Chroma => ("Chromatic Aberration", on_off(s.chroma_enabled)),
            SettingsRow::ChromaAmount => ("Chroma Amount", format!("{:.3}", s.chroma_amount)),
            SettingsRow::ChromaBias => ("Chroma Bias", format!("{:.2}", s.chroma_bias)),
            SettingsRow::Vignette => ("Vignette", format!("{:.2}", s.vignette)),
            SettingsRow::Shake => ("Shake on Death", on_off(s.shake_on_death)),
            SettingsRow::Theme => ("Theme", theme(s.theme_index).name.to_string()),
            SettingsRow::Back => ("Back", String::new()),
        }
    }

    fn push_settings(&mut self, w: f32, h: f32) {
        let theme = self.theme();
        self.push_centered_text("Settings", h * 0.07, 56.0, w, 9, theme.title);

        let base_y = h * 0.19;
        let spacing = 42.0;
        let size = 28.0;
        let label_x = w * 0.16;
        let value_end = w * 0.84;

        for (i, row) in SETTINGS_ROWS.iter().enumerate() {
            let y = base_y + i as f32 * spacing;
            let selected = i == self.settings_cursor;
            if selected {
                let hl = theme.menu_highlight;
                self.draw_list.push_rect(
                    ZIndex::new(8),
                    Rect::new(w * 0.14, y - 6.0, w * 0.72, size + 12.0),
                    8.0,
                    hl,
                );
            }
            let color = if selected { theme.menu_text_selected } else { theme.menu_text };
            let (label, value) = self.settings_row_label(*row);
            self.draw_list
                .push_text(ZIndex::new(9), label, Vec2::new(label_x, y), size, color);
            if !value.is_empty() {
                let vw = self.fonts.measure_text(&value, size).x;
                self.draw_list
                    .push_text(ZIndex::new(9), value, Vec2::new(value_end - vw, y), size, color);
            }
        }

        self.push_centered_text(
            "Left/Right = Adjust | Enter = Toggle | Esc = Back",
            h * 0.93,
            22.0,
            w,
            9,
            theme.menu_text,
        );
    }

    fn push_hud(&mut self, w: f32) {
        let theme = self.theme();
        let score = format!("SCORE: {}", self.snake.score());
        let tw = self.fonts.measure_text(&score, 32.0).x;
        self.draw_list
            .push_text(ZIndex::new(5), score, Vec2::new(w - tw - 24.0, 20.0), 32.0, theme.title);

        let fps = format!("FPS: {:.0}", self.fps);
        self.draw_list
            .push_text(ZIndex::new(5), fps, Vec2::new(24.0, 20.0), 20.0, theme.menu_text);
    }

    fn push_overlay(&mut self, w: f32, h: f32, tint: Color, title: &str, hint: &str) {
        let theme = self.theme();
        self.draw_list
            .push_solid_rect(ZIndex::new(8), Rect::new(0.0, 0.0, w, h), tint);
        self.push_centered_text(title, h * 0.38, 72.0, w, 9, theme.title);
        self.push_centered_text(hint, h * 0.38 + 96.0, 30.0, w, 9, theme.menu_text);
    }

    fn build_scene(&mut self, w: f32, h: f32) {
        self.draw_list.clear();
        match self.state {
            GameState::Menu => {
                self.push_playfield(w, h, true);
                self.push_menu(w, h);
            }
            GameState::Settings => {
                self.push_playfield(w, h, true);
                self.push_settings(w, h);
            }
            GameState::Playing => {
                self.push_playfield(w, h, false);
                self.push_hud(w);
            }
            GameState::Paused => {
                self.push_playfield(w, h, false);
                self.push_hud(w);
                self.push_overlay(
                    w,
                    h,
                    Color::new(0.0, 0.0, 0.0, 0.45),
                    "PAUSED",
                    "Esc = Resume | M = Menu",
                );
            }
            GameState::GameOver => {
                self.push_playfield(w, h, false);
                self.push_hud(w);
                self.push_overlay(
                    w,
                    h,
                    Color::new(1.0, 0.0, 0.0, 0.25),
                    "GAME OVER",
                    "R = Retry | M = Menu",
                );
            }
            GameState::Win => {
                self.push_playfield(w, h, false);
                self.push_hud(w);
                self.push_overlay(
                    w,
                    h,
                    Color::new(0.0, 0.5, 0.0, 0.25),
                    "YOU WIN!",
                    "R = Again | M = Menu",
                );
            }
        }
    }
}

impl App for Game {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let dt = ctx.time.dt;
        self.effects.update(dt);
        if dt > 0.0 {
            let instant = 1.0 / dt;
            self.fps = if self.fps > 0.0 {
                self.fps * 0.9 + instant * 0.1
            } else {
                instant
            };
        }

        let control = match self.state {
            GameState::Menu => self.update_menu(ctx, dt),
            GameState::Settings => self.update_settings(ctx, dt),
            GameState::Playing => {
                self.update_playing(ctx, dt);
                AppControl::Continue
            }
            GameState::Paused => {
                self.update_paused(ctx);
                AppControl::Continue
            }
            GameState::GameOver | GameState::Win => {
                self.update_ended(ctx);
                AppControl::Continue
            }
        };
        if control == AppControl::Exit {
            return AppControl::Exit;
        }

        let (w, h) = ctx.window.logical_size();
        self.build_scene(w, h);

        let in_menu = matches!(self.state, GameState::Menu | GameState::Settings);
        // Play vignette creeps up with the score, so long runs close in a bit.
        let vignette = if in_menu {
            MENU_VIGNETTE
        } else {
            (self.settings.vignette + self.snake.score() as f32 * 0.01).min(1.0)
        };
        let chroma = self.effects.chroma_amount(self.settings.chroma_amount);
        let params = self.settings.effect_params(chroma, vignette);

        ctx.render(Color::black(), |rctx, target| {
            let (pw, ph) = rctx.physical_size();
            if self.compositor.is_none() {
                self.compositor = Some(Compositor::new(rctx.device, rctx.surface_format, pw, ph));
            }
            let Some(compositor) = self.compositor.as_mut() else {
                return;
            };
            if compositor.size() != (pw, ph) {
                compositor.resize(rctx.device, pw, ph);
            }

            compositor.begin_scene(target.encoder, CLEAR_COLOR);

            let scene_ctx = RenderCtx::new(
                rctx.device,
                rctx.queue,
                compositor.scene_format(),
                rctx.viewport,
                rctx.scale_factor,
            );
            {
                let mut scene = RenderTarget::new(target.encoder, compositor.scene_view());
                self.rects.render(&scene_ctx, &mut scene, &mut self.draw_list);
                self.texts
                    .render(&scene_ctx, &mut scene, &mut self.draw_list, &self.fonts);
            }

            compositor.render(rctx.device, rctx.queue, target.encoder, target.color_view, &params);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_is_a_centered_square() {
        let (ox, oy, board, cell) = Game::board_rect(1000.0, 800.0);
        assert!((board - 800.0 * 0.92).abs() < 1e-3);
        assert!((cell * GRID as f32 - board).abs() < 1e-3);
        assert!((ox - (1000.0 - board) * 0.5).abs() < 1e-3);
        assert!((oy - (800.0 - board) * 0.5).abs() < 1e-3);
    }

    #[test]
    fn settings_rows_cover_every_setting() {
        assert_eq!(SETTINGS_ROWS.len(), 13);
        assert_eq!(SETTINGS_ROWS[SETTINGS_ROWS.len() - 1], SettingsRow::Back);
    }
}
