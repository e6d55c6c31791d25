use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{GLYPH_BLOCK, GLYPH_FOOD, THEME_CLASSIC, Theme};
use crate::game::Snapshot;
use crate::grid::{Cell, Grid};
use crate::sink::{Renderer, ScoreSink};
use crate::ui::hud::{HUD_HEIGHT, render_hud};
use crate::ui::menu::render_game_over_menu;

/// Terminal cells needed to show the whole board plus HUD: `(columns, rows)`.
#[must_use]
pub fn required_terminal_size(grid: Grid, cell_size: u16) -> (u16, u16) {
    let columns = grid.size().saturating_mul(cell_size).saturating_add(2);
    let rows = grid.size().saturating_add(2).saturating_add(HUD_HEIGHT);
    (columns, rows)
}

/// Retained view state fed by the driver and drawn by ratatui.
///
/// ratatui diffs each frame against the previous buffer, so redrawing the
/// full board only flushes the cells that changed.
#[derive(Debug)]
pub struct TerminalView {
    grid: Grid,
    cell_size: u16,
    theme: &'static Theme,
    snapshot: Option<Snapshot>,
    score: u32,
    game_over_visible: bool,
    dirty: bool,
}

impl TerminalView {
    #[must_use]
    pub fn new(grid: Grid, cell_size: u16) -> Self {
        Self {
            grid,
            cell_size,
            theme: &THEME_CLASSIC,
            snapshot: None,
            score: 0,
            game_over_visible: false,
            dirty: true,
        }
    }

    /// Returns true once since the last call if anything changed.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn is_game_over_visible(&self) -> bool {
        self.game_over_visible
    }

    /// Renders the full game frame from the retained state.
    pub fn draw(&self, frame: &mut Frame<'_>) {
        let area = frame.area();
        let (columns, rows) = required_terminal_size(self.grid, self.cell_size);

        let [outer] = Layout::vertical([Constraint::Length(rows)])
            .flex(Flex::Center)
            .areas(area);
        let [outer] = Layout::horizontal([Constraint::Length(columns)])
            .flex(Flex::Center)
            .areas(outer);
        let [hud_area, play_area] =
            Layout::vertical([Constraint::Length(HUD_HEIGHT), Constraint::Min(0)]).areas(outer);

        render_hud(frame, hud_area, self.score, self.snapshot.as_ref(), self.theme);

        let block = Block::bordered()
            .border_style(Style::new().fg(self.theme.border_fg))
            .style(Style::new().bg(self.theme.play_bg));
        let inner = block.inner(play_area);
        frame.render_widget(block, play_area);

        if let Some(snapshot) = &self.snapshot {
            self.render_food(frame, inner, snapshot.food_cell);
            self.render_snake(frame, inner, &snapshot.snake_cells);
        }

        if self.game_over_visible {
            render_game_over_menu(frame, play_area, self.score, self.theme);
        }
    }

    fn render_food(&self, frame: &mut Frame<'_>, inner: Rect, food: Cell) {
        let Some((x, y)) = self.logical_to_terminal(inner, food) else {
            return;
        };

        let glyph = GLYPH_FOOD.repeat(usize::from(self.cell_size));
        frame
            .buffer_mut()
            .set_string(x, y, glyph, Style::new().fg(self.theme.food));
    }

    fn render_snake(&self, frame: &mut Frame<'_>, inner: Rect, cells: &[Cell]) {
        let glyph = GLYPH_BLOCK.repeat(usize::from(self.cell_size));
        let buffer = frame.buffer_mut();

        // Draw tail first so the head wins if it overlaps the body on the final tick.
        for (index, cell) in cells.iter().enumerate().rev() {
            let Some((x, y)) = self.logical_to_terminal(inner, *cell) else {
                continue;
            };

            let style = if index == 0 {
                Style::new()
                    .fg(self.theme.snake_head)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::new().fg(self.theme.snake_body)
            };
            buffer.set_string(x, y, &glyph, style);
        }
    }

    fn logical_to_terminal(&self, inner: Rect, cell: Cell) -> Option<(u16, u16)> {
        if !self.grid.in_bounds(cell) {
            return None;
        }

        let x_offset = u16::try_from(cell.x).ok()?.checked_mul(self.cell_size)?;
        let y_offset = u16::try_from(cell.y).ok()?;

        let x = inner.x.saturating_add(x_offset);
        let y = inner.y.saturating_add(y_offset);
        if x >= inner.right() || y >= inner.bottom() {
            return None;
        }

        Some((x, y))
    }
}

impl Renderer for TerminalView {
    fn render(&mut self, snapshot: &Snapshot) {
        self.snapshot = Some(snapshot.clone());
        self.dirty = true;
    }
}

impl ScoreSink for TerminalView {
    fn update_score(&mut self, score: u32) {
        self.score = score;
        self.dirty = true;
    }

    fn show_game_over(&mut self) {
        self.game_over_visible = true;
        self.dirty = true;
    }

    fn hide_game_over(&mut self) {
        self.game_over_visible = false;
        self.dirty = true;
    }
}
