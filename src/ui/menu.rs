use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::config::Theme;

const POPUP_WIDTH: u16 = 36;
const POPUP_HEIGHT: u16 = 7;

pub const GAME_OVER_TITLE: &str = "Game Over!";
pub const GAME_OVER_HINT: &str = "Press any arrow key to restart.";

/// Draws the game-over screen as a centered popup.
pub fn render_game_over_menu(frame: &mut Frame<'_>, area: Rect, score: u32, theme: &Theme) {
    let popup = centered_popup(area, POPUP_WIDTH, POPUP_HEIGHT);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from(GAME_OVER_TITLE).style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from(format!("Score: {score}")),
        Line::from(""),
        Line::from(GAME_OVER_HINT),
        Line::from("[Q] Quit"),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.game_over))
            .block(Block::bordered()),
        popup,
    );
}

fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let [mid] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [center] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(mid);

    center
}
