use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::Theme;
use crate::game::Snapshot;

/// Rows reserved above the play area.
pub const HUD_HEIGHT: u16 = 1;

/// Draws the score on the left and pacing on the right of one row.
pub fn render_hud(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    snapshot: Option<&Snapshot>,
    theme: &Theme,
) {
    let [score_area, pace_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Min(0)]).areas(area);

    frame.render_widget(
        Paragraph::new(Line::from(format!("Score: {score}"))).style(
            Style::default()
                .fg(theme.hud_score)
                .add_modifier(Modifier::BOLD),
        ),
        score_area,
    );

    let Some(snapshot) = snapshot else {
        return;
    };

    frame.render_widget(
        Paragraph::new(pace_line(snapshot, theme)).alignment(Alignment::Right),
        pace_area,
    );
}

fn pace_line(snapshot: &Snapshot, theme: &Theme) -> Line<'static> {
    let muted = Style::default().fg(theme.hud_muted);
    Line::from(vec![
        Span::styled(format!("+{}", snapshot.points_per_food), muted),
        Span::styled(" ", muted),
        Span::styled(format!("{}ms", snapshot.tick_interval.as_millis()), muted),
    ])
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::config::THEME_CLASSIC;
    use crate::game::Snapshot;
    use crate::grid::Cell;

    use super::pace_line;

    #[test]
    fn pace_line_shows_points_and_interval() {
        let snapshot = Snapshot {
            snake_cells: vec![Cell::new(0, 0)],
            food_cell: Cell::new(1, 1),
            score: 100,
            points_per_food: 50,
            tick_interval: Duration::from_millis(133),
            game_over: false,
        };

        assert_eq!(pace_line(&snapshot, &THEME_CLASSIC).to_string(), "+50 133ms");
    }
}
