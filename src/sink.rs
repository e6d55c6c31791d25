use crate::game::Snapshot;

/// Draws board snapshots. Called once per tick and on (re)start.
pub trait Renderer {
    fn render(&mut self, snapshot: &Snapshot);
}

/// Receives score changes and game-over transitions.
pub trait ScoreSink {
    fn update_score(&mut self, score: u32);
    fn show_game_over(&mut self);
    fn hide_game_over(&mut self);
}
