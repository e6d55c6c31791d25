use std::time::Instant;

use log::info;
use rand::Rng;
use rand::rngs::StdRng;

use crate::error::GameError;
use crate::game::{DirectionResponse, GameEngine, ScheduleChange, Snapshot};
use crate::input::Direction;
use crate::scheduler::TickScheduler;
use crate::sink::{Renderer, ScoreSink};

/// Runs an engine against a periodic tick driver and a view.
///
/// All calls happen on one thread: the main loop feeds key presses through
/// [`handle_direction`](GameDriver::handle_direction) and polls
/// [`on_timer`](GameDriver::on_timer), so ticks never overlap.
#[derive(Debug)]
pub struct GameDriver<V, R = StdRng> {
    engine: GameEngine<R>,
    scheduler: TickScheduler,
    view: V,
}

impl<V, R> GameDriver<V, R>
where
    V: Renderer + ScoreSink,
    R: Rng,
{
    /// Shows the opening board and starts ticking at the session interval.
    pub fn start(engine: GameEngine<R>, view: V, now: Instant) -> Self {
        let mut driver = Self {
            engine,
            scheduler: TickScheduler::new(),
            view,
        };
        let snapshot = driver.engine.snapshot();
        driver.begin_session(&snapshot, now);
        driver
    }

    /// Applies a direction key; after game over the key restarts the session.
    ///
    /// Returns whether a turn was queued or a restart happened.
    pub fn handle_direction(
        &mut self,
        direction: Direction,
        now: Instant,
    ) -> Result<bool, GameError> {
        match self.engine.handle_direction(direction)? {
            DirectionResponse::Steer { accepted } => Ok(accepted),
            DirectionResponse::Restarted(snapshot) => {
                self.begin_session(&snapshot, now);
                Ok(true)
            }
        }
    }

    /// Runs one tick if the scheduler says one is due. Returns whether it ticked.
    pub fn on_timer(&mut self, now: Instant) -> Result<bool, GameError> {
        if !self.scheduler.take_due(now) {
            return Ok(false);
        }

        let Some(outcome) = self.engine.tick()? else {
            // A stale task outlived the game; make sure it is gone.
            self.scheduler.cancel();
            return Ok(false);
        };

        if outcome.ate {
            self.view.update_score(outcome.snapshot.score);
        }

        match outcome.schedule {
            ScheduleChange::Keep => {}
            ScheduleChange::Restart(interval) => {
                self.scheduler.start(interval, now);
            }
            ScheduleChange::Stop => {
                self.scheduler.cancel();
                self.view.show_game_over();
            }
        }

        self.view.render(&outcome.snapshot);
        Ok(true)
    }

    fn begin_session(&mut self, snapshot: &Snapshot, now: Instant) {
        self.view.hide_game_over();
        self.view.update_score(snapshot.score);
        self.view.render(snapshot);
        self.scheduler.start(self.engine.session().tick_interval, now);
        info!(
            "session started, ticking every {:?}",
            self.engine.session().tick_interval
        );
    }

    #[must_use]
    pub fn engine(&self) -> &GameEngine<R> {
        &self.engine
    }

    /// Mutable engine access, e.g. to stage a scenario.
    pub fn engine_mut(&mut self) -> &mut GameEngine<R> {
        &mut self.engine
    }

    #[must_use]
    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use crate::config::GameConfig;
    use crate::game::{GameEngine, Phase, Snapshot};
    use crate::grid::Cell;
    use crate::input::Direction;
    use crate::sink::{Renderer, ScoreSink};
    use crate::snake::Snake;

    use super::GameDriver;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Render { game_over: bool },
        Score(u32),
        ShowGameOver,
        HideGameOver,
    }

    #[derive(Debug, Default)]
    struct Recorder {
        calls: Vec<Call>,
        last: Option<Snapshot>,
    }

    impl Renderer for Recorder {
        fn render(&mut self, snapshot: &Snapshot) {
            self.calls.push(Call::Render {
                game_over: snapshot.game_over,
            });
            self.last = Some(snapshot.clone());
        }
    }

    impl ScoreSink for Recorder {
        fn update_score(&mut self, score: u32) {
            self.calls.push(Call::Score(score));
        }

        fn show_game_over(&mut self) {
            self.calls.push(Call::ShowGameOver);
        }

        fn hide_game_over(&mut self) {
            self.calls.push(Call::HideGameOver);
        }
    }

    const STEP: Duration = Duration::from_millis(200);

    fn driver(t0: Instant) -> GameDriver<Recorder> {
        let engine =
            GameEngine::with_seed(GameConfig::default(), 21).expect("default config is valid");
        GameDriver::start(engine, Recorder::default(), t0)
    }

    #[test]
    fn start_renders_and_schedules() {
        let t0 = Instant::now();
        let driver = driver(t0);

        assert_eq!(
            driver.view().calls,
            vec![
                Call::HideGameOver,
                Call::Score(0),
                Call::Render { game_over: false }
            ]
        );
        assert_eq!(driver.scheduler().interval(), Some(STEP));
    }

    #[test]
    fn timer_ticks_only_when_due() {
        let t0 = Instant::now();
        let mut driver = driver(t0);
        driver.engine_mut().place_food(Cell::new(0, 0));

        assert!(!driver.on_timer(t0 + Duration::from_millis(10)).expect("no error"));
        assert!(driver.on_timer(t0 + STEP).expect("no error"));
        assert_eq!(driver.engine().tick_count(), 1);
    }

    #[test]
    fn game_over_stops_scheduler_and_shows_overlay() {
        let t0 = Instant::now();
        let mut driver = driver(t0);
        driver.engine_mut().set_snake(
            Snake::from_segments(vec![Cell::new(0, 4)], Direction::Left)
                .expect("segments are non-empty"),
        );

        assert!(driver.on_timer(t0 + STEP).expect("no error"));

        assert_eq!(driver.engine().phase(), Phase::GameOver);
        assert!(!driver.scheduler().is_running());
        assert!(driver.view().calls.ends_with(&[
            Call::ShowGameOver,
            Call::Render { game_over: true }
        ]));
        assert!(!driver.on_timer(t0 + STEP * 5).expect("no error"));
    }

    #[test]
    fn restart_key_reschedules_a_single_stream() {
        let t0 = Instant::now();
        let mut driver = driver(t0);
        driver.engine_mut().set_snake(
            Snake::from_segments(vec![Cell::new(0, 4)], Direction::Left)
                .expect("segments are non-empty"),
        );
        driver.on_timer(t0 + STEP).expect("no error");
        let dead_task = driver.scheduler().task_id();
        assert_eq!(dead_task, None);

        let t1 = t0 + STEP * 3;
        assert!(driver.handle_direction(Direction::Down, t1).expect("restart"));

        assert_eq!(driver.engine().phase(), Phase::Playing);
        assert_eq!(driver.scheduler().interval(), Some(STEP));
        assert!(driver.view().calls.ends_with(&[
            Call::HideGameOver,
            Call::Score(0),
            Call::Render { game_over: false }
        ]));
        assert!(!driver.on_timer(t1 + Duration::from_millis(199)).expect("no error"));
        assert!(driver.on_timer(t1 + STEP).expect("no error"));
    }

    #[test]
    fn speed_boost_restarts_the_timer_at_the_new_interval() {
        let t0 = Instant::now();
        let mut driver = driver(t0);
        let engine = driver.engine_mut();
        engine.set_snake(
            Snake::from_segments(vec![Cell::new(5, 5)], Direction::Right)
                .expect("segments are non-empty"),
        );

        let mut now = t0;
        for step in 0..10 {
            let head = driver.engine().snake().head();
            driver.engine_mut().place_food(Cell::new(head.x + 1, head.y));
            let before = driver.scheduler().task_id();
            now += driver.scheduler().interval().expect("running");
            assert!(driver.on_timer(now).expect("no error"));

            let boosted = step == 9;
            assert_eq!(driver.scheduler().task_id() != before, boosted, "step {step}");
        }

        assert_eq!(driver.engine().session().score, 100);
        assert_eq!(
            driver.scheduler().interval(),
            Some(Duration::from_millis(133))
        );
        let score_updates = driver
            .view()
            .calls
            .iter()
            .filter(|call| matches!(call, Call::Score(_)))
            .count();
        assert_eq!(score_updates, 11);
        assert_eq!(
            driver.view().last.as_ref().map(|s| s.points_per_food),
            Some(50)
        );
    }
}
