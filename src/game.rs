use std::time::Duration;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::GameConfig;
use crate::error::GameError;
use crate::food::FoodSpawner;
use crate::grid::{Cell, Grid};
use crate::input::Direction;
use crate::snake::Snake;

/// Direction the snake faces at (re)start.
pub const START_DIRECTION: Direction = Direction::Up;

/// High-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Phase {
    Playing,
    GameOver,
}

/// Which checks fired on the tick that ended the game. Both may be true.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameOverCause {
    pub wall: bool,
    pub body: bool,
}

/// Score and pacing for one session.
///
/// `score` and `points_per_food` only increase and `tick_interval` only
/// decreases, once, when the boost latch is set. Only a restart resets them.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSession {
    pub score: u32,
    pub tick_interval: Duration,
    pub points_per_food: u32,
    pub speed_boost_applied: bool,
    pub phase: Phase,
}

impl GameSession {
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self {
            score: 0,
            tick_interval: config.initial_interval(),
            points_per_food: config.initial_points_per_food,
            speed_boost_applied: false,
            phase: Phase::Playing,
        }
    }
}

/// Immutable view of the board handed to renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Head first.
    pub snake_cells: Vec<Cell>,
    pub food_cell: Cell,
    pub score: u32,
    pub points_per_food: u32,
    pub tick_interval: Duration,
    pub game_over: bool,
}

/// What the periodic driver must do after a tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ScheduleChange {
    Keep,
    /// Cancel the current driver and start a new one at this interval.
    Restart(Duration),
    Stop,
}

/// Result of one [`GameEngine::tick`].
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    pub snapshot: Snapshot,
    pub ate: bool,
    pub schedule: ScheduleChange,
}

/// Result of feeding a direction key to the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum DirectionResponse {
    /// Playing: whether the turn was queued for the next tick.
    Steer { accepted: bool },
    /// GameOver: the key restarted the session.
    Restarted(Snapshot),
}

/// Owns one game session and advances it tick by tick.
#[derive(Debug, Clone)]
pub struct GameEngine<R = StdRng> {
    config: GameConfig,
    grid: Grid,
    snake: Snake,
    spawner: FoodSpawner<R>,
    food: Cell,
    session: GameSession,
    pending_direction: Option<Direction>,
    game_over_cause: Option<GameOverCause>,
    tick_count: u64,
}

impl GameEngine<StdRng> {
    /// Creates a session seeded from OS entropy.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic session for tests and reproducible simulations.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    /// Validates `config` and starts a fresh session in [`Phase::Playing`].
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self, GameError> {
        config.validate()?;

        let grid = Grid::new(config.grid_size);
        let snake = Snake::new(grid.center(), START_DIRECTION);
        let mut spawner = FoodSpawner::new(rng);
        let food = spawner.respawn(&snake, grid)?;
        let session = GameSession::new(&config);

        Ok(Self {
            config,
            grid,
            snake,
            spawner,
            food,
            session,
            pending_direction: None,
            game_over_cause: None,
            tick_count: 0,
        })
    }

    /// Resets snake, food, score, pacing and the boost latch.
    pub fn restart(&mut self) -> Result<Snapshot, GameError> {
        self.snake.reset(self.grid.center(), START_DIRECTION);
        self.food = self.spawner.respawn(&self.snake, self.grid)?;
        self.session = GameSession::new(&self.config);
        self.pending_direction = None;
        self.game_over_cause = None;
        self.tick_count = 0;

        info!(
            "session restarted: grid {0}x{0}, interval {1:?}",
            self.grid.size(),
            self.session.tick_interval
        );
        Ok(self.snapshot())
    }

    /// Routes a direction key: steers while playing, restarts after game over.
    pub fn handle_direction(
        &mut self,
        direction: Direction,
    ) -> Result<DirectionResponse, GameError> {
        match self.session.phase {
            Phase::Playing => Ok(DirectionResponse::Steer {
                accepted: self.request_direction(direction),
            }),
            Phase::GameOver => self.restart().map(DirectionResponse::Restarted),
        }
    }

    /// Queues a turn for the next tick.
    ///
    /// Rejected when it would reverse the snake, when a turn is already queued
    /// for this tick, or when the game is over.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if self.session.phase != Phase::Playing {
            return false;
        }

        if let Some(queued) = self.pending_direction {
            debug!("turn {direction:?} dropped: {queued:?} already queued this tick");
            return false;
        }

        if !self.snake.accepts(direction) {
            debug!(
                "turn {direction:?} rejected while heading {:?}",
                self.snake.direction()
            );
            return false;
        }

        self.pending_direction = Some(direction);
        true
    }

    /// Advances the session by one step.
    ///
    /// Returns `Ok(None)` without touching state once the game is over. A
    /// failed frog respawn ends the game before the error is returned.
    pub fn tick(&mut self) -> Result<Option<TickOutcome>, GameError> {
        if self.session.phase != Phase::Playing {
            return Ok(None);
        }

        self.tick_count += 1;

        if let Some(direction) = self.pending_direction.take() {
            let _ = self.snake.request_direction(direction);
        }

        self.snake.move_forward();

        let ate = self.snake.head() == self.food;
        let mut schedule = ScheduleChange::Keep;
        if ate {
            self.food = match self.spawner.respawn(&self.snake, self.grid) {
                Ok(cell) => cell,
                Err(error) => {
                    self.session.phase = Phase::GameOver;
                    return Err(error);
                }
            };
            self.session.score += self.session.points_per_food;
            if self.apply_speed_boost() {
                schedule = ScheduleChange::Restart(self.session.tick_interval);
            }
        } else {
            self.snake.shrink();
        }

        let cause = GameOverCause {
            wall: self.snake.check_wall_collision(self.grid),
            body: self.snake.check_self_collision(),
        };
        if cause.wall || cause.body {
            self.session.phase = Phase::GameOver;
            self.game_over_cause = Some(cause);
            schedule = ScheduleChange::Stop;
            info!(
                "game over after {} ticks: score {}, length {}, wall {}, body {}",
                self.tick_count,
                self.session.score,
                self.snake.len(),
                cause.wall,
                cause.body
            );
        }

        Ok(Some(TickOutcome {
            snapshot: self.snapshot(),
            ate,
            schedule,
        }))
    }

    /// Fires the one-shot speed boost once the score threshold is reached.
    fn apply_speed_boost(&mut self) -> bool {
        if self.session.speed_boost_applied || self.session.score < self.config.score_threshold {
            return false;
        }

        self.session.points_per_food = self.config.bonus_points_per_food;
        self.session.tick_interval = self.config.boosted_interval();
        self.session.speed_boost_applied = true;

        info!(
            "speed increased to {:?} interval, {} points per frog",
            self.session.tick_interval, self.session.points_per_food
        );
        true
    }

    /// Builds a render snapshot of the current state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake_cells: self.snake.segments().copied().collect(),
            food_cell: self.food,
            score: self.session.score,
            points_per_food: self.session.points_per_food,
            tick_interval: self.session.tick_interval,
            game_over: self.session.phase == Phase::GameOver,
        }
    }

    /// Replaces the snake, e.g. to stage a scenario.
    pub fn set_snake(&mut self, snake: Snake) {
        self.snake = snake;
        self.pending_direction = None;
    }

    /// Forces the frog onto `cell`, e.g. to stage a scenario.
    pub fn place_food(&mut self, cell: Cell) {
        self.food = cell;
    }

    #[must_use]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn food(&self) -> Cell {
        self.food
    }

    #[must_use]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[must_use]
    pub fn game_over_cause(&self) -> Option<GameOverCause> {
        self.game_over_cause
    }
}
