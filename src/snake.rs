use std::collections::VecDeque;

use crate::grid::{Cell, Grid};
use crate::input::Direction;

/// Snake body, heading and the one-turn-per-tick lock.
///
/// Movement always prepends a new head; the engine then decides whether to
/// [`shrink`](Snake::shrink) the tail. Skipping the shrink is what grows the snake.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Cell>,
    direction: Direction,
    direction_locked: bool,
}

impl Snake {
    /// Creates a one-cell snake at `start` with the provided direction.
    #[must_use]
    pub fn new(start: Cell, direction: Direction) -> Self {
        let mut snake = Self {
            body: VecDeque::with_capacity(16),
            direction,
            direction_locked: false,
        };
        snake.reset(start, direction);
        snake
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// Returns `None` for an empty segment list.
    #[must_use]
    pub fn from_segments(segments: Vec<Cell>, direction: Direction) -> Option<Self> {
        if segments.is_empty() {
            return None;
        }

        Some(Self {
            body: VecDeque::from(segments),
            direction,
            direction_locked: false,
        })
    }

    /// Replaces the body with `[start]` and clears the direction lock.
    pub fn reset(&mut self, start: Cell, direction: Direction) {
        self.body.clear();
        self.body.push_front(start);
        self.direction = direction;
        self.direction_locked = false;
    }

    /// Returns true when `direction` would be accepted right now.
    #[must_use]
    pub fn accepts(&self, direction: Direction) -> bool {
        !self.direction_locked && !direction.is_opposite_of(self.direction)
    }

    /// Changes heading unless it reverses the snake or a turn was already
    /// taken since the last [`move_forward`](Snake::move_forward).
    ///
    /// Returns true iff the change was accepted.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if !self.accepts(direction) {
            return false;
        }

        self.direction = direction;
        self.direction_locked = true;
        true
    }

    /// Prepends the next head cell and releases the direction lock.
    ///
    /// No bounds checking happens here.
    pub fn move_forward(&mut self) {
        let next_head = self.head().offset(self.direction.vector());
        self.body.push_front(next_head);
        self.direction_locked = false;
    }

    /// Drops the tail cell, keeping at least the head.
    pub fn shrink(&mut self) {
        if self.body.len() > 1 {
            let _ = self.body.pop_back();
        }
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn check_self_collision(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    /// Returns true if the head left the grid.
    #[must_use]
    pub fn check_wall_collision(&self, grid: Grid) -> bool {
        !grid.in_bounds(self.head())
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Cell {
        // The body never drops below one segment: `reset` seeds it, `shrink`
        // stops at the head and `from_segments` rejects empty input.
        self.body[0]
    }

    /// Returns true if any segment occupies `cell`.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the current movement direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns true while a turn has been taken this tick.
    #[must_use]
    pub fn is_direction_locked(&self) -> bool {
        self.direction_locked
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::grid::{Cell, Grid};
    use crate::input::Direction;

    use super::Snake;

    fn column_snake() -> Snake {
        Snake::from_segments(
            vec![Cell::new(5, 5), Cell::new(5, 6), Cell::new(5, 7)],
            Direction::Up,
        )
        .expect("segments are non-empty")
    }

    #[test]
    fn reset_leaves_single_cell_and_clears_lock() {
        let mut snake = column_snake();
        assert!(snake.request_direction(Direction::Left));

        snake.reset(Cell::new(1, 1), Direction::Right);

        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Cell::new(1, 1));
        assert_eq!(snake.direction(), Direction::Right);
        assert!(!snake.is_direction_locked());
    }

    #[test]
    fn move_prepends_head_without_dropping_tail() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right);

        snake.move_forward();

        assert_eq!(snake.head(), Cell::new(6, 5));
        assert_eq!(snake.len(), 2);
    }

    #[test]
    fn move_then_shrink_translates() {
        let mut snake = column_snake();

        snake.move_forward();
        snake.shrink();

        let cells: Vec<Cell> = snake.segments().copied().collect();
        assert_eq!(cells, vec![Cell::new(5, 4), Cell::new(5, 5), Cell::new(5, 6)]);
    }

    #[test]
    fn shrink_never_removes_the_head() {
        let mut snake = Snake::new(Cell::new(0, 0), Direction::Up);

        snake.shrink();

        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn reversal_is_rejected() {
        let mut snake = column_snake();

        assert!(!snake.request_direction(Direction::Down));
        assert_eq!(snake.direction(), Direction::Up);
        assert!(!snake.is_direction_locked());
    }

    #[test]
    fn second_turn_in_same_tick_is_rejected() {
        let mut snake = column_snake();

        assert!(snake.request_direction(Direction::Left));
        assert!(!snake.request_direction(Direction::Up));
        assert_eq!(snake.direction(), Direction::Left);

        snake.move_forward();
        assert!(snake.request_direction(Direction::Up));
    }

    #[test]
    fn lock_blocks_sneaky_reversal_through_perpendicular() {
        let mut snake = column_snake();

        // Left then Right within one tick would point back into the neck.
        assert!(snake.request_direction(Direction::Left));
        assert!(!snake.request_direction(Direction::Right));

        snake.move_forward();
        snake.shrink();
        assert!(!snake.check_self_collision());
    }

    #[test]
    fn same_direction_request_is_accepted_and_locks() {
        let mut snake = column_snake();

        assert!(snake.request_direction(Direction::Up));
        assert!(snake.is_direction_locked());
    }

    #[test]
    fn empty_segments_are_rejected() {
        assert!(Snake::from_segments(Vec::new(), Direction::Up).is_none());
    }

    #[test]
    fn self_collision_detects_head_on_body() {
        let snake = Snake::from_segments(
            vec![
                Cell::new(2, 2),
                Cell::new(2, 3),
                Cell::new(3, 3),
                Cell::new(3, 2),
                Cell::new(2, 2),
            ],
            Direction::Up,
        )
        .expect("segments are non-empty");

        assert!(snake.check_self_collision());
        assert!(!column_snake().check_self_collision());
    }

    #[test]
    fn wall_collision_uses_grid_bounds() {
        let grid = Grid::new(4);
        let mut snake = Snake::new(Cell::new(0, 1), Direction::Left);

        assert!(!snake.check_wall_collision(grid));
        snake.move_forward();
        assert!(snake.check_wall_collision(grid));
    }
}
