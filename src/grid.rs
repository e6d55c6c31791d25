/// Grid cell in logical coordinates, 0-indexed from the top-left corner.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns this cell shifted by a unit vector.
    #[must_use]
    pub fn offset(self, (dx, dy): (i32, i32)) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Square play field geometry.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Grid {
    size: u16,
}

impl Grid {
    #[must_use]
    pub fn new(size: u16) -> Self {
        debug_assert!(size > 0);
        Self { size }
    }

    /// Cells per side.
    #[must_use]
    pub fn size(self) -> u16 {
        self.size
    }

    /// Returns true iff `0 <= x < size` and `0 <= y < size`.
    #[must_use]
    pub fn in_bounds(self, cell: Cell) -> bool {
        let size = i32::from(self.size);
        (0..size).contains(&cell.x) && (0..size).contains(&cell.y)
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn cell_count(self) -> usize {
        usize::from(self.size) * usize::from(self.size)
    }

    /// Cell at the centre, rounded towards the origin.
    #[must_use]
    pub fn center(self) -> Cell {
        let mid = i32::from(self.size / 2);
        Cell::new(mid, mid)
    }

    /// Iterates every cell in row-major order.
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        let size = i32::from(self.size);
        (0..size).flat_map(move |y| (0..size).map(move |x| Cell::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::{Cell, Grid};

    #[test]
    fn bounds_are_half_open() {
        let grid = Grid::new(20);

        assert!(grid.in_bounds(Cell::new(0, 0)));
        assert!(grid.in_bounds(Cell::new(19, 19)));
        assert!(!grid.in_bounds(Cell::new(-1, 5)));
        assert!(!grid.in_bounds(Cell::new(5, -1)));
        assert!(!grid.in_bounds(Cell::new(20, 5)));
        assert!(!grid.in_bounds(Cell::new(5, 20)));
    }

    #[test]
    fn center_of_default_grid() {
        assert_eq!(Grid::new(20).center(), Cell::new(10, 10));
        assert_eq!(Grid::new(5).center(), Cell::new(2, 2));
    }

    #[test]
    fn cells_cover_the_whole_grid_once() {
        let grid = Grid::new(4);
        let cells: Vec<Cell> = grid.cells().collect();

        assert_eq!(cells.len(), grid.cell_count());
        assert_eq!(cells.first(), Some(&Cell::new(0, 0)));
        assert_eq!(cells.last(), Some(&Cell::new(3, 3)));
        assert!(cells.iter().all(|cell| grid.in_bounds(*cell)));
    }
}
