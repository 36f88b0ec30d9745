use rand::seq::IteratorRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raw cell value for an empty cell
const EMPTY: i32 = 0;

/// Raw cell value for the snake's head
const HEAD: i32 = -1;

/// Raw cell value for the apple
const APPLE: i32 = -2;

/// A `(row, column)` grid coordinate, relative to the top-left corner
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Point {
    pub fn new(row: usize, col: usize) -> Point {
        Point { row, col }
    }
}

/// A decoded grid cell.
///
/// Body segments carry a time-to-live counter: the number of ticks before the
/// segment disappears. The tail is whichever segment's counter is at 1.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Cell {
    Empty,
    Head,
    Apple,
    Body(u32),
}

impl Cell {
    fn from_raw(value: i32) -> Option<Cell> {
        match value {
            EMPTY => Some(Cell::Empty),
            HEAD => Some(Cell::Head),
            APPLE => Some(Cell::Apple),
            v if v > 0 => Some(Cell::Body(v.unsigned_abs())),
            _ => None,
        }
    }

    fn to_raw(self) -> i32 {
        match self {
            Cell::Empty => EMPTY,
            Cell::Head => HEAD,
            Cell::Apple => APPLE,
            // A body segment's TTL comes from the score counter, which fits
            // comfortably in i32 long before a grid could hold it.
            Cell::Body(ttl) => i32::try_from(ttl).unwrap_or(i32::MAX),
        }
    }
}

/// The playing field: a dense matrix with the snake's body encoded as
/// per-cell TTL counters rather than a segment list.
///
/// The encoding is load-bearing for the movement algorithm: advancing the
/// snake is "decrement every positive cell" and growth is "increment every
/// positive cell", with the vacated head cell seeded from the score.
///
/// Serialized as nested arrays of integers; deserialization rejects ragged
/// rows, out-of-range cell values, and grids without exactly one head and
/// one apple.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(into = "Vec<Vec<i32>>", try_from = "Vec<Vec<i32>>")]
pub struct Grid {
    height: usize,
    width: usize,
    cells: Vec<i32>,
}

impl Grid {
    /// Create a grid with the snake's head at the center cell and one apple
    /// on a uniformly random empty cell.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::NoSpace`] if the grid is too small to hold both
    /// a head and an apple.
    pub fn new<R: Rng>(height: usize, width: usize, rng: &mut R) -> Result<Grid, GridError> {
        let mut grid = Grid {
            height,
            width,
            cells: vec![EMPTY; height.saturating_mul(width)],
        };
        if grid.cells.is_empty() {
            return Err(GridError::NoSpace);
        }
        grid.set(Point::new(height / 2, width / 2), Cell::Head);
        grid.place_apple(rng)?;
        Ok(grid)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Return the decoded cell at `p`
    pub fn get(&self, p: Point) -> Cell {
        Cell::from_raw(self.cells[self.index(p)])
            .expect("grid cells are validated at every mutation boundary")
    }

    /// Write `cell` at `p`
    pub(crate) fn set(&mut self, p: Point, cell: Cell) {
        let i = self.index(p);
        self.cells[i] = cell.to_raw();
    }

    fn index(&self, p: Point) -> usize {
        debug_assert!(p.row < self.height && p.col < self.width);
        p.row * self.width + p.col
    }

    fn point(&self, index: usize) -> Point {
        Point::new(index / self.width, index % self.width)
    }

    /// Iterate over all coordinates in row-major order
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.cells.len()).map(|i| self.point(i))
    }

    /// Locate the snake's head.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvariantViolation`] unless exactly one head
    /// cell exists. That never happens in correct operation, so callers
    /// treat it as a reportable contract violation, not a game event.
    pub fn find_head(&self) -> Result<Point, GridError> {
        let mut heads = self
            .cells
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v == HEAD)
            .map(|(i, _)| self.point(i));
        match (heads.next(), heads.next()) {
            (Some(p), None) => Ok(p),
            (None, _) => Err(GridError::InvariantViolation { heads: 0 }),
            (Some(_), Some(_)) => Err(GridError::InvariantViolation {
                heads: self.cells.iter().filter(|&&v| v == HEAD).count(),
            }),
        }
    }

    /// Place an apple on a uniformly random empty cell and return its
    /// position.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::NoSpace`] if no cell is empty.
    pub fn place_apple<R: Rng>(&mut self, rng: &mut R) -> Result<Point, GridError> {
        let pos = self
            .cells
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v == EMPTY)
            .map(|(i, _)| self.point(i))
            .choose(rng)
            .ok_or(GridError::NoSpace)?;
        self.set(pos, Cell::Apple);
        Ok(pos)
    }

    /// Increment every body segment's TTL by one, so that the following
    /// [`shift_body`][Grid::shift_body] leaves the tail in place for a tick
    pub(crate) fn grow_body(&mut self) {
        for v in &mut self.cells {
            if *v > 0 {
                *v += 1;
            }
        }
    }

    /// Decrement every body segment's TTL by one; segments reaching zero
    /// become empty cells
    pub(crate) fn shift_body(&mut self) {
        for v in &mut self.cells {
            if *v > 0 {
                *v -= 1;
            }
        }
    }
}

impl From<Grid> for Vec<Vec<i32>> {
    fn from(grid: Grid) -> Vec<Vec<i32>> {
        grid.cells.chunks(grid.width).map(<[i32]>::to_vec).collect()
    }
}

impl TryFrom<Vec<Vec<i32>>> for Grid {
    type Error = InvalidGrid;

    fn try_from(rows: Vec<Vec<i32>>) -> Result<Grid, InvalidGrid> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(InvalidGrid::Empty);
        }
        if rows.iter().any(|row| row.len() != width) {
            return Err(InvalidGrid::Ragged);
        }
        let cells = rows.into_iter().flatten().collect::<Vec<_>>();
        if let Some(&value) = cells.iter().find(|&&v| Cell::from_raw(v).is_none()) {
            return Err(InvalidGrid::Value(value));
        }
        let heads = cells.iter().filter(|&&v| v == HEAD).count();
        if heads != 1 {
            return Err(InvalidGrid::Heads(heads));
        }
        let apples = cells.iter().filter(|&&v| v == APPLE).count();
        if apples != 1 {
            return Err(InvalidGrid::Apples(apples));
        }
        Ok(Grid {
            height,
            width,
            cells,
        })
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum GridError {
    #[error("expected exactly one head cell, found {heads}")]
    InvariantViolation { heads: usize },
    #[error("no empty cell left to place an apple on")]
    NoSpace,
}

/// Rejection reasons for a persisted grid that fails validation on load
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum InvalidGrid {
    #[error("grid has no cells")]
    Empty,
    #[error("grid rows differ in width")]
    Ragged,
    #[error("invalid cell value {0}")]
    Value(i32),
    #[error("expected exactly one head cell, found {0}")]
    Heads(usize),
    #[error("expected exactly one apple cell, found {0}")]
    Apples(usize),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use rstest::rstest;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn rng() -> ChaCha12Rng {
        ChaCha12Rng::seed_from_u64(RNG_SEED)
    }

    #[rstest]
    #[case(1, 2)]
    #[case(2, 1)]
    #[case(5, 5)]
    #[case(10, 10)]
    #[case(3, 17)]
    fn new_grid_invariants(#[case] height: usize, #[case] width: usize) {
        let grid = Grid::new(height, width, &mut rng()).unwrap();
        let head = grid.find_head().unwrap();
        assert_eq!(head, Point::new(height / 2, width / 2));
        let apples = grid
            .points()
            .filter(|&p| grid.get(p) == Cell::Apple)
            .collect::<Vec<_>>();
        assert_eq!(apples.len(), 1);
        assert_ne!(apples[0], head);
        assert!(grid.points().all(|p| grid.get(p) != Cell::Body(0)));
    }

    #[test]
    fn new_grid_no_space() {
        assert_eq!(Grid::new(1, 1, &mut rng()), Err(GridError::NoSpace));
        assert_eq!(Grid::new(0, 5, &mut rng()), Err(GridError::NoSpace));
    }

    #[test]
    fn place_apple_on_full_grid() {
        let mut grid = Grid::new(2, 2, &mut rng()).unwrap();
        for p in grid.points().collect::<Vec<_>>() {
            if grid.get(p) == Cell::Empty {
                grid.set(p, Cell::Body(3));
            }
        }
        assert_eq!(grid.place_apple(&mut rng()), Err(GridError::NoSpace));
    }

    #[test]
    fn place_apple_only_empty_cell() {
        let mut grid = Grid::new(2, 2, &mut rng()).unwrap();
        let free = grid
            .points()
            .filter(|&p| grid.get(p) == Cell::Empty)
            .collect::<Vec<_>>();
        assert_eq!(free.len(), 2);
        grid.set(free[0], Cell::Body(2));
        assert_eq!(grid.place_apple(&mut rng()), Ok(free[1]));
    }

    #[test]
    fn find_head_missing() {
        let mut grid = Grid::new(3, 3, &mut rng()).unwrap();
        let head = grid.find_head().unwrap();
        grid.set(head, Cell::Empty);
        assert_eq!(
            grid.find_head(),
            Err(GridError::InvariantViolation { heads: 0 })
        );
    }

    #[test]
    fn find_head_duplicated() {
        let mut grid = Grid::new(3, 3, &mut rng()).unwrap();
        let free = grid
            .points()
            .find(|&p| grid.get(p) == Cell::Empty)
            .unwrap();
        grid.set(free, Cell::Head);
        assert_eq!(
            grid.find_head(),
            Err(GridError::InvariantViolation { heads: 2 })
        );
    }

    #[test]
    fn grow_and_shift() {
        let mut grid = Grid::try_from(vec![vec![0, 1, 2], vec![-1, -2, 0]]).unwrap();
        grid.grow_body();
        assert_eq!(Vec::<Vec<i32>>::from(grid.clone()), [[0, 2, 3], [-1, -2, 0]]);
        grid.shift_body();
        grid.shift_body();
        assert_eq!(Vec::<Vec<i32>>::from(grid), [[0, 0, 1], [-1, -2, 0]]);
    }

    #[test]
    fn serialize_as_nested_arrays() {
        let grid = Grid::try_from(vec![vec![0, -1], vec![-2, 3]]).unwrap();
        assert_eq!(
            serde_json::to_string(&grid).unwrap(),
            "[[0,-1],[-2,3]]"
        );
    }

    #[rstest]
    #[case(vec![], InvalidGrid::Empty)]
    #[case(vec![vec![], vec![]], InvalidGrid::Empty)]
    #[case(vec![vec![0, -1], vec![-2]], InvalidGrid::Ragged)]
    #[case(vec![vec![0, -1], vec![-2, -7]], InvalidGrid::Value(-7))]
    #[case(vec![vec![0, 0], vec![-2, 1]], InvalidGrid::Heads(0))]
    #[case(vec![vec![-1, -1], vec![-2, 1]], InvalidGrid::Heads(2))]
    #[case(vec![vec![0, -1], vec![0, 1]], InvalidGrid::Apples(0))]
    #[case(vec![vec![-2, -1], vec![-2, 1]], InvalidGrid::Apples(2))]
    fn rejects_invalid(#[case] rows: Vec<Vec<i32>>, #[case] err: InvalidGrid) {
        assert_eq!(Grid::try_from(rows), Err(err));
    }
}
