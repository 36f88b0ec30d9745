use crate::grid::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The snake's current direction of travel
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    Up,
    Down,
    Left,
    Right,
}

impl Facing {
    /// All four directions, in the order votes are tallied
    pub const ALL: [Facing; 4] = [Facing::Left, Facing::Right, Facing::Down, Facing::Up];

    /// Return the position one cell ahead of `pos` in this direction, or
    /// `None` if that would leave a `height × width` grid
    pub fn step(self, pos: Point, height: usize, width: usize) -> Option<Point> {
        let Point { mut row, mut col } = pos;
        match self {
            Facing::Up => {
                row = row.checked_sub(1)?;
            }
            Facing::Down => {
                row = row.checked_add(1).filter(|&r| r < height)?;
            }
            Facing::Left => {
                col = col.checked_sub(1)?;
            }
            Facing::Right => {
                col = col.checked_add(1).filter(|&c| c < width)?;
            }
        }
        Some(Point { row, col })
    }

    /// Return the direction of reverse travel
    pub fn opposite(self) -> Facing {
        match self {
            Facing::Up => Facing::Down,
            Facing::Down => Facing::Up,
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }

    /// Whether travel in this direction is along the horizontal axis
    pub fn is_horizontal(self) -> bool {
        matches!(self, Facing::Left | Facing::Right)
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Facing::Up => "up",
            Facing::Down => "down",
            Facing::Left => "left",
            Facing::Right => "right",
        };
        f.pad(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Facing::Up, Point::new(7, 2), Some(Point::new(6, 2)))]
    #[case(Facing::Down, Point::new(7, 2), Some(Point::new(8, 2)))]
    #[case(Facing::Left, Point::new(7, 2), Some(Point::new(7, 1)))]
    #[case(Facing::Right, Point::new(7, 2), Some(Point::new(7, 3)))]
    #[case(Facing::Up, Point::new(0, 2), None)]
    #[case(Facing::Down, Point::new(14, 2), None)]
    #[case(Facing::Left, Point::new(7, 0), None)]
    #[case(Facing::Right, Point::new(7, 9), None)]
    fn test_step(#[case] d: Facing, #[case] pos: Point, #[case] r: Option<Point>) {
        assert_eq!(d.step(pos, 15, 10), r);
    }

    #[rstest]
    #[case(Facing::Up, Facing::Down)]
    #[case(Facing::Down, Facing::Up)]
    #[case(Facing::Left, Facing::Right)]
    #[case(Facing::Right, Facing::Left)]
    fn test_opposite(#[case] d: Facing, #[case] r: Facing) {
        assert_eq!(d.opposite(), r);
    }

    #[test]
    fn serialized_lowercase() {
        assert_eq!(serde_json::to_string(&Facing::Down).unwrap(), "\"down\"");
        let d: Facing = serde_json::from_str("\"left\"").unwrap();
        assert_eq!(d, Facing::Left);
    }
}
