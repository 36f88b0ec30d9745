//! The per-tick simulation step: one resolved direction applied to the
//! grid.

use crate::direction::Facing;
use crate::grid::{Cell, Grid, GridError};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The face the snake wears in the next render, derived from the tick's
/// outcome
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Expression {
    #[default]
    Normal,
    Eating,
    Dead,
}

impl Expression {
    pub fn is_dead(self) -> bool {
        self == Expression::Dead
    }
}

/// Current and best score for a session
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Scoreboard {
    pub score: u32,
    pub best: u32,
}

impl Scoreboard {
    pub(crate) fn record_point(&mut self) {
        self.score += 1;
        if self.score > self.best {
            self.best = self.score;
        }
    }
}

/// Advance the snake one cell in `facing` and return the resulting facial
/// expression; [`Expression::Dead`] means the snake hit a wall or its own
/// body.
///
/// On death the grid is left exactly as it was, so the final render shows
/// the body at the moment of impact. Otherwise every body segment's TTL
/// drops by one (cancelled out by growth on an apple tick), the head moves
/// forward, and the vacated head cell becomes the new tail segment seeded
/// with the current score as its TTL. That seeding is what makes higher
/// scores produce longer snakes.
///
/// # Errors
///
/// Returns `Err` if the grid has lost its head invariant or has no empty
/// cell for a respawned apple; both are contract violations that abort the
/// tick.
pub fn advance<R: Rng>(
    grid: &mut Grid,
    facing: Facing,
    scores: &mut Scoreboard,
    rng: &mut R,
) -> Result<Expression, GridError> {
    let head = grid.find_head()?;
    let Some(next) = facing.step(head, grid.height(), grid.width()) else {
        return Ok(Expression::Dead);
    };
    let mut expression = Expression::Normal;
    match grid.get(next) {
        // A segment with more than one tick of life left won't have vacated
        // the cell by the time the head arrives
        Cell::Body(ttl) if ttl > 1 => return Ok(Expression::Dead),
        Cell::Apple => {
            scores.record_point();
            grid.place_apple(rng)?;
            grid.grow_body();
            expression = Expression::Eating;
        }
        _ => (),
    }
    grid.shift_body();
    grid.set(next, Cell::Head);
    let vacated = match scores.score {
        0 => Cell::Empty,
        ttl => Cell::Body(ttl),
    };
    grid.set(head, vacated);
    Ok(expression)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Point;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn rng() -> ChaCha12Rng {
        ChaCha12Rng::seed_from_u64(RNG_SEED)
    }

    fn grid(rows: Vec<Vec<i32>>) -> Grid {
        Grid::try_from(rows).unwrap()
    }

    fn raw(grid: &Grid) -> Vec<Vec<i32>> {
        grid.clone().into()
    }

    #[test]
    fn wall_collision() {
        let mut g = grid(vec![vec![-1, 1, 0], vec![0, 0, -2]]);
        let before = raw(&g);
        let mut scores = Scoreboard { score: 1, best: 4 };
        let expr = advance(&mut g, Facing::Left, &mut scores, &mut rng()).unwrap();
        assert_eq!(expr, Expression::Dead);
        assert_eq!(raw(&g), before);
        assert_eq!(scores, Scoreboard { score: 1, best: 4 });
    }

    #[test]
    fn body_collision() {
        let mut g = grid(vec![vec![-1, 3, 0], vec![2, 0, 0], vec![1, 0, -2]]);
        let before = raw(&g);
        let mut scores = Scoreboard { score: 3, best: 3 };
        let expr = advance(&mut g, Facing::Right, &mut scores, &mut rng()).unwrap();
        assert_eq!(expr, Expression::Dead);
        assert_eq!(raw(&g), before);
        assert_eq!(scores, Scoreboard { score: 3, best: 3 });
    }

    #[test]
    fn moving_onto_the_tail_tip_is_safe() {
        // The tip has one tick of life left, so it vacates the cell in the
        // same tick the head enters it
        let mut g = grid(vec![vec![-1, 2, 0], vec![1, 0, 0], vec![0, 0, -2]]);
        let mut scores = Scoreboard { score: 2, best: 2 };
        let expr = advance(&mut g, Facing::Down, &mut scores, &mut rng()).unwrap();
        assert_eq!(expr, Expression::Normal);
        assert_eq!(
            raw(&g),
            vec![vec![2, 1, 0], vec![-1, 0, 0], vec![0, 0, -2]]
        );
        assert_eq!(scores, Scoreboard { score: 2, best: 2 });
    }

    #[test]
    fn normal_move_without_score_leaves_no_tail() {
        let mut g = grid(vec![vec![0, -1, 0], vec![0, 0, 0], vec![0, 0, -2]]);
        let mut scores = Scoreboard::default();
        let expr = advance(&mut g, Facing::Right, &mut scores, &mut rng()).unwrap();
        assert_eq!(expr, Expression::Normal);
        assert_eq!(
            raw(&g),
            vec![vec![0, 0, -1], vec![0, 0, 0], vec![0, 0, -2]]
        );
    }

    #[test]
    fn eating_grows_and_scores() {
        let mut g = grid(vec![vec![2, -1, -2], vec![1, 0, 0], vec![0, 0, 0]]);
        let mut scores = Scoreboard { score: 2, best: 2 };
        let expr = advance(&mut g, Facing::Right, &mut scores, &mut rng()).unwrap();
        assert_eq!(expr, Expression::Eating);
        assert_eq!(scores, Scoreboard { score: 3, best: 3 });
        let after = raw(&g);
        // Growth cancels the shift: no pre-existing segment lost life
        assert_eq!(after[0][0], 2);
        assert_eq!(after[1][0], 1);
        // The head moved onto the apple and seeded the vacated cell with
        // the new score
        assert_eq!(after[0][2], -1);
        assert_eq!(after[0][1], 3);
        // Exactly one fresh apple, on a previously empty cell
        let apples = g
            .points()
            .filter(|&p| g.get(p) == Cell::Apple)
            .collect::<Vec<_>>();
        assert_eq!(apples.len(), 1);
        assert!(matches!(
            apples[0],
            Point { row: 1, col: 1..=2 } | Point { row: 2, col: 0..=2 }
        ));
    }

    #[test]
    fn best_updates_only_when_exceeded() {
        let mut g = grid(vec![vec![0, -1, -2], vec![0, 0, 0]]);
        let mut scores = Scoreboard { score: 0, best: 5 };
        advance(&mut g, Facing::Right, &mut scores, &mut rng()).unwrap();
        assert_eq!(scores, Scoreboard { score: 1, best: 5 });
    }

    #[test]
    fn headless_grid_is_a_contract_violation() {
        let mut g = grid(vec![vec![0, -1, -2], vec![0, 0, 0]]);
        g.set(Point::new(0, 1), Cell::Empty);
        let mut scores = Scoreboard::default();
        assert_eq!(
            advance(&mut g, Facing::Right, &mut scores, &mut rng()),
            Err(GridError::InvariantViolation { heads: 0 })
        );
    }
}
