//! Deterministic mapping from game state to the text published in chat.

use crate::chat::ReactionSymbol;
use crate::consts;
use crate::direction::Facing;
use crate::grid::{Cell, Grid, Point};
use crate::sim::Expression;

/// Render the grid as one emoji shortcode per cell, row-major, with a
/// newline after every row.
pub fn render(grid: &Grid, expression: Expression) -> String {
    let mut out = String::new();
    for row in 0..grid.height() {
        for col in 0..grid.width() {
            out.push_str(match grid.get(Point::new(row, col)) {
                Cell::Empty => consts::BLANK_SYMBOL,
                Cell::Apple => consts::APPLE_SYMBOL,
                Cell::Head => match expression {
                    Expression::Normal => consts::HEAD_NORMAL_SYMBOL,
                    Expression::Eating => consts::HEAD_EATING_SYMBOL,
                    Expression::Dead => consts::HEAD_DEAD_SYMBOL,
                },
                Cell::Body(1) => consts::TAIL_SYMBOL,
                Cell::Body(_) => consts::BODY_SYMBOL,
            });
        }
        out.push('\n');
    }
    out
}

/// The legend appended below the grid in twitter mode, pairing each binary
/// vote with the turn it produces from the current direction of travel.
pub fn control_legend(facing: Facing) -> String {
    let (retweet_turn, like_turn) = if facing.is_horizontal() {
        (ReactionSymbol::Up, ReactionSymbol::Down)
    } else {
        (ReactionSymbol::Left, ReactionSymbol::Right)
    };
    format!(
        "\n{retweet}{rt_turn}\n\n{like}{like_turn}",
        retweet = ReactionSymbol::Retweet.emoji(),
        rt_turn = retweet_turn.emoji(),
        like = ReactionSymbol::Like.emoji(),
        like_turn = like_turn.emoji(),
    )
}
