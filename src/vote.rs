//! Resolution of accumulated reaction votes into a single movement
//! direction.

use crate::chat::ReactionSymbol;
use crate::direction::Facing;
use std::collections::HashMap;

/// The voting policy for a session, chosen once from the configuration
/// snapshot when the session is created.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Controls {
    /// One reaction per direction; plurality wins, ties go straight
    Arrows,
    /// A binary like/retweet signal mapped onto turns perpendicular to
    /// travel; `tie_threshold` is the percent band around a 1:1 ratio
    /// treated as no clear winner
    Twitter { tie_threshold: u8 },
}

impl Controls {
    /// Resolve the accumulated `counts` into the next direction of travel.
    ///
    /// The result is never the opposite of `facing`: arrow mode excludes
    /// the reverse direction from the candidate set, and twitter mode only
    /// ever turns perpendicular to travel or keeps going straight.
    pub fn resolve(self, counts: &HashMap<ReactionSymbol, u32>, facing: Facing) -> Facing {
        match self {
            Controls::Arrows => resolve_arrows(counts, facing),
            Controls::Twitter { tie_threshold } => {
                resolve_twitter(counts, facing, tie_threshold)
            }
        }
    }

    /// The reaction controls to attach to a freshly published message, in
    /// attachment order. Arrow mode omits the control that would reverse
    /// travel.
    pub fn reaction_controls(self, facing: Facing) -> Vec<ReactionSymbol> {
        match self {
            Controls::Arrows => Facing::ALL
                .into_iter()
                .filter(|&d| d != facing.opposite())
                .map(arrow_symbol)
                .collect(),
            Controls::Twitter { .. } => vec![ReactionSymbol::Retweet, ReactionSymbol::Like],
        }
    }
}

fn arrow_symbol(direction: Facing) -> ReactionSymbol {
    match direction {
        Facing::Up => ReactionSymbol::Up,
        Facing::Down => ReactionSymbol::Down,
        Facing::Left => ReactionSymbol::Left,
        Facing::Right => ReactionSymbol::Right,
    }
}

fn count_of(counts: &HashMap<ReactionSymbol, u32>, symbol: ReactionSymbol) -> u32 {
    counts.get(&symbol).copied().unwrap_or(0)
}

fn resolve_arrows(counts: &HashMap<ReactionSymbol, u32>, facing: Facing) -> Facing {
    let candidates = Facing::ALL
        .into_iter()
        .filter(|&d| d != facing.opposite())
        .map(|d| (d, count_of(counts, arrow_symbol(d))))
        .collect::<Vec<_>>();
    let (winner, top) = candidates
        .iter()
        .copied()
        .max_by_key(|&(_, n)| n)
        .expect("the candidate set always holds three directions");
    let tied = candidates.iter().filter(|&&(_, n)| n == top).count() > 1;
    if tied {
        facing
    } else {
        winner
    }
}

fn resolve_twitter(counts: &HashMap<ReactionSymbol, u32>, facing: Facing, tie_threshold: u8) -> Facing {
    let likes = count_of(counts, ReactionSymbol::Like);
    let retweets = count_of(counts, ReactionSymbol::Retweet);
    let tie = if retweets == 0 {
        true
    } else {
        let ratio = f64::from(likes) / f64::from(retweets);
        let band = f64::from(tie_threshold) / 100.0;
        (1.0 - band) <= ratio && ratio <= (1.0 + band)
    };
    if tie {
        facing
    } else if facing.is_horizontal() {
        if likes > retweets {
            Facing::Down
        } else {
            Facing::Up
        }
    } else if likes > retweets {
        Facing::Right
    } else {
        Facing::Left
    }
}
