use decorum::N64;

use crate::game::ScoreGettableGame;

/// This trait is used to control something that can produce a value from a
/// game state
///
/// It is blanket-implemented for closures and functions, so a plain
/// `fn(&GameType) -> N64` is a valid evaluation oracle. Implement it by hand
/// when the oracle carries state of its own, such as a cache.
pub trait Scorable<GameType> {
    /// Score the given state; higher is better for the maximizer.
    ///
    /// The function must be total: it is invoked on terminal states and on
    /// frontier states alike, and its result is the value that propagates
    /// back up the tree.
    fn score(&self, game: &GameType) -> N64;
}

impl<GameType, FnLike: Fn(&GameType) -> N64> Scorable<GameType> for FnLike {
    fn score(&self, game: &GameType) -> N64 {
        (self)(game)
    }
}

/// The default evaluation: the raw score of the state, nothing else.
///
/// All of the planning power of an engine using this oracle comes from the
/// search around it. It only affects search quality, never the correctness
/// of the engines.
pub fn score_evaluation<GameType: ScoreGettableGame>(game: &GameType) -> N64 {
    N64::from(game.current_score())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Scored(f64);

    impl ScoreGettableGame for Scored {
        fn current_score(&self) -> f64 {
            self.0
        }
    }

    #[test]
    fn score_evaluation_returns_the_raw_score() {
        assert_eq!(score_evaluation(&Scored(42.5)), N64::from(42.5));
    }

    #[test]
    fn closures_are_scorable() {
        let oracle = |game: &Scored| N64::from(game.0 * 2.0);
        assert_eq!(oracle.score(&Scored(3.0)), N64::from(6.0));
    }
}
