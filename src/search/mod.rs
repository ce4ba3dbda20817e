//! Depth-bounded game-tree search with one maximizer and any number of
//! opponents.
//!
//! All three engines walk the same tree: agents move in index order, agent 0
//! maximizes, and the depth counter ticks each time the rotation returns to
//! agent 0. A state is scored by the evaluation function as soon as it is a
//! win, a loss, or sits at the depth frontier. The engines differ only in
//! what an opponent's node does with the values of its children: take the
//! minimum ([`MinimaxSearch`], [`AlphaBetaSearch`]) or average them
//! ([`ExpectimaxSearch`]).
//!
//! ```rust
//! use decorum::N64;
//! use multiagent_minimax::game::{
//!     ActionEnumerableGame, AgentCountableGame, AgentIndex, OutcomeDeterminableGame,
//!     SimulableGame, MAXIMIZER,
//! };
//! use multiagent_minimax::search::MinimaxSearch;
//!
//! // A bidding game: the maximizer adds to the pot, the opponent takes away.
//! #[derive(Clone, Debug)]
//! struct Bids {
//!     total: f64,
//! }
//!
//! impl ActionEnumerableGame for Bids {
//!     type Action = i8;
//!
//!     fn legal_actions(&self, _agent: AgentIndex) -> Vec<i8> {
//!         vec![1, 2, 3]
//!     }
//! }
//!
//! impl SimulableGame for Bids {
//!     fn successor(&self, agent: AgentIndex, action: i8) -> Self {
//!         let sign = if agent == MAXIMIZER { 1.0 } else { -1.0 };
//!         Bids {
//!             total: self.total + sign * f64::from(action),
//!         }
//!     }
//! }
//!
//! impl AgentCountableGame for Bids {
//!     fn num_agents(&self) -> usize {
//!         2
//!     }
//! }
//!
//! impl OutcomeDeterminableGame for Bids {
//!     fn is_win(&self) -> bool {
//!         false
//!     }
//!
//!     fn is_lose(&self) -> bool {
//!         false
//!     }
//! }
//!
//! // Score a frontier state by the money in the pot.
//! let engine = MinimaxSearch::new(|game: &Bids| N64::from(game.total), "bids");
//!
//! // The opponent always takes the maximum back, so bid the maximum.
//! assert_eq!(engine.choose_action(&Bids { total: 0.0 }), Some(3));
//! ```

mod score;
pub use score::{score_evaluation, Scorable};

mod return_tree;
pub use return_tree::SearchReturn;

mod minimax;
pub use minimax::MinimaxSearch;

mod alpha_beta;
pub use alpha_beta::AlphaBetaSearch;

mod expectimax;
pub use expectimax::ExpectimaxSearch;

use crate::game::{AgentIndex, MAXIMIZER};

#[derive(Debug, Clone, Copy)]
/// Options shared by every search engine
///
/// The defaults (as implemented by [`Default`]) are as follows:
/// ```
/// use multiagent_minimax::search::SearchOptions;
///
/// let defaults: SearchOptions = Default::default();
///
/// assert_eq!(defaults.depth, 2);
/// ```
pub struct SearchOptions {
    /// The depth bound, counted in full rounds: one move by every agent, in
    /// index order, is one round.
    ///
    /// A bound of zero still evaluates each root successor exactly once; the
    /// frontier check is never applied to the root state itself.
    ///
    /// Defaults to 2
    pub depth: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self { depth: 2 }
    }
}

/// The turn rotation rule shared by every engine.
///
/// The next agent is the next index in the rotation; the depth counter ticks
/// only when the rotation wraps back to the maximizer, i.e. when a full
/// round has completed.
pub(crate) fn next_ply(agent: AgentIndex, num_agents: usize, depth: usize) -> (AgentIndex, usize) {
    let next_agent = (agent + 1) % num_agents;
    let next_depth = if next_agent == MAXIMIZER {
        depth + 1
    } else {
        depth
    };

    (next_agent, next_depth)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_advances_through_the_agents() {
        assert_eq!(next_ply(0, 3, 0), (1, 0));
        assert_eq!(next_ply(1, 3, 0), (2, 0));
    }

    #[test]
    fn depth_ticks_when_the_round_completes() {
        assert_eq!(next_ply(1, 2, 0), (0, 1));
        assert_eq!(next_ply(2, 3, 5), (0, 6));
    }

    #[test]
    fn single_agent_games_tick_every_ply() {
        assert_eq!(next_ply(0, 1, 0), (0, 1));
        assert_eq!(next_ply(0, 1, 3), (0, 4));
    }
}
