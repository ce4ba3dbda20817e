//! The trait seam between the search engines and the game being searched.
//!
//! The game simulation lives outside this crate, so the engines describe
//! what they need from it as small capability traits: enumerate actions,
//! step forward, count agents, detect the end of the game. A state that
//! implements all of them (plus `Clone` and `Debug`) is a
//! [`SearchableGame`] and can be handed to any engine.

use std::fmt::Debug;

/// Index of an agent within a state's turn rotation.
///
/// Agent `0` is always the maximizer; agents `1..num_agents()` are the
/// opponents.
pub type AgentIndex = usize;

/// The maximizing agent's index in every rotation.
pub const MAXIMIZER: AgentIndex = 0;

/// A game that can enumerate the legal actions for an agent.
pub trait ActionEnumerableGame {
    /// The action type for this game.
    type Action: Copy + PartialEq + Debug;

    /// All legal actions for `agent` in this state.
    ///
    /// The order is significant and must be deterministic and stable across
    /// calls on an identical state: it fixes the branch exploration order,
    /// which fixes both how much alpha-beta prunes and which action wins a
    /// value tie.
    fn legal_actions(&self, agent: AgentIndex) -> Vec<Self::Action>;
}

/// A game that can be stepped forward without mutating the current state.
pub trait SimulableGame: ActionEnumerableGame + Sized {
    /// The state after `agent` takes `action`. The receiver is unchanged;
    /// every successor is an independent value.
    fn successor(&self, agent: AgentIndex, action: Self::Action) -> Self;
}

/// A game that knows how many agents are in its rotation.
pub trait AgentCountableGame {
    /// Total number of agents, at least 1. Agent 0 is the maximizer.
    fn num_agents(&self) -> usize;
}

/// A game that can report whether it has ended.
pub trait OutcomeDeterminableGame {
    /// The maximizer has won.
    fn is_win(&self) -> bool;

    /// The maximizer has lost.
    fn is_lose(&self) -> bool;

    /// Whether this state is terminal for search purposes.
    fn is_over(&self) -> bool {
        self.is_win() || self.is_lose()
    }
}

/// A game with a running score.
///
/// This feeds the default evaluation,
/// [`score_evaluation`](crate::search::score_evaluation); games scored by a
/// custom evaluation function don't need it.
pub trait ScoreGettableGame {
    /// The current score of the state; higher is better for the maximizer.
    fn current_score(&self) -> f64;
}

/// Everything a search engine needs from a game state.
///
/// Blanket-implemented, so implementing the component traits is enough.
pub trait SearchableGame:
    SimulableGame + AgentCountableGame + OutcomeDeterminableGame + Clone + Debug
{
}

impl<T> SearchableGame for T where
    T: SimulableGame + AgentCountableGame + OutcomeDeterminableGame + Clone + Debug
{
}
