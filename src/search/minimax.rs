use std::{cmp, marker::PhantomData};

use decorum::{Infinite, N64};
use derivative::Derivative;
use itertools::Itertools;
use tracing::{info, info_span};

use crate::{
    game::{AgentIndex, SearchableGame, MAXIMIZER},
    Instruments, SearchInstruments,
};

use super::{next_ply, Scorable, SearchOptions, SearchReturn};

#[derive(Derivative, Clone)]
#[derivative(Debug)]
/// Exhaustive depth-bounded minimax.
///
/// Every opponent is assumed to pick the action that is worst for the
/// maximizer, so the backed-up value is a worst-case guarantee. Every node
/// within the depth bound is visited; if that is too slow, switch to
/// [`AlphaBetaSearch`](super::AlphaBetaSearch), which returns the same
/// action and value while visiting fewer nodes.
pub struct MinimaxSearch<GameType, ScorableType>
where
    ScorableType: Scorable<GameType>,
{
    #[derivative(Debug = "ignore")]
    score_function: ScorableType,
    /// Name used in the tracing spans emitted by
    /// [`choose_action`](Self::choose_action)
    pub name: &'static str,
    options: SearchOptions,
    _phantom: PhantomData<GameType>,
}

impl<GameType, ScorableType> MinimaxSearch<GameType, ScorableType>
where
    GameType: SearchableGame,
    ScorableType: Scorable<GameType>,
{
    /// Construct an engine with the default [`SearchOptions`].
    pub fn new(score_function: ScorableType, name: &'static str) -> Self {
        Self::new_with_options(score_function, name, SearchOptions::default())
    }

    /// Construct an engine with explicit [`SearchOptions`].
    pub fn new_with_options(
        score_function: ScorableType,
        name: &'static str,
        options: SearchOptions,
    ) -> Self {
        Self {
            score_function,
            name,
            options,
            _phantom: PhantomData,
        }
    }

    /// Pick the maximizer's action: one full bounded search from `game`.
    ///
    /// Ties break to the first-seen maximum in action-enumeration order, so
    /// the choice is deterministic. Returns `None` when the root is terminal
    /// or the maximizer has no legal actions.
    pub fn choose_action(&self, game: &GameType) -> Option<GameType::Action> {
        info_span!(
            "minimax",
            engine_name = self.name,
            depth = self.options.depth,
            chosen_score = tracing::field::Empty,
            chosen_action = tracing::field::Empty,
        )
        .in_scope(|| {
            let result = self.search(game);
            let action = result.best_action();

            let current_span = tracing::Span::current();
            current_span.record("chosen_score", format!("{:?}", result.value()).as_str());
            current_span.record("chosen_action", format!("{:?}", action).as_str());
            info!(engine_name = self.name, "chose an action");

            action
        })
    }

    /// Run one full bounded search from `game`, returning the explored tree.
    pub fn search(&self, game: &GameType) -> SearchReturn<GameType::Action> {
        self.search_instrumented(game, &Instruments {})
    }

    /// Same as [`search`](Self::search), reporting each oracle evaluation to
    /// `instruments`.
    pub fn search_instrumented<I: SearchInstruments>(
        &self,
        game: &GameType,
        instruments: &I,
    ) -> SearchReturn<GameType::Action> {
        // The root is the maximizer's node, but the frontier check does not
        // apply to it: a depth bound of zero still evaluates each root
        // successor exactly once.
        if game.is_over() {
            return self.frontier(game, instruments);
        }

        let actions = game.legal_actions(MAXIMIZER);
        if actions.is_empty() {
            return self.frontier(game, instruments);
        }

        let (next_agent, next_depth) = next_ply(MAXIMIZER, game.num_agents(), 0);
        let options = actions
            .into_iter()
            .map(|action| {
                let successor = game.successor(MAXIMIZER, action);
                (
                    action,
                    self.value(&successor, next_agent, next_depth, instruments),
                )
            })
            .collect_vec();

        let mut value = N64::NEG_INFINITY;
        for (_, result) in &options {
            value = cmp::max(value, result.value());
        }

        SearchReturn::Node {
            agent: MAXIMIZER,
            options,
            value,
            pruned: false,
        }
    }

    fn value<I: SearchInstruments>(
        &self,
        game: &GameType,
        agent: AgentIndex,
        depth: usize,
        instruments: &I,
    ) -> SearchReturn<GameType::Action> {
        if game.is_over() || depth >= self.options.depth {
            return self.frontier(game, instruments);
        }

        let actions = game.legal_actions(agent);
        if actions.is_empty() {
            // A non-terminal state where the moving agent has no legal
            // actions is treated as a frontier state, in every engine.
            return self.frontier(game, instruments);
        }

        let (next_agent, next_depth) = next_ply(agent, game.num_agents(), depth);
        let options = actions
            .into_iter()
            .map(|action| {
                let successor = game.successor(agent, action);
                (
                    action,
                    self.value(&successor, next_agent, next_depth, instruments),
                )
            })
            .collect_vec();

        let mut value = if agent == MAXIMIZER {
            N64::NEG_INFINITY
        } else {
            N64::INFINITY
        };
        for (_, result) in &options {
            value = if agent == MAXIMIZER {
                cmp::max(value, result.value())
            } else {
                cmp::min(value, result.value())
            };
        }

        SearchReturn::Node {
            agent,
            options,
            value,
            pruned: false,
        }
    }

    fn frontier<I: SearchInstruments>(
        &self,
        game: &GameType,
        instruments: &I,
    ) -> SearchReturn<GameType::Action> {
        instruments.observe_evaluation();

        SearchReturn::Leaf {
            value: self.score_function.score(game),
        }
    }
}

#[cfg(test)]
mod tests {}
