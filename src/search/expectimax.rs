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
/// Depth-bounded expectimax.
///
/// Each opponent is modeled as choosing uniformly at random among its own
/// legal actions, so an opponent's node backs up the mean of its children
/// instead of their minimum, and the value at the root is an expectation
/// rather than a worst-case guarantee. The uniform probability is local to
/// each node: an opponent with two actions here and five actions elsewhere
/// weights them 1/2 and 1/5 respectively.
///
/// An expectation is not bounded the way a minimum is, so there is no valid
/// cutoff at a chance node and this engine never prunes.
pub struct ExpectimaxSearch<GameType, ScorableType>
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

impl<GameType, ScorableType> ExpectimaxSearch<GameType, ScorableType>
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
    /// Ties break to the first-seen maximum in action-enumeration order.
    /// Returns `None` when the root is terminal or the maximizer has no
    /// legal actions.
    pub fn choose_action(&self, game: &GameType) -> Option<GameType::Action> {
        info_span!(
            "expectimax",
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
        // Same root driver as the adversarial engines: the maximizer picks
        // among its root successors and the frontier check never applies to
        // the root state itself.
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
            // Same fallback as the other engines: score it and stop.
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

        if agent == MAXIMIZER {
            let mut value = N64::NEG_INFINITY;
            for (_, result) in &options {
                value = cmp::max(value, result.value());
            }

            SearchReturn::Node {
                agent,
                options,
                value,
                pruned: false,
            }
        } else {
            // Uniform over this node's own legal actions.
            let probability = N64::from(1.0) / N64::from(options.len() as f64);
            let mut value = N64::from(0.0);
            for (_, result) in &options {
                value = value + probability * result.value();
            }

            SearchReturn::Chance {
                agent,
                options,
                value,
            }
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
