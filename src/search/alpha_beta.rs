use std::{cmp, marker::PhantomData};

use decorum::{Infinite, N64};
use derivative::Derivative;
use tracing::{info, info_span};

use crate::{
    game::{AgentIndex, SearchableGame, MAXIMIZER},
    Instruments, SearchInstruments,
};

use super::{next_ply, Scorable, SearchOptions, SearchReturn};

#[derive(Derivative, Clone)]
#[derivative(Debug)]
/// Minimax with alpha-beta pruning.
///
/// Alpha is the value the maximizer can already guarantee, beta the value
/// an opponent can already guarantee; both are copied down the call chain,
/// never shared. A sibling is skipped as soon as its node's value proves it
/// cannot influence the value above it, so this engine visits at most as
/// many nodes as [`MinimaxSearch`](super::MinimaxSearch) while returning
/// the identical root action and value. The cutoffs are strict (`v > beta`,
/// `v < alpha`), which is what keeps the chosen action identical and not
/// merely the value.
pub struct AlphaBetaSearch<GameType, ScorableType>
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

impl<GameType, ScorableType> AlphaBetaSearch<GameType, ScorableType>
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
    /// Pruning never changes the result: this returns exactly the action
    /// [`MinimaxSearch`](super::MinimaxSearch) would return, including on
    /// ties, which break to the first-seen maximum in enumeration order.
    /// Returns `None` when the root is terminal or the maximizer has no
    /// legal actions.
    pub fn choose_action(&self, game: &GameType) -> Option<GameType::Action> {
        info_span!(
            "alpha_beta",
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
    ///
    /// Subtrees behind a cutoff are absent from the returned tree.
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
        // The root mirrors an interior maximizer node, threading alpha
        // across its siblings. Beta stays infinite here, so the root itself
        // never cuts off; the rising alpha prunes inside the later
        // subtrees instead.
        if game.is_over() {
            return self.frontier(game, instruments);
        }

        let actions = game.legal_actions(MAXIMIZER);
        if actions.is_empty() {
            return self.frontier(game, instruments);
        }

        let (next_agent, next_depth) = next_ply(MAXIMIZER, game.num_agents(), 0);
        let beta = N64::INFINITY;
        let mut alpha = N64::NEG_INFINITY;
        let mut value = N64::NEG_INFINITY;
        let mut options = Vec::with_capacity(actions.len());
        let mut pruned = false;

        for action in actions {
            let successor = game.successor(MAXIMIZER, action);
            let result = self.value(
                &successor,
                next_agent,
                next_depth,
                alpha,
                beta,
                instruments,
            );
            value = cmp::max(value, result.value());
            options.push((action, result));

            if value > beta {
                pruned = true;
                break;
            }
            alpha = cmp::max(alpha, value);
        }

        SearchReturn::Node {
            agent: MAXIMIZER,
            options,
            value,
            pruned,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn value<I: SearchInstruments>(
        &self,
        game: &GameType,
        agent: AgentIndex,
        depth: usize,
        alpha: N64,
        beta: N64,
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
        let mut alpha = alpha;
        let mut beta = beta;
        let mut options = Vec::with_capacity(actions.len());
        let mut pruned = false;

        let value = if agent == MAXIMIZER {
            let mut value = N64::NEG_INFINITY;
            for action in actions {
                let successor = game.successor(agent, action);
                let result = self.value(
                    &successor,
                    next_agent,
                    next_depth,
                    alpha,
                    beta,
                    instruments,
                );
                value = cmp::max(value, result.value());
                options.push((action, result));

                if value > beta {
                    pruned = true;
                    break;
                }
                alpha = cmp::max(alpha, value);
            }
            value
        } else {
            let mut value = N64::INFINITY;
            for action in actions {
                let successor = game.successor(agent, action);
                let result = self.value(
                    &successor,
                    next_agent,
                    next_depth,
                    alpha,
                    beta,
                    instruments,
                );
                value = cmp::min(value, result.value());
                options.push((action, result));

                if value < alpha {
                    pruned = true;
                    break;
                }
                beta = cmp::min(beta, value);
            }
            value
        };

        SearchReturn::Node {
            agent,
            options,
            value,
            pruned,
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
