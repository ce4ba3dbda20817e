#![deny(
    warnings,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! Depth-bounded adversarial search for turn-based games with a single
//! maximizing agent and any number of opponents. You provide the game state
//! via the capability traits in [`game`] and a scoring function that turns a
//! frontier state into a value; the engines in [`search`] do the rest.
//!
//! Three engines share one recursive skeleton and one turn-rotation rule,
//! differing only in how an opponent's node combines the values of its
//! children:
//!
//! - [`search::MinimaxSearch`] assumes every opponent picks the action that
//!   is worst for the maximizer.
//! - [`search::AlphaBetaSearch`] computes the same value and picks the same
//!   action while skipping subtrees that can no longer matter.
//! - [`search::ExpectimaxSearch`] models each opponent as choosing uniformly
//!   at random among its legal actions.

pub mod game;
pub mod search;

/// Observation hook for a running search.
///
/// The engines call [`SearchInstruments::observe_evaluation`] once per
/// invocation of the evaluation function, which is once per leaf of the
/// explored tree. Implement it to count nodes or feed a profiler.
pub trait SearchInstruments {
    /// Called every time the evaluation function is invoked on a state.
    fn observe_evaluation(&self);
}

#[derive(Debug, Clone, Copy)]
/// An empty struct that implements [`SearchInstruments`] as a no-op which can
/// be used when you don't want to observe the search
pub struct Instruments {}

impl SearchInstruments for Instruments {
    fn observe_evaluation(&self) {}
}

#[cfg(test)]
mod tests {}
