//! Error types for automaton construction and text parsing.

use crate::automaton::StateId;
use thiserror::Error;

/// Failure while building or transforming an automaton.
///
/// Recognition never fails; a rejected input is a `false`, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutomatonError {
    #[error("state limit of {limit} exceeded")]
    StateLimit { limit: usize },
    #[error("transition limit of {limit} exceeded")]
    TransitionLimit { limit: usize },
    #[error("state {state} does not exist (automaton has {num_states} states)")]
    UnknownState { state: StateId, num_states: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category `{0}`")]
pub struct ParseCategoryError(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown strategy `{0}` (expected `nfa`, `dfa` or `minimal_dfa`)")]
pub struct ParseStrategyError(pub String);
