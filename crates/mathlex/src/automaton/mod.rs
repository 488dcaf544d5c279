//! Finite automata used by the category recognizers.
//!
//! This module provides epsilon-NFA and DFA implementations with:
//! - Epsilon closure computation
//! - Subset construction (NFA to DFA conversion)
//! - Hopcroft's DFA minimization algorithm
//! - A diagnostics pretty-printer

mod closure;
mod dfa;
mod nfa;
mod pretty;
mod state;
mod subset_construction;
mod symbol;

pub use dfa::Dfa;
pub use nfa::{Automaton, State, Transition};
pub use state::{StateId, StateSet};
pub use subset_construction::subset_construction;
pub use symbol::{EPSILON, Symbol};
