//! Epsilon Non-deterministic Finite Automaton (ε-NFA) model.

use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::{EPSILON, Symbol};
use crate::config::Limits;
use crate::error::AutomatonError;
use indexmap::{IndexMap, IndexSet};
use std::collections::HashMap;

/// A state of an [`Automaton`]. Only meaningful inside its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    pub id: StateId,
    pub accepting: bool,
}

/// A labeled edge `source --symbol--> destination`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transition {
    pub source: StateId,
    pub destination: StateId,
    pub symbol: Symbol,
}

/// An ε-NFA with a single initial state.
///
/// States live in an arena and are numbered densely from 0; state 0 is
/// created by the constructor and is the initial state.
#[derive(Debug, Clone)]
pub struct Automaton {
    states: Vec<State>,
    transitions: Vec<Transition>,
    /// (source, symbol) -> destinations; ε-moves are keyed on `EPSILON`.
    targets: HashMap<(StateId, Symbol), StateSet>,
    initial: StateId,
    accepting: StateSet,
    /// Non-ε symbols in first-use order.
    alphabet: IndexSet<char>,
    limits: Limits,
    /// Cached epsilon closures for each state.
    pub(crate) epsilon_closures: Option<Vec<StateSet>>,
}

impl Automaton {
    /// Create an unbounded automaton holding only its initial state.
    pub fn new() -> Self {
        Self {
            states: vec![State {
                id: 0,
                accepting: false,
            }],
            transitions: Vec::new(),
            targets: HashMap::new(),
            initial: 0,
            accepting: StateSet::with_capacity(16),
            alphabet: IndexSet::new(),
            limits: Limits::UNBOUNDED,
            epsilon_closures: None,
        }
    }

    /// Create an automaton whose growth is bounded by `limits`.
    pub fn with_limits(limits: Limits) -> Result<Self, AutomatonError> {
        if let Some(limit) = limits.max_states {
            if limit == 0 {
                return Err(AutomatonError::StateLimit { limit });
            }
        }
        let mut nfa = Self::new();
        nfa.limits = limits;
        Ok(nfa)
    }

    /// Add a new state and return its ID.
    pub fn add_state(&mut self, accepting: bool) -> Result<StateId, AutomatonError> {
        if let Some(limit) = self.limits.max_states {
            if self.states.len() >= limit {
                return Err(AutomatonError::StateLimit { limit });
            }
        }

        let id = self.states.len() as StateId;
        self.states.push(State { id, accepting });
        if accepting {
            self.accepting.insert(id);
        }
        self.epsilon_closures = None;
        Ok(id)
    }

    /// Change the accepting flag of an existing state.
    pub fn set_accepting(&mut self, state: StateId, accepting: bool) -> Result<(), AutomatonError> {
        self.check_state(state)?;
        self.states[state as usize].accepting = accepting;
        if accepting {
            self.accepting.insert(state);
        } else {
            self.accepting = self.accepting.iter().filter(|&s| s != state).collect();
        }
        Ok(())
    }

    /// Add a transition from source to destination on the given symbol.
    pub fn add_transition(
        &mut self,
        source: StateId,
        destination: StateId,
        symbol: impl Into<Symbol>,
    ) -> Result<(), AutomatonError> {
        self.check_state(source)?;
        self.check_state(destination)?;

        let symbol = symbol.into();
        let exists = self
            .targets
            .get(&(source, symbol))
            .is_some_and(|dests| dests.contains(destination));
        if exists {
            return Ok(());
        }
        if let Some(limit) = self.limits.max_transitions {
            if self.transitions.len() >= limit {
                return Err(AutomatonError::TransitionLimit { limit });
            }
        }

        if let Some(c) = symbol.as_char() {
            self.alphabet.insert(c);
        }

        let capacity = self.states.len();
        self.targets
            .entry((source, symbol))
            .or_insert_with(|| StateSet::with_capacity(capacity))
            .insert(destination);
        self.transitions.push(Transition {
            source,
            destination,
            symbol,
        });

        if symbol.is_epsilon() {
            self.epsilon_closures = None;
        }
        Ok(())
    }

    /// Add an epsilon transition from source to destination.
    pub fn add_epsilon_transition(
        &mut self,
        source: StateId,
        destination: StateId,
    ) -> Result<(), AutomatonError> {
        self.add_transition(source, destination, EPSILON)
    }

    /// Add one transition per character of `class`.
    pub fn add_class_transition(
        &mut self,
        source: StateId,
        destination: StateId,
        class: impl IntoIterator<Item = char>,
    ) -> Result<(), AutomatonError> {
        for c in class {
            self.add_transition(source, destination, c)?;
        }
        Ok(())
    }

    fn check_state(&self, state: StateId) -> Result<(), AutomatonError> {
        if (state as usize) < self.states.len() {
            Ok(())
        } else {
            Err(AutomatonError::UnknownState {
                state,
                num_states: self.states.len(),
            })
        }
    }

    /// Get the number of states.
    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// Get the number of distinct transitions.
    pub fn num_transitions(&self) -> usize {
        self.transitions.len()
    }

    /// Get the initial state.
    pub fn initial(&self) -> StateId {
        self.initial
    }

    /// Get all states, indexed by ID.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Check if a state is accepting.
    pub fn is_accepting(&self, state: StateId) -> bool {
        self.accepting.contains(state)
    }

    /// Get the accepting states.
    pub fn accepting_states(&self) -> &StateSet {
        &self.accepting
    }

    /// Get the alphabet (all symbols except epsilon).
    pub fn alphabet(&self) -> &IndexSet<char> {
        &self.alphabet
    }

    /// Get the construction limits.
    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Destinations of `source` on `symbol`, if any.
    pub fn targets(&self, source: StateId, symbol: Symbol) -> Option<&StateSet> {
        self.targets.get(&(source, symbol))
    }

    /// All transitions in insertion order.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Transitions leaving `state`, in insertion order.
    pub fn outgoing(&self, state: StateId) -> impl Iterator<Item = &Transition> + '_ {
        self.transitions.iter().filter(move |t| t.source == state)
    }

    /// True when there are no ε-transitions and no (state, symbol) pair
    /// has more than one destination.
    pub fn is_deterministic(&self) -> bool {
        self.targets
            .iter()
            .all(|(&(_, symbol), dests)| !symbol.is_epsilon() && dests.len() <= 1)
    }

    /// source -> symbol -> destinations, grouped for display.
    pub fn to_transition_map(&self) -> IndexMap<StateId, IndexMap<Symbol, Vec<StateId>>> {
        let mut map: IndexMap<StateId, IndexMap<Symbol, Vec<StateId>>> = IndexMap::new();

        for t in &self.transitions {
            map.entry(t.source)
                .or_default()
                .entry(t.symbol)
                .or_default()
                .push(t.destination);
        }

        map.sort_keys();
        map
    }
}

impl Default for Automaton {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_automaton_basic() {
        let mut nfa = Automaton::new();
        let s1 = nfa.add_state(false).unwrap();
        let s2 = nfa.add_state(true).unwrap();

        // 0 -a-> 1 -ε-> 2 (accepting)
        nfa.add_transition(0, s1, 'a').unwrap();
        nfa.add_epsilon_transition(s1, s2).unwrap();

        assert_eq!(nfa.num_states(), 3);
        assert_eq!(nfa.num_transitions(), 2);
        assert_eq!(nfa.initial(), 0);
        assert!(nfa.is_accepting(s2));
        assert!(!nfa.is_accepting(s1));
        assert_eq!(nfa.alphabet().iter().copied().collect::<Vec<_>>(), vec!['a']);
        assert!(!nfa.is_deterministic());
    }

    #[test]
    fn test_duplicate_transition_is_stored_once() {
        let mut nfa = Automaton::new();
        let s1 = nfa.add_state(true).unwrap();
        nfa.add_transition(0, s1, 'x').unwrap();
        nfa.add_transition(0, s1, 'x').unwrap();
        assert_eq!(nfa.num_transitions(), 1);
        assert!(nfa.is_deterministic());
    }

    #[test]
    fn test_unknown_state_is_rejected() {
        let mut nfa = Automaton::new();
        let err = nfa.add_transition(0, 3, 'a').unwrap_err();
        assert_eq!(
            err,
            AutomatonError::UnknownState {
                state: 3,
                num_states: 1
            }
        );
        assert!(nfa.set_accepting(9, true).is_err());
        assert_eq!(nfa.num_transitions(), 0);
    }

    #[test]
    fn test_state_limit_is_reported() {
        let limits = Limits {
            max_states: Some(2),
            max_transitions: None,
        };
        let mut nfa = Automaton::with_limits(limits).unwrap();
        nfa.add_state(true).unwrap();
        assert_eq!(
            nfa.add_state(false),
            Err(AutomatonError::StateLimit { limit: 2 })
        );
        assert_eq!(nfa.num_states(), 2);

        assert!(Automaton::with_limits(Limits {
            max_states: Some(0),
            max_transitions: None,
        })
        .is_err());
    }

    #[test]
    fn test_transition_limit_is_reported() {
        let limits = Limits {
            max_states: None,
            max_transitions: Some(3),
        };
        let mut nfa = Automaton::with_limits(limits).unwrap();
        let s1 = nfa.add_state(true).unwrap();
        let err = nfa.add_class_transition(0, s1, '0'..='9').unwrap_err();
        assert_eq!(err, AutomatonError::TransitionLimit { limit: 3 });
        assert_eq!(nfa.num_transitions(), 3);
    }

    #[test]
    fn test_duplicate_at_transition_limit_is_accepted() {
        let limits = Limits {
            max_states: None,
            max_transitions: Some(1),
        };
        let mut nfa = Automaton::with_limits(limits).unwrap();
        let s1 = nfa.add_state(true).unwrap();
        nfa.add_transition(0, s1, 'a').unwrap();
        nfa.add_transition(0, s1, 'a').unwrap();
        assert_eq!(nfa.num_transitions(), 1);
        assert_eq!(
            nfa.add_transition(0, s1, 'b'),
            Err(AutomatonError::TransitionLimit { limit: 1 })
        );
        assert!(!nfa.alphabet().contains(&'b'));
    }

    #[test]
    fn test_set_accepting_toggles() {
        let mut nfa = Automaton::new();
        nfa.set_accepting(0, true).unwrap();
        assert!(nfa.is_accepting(0));
        assert!(nfa.states()[0].accepting);
        nfa.set_accepting(0, false).unwrap();
        assert!(!nfa.is_accepting(0));
        assert!(nfa.accepting_states().is_empty());
    }

    #[test]
    fn test_outgoing_and_transition_map() {
        let mut nfa = Automaton::new();
        let s1 = nfa.add_state(false).unwrap();
        let s2 = nfa.add_state(true).unwrap();
        nfa.add_transition(s1, s2, 'b').unwrap();
        nfa.add_transition(0, s1, 'a').unwrap();
        nfa.add_transition(0, s2, 'a').unwrap();

        assert_eq!(nfa.outgoing(0).count(), 2);
        let map = nfa.to_transition_map();
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(map[&0][&Symbol::Char('a')], vec![1, 2]);
    }
}
