//! Priority-ordered classification of whole input strings.

use crate::automaton::{Automaton, Dfa, subset_construction};
use crate::builders;
use crate::category::Category;
use crate::config::{ClassifierConfig, Strategy};
use crate::error::AutomatonError;
use crate::recognizer::Recognizer;
use std::fmt;
use std::sync::OnceLock;

/// A category's automaton, prepared according to a [`Strategy`].
#[derive(Debug, Clone)]
pub enum Compiled {
    Nfa(Automaton),
    Dfa(Dfa),
}

impl Compiled {
    fn prepare(nfa: Automaton, strategy: Strategy) -> Result<Self, AutomatonError> {
        match strategy {
            Strategy::Nfa => {
                let mut nfa = nfa;
                nfa.precompute_closures();
                Ok(Compiled::Nfa(nfa))
            }
            Strategy::Dfa => Ok(Compiled::Dfa(subset_construction(&nfa)?)),
            Strategy::MinimalDfa => {
                let dfa = subset_construction(&nfa)?;
                let minimal = dfa.minimize();
                tracing::debug!(
                    before = dfa.num_states(),
                    after = minimal.num_states(),
                    "minimized DFA"
                );
                Ok(Compiled::Dfa(minimal))
            }
        }
    }

    pub fn num_states(&self) -> usize {
        match self {
            Compiled::Nfa(nfa) => nfa.num_states(),
            Compiled::Dfa(dfa) => dfa.num_states(),
        }
    }
}

impl Recognizer for Compiled {
    fn accepts(&self, input: &str) -> bool {
        match self {
            Compiled::Nfa(nfa) => nfa.accepts(input),
            Compiled::Dfa(dfa) => dfa.accepts(input),
        }
    }
}

impl fmt::Display for Compiled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Compiled::Nfa(nfa) => fmt::Display::fmt(nfa, f),
            Compiled::Dfa(dfa) => fmt::Display::fmt(dfa, f),
        }
    }
}

/// Immutable table of prepared automata, one per category in priority
/// order. Built once; classification only reads it.
#[derive(Debug, Clone)]
pub struct Classifier {
    table: Vec<(Category, Compiled)>,
    strategy: Strategy,
}

impl Classifier {
    pub fn new(config: &ClassifierConfig) -> Result<Self, AutomatonError> {
        if !config.limits.is_unbounded() {
            tracing::debug!(limits = ?config.limits, "construction limits in effect");
        }
        let mut table = Vec::with_capacity(Category::PRIORITY.len());

        for category in Category::PRIORITY {
            let nfa = builders::build(category, config.limits)?;
            let nfa_states = nfa.num_states();
            let compiled = Compiled::prepare(nfa, config.strategy)?;
            tracing::debug!(
                %category,
                strategy = %config.strategy,
                nfa_states,
                states = compiled.num_states(),
                "compiled category"
            );
            table.push((category, compiled));
        }

        Ok(Self {
            table,
            strategy: config.strategy,
        })
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// The first category, in priority order, whose automaton accepts the
    /// whole of `input`; `Category::Unknown` when none does.
    pub fn classify(&self, input: &str) -> Category {
        let category = self
            .table
            .iter()
            .find(|(_, machine)| machine.accepts(input))
            .map_or(Category::Unknown, |&(category, _)| category);

        tracing::trace!(input, %category, "classified");
        category
    }

    /// The prepared automaton for `category`, if it has one.
    pub fn automaton(&self, category: Category) -> Option<&Compiled> {
        category
            .rank()
            .and_then(|rank| self.table.get(rank))
            .map(|(_, machine)| machine)
    }
}

impl Default for Classifier {
    /// Unbounded limits with the default strategy.
    fn default() -> Self {
        let config = ClassifierConfig::default();
        match Self::new(&config) {
            Ok(classifier) => classifier,
            Err(err) => unreachable!("unbounded construction cannot fail: {err}"),
        }
    }
}

/// Classify `input` with the process-wide default classifier, which is
/// built on first use and never modified afterwards.
pub fn classify(input: &str) -> Category {
    static DEFAULT: OnceLock<Classifier> = OnceLock::new();
    DEFAULT.get_or_init(Classifier::default).classify(input)
}
