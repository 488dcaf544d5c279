//! Classifier configuration.

use crate::error::ParseStrategyError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How each category's automaton is prepared before recognition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Simulate the ε-NFA directly.
    Nfa,
    /// Determinize once, then dispatch one transition per character.
    #[default]
    Dfa,
    /// Determinize and minimize.
    MinimalDfa,
}

impl Strategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Nfa => "nfa",
            Strategy::Dfa => "dfa",
            Strategy::MinimalDfa => "minimal_dfa",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nfa" => Ok(Strategy::Nfa),
            "dfa" => Ok(Strategy::Dfa),
            "minimal_dfa" | "minimal-dfa" => Ok(Strategy::MinimalDfa),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}

/// Capacity bounds for automaton construction. `None` means unbounded.
///
/// Exceeding a bound is reported as an error; nothing is ever truncated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub max_states: Option<usize>,
    pub max_transitions: Option<usize>,
}

impl Limits {
    pub const UNBOUNDED: Limits = Limits {
        max_states: None,
        max_transitions: None,
    };

    pub fn is_unbounded(&self) -> bool {
        self.max_states.is_none() && self.max_transitions.is_none()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub strategy: Strategy,
    pub limits: Limits,
}

impl ClassifierConfig {
    pub fn with_strategy(strategy: Strategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }
}
