//! Symbol types for automata transitions.

use std::fmt;

/// The label of a transition: a concrete input character, or ε.
///
/// ε is never part of an automaton's alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    Epsilon,
    Char(char),
}

/// Shorthand for [`Symbol::Epsilon`].
pub const EPSILON: Symbol = Symbol::Epsilon;

impl Symbol {
    /// Check if this is an epsilon transition label.
    #[inline]
    pub fn is_epsilon(self) -> bool {
        matches!(self, Symbol::Epsilon)
    }

    /// The concrete character, if any.
    #[inline]
    pub fn as_char(self) -> Option<char> {
        match self {
            Symbol::Char(c) => Some(c),
            Symbol::Epsilon => None,
        }
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        Symbol::Char(c)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Epsilon => f.write_str("ε"),
            Symbol::Char(c) => write!(f, "{}", c.escape_debug()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epsilon() {
        assert!(EPSILON.is_epsilon());
        assert!(!Symbol::from('a').is_epsilon());
        assert_eq!(EPSILON.as_char(), None);
        assert_eq!(Symbol::Char('7').as_char(), Some('7'));
    }

    #[test]
    fn test_display() {
        assert_eq!(EPSILON.to_string(), "ε");
        assert_eq!(Symbol::Char('<').to_string(), "<");
        assert_eq!(Symbol::Char('\n').to_string(), "\\n");
    }
}
