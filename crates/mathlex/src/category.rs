//! Lexical categories and their priority order.

use crate::error::ParseCategoryError;
use std::fmt;
use std::str::FromStr;

/// Reserved words of the language. Matching is case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Keyword {
    Soit,
    Dans,
}

impl Keyword {
    pub const ALL: [Keyword; 2] = [Keyword::Soit, Keyword::Dans];

    /// The exact spelling recognised for this keyword.
    pub fn literal(self) -> &'static str {
        match self {
            Keyword::Soit => "SOIT",
            Keyword::Dans => "dans",
        }
    }
}

/// The class a whole input string belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Keyword(Keyword),
    /// The `<-` operator.
    Assignment,
    Complex,
    Real,
    Integer,
    Identifier,
    /// No category accepted the input.
    Unknown,
}

impl Category {
    /// Order in which categories are tried; the first match wins.
    ///
    /// Keywords precede `Identifier` because every keyword is also shaped
    /// like an identifier, and `Complex` precedes `Real` precedes `Integer`
    /// so the most specific numeric form is reported.
    pub const PRIORITY: [Category; 7] = [
        Category::Keyword(Keyword::Soit),
        Category::Keyword(Keyword::Dans),
        Category::Assignment,
        Category::Complex,
        Category::Real,
        Category::Integer,
        Category::Identifier,
    ];

    /// Position in [`Category::PRIORITY`]; `None` for `Unknown`.
    pub fn rank(self) -> Option<usize> {
        Self::PRIORITY.iter().position(|&c| c == self)
    }

    /// Short machine-friendly name, accepted back by `FromStr`.
    pub fn name(self) -> &'static str {
        match self {
            Category::Keyword(Keyword::Soit) => "soit",
            Category::Keyword(Keyword::Dans) => "dans",
            Category::Assignment => "assignment",
            Category::Complex => "complex",
            Category::Real => "real",
            Category::Integer => "integer",
            Category::Identifier => "identifier",
            Category::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Keyword(keyword) => write!(f, "keyword ({})", keyword.literal()),
            Category::Assignment => f.write_str("assignment operator (<-)"),
            Category::Complex => f.write_str("complex number"),
            Category::Real => f.write_str("real number"),
            Category::Integer => f.write_str("integer"),
            Category::Identifier => f.write_str("identifier"),
            Category::Unknown => f.write_str("unknown"),
        }
    }
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::PRIORITY
            .into_iter()
            .chain([Category::Unknown])
            .find(|c| c.name() == wanted)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}
