//! Lexical classification for the MathLang teaching compiler.
//!
//! Each lexical category (keywords, the assignment operator, complex, real
//! and integer literals, identifiers) is described by a hand-built ε-NFA.
//! [`classify`] runs those automata over a single, already segmented string
//! in a fixed priority order and reports the first category that accepts
//! the whole input.
//!
//! ```
//! use mathlex::{Category, Keyword, classify};
//!
//! assert_eq!(classify("SOIT"), Category::Keyword(Keyword::Soit));
//! assert_eq!(classify("_temp1"), Category::Identifier);
//! assert_eq!(classify("2.5-1.2i"), Category::Complex);
//! assert_eq!(classify("<"), Category::Unknown);
//! ```

pub mod automaton;
pub mod builders;
pub mod category;
pub mod classifier;
pub mod config;
pub mod error;
pub mod recognizer;

pub use category::{Category, Keyword};
pub use classifier::{Classifier, Compiled, classify};
pub use config::{ClassifierConfig, Limits, Strategy};
pub use error::AutomatonError;
pub use recognizer::Recognizer;
