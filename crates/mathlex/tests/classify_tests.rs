//! End-to-end classification scenarios, checked under every strategy.

use mathlex::{Category, Classifier, ClassifierConfig, Keyword, Strategy, classify};

fn classifiers() -> Vec<Classifier> {
    [Strategy::Nfa, Strategy::Dfa, Strategy::MinimalDfa]
        .into_iter()
        .map(|strategy| Classifier::new(&ClassifierConfig::with_strategy(strategy)).unwrap())
        .collect()
}

fn assert_all(input: &str, expected: Category) {
    assert_eq!(classify(input), expected, "default classifier on {input:?}");
    for classifier in classifiers() {
        assert_eq!(
            classifier.classify(input),
            expected,
            "{} classifier on {input:?}",
            classifier.strategy()
        );
    }
}

#[test]
fn identifiers() {
    for input in ["_temp1", "variable1", "_temp", "MyVar", "x", "SOITE", "dans2", "soit"] {
        assert_all(input, Category::Identifier);
    }
}

#[test]
fn keywords_win_over_identifiers() {
    assert_all("SOIT", Category::Keyword(Keyword::Soit));
    assert_all("dans", Category::Keyword(Keyword::Dans));
}

#[test]
fn numbers() {
    assert_all("42", Category::Integer);
    assert_all("0", Category::Integer);
    assert_all("3.14", Category::Real);
    assert_all("0.5", Category::Real);
    assert_all("3+4i", Category::Complex);
    assert_all("2.5-1.2i", Category::Complex);
}

#[test]
fn malformed_numbers_are_unknown() {
    for input in ["2.5+i", "3.", ".5", "1.2.3", "3+4", "4i", "3+4i ", "-1", "1e5"] {
        assert_all(input, Category::Unknown);
    }
}

#[test]
fn assignment() {
    assert_all("<-", Category::Assignment);
    assert_all("<", Category::Unknown);
    assert_all("<--", Category::Unknown);
    assert_all("->", Category::Unknown);
}

#[test]
fn empty_and_whitespace() {
    assert_all("", Category::Unknown);
    assert_all(" ", Category::Unknown);
    assert_all(" SOIT", Category::Unknown);
}

#[test]
fn non_ascii_is_unknown() {
    assert_all("état", Category::Unknown);
    assert_all("π", Category::Unknown);
}
