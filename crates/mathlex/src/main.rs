//! Command-line driver for the classifier.
//!
//! Usage:
//!   mathlex SOIT 42 "2.5-1.2i"        # classify arguments
//!   mathlex                            # read one string per line until `quit`
//!   mathlex --strategy nfa --dump complex

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::Parser;
use mathlex::{Category, Classifier, ClassifierConfig, Limits, Strategy};

/// Classify strings into MathLang lexical categories.
#[derive(Parser, Debug)]
#[command(name = "mathlex", version)]
struct Args {
    /// How category automata are prepared: nfa, dfa or minimal_dfa
    #[arg(long, env = "MATHLEX_STRATEGY", default_value = "dfa")]
    strategy: Strategy,

    /// Maximum number of states in any single automaton
    #[arg(long, env = "MATHLEX_MAX_STATES")]
    max_states: Option<usize>,

    /// Maximum number of transitions in any single automaton
    #[arg(long, env = "MATHLEX_MAX_TRANSITIONS")]
    max_transitions: Option<usize>,

    /// Print the prepared automaton for a category and exit
    #[arg(long, value_name = "CATEGORY")]
    dump: Option<Category>,

    /// Strings to classify; read from stdin when omitted
    inputs: Vec<String>,
}

impl Args {
    fn config(&self) -> ClassifierConfig {
        ClassifierConfig {
            strategy: self.strategy,
            limits: Limits {
                max_states: self.max_states,
                max_transitions: self.max_transitions,
            },
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let classifier = match Classifier::new(&args.config()) {
        Ok(classifier) => classifier,
        Err(err) => {
            tracing::error!(%err, "failed to build automata");
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let result = match args.dump {
        Some(category) => dump(&classifier, category),
        None if args.inputs.is_empty() => interactive(&classifier),
        None => {
            let mut out = io::stdout().lock();
            args.inputs
                .iter()
                .try_for_each(|input| report(&mut out, input, classifier.classify(input)))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn report(out: &mut impl Write, input: &str, category: Category) -> io::Result<()> {
    writeln!(out, "{input}: {category}")
}

fn dump(classifier: &Classifier, category: Category) -> io::Result<()> {
    let mut out = io::stdout().lock();
    match classifier.automaton(category) {
        Some(machine) => write!(out, "{machine}"),
        None => writeln!(out, "{category} has no automaton"),
    }
}

fn interactive(classifier: &Classifier) -> io::Result<()> {
    let stdin = io::stdin();
    let mut out = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim_end_matches('\r');
        if input == "quit" {
            break;
        }
        report(&mut out, input, classifier.classify(input))?;
        out.flush()?;
    }
    Ok(())
}
