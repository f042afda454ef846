//! Parser for the machine-description mini-language, built on `pest`.
//! It turns the `Gamma`/`Sigma`/`Q`/`sig` fields into a fully wired
//! [`Machine`].

use crate::{
    analyzer::analyze,
    machine::Machine,
    types::{MachineError, Write, BLANK_SYMBOL, UNCHANGED_SYMBOL},
};
use pest::{
    error::{Error, ErrorVariant},
    iterators::Pair,
    Parser as PestParser, Span,
};
use pest_derive::Parser as PestParser;
use std::collections::HashSet;

/// Derives a `PestParser` for the description grammar in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct DescriptionParser;

/// Parses a machine description into a runnable [`Machine`].
///
/// Fields may appear in any order; `Q` and `sig` are required, `Gamma` and
/// `Sigma` are optional. The last name in `Q` is the sole accepting state.
/// The tape count is derived from the first `sig` clause; the built machine
/// is validated by the analyzer before being returned.
///
/// # Returns
///
/// * `Ok(Machine)` if the input parses and validates.
/// * `Err(MachineError::Parse)` on syntax errors.
/// * `Err(MachineError::Config)` / `Err(MachineError::DuplicateState)` on
///   semantic errors.
pub fn parse(input: &str) -> Result<Machine, MachineError> {
    let root = DescriptionParser::parse(Rule::description, input.trim())
        .map_err(|e| MachineError::Parse(Box::new(e)))?
        .next()
        .unwrap();

    build_machine(root)
}

/// Walks the top-level fields of a parsed description and drives the
/// [`Machine`] builder API with them.
fn build_machine(pair: Pair<Rule>) -> Result<Machine, MachineError> {
    let mut names: Option<Vec<String>> = None;
    let mut gamma: Option<Vec<char>> = None;
    let mut sigma: Option<Vec<char>> = None;
    let mut clauses: Option<Vec<Pair<Rule>>> = None;
    let mut seen = HashSet::new();

    for p in pair.into_inner() {
        let span = p.as_span();
        let rule = p.as_rule();

        check_unique_field(rule, span, &mut seen)?;

        match rule {
            Rule::states => {
                names = Some(p.into_inner().map(|n| n.as_str().to_string()).collect())
            }
            Rule::alphabet => gamma = Some(collect_symbols(p)),
            Rule::input_alphabet => sigma = Some(collect_symbols(p)),
            Rule::transitions => {
                clauses = Some(
                    p.into_inner()
                        .filter(|c| c.as_rule() == Rule::clause)
                        .collect(),
                )
            }
            _ => {} // EOI
        }
    }

    let names = check_required_field(names, "Q")?;
    let clauses = check_required_field(clauses, "sig")?;

    let mut machine = Machine::new();

    // The last name in Q is the sole accepting state.
    let last = names.len() - 1;
    for (i, name) in names.iter().enumerate() {
        machine.add_state(name, i == last)?;
    }

    if let Some(gamma) = gamma {
        machine.set_alphabet(gamma.into_iter().collect())?;
    }
    if let Some(sigma) = sigma {
        machine.set_input_alphabet(sigma.into_iter().collect())?;
    }

    for clause in clauses {
        add_clause(&mut machine, clause)?;
    }

    analyze(&machine)?;

    Ok(machine)
}

/// Translates one `(state,reads..)=(state',writes..,dirs..)` clause into a
/// machine transition.
///
/// The right-hand side carries the writes and the directions in one flat
/// list; it is split down the middle once the read arity is known.
fn add_clause(machine: &mut Machine, pair: Pair<Rule>) -> Result<(), MachineError> {
    let span = pair.as_span();
    let mut pairs = pair.into_inner();

    let state = pairs
        .next()
        .map(|p| p.as_str().to_string())
        .unwrap_or_default();

    let mut read = Vec::new();
    let mut next_state: Option<String> = None;
    let mut items = Vec::new();

    for p in pairs {
        match p.as_rule() {
            Rule::name => next_state = Some(p.as_str().to_string()),
            Rule::symbol => {
                let symbol = parse_symbol(p.as_str());
                match &next_state {
                    None => read.push(symbol),
                    Some(_) => items.push(symbol),
                }
            }
            _ => {}
        }
    }

    let next_state =
        next_state.ok_or_else(|| parse_error("Clause is missing a target state", span))?;

    let tapes = read.len();
    if items.len() != 2 * tapes {
        return Err(parse_error(
            &format!(
                "Clause for state {state} should carry {tapes} writes and {tapes} directions, found {} entries",
                items.len()
            ),
            span,
        ));
    }

    let writes = items[..tapes]
        .iter()
        .map(|&symbol| {
            if symbol == UNCHANGED_SYMBOL {
                Write::Unchanged
            } else {
                Write::Symbol(symbol)
            }
        })
        .collect();

    machine.add_transition(&state, read, &next_state, writes, &items[tapes..])
}

/// Collects the single-character symbols of an alphabet field.
fn collect_symbols(pair: Pair<Rule>) -> Vec<char> {
    pair.into_inner()
        .filter(|p| p.as_rule() == Rule::symbol)
        .map(|p| parse_symbol(p.as_str()))
        .collect()
}

/// Extracts the single character of a symbol token.
fn parse_symbol(input: &str) -> char {
    input.chars().next().unwrap_or(BLANK_SYMBOL)
}

/// Creates a `MachineError::Parse` from a message and a `Span`.
fn parse_error(msg: &str, span: Span) -> MachineError {
    MachineError::Parse(Box::new(Error::new_from_span(
        ErrorVariant::CustomError {
            message: msg.to_string(),
        },
        span,
    )))
}

/// Rejects a second declaration of any top-level field.
fn check_unique_field(
    rule: Rule,
    span: Span,
    seen: &mut HashSet<Rule>,
) -> Result<(), MachineError> {
    if !matches!(
        rule,
        Rule::alphabet | Rule::input_alphabet | Rule::states | Rule::transitions
    ) {
        return Ok(());
    }

    if seen.contains(&rule) {
        return Err(parse_error(
            &format!("Duplicate \"{}:\" field", field_name(rule)),
            span,
        ));
    }

    seen.insert(rule);

    Ok(())
}

/// Requires a field to be present, failing with a configuration error.
fn check_required_field<T>(value: Option<T>, name: &str) -> Result<T, MachineError> {
    value.ok_or_else(|| MachineError::Config(format!("Missing \"{name}:\" field")))
}

/// The notation-level name of a top-level field rule.
fn field_name(rule: Rule) -> &'static str {
    match rule {
        Rule::alphabet => "Gamma",
        Rule::input_alphabet => "Sigma",
        Rule::states => "Q",
        Rule::transitions => "sig",
        _ => "?",
    }
}
