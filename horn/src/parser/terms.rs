use crate::error::HornError;
use crate::parser::Rule;
use crate::term::{ListTerm, Predicate, Term};
use pest::iterators::Pair;

/// Build an argument tuple from a `predicate` pair.
///
/// Atom and variable tokens append to the term table and non-empty lists
/// append to the list table; an empty list contributes nothing. Token kinds
/// come from [`Term::from_token`], so the first-character rule stays the
/// single source of truth regardless of which grammar rule matched.
pub(crate) fn parse_predicate(pair: Pair<Rule>) -> Result<(String, Predicate), HornError> {
    let mut functor = None;
    let mut predicate = Predicate::new();

    for inner_pair in pair.into_inner() {
        match inner_pair.as_rule() {
            Rule::functor => functor = Some(inner_pair.as_str().to_string()),
            Rule::atom_token | Rule::variable_token => {
                predicate.push_term(Term::from_token(inner_pair.as_str()));
            }
            Rule::list => {
                let list = parse_list(inner_pair)?;
                if !list.is_empty() {
                    predicate.push_list(list);
                }
            }
            _ => {}
        }
    }

    let functor = functor
        .ok_or_else(|| HornError::engine("Grammar error: predicate missing functor".to_string()))?;
    Ok((functor, predicate))
}

/// Collect list elements in order. The `[head | tail]` divider is purely
/// syntactic, so the elements land in one flat sequence.
pub(crate) fn parse_list(pair: Pair<Rule>) -> Result<ListTerm, HornError> {
    let mut elements = Vec::new();
    for inner_pair in pair.into_inner() {
        match inner_pair.as_rule() {
            Rule::atom_token | Rule::variable_token => {
                elements.push(Term::from_token(inner_pair.as_str()));
            }
            _ => {}
        }
    }
    Ok(ListTerm::new(elements))
}
