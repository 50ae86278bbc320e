use crate::error::HornError;
use crate::parser::terms;
use crate::parser::Rule;
use crate::term::{Conjunction, Fact, Goal, HornRule, Query};
use pest::iterators::Pair;

pub(crate) fn parse_fact_definition(pair: Pair<Rule>) -> Result<Fact, HornError> {
    for inner_pair in pair.into_inner() {
        if inner_pair.as_rule() == Rule::predicate {
            let (functor, predicate) = terms::parse_predicate(inner_pair)?;
            return Ok(Fact::new(functor, predicate));
        }
    }
    Err(HornError::engine(
        "Grammar error: fact_definition missing predicate".to_string(),
    ))
}

/// The first predicate is the head; every following predicate is a body
/// goal. One body goal makes a simple body, several make a conjunction.
pub(crate) fn parse_rule_definition(pair: Pair<Rule>) -> Result<HornRule, HornError> {
    let mut head = None;
    let mut goals = Vec::new();

    for inner_pair in pair.into_inner() {
        if inner_pair.as_rule() == Rule::predicate {
            let (functor, predicate) = terms::parse_predicate(inner_pair)?;
            if head.is_none() {
                head = Some(Fact::new(functor, predicate));
            } else {
                goals.push(Query::new(functor, predicate));
            }
        }
    }

    let head = head.ok_or_else(|| {
        HornError::engine("Grammar error: rule_definition missing head".to_string())
    })?;
    let body = build_goal(goals)?;
    Ok(HornRule::new(head, body))
}

pub(crate) fn parse_query_goals(pair: Pair<Rule>) -> Result<Goal, HornError> {
    let mut goals = Vec::new();
    for inner_pair in pair.into_inner() {
        if inner_pair.as_rule() == Rule::predicate {
            let (functor, predicate) = terms::parse_predicate(inner_pair)?;
            goals.push(Query::new(functor, predicate));
        }
    }
    build_goal(goals)
}

fn build_goal(mut goals: Vec<Query>) -> Result<Goal, HornError> {
    match goals.len() {
        0 => Err(HornError::engine(
            "Grammar error: goal sequence is empty".to_string(),
        )),
        1 => Ok(Goal::Simple(goals.remove(0))),
        _ => Ok(Goal::Conjunctive(Conjunction::new(goals))),
    }
}
