//! Query resolution over the knowledge base.
//!
//! Resolution is backward chaining with committed choice: the goals of a
//! query live on an explicit stack (the resolvent), the top goal is resolved
//! against its fact entry first and the rule entries second, and the first
//! alternative that succeeds wins. There is no backtracking; a goal that no
//! entry resolves fails the whole query.
//!
//! The work splits into:
//!
//! 1. Ground resolution (`ground`): every argument is a literal, the answer
//!    is a plain verdict.
//! 2. Non-ground resolution (`nonground`): query variables accumulate
//!    candidate values positionally from every matching fact alternative,
//!    and rule heads project candidates out of their body's own resolution.
//! 3. List matching (`lists`): embedded lists pair up by table position and
//!    compare element by element, with the rule path absorbing a query
//!    list's tail into the last head-list variable.
//! 4. Validation (`validate`): candidate lists are reconciled across
//!    duplicate variables and conjoined goals, and surviving rows are
//!    re-queried against the knowledge base before presentation.

mod ground;
mod lists;
mod nonground;
pub(crate) mod validate;

use crate::error::HornError;
use crate::knowledge::KnowledgeBase;
use crate::resource_limits::ResourceLimits;
use crate::response::{BindingSet, Resolution};
use crate::term::{is_variable_token, Goal, HornRule, Query, Substitution};
use crate::HornResult;

/// Raw outcome of a non-ground resolution, before presentation
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The chain failed, or succeeded without ever touching a variable
    Verdict(bool),
    /// The surviving candidate lists
    Candidates(Vec<Substitution>),
}

/// Resolves goals against a knowledge base under resource limits
pub struct Resolver<'a> {
    knowledge: &'a KnowledgeBase,
    limits: &'a ResourceLimits,
}

impl<'a> Resolver<'a> {
    pub fn new(knowledge: &'a KnowledgeBase, limits: &'a ResourceLimits) -> Self {
        Resolver { knowledge, limits }
    }

    /// Resolve a fully ground goal to a verdict
    pub fn resolve_ground(&self, goal: &Goal) -> HornResult<bool> {
        self.ground_goal(goal, 0)
    }

    /// Resolve a goal with variables to bindings, a bare verdict, or failure
    pub fn resolve_non_ground(&self, goal: &Goal) -> HornResult<Resolution> {
        let mut working = goal.clone();
        match self.non_ground_goal(&mut working, 0)? {
            Outcome::Verdict(true) => Ok(Resolution::Truth { value: true }),
            Outcome::Verdict(false) => Ok(Resolution::Failure),
            Outcome::Candidates(substitutions) => Ok(Resolution::Bindings {
                bindings: BindingSet::new(substitutions),
            }),
        }
    }

    pub(crate) fn check_depth(&self, depth: usize) -> HornResult<()> {
        if depth > self.limits.max_recursion_depth {
            return Err(HornError::RecursionLimit(self.limits.max_recursion_depth));
        }
        Ok(())
    }

    /// Whether a rule head can resolve this query.
    ///
    /// The functor and arity must match, and the last argument position
    /// governs acceptance: it must hold equal text or a head-side variable.
    /// Earlier positions only veto, when both sides are non-variable
    /// literals with different text. Heads whose arguments are all lists
    /// have arity zero and never match.
    pub(crate) fn rule_matches(&self, query: &Query, rule: &HornRule) -> bool {
        if query.functor != rule.head.functor {
            return false;
        }
        let head_predicate = match rule.head_predicate() {
            Some(predicate) => predicate,
            None => return false,
        };
        if query.arity() != head_predicate.arity() {
            return false;
        }
        let mut matching = false;
        for i in 0..query.arity() {
            let query_term = &query.predicate.terms[i];
            let head_term = &head_predicate.terms[i];
            let variable = head_term.is_variable();
            if i == query.arity() - 1 {
                if query_term.text() == head_term.text() || variable {
                    matching = true;
                }
            } else if query_term.text() != head_term.text() && !variable {
                break;
            }
        }
        matching
    }

    /// Bind each head variable to the query argument standing in its
    /// position. The binding is recorded even when the query argument is
    /// itself a variable; its name then travels as an ordinary token.
    pub(crate) fn head_substitutions(&self, rule: &HornRule, query: &Query) -> Vec<Substitution> {
        let mut substitutions = Vec::new();
        let head_predicate = match rule.head_predicate() {
            Some(predicate) => predicate,
            None => return substitutions,
        };
        if !head_predicate.has_variable() {
            return substitutions;
        }
        for i in 0..query.arity() {
            let head_term = &head_predicate.terms[i];
            if head_term.is_variable() {
                let mut substitution =
                    Substitution::with_value(head_term.text(), query.predicate.terms[i].text());
                substitution.slot = Some(i);
                substitutions.push(substitution);
            }
        }
        substitutions
    }
}

/// Checks that every literal argument of the caller's query appears among
/// the body's candidates for the same position.
///
/// The lookup is positional: the candidate list for query position `i` is
/// the `i`-th substitution record of the body's resolution. A candidate
/// that is itself a variable token matches anything. A position with no
/// record counts as not covered.
pub(crate) fn body_covers_literals(
    body_substitutions: &[Substitution],
    query: &Query,
    body: &Query,
) -> bool {
    for i in 0..query.arity() {
        let query_term = &query.predicate.terms[i];
        if query_term.is_variable() {
            continue;
        }
        if i >= body.arity() {
            continue;
        }
        if !body.predicate.terms[i].is_variable() {
            continue;
        }
        let candidates = match body_substitutions.get(i) {
            Some(substitution) => substitution,
            None => return false,
        };
        let covered = candidates
            .values
            .iter()
            .any(|value| is_variable_token(value) || value == query_term.text());
        if !covered {
            return false;
        }
    }
    true
}

/// Checks that every literal value a head variable was bound to appears
/// among some same-named body substitution's candidates
pub(crate) fn head_covered_by_body(
    head_substitutions: &[Substitution],
    body_substitutions: &[Substitution],
) -> bool {
    let mut all_found = true;
    for head_substitution in head_substitutions {
        for value in &head_substitution.values {
            if is_variable_token(value) {
                continue;
            }
            let mut found = false;
            for body_substitution in body_substitutions {
                if body_substitution.variable == head_substitution.variable
                    && body_substitution.values.iter().any(|candidate| candidate == value)
                {
                    found = true;
                }
            }
            if !found {
                all_found = false;
            }
        }
    }
    all_found
}

/// True when the two substitution sets share a variable name
pub(crate) fn shares_name(first: &[Substitution], second: &[Substitution]) -> bool {
    first
        .iter()
        .any(|a| second.iter().any(|b| b.variable == a.variable))
}

/// First substitution whose name matches and whose slot is either unclaimed
/// or already claimed for the wanted position
pub(crate) fn find_substitution(
    substitutions: &[Substitution],
    name: &str,
    slot: Option<usize>,
) -> Option<usize> {
    substitutions
        .iter()
        .position(|sub| sub.variable == name && (sub.slot.is_none() || sub.slot == slot))
}

/// Scoped variant of [`find_substitution`] that only considers records
/// tagged with the given goal id
pub(crate) fn find_substitution_scoped(
    substitutions: &[Substitution],
    scope: Option<usize>,
    name: &str,
    slot: Option<usize>,
) -> Option<usize> {
    substitutions.iter().position(|sub| {
        sub.query_id == scope
            && sub.variable == name
            && (sub.slot.is_none() || sub.slot == slot)
    })
}

/// Removes the first candidate equal to `value`, if any
pub(crate) fn remove_first_equal(values: &mut Vec<String>, value: &str) {
    if let Some(position) = values.iter().position(|candidate| candidate == value) {
        values.remove(position);
    }
}
