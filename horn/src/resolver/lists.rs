use super::Resolver;
use crate::term::{Goal, HornRule, ListTerm, Predicate, Query, Substitution, Term};
use crate::HornResult;

impl Resolver<'_> {
    /// Match a ground query against a stored tuple that embeds lists.
    ///
    /// Named terms compare positionally with fact-side variables binding the
    /// query's token. Lists pair up by table position and compare element by
    /// element up to the shorter length; trailing elements on either side
    /// are ignored. Same-named variables must agree on their first bound
    /// value.
    pub(crate) fn match_list_fact(&self, query: &Query, predicate: &Predicate) -> bool {
        let mut bindings: Vec<Substitution> = Vec::new();
        for i in 0..predicate.arity() {
            let fact_term = &predicate.terms[i];
            let query_term = match query.predicate.term(i) {
                Some(term) => term,
                None => return false,
            };
            if fact_term.is_variable() {
                bindings.push(Substitution::with_value(fact_term.text(), query_term.text()));
            } else if fact_term.text() != query_term.text() {
                return false;
            }
        }
        for (i, fact_list) in predicate.lists.iter().enumerate() {
            let query_list = match query.predicate.lists.get(i) {
                Some(list) => list,
                None => return false,
            };
            let shorter = fact_list.len().min(query_list.len());
            for j in 0..shorter {
                let fact_element = &fact_list.elements[j];
                let query_element = &query_list.elements[j];
                if fact_element.is_variable() {
                    bindings
                        .push(Substitution::with_value(fact_element.text(), query_element.text()));
                } else if fact_element.text() != query_element.text() {
                    return false;
                }
            }
        }
        bindings_agree(&bindings)
    }

    /// Resolve a ground query against a rule whose head embeds lists.
    ///
    /// Head terms and list elements bind like the fact path, except that
    /// when the head list is no longer than the query list, the variable in
    /// the head list's last position absorbs the query list's remaining
    /// tail. The rule body is then rebuilt with the bound values substituted
    /// in and resolved as a ground goal: a binding holding several values
    /// (or sitting in the final binding position) re-enters as an embedded
    /// list, a single-valued one as a plain token.
    pub(crate) fn resolve_list_rule(
        &self,
        query: &Query,
        rule: &HornRule,
        depth: usize,
    ) -> HornResult<bool> {
        let head_predicate = match rule.head_predicate() {
            Some(predicate) => predicate,
            None => return Ok(false),
        };
        let body = match &rule.body {
            Goal::Simple(body) => body,
            // list heads only combine with simple bodies
            Goal::Conjunctive(_) => return Ok(false),
        };
        let mut bindings: Vec<Substitution> = Vec::new();
        for i in 0..head_predicate.arity() {
            let head_term = &head_predicate.terms[i];
            let query_term = match query.predicate.term(i) {
                Some(term) => term,
                None => return Ok(false),
            };
            if head_term.is_variable() {
                bindings.push(Substitution::with_value(head_term.text(), query_term.text()));
            } else if head_term.text() != query_term.text() {
                return Ok(false);
            }
        }
        for (i, head_list) in head_predicate.lists.iter().enumerate() {
            let query_list = match query.predicate.lists.get(i) {
                Some(list) => list,
                None => return Ok(false),
            };
            if head_list.len() <= query_list.len() {
                for j in 0..head_list.len() {
                    let head_element = &head_list.elements[j];
                    let query_element = &query_list.elements[j];
                    if head_element.is_variable() {
                        let mut binding =
                            Substitution::with_value(head_element.text(), query_element.text());
                        if j == head_list.len() - 1 {
                            for tail in query_list.elements.iter().skip(j + 1) {
                                binding.values.push(tail.text().to_string());
                            }
                        }
                        bindings.push(binding);
                    } else if head_element.text() != query_element.text() {
                        return Ok(false);
                    }
                }
            } else {
                for j in 0..query_list.len() {
                    let head_element = &head_list.elements[j];
                    let query_element = &query_list.elements[j];
                    if head_element.is_variable() {
                        bindings
                            .push(Substitution::with_value(head_element.text(), query_element.text()));
                    } else if head_element.text() != query_element.text() {
                        return Ok(false);
                    }
                }
            }
        }
        if !bindings_agree(&bindings) {
            return Ok(false);
        }
        let probe = rebuild_body(body, &bindings);
        self.ground_goal(&Goal::Simple(probe), depth + 1)
    }
}

/// Same-named bindings must hold the same first value
fn bindings_agree(bindings: &[Substitution]) -> bool {
    for i in 0..bindings.len() {
        for j in (i + 1)..bindings.len() {
            if bindings[i].variable == bindings[j].variable
                && bindings[i].values.first() != bindings[j].values.first()
            {
                return false;
            }
        }
    }
    true
}

/// Rebuild the rule body with bound values substituted for its variables.
///
/// Every binding with a matching name contributes, in order: a multi-valued
/// binding (or the one sitting at the final binding position) re-enters as
/// an embedded list, a single value as a plain token. An unbound variable
/// keeps its own name as a token.
fn rebuild_body(body: &Query, bindings: &[Substitution]) -> Query {
    let mut predicate = Predicate::new();
    for i in 0..body.arity() {
        let body_term = &body.predicate.terms[i];
        if !body_term.is_variable() {
            predicate.push_term(body_term.clone());
            continue;
        }
        let mut found = false;
        for (j, binding) in bindings.iter().enumerate() {
            if binding.variable != body_term.text() {
                continue;
            }
            found = true;
            if binding.len() > 1 || j == bindings.len() - 1 {
                let elements = binding
                    .values
                    .iter()
                    .map(|value| Term::from_token(value.clone()))
                    .collect();
                predicate.push_list(ListTerm::new(elements));
            } else if let Some(value) = binding.values.first() {
                predicate.push_term(Term::from_token(value.clone()));
            }
        }
        if !found {
            predicate.push_term(body_term.clone());
        }
    }
    Query::new(body.functor.clone(), predicate)
}
