use super::{body_covers_literals, head_covered_by_body, Outcome, Resolver};
use crate::term::{Conjunction, Fact, Goal, HornRule, Predicate, Query};
use crate::HornResult;

impl Resolver<'_> {
    /// Resolve a ground goal with the stack loop.
    ///
    /// Conjuncts are seeded in order and processed from the top, so the last
    /// conjunct resolves first. Each goal tries its fact entry, then the
    /// rule entries; a goal that neither phase resolves fails the query.
    pub(crate) fn ground_goal(&self, goal: &Goal, depth: usize) -> HornResult<bool> {
        self.check_depth(depth)?;
        let mut resolvent: Vec<&Query> = match goal {
            Goal::Simple(query) => vec![query],
            Goal::Conjunctive(conjunction) => conjunction.goals.iter().collect(),
        };
        while let Some(query) = resolvent.last() {
            let mut resolved = false;
            if let Some(fact) = self.knowledge.fact(&query.functor) {
                resolved = self.match_fact_ground(query, fact);
            }
            if !resolved && self.knowledge.has_rule(&query.functor) {
                resolved = self.ground_rule_phase(query, depth)?;
            }
            if !resolved {
                return Ok(false);
            }
            resolvent.pop();
        }
        Ok(true)
    }

    /// Scan the fact entry's alternatives in assertion order; the first
    /// matching tuple resolves the goal
    fn match_fact_ground(&self, query: &Query, fact: &Fact) -> bool {
        for predicate in &fact.alternatives {
            if predicate.contains_list() {
                if self.match_list_fact(query, predicate) {
                    return true;
                }
            } else if predicate.arity() == query.arity()
                && match_plain_alternative(query, predicate)
            {
                return true;
            }
        }
        false
    }

    /// Try every rule entry in assertion order; the first one whose body
    /// holds resolves the goal
    fn ground_rule_phase(&self, query: &Query, depth: usize) -> HornResult<bool> {
        for rule in self.knowledge.rules() {
            if !self.rule_matches(query, rule) {
                continue;
            }
            let head_has_list = rule.head_predicate().map_or(false, Predicate::contains_list);
            match &rule.body {
                Goal::Simple(body) => {
                    if head_has_list {
                        if self.resolve_list_rule(query, rule, depth)? {
                            return Ok(true);
                        }
                        continue;
                    }
                    if body.predicate.has_variable() {
                        if self.ground_simple_body(query, rule, body, depth)? {
                            return Ok(true);
                        }
                    } else if self.ground_goal(&Goal::Simple(body.clone()), depth + 1)? {
                        return Ok(true);
                    }
                }
                Goal::Conjunctive(conjunction) => {
                    // list heads only combine with simple bodies
                    if head_has_list {
                        continue;
                    }
                    if self.ground_conjunctive_body(query, rule, conjunction, depth)? {
                        return Ok(true);
                    }
                }
            }
        }
        Ok(false)
    }

    /// A simple rule body with variables: resolve the body non-ground, then
    /// require the body's candidates to cover the caller's literals. Failing
    /// that, head bindings may vouch for them; a head with no bindings
    /// waives the check entirely.
    fn ground_simple_body(
        &self,
        query: &Query,
        rule: &HornRule,
        body: &Query,
        depth: usize,
    ) -> HornResult<bool> {
        let head_substitutions = self.head_substitutions(rule, query);
        let mut body_goal = Goal::Simple(body.clone());
        let body_substitutions = match self.non_ground_goal(&mut body_goal, depth + 1)? {
            Outcome::Candidates(substitutions) => substitutions,
            Outcome::Verdict(_) => return Ok(false),
        };
        let mut accepted = body_covers_literals(&body_substitutions, query, body);
        if !accepted {
            if head_substitutions.is_empty() {
                accepted = true;
            } else if head_covered_by_body(&head_substitutions, &body_substitutions) {
                accepted = true;
            }
        }
        Ok(accepted)
    }

    /// A conjunctive rule body: ground conjuncts must hold first, then the
    /// non-ground conjuncts resolve together and each one's candidates must
    /// cover the caller's literals under the same acceptance test
    fn ground_conjunctive_body(
        &self,
        query: &Query,
        rule: &HornRule,
        conjunction: &Conjunction,
        depth: usize,
    ) -> HornResult<bool> {
        let mut non_ground_goals = Vec::new();
        let mut ground_goals = Vec::new();
        for goal in &conjunction.goals {
            if goal.predicate.has_variable() {
                non_ground_goals.push(goal.clone());
            } else {
                ground_goals.push(goal.clone());
            }
        }
        if non_ground_goals.is_empty() {
            for goal in &conjunction.goals {
                if !self.ground_goal(&Goal::Simple(goal.clone()), depth + 1)? {
                    return Ok(false);
                }
            }
            return Ok(true);
        }
        if !ground_goals.is_empty()
            && !self.ground_goal(&Goal::Conjunctive(Conjunction::new(ground_goals)), depth + 1)?
        {
            return Ok(false);
        }
        let head_substitutions = self.head_substitutions(rule, query);
        let mut body_goal = Goal::Conjunctive(Conjunction::new(non_ground_goals.clone()));
        let body_substitutions = match self.non_ground_goal(&mut body_goal, depth + 1)? {
            Outcome::Candidates(substitutions) => substitutions,
            Outcome::Verdict(_) => return Ok(false),
        };
        for goal in &non_ground_goals {
            let mut accepted = body_covers_literals(&body_substitutions, query, goal);
            if !accepted {
                if head_substitutions.is_empty() {
                    accepted = true;
                } else if head_covered_by_body(&head_substitutions, &body_substitutions) {
                    accepted = true;
                }
            }
            if !accepted {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Positional comparison of a ground query tuple against one stored tuple.
///
/// The last position governs: it must hold equal text or a fact-side
/// variable. Earlier positions only veto on a literal mismatch; a fact-side
/// variable always matches its position.
fn match_plain_alternative(query: &Query, predicate: &Predicate) -> bool {
    for j in 0..predicate.arity() {
        let query_term = &query.predicate.terms[j];
        let fact_term = &predicate.terms[j];
        let variable = fact_term.is_variable();
        if j == predicate.arity() - 1 {
            if fact_term.text() == query_term.text() || variable {
                return true;
            }
        }
        if fact_term.text() != query_term.text() && !variable {
            return false;
        }
    }
    false
}
