use super::validate::check_duplicate_variables;
use super::{
    body_covers_literals, find_substitution, head_covered_by_body, shares_name, Outcome, Resolver,
};
use crate::term::{Conjunction, Fact, Goal, HornRule, Predicate, Query, Substitution, Term};
use crate::HornResult;

impl Resolver<'_> {
    /// Resolve a goal with variables.
    ///
    /// Every variable occurrence is seeded with its own substitution record,
    /// then the goals run through the same stack loop as the ground path:
    /// fact entries accumulate candidate values positionally, rule entries
    /// project candidates out of their body's resolution. A chain that never
    /// touches a variable collapses to a bare verdict. Fact-derived
    /// candidates pass through validation; rule-derived ones are taken as
    /// produced, reconciled only across duplicate names.
    pub(crate) fn non_ground_goal(&self, goal: &mut Goal, depth: usize) -> HornResult<Outcome> {
        self.check_depth(depth)?;
        match goal {
            Goal::Simple(query) => seed_substitutions(query, None),
            Goal::Conjunctive(conjunction) => {
                for (i, query) in conjunction.goals.iter_mut().enumerate() {
                    seed_substitutions(query, Some(i));
                }
            }
        }
        let goal_count = match goal {
            Goal::Simple(_) => 1,
            Goal::Conjunctive(conjunction) => conjunction.goals.len(),
        };
        let mut found_rule = false;
        let mut verdict_only = true;
        let mut failed = false;
        let mut resolvent: Vec<usize> = (0..goal_count).collect();
        while let Some(&index) = resolvent.last() {
            let mut resolved = false;
            let functor = query_at_mut(goal, index).functor.clone();
            if let Some(fact) = self.knowledge.fact(&functor) {
                resolved = accumulate_fact_candidates(query_at_mut(goal, index), fact);
                if resolved {
                    verdict_only = false;
                }
            }
            if !resolved && self.knowledge.has_rule(&functor) {
                resolved = self.non_ground_rule_phase(
                    query_at_mut(goal, index),
                    depth,
                    &mut found_rule,
                    &mut verdict_only,
                )?;
            }
            if !resolved {
                failed = true;
                break;
            }
            resolvent.pop();
        }
        if failed {
            return Ok(Outcome::Verdict(false));
        }
        if verdict_only {
            return Ok(Outcome::Verdict(true));
        }
        if !found_rule {
            if !self.validate(goal, depth)? {
                return Ok(Outcome::Verdict(false));
            }
            return Ok(Outcome::Candidates(collect_deduped(goal)));
        }
        match goal {
            // rule-derived simple results are taken exactly as projected
            Goal::Simple(query) => Ok(Outcome::Candidates(query.substitutions.clone())),
            Goal::Conjunctive(conjunction) => {
                let mut all: Vec<Substitution> = conjunction
                    .goals
                    .iter()
                    .flat_map(|query| query.substitutions.iter().cloned())
                    .collect();
                check_duplicate_variables(&mut all);
                Ok(Outcome::Candidates(dedupe_by_name(all)))
            }
        }
    }

    fn non_ground_rule_phase(
        &self,
        query: &mut Query,
        depth: usize,
        found_rule: &mut bool,
        verdict_only: &mut bool,
    ) -> HornResult<bool> {
        for rule in self.knowledge.rules() {
            if !self.rule_matches(query, rule) {
                continue;
            }
            match &rule.body {
                Goal::Simple(body) => {
                    if body.predicate.has_variable() {
                        if self.non_ground_simple_body(
                            query,
                            rule,
                            body,
                            depth,
                            found_rule,
                            verdict_only,
                        )? {
                            return Ok(true);
                        }
                    } else if self.ground_goal(&Goal::Simple(body.clone()), depth + 1)? {
                        return Ok(true);
                    }
                }
                Goal::Conjunctive(conjunction) => {
                    if self.non_ground_conjunctive_body(
                        query,
                        rule,
                        conjunction,
                        depth,
                        found_rule,
                        verdict_only,
                    )? {
                        return Ok(true);
                    }
                }
            }
        }
        Ok(false)
    }

    /// A simple rule body with variables under a non-ground caller.
    ///
    /// The body resolves on its own, then the caller's literals must appear
    /// among the body's positional candidates (or the head bindings must
    /// vouch for them). On acceptance the body is probed once more with the
    /// head-bound values swapped in, and the probe's candidates are
    /// projected into the caller's records position by position.
    fn non_ground_simple_body(
        &self,
        query: &mut Query,
        rule: &HornRule,
        body: &Query,
        depth: usize,
        found_rule: &mut bool,
        verdict_only: &mut bool,
    ) -> HornResult<bool> {
        let head_substitutions = self.head_substitutions(rule, query);
        let mut body_goal = Goal::Simple(body.clone());
        let body_substitutions = match self.non_ground_goal(&mut body_goal, depth + 1)? {
            Outcome::Candidates(substitutions) => substitutions,
            Outcome::Verdict(_) => return Ok(false),
        };
        if !shares_name(&head_substitutions, &body_substitutions) {
            // the body holds on its own; nothing to project
            return Ok(true);
        }
        let mut accepted = true;
        if !body_covers_literals(&body_substitutions, query, body) {
            accepted = false;
        } else {
            let mut indices = Vec::new();
            let probe = self.probe_body(body, &head_substitutions, &mut indices, depth + 1)?;
            let projected = match probe {
                Outcome::Candidates(substitutions) => substitutions,
                Outcome::Verdict(_) => body_substitutions.clone(),
            };
            project_candidates(query, &projected, &indices);
        }
        if !accepted
            && !head_substitutions.is_empty()
            && head_covered_by_body(&head_substitutions, &body_substitutions)
        {
            let mut indices = Vec::new();
            let probe = self.probe_body(body, &head_substitutions, &mut indices, depth + 1)?;
            if let Outcome::Candidates(projected) = probe {
                project_candidates(query, &projected, &indices);
            }
            accepted = true;
        }
        if accepted {
            *found_rule = true;
            *verdict_only = false;
        }
        Ok(accepted)
    }

    /// A conjunctive rule body under a non-ground caller.
    ///
    /// Ground conjuncts must hold first; the non-ground conjuncts resolve
    /// together. Each body candidate list is then renamed after the value
    /// its head variable was bound to and merged into the caller's records
    /// by that name, so only lists whose head variable stood in for one of
    /// the caller's own variables land anywhere.
    fn non_ground_conjunctive_body(
        &self,
        query: &mut Query,
        rule: &HornRule,
        conjunction: &Conjunction,
        depth: usize,
        found_rule: &mut bool,
        verdict_only: &mut bool,
    ) -> HornResult<bool> {
        let head_substitutions = self.head_substitutions(rule, query);
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
            // a variable-free body under a non-ground caller
            return self.ground_goal(&Goal::Conjunctive(conjunction.clone()), depth + 1);
        }
        if !ground_goals.is_empty()
            && !self.ground_goal(&Goal::Conjunctive(Conjunction::new(ground_goals)), depth + 1)?
        {
            return Ok(false);
        }
        let mut body_goal = Goal::Conjunctive(Conjunction::new(non_ground_goals));
        let body_substitutions = match self.non_ground_goal(&mut body_goal, depth + 1)? {
            Outcome::Candidates(substitutions) => substitutions,
            Outcome::Verdict(_) => return Ok(false),
        };
        if !shares_name(&head_substitutions, &body_substitutions) {
            return Ok(true);
        }
        let mut renamed: Vec<Substitution> = Vec::new();
        for head_substitution in &head_substitutions {
            let bound = match head_substitution.values.first() {
                Some(value) => value.clone(),
                None => continue,
            };
            let mut candidate = Substitution::new(bound);
            for body_substitution in &body_substitutions {
                if body_substitution.variable == head_substitution.variable {
                    candidate.values.extend(body_substitution.values.iter().cloned());
                    renamed.push(candidate.clone());
                }
            }
        }
        for substitution in query.substitutions.iter_mut() {
            for candidate in &renamed {
                if substitution.variable == candidate.variable {
                    substitution.values.extend(candidate.values.iter().cloned());
                }
            }
        }
        check_duplicate_variables(&mut renamed);
        let accepted = renamed.iter().all(|candidate| !candidate.is_empty());
        if accepted {
            *found_rule = true;
            *verdict_only = false;
        }
        Ok(accepted)
    }

    /// Rebuild the body with each head-bound value swapped in for its
    /// variable and resolve the result. `indices` records the body position
    /// of every swap, pairing the probe's candidate lists with the caller's
    /// variables for projection.
    fn probe_body(
        &self,
        body: &Query,
        head_substitutions: &[Substitution],
        indices: &mut Vec<usize>,
        depth: usize,
    ) -> HornResult<Outcome> {
        let mut predicate = Predicate::new();
        for i in 0..body.arity() {
            let body_term = &body.predicate.terms[i];
            if body_term.is_variable() {
                let mut found = false;
                for head_substitution in head_substitutions {
                    if head_substitution.variable == body_term.text() {
                        if let Some(value) = head_substitution.values.first() {
                            predicate.push_term(Term::from_token(value.clone()));
                            indices.push(i);
                            found = true;
                        }
                    }
                }
                if !found {
                    predicate.push_term(body_term.clone());
                }
            } else {
                predicate.push_term(body_term.clone());
            }
        }
        let mut probe = Goal::Simple(Query::new(body.functor.clone(), predicate));
        self.non_ground_goal(&mut probe, depth)
    }
}

fn query_at_mut(goal: &mut Goal, index: usize) -> &mut Query {
    match goal {
        Goal::Simple(query) => query,
        Goal::Conjunctive(conjunction) => &mut conjunction.goals[index],
    }
}

/// One substitution record per variable occurrence, in argument order
fn seed_substitutions(query: &mut Query, id: Option<usize>) {
    query.id = id;
    query.substitutions.clear();
    for term in &query.predicate.terms {
        if term.is_variable() {
            let mut substitution = Substitution::new(term.text());
            substitution.query_id = id;
            query.substitutions.push(substitution);
        }
    }
}

/// Scan every fact alternative, accumulating candidates.
///
/// Matching is positional: a query variable claims its argument position on
/// first use and stages the fact's token (variables included, verbatim); a
/// literal mismatch against a fact literal discards the alternative's staged
/// values. Reaching the last position lands the staged values, and the scan
/// continues so later alternatives accumulate too.
fn accumulate_fact_candidates(query: &mut Query, fact: &Fact) -> bool {
    let mut found = false;
    for predicate in &fact.alternatives {
        if predicate.arity() != query.arity() {
            continue;
        }
        let mut staged: Vec<(usize, String)> = Vec::new();
        let mut matched = false;
        for j in 0..predicate.arity() {
            let fact_term = &predicate.terms[j];
            if query.predicate.terms[j].is_variable() {
                let name = query.predicate.terms[j].text().to_string();
                if let Some(position) = find_substitution(&query.substitutions, &name, Some(j)) {
                    if query.substitutions[position].slot.is_none() {
                        query.substitutions[position].slot = Some(j);
                    }
                    staged.push((position, fact_term.text().to_string()));
                }
                if j == predicate.arity() - 1 {
                    matched = true;
                    break;
                }
            } else {
                let variable = fact_term.is_variable();
                let query_text = query.predicate.terms[j].text();
                if j == predicate.arity() - 1 && (fact_term.text() == query_text || variable) {
                    matched = true;
                    break;
                } else if fact_term.text() != query_text && !variable {
                    staged.clear();
                    break;
                }
            }
        }
        if matched {
            for (position, value) in staged {
                query.substitutions[position].values.push(value);
            }
            found = true;
        }
    }
    found
}

/// Append the probe's candidates onto the caller's records.
///
/// The k-th variable of the query reads `indices[k]` and takes every value
/// of the probe substitution at that index. Positions without a recorded
/// index are left untouched.
fn project_candidates(query: &mut Query, candidates: &[Substitution], indices: &[usize]) {
    let mut variable_counter = 0;
    for i in 0..query.arity() {
        if !query.predicate.terms[i].is_variable() {
            continue;
        }
        let position = variable_counter;
        variable_counter += 1;
        let correct_index = match indices.get(position) {
            Some(&index) => index,
            None => continue,
        };
        let found = match candidates.get(correct_index) {
            Some(substitution) => substitution,
            None => continue,
        };
        if let Some(target) = query.substitutions.get_mut(position) {
            target.values.extend(found.values.iter().cloned());
        }
    }
}

/// First record per variable name wins
fn dedupe_by_name(substitutions: Vec<Substitution>) -> Vec<Substitution> {
    let mut deduped: Vec<Substitution> = Vec::new();
    for substitution in substitutions {
        if !deduped.iter().any(|existing| existing.variable == substitution.variable) {
            deduped.push(substitution);
        }
    }
    deduped
}

/// Collect every record across the goals, first name wins
fn collect_deduped(goal: &Goal) -> Vec<Substitution> {
    match goal {
        Goal::Simple(query) => dedupe_by_name(query.substitutions.clone()),
        Goal::Conjunctive(conjunction) => dedupe_by_name(
            conjunction
                .goals
                .iter()
                .flat_map(|query| query.substitutions.iter().cloned())
                .collect(),
        ),
    }
}
