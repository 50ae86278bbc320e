//! Row validation for fact-derived candidate lists.
//!
//! Candidate values live in per-occurrence lists that line up positionally:
//! row `k` across a goal's lists is one prospective answer. Validation
//! reconciles duplicate variable names, deletes rows whose values fail a
//! ground re-query, and aligns goals that share a variable inside a
//! conjunction. Deletions always operate on whole rows within one goal's
//! scope, so the lists stay in step.

use super::{find_substitution, find_substitution_scoped, remove_first_equal, Resolver};
use crate::term::{Goal, Predicate, Query, Substitution, Term};
use crate::HornResult;

/// How failing rows are deleted during swapped-frame probing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PruneScope {
    /// Delete the row from every table record tagged with the scope id
    SameQuery,
    /// Delete the row from the working list itself and revisit that row
    ForeignQuery,
}

impl Resolver<'_> {
    /// Validate fact-derived candidates in place. Returns false when a
    /// candidate list is already empty after duplicate reconciliation.
    pub(crate) fn validate(&self, goal: &mut Goal, depth: usize) -> HornResult<bool> {
        match goal {
            Goal::Simple(query) => {
                check_duplicate_variables(&mut query.substitutions);
                if query.substitutions.iter().any(Substitution::is_empty) {
                    return Ok(false);
                }
                let functor = query.functor.clone();
                let predicate = query.predicate.clone();
                self.prune_failing_rows(
                    &functor,
                    &predicate,
                    &mut query.substitutions,
                    None,
                    depth,
                )?;
                Ok(true)
            }
            Goal::Conjunctive(conjunction) => {
                let counts: Vec<usize> = conjunction
                    .goals
                    .iter()
                    .map(|query| query.substitutions.len())
                    .collect();
                let mut table: Vec<Substitution> = Vec::new();
                for query in conjunction.goals.iter_mut() {
                    table.append(&mut query.substitutions);
                }
                check_duplicate_variables(&mut table);
                let emptied = table.iter().any(Substitution::is_empty);
                if !emptied {
                    for index in 0..conjunction.goals.len() {
                        let functor = conjunction.goals[index].functor.clone();
                        let predicate = conjunction.goals[index].predicate.clone();
                        let scope = conjunction.goals[index].id;
                        self.prune_failing_rows(&functor, &predicate, &mut table, scope, depth)?;
                    }
                    self.align_conjunction(&conjunction.goals, &mut table, depth)?;
                }
                let mut records = table.into_iter();
                for (query, count) in conjunction.goals.iter_mut().zip(counts) {
                    query.substitutions = records.by_ref().take(count).collect();
                }
                Ok(!emptied)
            }
        }
    }

    /// Re-query every candidate row against the knowledge base and delete
    /// the values of rows that fail.
    ///
    /// Rows are consumed from a working copy front to back: each pass takes
    /// the first remaining value of every variable position, resolves the
    /// resulting ground goal, and on failure removes those values from the
    /// real records in scope.
    fn prune_failing_rows(
        &self,
        functor: &str,
        predicate: &Predicate,
        table: &mut Vec<Substitution>,
        scope: Option<usize>,
        depth: usize,
    ) -> HornResult<()> {
        let mut copy: Vec<Substitution> = table
            .iter()
            .filter(|substitution| substitution.query_id == scope)
            .cloned()
            .collect();
        while !copy.is_empty() {
            let mut probe_predicate = Predicate::new();
            let mut progressed = false;
            let mut stuck = false;
            for i in 0..predicate.arity() {
                let term = &predicate.terms[i];
                if !term.is_variable() {
                    probe_predicate.push_term(term.clone());
                    continue;
                }
                let position = find_substitution(&copy, term.text(), Some(i));
                let value = position.and_then(|p| copy[p].values.first().cloned());
                match (position, value) {
                    (Some(position), Some(value)) => {
                        probe_predicate.push_term(Term::from_token(value.clone()));
                        remove_first_equal(&mut copy[position].values, &value);
                        progressed = true;
                    }
                    _ => {
                        stuck = true;
                        break;
                    }
                }
            }
            if stuck || !progressed {
                break;
            }
            let probe_values: Vec<String> = probe_predicate
                .terms
                .iter()
                .map(|term| term.text().to_string())
                .collect();
            let probe = Goal::Simple(Query::new(functor, probe_predicate));
            if !self.ground_goal(&probe, depth + 1)? {
                for i in 0..predicate.arity() {
                    let term = &predicate.terms[i];
                    if !term.is_variable() {
                        continue;
                    }
                    if let Some(position) =
                        find_substitution_scoped(table, scope, term.text(), Some(i))
                    {
                        if let Some(value) = probe_values.get(i) {
                            remove_first_equal(&mut table[position].values, value);
                        }
                    }
                }
            }
            copy.retain(|substitution| !substitution.is_empty());
        }
        Ok(())
    }

    /// Reconcile every pair of goals that shares a variable name. The goal
    /// with more variable records drives; on a tie both directions run.
    fn align_conjunction(
        &self,
        queries: &[Query],
        table: &mut Vec<Substitution>,
        depth: usize,
    ) -> HornResult<()> {
        for i in 0..queries.len() {
            let first_count = segment_len(table, queries[i].id);
            for j in (i + 1)..queries.len() {
                if !segments_share_name(table, queries[i].id, queries[j].id) {
                    continue;
                }
                let next_count = segment_len(table, queries[j].id);
                if first_count > next_count {
                    self.align_larger(&queries[i], &queries[j], table, depth)?;
                } else if first_count < next_count {
                    self.align_larger(&queries[j], &queries[i], table, depth)?;
                } else {
                    self.align_larger(&queries[i], &queries[j], table, depth)?;
                    self.align_larger(&queries[j], &queries[i], table, depth)?;
                }
            }
        }
        Ok(())
    }

    /// Swap the larger goal's same-named records into the smaller goal's
    /// argument frame and prune by re-query. When some of the smaller
    /// goal's variables have no counterpart, the pair goes through length
    /// alignment instead.
    fn align_larger(
        &self,
        larger: &Query,
        smaller: &Query,
        table: &mut Vec<Substitution>,
        depth: usize,
    ) -> HornResult<()> {
        let mut shared: Vec<usize> = Vec::new();
        let mut all_found = true;
        let smaller_indices: Vec<usize> = (0..table.len())
            .filter(|&t| table[t].query_id == smaller.id)
            .collect();
        for &t in &smaller_indices {
            let counterpart = (0..table.len()).find(|&u| {
                table[u].query_id == larger.id && table[u].variable == table[t].variable
            });
            match counterpart {
                Some(u) => shared.push(u),
                None => {
                    shared.push(t);
                    all_found = false;
                }
            }
        }
        if all_found {
            let mut working: Vec<Substitution> =
                shared.iter().map(|&t| table[t].clone()).collect();
            self.prune_swapped_rows(
                smaller,
                &mut working,
                table,
                larger.id,
                PruneScope::SameQuery,
                depth,
            )?;
        } else {
            self.equalize(&shared, table, larger, smaller, depth)?;
        }
        Ok(())
    }

    /// Length-align two goals that only partially share variables.
    ///
    /// The target length is the product of the two goals' row counts: the
    /// smaller goal's lists repeat whole, the larger goal's values repeat
    /// element-wise, and lists already at the target length carry over
    /// as-is. The aligned working set is pruned by re-query in the smaller
    /// goal's frame, and original candidates with no surviving aligned
    /// counterpart are swept out.
    fn equalize(
        &self,
        shared: &[usize],
        table: &mut Vec<Substitution>,
        larger: &Query,
        smaller: &Query,
        depth: usize,
    ) -> HornResult<()> {
        let smaller_size = match table.iter().find(|s| s.query_id == smaller.id) {
            Some(substitution) => substitution.len(),
            None => return Ok(()),
        };
        let larger_size = match table.iter().find(|s| s.query_id == larger.id) {
            Some(substitution) => substitution.len(),
            None => return Ok(()),
        };
        let total = larger_size * smaller_size;
        let mut equalized: Vec<Substitution> = Vec::new();
        for &t in shared {
            let substitution = &table[t];
            let mut copy = empty_copy(substitution);
            if substitution.len() == total {
                copy.values = substitution.values.clone();
            } else if substitution.query_id == smaller.id {
                for _ in 0..larger_size {
                    copy.values.extend(substitution.values.iter().cloned());
                }
            } else {
                for value in &substitution.values {
                    for _ in 0..smaller_size {
                        copy.values.push(value.clone());
                    }
                }
            }
            equalized.push(copy);
        }
        self.prune_swapped_rows(
            smaller,
            &mut equalized,
            table,
            larger.id,
            PruneScope::ForeignQuery,
            depth,
        )?;
        for &t in shared {
            let mut index = 0;
            // a removal shifts the next candidate into place and the
            // increment skips it
            while index < table[t].len() {
                let value = table[t].values[index].clone();
                let found = equalized.iter().any(|candidate| {
                    candidate.variable == table[t].variable
                        && candidate.values.iter().any(|v| v == &value)
                });
                if !found {
                    table[t].values.remove(index);
                }
                index += 1;
            }
        }
        Ok(())
    }

    /// Probe rows built from a working list in another goal's argument
    /// frame, deleting the rows whose ground re-query fails.
    fn prune_swapped_rows(
        &self,
        frame: &Query,
        working: &mut Vec<Substitution>,
        table: &mut Vec<Substitution>,
        scope: Option<usize>,
        mode: PruneScope,
        depth: usize,
    ) -> HornResult<()> {
        let mut copy: Vec<Substitution> = working.clone();
        let mut row = 0;
        while !copy.is_empty() {
            let mut probe_predicate = Predicate::new();
            let mut progressed = false;
            for i in 0..frame.arity() {
                let term = &frame.predicate.terms[i];
                if !term.is_variable() {
                    probe_predicate.push_term(term.clone());
                    continue;
                }
                let wanted = copy.get(i).and_then(|substitution| substitution.slot);
                let position = find_substitution(&copy, term.text(), wanted)
                    .or_else(|| copy.iter().position(|s| s.variable == term.text()));
                let value = position.and_then(|p| copy[p].values.first().cloned());
                match (position, value) {
                    (Some(position), Some(value)) => {
                        probe_predicate.push_term(Term::from_token(value.clone()));
                        remove_first_equal(&mut copy[position].values, &value);
                        progressed = true;
                    }
                    _ => {
                        progressed = false;
                        break;
                    }
                }
            }
            if !progressed {
                break;
            }
            let probe = Goal::Simple(Query::new(frame.functor.clone(), probe_predicate));
            let holds = self.ground_goal(&probe, depth + 1)?;
            let mut advanced = true;
            if !holds {
                match mode {
                    PruneScope::SameQuery => delete_row_scoped(table, scope, row),
                    PruneScope::ForeignQuery => {
                        for substitution in working.iter_mut() {
                            if row < substitution.len() {
                                substitution.values.remove(row);
                            }
                        }
                        advanced = false;
                    }
                }
            }
            copy.retain(|substitution| !substitution.is_empty());
            if advanced {
                row += 1;
            }
        }
        Ok(())
    }
}

/// Reconcile records that share a variable name.
///
/// Records with equal row counts in the same goal scope compare
/// positionally, from the last row down, deleting disagreeing rows across
/// the scope. Records with differing counts prune bidirectionally, larger
/// side first: any value missing from the other record's list deletes its
/// row in the owner's scope.
pub(crate) fn check_duplicate_variables(substitutions: &mut Vec<Substitution>) {
    for i in 0..substitutions.len() {
        for j in (i + 1)..substitutions.len() {
            if substitutions[i].variable != substitutions[j].variable {
                continue;
            }
            if substitutions[i].len() == substitutions[j].len()
                && substitutions[i].query_id == substitutions[j].query_id
            {
                let size = substitutions[i].len();
                let scope = substitutions[i].query_id;
                for k in (0..size).rev() {
                    let first = substitutions[i].values.get(k).cloned();
                    let second = substitutions[j].values.get(k).cloned();
                    if let (Some(first), Some(second)) = (first, second) {
                        if first != second {
                            delete_row_scoped(substitutions, scope, k);
                        }
                    }
                }
            } else if substitutions[i].len() > substitutions[j].len() {
                prune_unmatched(substitutions, i, j);
                prune_unmatched(substitutions, j, i);
            } else {
                prune_unmatched(substitutions, j, i);
                prune_unmatched(substitutions, i, j);
            }
        }
    }
}

/// Delete every row of `first` whose value appears nowhere in `next`,
/// scanning from the last row down
fn prune_unmatched(substitutions: &mut [Substitution], first: usize, next: usize) {
    let mut m = substitutions[first].len();
    while m > 0 {
        m -= 1;
        let value = match substitutions[first].values.get(m) {
            Some(value) => value.clone(),
            None => continue,
        };
        let found = substitutions[next]
            .values
            .iter()
            .rev()
            .any(|candidate| candidate == &value);
        if !found {
            let scope = substitutions[first].query_id;
            delete_row_scoped(substitutions, scope, m);
        }
    }
}

/// Delete row `row` from every record tagged with the scope id
fn delete_row_scoped(substitutions: &mut [Substitution], scope: Option<usize>, row: usize) {
    for substitution in substitutions.iter_mut() {
        if substitution.query_id == scope && row < substitution.len() {
            substitution.values.remove(row);
        }
    }
}

fn segment_len(table: &[Substitution], id: Option<usize>) -> usize {
    table
        .iter()
        .filter(|substitution| substitution.query_id == id)
        .count()
}

fn segments_share_name(table: &[Substitution], first: Option<usize>, second: Option<usize>) -> bool {
    table.iter().filter(|s| s.query_id == first).any(|a| {
        table
            .iter()
            .filter(|s| s.query_id == second)
            .any(|b| b.variable == a.variable)
    })
}

/// A copy carrying the name, slot claim, and goal tag, but no values
fn empty_copy(substitution: &Substitution) -> Substitution {
    Substitution {
        variable: substitution.variable.clone(),
        values: Vec::new(),
        slot: substitution.slot,
        query_id: substitution.query_id,
    }
}
