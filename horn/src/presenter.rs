//! Turns validated candidate lists into display rows.

use crate::response::BindingSet;
use crate::term::Substitution;

/// Render one line per candidate row, in `X = a, Y = b` form.
///
/// Conjunctive answers carry a goal tag on every record; their rows group
/// by goal, in goal order. Each group's row count comes from its first
/// record, and records that run short skip the missing rows.
pub fn present(bindings: &BindingSet) -> Vec<String> {
    let substitutions = &bindings.substitutions;
    if substitutions.iter().any(|s| s.query_id.is_some()) {
        let max_id = substitutions
            .iter()
            .filter_map(|s| s.query_id)
            .max()
            .unwrap_or(0);
        let mut lines = Vec::new();
        for id in 0..=max_id {
            let group: Vec<&Substitution> = substitutions
                .iter()
                .filter(|s| s.query_id == Some(id))
                .collect();
            if group.is_empty() {
                continue;
            }
            lines.extend(rows_for(&group));
        }
        lines
    } else {
        let group: Vec<&Substitution> = substitutions.iter().collect();
        rows_for(&group)
    }
}

fn rows_for(group: &[&Substitution]) -> Vec<String> {
    let rows = group.first().map_or(0, |s| s.len());
    let mut lines = Vec::new();
    for row in 0..rows {
        let parts: Vec<String> = group
            .iter()
            .filter_map(|s| {
                s.values
                    .get(row)
                    .map(|value| format!("{} = {}", s.variable, value))
            })
            .collect();
        lines.push(parts.join(", "));
    }
    lines
}
