use crate::term::{Fact, HornRule};
use serde::Serialize;

/// One stored clause, in assertion order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Entry {
    Fact(Fact),
    Rule(HornRule),
}

/// The ordered store of asserted facts and rules.
///
/// Entries keep their assertion order. Facts merge by functor: asserting a
/// functor that already has a fact entry appends the new argument tuples to
/// it, so lookups by functor always land on a single entry. Rules are never
/// merged; every assertion appends a fresh entry.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    entries: Vec<Entry>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        KnowledgeBase::default()
    }

    /// Assert a fact, merging its tuples into an existing entry when the
    /// functor is already known
    pub fn assert_fact(&mut self, fact: Fact) {
        for entry in self.entries.iter_mut() {
            if let Entry::Fact(existing) = entry {
                if existing.functor == fact.functor {
                    existing.alternatives.extend(fact.alternatives);
                    return;
                }
            }
        }
        self.entries.push(Entry::Fact(fact));
    }

    /// Assert a rule; rules always append
    pub fn assert_rule(&mut self, rule: HornRule) {
        self.entries.push(Entry::Rule(rule));
    }

    /// The fact entry for a functor, if one exists
    pub fn fact(&self, functor: &str) -> Option<&Fact> {
        self.entries.iter().find_map(|entry| match entry {
            Entry::Fact(fact) if fact.functor == functor => Some(fact),
            _ => None,
        })
    }

    pub fn has_fact(&self, functor: &str) -> bool {
        self.fact(functor).is_some()
    }

    pub fn has_rule(&self, functor: &str) -> bool {
        self.rules().any(|rule| rule.head.functor == functor)
    }

    /// All rule entries in assertion order
    pub fn rules(&self) -> impl Iterator<Item = &HornRule> {
        self.entries.iter().filter_map(|entry| match entry {
            Entry::Rule(rule) => Some(rule),
            _ => None,
        })
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
