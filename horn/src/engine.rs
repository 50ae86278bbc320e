use crate::knowledge::Entry;
use crate::parser;
use crate::resolver::Resolver;
use crate::response::Resolution;
use crate::term::{Clause, Fact, Goal, HornRule};
use crate::{HornError, HornResult, KnowledgeBase, ResourceLimits};

/// What one source load produced: assertion counts, answers to embedded
/// queries, and the malformed lines that were skipped
#[derive(Debug, Default)]
pub struct Consult {
    pub facts: usize,
    pub rules: usize,
    pub answers: Vec<Resolution>,
    pub skipped: Vec<HornError>,
}

/// The Horn resolution engine.
///
/// Owns the knowledge base and resolves queries against it. Assertions
/// mutate the session; resolution never does.
pub struct Engine {
    knowledge: KnowledgeBase,
    limits: ResourceLimits,
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            knowledge: KnowledgeBase::new(),
            limits: ResourceLimits::default(),
        }
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with custom resource limits
    pub fn with_resource_limits(limits: ResourceLimits) -> Self {
        Self {
            knowledge: KnowledgeBase::new(),
            limits,
        }
    }

    /// Get the current resource limits
    pub fn limits(&self) -> &ResourceLimits {
        &self.limits
    }

    /// The knowledge base accumulated by this session
    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn assert_fact(&mut self, fact: Fact) {
        self.knowledge.assert_fact(fact);
    }

    pub fn assert_rule(&mut self, rule: HornRule) {
        self.knowledge.assert_rule(rule);
    }

    /// Store an assertion or resolve a query. Assertions return `None`,
    /// queries return their outcome.
    pub fn resolve(&mut self, clause: Clause) -> HornResult<Option<Resolution>> {
        match clause {
            Clause::Fact(fact) => {
                self.assert_fact(fact);
                Ok(None)
            }
            Clause::Rule(rule) => {
                self.assert_rule(rule);
                Ok(None)
            }
            Clause::Query(goal) => Ok(Some(self.resolve_goal(&goal)?)),
        }
    }

    /// Resolve a goal, routed by its ground / non-ground classification
    pub fn resolve_goal(&self, goal: &Goal) -> HornResult<Resolution> {
        let resolver = Resolver::new(&self.knowledge, &self.limits);
        if goal.is_non_ground() {
            resolver.resolve_non_ground(goal)
        } else {
            let value = resolver.resolve_ground(goal)?;
            Ok(Resolution::Truth { value })
        }
    }

    /// Resolve a fully ground goal to a verdict
    pub fn resolve_ground(&self, goal: &Goal) -> HornResult<bool> {
        Resolver::new(&self.knowledge, &self.limits).resolve_ground(goal)
    }

    /// Resolve a non-ground goal to bindings or failure
    pub fn resolve_non_ground(&self, goal: &Goal) -> HornResult<Resolution> {
        Resolver::new(&self.knowledge, &self.limits).resolve_non_ground(goal)
    }

    /// Parse one query and resolve it
    pub fn query(&self, text: &str) -> HornResult<Resolution> {
        let goal = parser::parse_query(text)?;
        self.resolve_goal(&goal)
    }

    /// Load a whole source: assert its facts and rules, resolve its
    /// queries, and report malformed lines without aborting the load
    pub fn consult(&mut self, code: &str, source: &str) -> HornResult<Consult> {
        let (clauses, skipped) = parser::parse_program(code, Some(source.to_string()));
        let mut report = Consult {
            skipped,
            ..Consult::default()
        };
        for clause in clauses {
            match clause {
                Clause::Fact(fact) => {
                    self.assert_fact(fact);
                    report.facts += 1;
                }
                Clause::Rule(rule) => {
                    self.assert_rule(rule);
                    report.rules += 1;
                }
                Clause::Query(goal) => {
                    report.answers.push(self.resolve_goal(&goal)?);
                }
            }
        }
        Ok(report)
    }

    /// Render the stored program in assertion order, one line per stored
    /// argument tuple or rule
    pub fn listing(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for entry in self.knowledge.entries() {
            match entry {
                Entry::Fact(fact) => {
                    lines.extend(fact.to_string().lines().map(str::to_string));
                }
                Entry::Rule(rule) => lines.push(rule.to_string()),
            }
        }
        lines
    }
}
