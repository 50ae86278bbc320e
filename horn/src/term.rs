use serde::Serialize;
use std::fmt;

/// Source location of a parsed token or clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub col: usize,
}

/// Classifies a raw token: a leading uppercase letter makes it a variable,
/// anything else (including `_`-prefixed tokens) is an atom.
pub fn is_variable_token(token: &str) -> bool {
    token.chars().next().map_or(false, |c| c.is_uppercase())
}

/// A single argument token, classified purely by its first character
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Term {
    Atom(String),
    Variable(String),
}

impl Term {
    /// Classify a raw token into an atom or a variable
    pub fn from_token(token: impl Into<String>) -> Self {
        let token = token.into();
        if is_variable_token(&token) {
            Term::Variable(token)
        } else {
            Term::Atom(token)
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Term::Atom(text) | Term::Variable(text) => text,
        }
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }
}

/// A bracketed list argument. `[H|T]` is flattened at parse time, so the
/// divider never survives into the model: elements are stored in order and
/// the tail is just the trailing elements.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ListTerm {
    pub elements: Vec<Term>,
}

impl ListTerm {
    pub fn new(elements: Vec<Term>) -> Self {
        ListTerm { elements }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn has_variable(&self) -> bool {
        self.elements.iter().any(Term::is_variable)
    }
}

/// One argument tuple of a fact, rule head, or query.
///
/// Named terms and embedded lists are stored in separate tables: arity counts
/// only the named terms, and lists pair up with a counterpart list purely by
/// table position.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Predicate {
    pub terms: Vec<Term>,
    pub lists: Vec<ListTerm>,
}

impl Predicate {
    pub fn new() -> Self {
        Predicate::default()
    }

    pub fn from_terms(terms: Vec<Term>) -> Self {
        Predicate { terms, lists: Vec::new() }
    }

    pub fn push_term(&mut self, term: Term) {
        self.terms.push(term);
    }

    pub fn push_list(&mut self, list: ListTerm) {
        self.lists.push(list);
    }

    /// Arity counts named terms only, never embedded lists
    pub fn arity(&self) -> usize {
        self.terms.len()
    }

    pub fn term(&self, index: usize) -> Option<&Term> {
        self.terms.get(index)
    }

    /// True when any named term or any list element is a variable
    pub fn has_variable(&self) -> bool {
        self.terms.iter().any(Term::is_variable) || self.lists.iter().any(ListTerm::has_variable)
    }

    /// True when the tuple embeds at least one non-empty list
    pub fn contains_list(&self) -> bool {
        self.lists.iter().any(|list| !list.is_empty())
    }
}

/// An ordered candidate list for one variable occurrence.
///
/// During resolution every occurrence of a variable in a query argument tuple
/// gets its own record. `slot` is the argument position the record has been
/// claimed for; `query_id` identifies the owning goal inside a conjunction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Substitution {
    pub variable: String,
    pub values: Vec<String>,
    pub slot: Option<usize>,
    pub query_id: Option<usize>,
}

impl Substitution {
    pub fn new(variable: impl Into<String>) -> Self {
        Substitution {
            variable: variable.into(),
            values: Vec::new(),
            slot: None,
            query_id: None,
        }
    }

    pub fn with_value(variable: impl Into<String>, value: impl Into<String>) -> Self {
        let mut substitution = Substitution::new(variable);
        substitution.values.push(value.into());
        substitution
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A single goal: one functor applied to one argument tuple
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Query {
    pub functor: String,
    pub predicate: Predicate,
    pub substitutions: Vec<Substitution>,
    pub id: Option<usize>,
}

impl Query {
    pub fn new(functor: impl Into<String>, predicate: Predicate) -> Self {
        Query {
            functor: functor.into(),
            predicate,
            substitutions: Vec::new(),
            id: None,
        }
    }

    pub fn arity(&self) -> usize {
        self.predicate.arity()
    }

    pub fn is_non_ground(&self) -> bool {
        self.predicate.has_variable()
    }
}

/// An ordered sequence of goals sharing one resolution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conjunction {
    pub goals: Vec<Query>,
}

impl Conjunction {
    pub fn new(goals: Vec<Query>) -> Self {
        Conjunction { goals }
    }
}

/// A resolvable goal, simple or conjunctive
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Goal {
    Simple(Query),
    Conjunctive(Conjunction),
}

impl Goal {
    pub fn is_non_ground(&self) -> bool {
        match self {
            Goal::Simple(query) => query.is_non_ground(),
            Goal::Conjunctive(conjunction) => {
                conjunction.goals.iter().any(Query::is_non_ground)
            }
        }
    }
}

/// A stored fact: one functor with every asserted argument tuple.
///
/// Re-asserting a functor merges the new tuples into the existing entry, so
/// the knowledge base only ever holds one fact entry per functor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fact {
    pub functor: String,
    pub alternatives: Vec<Predicate>,
}

impl Fact {
    pub fn new(functor: impl Into<String>, predicate: Predicate) -> Self {
        Fact {
            functor: functor.into(),
            alternatives: vec![predicate],
        }
    }
}

/// A stored rule: a head fact with exactly one argument tuple, and a body
/// that is a single goal or a conjunction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HornRule {
    pub head: Fact,
    pub body: Goal,
}

impl HornRule {
    pub fn new(head: Fact, body: Goal) -> Self {
        HornRule { head, body }
    }

    /// The head's single argument tuple
    pub fn head_predicate(&self) -> Option<&Predicate> {
        self.head.alternatives.first()
    }
}

/// One parsed program line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Clause {
    Fact(Fact),
    Rule(HornRule),
    Query(Goal),
}

// Display implementations

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}

impl fmt::Display for ListTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", element)?;
        }
        write!(f, "]")
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for term in &self.terms {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{}", term)?;
            first = false;
        }
        for list in &self.lists {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{}", list)?;
            first = false;
        }
        Ok(())
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.functor, self.predicate)
    }
}

impl fmt::Display for Conjunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, goal) in self.goals.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", goal)?;
        }
        Ok(())
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Goal::Simple(query) => write!(f, "{}", query),
            Goal::Conjunctive(conjunction) => write!(f, "{}", conjunction),
        }
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, predicate) in self.alternatives.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}({}).", self.functor, predicate)?;
        }
        Ok(())
    }
}

impl fmt::Display for HornRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let head = match self.head_predicate() {
            Some(predicate) => format!("{}({})", self.head.functor, predicate),
            None => format!("{}()", self.head.functor),
        };
        write!(f, "{} :- {}.", head, self.body)
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Clause::Fact(fact) => write!(f, "{}", fact),
            Clause::Rule(rule) => write!(f, "{}", rule),
            Clause::Query(goal) => write!(f, "{}", goal),
        }
    }
}
