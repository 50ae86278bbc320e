//! # Horn Engine
//!
//! **Facts, rules, and questions**
//!
//! Horn is a minimal Prolog-flavored logic engine. Programs assert facts and
//! Horn rules; ground questions resolve to a verdict, and questions with
//! variables enumerate candidate bindings positionally.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use horn::{Engine, HornResult};
//!
//! fn main() -> HornResult<()> {
//!     let mut engine = Engine::new();
//!
//!     engine.consult(
//!         r#"
//!         parent(tom, liz).
//!         parent(liz, ann).
//!         ancestor(X, Y) :- parent(X, Y).
//!         ancestor(X, Y) :- parent(X, Z), ancestor(Z, Y).
//!         "#,
//!         "family.horn",
//!     )?;
//!
//!     let answer = engine.query("ancestor(tom, ann)")?;
//!     assert!(answer.is_success());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Facts
//! A fact asserts argument tuples for a functor: `parent(tom, liz).`.
//! Re-asserting a functor merges the new tuples into the stored entry.
//!
//! ### Rules
//! Rules derive new conclusions: `head(...) :- goal, goal.`. A single body
//! goal makes a simple rule; several make a conjunctive one.
//!
//! ### Queries
//! A goal without variables resolves to `true` or `false`. A goal with
//! variables collects candidate values per variable occurrence; surviving
//! candidates line up positionally, row by row.
//!
//! ### Committed choice
//! Resolution commits to the first alternative that succeeds and never
//! backtracks across clauses.

pub mod engine;
pub mod error;
pub mod knowledge;
pub mod parser;
pub mod presenter;
pub mod resolver;
pub mod resource_limits;
pub mod response;
pub mod term;

pub use engine::{Consult, Engine};
pub use error::{ErrorDetails, HornError};
pub use knowledge::{Entry, KnowledgeBase};
pub use parser::{parse_line, parse_program, parse_query};
pub use presenter::present;
pub use resolver::{Outcome, Resolver};
pub use resource_limits::ResourceLimits;
pub use response::{BindingSet, Resolution};
pub use term::{
    is_variable_token, Clause, Conjunction, Fact, Goal, HornRule, ListTerm, Predicate, Query,
    Span, Substitution, Term,
};

/// Result type for Horn operations
pub type HornResult<T> = Result<T, HornError>;

#[cfg(test)]
mod tests;
