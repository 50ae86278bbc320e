use crate::error::HornError;
use crate::term::{Clause, Goal, Span};
use crate::HornResult;
use pest::Parser;
use pest_derive::Parser;
use std::sync::Arc;

pub mod clauses;
pub mod terms;

#[derive(Parser)]
#[grammar = "src/parser/horn.pest"]
pub struct HornParser;

/// Parse one program line: a fact, a rule, or a query
pub fn parse_line(content: &str, source_name: Option<String>) -> HornResult<Clause> {
    let source_name = source_name.unwrap_or_else(|| "<input>".to_string());
    let line = content.trim_end_matches(['\n', '\r']);
    parse_clause(line, &source_name, Arc::from(content), 1, 0)
}

/// Parse interactive query input, with or without the trailing `?`
pub fn parse_query(content: &str) -> HornResult<Goal> {
    let line = content.trim_end_matches(['\n', '\r']);
    match HornParser::parse(Rule::query_line, line) {
        Ok(pairs) => {
            for pair in pairs {
                if pair.as_rule() == Rule::query_line {
                    for inner_pair in pair.into_inner() {
                        if inner_pair.as_rule() == Rule::query_goals {
                            return clauses::parse_query_goals(inner_pair);
                        }
                    }
                }
            }
            Err(HornError::engine(
                "Grammar error: query_line missing query_goals".to_string(),
            ))
        }
        Err(e) => {
            let span = error_span(&e, 1, 0);
            if line.trim_end().ends_with('.') {
                Err(HornError::parse_with_suggestion(
                    format!("Parse error: {}", e.variant),
                    "drop the trailing period to ask a question",
                    span,
                    "<query>",
                    content,
                ))
            } else {
                Err(HornError::parse(
                    format!("Parse error: {}", e.variant),
                    span,
                    "<query>",
                    content,
                ))
            }
        }
    }
}

/// Parse a whole source, one clause per non-blank, non-comment line.
///
/// Each line parses independently: a malformed line becomes an error
/// carrying its line and column and never aborts the rest of the file.
pub fn parse_program(content: &str, source_name: Option<String>) -> (Vec<Clause>, Vec<HornError>) {
    let source_name = source_name.unwrap_or_else(|| "<input>".to_string());
    let source: Arc<str> = Arc::from(content);
    let mut parsed = Vec::new();
    let mut errors = Vec::new();

    let mut offset = 0;
    for (index, raw) in content.split_inclusive('\n').enumerate() {
        let line = raw.trim_end_matches(['\n', '\r']);
        let trimmed = line.trim();
        if !trimmed.is_empty() && !trimmed.starts_with('%') {
            match parse_clause(line, &source_name, source.clone(), index + 1, offset) {
                Ok(clause) => parsed.push(clause),
                Err(error) => errors.push(error),
            }
        }
        offset += raw.len();
    }

    (parsed, errors)
}

fn parse_clause(
    line: &str,
    source_name: &str,
    source: Arc<str>,
    line_number: usize,
    offset: usize,
) -> HornResult<Clause> {
    match HornParser::parse(Rule::program_line, line) {
        Ok(pairs) => {
            for pair in pairs {
                if pair.as_rule() == Rule::program_line {
                    for inner_pair in pair.into_inner() {
                        match inner_pair.as_rule() {
                            Rule::fact_definition => {
                                return Ok(Clause::Fact(clauses::parse_fact_definition(
                                    inner_pair,
                                )?))
                            }
                            Rule::rule_definition => {
                                return Ok(Clause::Rule(clauses::parse_rule_definition(
                                    inner_pair,
                                )?))
                            }
                            Rule::query_goals => {
                                return Ok(Clause::Query(clauses::parse_query_goals(inner_pair)?))
                            }
                            _ => {}
                        }
                    }
                }
            }
            Err(HornError::engine(
                "Grammar error: program_line missing a clause".to_string(),
            ))
        }
        Err(e) => Err(HornError::parse(
            format!("Parse error: {}", e.variant),
            error_span(&e, line_number, offset),
            source_name,
            source,
        )),
    }
}

/// Locate a pest error inside the full source. Lines parse one at a time,
/// so the error's own line is always 1 and only its column carries over.
fn error_span(error: &pest::error::Error<Rule>, line_number: usize, offset: usize) -> Span {
    let col = match error.line_col {
        pest::error::LineColLocation::Pos((_, col)) => col,
        pest::error::LineColLocation::Span((_, col), (_, _)) => col,
    };
    let start = offset + col.saturating_sub(1);
    Span {
        start,
        end: start + 1,
        line: line_number,
        col,
    }
}
