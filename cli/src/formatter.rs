use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Row, Table};
use horn::{present, Consult, Entry, Resolution};

pub struct Formatter {}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter {
    pub fn new() -> Self {
        Self {}
    }

    /// One line summarizing what a consult loaded
    pub fn format_consult(&self, report: &Consult) -> String {
        let mut line = format!(
            "Loaded {} fact(s) and {} rule(s)",
            report.facts, report.rules
        );
        if !report.skipped.is_empty() {
            line.push_str(&format!(", skipped {} line(s)", report.skipped.len()));
        }
        line.push('\n');
        line
    }

    /// Render one answer the way the prompt prints it: a bare verdict for
    /// ground queries, one binding row per line otherwise
    pub fn format_resolution(&self, answer: &Resolution) -> String {
        match answer {
            Resolution::Truth { value } => value.to_string(),
            Resolution::Failure => "false".to_string(),
            Resolution::Bindings { bindings } => present(bindings).join("\n"),
        }
    }

    /// Render the stored program as a table, one row per entry
    pub fn format_listing(&self, entries: &[Entry]) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(Row::from(vec![
            Cell::new("Kind").set_alignment(CellAlignment::Left),
            Cell::new("Clause").set_alignment(CellAlignment::Left),
        ]));

        for entry in entries {
            match entry {
                Entry::Fact(fact) => {
                    table.add_row(Row::from(vec!["fact".to_string(), fact.to_string()]));
                }
                Entry::Rule(rule) => {
                    table.add_row(Row::from(vec!["rule".to_string(), rule.to_string()]));
                }
            }
        }

        table.to_string()
    }
}
