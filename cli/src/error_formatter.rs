use ariadne::{Color, Label, Report, ReportKind, Source};
use horn::HornError;

/// Format a HornError with an annotated terminal report for parse errors,
/// or the plain display form otherwise
pub fn format_error(error: &HornError) -> String {
    match error {
        HornError::Parse(details) => {
            let mut output = Vec::new();

            let source_name = details.source_name.as_deref().unwrap_or("<input>");
            let message = format!(
                "{} ({}:{}:{})",
                details.message, source_name, details.span.line, details.span.col
            );

            let mut report = Report::build(ReportKind::Error, source_name, details.span.start)
                .with_message(message)
                .with_label(
                    Label::new((source_name, details.span.start..details.span.end))
                        .with_message("")
                        .with_color(Color::Red),
                );

            if let Some(suggestion) = &details.suggestion {
                report = report.with_help(suggestion);
            }

            match report.finish().write(
                (source_name, Source::from(details.source_text.as_ref())),
                &mut output,
            ) {
                Ok(_) => String::from_utf8_lossy(&output).to_string(),
                Err(_) => {
                    // Fallback to simple format
                    format!("{}", error)
                }
            }
        }
        HornError::RecursionLimit(_) | HornError::Engine(_) => format!("{}", error),
    }
}
