use std::fmt;

use crate::span::Span;
use crate::types::{display_list, Ty};

/// A conversion diagnostic (error or warning).
///
/// Besides the human-readable message, conversion diagnostics carry the
/// operand types and the resolved target so callers can build their own
/// reports or suggest explicit casts.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub span: Span,
    pub notes: Vec<String>,
    pub help: Option<String>,
    pub source_types: Vec<Ty>,
    pub target_type: Option<Ty>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: String, span: Span) -> Self {
        Self {
            severity,
            message,
            span,
            notes: Vec::new(),
            help: None,
            source_types: Vec::new(),
            target_type: None,
        }
    }

    pub fn error(message: String, span: Span) -> Self {
        Self::new(Severity::Error, message, span)
    }

    pub fn warning(message: String, span: Span) -> Self {
        Self::new(Severity::Warning, message, span)
    }

    pub fn with_note(mut self, note: String) -> Self {
        self.notes.push(note);
        self
    }

    pub fn with_help(mut self, help: String) -> Self {
        self.help = Some(help);
        self
    }

    /// Attach the operand types (in input order) and the resolved target.
    pub fn with_types(mut self, sources: Vec<Ty>, target: Option<Ty>) -> Self {
        self.source_types = sources;
        self.target_type = target;
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Render the diagnostic to stderr using ariadne.
    pub fn render(&self, filename: &str, source: &str) -> std::io::Result<()> {
        use ariadne::{Color, Label, Report, ReportKind, Source};

        let kind = match self.severity {
            Severity::Error => ReportKind::Error,
            Severity::Warning => ReportKind::Warning,
        };

        let color = match self.severity {
            Severity::Error => Color::Red,
            Severity::Warning => Color::Yellow,
        };

        let span = if self.span.is_dummy() {
            Span::covering(source)
        } else {
            self.span
        };

        let mut report = Report::build(kind, filename, span.start as usize)
            .with_message(&self.message)
            .with_label(
                Label::new((filename, span.range()))
                    .with_message(&self.message)
                    .with_color(color),
            );

        for note in &self.notes {
            report = report.with_note(note);
        }

        if let Some(help) = &self.help {
            report = report.with_help(help);
        }

        report.finish().eprint((filename, Source::from(source)))
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {}", label, self.message)?;
        for note in &self.notes {
            write!(f, "\n  note: {}", note)?;
        }
        if let Some(help) = &self.help {
            write!(f, "\n  help: {}", help)?;
        }
        Ok(())
    }
}

/// Render a list of diagnostics.
pub fn render_diagnostics(
    diagnostics: &[Diagnostic],
    filename: &str,
    source: &str,
) -> std::io::Result<()> {
    for diag in diagnostics {
        diag.render(filename, source)?;
    }
    Ok(())
}

/// Note listing operand types, used by conversion diagnostics.
pub(crate) fn operand_note(sources: &[Ty]) -> String {
    format!("operand types: [{}]", display_list(sources))
}
