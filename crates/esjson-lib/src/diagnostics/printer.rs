//! Builder-pattern printer for rendering diagnostics against a body.

use std::fmt::Write;

use annotate_snippets::{AnnotationKind, Group, Level, Patch, Renderer, Snippet};
use rowan::TextRange;

use super::message::DiagnosticMessage;

/// Renders diagnostics as annotated source snippets.
///
/// Query bodies typed into an editor can carry dozens of errors after one bad
/// keystroke, so `limit` caps the output and summarizes the rest.
pub struct DiagnosticsPrinter<'a> {
    diagnostics: &'a [DiagnosticMessage],
    source: &'a str,
    path: Option<&'a str>,
    colored: bool,
    limit: Option<usize>,
}

impl<'a> DiagnosticsPrinter<'a> {
    pub fn new(diagnostics: &'a [DiagnosticMessage], source: &'a str) -> Self {
        Self {
            diagnostics,
            source,
            path: None,
            colored: false,
            limit: None,
        }
    }

    pub fn path(mut self, path: &'a str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    /// Render at most `max` diagnostics.
    pub fn limit(mut self, max: usize) -> Self {
        self.limit = Some(max);
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        let diagnostics = self.diagnostics;
        let shown = self
            .limit
            .map_or(diagnostics.len(), |max| max.min(diagnostics.len()));

        for (i, diag) in diagnostics[..shown].iter().enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }
            let report = self.report(diag);
            write!(w, "{}", renderer.render(&report))?;
        }

        let hidden = diagnostics.len() - shown;
        if hidden > 0 {
            write!(w, "\n... and {hidden} more error")?;
            if hidden > 1 {
                w.write_char('s')?;
            }
            w.write_char('\n')?;
        }

        Ok(())
    }

    fn report(&self, diag: &'a DiagnosticMessage) -> Vec<Group<'a>> {
        let range = adjust_range(diag.range, self.source.len());

        // End-of-input errors have no token to underline; say where they point.
        let label = match diag.token {
            Some(_) => diag.message.as_str(),
            None => "body ends here",
        };
        let mut snippet = Snippet::source(self.source)
            .line_start(1)
            .annotation(AnnotationKind::Primary.span(range.clone()).label(label));

        if let Some(p) = self.path {
            snippet = snippet.path(p);
        }

        for related in &diag.related {
            snippet = snippet.annotation(
                AnnotationKind::Context
                    .span(adjust_range(related.range, self.source.len()))
                    .label(&related.message),
            );
        }

        let mut report = vec![Level::ERROR.primary_title(&diag.message).element(snippet)];

        if let Some(fix) = &diag.fix {
            report.push(
                Level::HELP.secondary_title(&fix.description).element(
                    Snippet::source(self.source)
                        .line_start(1)
                        .patch(Patch::new(range, &fix.replacement)),
                ),
            );
        }

        report
    }
}

/// Empty ranges (end-of-input errors) widen to one character so they stay visible.
fn adjust_range(range: TextRange, limit: usize) -> std::ops::Range<usize> {
    let start: usize = range.start().into();
    let end: usize = range.end().into();

    if start == end {
        return start..(start + 1).min(limit);
    }

    start..end
}
