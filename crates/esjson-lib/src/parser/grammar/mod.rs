//! Grammar productions for query bodies.
//!
//! This module implements all `parse_*` methods as an extension of `Parser`.
//! The grammar is JSON plus one value production, the parameter placeholder
//! `{{#toJson}}NAME{{/toJson}}`.

mod structures;
mod values;

use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::syntax_kind::SyntaxKind;

impl Parser<'_> {
    /// `body := value EOF`
    ///
    /// With `wrap_in_parens` the body is an implicit group that must hold
    /// exactly one value, so an empty body is an error. Without it an empty
    /// body is simply a buffer that has not received anything yet.
    pub fn parse_root(&mut self) {
        if self.currently_is(SyntaxKind::Eof) {
            if self.options.wrap_in_parens {
                self.error_msg(DiagnosticKind::ExpectedValue, "end of input");
            }
            return;
        }

        let root = self.parse_value(None);
        self.tree.set_root(root);

        if self.should_stop() || self.currently_is(SyntaxKind::Eof) {
            return;
        }
        if self.at_truncation() {
            return;
        }

        // Only the first stray token is worth reporting.
        self.error_found(DiagnosticKind::TrailingContent);
        self.pos = self.tokens.len();
    }
}
